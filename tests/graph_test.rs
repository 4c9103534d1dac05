use swing::generator::{
    BarabasiAlbert, ErdosRenyi, GeneratorConfig, GeneratorError, GraphGenerator, GraphKind,
    RandomRegular,
};
use swing::graph::{Graph, GraphError};

#[test]
fn test_edge_list_reconstruction() {
    let mut er = ErdosRenyi::new(GeneratorConfig::seeded(2024));
    let graph = er.by_mean_degree(200, 6.0).unwrap();

    let edge_list = graph.get_edge_list();
    assert_eq!(edge_list.len(), graph.edge_count());
    assert!(edge_list.iter().all(|&(a, b)| a < b));
    assert!(edge_list.windows(2).all(|w| w[0] < w[1]));

    let rebuilt = Graph::from_edge_list(graph.node_count(), &edge_list).unwrap();
    assert_eq!(rebuilt, graph);
    assert_eq!(rebuilt.get_adjacency_matrix(), graph.get_adjacency_matrix());
}

#[test]
fn test_mean_degree_matches_target() {
    let mut er = ErdosRenyi::new(GeneratorConfig::seeded(5));
    let graph = er.by_mean_degree(1000, 4.0).unwrap();
    assert_eq!(graph.edge_count(), 2000);
    assert!((graph.get_mean_degree() - 4.0).abs() < 1e-12);

    let degrees = graph.get_degrees();
    assert_eq!(degrees.iter().sum::<usize>(), 2 * graph.edge_count());

    let distribution = graph.get_degree_distribution();
    assert_eq!(distribution.values().sum::<usize>(), 1000);
}

#[test]
fn test_adjacency_matrix_symmetry() {
    let mut er = ErdosRenyi::new(GeneratorConfig::seeded(9));
    let graph = er.by_probability(40, 0.15).unwrap();
    let matrix = graph.get_adjacency_matrix();

    assert_eq!(matrix, matrix.t());
    assert!((0..40).all(|i| !matrix[[i, i]]));
    assert_eq!(matrix.iter().filter(|&&x| x).count(), 2 * graph.edge_count());
}

#[test]
fn test_has_edge_reflexive_and_idempotent_add() {
    let mut graph = Graph::new(3);
    for node in 0..3 {
        assert!(graph.has_edge(node, node));
    }

    assert!(graph.add_edge(0, 2).unwrap());
    assert!(!graph.add_edge(2, 0).unwrap());
    assert!(!graph.add_edge(0, 2).unwrap());
    assert_eq!(graph.edge_count(), 1);
    assert_eq!(graph.get_edge_list(), vec![(0, 2)]);
}

#[test]
fn test_remove_node_then_edge_list() {
    let mut graph = Graph::complete(5);
    graph.remove_node(0).unwrap();
    graph.remove_edge(3, 4).unwrap();

    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 5);
    assert_eq!(graph.get_edge_list(), vec![(1, 2), (1, 3), (1, 4), (2, 3), (2, 4)]);
    assert_eq!(graph.get_degrees(), vec![0, 3, 3, 2, 2]);
    assert_eq!(graph.remove_edge(3, 4), Err(GraphError::EdgeNotFound(3, 4)));
}

#[test]
fn test_from_edge_list_rejects_unknown_node() {
    assert_eq!(
        Graph::from_edge_list(3, &[(0, 1), (1, 3)]),
        Err(GraphError::NodeNotFound(3))
    );
}

#[test]
fn test_complete_graph_via_generator() {
    let mut er = ErdosRenyi::new(GeneratorConfig::seeded(1));
    let graph = er.by_mean_degree(6, 5.0).unwrap();
    assert_eq!(graph, Graph::complete(6));

    assert!(matches!(
        er.by_mean_degree(6, 5.5),
        Err(GeneratorError::UnsatisfiableTarget { target: 16, max: 15 })
    ));
}

#[test]
fn test_giant_component_of_sparse_er() {
    let mut er = ErdosRenyi::new(GeneratorConfig::seeded(31));
    let graph = er.by_mean_degree(300, 1.2).unwrap();
    let (giant, old_ids) = graph.giant_component();

    assert!(giant.node_count() < graph.node_count());
    assert_eq!(giant.node_slots(), giant.node_count());
    assert_eq!(old_ids.len(), giant.node_count());
    assert!(old_ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(giant.connected_components().len(), 1);

    // Every compacted edge maps back to an edge of the source graph
    for (a, b) in giant.get_edge_list() {
        assert!(graph.has_edge(old_ids[a], old_ids[b]));
    }
}

#[test]
fn test_scale_free_and_regular_models() {
    let ba = BarabasiAlbert::new(GeneratorConfig::seeded(5)).by_attachments(300, 3).unwrap();
    assert_eq!(ba.edge_count(), 3 * 297);
    assert_eq!(ba.connected_components().len(), 1);

    let rr = RandomRegular::new(GeneratorConfig::seeded(5)).by_degree(300, 5);
    assert_eq!(rr, Err(GeneratorError::InvalidRegularDegree { degree: 5, num_nodes: 300 }));
    let rr = RandomRegular::new(GeneratorConfig::seeded(5)).by_degree(300, 4).unwrap();
    assert!(rr.get_degrees().iter().all(|&degree| degree == 4));
}

#[test]
fn test_graph_kind_dispatch() {
    for kind in [GraphKind::Er, GraphKind::Ba, GraphKind::Rr] {
        let mut generator = kind.generator(GeneratorConfig::seeded(9));
        let graph = generator.generate(60, 4.0).unwrap();
        assert_eq!(graph.node_count(), 60, "{}", kind);
        assert_eq!(graph.edge_count(), 120 - if kind == GraphKind::Ba { 4 } else { 0 });
    }
}
