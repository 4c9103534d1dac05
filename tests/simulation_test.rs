use swing::generator::{ErdosRenyi, GeneratorConfig};
use swing::params::Parameters;
use swing::persistence::{read_arguments, write_arguments, TrajectoryWriter};
use swing::{ForceKernel, Scheme, SimulationConfig, SolverConfig};
use tempfile::TempDir;

fn generated(seed: u64, num_nodes: usize, num_steps: usize) -> Parameters<f64> {
    let mut er = ErdosRenyi::new(GeneratorConfig::seeded(seed));
    let graph = er.by_mean_degree(num_nodes, 4.0).unwrap();
    Parameters::from_graph(&graph, num_steps, 0.01, er.rng_mut()).unwrap()
}

#[test]
fn test_generated_network_solves() {
    let params = generated(42, 100, 200);

    for scheme in [Scheme::Rk1, Scheme::Rk2, Scheme::Rk4] {
        let trajectory = params
            .solve(scheme, SolverConfig::default(), ForceKernel::EdgeList)
            .unwrap();
        assert_eq!(trajectory.len(), 201);
        assert_eq!(trajectory.row(0).len(), 200);
        assert_eq!(trajectory.row(0).to_owned(), params.initial_state.flatten());
        assert!(trajectory.is_finite());
    }
}

#[test]
fn test_kernels_and_parallelism_agree() {
    let params = generated(11, 60, 50);

    let fast = params
        .solve(Scheme::Rk4, SolverConfig::default(), ForceKernel::EdgeList)
        .unwrap();
    let naive = params
        .solve(Scheme::Rk4, SolverConfig::default(), ForceKernel::Pairwise)
        .unwrap();
    let parallel = params
        .solve(Scheme::Rk4, SolverConfig { parallel: true }, ForceKernel::EdgeList)
        .unwrap();

    for ((a, b), c) in fast.as_array().iter().zip(naive.as_array()).zip(parallel.as_array()) {
        assert!((a - b).abs() < 1e-9);
        assert!((a - c).abs() < 1e-9);
    }
}

#[test]
fn test_argument_file_drives_same_solve() {
    let temp_dir = TempDir::new().unwrap();
    let arg_path = temp_dir.path().join("args.txt");
    let params = generated(7, 40, 20);

    write_arguments(&arg_path, &params).unwrap();
    let args: Vec<f64> = read_arguments(&arg_path).unwrap();
    let decoded =
        Parameters::from_buffer(&args, params.num_nodes(), params.num_edges(), params.num_steps())
            .unwrap();

    let config = SolverConfig::default();
    let expected = params.solve(Scheme::Rk2, config, ForceKernel::EdgeList).unwrap();
    let actual = decoded.solve(Scheme::Rk2, config, ForceKernel::EdgeList).unwrap();
    assert_eq!(expected, actual);
}

#[test]
fn test_trajectory_file_has_one_line_per_time_point() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("out").join("trajectory.csv");
    let params = generated(3, 10, 5);
    let trajectory =
        params.solve(Scheme::Rk4, SolverConfig::default(), ForceKernel::EdgeList).unwrap();

    TrajectoryWriter::for_path(&path).write_to_path(&trajectory, &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 6);
    for (index, line) in lines.iter().enumerate() {
        let values: Vec<f64> = line.split(',').map(|v| v.parse().unwrap()).collect();
        assert_eq!(values, trajectory.row(index).to_vec());
    }
}

#[test]
fn test_single_precision_tracks_double() {
    let mut er = ErdosRenyi::new(GeneratorConfig::seeded(19));
    let graph = er.by_mean_degree(30, 4.0).unwrap();
    let double = Parameters::<f64>::from_graph(&graph, 100, 0.01, er.rng_mut()).unwrap();

    let single_args: Vec<f32> = double.to_buffer().iter().map(|&v| v as f32).collect();
    let single = Parameters::from_buffer(&single_args, 30, graph.edge_count(), 100).unwrap();

    let a = double.solve(Scheme::Rk4, SolverConfig::default(), ForceKernel::EdgeList).unwrap();
    let b = single.solve(Scheme::Rk4, SolverConfig::default(), ForceKernel::EdgeList).unwrap();
    for (x, y) in a.last_state().flatten().iter().zip(b.last_state().flatten().iter()) {
        assert!((x - *y as f64).abs() < 1e-3);
    }
}

#[test]
fn test_config_drives_generation() {
    let config = SimulationConfig {
        num_nodes: 25,
        mean_degree: 2.0,
        num_steps: 3,
        seed: Some(4),
        ..Default::default()
    };
    config.validate().unwrap();

    let mut er = ErdosRenyi::new(config.generator_config());
    let graph = er.by_mean_degree(config.num_nodes, config.mean_degree).unwrap();
    let params =
        Parameters::<f64>::from_graph(&graph, config.num_steps, config.dt, er.rng_mut()).unwrap();
    let trajectory = params.solve(config.scheme, config.solver_config(), config.kernel()).unwrap();

    assert_eq!(graph.edge_count(), 25);
    assert_eq!(trajectory.len(), 4);
}
