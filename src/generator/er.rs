//! Erdős–Rényi random graphs
//!
//! Two construction modes over a fixed node count:
//! - by probability: every pair `(i, j)`, `i < j`, gets an edge independently
//! - by mean degree: uniform random pairs are drawn until `floor(N·d/2)` edges exist

use super::{check_mean_degree, GeneratorConfig, GeneratorError, GeneratorResult, GraphGenerator};
use crate::graph::{Count, Graph};
use rand::rngs::StdRng;
use rand::Rng;
use tracing::debug;

/// Erdős–Rényi generator holding its own random engine.
///
/// The same engine can be borrowed with [`ErdosRenyi::rng_mut`] to draw the
/// initial conditions of the generated network from one seeded stream.
pub struct ErdosRenyi {
    rng: StdRng,
}

impl ErdosRenyi {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { rng: config.rng() }
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// G(N, p): one uniform `[0, 1)` draw per pair, in increasing `i` then `j`.
    pub fn by_probability(&mut self, num_nodes: Count, prob: f64) -> GeneratorResult<Graph> {
        if !(0.0..=1.0).contains(&prob) {
            return Err(GeneratorError::InvalidProbability(prob));
        }

        let mut graph = Graph::new(num_nodes);
        for node1 in 0..num_nodes {
            for node2 in (node1 + 1)..num_nodes {
                if self.rng.gen::<f64>() < prob {
                    graph.add_edge(node1, node2)?;
                }
            }
        }
        debug!(
            nodes = num_nodes,
            edges = graph.edge_count(),
            prob,
            "Generated ER graph by probability"
        );
        Ok(graph)
    }

    /// G(N, M) with `M = floor(N·d/2)`, by rejection sampling of node pairs.
    ///
    /// Self loops and repeated pairs are absorbed by [`Graph::add_edge`] and
    /// simply redrawn. Targets close to the complete graph need many redraws;
    /// targets beyond `N(N-1)/2` are rejected up front.
    pub fn by_mean_degree(&mut self, num_nodes: Count, mean_degree: f64) -> GeneratorResult<Graph> {
        check_mean_degree(mean_degree)?;

        let target = (num_nodes as f64 * mean_degree / 2.0).floor() as Count;
        let max = num_nodes * num_nodes.saturating_sub(1) / 2;
        if target > max {
            return Err(GeneratorError::UnsatisfiableTarget { target, max });
        }

        let mut graph = Graph::new(num_nodes);
        let mut attempts: u64 = 0;
        while graph.edge_count() < target {
            let node1 = self.rng.gen_range(0..num_nodes);
            let node2 = self.rng.gen_range(0..num_nodes);
            graph.add_edge(node1, node2)?;
            attempts += 1;
        }
        debug!(nodes = num_nodes, edges = target, attempts, "Generated ER graph by mean degree");
        Ok(graph)
    }
}

impl GraphGenerator for ErdosRenyi {
    fn generate(&mut self, num_nodes: Count, mean_degree: f64) -> GeneratorResult<Graph> {
        self.by_mean_degree(num_nodes, mean_degree)
    }

    fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
