//! Random regular graphs
//!
//! Stub pairing with partial restarts: every node starts with `d` stubs, stubs
//! are shuffled and paired, and pairs that would form a self loop or a repeated
//! edge go back into the pool for the next round. When no leftover pair can
//! ever be joined the attempt is discarded and started over.

use super::{check_mean_degree, GeneratorConfig, GeneratorError, GeneratorResult, GraphGenerator};
use crate::graph::{Count, Graph, NodeId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeMap;
use tracing::debug;

pub struct RandomRegular {
    rng: StdRng,
}

impl RandomRegular {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { rng: config.rng() }
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Uniformly drawn simple graph where every node has degree `degree`.
    ///
    /// Requires `degree < N` and `N·degree` even.
    pub fn by_degree(&mut self, num_nodes: Count, degree: usize) -> GeneratorResult<Graph> {
        let feasible = degree == 0 || (degree < num_nodes && (num_nodes * degree) % 2 == 0);
        if !feasible {
            return Err(GeneratorError::InvalidRegularDegree { degree, num_nodes });
        }

        let mut attempts: u64 = 0;
        loop {
            attempts += 1;
            if let Some(graph) = self.try_pairing(num_nodes, degree)? {
                debug!(nodes = num_nodes, degree, attempts, "Generated random regular graph");
                return Ok(graph);
            }
        }
    }

    /// Degree `floor(d)`
    pub fn by_mean_degree(&mut self, num_nodes: Count, mean_degree: f64) -> GeneratorResult<Graph> {
        check_mean_degree(mean_degree)?;
        self.by_degree(num_nodes, mean_degree.floor() as usize)
    }

    fn try_pairing(&mut self, num_nodes: Count, degree: usize) -> GeneratorResult<Option<Graph>> {
        let mut graph = Graph::new(num_nodes);
        let mut stubs: Vec<NodeId> = (0..num_nodes)
            .flat_map(|node| std::iter::repeat(node).take(degree))
            .collect();

        while !stubs.is_empty() {
            stubs.shuffle(&mut self.rng);

            // Node -> number of stubs left unpaired this round
            let mut leftover: BTreeMap<NodeId, usize> = BTreeMap::new();
            for pair in stubs.chunks_exact(2) {
                if !graph.add_edge(pair[0], pair[1])? {
                    *leftover.entry(pair[0]).or_insert(0) += 1;
                    *leftover.entry(pair[1]).or_insert(0) += 1;
                }
            }

            if !Self::can_continue(&graph, &leftover) {
                return Ok(None);
            }
            stubs = leftover
                .into_iter()
                .flat_map(|(node, count)| std::iter::repeat(node).take(count))
                .collect();
        }
        Ok(Some(graph))
    }

    /// Some pair of distinct leftover nodes is still unconnected
    fn can_continue(graph: &Graph, leftover: &BTreeMap<NodeId, usize>) -> bool {
        if leftover.is_empty() {
            return true;
        }
        let nodes: Vec<NodeId> = leftover.keys().copied().collect();
        nodes
            .iter()
            .enumerate()
            .any(|(i, &a)| nodes[i + 1..].iter().any(|&b| !graph.has_edge(a, b)))
    }
}

impl GraphGenerator for RandomRegular {
    fn generate(&mut self, num_nodes: Count, mean_degree: f64) -> GeneratorResult<Graph> {
        self.by_mean_degree(num_nodes, mean_degree)
    }

    fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
