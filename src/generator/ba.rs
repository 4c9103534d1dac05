//! Barabási–Albert preferential attachment
//!
//! Starts from a star on `m + 1` nodes, then every new node attaches to `m`
//! distinct existing nodes chosen with probability proportional to degree.
//! The result has `m·(N − m)` edges and mean degree close to `2m`.

use super::{check_mean_degree, GeneratorConfig, GeneratorError, GeneratorResult, GraphGenerator};
use crate::graph::{Count, Graph, NodeId};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::BTreeSet;
use tracing::debug;

pub struct BarabasiAlbert {
    rng: StdRng,
}

impl BarabasiAlbert {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { rng: config.rng() }
    }

    pub fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }

    /// Scale-free graph where every new node brings `attachments` edges.
    pub fn by_attachments(
        &mut self,
        num_nodes: Count,
        attachments: usize,
    ) -> GeneratorResult<Graph> {
        if attachments < 1 || attachments >= num_nodes {
            return Err(GeneratorError::InvalidAttachment { attachments, num_nodes });
        }

        let mut graph = Graph::new(num_nodes);
        for leaf in 1..=attachments {
            graph.add_edge(0, leaf)?;
        }

        // Every node appears once per incident edge end
        let mut repeated: Vec<NodeId> = Vec::with_capacity(2 * attachments * num_nodes);
        repeated.extend(std::iter::repeat(0).take(attachments));
        repeated.extend(1..=attachments);

        for source in (attachments + 1)..num_nodes {
            let mut targets = BTreeSet::new();
            while targets.len() < attachments {
                if let Some(&target) = repeated.choose(&mut self.rng) {
                    targets.insert(target);
                }
            }
            for &target in &targets {
                graph.add_edge(source, target)?;
            }
            repeated.extend(targets);
            repeated.extend(std::iter::repeat(source).take(attachments));
        }

        debug!(nodes = num_nodes, edges = graph.edge_count(), attachments, "Generated BA graph");
        Ok(graph)
    }

    /// `floor(d / 2)` attachments per node; an odd `d` is rounded down
    pub fn by_mean_degree(&mut self, num_nodes: Count, mean_degree: f64) -> GeneratorResult<Graph> {
        check_mean_degree(mean_degree)?;
        self.by_attachments(num_nodes, (mean_degree / 2.0).floor() as usize)
    }
}

impl GraphGenerator for BarabasiAlbert {
    fn generate(&mut self, num_nodes: Count, mean_degree: f64) -> GeneratorResult<Graph> {
        self.by_mean_degree(num_nodes, mean_degree)
    }

    fn rng_mut(&mut self) -> &mut StdRng {
        &mut self.rng
    }
}
