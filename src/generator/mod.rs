//! Random graph generators
//!
//! Every generator owns a seeded pseudo-random source. A fixed seed makes the
//! draw order, and therefore the generated graph, fully reproducible.
//!
//! - [`ErdosRenyi`]: uniform random graphs
//! - [`BarabasiAlbert`]: scale-free graphs by preferential attachment
//! - [`RandomRegular`]: every node has the same degree

pub mod ba;
pub mod er;
pub mod rr;

pub use ba::BarabasiAlbert;
pub use er::ErdosRenyi;
pub use rr::RandomRegular;

use crate::graph::{Count, Graph, GraphError};
use std::fmt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during graph generation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeneratorError {
    #[error("Edge probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("Mean degree {0} must be finite and non-negative")]
    InvalidMeanDegree(f64),

    #[error(
        "Unsatisfiable target: {target} edges requested but a simple graph admits at most {max}"
    )]
    UnsatisfiableTarget { target: usize, max: usize },

    #[error("Attachment count {attachments} must be in 1..{num_nodes}")]
    InvalidAttachment { attachments: usize, num_nodes: usize },

    #[error("No simple {degree}-regular graph on {num_nodes} nodes")]
    InvalidRegularDegree { degree: usize, num_nodes: usize },

    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),
}

pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Configuration for random generators.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// `Some(seed)` for a reproducible stream, `None` to seed once from OS entropy
    pub seed: Option<u64>,
}

impl GeneratorConfig {
    pub fn seeded(seed: u64) -> Self {
        Self { seed: Some(seed) }
    }

    /// Build the random engine this configuration describes
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }
}

/// Random graph model selector
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GraphKind {
    /// Erdős–Rényi by mean degree
    #[default]
    Er,
    /// Barabási–Albert with `floor(d/2)` attachments per new node
    Ba,
    /// Random regular with degree `floor(d)`
    Rr,
}

impl GraphKind {
    pub fn name(self) -> &'static str {
        match self {
            GraphKind::Er => "er",
            GraphKind::Ba => "ba",
            GraphKind::Rr => "rr",
        }
    }

    /// Generator of this model
    pub fn generator(self, config: GeneratorConfig) -> Box<dyn GraphGenerator> {
        match self {
            GraphKind::Er => Box::new(ErdosRenyi::new(config)),
            GraphKind::Ba => Box::new(BarabasiAlbert::new(config)),
            GraphKind::Rr => Box::new(RandomRegular::new(config)),
        }
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Common interface of the random graph models.
pub trait GraphGenerator {
    /// Graph on `num_nodes` nodes whose mean degree is close to `mean_degree`
    fn generate(&mut self, num_nodes: Count, mean_degree: f64) -> GeneratorResult<Graph>;

    /// Random engine, shared with whatever is drawn after the graph
    fn rng_mut(&mut self) -> &mut StdRng;
}

fn check_mean_degree(mean_degree: f64) -> GeneratorResult<()> {
    if !mean_degree.is_finite() || mean_degree < 0.0 {
        return Err(GeneratorError::InvalidMeanDegree(mean_degree));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_kind_generates() {
        for kind in [GraphKind::Er, GraphKind::Ba, GraphKind::Rr] {
            let mut generator = kind.generator(GeneratorConfig::seeded(10));
            let graph = generator.generate(100, 4.0).unwrap();
            assert_eq!(graph.node_count(), 100, "{}", kind);
            assert!((graph.get_mean_degree() - 4.0).abs() < 0.1, "{}", kind);
        }
    }

    #[test]
    fn test_negative_mean_degree_rejected() {
        for kind in [GraphKind::Er, GraphKind::Ba, GraphKind::Rr] {
            let result = kind.generator(GeneratorConfig::seeded(0)).generate(10, -2.0);
            assert_eq!(result, Err(GeneratorError::InvalidMeanDegree(-2.0)));
        }
    }
}
