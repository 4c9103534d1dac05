//! Simulation configuration
//!
//! Every field has a default, so a JSON config file only needs the keys it
//! changes:
//!
//! ```json
//! { "num_nodes": 500, "scheme": "rk2", "seed": 42 }
//! ```

use crate::error::{SwingError, SwingResult};
use crate::generator::{GeneratorConfig, GeneratorResult, GraphGenerator, GraphKind};
use crate::graph::Graph;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;
use swing_solver::{ForceKernel, Scheme, SolverConfig};
use tracing::info;

/// Floating point width of a run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// f32
    Single,
    /// f64
    #[default]
    Double,
}

impl Precision {
    pub fn bits(self) -> u32 {
        match self {
            Precision::Single => 32,
            Precision::Double => 64,
        }
    }

    pub fn from_bits(bits: u32) -> Option<Self> {
        match bits {
            32 => Some(Precision::Single),
            64 => Some(Precision::Double),
            _ => None,
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "f{}", self.bits())
    }
}

/// Configuration of one generated simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of oscillators
    pub num_nodes: usize,
    /// Random graph model
    pub graph: GraphKind,
    /// Target mean degree of the random graph
    pub mean_degree: f64,
    /// Keep only the largest connected component (ids compacted)
    pub giant_component: bool,
    /// Number of integration steps
    pub num_steps: usize,
    /// Step size, repeated for every step
    pub dt: f64,
    /// Integration scheme
    pub scheme: Scheme,
    /// Floating point width
    pub precision: Precision,
    /// Random seed (None = OS entropy)
    pub seed: Option<u64>,
    /// Parallel force evaluation
    pub parallel: bool,
    /// Use the dense pairwise force kernel
    pub reference: bool,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_nodes: 100,
            graph: GraphKind::Er,
            mean_degree: 4.0,
            giant_component: false,
            num_steps: 1000,
            dt: 0.01,
            scheme: Scheme::Rk4,
            precision: Precision::Double,
            seed: None,
            parallel: false,
            reference: false,
        }
    }
}

impl SimulationConfig {
    /// Load from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> SwingResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        info!("Loaded simulation config from {:?}", path);
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> SwingResult<()> {
        if !(self.mean_degree.is_finite() && self.mean_degree >= 0.0) {
            return Err(SwingError::InvalidConfig(format!(
                "mean_degree must be finite and non-negative, got {}",
                self.mean_degree
            )));
        }

        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(SwingError::InvalidConfig(format!(
                "dt must be finite and positive, got {}",
                self.dt
            )));
        }

        // Other models report their own constraints on generation
        let max_edges = self.num_nodes * self.num_nodes.saturating_sub(1) / 2;
        let target = (self.num_nodes as f64 * self.mean_degree / 2.0).floor();
        if self.graph == GraphKind::Er && target > max_edges as f64 {
            return Err(SwingError::InvalidConfig(format!(
                "mean_degree {} is unreachable with {} nodes",
                self.mean_degree, self.num_nodes
            )));
        }

        Ok(())
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig { seed: self.seed }
    }

    /// Generate the configured graph.
    ///
    /// The generator is returned with its random engine positioned right after
    /// the graph draws, ready to draw the initial conditions.
    pub fn generate_graph(&self) -> GeneratorResult<(Graph, Box<dyn GraphGenerator>)> {
        let mut generator = self.graph.generator(self.generator_config());
        let mut graph = generator.generate(self.num_nodes, self.mean_degree)?;
        if self.giant_component {
            let (giant, _) = graph.giant_component();
            info!(
                nodes = giant.node_count(),
                dropped = graph.node_count() - giant.node_count(),
                "Kept giant component"
            );
            graph = giant;
        }
        Ok((graph, generator))
    }

    pub fn solver_config(&self) -> SolverConfig {
        SolverConfig { parallel: self.parallel }
    }

    pub fn kernel(&self) -> ForceKernel {
        if self.reference {
            ForceKernel::Pairwise
        } else {
            ForceKernel::EdgeList
        }
    }
}
