//! Swing-equation oscillator networks
//!
//! Builds coupled second-order oscillator networks and integrates
//!
//! ```text
//! m_i θ̈_i = P_i − γ_i θ̇_i + Σ_j K_ij A_ij sin(θ_j − θ_i)
//! ```
//!
//! with fixed-step explicit Runge-Kutta schemes.
//!
//! ## Example Usage
//!
//! ```rust
//! use swing::generator::{ErdosRenyi, GeneratorConfig};
//! use swing::params::Parameters;
//! use swing::{ForceKernel, Scheme, SolverConfig};
//!
//! // Random network with mean degree 4
//! let mut generator = ErdosRenyi::new(GeneratorConfig::seeded(42));
//! let graph = generator.by_mean_degree(50, 4.0).unwrap();
//!
//! // Random initial conditions, 100 steps of 0.01
//! let params = Parameters::<f64>::from_graph(&graph, 100, 0.01, generator.rng_mut()).unwrap();
//!
//! let trajectory = params
//!     .solve(Scheme::Rk4, SolverConfig::default(), ForceKernel::EdgeList)
//!     .unwrap();
//! assert_eq!(trajectory.len(), 101);
//! assert_eq!(trajectory.row(0).len(), 100);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod error;
pub mod generator;
pub mod graph;
pub mod params;
pub mod persistence;

pub use swing_solver;

// Re-export main types for convenience
pub use config::{Precision, SimulationConfig};
pub use error::{SwingError, SwingResult};
pub use generator::{
    BarabasiAlbert, ErdosRenyi, GeneratorConfig, GeneratorError, GeneratorResult, GraphGenerator,
    GraphKind, RandomRegular,
};
pub use graph::{Graph, GraphError, GraphResult, NodeId};
pub use params::{BufferLayout, Parameters, ParamsError, ParamsResult};
pub use persistence::{
    parse_arguments, read_arguments, trajectory_file_name, write_arguments, PersistenceError,
    PersistenceResult, TrajectoryWriter,
};
pub use swing_solver::{
    ForceKernel, Integrator, NodeParams, Rk1Solver, Rk2Solver, Rk4Solver, Scalar, Scheme,
    SolverConfig, SolverError, State, SwingSystem, Trajectory, WeightedEdge,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
