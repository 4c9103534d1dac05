//! Swing-equation solvers for weighted oscillator networks
//!
//! ```text
//! m_i θ̈_i = P_i − γ_i θ̇_i + Σ_j K_ij A_ij sin(θ_j − θ_i)
//! ```
//!
//! Provides the O(N + E) force evaluator and fixed-step explicit Runge-Kutta
//! integrators of order 1, 2 and 4, generic over `f32` and `f64`.

pub mod algorithms;
pub mod common;
pub mod error;
pub mod force;
pub mod system;

/// Re-export common types
pub use common::*;
pub use algorithms::{
    solve_rk1, solve_rk2, solve_rk4, step_rk1, step_rk2, step_rk4, Integrator, Rk1Solver,
    Rk2Solver, Rk4Solver, Scheme,
};
pub use error::{SolverError, SolverResult};
pub use force::{get_acceleration, get_acceleration_par, pairwise_acceleration, weighted_adjacency};
pub use system::{ForceKernel, SwingSystem};
