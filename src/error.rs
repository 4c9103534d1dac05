//! Top-level error type

use crate::generator::GeneratorError;
use crate::graph::GraphError;
use crate::params::ParamsError;
use crate::persistence::PersistenceError;
use swing_solver::SolverError;
use thiserror::Error;

/// Any error raised by the library
#[derive(Error, Debug)]
pub enum SwingError {
    #[error("Graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("Generator error: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Parameter error: {0}")]
    Params(#[from] ParamsError),

    #[error("Solver error: {0}")]
    Solver(#[from] SolverError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SwingResult<T> = Result<T, SwingError>;
