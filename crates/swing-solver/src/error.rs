use crate::common::NodeId;
use thiserror::Error;

/// Errors raised while assembling a system for the solver.
///
/// Integration itself never fails: divergence is an accepted outcome of a
/// badly chosen step size and is left to the caller to inspect.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    #[error("Dimension mismatch for {field}: expected {expected}, got {actual}")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid mass {value} at node {node}: mass must be finite and positive")]
    InvalidMass { node: NodeId, value: f64 },

    #[error("Edge ({node1}, {node2}) references a node outside 0..{num_nodes}")]
    EdgeOutOfRange {
        node1: NodeId,
        node2: NodeId,
        num_nodes: usize,
    },
}

pub type SolverResult<T> = Result<T, SolverError>;
