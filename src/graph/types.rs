//! Core type definitions for the oscillator graph

use ndarray::Array2;

/// Dense node identifier (0..N)
pub use swing_solver::NodeId;

/// Number of nodes, edges or degree
pub type Count = usize;

/// Canonical undirected edge list: one `(node, neighbor)` pair per edge with `node < neighbor`
pub type EdgeList = Vec<(NodeId, NodeId)>;

/// Dense boolean adjacency matrix, symmetric with a false diagonal
pub type AdjacencyMatrix = Array2<bool>;
