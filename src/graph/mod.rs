//! Undirected, unweighted graph topology
//!
//! This module implements the coupling topology of an oscillator network:
//! - Dense integer node ids with symmetric adjacency sets
//! - No self loops and no parallel edges
//! - Degree statistics and edge-list / adjacency-matrix extraction

pub mod store;
pub mod types;

// Re-export main types
pub use store::{Graph, GraphError, GraphResult};
pub use types::{AdjacencyMatrix, Count, EdgeList, NodeId};
