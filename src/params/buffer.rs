//! Flat numeric argument buffer layout
//!
//! ```text
//! phase(N) | dphase(N) | power(N) | gamma(N) | mass(N) | (node1, node2, weight) × E | dt(S)
//! ```

use super::{ParamsError, ParamsResult};
use swing_solver::{NodeId, Scalar};
use num_traits::ToPrimitive;
use std::ops::Range;

/// Offsets of every region in an argument buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BufferLayout {
    pub num_nodes: usize,
    pub num_edges: usize,
    pub num_steps: usize,
}

impl BufferLayout {
    pub fn new(num_nodes: usize, num_edges: usize, num_steps: usize) -> Self {
        Self { num_nodes, num_edges, num_steps }
    }

    /// Total number of values `5N + 3E + S`, or `None` when it does not fit in a `usize`
    pub fn checked_len(&self) -> Option<usize> {
        self.num_nodes
            .checked_mul(5)?
            .checked_add(self.num_edges.checked_mul(3)?)?
            .checked_add(self.num_steps)
    }

    /// Total number of values, saturating at `usize::MAX`
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(usize::MAX)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Range of the `index`-th node field (0 = phase ... 4 = mass)
    pub fn node_field(&self, index: usize) -> Range<usize> {
        let start = index.saturating_mul(self.num_nodes);
        start..start.saturating_add(self.num_nodes)
    }

    pub fn phase(&self) -> Range<usize> {
        self.node_field(0)
    }

    pub fn dphase(&self) -> Range<usize> {
        self.node_field(1)
    }

    pub fn power(&self) -> Range<usize> {
        self.node_field(2)
    }

    pub fn gamma(&self) -> Range<usize> {
        self.node_field(3)
    }

    pub fn mass(&self) -> Range<usize> {
        self.node_field(4)
    }

    pub fn edges(&self) -> Range<usize> {
        let start = self.num_nodes.saturating_mul(5);
        start..start.saturating_add(self.num_edges.saturating_mul(3))
    }

    pub fn dts(&self) -> Range<usize> {
        let start = self.edges().end;
        start..start.saturating_add(self.num_steps)
    }

    /// Check the buffer length before any slicing happens
    pub fn check<T>(&self, args: &[T]) -> ParamsResult<()> {
        let expected = self.checked_len().ok_or(ParamsError::LayoutOverflow {
            num_nodes: self.num_nodes,
            num_edges: self.num_edges,
            num_steps: self.num_steps,
        })?;
        if args.len() != expected {
            return Err(ParamsError::MalformedInput {
                expected,
                actual: args.len(),
            });
        }
        Ok(())
    }
}

/// Decode a node id stored as a float: must be a non-negative integer.
pub(crate) fn decode_node_id<T: Scalar>(value: T, edge: usize) -> ParamsResult<NodeId> {
    if value.fract() != T::zero() {
        return Err(ParamsError::InvalidNodeId { edge, value: value.as_f64() });
    }
    value
        .to_usize()
        .ok_or(ParamsError::InvalidNodeId { edge, value: value.as_f64() })
}
