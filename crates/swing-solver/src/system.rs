//! Read-only inputs shared by every step of a solve

use crate::common::{NodeParams, Scalar, State, WeightedEdge};
use crate::error::{SolverError, SolverResult};
use crate::force::{
    get_acceleration, get_acceleration_par, pairwise_acceleration, weighted_adjacency,
};
use ndarray::{Array1, Array2};

/// Which force kernel a system evaluates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ForceKernel {
    /// O(N + E) edge-list evaluation
    #[default]
    EdgeList,
    /// O(N²) dense pairwise evaluation, for cross-validation
    Pairwise,
}

/// Coupling topology plus node parameters of one oscillator network.
///
/// Edge endpoints are validated once here so the force kernels can index
/// without bounds concerns for the rest of the solve.
pub struct SwingSystem<'a, T: Scalar> {
    edges: &'a [WeightedEdge<T>],
    params: &'a NodeParams<T>,
    dense: Option<Array2<T>>,
}

impl<'a, T: Scalar> SwingSystem<'a, T> {
    pub fn new(edges: &'a [WeightedEdge<T>], params: &'a NodeParams<T>) -> SolverResult<Self> {
        let num_nodes = params.num_nodes();
        if let Some(edge) = edges
            .iter()
            .find(|e| e.node1 >= num_nodes || e.node2 >= num_nodes)
        {
            return Err(SolverError::EdgeOutOfRange {
                node1: edge.node1,
                node2: edge.node2,
                num_nodes,
            });
        }
        Ok(Self { edges, params, dense: None })
    }

    /// Build a system evaluated with the given kernel.
    pub fn with_kernel(
        edges: &'a [WeightedEdge<T>],
        params: &'a NodeParams<T>,
        kernel: ForceKernel,
    ) -> SolverResult<Self> {
        let mut system = Self::new(edges, params)?;
        if kernel == ForceKernel::Pairwise {
            system.dense = Some(weighted_adjacency(params.num_nodes(), edges));
        }
        Ok(system)
    }

    pub fn kernel(&self) -> ForceKernel {
        if self.dense.is_some() {
            ForceKernel::Pairwise
        } else {
            ForceKernel::EdgeList
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.params.num_nodes()
    }

    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> &[WeightedEdge<T>] {
        self.edges
    }

    pub fn params(&self) -> &NodeParams<T> {
        self.params
    }

    /// Acceleration of every node at `state`.
    pub fn acceleration(&self, state: &State<T>, parallel: bool) -> Array1<T> {
        match &self.dense {
            Some(weights) => pairwise_acceleration(weights, state, self.params),
            None if parallel => get_acceleration_par(self.edges, state, self.params),
            None => get_acceleration(self.edges, state, self.params),
        }
    }

    pub(crate) fn check_state(&self, state: &State<T>) -> SolverResult<()> {
        if state.num_nodes() != self.num_nodes() {
            return Err(SolverError::DimensionMismatch {
                field: "initial state",
                expected: self.num_nodes(),
                actual: state.num_nodes(),
            });
        }
        Ok(())
    }
}
