use crate::error::{SolverError, SolverResult};
use ndarray::{s, Array1, Array2, ArrayView1, NdFloat};
use num_traits::{FloatConst, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Dense node identifier (0..N).
pub type NodeId = usize;

/// Floating point precision a solve runs in.
///
/// Implemented for `f32` and `f64`; both go through the exact same code path,
/// so the only difference between them is rounding.
pub trait Scalar: NdFloat + FloatConst + FromStr + Default {
    /// Bit width, reported in logs and file names.
    const BITS: u32;

    /// Lossy conversion used for buffer encoding of node ids.
    fn from_index(index: usize) -> Self;

    /// Widening conversion used for error reporting.
    fn as_f64(self) -> f64 {
        self.to_f64().unwrap_or(f64::NAN)
    }

    fn two() -> Self {
        Self::one() + Self::one()
    }

    fn half() -> Self {
        Self::one() / Self::two()
    }
}

impl Scalar for f32 {
    const BITS: u32 = 32;

    fn from_index(index: usize) -> Self {
        index as f32
    }
}

impl Scalar for f64 {
    const BITS: u32 = 64;

    fn from_index(index: usize) -> Self {
        index as f64
    }
}

/// Undirected coupling between two nodes.
///
/// `(a, b)` and `(b, a)` are the same edge; an edge list stores only one of them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WeightedEdge<T> {
    pub node1: NodeId,
    pub node2: NodeId,
    pub weight: T,
}

impl<T: Copy> WeightedEdge<T> {
    pub fn new(node1: NodeId, node2: NodeId, weight: T) -> Self {
        Self { node1, node2, weight }
    }

    /// Check if this edge touches a node
    pub fn connects(&self, node: NodeId) -> bool {
        self.node1 == node || self.node2 == node
    }
}

/// Phase and angular velocity of every oscillator.
///
/// A state is never mutated by the integrators: every stage builds a new one,
/// so the start-of-step values stay readable until the step is assembled.
#[derive(Clone, Debug, PartialEq)]
pub struct State<T: Scalar> {
    pub phase: Array1<T>,
    pub velocity: Array1<T>,
}

impl<T: Scalar> State<T> {
    pub fn new(phase: Array1<T>, velocity: Array1<T>) -> SolverResult<Self> {
        if phase.len() != velocity.len() {
            return Err(SolverError::DimensionMismatch {
                field: "velocity",
                expected: phase.len(),
                actual: velocity.len(),
            });
        }
        Ok(Self { phase, velocity })
    }

    pub fn from_vecs(phase: Vec<T>, velocity: Vec<T>) -> SolverResult<Self> {
        Self::new(Array1::from_vec(phase), Array1::from_vec(velocity))
    }

    /// All oscillators at rest at phase zero.
    pub fn zeros(num_nodes: usize) -> Self {
        Self {
            phase: Array1::zeros(num_nodes),
            velocity: Array1::zeros(num_nodes),
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.phase.len()
    }

    /// Phase sequence followed by velocity sequence.
    pub fn flatten(&self) -> Array1<T> {
        let n = self.num_nodes();
        let mut flat = Array1::zeros(2 * n);
        flat.slice_mut(s![..n]).assign(&self.phase);
        flat.slice_mut(s![n..]).assign(&self.velocity);
        flat
    }

    /// Euler update from this state: `phase + dt * velocity`, `velocity + dt * acceleration`.
    pub(crate) fn advance(&self, dt: T, velocity: &Array1<T>, acceleration: &Array1<T>) -> Self {
        Self {
            phase: &self.phase + &(velocity * dt),
            velocity: &self.velocity + &(acceleration * dt),
        }
    }
}

/// Per-node physical parameters, aligned by node id.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeParams<T: Scalar> {
    /// External drive
    pub power: Array1<T>,
    /// Damping coefficient
    pub gamma: Array1<T>,
    /// Inertia, strictly positive
    pub mass: Array1<T>,
}

impl<T: Scalar> NodeParams<T> {
    /// Build node parameters, rejecting length mismatches and non-positive masses.
    pub fn new(power: Array1<T>, gamma: Array1<T>, mass: Array1<T>) -> SolverResult<Self> {
        let n = power.len();
        for (field, len) in [("gamma", gamma.len()), ("mass", mass.len())] {
            if len != n {
                return Err(SolverError::DimensionMismatch { field, expected: n, actual: len });
            }
        }
        if let Some((node, &value)) = mass
            .iter()
            .enumerate()
            .find(|(_, m)| !(m.is_finite() && **m > T::zero()))
        {
            return Err(SolverError::InvalidMass { node, value: value.as_f64() });
        }
        Ok(Self { power, gamma, mass })
    }

    /// Same value for every node.
    pub fn uniform(num_nodes: usize, power: T, gamma: T, mass: T) -> SolverResult<Self> {
        Self::new(
            Array1::from_elem(num_nodes, power),
            Array1::from_elem(num_nodes, gamma),
            Array1::from_elem(num_nodes, mass),
        )
    }

    pub fn num_nodes(&self) -> usize {
        self.power.len()
    }
}

/// Configuration for the solver.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Evaluate the force passes with rayon.
    /// Ignored by the pairwise reference kernel.
    pub parallel: bool,
}

/// Flattened states of a solve, one row per time point.
///
/// Row 0 is the initial state, row `t` the state after `t` steps.
/// Each row is the phase sequence followed by the velocity sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct Trajectory<T: Scalar> {
    points: Array2<T>,
    num_nodes: usize,
}

impl<T: Scalar> Trajectory<T> {
    /// Allocate room for `num_steps` steps and record the initial state.
    pub(crate) fn with_initial(initial: &State<T>, num_steps: usize) -> Self {
        let num_nodes = initial.num_nodes();
        let mut trajectory = Self {
            points: Array2::zeros((num_steps + 1, 2 * num_nodes)),
            num_nodes,
        };
        trajectory.record(0, initial);
        trajectory
    }

    pub(crate) fn record(&mut self, index: usize, state: &State<T>) {
        let n = self.num_nodes;
        let mut row = self.points.row_mut(index);
        row.slice_mut(s![..n]).assign(&state.phase);
        row.slice_mut(s![n..]).assign(&state.velocity);
    }

    /// Number of time points (steps + 1).
    pub fn len(&self) -> usize {
        self.points.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.points.nrows() == 0
    }

    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    pub fn row(&self, index: usize) -> ArrayView1<'_, T> {
        self.points.row(index)
    }

    pub fn phase(&self, index: usize) -> ArrayView1<'_, T> {
        self.points.slice(s![index, ..self.num_nodes])
    }

    pub fn velocity(&self, index: usize) -> ArrayView1<'_, T> {
        self.points.slice(s![index, self.num_nodes..])
    }

    /// Reconstruct the state at a time point.
    pub fn state(&self, index: usize) -> State<T> {
        State {
            phase: self.phase(index).to_owned(),
            velocity: self.velocity(index).to_owned(),
        }
    }

    pub fn last_state(&self) -> State<T> {
        self.state(self.len() - 1)
    }

    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, T>> + '_ {
        self.points.rows().into_iter()
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|v| v.is_finite())
    }

    pub fn as_array(&self) -> &Array2<T> {
        &self.points
    }
}
