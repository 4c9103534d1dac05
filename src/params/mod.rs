//! Solver input assembly
//!
//! [`Parameters`] bundles everything a solve needs: the initial state, per-node
//! physical parameters, the weighted edge list and the time-step schedule. It is
//! built either from a [`Graph`] with randomized initial conditions or by
//! decoding a flat numeric buffer (see [`buffer`]).

pub mod buffer;

pub use buffer::BufferLayout;

use crate::graph::Graph;
use buffer::decode_node_id;
use ndarray::Array1;
use rand::distributions::uniform::SampleUniform;
use rand::distributions::Uniform;
use rand::Rng;
use swing_solver::{
    ForceKernel, NodeParams, Scalar, Scheme, SolverConfig, SolverError, SolverResult, State,
    SwingSystem, Trajectory, WeightedEdge,
};
use thiserror::Error;
use tracing::debug;

/// Errors raised while assembling parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("Malformed parameter buffer: expected {expected} values, got {actual}")]
    MalformedInput { expected: usize, actual: usize },

    #[error("Buffer layout overflows: {num_nodes} nodes, {num_edges} edges, {num_steps} steps")]
    LayoutOverflow { num_nodes: usize, num_edges: usize, num_steps: usize },

    #[error("Edge {edge} has invalid node id {value}")]
    InvalidNodeId { edge: usize, value: f64 },

    #[error("Invalid physical parameter: {0}")]
    Solver(#[from] SolverError),
}

pub type ParamsResult<T> = Result<T, ParamsError>;

/// Complete input of one swing-equation solve.
#[derive(Clone, Debug, PartialEq)]
pub struct Parameters<T: Scalar> {
    /// Phase and angular velocity at t = 0
    pub initial_state: State<T>,
    /// Power, damping and mass per node
    pub node_params: NodeParams<T>,
    /// One entry per undirected edge
    pub weighted_edge_list: Vec<WeightedEdge<T>>,
    /// Step size of every step, in order
    pub dts: Vec<T>,
}

impl<T: Scalar> Parameters<T> {
    /// Assemble parameters, validating lengths, masses and edge endpoints
    pub fn new(
        initial_state: State<T>,
        node_params: NodeParams<T>,
        weighted_edge_list: Vec<WeightedEdge<T>>,
        dts: Vec<T>,
    ) -> ParamsResult<Self> {
        if initial_state.num_nodes() != node_params.num_nodes() {
            return Err(SolverError::DimensionMismatch {
                field: "node parameters",
                expected: initial_state.num_nodes(),
                actual: node_params.num_nodes(),
            }
            .into());
        }
        // Endpoint validation
        SwingSystem::new(&weighted_edge_list, &node_params)?;

        Ok(Self { initial_state, node_params, weighted_edge_list, dts })
    }

    /// Random initial conditions on a graph.
    ///
    /// Phase is drawn from `[0, π/2)`, velocity from `[0, 1)`; power, damping,
    /// mass and every coupling weight are 1. The schedule repeats `dt` for
    /// `num_steps` steps. Arrays span every id slot of the graph, so removed
    /// nodes become isolated oscillators.
    pub fn from_graph<R>(
        graph: &Graph,
        num_steps: usize,
        dt: T,
        rng: &mut R,
    ) -> ParamsResult<Self>
    where
        T: SampleUniform,
        R: Rng + ?Sized,
    {
        let num_nodes = graph.node_slots();

        let phase_distribution = Uniform::new(T::zero(), T::FRAC_PI_2());
        let phase: Array1<T> = (0..num_nodes).map(|_| rng.sample(&phase_distribution)).collect();

        let dphase_distribution = Uniform::new(T::zero(), T::one());
        let dphase: Array1<T> = (0..num_nodes).map(|_| rng.sample(&dphase_distribution)).collect();

        let node_params = NodeParams::uniform(num_nodes, T::one(), T::one(), T::one())?;

        let weighted_edge_list = graph
            .get_edge_list()
            .into_iter()
            .map(|(node1, node2)| WeightedEdge::new(node1, node2, T::one()))
            .collect();

        Self::new(State::new(phase, dphase)?, node_params, weighted_edge_list, vec![dt; num_steps])
    }

    /// Decode a flat argument buffer laid out as described in [`buffer`].
    ///
    /// The buffer length must equal `5N + 3E + S` exactly.
    pub fn from_buffer(
        args: &[T],
        num_nodes: usize,
        num_edges: usize,
        num_steps: usize,
    ) -> ParamsResult<Self> {
        let layout = BufferLayout::new(num_nodes, num_edges, num_steps);
        layout.check(args)?;
        debug!(?layout, "Decoding parameter buffer");

        let field = |range: std::ops::Range<usize>| Array1::from(args[range].to_vec());

        let initial_state = State::new(field(layout.phase()), field(layout.dphase()))?;
        let node_params =
            NodeParams::new(field(layout.power()), field(layout.gamma()), field(layout.mass()))?;

        let weighted_edge_list = args[layout.edges()]
            .chunks_exact(3)
            .enumerate()
            .map(|(edge, triple)| {
                Ok(WeightedEdge::new(
                    decode_node_id(triple[0], edge)?,
                    decode_node_id(triple[1], edge)?,
                    triple[2],
                ))
            })
            .collect::<ParamsResult<Vec<_>>>()?;

        let dts = args[layout.dts()].to_vec();

        Self::new(initial_state, node_params, weighted_edge_list, dts)
    }

    /// Encode back into the flat buffer layout
    pub fn to_buffer(&self) -> Vec<T> {
        let layout = self.layout();
        let mut args = Vec::with_capacity(layout.len());
        args.extend(self.initial_state.phase.iter());
        args.extend(self.initial_state.velocity.iter());
        args.extend(self.node_params.power.iter());
        args.extend(self.node_params.gamma.iter());
        args.extend(self.node_params.mass.iter());
        for edge in &self.weighted_edge_list {
            args.push(T::from_index(edge.node1));
            args.push(T::from_index(edge.node2));
            args.push(edge.weight);
        }
        args.extend(self.dts.iter());
        args
    }

    /// Multiply every coupling weight by `coupling`.
    ///
    /// With a complete graph and `coupling = K / N` this is the classic
    /// fully connected network.
    pub fn with_coupling(mut self, coupling: T) -> Self {
        for edge in &mut self.weighted_edge_list {
            edge.weight = edge.weight * coupling;
        }
        self
    }

    pub fn layout(&self) -> BufferLayout {
        BufferLayout::new(self.num_nodes(), self.num_edges(), self.num_steps())
    }

    pub fn num_nodes(&self) -> usize {
        self.initial_state.num_nodes()
    }

    pub fn num_edges(&self) -> usize {
        self.weighted_edge_list.len()
    }

    pub fn num_steps(&self) -> usize {
        self.dts.len()
    }

    pub fn phase(&self) -> &Array1<T> {
        &self.initial_state.phase
    }

    pub fn dphase(&self) -> &Array1<T> {
        &self.initial_state.velocity
    }

    pub fn power(&self) -> &Array1<T> {
        &self.node_params.power
    }

    pub fn gamma(&self) -> &Array1<T> {
        &self.node_params.gamma
    }

    pub fn mass(&self) -> &Array1<T> {
        &self.node_params.mass
    }

    /// Force system over these parameters
    pub fn system(&self, kernel: ForceKernel) -> SolverResult<SwingSystem<'_, T>> {
        SwingSystem::with_kernel(&self.weighted_edge_list, &self.node_params, kernel)
    }

    /// Integrate the whole schedule with one scheme
    pub fn solve(
        &self,
        scheme: Scheme,
        config: SolverConfig,
        kernel: ForceKernel,
    ) -> SolverResult<Trajectory<T>> {
        let system = self.system(kernel)?;
        scheme.solve(config, &system, &self.initial_state, &self.dts)
    }
}
