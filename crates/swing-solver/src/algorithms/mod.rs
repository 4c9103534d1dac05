//! Fixed-step explicit Runge-Kutta integrators
//!
//! All schemes share the force evaluation of [`SwingSystem`] and advance the
//! joint `(phase, velocity)` state. There is no step-size control: every step
//! is accepted as computed.

pub mod rk1;
pub mod rk2;
pub mod rk4;

pub use rk1::Rk1Solver;
pub use rk2::Rk2Solver;
pub use rk4::Rk4Solver;

use crate::common::{NodeParams, Scalar, SolverConfig, State, Trajectory, WeightedEdge};
use crate::error::SolverResult;
use crate::system::SwingSystem;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{info, warn};

/// One-step integrator over a swing system.
pub trait Integrator<T: Scalar> {
    /// Short scheme name used in logs.
    fn name(&self) -> &'static str;

    /// Advance `state` by one step of size `dt`.
    fn step(&self, system: &SwingSystem<'_, T>, state: &State<T>, dt: T) -> State<T>;

    /// Run one step per entry of `dts` and collect every state.
    ///
    /// The returned trajectory holds `dts.len() + 1` rows, starting with `initial`.
    fn solve(
        &self,
        system: &SwingSystem<'_, T>,
        initial: &State<T>,
        dts: &[T],
    ) -> SolverResult<Trajectory<T>> {
        system.check_state(initial)?;
        info!(
            scheme = self.name(),
            nodes = system.num_nodes(),
            edges = system.num_edges(),
            steps = dts.len(),
            precision = T::BITS,
            "Solving swing equation"
        );

        let mut trajectory = Trajectory::with_initial(initial, dts.len());
        let mut state = initial.clone();
        for (index, &dt) in dts.iter().enumerate() {
            state = self.step(system, &state, dt);
            trajectory.record(index + 1, &state);
        }

        if !trajectory.is_finite() {
            warn!(
                scheme = self.name(),
                "Trajectory contains non-finite values; step size may be unstable"
            );
        }
        Ok(trajectory)
    }
}

/// Integration scheme selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Rk1,
    Rk2,
    Rk4,
}

impl Scheme {
    /// Global order of accuracy.
    pub fn order(self) -> u32 {
        match self {
            Scheme::Rk1 => 1,
            Scheme::Rk2 => 2,
            Scheme::Rk4 => 4,
        }
    }

    /// Force evaluations per step.
    pub fn stages(self) -> usize {
        match self {
            Scheme::Rk1 => 1,
            Scheme::Rk2 => 2,
            Scheme::Rk4 => 4,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Scheme::Rk1 => "rk1",
            Scheme::Rk2 => "rk2",
            Scheme::Rk4 => "rk4",
        }
    }

    /// Solve with the solver this scheme names.
    pub fn solve<T: Scalar>(
        self,
        config: SolverConfig,
        system: &SwingSystem<'_, T>,
        initial: &State<T>,
        dts: &[T],
    ) -> SolverResult<Trajectory<T>> {
        match self {
            Scheme::Rk1 => Rk1Solver::new(config).solve(system, initial, dts),
            Scheme::Rk2 => Rk2Solver::new(config).solve(system, initial, dts),
            Scheme::Rk4 => Rk4Solver::new(config).solve(system, initial, dts),
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single RK1 step with the sequential edge-list kernel.
pub fn step_rk1<T: Scalar>(
    edges: &[WeightedEdge<T>],
    state: &State<T>,
    params: &NodeParams<T>,
    dt: T,
) -> SolverResult<State<T>> {
    let system = SwingSystem::new(edges, params)?;
    system.check_state(state)?;
    Ok(Rk1Solver::default().step(&system, state, dt))
}

/// Single RK2 step with the sequential edge-list kernel.
pub fn step_rk2<T: Scalar>(
    edges: &[WeightedEdge<T>],
    state: &State<T>,
    params: &NodeParams<T>,
    dt: T,
) -> SolverResult<State<T>> {
    let system = SwingSystem::new(edges, params)?;
    system.check_state(state)?;
    Ok(Rk2Solver::default().step(&system, state, dt))
}

/// Single RK4 step with the sequential edge-list kernel.
pub fn step_rk4<T: Scalar>(
    edges: &[WeightedEdge<T>],
    state: &State<T>,
    params: &NodeParams<T>,
    dt: T,
) -> SolverResult<State<T>> {
    let system = SwingSystem::new(edges, params)?;
    system.check_state(state)?;
    Ok(Rk4Solver::default().step(&system, state, dt))
}

pub fn solve_rk1<T: Scalar>(
    edges: &[WeightedEdge<T>],
    initial: &State<T>,
    params: &NodeParams<T>,
    dts: &[T],
) -> SolverResult<Trajectory<T>> {
    Rk1Solver::default().solve(&SwingSystem::new(edges, params)?, initial, dts)
}

pub fn solve_rk2<T: Scalar>(
    edges: &[WeightedEdge<T>],
    initial: &State<T>,
    params: &NodeParams<T>,
    dts: &[T],
) -> SolverResult<Trajectory<T>> {
    Rk2Solver::default().solve(&SwingSystem::new(edges, params)?, initial, dts)
}

pub fn solve_rk4<T: Scalar>(
    edges: &[WeightedEdge<T>],
    initial: &State<T>,
    params: &NodeParams<T>,
    dts: &[T],
) -> SolverResult<Trajectory<T>> {
    Rk4Solver::default().solve(&SwingSystem::new(edges, params)?, initial, dts)
}
