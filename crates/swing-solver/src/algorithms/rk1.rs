use crate::algorithms::Integrator;
use crate::common::{Scalar, SolverConfig, State};
use crate::system::SwingSystem;

/// Explicit Euler: one force evaluation per step.
#[derive(Clone, Debug, Default)]
pub struct Rk1Solver {
    pub config: SolverConfig,
}

impl Rk1Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl<T: Scalar> Integrator<T> for Rk1Solver {
    fn name(&self) -> &'static str {
        "rk1"
    }

    fn step(&self, system: &SwingSystem<'_, T>, state: &State<T>, dt: T) -> State<T> {
        let velocity = &state.velocity;
        let acceleration = system.acceleration(state, self.config.parallel);

        state.advance(dt, velocity, &acceleration)
    }
}
