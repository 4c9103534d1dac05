use crate::algorithms::Integrator;
use crate::common::{Scalar, SolverConfig, State};
use crate::system::SwingSystem;

/// Two-stage explicit scheme (Heun): average of start and Euler-predicted end slopes.
#[derive(Clone, Debug, Default)]
pub struct Rk2Solver {
    pub config: SolverConfig,
}

impl Rk2Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl<T: Scalar> Integrator<T> for Rk2Solver {
    fn name(&self) -> &'static str {
        "rk2"
    }

    fn step(&self, system: &SwingSystem<'_, T>, state: &State<T>, dt: T) -> State<T> {
        let parallel = self.config.parallel;

        // Stage 1
        let velocity1 = &state.velocity;
        let acceleration1 = system.acceleration(state, parallel);

        // Stage 2
        let temp_state = state.advance(dt, velocity1, &acceleration1);
        let velocity2 = &temp_state.velocity;
        let acceleration2 = system.acceleration(&temp_state, parallel);

        // Result
        let velocity = (velocity1 + velocity2) * T::half();
        let acceleration = (&acceleration1 + &acceleration2) * T::half();
        state.advance(dt, &velocity, &acceleration)
    }
}
