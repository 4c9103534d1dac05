use crate::algorithms::Integrator;
use crate::common::{Scalar, SolverConfig, State};
use crate::system::SwingSystem;

/// Classical four-stage Runge-Kutta with weights 1, 2, 2, 1 over 6.
#[derive(Clone, Debug, Default)]
pub struct Rk4Solver {
    pub config: SolverConfig,
}

impl Rk4Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }
}

impl<T: Scalar> Integrator<T> for Rk4Solver {
    fn name(&self) -> &'static str {
        "rk4"
    }

    fn step(&self, system: &SwingSystem<'_, T>, state: &State<T>, dt: T) -> State<T> {
        let parallel = self.config.parallel;
        let half_dt = T::half() * dt;
        let two = T::two();
        let six = two + two + two;

        // Stage 1
        let velocity1 = &state.velocity;
        let acceleration1 = system.acceleration(state, parallel);

        // Stage 2
        let stage2 = state.advance(half_dt, velocity1, &acceleration1);
        let velocity2 = &stage2.velocity;
        let acceleration2 = system.acceleration(&stage2, parallel);

        // Stage 3
        let stage3 = state.advance(half_dt, velocity2, &acceleration2);
        let velocity3 = &stage3.velocity;
        let acceleration3 = system.acceleration(&stage3, parallel);

        // Stage 4
        let stage4 = state.advance(dt, velocity3, &acceleration3);
        let velocity4 = &stage4.velocity;
        let acceleration4 = system.acceleration(&stage4, parallel);

        // Result
        let velocity = (velocity1 + &(velocity2 * two) + &(velocity3 * two) + velocity4) / six;
        let acceleration = (&acceleration1
            + &(&acceleration2 * two)
            + &(&acceleration3 * two)
            + &acceleration4)
            / six;
        state.advance(dt, &velocity, &acceleration)
    }
}
