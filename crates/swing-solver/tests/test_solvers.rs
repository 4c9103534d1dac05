use ndarray::{array, Array1};
use swing_solver::*;

/// Free damped oscillator: P = 0, no coupling.
/// v(t) = v0 exp(-g t / m), x(t) = x0 + v0 m / g (1 - exp(-g t / m))
fn damped_error<S: Integrator<f64>>(solver: &S, num_steps: usize) -> f64 {
    let (gamma, mass, total_time) = (0.8, 2.0, 2.0);
    let params = NodeParams::uniform(1, 0.0, gamma, mass).unwrap();
    let edges: Vec<WeightedEdge<f64>> = Vec::new();
    let system = SwingSystem::new(&edges, &params).unwrap();
    let initial = State::new(array![0.3], array![1.0]).unwrap();

    let dts = vec![total_time / num_steps as f64; num_steps];
    let trajectory = solver.solve(&system, &initial, &dts).unwrap();
    let last = trajectory.last_state();

    let decay = (-gamma * total_time / mass).exp();
    let exact_phase = 0.3 + mass / gamma * (1.0 - decay);
    let exact_velocity = decay;
    (last.phase[0] - exact_phase).abs() + (last.velocity[0] - exact_velocity).abs()
}

/// Halving the step must shrink the error by about 2^order.
fn assert_convergence<S: Integrator<f64>>(solver: &S, scheme: Scheme, num_steps: usize) {
    let ratio = damped_error(solver, num_steps) / damped_error(solver, 2 * num_steps);
    let expected = 2f64.powi(scheme.order() as i32);
    assert!(
        (ratio / expected - 1.0).abs() < 0.12,
        "{} error ratio {}, expected about {}",
        scheme,
        ratio,
        expected
    );
}

#[test]
fn test_rk4_fourth_order_convergence() {
    assert_convergence(&Rk4Solver::default(), Scheme::Rk4, 20);
}

#[test]
fn test_rk2_second_order_convergence() {
    assert_convergence(&Rk2Solver::default(), Scheme::Rk2, 40);
}

#[test]
fn test_rk1_first_order_convergence() {
    assert_convergence(&Rk1Solver::default(), Scheme::Rk1, 200);
}

#[test]
fn test_rk1_constant_velocity_motion() {
    let params = NodeParams::uniform(3, 0.0, 0.0, 1.0).unwrap();
    let edges: Vec<WeightedEdge<f64>> = Vec::new();
    let initial = State::new(array![0.0, 1.0, -2.0], array![0.5, -1.0, 2.0]).unwrap();
    let dts = vec![0.1, 0.25, 0.05, 0.6];

    let trajectory = solve_rk1(&edges, &initial, &params, &dts).unwrap();

    let mut time = 0.0;
    for (index, dt) in dts.iter().enumerate() {
        time += dt;
        let phase = trajectory.phase(index + 1);
        for node in 0..3 {
            let expected = initial.phase[node] + initial.velocity[node] * time;
            assert!((phase[node] - expected).abs() < 1e-12);
        }
        assert_eq!(trajectory.velocity(index + 1), initial.velocity.view());
    }
}

#[test]
fn test_empty_schedule_returns_initial_state() {
    let params = NodeParams::uniform(2, 1.0, 1.0, 1.0).unwrap();
    let edges = vec![WeightedEdge::new(0, 1, 1.0_f32)];
    let initial = State::new(array![0.1, 0.2], array![0.3, 0.4]).unwrap();

    for scheme in [Scheme::Rk1, Scheme::Rk2, Scheme::Rk4] {
        let system = SwingSystem::new(&edges, &params).unwrap();
        let trajectory = scheme
            .solve(SolverConfig::default(), &system, &initial, &[])
            .unwrap();
        assert_eq!(trajectory.len(), 1);
        assert_eq!(trajectory.row(0).to_owned(), initial.flatten());
    }
}

#[test]
fn test_three_node_chain_at_rest() {
    let edges = vec![WeightedEdge::new(0, 1, 1.0), WeightedEdge::new(1, 2, 1.0)];
    let params = NodeParams::uniform(3, 0.0, 0.0, 1.0).unwrap();
    let initial = State::zeros(3);

    let acceleration = get_acceleration(&edges, &initial, &params);
    assert_eq!(acceleration, Array1::<f64>::zeros(3));

    let trajectory = solve_rk1(&edges, &initial, &params, &[0.1]).unwrap();
    assert_eq!(trajectory.len(), 2);
    assert_eq!(trajectory.row(1), trajectory.row(0));
}

#[test]
fn test_trajectory_shape() {
    let edges = vec![WeightedEdge::new(0, 1, 1.0), WeightedEdge::new(1, 2, 1.0)];
    let params = NodeParams::uniform(3, 1.0, 0.1, 1.0).unwrap();
    let initial = State::new(array![0.0, 0.5, 1.0], array![0.0, 0.0, 0.0]).unwrap();

    let trajectory = solve_rk4(&edges, &initial, &params, &vec![0.01; 25]).unwrap();
    assert_eq!(trajectory.len(), 26);
    assert_eq!(trajectory.as_array().ncols(), 6);
    assert!(trajectory.is_finite());
}

#[test]
fn test_pairwise_kernel_matches_edge_list() {
    let edges = vec![
        WeightedEdge::new(0, 1, 1.0),
        WeightedEdge::new(0, 2, 0.7),
        WeightedEdge::new(1, 3, 1.3),
        WeightedEdge::new(2, 3, 0.4),
        WeightedEdge::new(3, 4, 2.0),
    ];
    let params = NodeParams::new(
        array![1.0, -0.5, 0.2, -0.4, -0.3],
        array![0.1, 0.1, 0.2, 0.2, 0.3],
        array![1.0, 1.5, 1.0, 2.0, 0.8],
    )
    .unwrap();
    let initial =
        State::new(array![0.0, 0.4, 1.1, -0.6, 2.0], array![0.1, 0.0, -0.2, 0.3, 0.0]).unwrap();
    let dts = vec![0.02; 100];

    let fast = SwingSystem::new(&edges, &params).unwrap();
    let naive = SwingSystem::with_kernel(&edges, &params, ForceKernel::Pairwise).unwrap();
    let solver = Rk4Solver::default();
    let a: Trajectory<f64> = solver.solve(&fast, &initial, &dts).unwrap();
    let b = solver.solve(&naive, &initial, &dts).unwrap();

    for (x, y) in a.as_array().iter().zip(b.as_array().iter()) {
        assert!((x - y).abs() < 1e-9);
    }
}

#[test]
fn test_parallel_solver_matches_sequential() {
    let n = 50;
    let edges: Vec<WeightedEdge<f64>> =
        (0..n - 1).map(|i| WeightedEdge::new(i, i + 1, 1.0)).collect();
    let params = NodeParams::uniform(n, 0.5, 0.2, 1.0).unwrap();
    let initial = State::new(
        Array1::from_shape_fn(n, |i| i as f64 * 0.05),
        Array1::zeros(n),
    )
    .unwrap();
    let system = SwingSystem::new(&edges, &params).unwrap();
    let dts = vec![0.01; 50];

    let sequential = Rk2Solver::default().solve(&system, &initial, &dts).unwrap();
    let parallel = Rk2Solver::new(SolverConfig { parallel: true })
        .solve(&system, &initial, &dts)
        .unwrap();
    for (x, y) in sequential.as_array().iter().zip(parallel.as_array().iter()) {
        assert!((x - y).abs() < 1e-9);
    }
}

#[test]
fn test_single_and_double_precision_agree() {
    let edges64 = vec![WeightedEdge::new(0, 1, 1.0_f64), WeightedEdge::new(1, 2, 0.5)];
    let edges32: Vec<WeightedEdge<f32>> = edges64
        .iter()
        .map(|e| WeightedEdge::new(e.node1, e.node2, e.weight as f32))
        .collect();
    let params64 = NodeParams::uniform(3, 0.2, 0.5, 1.0).unwrap();
    let params32 = NodeParams::uniform(3, 0.2_f32, 0.5, 1.0).unwrap();
    let initial64 = State::new(array![0.0, 0.7, 1.4], array![0.0, 0.1, 0.2]).unwrap();
    let initial32 = State::new(array![0.0_f32, 0.7, 1.4], array![0.0, 0.1, 0.2]).unwrap();

    let t64 = solve_rk4(&edges64, &initial64, &params64, &vec![0.01; 100]).unwrap();
    let t32 = solve_rk4(&edges32, &initial32, &params32, &vec![0.01; 100]).unwrap();
    for (x, y) in t64.row(100).iter().zip(t32.row(100).iter()) {
        assert!((x - *y as f64).abs() < 1e-4);
    }
}

#[test]
fn test_mismatched_initial_state_rejected() {
    let params = NodeParams::uniform(3, 0.0, 0.0, 1.0).unwrap();
    let edges: Vec<WeightedEdge<f64>> = Vec::new();
    let initial = State::zeros(2);

    let err = solve_rk2(&edges, &initial, &params, &[0.1]).unwrap_err();
    assert_eq!(
        err,
        SolverError::DimensionMismatch { field: "initial state", expected: 3, actual: 2 }
    );
}

#[test]
fn test_step_functions_agree_with_solvers() {
    let edges = vec![WeightedEdge::new(0, 1, 1.5)];
    let params = NodeParams::uniform(2, 0.0, 0.1, 1.0).unwrap();
    let state = State::new(array![0.0, 1.0], array![0.0, 0.0]).unwrap();

    let next = step_rk4(&edges, &state, &params, 0.05).unwrap();
    let trajectory = solve_rk4(&edges, &state, &params, &[0.05]).unwrap();
    assert_eq!(trajectory.last_state(), next);

    let next = step_rk2(&edges, &state, &params, 0.05).unwrap();
    assert!(next.velocity[0] > 0.0 && next.velocity[1] < 0.0);
}
