//! Force (acceleration) evaluation for the swing equation
//!
//! ```text
//! m_i θ̈_i = P_i − γ_i θ̇_i + Σ_j K_ij A_ij sin(θ_j − θ_i)
//! ```
//!
//! The coupling sum is rewritten with the angle-subtraction identity:
//!
//! ```text
//! Σ_j K_ij A_ij sin(θ_j − θ_i) = cos θ_i · [KA sin θ]_i − sin θ_i · [KA cos θ]_i
//! ```
//!
//! so one evaluation costs O(N + E) instead of O(N²): precompute sin/cos per node,
//! accumulate both sums at the two endpoints of every edge, then assemble.

use crate::common::{NodeParams, Scalar, State, WeightedEdge};
use ndarray::{Array1, Array2};
use rayon::prelude::*;

/// Acceleration of every node from the weighted edge list.
///
/// # Panics
///
/// Panics if an edge endpoint is not below `state.num_nodes()` or if
/// `params` has a different length than `state`. [`SwingSystem`] checks
/// both before it evaluates a kernel.
///
/// [`SwingSystem`]: crate::SwingSystem
pub fn get_acceleration<T: Scalar>(
    edges: &[WeightedEdge<T>],
    state: &State<T>,
    params: &NodeParams<T>,
) -> Array1<T> {
    let num_nodes = state.num_nodes();

    let sin_phase = state.phase.mapv(T::sin);
    let cos_phase = state.phase.mapv(T::cos);

    let mut sin_phase_adj = Array1::<T>::zeros(num_nodes);
    let mut cos_phase_adj = Array1::<T>::zeros(num_nodes);
    for edge in edges {
        let (node1, node2, weight) = (edge.node1, edge.node2, edge.weight);

        sin_phase_adj[node1] += weight * sin_phase[node2];
        sin_phase_adj[node2] += weight * sin_phase[node1];
        cos_phase_adj[node1] += weight * cos_phase[node2];
        cos_phase_adj[node2] += weight * cos_phase[node1];
    }

    let mut acceleration = Array1::<T>::zeros(num_nodes);
    for node in 0..num_nodes {
        acceleration[node] = assemble(
            params.power[node],
            params.gamma[node],
            params.mass[node],
            state.velocity[node],
            sin_phase[node],
            cos_phase[node],
            sin_phase_adj[node],
            cos_phase_adj[node],
        );
    }
    acceleration
}

/// Parallel variant of [`get_acceleration`].
///
/// Node passes run on the rayon pool. The edge pass accumulates into
/// per-worker arrays that are summed afterward, so no two workers ever write
/// the same slot. Summation order differs from the sequential path, results
/// agree up to rounding.
///
/// # Panics
///
/// Panics if an edge endpoint is not below `state.num_nodes()` or if
/// `params` has a different length than `state`. [`SwingSystem`] checks
/// both before it evaluates a kernel.
///
/// [`SwingSystem`]: crate::SwingSystem
pub fn get_acceleration_par<T: Scalar>(
    edges: &[WeightedEdge<T>],
    state: &State<T>,
    params: &NodeParams<T>,
) -> Array1<T> {
    let num_nodes = state.num_nodes();
    let phase = &state.phase;

    let (sin_phase, cos_phase): (Vec<T>, Vec<T>) = (0..num_nodes)
        .into_par_iter()
        .map(|node| phase[node].sin_cos())
        .unzip();

    let zeros = || (vec![T::zero(); num_nodes], vec![T::zero(); num_nodes]);
    let (sin_phase_adj, cos_phase_adj) = edges
        .par_iter()
        .fold(zeros, |(mut sin_adj, mut cos_adj), edge| {
            let (node1, node2, weight) = (edge.node1, edge.node2, edge.weight);
            sin_adj[node1] += weight * sin_phase[node2];
            sin_adj[node2] += weight * sin_phase[node1];
            cos_adj[node1] += weight * cos_phase[node2];
            cos_adj[node2] += weight * cos_phase[node1];
            (sin_adj, cos_adj)
        })
        .reduce(zeros, |(mut sin_a, mut cos_a), (sin_b, cos_b)| {
            for node in 0..num_nodes {
                sin_a[node] += sin_b[node];
                cos_a[node] += cos_b[node];
            }
            (sin_a, cos_a)
        });

    let acceleration: Vec<T> = (0..num_nodes)
        .into_par_iter()
        .map(|node| {
            assemble(
                params.power[node],
                params.gamma[node],
                params.mass[node],
                state.velocity[node],
                sin_phase[node],
                cos_phase[node],
                sin_phase_adj[node],
                cos_phase_adj[node],
            )
        })
        .collect();
    Array1::from_vec(acceleration)
}

/// `(P − γ·v + cos θ · S − sin θ · C) / m`
#[allow(clippy::too_many_arguments)]
#[inline]
fn assemble<T: Scalar>(
    power: T,
    gamma: T,
    mass: T,
    velocity: T,
    sin_phase: T,
    cos_phase: T,
    sin_phase_adj: T,
    cos_phase_adj: T,
) -> T {
    // P - gamma * velocity
    let mut force = power - gamma * velocity;

    // Interactions
    force += cos_phase * sin_phase_adj;
    force -= sin_phase * cos_phase_adj;

    // a = F / m
    force / mass
}

/// Dense symmetric weighted adjacency matrix `K_ij A_ij` built from an edge list.
pub fn weighted_adjacency<T: Scalar>(num_nodes: usize, edges: &[WeightedEdge<T>]) -> Array2<T> {
    let mut weights = Array2::<T>::zeros((num_nodes, num_nodes));
    for edge in edges {
        weights[[edge.node1, edge.node2]] = edge.weight;
        weights[[edge.node2, edge.node1]] = edge.weight;
    }
    weights
}

/// Naive O(N²) reference kernel over a dense weighted adjacency matrix.
///
/// Evaluates `Σ_j K_ij A_ij sin(θ_j − θ_i)` literally, visiting each pair once
/// and applying the interaction antisymmetrically. Kept to cross-validate the
/// edge-list kernel, not for production runs.
///
/// # Panics
///
/// Panics if `weights` is smaller than `N × N` or if `params` has a
/// different length than `state`.
pub fn pairwise_acceleration<T: Scalar>(
    weights: &Array2<T>,
    state: &State<T>,
    params: &NodeParams<T>,
) -> Array1<T> {
    let num_nodes = state.num_nodes();
    let phase = &state.phase;

    // P - gamma * velocity
    let mut force = &params.power - &(&params.gamma * &state.velocity);

    for node in 0..num_nodes {
        for neighbor in (node + 1)..num_nodes {
            let weight = weights[[node, neighbor]];
            if weight == T::zero() {
                continue;
            }

            let interaction = weight * (phase[neighbor] - phase[node]).sin();
            force[node] += interaction;
            force[neighbor] -= interaction;
        }
    }

    force / &params.mass
}
