// src/measurement/mod.rs

//! Drives a graph state through adaptive single-qubit measurements.
//!
//! A run entangles the register along every graph edge, then visits the
//! vertices in an order derived from the correction dependencies. Each vertex
//! moves `Unprocessed -> Corrected -> Measured`: its angle is corrected from
//! the outcomes recorded so far, the basis change `Rz(-angle)` then `H` is
//! applied, and the qubit is measured. Outcomes are never replayed.

mod run;
mod trials;

pub use run::{MbqcRun, RunResult};
pub use trials::{run_trials, TrialSummary};

use crate::core::{MbqcError, Outcome, Result};
use crate::correction::{correction_dependencies, corrected_angle, MeasuredOutcomes};
use crate::flow::Flow;
use crate::graph::Adjacency;
use crate::register::QuantumRegister;
use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::time::Instant;
use tracing::debug;

/// Processing state of a single vertex during [`measure_graph`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VertexState {
    Unprocessed,
    /// Basis change applied for the corrected angle.
    Corrected { angle: f64 },
    Measured(Outcome),
}

/// Applies controlled-Z on every edge of `graph`.
///
/// # Errors
/// `SizeMismatch` if the register does not hold exactly one qubit per vertex.
pub fn entangle_graph<R, G>(register: &mut R, graph: &G) -> Result<()>
where
    R: QuantumRegister + ?Sized,
    G: Adjacency + ?Sized,
{
    check_register_size(register, graph)?;
    for (u, v) in graph.edges() {
        register.controlled_phase_flip(u, v)?;
    }
    Ok(())
}

/// A processing order in which every vertex comes after all vertices its
/// correction reads.
///
/// Ready vertices are taken smallest first, so a regular lattice under its
/// canonical flow is processed in ascending index order.
///
/// # Errors
/// * `FlowViolation` if the flow does not fit the graph.
/// * `OrderingViolation` if the dependencies contain a cycle.
pub fn measurement_order<G, F>(graph: &G, flow: &F) -> Result<Vec<usize>>
where
    G: Adjacency + ?Sized,
    F: Flow,
{
    let n = graph.num_vertices();
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut pending = vec![0usize; n];

    for vertex in 0..n {
        let dependencies = correction_dependencies(graph, flow, vertex)?;
        for source in dependencies.vertices() {
            dependents[source].push(vertex);
            pending[vertex] += 1;
        }
    }

    let mut ready: BinaryHeap<Reverse<usize>> = (0..n).filter(|&v| pending[v] == 0).map(Reverse).collect();
    let mut order = Vec::with_capacity(n);
    while let Some(Reverse(vertex)) = ready.pop() {
        order.push(vertex);
        for &dependent in &dependents[vertex] {
            pending[dependent] -= 1;
            if pending[dependent] == 0 {
                ready.push(Reverse(dependent));
            }
        }
    }

    if order.len() < n {
        let blocked = (0..n).find(|&v| pending[v] > 0).unwrap_or(0);
        return Err(MbqcError::OrderingViolation {
            vertex: blocked,
            message: format!(
                "Correction dependencies are cyclic; only {} of {} vertices can be ordered",
                order.len(),
                n
            ),
        });
    }
    Ok(order)
}

/// Measures every vertex of an entangled graph state with adaptive corrections.
///
/// `angles[v]` is the nominal measurement angle of vertex `v`.
///
/// # Errors
/// * `SizeMismatch` if `angles` or the register do not match the vertex count.
/// * `FlowViolation` / `OrderingViolation` from the correction rules.
/// * Any register failure.
pub fn measure_graph<R, G, F>(register: &mut R, graph: &G, flow: &F, angles: &[f64]) -> Result<MeasuredOutcomes>
where
    R: QuantumRegister + ?Sized,
    G: Adjacency + ?Sized,
    F: Flow,
{
    measure_graph_until(register, graph, flow, angles, None)
}

/// [`measure_graph`], aborting with `DeadlineExceeded` once `deadline` has
/// passed. The check runs before each vertex.
pub(crate) fn measure_graph_until<R, G, F>(
    register: &mut R,
    graph: &G,
    flow: &F,
    angles: &[f64],
    deadline: Option<Instant>,
) -> Result<MeasuredOutcomes>
where
    R: QuantumRegister + ?Sized,
    G: Adjacency + ?Sized,
    F: Flow,
{
    let n = graph.num_vertices();
    if angles.len() != n {
        return Err(MbqcError::SizeMismatch {
            expected: n,
            found: angles.len(),
            message: "One measurement angle is required per graph vertex".to_string(),
        });
    }
    check_register_size(register, graph)?;

    // Ordering failures surface before the register is touched.
    let order = measurement_order(graph, flow)?;
    let mut outcomes = MeasuredOutcomes::new(n);

    for vertex in order {
        if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
            return Err(MbqcError::DeadlineExceeded {
                message: format!("{} of {} vertices measured", outcomes.len(), n),
            });
        }

        let mut state = VertexState::Unprocessed;
        state = correct_vertex(register, graph, flow, &outcomes, vertex, angles[vertex], state)?;
        state = measure_vertex(register, vertex, state)?;
        let VertexState::Measured(outcome) = state else {
            return Err(MbqcError::InvalidOperation {
                message: format!("Vertex {} finished in state {:?} instead of Measured", vertex, state),
            });
        };
        outcomes.record(vertex, outcome)?;
    }
    Ok(outcomes)
}

/// `Unprocessed -> Corrected`.
fn correct_vertex<R, G, F>(
    register: &mut R,
    graph: &G,
    flow: &F,
    outcomes: &MeasuredOutcomes,
    vertex: usize,
    nominal_angle: f64,
    state: VertexState,
) -> Result<VertexState>
where
    R: QuantumRegister + ?Sized,
    G: Adjacency + ?Sized,
    F: Flow,
{
    if state != VertexState::Unprocessed {
        return Err(MbqcError::InvalidOperation {
            message: format!("Vertex {} is already {:?}", vertex, state),
        });
    }
    let angle = corrected_angle(graph, flow, outcomes, vertex, nominal_angle)?;
    register.rotate_z(vertex, -angle)?;
    register.hadamard(vertex)?;
    Ok(VertexState::Corrected { angle })
}

/// `Corrected -> Measured`.
fn measure_vertex<R>(register: &mut R, vertex: usize, state: VertexState) -> Result<VertexState>
where
    R: QuantumRegister + ?Sized,
{
    let VertexState::Corrected { angle } = state else {
        return Err(MbqcError::InvalidOperation {
            message: format!("Vertex {} must be corrected before it is measured, found {:?}", vertex, state),
        });
    };
    let outcome = register.measure(vertex)?;
    debug!(vertex, angle, %outcome, "measured vertex");
    Ok(VertexState::Measured(outcome))
}

fn check_register_size<R, G>(register: &R, graph: &G) -> Result<()>
where
    R: QuantumRegister + ?Sized,
    G: Adjacency + ?Sized,
{
    if register.num_qubits() != graph.num_vertices() {
        return Err(MbqcError::SizeMismatch {
            expected: graph.num_vertices(),
            found: register.num_qubits(),
            message: "Register must hold exactly one qubit per graph vertex".to_string(),
        });
    }
    Ok(())
}
