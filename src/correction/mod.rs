// src/correction/mod.rs

//! Adaptive angle correction.
//!
//! Before vertex `v` is measured its nominal angle `θ` is corrected from the
//! outcomes `s` of vertices that were measured earlier:
//!
//! ```text
//! θ' = (-1)^s[f⁻¹(v)] · θ  +  π · Σ s[f⁻¹(u)]   for u ∈ N(v), f⁻¹(u) ≠ v
//! ```
//!
//! First-layer vertices (no flow predecessor) keep `θ`. The result is never
//! reduced modulo 2π.

mod outcomes;

pub use outcomes::MeasuredOutcomes;

use crate::core::{MbqcError, Outcome, Result, PI};
use crate::flow::{Flow, LatticeFlow};
use crate::graph::Adjacency;
use std::collections::BTreeSet;

/// The vertices whose outcomes the correction of one vertex reads.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CorrectionDependencies {
    /// X-correction source, `f⁻¹(v)`. `None` for first-layer vertices.
    pub x: Option<usize>,
    /// Z-correction sources, `{f⁻¹(u) : u ∈ N(v)} \ {v}`. Empty when `x` is `None`.
    pub z: BTreeSet<usize>,
}

impl CorrectionDependencies {
    /// All referenced vertices, X source first.
    pub fn vertices(&self) -> impl Iterator<Item = usize> + '_ {
        self.x.into_iter().chain(self.z.iter().copied())
    }
}

/// Computes which outcomes the correction of `vertex` depends on.
///
/// # Errors
/// `FlowViolation` if the flow disagrees with the graph for `vertex` or any
/// of its neighbours.
pub fn correction_dependencies<G, F>(graph: &G, flow: &F, vertex: usize) -> Result<CorrectionDependencies>
where
    G: Adjacency + ?Sized,
    F: Flow,
{
    let Some(x) = flow.past(graph, vertex)? else {
        return Ok(CorrectionDependencies::default());
    };

    let mut z = BTreeSet::new();
    for neighbour in graph.open_neighbourhood(vertex) {
        if let Some(past) = flow.past(graph, neighbour)? {
            z.insert(past);
        }
    }
    // A vertex cannot correct itself.
    z.remove(&vertex);

    Ok(CorrectionDependencies { x: Some(x), z })
}

/// The corrected measurement angle of `vertex`.
///
/// # Errors
/// * `FlowViolation` if the flow does not fit the graph.
/// * `OrderingViolation` if an outcome the formula needs has not been recorded.
pub fn corrected_angle<G, F>(
    graph: &G,
    flow: &F,
    outcomes: &MeasuredOutcomes,
    vertex: usize,
    nominal_angle: f64,
) -> Result<f64>
where
    G: Adjacency + ?Sized,
    F: Flow,
{
    let dependencies = correction_dependencies(graph, flow, vertex)?;
    let Some(x_vertex) = dependencies.x else {
        return Ok(nominal_angle);
    };

    let x_angle = match required(outcomes, x_vertex, vertex)? {
        Outcome::Zero => nominal_angle,
        Outcome::One => -nominal_angle,
    };

    let mut sum: u32 = 0;
    for &z_vertex in &dependencies.z {
        sum += u32::from(required(outcomes, z_vertex, vertex)?.bit());
    }
    let z_angle = PI * f64::from(sum);

    Ok(x_angle + z_angle)
}

/// [`corrected_angle`] under the `±num_rows` lattice flow.
pub fn corrected_lattice_angle<G: Adjacency + ?Sized>(
    graph: &G,
    outcomes: &MeasuredOutcomes,
    vertex: usize,
    num_rows: usize,
    nominal_angle: f64,
) -> Result<f64> {
    corrected_angle(graph, &LatticeFlow::new(num_rows)?, outcomes, vertex, nominal_angle)
}

fn required(outcomes: &MeasuredOutcomes, source: usize, corrected: usize) -> Result<Outcome> {
    outcomes.get(source).ok_or_else(|| MbqcError::OrderingViolation {
        vertex: source,
        message: format!("Correction of vertex {} needs the outcome of vertex {}, which has not been measured", corrected, source),
    })
}
