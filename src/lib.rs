// src/lib.rs

//! `mbqc` - Measurement-based quantum computation on graph states
//!
//! A graph state is prepared on a quantum register by applying controlled-Z
//! along every edge of a graph, then consumed by adaptive single-qubit
//! measurements. The flow of the graph decides which earlier outcomes
//! correct each measurement angle, and in which order vertices may be
//! measured.

pub mod core;
pub mod graph;
pub mod flow;
pub mod correction;
pub mod register;
pub mod measurement;
pub mod lattice;
pub mod angles;
pub mod validation;
pub mod config;

// Re-export the most common types for easier top-level use
pub use core::{MbqcError, Outcome, Result, StateVector};
pub use graph::{Adjacency, Graph};
pub use flow::{Flow, LatticeFlow, future_vertex_on_graph, past_vertex_on_graph};
pub use correction::{CorrectionDependencies, MeasuredOutcomes, corrected_angle, corrected_lattice_angle, correction_dependencies};
pub use register::{QuantumRegister, StateVectorRegister};
pub use measurement::{MbqcRun, RunResult, TrialSummary, VertexState, entangle_graph, measure_graph, measurement_order, run_trials};
pub use lattice::{LatticeDisplay, flatten_lattice, reshape_to_lattice};
pub use config::RunConfig;
pub use validation::check_normalization;

// Example 1: Two-qubit path with quarter-turn angles
// The second vertex is X-corrected by the first; the corrected basis makes
// its outcome deterministic.
/// ```
/// use mbqc::{MbqcRun, RunConfig, Outcome, MbqcError};
/// use std::f64::consts::PI;
///
/// # fn main() -> Result<(), MbqcError> {
/// for seed in 0..20 {
///     let run = MbqcRun::path(vec![PI / 2.0, PI / 2.0], RunConfig::new().with_seed(seed))?;
///     let result = run.execute()?;
///     assert_eq!(result.outcomes().len(), 2);
///     assert_eq!(result.outcomes().get(1), Some(Outcome::Zero));
/// }
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Driving the protocol by hand
// Entangle a 2x2 lattice, then measure it under its lattice flow.
/// ```
/// use mbqc::{Graph, LatticeFlow, StateVectorRegister, QuantumRegister};
/// use mbqc::{entangle_graph, measure_graph, reshape_to_lattice, LatticeDisplay, MbqcError};
///
/// # fn main() -> Result<(), MbqcError> {
/// let graph = Graph::lattice(2, 2);
/// let flow = LatticeFlow::new(2)?;
/// let mut register = StateVectorRegister::new(4, 42)?;
/// register.init_plus_state()?;
/// entangle_graph(&mut register, &graph)?;
///
/// let outcomes = measure_graph(&mut register, &graph, &flow, &[0.0; 4])?;
/// assert!(outcomes.is_complete());
/// let lattice = reshape_to_lattice(&outcomes.by_vertex()?, 2, 2)?;
/// println!("{}", LatticeDisplay(&lattice));
/// # Ok(())
/// # }
/// ```
#[doc(hidden)]
const _: () = ();
