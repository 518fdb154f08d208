// src/register/mod.rs

//! The quantum register driven by the measurement protocol.
//!
//! [`QuantumRegister`] is the whole interface the orchestration code needs;
//! [`StateVectorRegister`] implements it with an exact `2^N` amplitude
//! simulation. A register is exclusively owned by one run and released when
//! it is dropped.

mod state_vector;

pub use state_vector::StateVectorRegister;

use crate::core::{Outcome, Result};

/// Gate-level operations on an N-qubit register.
///
/// Measurement is destructive: once `measure(q)` has returned, qubit `q` is
/// consumed and further operations on it fail until the register is
/// re-initialised.
pub trait QuantumRegister {
    /// Number of qubits the register holds.
    fn num_qubits(&self) -> usize;

    /// Resets every qubit to |+>.
    fn init_plus_state(&mut self) -> Result<()>;

    /// Resets every qubit to |0>.
    fn init_zero_state(&mut self) -> Result<()>;

    /// `Rz(θ) = diag(e^{-iθ/2}, e^{iθ/2})` on `qubit`.
    fn rotate_z(&mut self, qubit: usize, angle: f64) -> Result<()>;

    /// Hadamard on `qubit`.
    fn hadamard(&mut self, qubit: usize) -> Result<()>;

    /// Controlled-Z between two distinct qubits (symmetric in its arguments).
    fn controlled_phase_flip(&mut self, qubit1: usize, qubit2: usize) -> Result<()>;

    /// Measures `qubit` in the computational basis, collapsing the state.
    fn measure(&mut self, qubit: usize) -> Result<Outcome>;

    /// Probability that measuring `qubit` now yields `outcome`.
    fn probability_of_outcome(&self, qubit: usize, outcome: Outcome) -> Result<f64>;
}
