// src/core/mod.rs

//! Core data structures and types

pub mod error;
pub mod state;

pub use error::{MbqcError, Result};
pub use state::{Outcome, StateVector};

pub mod constants;
pub use constants::mbqc_constants::{MAX_QUBITS, NORM_TOLERANCE, PI, TWO_PI}; // Re-export
