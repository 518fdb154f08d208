// src/validation/mod.rs

//! Consistency checks on register states.

use crate::core::{MbqcError, Result, StateVector, NORM_TOLERANCE};
use tracing::warn;

/// Checks that the squared amplitudes of `state` sum to 1.0 within `tolerance`
/// (defaults to [`NORM_TOLERANCE`]).
///
/// # Errors
/// `SimulationError` if the deviation exceeds the tolerance.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    let norm_sq = state.norm_sqr();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(MbqcError::SimulationError {
            message: format!("State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})", norm_sq, effective_tolerance),
        })
    } else {
        Ok(())
    }
}

/// Checks that `probability` is a usable probability, allowing rounding noise
/// of `tolerance` beyond `[0, 1]`.
pub fn check_probability(probability: f64, tolerance: Option<f64>) -> Result<()> {
    let effective_tolerance = tolerance.unwrap_or(NORM_TOLERANCE);
    if !probability.is_finite() || probability < -effective_tolerance || probability > 1.0 + effective_tolerance {
        return Err(MbqcError::SimulationError { message: format!("Outcome probability {} is outside [0, 1]", probability) });
    }
    if !(0.0..=1.0).contains(&probability) {
        warn!(probability, "outcome probability outside [0, 1] within rounding tolerance");
    }
    Ok(())
}
