// src/angles/mod.rs

//! Measurement-angle fixtures.
//!
//! Angles are multiples `k·π/d` of a fixed denominator `d`. The constrained
//! generators pick the final angle so that the total is a whole number of
//! turns (optionally plus π), which fixes the parity of the last outcome of
//! a path computation.

use crate::core::{MbqcError, Result, NORM_TOLERANCE, PI};
use rand::Rng;
use rand::distr::{Distribution, Uniform};

/// `n` zero angles.
pub fn all_zero(num_qubits: usize) -> Vec<f64> {
    vec![0.0; num_qubits]
}

/// `n` copies of `angle`.
pub fn all_same(num_qubits: usize, angle: f64) -> Vec<f64> {
    vec![angle; num_qubits]
}

/// Independent angles `k·π/d` with `k` uniform in `0..2d`.
pub fn random_pi_on_n<R: Rng + ?Sized>(num_qubits: usize, pi_denominator: u32, rng: &mut R) -> Result<Vec<f64>> {
    let total_positions = total_positions(pi_denominator)?;
    let numerators = uniform(0, total_positions - 1)?;
    Ok((0..num_qubits)
        .map(|_| to_angle(numerators.sample(rng), pi_denominator))
        .collect())
}

/// Random angles whose sum is a multiple of 2π.
pub fn random_pi_on_n_mod_2k_pi<R: Rng + ?Sized>(num_qubits: usize, pi_denominator: u32, rng: &mut R) -> Result<Vec<f64>> {
    constrained(num_qubits, pi_denominator, rng, Pattern::Every, false)
}

/// Random angles whose sum is a multiple of 2π, plus π.
pub fn random_pi_on_n_mod_2k_pi_plus_pi<R: Rng + ?Sized>(num_qubits: usize, pi_denominator: u32, rng: &mut R) -> Result<Vec<f64>> {
    constrained(num_qubits, pi_denominator, rng, Pattern::Every, true)
}

/// Even indices non-zero random, odd indices zero, sum a multiple of 2π.
///
/// The last index always carries the closing angle, so for even
/// `num_qubits` it is the one odd index that is not zero.
pub fn every_other_mod_2k_pi<R: Rng + ?Sized>(num_qubits: usize, pi_denominator: u32, rng: &mut R) -> Result<Vec<f64>> {
    constrained(num_qubits, pi_denominator, rng, Pattern::EveryOther, false)
}

/// As [`every_other_mod_2k_pi`], with the sum a multiple of 2π plus π.
pub fn every_other_mod_2k_pi_plus_pi<R: Rng + ?Sized>(num_qubits: usize, pi_denominator: u32, rng: &mut R) -> Result<Vec<f64>> {
    constrained(num_qubits, pi_denominator, rng, Pattern::EveryOther, true)
}

#[derive(Clone, Copy)]
enum Pattern {
    /// Every index but the last is drawn from `0..2d`.
    Every,
    /// Even indices drawn from `1..2d`, odd indices before the last fixed at zero.
    EveryOther,
}

fn constrained<R: Rng + ?Sized>(
    num_qubits: usize,
    pi_denominator: u32,
    rng: &mut R,
    pattern: Pattern,
    plus_pi: bool,
) -> Result<Vec<f64>> {
    if num_qubits < 2 {
        return Err(MbqcError::InvalidOperation {
            message: format!("Constrained angle generation needs at least 2 qubits, got {}", num_qubits),
        });
    }
    let total_positions = total_positions(pi_denominator)?;
    let full_range = uniform(0, total_positions - 1)?;
    let non_zero_range = uniform(1, total_positions - 1)?;

    let mut angles = vec![0.0; num_qubits];
    let mut total_numerator: u64 = 0;
    for (i, angle) in angles.iter_mut().enumerate().take(num_qubits - 1) {
        let numerator = match pattern {
            Pattern::Every => full_range.sample(rng),
            Pattern::EveryOther if i % 2 == 0 => non_zero_range.sample(rng),
            Pattern::EveryOther => continue,
        };
        total_numerator += u64::from(numerator);
        *angle = to_angle(numerator, pi_denominator);
    }

    let total_positions = u64::from(total_positions);
    let remaining = total_positions - total_numerator % total_positions;
    angles[num_qubits - 1] = remaining as f64 / f64::from(pi_denominator) * PI;
    check_whole_turns(&angles)?;

    if plus_pi {
        angles[num_qubits - 1] += PI;
    }
    Ok(angles)
}

/// The produced angles must add up to an even multiple of π.
fn check_whole_turns(angles: &[f64]) -> Result<()> {
    let half_turns = angles.iter().sum::<f64>() / PI;
    let rounded = half_turns.round();
    let tolerance = NORM_TOLERANCE * angles.len() as f64;
    if (half_turns - rounded).abs() > tolerance || rounded.rem_euclid(2.0) != 0.0 {
        return Err(MbqcError::GeneratorViolation {
            message: format!("Angle sum {}π is not a multiple of 2π", half_turns),
        });
    }
    Ok(())
}

/// `2d`, the number of distinct angles `kπ/d` in one turn.
fn total_positions(pi_denominator: u32) -> Result<u32> {
    if pi_denominator == 0 {
        return Err(MbqcError::InvalidOperation { message: "Angle denominator must be at least 1".to_string() });
    }
    pi_denominator.checked_mul(2).ok_or_else(|| MbqcError::InvalidOperation {
        message: format!("Angle denominator {} leaves no room for 2d positions", pi_denominator),
    })
}

fn uniform(low: u32, high: u32) -> Result<Uniform<u32>> {
    Uniform::new_inclusive(low, high).map_err(|e| MbqcError::InvalidOperation {
        message: format!("Invalid numerator range {}..={}: {}", low, high, e),
    })
}

fn to_angle(numerator: u32, pi_denominator: u32) -> f64 {
    f64::from(numerator) / f64::from(pi_denominator) * PI
}
