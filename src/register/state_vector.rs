// src/register/state_vector.rs
use super::QuantumRegister;
use crate::core::{MbqcError, Outcome, Result, StateVector, MAX_QUBITS};
use crate::validation::{check_normalization, check_probability};
use num_complex::Complex;
use num_traits::Zero;
use rand::distr::{Distribution, StandardUniform};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::f64::consts::FRAC_1_SQRT_2;
use tracing::trace;

/// Exact state-vector register.
///
/// Holds `2^N` complex amplitudes; qubit `q` is bit `q` of the basis index.
/// Measurement samples with the Born rule from a generator seeded at
/// creation, so a given seed and gate sequence always reproduce the same
/// outcomes.
#[derive(Debug)]
pub struct StateVectorRegister {
    state: StateVector,
    num_qubits: usize,
    /// `consumed[q]` is set once qubit `q` has been measured.
    consumed: Vec<bool>,
    rng: StdRng,
}

impl StateVectorRegister {
    /// Creates a register of `num_qubits` qubits in |0...0>.
    ///
    /// # Errors
    /// `InvalidOperation` for zero qubits or more than [`MAX_QUBITS`].
    pub fn new(num_qubits: usize, seed: u64) -> Result<Self> {
        if num_qubits == 0 {
            return Err(MbqcError::InvalidOperation { message: "Cannot create a register with zero qubits".to_string() });
        }
        if num_qubits > MAX_QUBITS {
            return Err(MbqcError::InvalidOperation {
                message: format!("Register of {} qubits exceeds the state-vector limit of {}", num_qubits, MAX_QUBITS),
            });
        }
        let dim = 1usize << num_qubits;
        let mut amplitudes = vec![Complex::zero(); dim];
        amplitudes[0] = Complex::new(1.0, 0.0);

        Ok(Self {
            state: StateVector::new(amplitudes),
            num_qubits,
            consumed: vec![false; num_qubits],
            rng: StdRng::seed_from_u64(seed),
        })
    }

    /// Read-only view of the current state.
    pub fn state(&self) -> &StateVector {
        &self.state
    }

    /// Whether `qubit` has already been measured.
    pub fn is_consumed(&self, qubit: usize) -> bool {
        self.consumed.get(qubit).copied().unwrap_or(false)
    }

    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<()> {
        if state.dim() != self.state.dim() {
            return Err(MbqcError::SimulationError {
                message: format!("Cannot set state: provided dimension {} does not match register dimension {}", state.dim(), self.state.dim()),
            });
        }
        self.state = state;
        Ok(())
    }

    /// Rejects out-of-range and already measured qubits.
    fn live_qubit(&self, qubit: usize) -> Result<usize> {
        if qubit >= self.num_qubits {
            return Err(MbqcError::InvalidOperation {
                message: format!("Qubit {} is outside the register of {} qubits", qubit, self.num_qubits),
            });
        }
        if self.consumed[qubit] {
            return Err(MbqcError::InvalidOperation { message: format!("Qubit {} has already been measured", qubit) });
        }
        Ok(1usize << qubit)
    }

    /// Applies a 2x2 matrix to the pairs of basis states differing only at `qubit`.
    fn apply_single_qubit_gate(&mut self, qubit: usize, matrix: &[[Complex<f64>; 2]; 2]) -> Result<()> {
        let mask = self.live_qubit(qubit)?;
        let amplitudes = self.state.amplitudes_mut();
        for i0 in (0..amplitudes.len()).filter(|i| i & mask == 0) {
            let i1 = i0 | mask;
            let psi_0 = amplitudes[i0];
            let psi_1 = amplitudes[i1];
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
        Ok(())
    }

    fn reset(&mut self, amplitude: Complex<f64>) {
        self.state.amplitudes_mut().fill(amplitude);
        self.consumed.fill(false);
    }
}

impl QuantumRegister for StateVectorRegister {
    fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    fn init_plus_state(&mut self) -> Result<()> {
        let amplitude = 1.0 / (self.state.dim() as f64).sqrt();
        self.reset(Complex::new(amplitude, 0.0));
        Ok(())
    }

    fn init_zero_state(&mut self) -> Result<()> {
        self.reset(Complex::zero());
        self.state.amplitudes_mut()[0] = Complex::new(1.0, 0.0);
        Ok(())
    }

    fn rotate_z(&mut self, qubit: usize, angle: f64) -> Result<()> {
        let matrix = [
            [Complex::from_polar(1.0, -angle / 2.0), Complex::zero()],
            [Complex::zero(), Complex::from_polar(1.0, angle / 2.0)],
        ];
        self.apply_single_qubit_gate(qubit, &matrix)
    }

    fn hadamard(&mut self, qubit: usize) -> Result<()> {
        let h = Complex::new(FRAC_1_SQRT_2, 0.0);
        let matrix = [[h, h], [h, -h]];
        self.apply_single_qubit_gate(qubit, &matrix)
    }

    fn controlled_phase_flip(&mut self, qubit1: usize, qubit2: usize) -> Result<()> {
        if qubit1 == qubit2 {
            return Err(MbqcError::InvalidOperation {
                message: "Control and target qubits cannot be the same for controlled phase flip".to_string(),
            });
        }
        let both = self.live_qubit(qubit1)? | self.live_qubit(qubit2)?;
        for (index, amplitude) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if index & both == both {
                *amplitude = -*amplitude;
            }
        }
        Ok(())
    }

    fn measure(&mut self, qubit: usize) -> Result<Outcome> {
        let mask = self.live_qubit(qubit)?;
        let p_one = self.probability_of_outcome(qubit, Outcome::One)?;
        check_probability(p_one, None)?;

        let sample: f64 = StandardUniform.sample(&mut self.rng);
        let outcome = if sample < p_one { Outcome::One } else { Outcome::Zero };
        let p_outcome = match outcome {
            Outcome::One => p_one,
            Outcome::Zero => 1.0 - p_one,
        };
        if p_outcome <= 0.0 {
            return Err(MbqcError::SimulationError {
                message: format!("Sampled outcome {} of qubit {} has zero probability", outcome, qubit),
            });
        }

        // Project onto the sampled branch and renormalise.
        let keep = match outcome {
            Outcome::One => mask,
            Outcome::Zero => 0,
        };
        let scale = 1.0 / p_outcome.sqrt();
        for (index, amplitude) in self.state.amplitudes_mut().iter_mut().enumerate() {
            if index & mask == keep {
                *amplitude *= scale;
            } else {
                *amplitude = Complex::zero();
            }
        }
        check_normalization(&self.state, None)?;
        self.consumed[qubit] = true;

        trace!(qubit, p_one, %outcome, "measured qubit");
        Ok(outcome)
    }

    fn probability_of_outcome(&self, qubit: usize, outcome: Outcome) -> Result<f64> {
        let mask = self.live_qubit(qubit)?;
        let keep = match outcome {
            Outcome::One => mask,
            Outcome::Zero => 0,
        };
        Ok(self
            .state
            .amplitudes()
            .iter()
            .enumerate()
            .filter(|(index, _)| index & mask == keep)
            .map(|(_, amplitude)| amplitude.norm_sqr())
            .sum())
    }
}
