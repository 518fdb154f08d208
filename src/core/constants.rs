//! Mathematical constants used by the correction rule and the simulator.

/// Constants shared across the crate
pub mod mbqc_constants {
    /// π, the unit of a Z-correction
    pub const PI: f64 = std::f64::consts::PI;
    /// Full turn; measurement angles are physically equivalent modulo this value.
    pub const TWO_PI: f64 = 2.0 * std::f64::consts::PI;
    /// Largest register the state-vector simulator will allocate (2^26 amplitudes).
    pub const MAX_QUBITS: usize = 26;
    /// Allowed deviation of the squared norm from 1.0
    pub const NORM_TOLERANCE: f64 = 1e-9;
}
