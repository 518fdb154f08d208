//! Error handling logic

use std::fmt;

/// Error types representing failures of the measurement protocol.
///
/// Measurement is destructive and never retried, so every variant is fatal
/// for the run that produced it: the protocol validates before acting and
/// aborts on the first violation.
#[derive(Debug, Clone, PartialEq, Eq)] // Eq useful for testing error variants
pub enum MbqcError {
    /// A computed future/past vertex is not adjacent in the graph, or the
    /// vertex has no such vertex at all. Signals a row-count/topology mismatch.
    FlowViolation {
        /// Vertex whose flow target was requested
        vertex: usize,
        /// FlowViolation failure message
        message: String,
    },

    /// The correction formula referenced an outcome that has not been recorded,
    /// or the dependency relation admits no valid processing order.
    OrderingViolation {
        /// Vertex whose outcome was missing (or which closed a cycle)
        vertex: usize,
        /// OrderingViolation failure message
        message: String,
    },

    /// Two sizes that must agree do not (graph vs. register, angles vs. graph, lattice shape).
    SizeMismatch {
        /// Size required by the operation
        expected: usize,
        /// Size actually supplied
        found: usize,
        /// SizeMismatch failure message
        message: String,
    },

    /// An angle fixture generator failed its own numeric identity check.
    GeneratorViolation {
        /// GeneratorViolation failure message
        message: String,
    },

    /// An operation is inconsistent with the current state or its preconditions
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// General error encountered inside the state-vector simulation itself.
    SimulationError {
        /// SimulationError failure message
        message: String,
    },

    /// The configured run deadline elapsed before every vertex was measured.
    DeadlineExceeded {
        /// DeadlineExceeded failure message
        message: String,
    },
}

impl fmt::Display for MbqcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MbqcError::FlowViolation { vertex, message } => write!(f, "Flow Violation (vertex {}): {}", vertex, message),
            MbqcError::OrderingViolation { vertex, message } => write!(f, "Ordering Violation (vertex {}): {}", vertex, message),
            MbqcError::SizeMismatch { expected, found, message } => write!(f, "Size Mismatch (expected {}, found {}): {}", expected, found, message),
            MbqcError::GeneratorViolation { message } => write!(f, "Generator Violation: {}", message),
            MbqcError::InvalidOperation { message } => write!(f, "Invalid Operation: {}", message),
            MbqcError::SimulationError { message } => write!(f, "Simulation Process Error: {}", message),
            MbqcError::DeadlineExceeded { message } => write!(f, "Deadline Exceeded: {}", message),
        }
    }
}

// Implement the standard Error trait to allow for easy integration with Rust error handling.
impl std::error::Error for MbqcError {}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, MbqcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_carries_vertex_and_sizes() {
        let e = MbqcError::FlowViolation { vertex: 4, message: "not adjacent".to_string() };
        assert_eq!(e.to_string(), "Flow Violation (vertex 4): not adjacent");

        let e = MbqcError::SizeMismatch { expected: 9, found: 8, message: "qubits".to_string() };
        assert_eq!(e.to_string(), "Size Mismatch (expected 9, found 8): qubits");
    }
}
