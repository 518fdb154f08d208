// src/correction/outcomes.rs
use crate::core::{MbqcError, Outcome, Result};
use std::fmt;

/// Outcomes recorded so far in one run.
///
/// Entries are addressed by vertex id and grow monotonically: a vertex is
/// recorded exactly once, and the order of recording is kept alongside.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeasuredOutcomes {
    by_vertex: Vec<Option<Outcome>>,
    order: Vec<usize>,
}

impl MeasuredOutcomes {
    /// An empty record for a graph of `num_vertices` vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self { by_vertex: vec![None; num_vertices], order: Vec::with_capacity(num_vertices) }
    }

    /// A record in which position `i` holds vertex `i`'s outcome, as produced
    /// by measuring in ascending vertex order.
    ///
    /// # Errors
    /// `InvalidOperation` if any entry is not 0 or 1.
    pub fn from_bits(bits: &[u8]) -> Result<Self> {
        let mut outcomes = Self::new(bits.len());
        for (vertex, &bit) in bits.iter().enumerate() {
            let outcome = Outcome::from_bit(bit).ok_or_else(|| MbqcError::InvalidOperation {
                message: format!("Measurement outcome for vertex {} must be 0 or 1, got {}", vertex, bit),
            })?;
            outcomes.record(vertex, outcome)?;
        }
        Ok(outcomes)
    }

    /// Appends the outcome of `vertex`.
    ///
    /// # Errors
    /// `OrderingViolation` if the vertex was already recorded and
    /// `InvalidOperation` if it lies outside the record.
    pub fn record(&mut self, vertex: usize, outcome: Outcome) -> Result<()> {
        let capacity = self.by_vertex.len();
        let slot = self.by_vertex.get_mut(vertex).ok_or_else(|| MbqcError::InvalidOperation {
            message: format!("Vertex {} is outside this record of {} vertices", vertex, capacity),
        })?;
        if slot.is_some() {
            return Err(MbqcError::OrderingViolation {
                vertex,
                message: "Outcome already recorded; measurements are never replayed".to_string(),
            });
        }
        *slot = Some(outcome);
        self.order.push(vertex);
        Ok(())
    }

    /// Outcome of `vertex`, if it has been measured.
    pub fn get(&self, vertex: usize) -> Option<Outcome> {
        self.by_vertex.get(vertex).copied().flatten()
    }

    /// Number of recorded outcomes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// `true` once every vertex has an outcome.
    pub fn is_complete(&self) -> bool {
        self.order.len() == self.by_vertex.len()
    }

    /// Vertices in the order they were measured.
    pub fn processing_order(&self) -> &[usize] {
        &self.order
    }

    /// Outcome of the most recently measured vertex.
    pub fn last(&self) -> Option<Outcome> {
        self.order.last().and_then(|&v| self.get(v))
    }

    /// Outcome bits in processing order.
    pub fn in_processing_order(&self) -> Vec<u8> {
        self.order.iter().filter_map(|&v| self.get(v)).map(Outcome::bit).collect()
    }

    /// Outcome bits indexed by vertex id.
    ///
    /// # Errors
    /// `OrderingViolation` naming the first vertex that is still unmeasured.
    pub fn by_vertex(&self) -> Result<Vec<u8>> {
        self.by_vertex
            .iter()
            .enumerate()
            .map(|(vertex, outcome)| {
                outcome.map(Outcome::bit).ok_or_else(|| MbqcError::OrderingViolation {
                    vertex,
                    message: "Vertex has not been measured".to_string(),
                })
            })
            .collect()
    }
}

impl fmt::Display for MeasuredOutcomes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let bits: Vec<String> = self.in_processing_order().iter().map(u8::to_string).collect();
        write!(f, "Outcomes[{}/{}: {}]", self.len(), self.by_vertex.len(), bits.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_order_and_rejects_replays() {
        let mut outcomes = MeasuredOutcomes::new(3);
        outcomes.record(2, Outcome::One).unwrap();
        outcomes.record(0, Outcome::Zero).unwrap();
        assert_eq!(outcomes.processing_order(), &[2, 0]);
        assert_eq!(outcomes.in_processing_order(), vec![1, 0]);
        assert_eq!(outcomes.last(), Some(Outcome::Zero));
        assert!(!outcomes.is_complete());
        assert!(matches!(outcomes.by_vertex(), Err(MbqcError::OrderingViolation { vertex: 1, .. })));

        assert!(matches!(outcomes.record(2, Outcome::Zero), Err(MbqcError::OrderingViolation { vertex: 2, .. })));
        assert!(matches!(outcomes.record(3, Outcome::Zero), Err(MbqcError::InvalidOperation { .. })));

        outcomes.record(1, Outcome::One).unwrap();
        assert_eq!(outcomes.by_vertex().unwrap(), vec![0, 1, 1]);
    }

    #[test]
    fn test_from_bits_rejects_non_binary() {
        assert!(MeasuredOutcomes::from_bits(&[0, 2]).is_err());
        let outcomes = MeasuredOutcomes::from_bits(&[1, 0, 1]).unwrap();
        assert_eq!(outcomes.get(2), Some(Outcome::One));
        assert_eq!(outcomes.get(7), None);
        assert_eq!(outcomes.to_string(), "Outcomes[3/3: 1 0 1]");
    }
}
