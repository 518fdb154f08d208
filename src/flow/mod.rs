// src/flow/mod.rs

//! Flow functions: the causal successor and predecessor of a vertex in
//! measurement order.
//!
//! For a regular lattice with `R` rows the canonical flow is
//! `f(v) = v + R` and `f⁻¹(v) = v - R`. The arithmetic is always checked
//! against the graph's real adjacency, so a row count that does not fit
//! the graph fails loudly with [`MbqcError::FlowViolation`] instead of
//! producing silently wrong corrections.

use crate::core::{MbqcError, Result};
use crate::graph::Adjacency;
use std::collections::BTreeSet;

/// A flow on a graph.
///
/// `Ok(None)` means the vertex has no successor (last layer) or no
/// predecessor (first layer). `Ok(Some(u))` is guaranteed to be adjacent
/// to the vertex.
pub trait Flow {
    /// `f(v)`, the vertex whose measurement `v` feeds forward into.
    fn future<G: Adjacency + ?Sized>(&self, graph: &G, vertex: usize) -> Result<Option<usize>>;

    /// `f⁻¹(v)`, the vertex whose outcome X-corrects `v`.
    fn past<G: Adjacency + ?Sized>(&self, graph: &G, vertex: usize) -> Result<Option<usize>>;
}

/// The `±R` flow of a lattice with a fixed row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatticeFlow {
    num_rows: usize,
}

impl LatticeFlow {
    /// # Errors
    /// `InvalidOperation` if `num_rows` is zero.
    pub fn new(num_rows: usize) -> Result<Self> {
        check_num_rows(num_rows)?;
        Ok(Self { num_rows })
    }

    /// Row count `R`.
    pub fn num_rows(&self) -> usize {
        self.num_rows
    }
}

impl Flow for LatticeFlow {
    fn future<G: Adjacency + ?Sized>(&self, graph: &G, vertex: usize) -> Result<Option<usize>> {
        if vertex >= graph.num_vertices().saturating_sub(self.num_rows) {
            return Ok(None);
        }
        future_vertex_on_graph(graph, vertex, self.num_rows).map(Some)
    }

    fn past<G: Adjacency + ?Sized>(&self, graph: &G, vertex: usize) -> Result<Option<usize>> {
        if vertex < self.num_rows {
            return Ok(None);
        }
        past_vertex_on_graph(graph, vertex, self.num_rows).map(Some)
    }
}

fn check_num_rows(num_rows: usize) -> Result<()> {
    if num_rows == 0 {
        return Err(MbqcError::InvalidOperation { message: "Lattice flow needs at least one row".to_string() });
    }
    Ok(())
}

/// `f(v) = v + R`, without consulting any graph. `None` if the sum overflows.
pub fn future_vertex(vertex: usize, num_rows: usize) -> Option<usize> {
    vertex.checked_add(num_rows)
}

/// `f⁻¹(v) = v - R`, or `None` when `v` is in the first column.
pub fn past_vertex(vertex: usize, num_rows: usize) -> Option<usize> {
    vertex.checked_sub(num_rows)
}

/// Delegates to the graph's adjacency query.
pub fn open_neighbourhood<G: Adjacency + ?Sized>(graph: &G, vertex: usize) -> BTreeSet<usize> {
    graph.open_neighbourhood(vertex)
}

/// `f(v)` validated against the graph.
///
/// # Errors
/// `FlowViolation` if `v >= N - R` (no future column) or if `v + R` is not a
/// neighbour of `v`. `InvalidOperation` if `num_rows` is zero.
pub fn future_vertex_on_graph<G: Adjacency + ?Sized>(graph: &G, vertex: usize, num_rows: usize) -> Result<usize> {
    check_num_rows(num_rows)?;
    let num_vertices = graph.num_vertices();
    let future = future_vertex(vertex, num_rows).filter(|&future| future < num_vertices).ok_or_else(|| {
        MbqcError::FlowViolation {
            vertex,
            message: format!("Vertex must be below {} (vertices - rows) to have a future vertex", num_vertices.saturating_sub(num_rows)),
        }
    })?;
    if !graph.contains_edge(vertex, future) {
        return Err(MbqcError::FlowViolation {
            vertex,
            message: format!("Flow function produced vertex {} which is not in the open neighbourhood", future),
        });
    }
    Ok(future)
}

/// `f⁻¹(v)` validated against the graph.
///
/// # Errors
/// `FlowViolation` if `v < R` (first column) or if `v - R` is not a
/// neighbour of `v`. `InvalidOperation` if `num_rows` is zero.
pub fn past_vertex_on_graph<G: Adjacency + ?Sized>(graph: &G, vertex: usize, num_rows: usize) -> Result<usize> {
    check_num_rows(num_rows)?;
    let past = past_vertex(vertex, num_rows).ok_or_else(|| MbqcError::FlowViolation {
        vertex,
        message: format!("Vertex must be at least {} (the row count) to have a past vertex", num_rows),
    })?;
    if !graph.contains_edge(vertex, past) {
        return Err(MbqcError::FlowViolation {
            vertex,
            message: format!("Flow function produced vertex {} which is not in the open neighbourhood", past),
        });
    }
    Ok(past)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Graph;

    #[test]
    fn test_arithmetic_flow() {
        assert_eq!(future_vertex(4, 3), Some(7));
        assert_eq!(future_vertex(usize::MAX, 1), None);
        assert_eq!(past_vertex(4, 3), Some(1));
        assert_eq!(past_vertex(2, 3), None);
    }

    #[test]
    fn test_graph_flow_on_3x3_lattice() -> Result<()> {
        let g = Graph::lattice(3, 3);
        assert_eq!(future_vertex_on_graph(&g, 4, 3)?, 7);
        assert_eq!(past_vertex_on_graph(&g, 4, 3)?, 1);
        Ok(())
    }

    #[test]
    fn test_future_past_round_trip_on_interior_vertices() -> Result<()> {
        for (rows, cols) in [(1, 6), (2, 4), (3, 3), (4, 5)] {
            let g = Graph::lattice(rows, cols);
            let n = rows * cols;
            for v in rows..n - rows {
                let past = past_vertex_on_graph(&g, v, rows)?;
                assert_eq!(future_vertex_on_graph(&g, past, rows)?, v);
                let future = future_vertex_on_graph(&g, v, rows)?;
                assert_eq!(past_vertex_on_graph(&g, future, rows)?, v);
            }
        }
        Ok(())
    }

    #[test]
    fn test_preconditions_fail_as_flow_violations() {
        let g = Graph::lattice(3, 3);
        assert!(matches!(past_vertex_on_graph(&g, 2, 3), Err(MbqcError::FlowViolation { vertex: 2, .. })));
        assert!(matches!(future_vertex_on_graph(&g, 6, 3), Err(MbqcError::FlowViolation { vertex: 6, .. })));
        assert!(matches!(past_vertex_on_graph(&g, 4, 0), Err(MbqcError::InvalidOperation { .. })));
    }

    #[test]
    fn test_row_count_mismatch_is_detected() {
        // A 3x3 lattice read with a row count of 2: 2 - 2 = 0 is not adjacent to 2.
        let g = Graph::lattice(3, 3);
        match past_vertex_on_graph(&g, 2, 2) {
            Err(MbqcError::FlowViolation { vertex, message }) => {
                assert_eq!(vertex, 2);
                assert!(message.contains("not in the open neighbourhood"), "Incorrect error message: {}", message);
            }
            other => panic!("Expected FlowViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_future_row_count_mismatch_is_detected() {
        // 1 + 2 = 3 sits in the next column but on another row.
        let g = Graph::lattice(3, 3);
        match future_vertex_on_graph(&g, 1, 2) {
            Err(MbqcError::FlowViolation { vertex, message }) => {
                assert_eq!(vertex, 1);
                assert!(message.contains("not in the open neighbourhood"), "Incorrect error message: {}", message);
            }
            other => panic!("Expected FlowViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_vertices_have_no_future() -> Result<()> {
        let g = Graph::path(3);
        assert!(matches!(
            future_vertex_on_graph(&g, usize::MAX, 1),
            Err(MbqcError::FlowViolation { vertex: usize::MAX, .. })
        ));
        assert!(matches!(future_vertex_on_graph(&g, 7, 1), Err(MbqcError::FlowViolation { vertex: 7, .. })));
        assert_eq!(LatticeFlow::new(1)?.future(&g, usize::MAX)?, None);
        assert_eq!(LatticeFlow::new(usize::MAX)?.future(&g, 0)?, None);
        Ok(())
    }

    #[test]
    fn test_open_neighbourhood_delegates_to_graph() {
        assert_eq!(open_neighbourhood(&Graph::lattice(3, 3), 4), BTreeSet::from([1, 3, 5, 7]));
    }

    #[test]
    fn test_lattice_flow_layers() -> Result<()> {
        let g = Graph::lattice(2, 3);
        let flow = LatticeFlow::new(2)?;
        assert_eq!(flow.past(&g, 1)?, None);
        assert_eq!(flow.past(&g, 3)?, Some(1));
        assert_eq!(flow.future(&g, 3)?, Some(5));
        assert_eq!(flow.future(&g, 4)?, None);
        assert!(LatticeFlow::new(0).is_err());
        Ok(())
    }
}
