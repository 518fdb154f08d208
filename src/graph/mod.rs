// src/graph/mod.rs

//! Undirected qubit-adjacency graphs.
//!
//! Vertices are the integers `0..N`. Lattices use column-major numbering,
//! `v = col * rows + row`, so the row index varies fastest:
//!
//! ```text
//! 0 - 3 - 6
//! |   |   |
//! 1 - 4 - 7
//! |   |   |
//! 2 - 5 - 8
//! ```

use crate::core::{MbqcError, Result};
use std::collections::BTreeSet;
use std::fmt;

/// The adjacency queries the flow and measurement code relies on.
pub trait Adjacency {
    /// Number of vertices `N`; vertex ids are `0..N`.
    fn num_vertices(&self) -> usize;

    /// Every edge exactly once, as `(u, v)` with `u < v`.
    fn edges(&self) -> Vec<(usize, usize)>;

    /// Vertices adjacent to `vertex`, excluding `vertex` itself.
    /// Out-of-range vertices have an empty neighbourhood.
    fn open_neighbourhood(&self, vertex: usize) -> BTreeSet<usize>;

    /// Whether `u` and `v` share an edge.
    fn contains_edge(&self, u: usize, v: usize) -> bool {
        self.open_neighbourhood(u).contains(&v)
    }
}

/// Adjacency-list graph, immutable once handed to a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graph {
    adjacency: Vec<BTreeSet<usize>>,
}

impl Graph {
    /// Creates a graph with `num_vertices` isolated vertices.
    pub fn new(num_vertices: usize) -> Self {
        Self { adjacency: vec![BTreeSet::new(); num_vertices] }
    }

    /// Adds the undirected edge `{u, v}`. Adding an existing edge is a no-op.
    ///
    /// # Errors
    /// `InvalidOperation` for self-loops or endpoints outside `0..N`.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<()> {
        let n = self.adjacency.len();
        if u >= n || v >= n {
            return Err(MbqcError::InvalidOperation {
                message: format!("Edge ({}, {}) references a vertex outside 0..{}", u, v, n),
            });
        }
        if u == v {
            return Err(MbqcError::InvalidOperation { message: format!("Self-loop on vertex {} is not allowed", u) });
        }
        self.adjacency[u].insert(v);
        self.adjacency[v].insert(u);
        Ok(())
    }

    /// Builds a graph from an edge list.
    pub fn from_edges<I>(num_vertices: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize)>,
    {
        let mut graph = Self::new(num_vertices);
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        Ok(graph)
    }

    /// A path `0 - 1 - ... - (n-1)`, i.e. the 1×n lattice.
    pub fn path(num_vertices: usize) -> Self {
        let mut graph = Self::new(num_vertices);
        for v in 1..num_vertices {
            graph.adjacency[v - 1].insert(v);
            graph.adjacency[v].insert(v - 1);
        }
        graph
    }

    /// A `num_rows × num_cols` grid with column-major vertex numbering.
    pub fn lattice(num_rows: usize, num_cols: usize) -> Self {
        let n = num_rows * num_cols;
        let mut graph = Self::new(n);
        for col in 0..num_cols {
            for row in 0..num_rows {
                let v = col * num_rows + row;
                if row + 1 < num_rows {
                    graph.adjacency[v].insert(v + 1);
                    graph.adjacency[v + 1].insert(v);
                }
                if col + 1 < num_cols {
                    graph.adjacency[v].insert(v + num_rows);
                    graph.adjacency[v + num_rows].insert(v);
                }
            }
        }
        graph
    }

    /// Number of edges.
    pub fn num_edges(&self) -> usize {
        self.adjacency.iter().map(BTreeSet::len).sum::<usize>() / 2
    }
}

impl Adjacency for Graph {
    fn num_vertices(&self) -> usize {
        self.adjacency.len()
    }

    fn edges(&self) -> Vec<(usize, usize)> {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(u, neighbours)| neighbours.range(u + 1..).map(move |&v| (u, v)))
            .collect()
    }

    fn open_neighbourhood(&self, vertex: usize) -> BTreeSet<usize> {
        self.adjacency.get(vertex).cloned().unwrap_or_default()
    }

    fn contains_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency.get(u).is_some_and(|neighbours| neighbours.contains(&v))
    }
}

impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Graph[{} vertices, {} edges]", self.num_vertices(), self.num_edges())?;
        for (v, neighbours) in self.adjacency.iter().enumerate() {
            let list: Vec<String> = neighbours.iter().map(|u| u.to_string()).collect();
            writeln!(f, "  {} <--> {}", v, list.join(" "))?;
        }
        Ok(())
    }
}
