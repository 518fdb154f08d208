// src/measurement/run.rs
use super::{entangle_graph, measure_graph_until};
use crate::config::RunConfig;
use crate::core::{MbqcError, Result};
use crate::correction::MeasuredOutcomes;
use crate::flow::LatticeFlow;
use crate::graph::{Adjacency, Graph};
use crate::lattice::{reshape_to_lattice, LatticeDisplay};
use crate::register::{QuantumRegister, StateVectorRegister};
use std::fmt;
use std::time::Instant;
use tracing::info;

/// A complete measurement computation on a lattice-shaped graph: the graph,
/// its flow, one nominal angle per vertex and the run settings.
#[derive(Debug, Clone)]
pub struct MbqcRun {
    graph: Graph,
    flow: LatticeFlow,
    angles: Vec<f64>,
    num_cols: usize,
    config: RunConfig,
}

impl MbqcRun {
    /// A run on `graph` under the `±num_rows` flow.
    ///
    /// # Errors
    /// * `InvalidOperation` if `num_rows` is zero.
    /// * `SizeMismatch` if the vertex count is not a multiple of `num_rows`
    ///   or `angles` does not hold one entry per vertex.
    pub fn new(graph: Graph, num_rows: usize, angles: Vec<f64>, config: RunConfig) -> Result<Self> {
        let flow = LatticeFlow::new(num_rows)?;
        let n = graph.num_vertices();
        if n % num_rows != 0 {
            return Err(MbqcError::SizeMismatch {
                expected: n.div_ceil(num_rows) * num_rows,
                found: n,
                message: format!("Vertex count is not a whole number of columns of {} rows", num_rows),
            });
        }
        if angles.len() != n {
            return Err(MbqcError::SizeMismatch {
                expected: n,
                found: angles.len(),
                message: "One measurement angle is required per graph vertex".to_string(),
            });
        }
        Ok(Self { graph, flow, angles, num_cols: n / num_rows, config })
    }

    /// A run on the `num_rows x num_cols` lattice.
    pub fn lattice(num_rows: usize, num_cols: usize, angles: Vec<f64>, config: RunConfig) -> Result<Self> {
        Self::new(Graph::lattice(num_rows, num_cols), num_rows, angles, config)
    }

    /// A run on the path graph with one vertex per angle.
    pub fn path(angles: Vec<f64>, config: RunConfig) -> Result<Self> {
        Self::new(Graph::path(angles.len()), 1, angles, config)
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    pub fn flow(&self) -> &LatticeFlow {
        &self.flow
    }

    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Executes the computation once on a fresh register.
    ///
    /// # Errors
    /// Any failure of the protocol, or `DeadlineExceeded` when the configured
    /// deadline passes mid-run.
    pub fn execute(&self) -> Result<RunResult> {
        self.execute_with_seed(self.config.base_seed())
    }

    pub(crate) fn execute_with_seed(&self, seed: u64) -> Result<RunResult> {
        let deadline = self.config.deadline.map(|limit| Instant::now() + limit);
        info!(
            vertices = self.graph.num_vertices(),
            edges = self.graph.num_edges(),
            rows = self.flow.num_rows(),
            seed,
            "starting measurement run"
        );

        // The register lives for this call only.
        let mut register = StateVectorRegister::new(self.graph.num_vertices(), seed)?;
        register.init_plus_state()?;
        entangle_graph(&mut register, &self.graph)?;
        let outcomes = measure_graph_until(&mut register, &self.graph, &self.flow, &self.angles, deadline)?;

        Ok(RunResult {
            outcomes,
            num_rows: self.flow.num_rows(),
            num_cols: self.num_cols,
            seed,
        })
    }
}

/// Outcomes of one run together with the lattice shape they belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    outcomes: MeasuredOutcomes,
    num_rows: usize,
    num_cols: usize,
    seed: u64,
}

impl RunResult {
    pub fn outcomes(&self) -> &MeasuredOutcomes {
        &self.outcomes
    }

    /// Outcome bits indexed by vertex.
    pub fn bits(&self) -> Result<Vec<u8>> {
        self.outcomes.by_vertex()
    }

    /// Outcome bits laid out as `num_rows` rows of `num_cols` columns.
    pub fn lattice(&self) -> Result<Vec<Vec<u8>>> {
        reshape_to_lattice(&self.bits()?, self.num_rows, self.num_cols)
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn num_cols(&self) -> usize {
        self.num_cols
    }

    /// Seed the register sampled with.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl fmt::Display for RunResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run (seed {}), {}x{} lattice:", self.seed, self.num_rows, self.num_cols)?;
        match self.lattice() {
            Ok(lattice) => write!(f, "{}", LatticeDisplay(&lattice)),
            Err(_) => writeln!(f, "  {}", self.outcomes),
        }
    }
}
