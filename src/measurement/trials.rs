// src/measurement/trials.rs
use super::{MbqcRun, RunResult};
use crate::core::{MbqcError, Outcome, Result};
use crate::graph::Adjacency;
use rayon::prelude::*;
use std::fmt;
use tracing::info;

/// Per-vertex outcome statistics over a batch of independent runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialSummary {
    trials: usize,
    ones_per_vertex: Vec<usize>,
}

impl TrialSummary {
    fn from_results(results: &[RunResult], num_vertices: usize) -> Result<Self> {
        let mut ones_per_vertex = vec![0usize; num_vertices];
        for result in results {
            for (count, bit) in ones_per_vertex.iter_mut().zip(result.bits()?) {
                *count += usize::from(bit);
            }
        }
        Ok(Self { trials: results.len(), ones_per_vertex })
    }

    pub fn trials(&self) -> usize {
        self.trials
    }

    /// Number of runs in which `vertex` was measured as 1.
    pub fn ones(&self, vertex: usize) -> Option<usize> {
        self.ones_per_vertex.get(vertex).copied()
    }

    /// Fraction of runs in which `vertex` was measured as 1.
    pub fn frequency_of_one(&self, vertex: usize) -> Option<f64> {
        self.ones(vertex).map(|ones| ones as f64 / self.trials as f64)
    }

    /// Whether `vertex` produced the same outcome in every run.
    pub fn is_deterministic(&self, vertex: usize) -> bool {
        self.deterministic_outcome(vertex).is_some()
    }

    /// The outcome `vertex` produced in every run, if it never varied.
    pub fn deterministic_outcome(&self, vertex: usize) -> Option<Outcome> {
        match self.ones(vertex)? {
            0 => Some(Outcome::Zero),
            ones if ones == self.trials => Some(Outcome::One),
            _ => None,
        }
    }
}

impl fmt::Display for TrialSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Trial Summary ({} runs):", self.trials)?;
        for (vertex, ones) in self.ones_per_vertex.iter().enumerate() {
            writeln!(f, "  vertex {}: {} ones ({:.3})", vertex, ones, *ones as f64 / self.trials as f64)?;
        }
        Ok(())
    }
}

/// Executes `trials` independent runs of `run` in parallel.
///
/// Trial `i` samples with `base + i`, where `base` is the configured seed
/// (or one freshly drawn seed for the whole batch). When the configuration
/// names a worker count the batch runs on its own thread pool, otherwise on
/// the global one.
///
/// # Errors
/// * `InvalidOperation` for zero trials or a pool that cannot be built.
/// * The first failure of any trial.
pub fn run_trials(run: &MbqcRun, trials: usize) -> Result<TrialSummary> {
    if trials == 0 {
        return Err(MbqcError::InvalidOperation { message: "At least one trial is required".to_string() });
    }
    let base_seed = run.config().base_seed();
    let execute_all = || -> Result<Vec<RunResult>> {
        (0..trials)
            .into_par_iter()
            .map(|trial| run.execute_with_seed(base_seed.wrapping_add(trial as u64)))
            .collect()
    };

    let results = match run.config().worker_threads {
        Some(threads) => rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| MbqcError::InvalidOperation { message: format!("Failed to build trial thread pool: {}", e) })?
            .install(execute_all)?,
        None => execute_all()?,
    };

    let summary = TrialSummary::from_results(&results, run.graph().num_vertices())?;
    info!(trials, base_seed, "completed trial batch");
    Ok(summary)
}

impl MbqcRun {
    /// [`run_trials`] with the configured trial count.
    pub fn run_trials(&self) -> Result<TrialSummary> {
        run_trials(self, self.config().trials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use crate::core::PI;

    #[test]
    fn test_zero_trials_rejected() -> Result<()> {
        let run = MbqcRun::path(vec![0.0; 2], RunConfig::new().with_seed(0))?;
        assert!(matches!(run_trials(&run, 0), Err(MbqcError::InvalidOperation { .. })));
        Ok(())
    }

    #[test]
    fn test_batches_are_reproducible_across_pools() -> Result<()> {
        let config = RunConfig::new().with_seed(1234).with_trials(40);
        let shared = MbqcRun::lattice(2, 2, vec![PI / 4.0; 4], config.clone())?;
        let pooled = MbqcRun::lattice(2, 2, vec![PI / 4.0; 4], config.with_worker_threads(2))?;
        let a = shared.run_trials()?;
        let b = pooled.run_trials()?;
        assert_eq!(a, b);
        assert_eq!(a.trials(), 40);
        Ok(())
    }

    #[test]
    fn test_first_qubit_of_plus_state_is_balanced() -> Result<()> {
        // A cluster qubit with a neighbour has a maximally mixed marginal.
        let run = MbqcRun::path(vec![0.0; 3], RunConfig::new().with_seed(7))?;
        let summary = run_trials(&run, 200)?;
        assert!(!summary.is_deterministic(0));
        let frequency = summary.frequency_of_one(0).unwrap_or(0.0);
        assert!(frequency > 0.2 && frequency < 0.8, "frequency {}", frequency);
        assert_eq!(summary.frequency_of_one(3), None);
        Ok(())
    }
}
