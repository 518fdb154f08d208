//! Run configuration.

use std::time::Duration;

/// Settings shared by single runs and repeated trials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Base seed for measurement sampling. `None` draws a fresh one per run.
    /// Trial `i` of a batch uses `seed + i`.
    pub seed: Option<u64>,
    /// Number of independent trials executed by `run_trials`.
    pub trials: usize,
    /// Size of a dedicated worker pool for trials. `None` uses the global rayon pool.
    pub worker_threads: Option<usize>,
    /// Wall-clock limit for one run, checked between vertex measurements.
    pub deadline: Option<Duration>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            trials: 1,
            worker_threads: None,
            deadline: None,
        }
    }
}

impl RunConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_worker_threads(mut self, threads: usize) -> Self {
        self.worker_threads = Some(threads);
        self
    }

    pub fn with_deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// The configured seed, or a freshly drawn one.
    pub(crate) fn base_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random::<u64>)
    }
}
