//! Measures a 3x4 cluster state under its lattice flow, one run and a parallel batch

use mbqc::{Graph, LatticeFlow, MbqcError, MbqcRun, RunConfig, angles, measurement_order};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), MbqcError> {
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let (rows, cols) = (3, 4);
    let graph = Graph::lattice(rows, cols);
    println!("{}", graph);
    println!("Measurement order: {:?}", measurement_order(&graph, &LatticeFlow::new(rows)?)?);

    let mut rng = StdRng::seed_from_u64(11);
    let nominal = angles::random_pi_on_n(rows * cols, 4, &mut rng)?;

    let config = RunConfig::new()
        .with_seed(2025)
        .with_trials(64)
        .with_worker_threads(4)
        .with_deadline(Duration::from_secs(5));
    let run = MbqcRun::new(graph, rows, nominal, config)?;

    let result = run.execute()?;
    println!("{}", result);

    let summary = run.run_trials()?;
    println!("{}", summary);
    Ok(())
}
