//! Runs adaptive measurements along a path graph and prints the outcomes

use mbqc::{MbqcError, MbqcRun, RunConfig, angles, run_trials};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), MbqcError> {
    // RUST_LOG=debug shows every vertex measurement.
    tracing_subscriber::fmt().with_env_filter(EnvFilter::from_default_env()).init();

    // 1. Seven qubits, all measured at angle zero.
    let run = MbqcRun::path(angles::all_zero(7), RunConfig::new().with_seed(1))?;
    let result = run.execute()?;
    println!("Zero angles:\n{}", result);

    // 2. Every-other angles summing to pi (mod 2pi): the last outcome is always 1.
    let mut rng = StdRng::seed_from_u64(7);
    let nominal = angles::every_other_mod_2k_pi_plus_pi(7, 4, &mut rng)?;
    println!("Angles (units of pi): {:?}", nominal.iter().map(|a| a / std::f64::consts::PI).collect::<Vec<_>>());

    let run = MbqcRun::path(nominal, RunConfig::new().with_seed(2).with_trials(500))?;
    let summary = run_trials(&run, run.config().trials)?;
    println!("{}", summary);
    println!("Last vertex deterministic: {:?}", summary.deterministic_outcome(6));
    Ok(())
}
