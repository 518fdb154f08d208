// tests/protocol_tests.rs

// Import necessary types from the mbqc crate
use mbqc::{
    angles, run_trials, Graph, LatticeFlow, MbqcError, MbqcRun, Outcome, QuantumRegister, RunConfig, StateVectorRegister,
    entangle_graph, measure_graph,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

use std::f64::consts::PI;

// Helper: outcome of the last vertex of a seeded path run
fn last_outcome(angles: Vec<f64>, seed: u64) -> Result<Outcome, MbqcError> {
    let run = MbqcRun::path(angles, RunConfig::new().with_seed(seed))?;
    let result = run.execute()?;
    let last = result.outcomes().len() - 1;
    result.outcomes().get(last).ok_or_else(|| MbqcError::InvalidOperation {
        message: format!("Vertex {} was not measured", last),
    })
}

#[test]
fn test_two_qubits_angles_pi_on_two() -> Result<(), MbqcError> {
    for seed in 0..200 {
        let run = MbqcRun::path(vec![PI / 2.0, PI / 2.0], RunConfig::new().with_seed(seed))?;
        let result = run.execute()?;
        assert_eq!(result.bits()?.len(), 2);
        assert_eq!(result.outcomes().get(1), Some(Outcome::Zero), "seed {}", seed);
    }
    Ok(())
}

#[test]
fn test_odd_paths_with_zero_angles_end_in_zero() -> Result<(), MbqcError> {
    for n in [3, 5, 7] {
        for seed in 0..200 {
            assert_eq!(last_outcome(angles::all_zero(n), seed)?, Outcome::Zero, "n = {}, seed {}", n, seed);
        }
    }
    Ok(())
}

#[test]
fn test_even_path_with_zero_angles_is_random() -> Result<(), MbqcError> {
    let run = MbqcRun::path(angles::all_zero(4), RunConfig::new().with_seed(21))?;
    let summary = run_trials(&run, 200)?;
    assert!(!summary.is_deterministic(3));
    Ok(())
}

#[test]
fn test_every_other_angles_fix_final_parity() -> Result<(), MbqcError> {
    let mut rng = StdRng::seed_from_u64(2024);
    for seed in 0..100 {
        let even = angles::every_other_mod_2k_pi(7, 4, &mut rng)?;
        assert_eq!(last_outcome(even, seed)?, Outcome::Zero, "seed {}", seed);

        let odd = angles::every_other_mod_2k_pi_plus_pi(7, 4, &mut rng)?;
        assert_eq!(last_outcome(odd, seed)?, Outcome::One, "seed {}", seed);
    }
    Ok(())
}

#[test]
fn test_trial_summary_agrees_with_determinism() -> Result<(), MbqcError> {
    let config = RunConfig::new().with_seed(8).with_trials(300).with_worker_threads(3);
    let run = MbqcRun::path(angles::all_zero(5), config)?;
    let summary = run.run_trials()?;
    assert_eq!(summary.trials(), 300);
    assert_eq!(summary.deterministic_outcome(4), Some(Outcome::Zero));
    assert_eq!(summary.frequency_of_one(4), Some(0.0));
    Ok(())
}

#[test]
fn test_two_dimensional_lattice_run() -> Result<(), MbqcError> {
    let mut rng = StdRng::seed_from_u64(77);
    let nominal = angles::random_pi_on_n(9, 4, &mut rng)?;
    let run = MbqcRun::lattice(3, 3, nominal, RunConfig::new().with_seed(5))?;
    let result = run.execute()?;

    assert!(result.outcomes().is_complete());
    assert_eq!(result.outcomes().processing_order(), &[0, 1, 2, 3, 4, 5, 6, 7, 8]);
    let lattice = result.lattice()?;
    assert_eq!((lattice.len(), lattice[0].len()), (3, 3));
    Ok(())
}

#[test]
fn test_manual_protocol_matches_run() -> Result<(), MbqcError> {
    let nominal = vec![PI / 4.0, PI / 3.0, 0.0, PI / 2.0];
    let seed = 314;

    let graph = Graph::lattice(2, 2);
    let mut register = StateVectorRegister::new(4, seed)?;
    register.init_plus_state()?;
    entangle_graph(&mut register, &graph)?;
    let by_hand = measure_graph(&mut register, &graph, &LatticeFlow::new(2)?, &nominal)?;

    let run = MbqcRun::lattice(2, 2, nominal, RunConfig::new().with_seed(seed))?;
    assert_eq!(run.execute()?.outcomes(), &by_hand);
    Ok(())
}

#[test]
fn test_register_graph_mismatch() -> Result<(), MbqcError> {
    let graph = Graph::lattice(2, 3);
    let mut register = StateVectorRegister::new(5, 0)?;
    register.init_plus_state()?;

    match entangle_graph(&mut register, &graph) {
        Err(MbqcError::SizeMismatch { expected, found, .. }) => assert_eq!((expected, found), (6, 5)),
        other => panic!("Expected SizeMismatch, got {:?}", other),
    }
    let result = measure_graph(&mut register, &graph, &LatticeFlow::new(2)?, &[0.0; 6]);
    assert!(matches!(result, Err(MbqcError::SizeMismatch { .. })));
    Ok(())
}

#[test]
fn test_wrong_row_count_fails_before_measuring() -> Result<(), MbqcError> {
    // A 3x3 lattice walked as if it had 2 rows.
    let graph = Graph::lattice(3, 3);
    let mut register = StateVectorRegister::new(9, 0)?;
    register.init_plus_state()?;
    entangle_graph(&mut register, &graph)?;

    let result = measure_graph(&mut register, &graph, &LatticeFlow::new(2)?, &[0.0; 9]);
    assert!(matches!(result, Err(MbqcError::FlowViolation { .. })));
    assert!((0..9).all(|q| !register.is_consumed(q)));
    Ok(())
}
