// tests/correction_tests.rs

use mbqc::{
    corrected_lattice_angle, flatten_lattice, future_vertex_on_graph, past_vertex_on_graph, reshape_to_lattice, Graph,
    MbqcError, MeasuredOutcomes,
};

use std::f64::consts::PI;

const TOLERANCE: f64 = 1e-12;

fn assert_close(actual: f64, expected: f64) {
    assert!((actual - expected).abs() < TOLERANCE, "Expected {}, got {}", expected, actual);
}

#[test]
fn test_interior_vertices_round_trip_through_flow() -> Result<(), MbqcError> {
    for (rows, cols) in [(1, 6), (2, 4), (3, 3), (4, 5)] {
        let graph = Graph::lattice(rows, cols);
        let n = rows * cols;
        for v in rows..n - rows {
            let past = past_vertex_on_graph(&graph, v, rows)?;
            assert_eq!(future_vertex_on_graph(&graph, past, rows)?, v, "{}x{} lattice, vertex {}", rows, cols, v);
        }
    }
    Ok(())
}

#[test]
fn test_first_layer_is_never_corrected() -> Result<(), MbqcError> {
    let graph = Graph::lattice(3, 4);
    for bits in [[0u8; 12], [1u8; 12]] {
        let outcomes = MeasuredOutcomes::from_bits(&bits)?;
        for v in 0..3 {
            assert_eq!(corrected_lattice_angle(&graph, &outcomes, v, 3, 0.7)?, 0.7);
        }
    }
    Ok(())
}

#[test]
fn test_x_correction_flips_sign() -> Result<(), MbqcError> {
    let graph = Graph::path(2);
    let theta = PI / 3.0;

    let one = MeasuredOutcomes::from_bits(&[1])?;
    assert_close(corrected_lattice_angle(&graph, &one, 1, 1, theta)?, -theta);

    let zero = MeasuredOutcomes::from_bits(&[0])?;
    assert_close(corrected_lattice_angle(&graph, &zero, 1, 1, theta)?, theta);
    Ok(())
}

#[test]
fn test_z_correction_adds_pi_per_outcome() -> Result<(), MbqcError> {
    // 3x3 lattice: vertex 7 is X-corrected by 4 and Z-corrected by 1, 3 and 5.
    let graph = Graph::lattice(3, 3);
    let theta = PI / 8.0;

    let bits = [0, 1, 0, 1, 1, 1, 0];
    let outcomes = MeasuredOutcomes::from_bits(&bits)?;
    assert_close(corrected_lattice_angle(&graph, &outcomes, 7, 3, theta)?, -theta + 3.0 * PI);

    let bits = [0, 0, 0, 0, 0, 1, 0];
    let outcomes = MeasuredOutcomes::from_bits(&bits)?;
    assert_close(corrected_lattice_angle(&graph, &outcomes, 7, 3, theta)?, theta + PI);
    Ok(())
}

#[test]
fn test_missing_outcome_is_ordering_violation() -> Result<(), MbqcError> {
    let graph = Graph::path(3);
    let outcomes = MeasuredOutcomes::from_bits(&[1])?;
    match corrected_lattice_angle(&graph, &outcomes, 2, 1, 0.0) {
        Err(MbqcError::OrderingViolation { vertex, .. }) => assert_eq!(vertex, 1),
        other => panic!("Expected OrderingViolation, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_reshape_flatten_round_trip() -> Result<(), MbqcError> {
    let matrices = [
        vec![vec![1, 2, 3], vec![4, 5, 6]],
        vec![vec![0, 1], vec![1, 0], vec![1, 1]],
        vec![vec![9]],
        vec![vec![-4, 2, 0, 7, 1]],
    ];
    for matrix in matrices {
        let (rows, cols) = (matrix.len(), matrix[0].len());
        assert_eq!(reshape_to_lattice(&flatten_lattice(&matrix), rows, cols)?, matrix);
    }
    Ok(())
}
