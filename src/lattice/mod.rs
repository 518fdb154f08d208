// src/lattice/mod.rs

//! Maps flat per-vertex values onto the row/column layout of a lattice
//! (`row = v % rows`, `col = v / rows`) for reporting.

use crate::core::{MbqcError, Result};
use std::fmt;

/// Reshapes `values` (indexed by vertex) into `num_rows` rows of `num_cols` entries.
///
/// # Errors
/// `SizeMismatch` if `values.len() != num_rows * num_cols`.
pub fn reshape_to_lattice<T: Copy>(values: &[T], num_rows: usize, num_cols: usize) -> Result<Vec<Vec<T>>> {
    let expected = num_rows * num_cols;
    if values.len() != expected {
        return Err(MbqcError::SizeMismatch {
            expected,
            found: values.len(),
            message: format!("Cannot reshape into a {}x{} lattice", num_rows, num_cols),
        });
    }
    Ok((0..num_rows)
        .map(|row| (0..num_cols).map(|col| values[col * num_rows + row]).collect())
        .collect())
}

/// Inverse of [`reshape_to_lattice`]: reads the grid back column by column.
/// Rows are expected to share one length; a ragged grid is flattened up to
/// its shortest row.
pub fn flatten_lattice<T: Copy>(lattice: &[Vec<T>]) -> Vec<T> {
    let num_cols = lattice.iter().map(Vec::len).min().unwrap_or(0);
    (0..num_cols)
        .flat_map(move |col| lattice.iter().map(move |row| row[col]))
        .collect()
}

/// Text rendering of a reshaped lattice, one line per row.
pub struct LatticeDisplay<'a, T>(pub &'a [Vec<T>]);

impl<T: fmt::Display> fmt::Display for LatticeDisplay<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0 {
            let cells: Vec<String> = row.iter().map(|value| value.to_string()).collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}
