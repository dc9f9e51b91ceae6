//! Binary intersection grid behind the bridge matrix.

use serde::{Serialize, Serializer};

use crate::config::check_axes;
use crate::error::ConfigError;
use crate::types::ActiveSet;

/// Row-major grid of `0.0`/`1.0` values. Immutable once generated.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    rows: u32,
    cols: u32,
    values: Vec<f64>,
}

/// Build the grid marking every (active row, active column) intersection.
///
/// A cell is `1.0` exactly when its row is in `active_rows` and its column is
/// in `active_cols`. Fails if either dimension is zero or an active index is
/// out of bounds.
pub fn generate(
    rows: u32,
    cols: u32,
    active_rows: &ActiveSet,
    active_cols: &ActiveSet,
) -> Result<Grid, ConfigError> {
    check_axes(rows, cols, active_rows, active_cols)?;

    let mut values = Vec::with_capacity(rows as usize * cols as usize);
    for r in 0..rows {
        let row_active = active_rows.contains(r);
        for c in 0..cols {
            let hit = row_active && active_cols.contains(c);
            values.push(if hit { 1.0 } else { 0.0 });
        }
    }

    Ok(Grid { rows, cols, values })
}

impl Grid {
    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Value at (row, col), or None outside the grid.
    pub fn get(&self, row: u32, col: u32) -> Option<f64> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.values
            .get(row as usize * self.cols as usize + col as usize)
            .copied()
    }

    /// One row as a slice.
    pub fn row(&self, row: u32) -> Option<&[f64]> {
        if row >= self.rows {
            return None;
        }
        let start = row as usize * self.cols as usize;
        self.values.get(start..start + self.cols as usize)
    }

    /// All cells as `(row, col, value)` in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (u32, u32, f64)> + '_ {
        let cols = self.cols;
        (0..self.rows)
            .flat_map(move |r| (0..cols).map(move |c| (r, c)))
            .zip(self.values.iter().copied())
            .map(|((r, c), v)| (r, c, v))
    }

    /// Number of cells with a positive value.
    pub fn hit_count(&self) -> usize {
        self.values.iter().filter(|&&v| v > 0.0).count()
    }

    /// Nested rows, for JSON output.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.rows)
            .filter_map(|r| self.row(r).map(<[f64]>::to_vec))
            .collect()
    }
}

impl Serialize for Grid {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct GridJson {
            rows: u32,
            cols: u32,
            values: Vec<Vec<f64>>,
        }

        GridJson {
            rows: self.rows,
            cols: self.cols,
            values: self.to_rows(),
        }
        .serialize(serializer)
    }
}
