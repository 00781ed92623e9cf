//! Tabular Signal Data

use ndarray::{s, Array2};
use thiserror::Error;

/// Errors building a table
#[derive(Debug, Error)]
pub enum TableError {
    /// A row's cell count does not match the column count
    #[error("row {row} has {got} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },

    /// Matrix shape mismatch
    #[error("table shape mismatch: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// One file's samples: named columns over a rectangular cell matrix.
///
/// A cell is either a real value (`Some`) or missing (`None`). Missing
/// cells are excluded from flattening, so every aggregate downstream sees
/// only present values.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Column names as declared by the source header
    columns: Vec<String>,
    /// Cell matrix, row-major
    cells: Array2<Option<f64>>,
}

impl Table {
    /// Build a table from a header and row-wise cells
    pub fn from_rows(
        columns: Vec<String>,
        rows: Vec<Vec<Option<f64>>>,
    ) -> Result<Self, TableError> {
        let n_cols = columns.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(TableError::RaggedRow {
                    row: i,
                    got: row.len(),
                    expected: n_cols,
                });
            }
        }

        let n_rows = rows.len();
        let flat: Vec<Option<f64>> = rows.into_iter().flatten().collect();
        let cells = Array2::from_shape_vec((n_rows, n_cols), flat)?;

        Ok(Self { columns, cells })
    }

    /// Column names
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.cells.nrows()
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.cells.ncols()
    }

    /// Row-major flattening of all present cells
    pub fn flatten(&self) -> Vec<f64> {
        self.cells.iter().filter_map(|c| *c).collect()
    }

    /// Row-major flattening of the present cells in rows `[start, end)`
    ///
    /// Panics if the range exceeds the row count.
    pub fn flatten_rows(&self, start: usize, end: usize) -> Vec<f64> {
        self.cells
            .slice(s![start..end, ..])
            .iter()
            .filter_map(|c| *c)
            .collect()
    }

    /// Present cells of a single row, in column order
    pub fn row_values(&self, row: usize) -> impl Iterator<Item = f64> + '_ {
        self.cells.row(row).into_iter().filter_map(|c| *c)
    }
}
