//! LatinSquare: the k x k symbol matrix behind every schedule.
//!
//! Squares are only ever built by [`crate::generator`], which guarantees the
//! Latin property by construction. There is no public
//! constructor from arbitrary rows.

use std::fmt;
use std::ops::Index;

use serde::Serialize;

/// A k x k matrix over the symbols `0..k`.
///
/// Every row and every column holds each symbol exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LatinSquare {
    /// Square dimension
    k: usize,
    /// cells[row][col] = symbol in 0..k
    cells: Vec<Vec<usize>>,
}

impl LatinSquare {
    pub(crate) fn from_rows(k: usize, cells: Vec<Vec<usize>>) -> Self {
        debug_assert_eq!(cells.len(), k);
        Self { k, cells }
    }

    /// Get the square dimension.
    pub fn size(&self) -> usize {
        self.k
    }

    /// Get the rows of the square.
    pub fn rows(&self) -> &[Vec<usize>] {
        &self.cells
    }

    /// Get a single row.
    pub fn row(&self, row: usize) -> Option<&[usize]> {
        self.cells.get(row).map(Vec::as_slice)
    }

    /// Iterate over the symbols of a column, top to bottom.
    pub fn column(&self, col: usize) -> impl Iterator<Item = usize> + '_ {
        self.cells
            .iter()
            .filter_map(move |row| row.get(col).copied())
    }

    /// Get the symbol at (row, col), if in range.
    pub fn get(&self, row: usize, col: usize) -> Option<usize> {
        self.cells.get(row).and_then(|r| r.get(col)).copied()
    }

    /// Consume the square, returning its rows.
    pub fn into_rows(self) -> Vec<Vec<usize>> {
        self.cells
    }
}

impl Index<(usize, usize)> for LatinSquare {
    type Output = usize;

    fn index(&self, (row, col): (usize, usize)) -> &usize {
        &self.cells[row][col]
    }
}

impl fmt::Display for LatinSquare {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Latin Square {}x{}", self.k, self.k)?;
        let width = self.k.saturating_sub(1).to_string().len();
        for (i, row) in self.cells.iter().enumerate() {
            write!(f, "  Row {}:", i)?;
            for cell in row {
                write!(f, " {:>width$}", cell, width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
