use std::fmt::Display;

use anyhow::{Context, Result};
use bincode::{Decode, Encode};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_bounds, StorageError};
use crate::{
    index::{ConcreteIndex, Coordinate},
    iterators::{RowMajorEntries, RowMajorIter, RowMajorIterMut},
};

/// Compressed sparse column storage.
///
/// The nonzeros of column `c` live at `col_offsets[c]..col_offsets[c + 1]` in
/// `row_indices` and `values`, with strictly ascending rows inside a column.
///
/// Deserializing goes through [`CscMatrix::new`], so decoded arrays are validated too.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode)]
#[serde(try_from = "CscParts<T>")]
pub struct CscMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    col_offsets: Vec<usize>,
    row_indices: Vec<ConcreteIndex>,
    values: Vec<T>,
}

/// Unchecked wire form of a [`CscMatrix`], fields in the same order
#[derive(Deserialize, Decode)]
pub(crate) struct CscParts<T> {
    n_rows: usize,
    n_cols: usize,
    col_offsets: Vec<usize>,
    row_indices: Vec<ConcreteIndex>,
    values: Vec<T>,
}

impl<T> TryFrom<CscParts<T>> for CscMatrix<T> {
    type Error = StorageError;

    fn try_from(parts: CscParts<T>) -> Result<Self, Self::Error> {
        CscMatrix::new(
            parts.n_rows,
            parts.n_cols,
            parts.col_offsets,
            parts.row_indices,
            parts.values,
        )
    }
}

impl<T> CscMatrix<T> {
    /// Builds a matrix from raw compressed-column arrays, checking every storage invariant.
    pub fn new(
        n_rows: usize,
        n_cols: usize,
        col_offsets: Vec<usize>,
        row_indices: Vec<ConcreteIndex>,
        values: Vec<T>,
    ) -> Result<Self, StorageError> {
        let matrix = CscMatrix {
            n_rows,
            n_cols,
            col_offsets,
            row_indices,
            values,
        };
        matrix
            .validate()
            .inspect_err(|e| debug!("rejected compressed-column arrays: {e}"))?;
        Ok(matrix)
    }

    /// A matrix without any stored entries
    pub fn zeros(n_rows: usize, n_cols: usize) -> Self {
        CscMatrix {
            n_rows,
            n_cols,
            col_offsets: vec![0; n_cols + 1],
            row_indices: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Generates a matrix from `(row, col, value)` triplets given in any order.
    pub fn from_triplets(
        n_rows: usize,
        n_cols: usize,
        triplets: impl IntoIterator<Item = (ConcreteIndex, ConcreteIndex, T)>,
    ) -> Result<Self> {
        let mut entries: Vec<_> = triplets.into_iter().collect();
        for (row, col, _) in &entries {
            check_bounds(*row, *col, n_rows, n_cols)
                .context("building a compressed-column matrix from triplets")?;
        }

        entries.sort_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));
        if let Some(w) = entries
            .windows(2)
            .find(|w| w[0].0 == w[1].0 && w[0].1 == w[1].1)
        {
            return Err(StorageError::DuplicateEntry(w[0].0, w[0].1).into());
        }

        let mut col_offsets = vec![0; n_cols + 1];
        for (_, col, _) in &entries {
            col_offsets[col + 1] += 1;
        }
        for c in 0..n_cols {
            col_offsets[c + 1] += col_offsets[c];
        }

        let (row_indices, values) = entries.into_iter().map(|(r, _, v)| (r, v)).unzip();

        Ok(CscMatrix {
            n_rows,
            n_cols,
            col_offsets,
            row_indices,
            values,
        })
    }

    /// Assembles already consistent arrays.
    pub(crate) fn from_sorted_parts(
        n_rows: usize,
        n_cols: usize,
        col_offsets: Vec<usize>,
        row_indices: Vec<ConcreteIndex>,
        values: Vec<T>,
    ) -> Self {
        let matrix = CscMatrix {
            n_rows,
            n_cols,
            col_offsets,
            row_indices,
            values,
        };
        debug_assert!(matrix.validate().is_ok());
        matrix
    }

    fn validate(&self) -> Result<(), StorageError> {
        if self.col_offsets.len() != self.n_cols + 1 {
            return Err(StorageError::OffsetLength {
                expected: self.n_cols + 1,
                found: self.col_offsets.len(),
            });
        }
        if self.col_offsets[0] != 0 {
            return Err(StorageError::OffsetStart(self.col_offsets[0]));
        }
        if let Some(c) = self.col_offsets.windows(2).position(|w| w[1] < w[0]) {
            return Err(StorageError::DecreasingOffsets(c));
        }

        let nnz = self.col_offsets[self.n_cols];
        if nnz != self.row_indices.len() || nnz != self.values.len() {
            return Err(StorageError::LengthMismatch {
                offsets: nnz,
                rows: self.row_indices.len(),
                values: self.values.len(),
            });
        }

        for col in 0..self.n_cols {
            let rows = &self.row_indices[self.col_offsets[col]..self.col_offsets[col + 1]];
            if let Some(&row) = rows.iter().find(|&&r| r >= self.n_rows) {
                return Err(StorageError::RowOutOfBounds {
                    row,
                    col,
                    n_rows: self.n_rows,
                });
            }
            if rows.windows(2).any(|w| w[1] <= w[0]) {
                return Err(StorageError::UnsortedColumn(col));
            }
        }
        Ok(())
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn n_nonzero(&self) -> usize {
        self.values.len()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    pub(crate) fn values_mut(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn row_indices(&self) -> &[ConcreteIndex] {
        &self.row_indices
    }

    pub fn col_offsets(&self) -> &[usize] {
        &self.col_offsets
    }

    /// Row indices and values stored for one column
    pub fn column(&self, col: ConcreteIndex) -> Option<(&[ConcreteIndex], &[T])> {
        let start = *self.col_offsets.get(col)?;
        let end = *self.col_offsets.get(col + 1)?;
        Some((&self.row_indices[start..end], &self.values[start..end]))
    }

    /// Storage offset of the entry at `(row, col)`, if it is stored.
    ///
    /// Rows are ascending inside a column, so the scan stops at the first row past `row`.
    pub fn offset_in_column(&self, col: ConcreteIndex, row: ConcreteIndex) -> Option<usize> {
        let start = *self.col_offsets.get(col)?;
        let end = *self.col_offsets.get(col + 1)?;
        self.row_indices[start..end]
            .iter()
            .take_while(|&&r| r <= row)
            .position(|&r| r == row)
            .map(|ind| start + ind)
    }

    pub fn get(&self, row: ConcreteIndex, col: ConcreteIndex) -> Option<&T> {
        self.offset_in_column(col, row)
            .and_then(|offset| self.values.get(offset))
    }

    /// Calculates how dense the matrix is, i.e. the ratio of stored entries to cells
    pub fn density(&self) -> f64 {
        let size = self.n_rows as f64 * self.n_cols as f64;
        if size == 0.0 {
            return 0.0;
        }
        self.n_nonzero() as f64 / size
    }

    /// Iterator positioned on the `rank`-th nonzero in row-major order
    pub fn row_iter_at_rank(&self, rank: usize) -> RowMajorIter<'_, T> {
        RowMajorIter::at_rank(self, rank)
    }

    /// Iterator positioned on the first nonzero at or after `(row, col)` in row-major order
    pub fn row_iter_at(&self, row: ConcreteIndex, col: ConcreteIndex) -> RowMajorIter<'_, T> {
        RowMajorIter::at(self, row, col)
    }

    pub fn row_begin(&self) -> RowMajorIter<'_, T> {
        RowMajorIter::begin(self)
    }

    pub fn row_end(&self) -> RowMajorIter<'_, T> {
        RowMajorIter::end(self)
    }

    pub fn row_iter_mut_at_rank(&mut self, rank: usize) -> RowMajorIterMut<'_, T> {
        RowMajorIterMut::at_rank(self, rank)
    }

    pub fn row_iter_mut_at(
        &mut self,
        row: ConcreteIndex,
        col: ConcreteIndex,
    ) -> RowMajorIterMut<'_, T> {
        RowMajorIterMut::at(self, row, col)
    }

    /// All nonzeros in row-major order, as `(coordinate, value)`
    pub fn iter_row_major(&self) -> RowMajorEntries<'_, T> {
        RowMajorEntries::new(self)
    }

    /// All nonzeros in storage (column-major) order
    pub fn iter_storage(&self) -> impl Iterator<Item = (Coordinate, &T)> + '_ {
        (0..self.n_cols).flat_map(move |col| {
            let range = self.col_offsets[col]..self.col_offsets[col + 1];
            self.row_indices[range.clone()]
                .iter()
                .zip(&self.values[range])
                .map(move |(&row, v)| (Coordinate::new(row, col), v))
        })
    }
}

impl<T> Display for CscMatrix<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        for (i, v) in self.iter_row_major() {
            s.push_str(&format!("{}: {}\n", i, v));
        }
        write!(f, "{}", s)
    }
}
