//! Row-major traversal of compressed-column storage
//!
//! Compressed-column storage has no per-row index, so every step searches:
//! moving to the next column, wrapping to the next row after the last one,
//! and probing each column for an entry in the current row. The probe only
//! scans a column while its rows are not past the current row.

use std::iter::FusedIterator;

use delegate::delegate;
use log::trace;

use super::traits::{same_element, CoordinateProvider, SparseCursor, StorageIdentity, StorageKind};
use crate::{
    index::{ConcreteIndex, Coordinate},
    proxy::CscValProxy,
    storage::CscMatrix,
};

/// Position shared by the read and write row-major iterators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RowCursor {
    row: ConcreteIndex,
    col: ConcreteIndex,
    /// rank in row-major order
    pos: usize,
    /// offset into `values` and `row_indices`
    offset: usize,
}

impl RowCursor {
    fn end<T>(matrix: &CscMatrix<T>) -> Self {
        RowCursor {
            row: matrix.n_rows(),
            col: 0,
            pos: matrix.n_nonzero(),
            offset: matrix.n_nonzero(),
        }
    }

    /// Sweeps rows top to bottom, and within each row every column, counting hits until `rank`.
    fn at_rank<T>(matrix: &CscMatrix<T>, rank: usize) -> Self {
        if rank >= matrix.n_nonzero() {
            return Self::end(matrix);
        }

        let mut seen = 0;
        for row in 0..matrix.n_rows() {
            for col in 0..matrix.n_cols() {
                if let Some(offset) = matrix.offset_in_column(col, row) {
                    if seen == rank {
                        trace!("row-major rank {rank} found at ({row}, {col})");
                        return RowCursor {
                            row,
                            col,
                            pos: rank,
                            offset,
                        };
                    }
                    seen += 1;
                }
            }
        }
        Self::end(matrix)
    }

    /// First entry at or after `(row, col)` in row-major order
    fn lower_bound<T>(matrix: &CscMatrix<T>, row: ConcreteIndex, col: ConcreteIndex) -> Self {
        let mut cursor = Self::at_rank(matrix, 0);
        let mut steps = 0;
        while !cursor.is_end(matrix) && (cursor.row, cursor.col) < (row, col) {
            cursor.advance(matrix);
            steps += 1;
        }
        trace!("row-major seek to ({row}, {col}) took {steps} steps");
        cursor
    }

    fn is_end<T>(&self, matrix: &CscMatrix<T>) -> bool {
        self.pos >= matrix.n_nonzero()
    }

    fn advance<T>(&mut self, matrix: &CscMatrix<T>) {
        debug_assert!(
            !self.is_end(matrix),
            "advanced a row-major iterator past its end"
        );
        if self.is_end(matrix) {
            return;
        }

        self.pos += 1;
        if self.pos == matrix.n_nonzero() {
            *self = Self::end(matrix);
            return;
        }

        let (mut row, mut col) = (self.row, self.col);
        loop {
            col += 1;
            if col == matrix.n_cols() {
                col = 0;
                row += 1;
                if row == matrix.n_rows() {
                    break;
                }
            }

            if let Some(offset) = matrix.offset_in_column(col, row) {
                self.row = row;
                self.col = col;
                self.offset = offset;
                return;
            }
        }
        // only reachable if the storage invariants are broken
        *self = Self::end(matrix);
    }

    fn retreat<T>(&mut self, matrix: &CscMatrix<T>) {
        debug_assert!(
            self.pos > 0,
            "retreated a row-major iterator before its first element"
        );
        if self.pos == 0 {
            return;
        }

        self.pos -= 1;
        let (mut row, mut col) = (self.row, self.col);
        loop {
            if col == 0 {
                if row == 0 {
                    break;
                }
                col = matrix.n_cols() - 1;
                row -= 1;
            } else {
                col -= 1;
            }

            if let Some(offset) = matrix.offset_in_column(col, row) {
                self.row = row;
                self.col = col;
                self.offset = offset;
                return;
            }
        }
        *self = Self::at_rank(matrix, self.pos);
    }
}

/// Read-only cursor over the nonzeros of a [`CscMatrix`] in row-major order.
///
/// Past the end it sits at row `n_rows`, column `0`.
#[derive(Debug)]
pub struct RowMajorIter<'a, T> {
    matrix: &'a CscMatrix<T>,
    cursor: RowCursor,
}

impl<T> Clone for RowMajorIter<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for RowMajorIter<'_, T> {}

impl<'a, T> RowMajorIter<'a, T> {
    /// Positions the iterator on the `rank`-th nonzero, counted in row-major order.
    ///
    /// Costs a sweep over the rows up to the target. Ranks past the last nonzero give the end.
    pub fn at_rank(matrix: &'a CscMatrix<T>, rank: usize) -> Self {
        RowMajorIter {
            matrix,
            cursor: RowCursor::at_rank(matrix, rank),
        }
    }

    /// Positions the iterator on the first nonzero whose coordinate is not before `(row, col)`.
    pub fn at(matrix: &'a CscMatrix<T>, row: ConcreteIndex, col: ConcreteIndex) -> Self {
        RowMajorIter {
            matrix,
            cursor: RowCursor::lower_bound(matrix, row, col),
        }
    }

    pub fn begin(matrix: &'a CscMatrix<T>) -> Self {
        Self::at_rank(matrix, 0)
    }

    pub fn end(matrix: &'a CscMatrix<T>) -> Self {
        RowMajorIter {
            matrix,
            cursor: RowCursor::end(matrix),
        }
    }

    pub fn matrix(&self) -> &'a CscMatrix<T> {
        self.matrix
    }

    /// Offset of the current element in the storage arrays, `n_nonzero` past the end
    pub fn offset(&self) -> usize {
        self.cursor.offset
    }

    /// The current value, borrowed for as long as the matrix
    pub fn get(&self) -> Option<&'a T> {
        if self.cursor.is_end(self.matrix) {
            return None;
        }
        self.matrix.values().get(self.cursor.offset)
    }

    /// Steps forward, returning the position before the step
    pub fn post_advance(&mut self) -> Self {
        let before = *self;
        self.advance();
        before
    }

    /// Steps backward, returning the position before the step
    pub fn post_retreat(&mut self) -> Self {
        let before = *self;
        self.retreat();
        before
    }
}

impl<T> CoordinateProvider for RowMajorIter<'_, T> {
    fn row(&self) -> ConcreteIndex {
        self.cursor.row
    }

    fn col(&self) -> ConcreteIndex {
        self.cursor.col
    }

    fn storage_identity(&self) -> Option<StorageIdentity> {
        Some(StorageIdentity::of(
            StorageKind::Compressed,
            self.matrix,
            Some(self.cursor.offset),
        ))
    }
}

impl<T> SparseCursor for RowMajorIter<'_, T> {
    type Value<'v>
        = &'v T
    where
        Self: 'v;

    fn pos(&self) -> usize {
        self.cursor.pos
    }

    fn is_end(&self) -> bool {
        self.cursor.is_end(self.matrix)
    }

    fn value(&self) -> Option<&T> {
        self.get()
    }

    fn advance(&mut self) -> &mut Self {
        self.cursor.advance(self.matrix);
        self
    }

    fn retreat(&mut self) -> &mut Self {
        self.cursor.retreat(self.matrix);
        self
    }
}

impl<T, O: CoordinateProvider> PartialEq<O> for RowMajorIter<'_, T> {
    fn eq(&self, other: &O) -> bool {
        same_element(self, other)
    }
}

/// Row-major cursor that can write through to the matrix.
///
/// Holds the matrix exclusively, so no structural change can happen while it lives.
#[derive(Debug)]
pub struct RowMajorIterMut<'a, T> {
    matrix: &'a mut CscMatrix<T>,
    cursor: RowCursor,
}

impl<'a, T> RowMajorIterMut<'a, T> {
    pub fn at_rank(matrix: &'a mut CscMatrix<T>, rank: usize) -> Self {
        let cursor = RowCursor::at_rank(matrix, rank);
        RowMajorIterMut { matrix, cursor }
    }

    pub fn at(matrix: &'a mut CscMatrix<T>, row: ConcreteIndex, col: ConcreteIndex) -> Self {
        let cursor = RowCursor::lower_bound(matrix, row, col);
        RowMajorIterMut { matrix, cursor }
    }

    pub fn begin(matrix: &'a mut CscMatrix<T>) -> Self {
        Self::at_rank(matrix, 0)
    }

    pub fn end(matrix: &'a mut CscMatrix<T>) -> Self {
        let cursor = RowCursor::end(matrix);
        RowMajorIterMut { matrix, cursor }
    }

    /// Read-only view of the current position
    pub fn as_const(&self) -> RowMajorIter<'_, T> {
        RowMajorIter {
            matrix: &*self.matrix,
            cursor: self.cursor,
        }
    }

    /// Handle that writes the current element in place, `None` past the end
    pub fn proxy(&mut self) -> Option<CscValProxy<'_, T>> {
        if self.cursor.is_end(&*self.matrix) {
            return None;
        }
        Some(CscValProxy::new(
            self.cursor.row,
            self.cursor.col,
            &mut *self.matrix,
            self.cursor.offset,
        ))
    }

    delegate! {
        to self.as_const() {
            pub fn offset(&self) -> usize;
        }
    }
}

impl<T> CoordinateProvider for RowMajorIterMut<'_, T> {
    delegate! {
        to self.as_const() {
            fn row(&self) -> ConcreteIndex;
            fn col(&self) -> ConcreteIndex;
            fn storage_identity(&self) -> Option<StorageIdentity>;
        }
    }
}

impl<T> SparseCursor for RowMajorIterMut<'_, T> {
    type Value<'v>
        = &'v T
    where
        Self: 'v;

    fn pos(&self) -> usize {
        self.cursor.pos
    }

    fn is_end(&self) -> bool {
        self.cursor.is_end(&*self.matrix)
    }

    fn value(&self) -> Option<&T> {
        if self.is_end() {
            return None;
        }
        self.matrix.values().get(self.cursor.offset)
    }

    fn advance(&mut self) -> &mut Self {
        self.cursor.advance(&*self.matrix);
        self
    }

    fn retreat(&mut self) -> &mut Self {
        self.cursor.retreat(&*self.matrix);
        self
    }
}

impl<T, O: CoordinateProvider> PartialEq<O> for RowMajorIterMut<'_, T> {
    fn eq(&self, other: &O) -> bool {
        same_element(self, other)
    }
}

/// Iterator over all the nonzeros of a compressed-column matrix in row-major order
///
/// Returns the coordinate and the element at that coordinate, from either end.
#[derive(Debug)]
pub struct RowMajorEntries<'a, T> {
    front: RowMajorIter<'a, T>,
    back: RowMajorIter<'a, T>,
}

impl<T> Clone for RowMajorEntries<'_, T> {
    fn clone(&self) -> Self {
        RowMajorEntries {
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> RowMajorEntries<'a, T> {
    pub fn new(matrix: &'a CscMatrix<T>) -> Self {
        RowMajorEntries {
            front: RowMajorIter::begin(matrix),
            back: RowMajorIter::end(matrix),
        }
    }

    /// Entries from `front` up to, not including, `back`
    pub fn between(front: RowMajorIter<'a, T>, back: RowMajorIter<'a, T>) -> Self {
        RowMajorEntries { front, back }
    }
}

impl<'a, T> Iterator for RowMajorEntries<'a, T> {
    type Item = (Coordinate, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        if self.front.pos() >= self.back.pos() {
            return None;
        }
        let value = self.front.get()?;
        let coordinate = self.front.coordinate();
        self.front.advance();
        Some((coordinate, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back.pos().saturating_sub(self.front.pos());
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for RowMajorEntries<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front.pos() >= self.back.pos() {
            return None;
        }
        self.back.retreat();
        Some((self.back.coordinate(), self.back.get()?))
    }
}

impl<T> ExactSizeIterator for RowMajorEntries<'_, T> {}

impl<T> FusedIterator for RowMajorEntries<'_, T> {}
