//! Backing storage for sparse matrices
//!
//! - `csc`: compressed-column storage, column-major by construction
//! - `map`: an ordered map from column-major [`LinearIndex`](crate::index::LinearIndex) to value
//!
//! Both types only expose what the traversal layer needs to read, plus enough
//! construction and mutation to build them. Structural edits invalidate any
//! live iterator, which the borrow checker enforces.

use thiserror::Error;

use crate::index::ConcreteIndex;

mod bincode;
pub mod csc;
pub mod map;

pub use csc::CscMatrix;
pub use map::MapMatrix;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    #[error("Column offsets have length {found}, expected {expected}")]
    OffsetLength { expected: usize, found: usize },
    #[error("First column offset must be zero, got {0}")]
    OffsetStart(usize),
    #[error("Column offsets decrease at column {0}")]
    DecreasingOffsets(usize),
    #[error("Storage lengths disagree: {offsets} nonzeros in offsets, {rows} row indices, {values} values")]
    LengthMismatch {
        offsets: usize,
        rows: usize,
        values: usize,
    },
    #[error("Row {row} in column {col} exceeds the {n_rows} rows of the matrix")]
    RowOutOfBounds {
        row: ConcreteIndex,
        col: ConcreteIndex,
        n_rows: usize,
    },
    #[error("Rows of column {0} are not strictly ascending")]
    UnsortedColumn(ConcreteIndex),
    #[error("Coordinate ({row}, {col}) is outside a {n_rows}x{n_cols} matrix")]
    IndexOutOfBounds {
        row: ConcreteIndex,
        col: ConcreteIndex,
        n_rows: usize,
        n_cols: usize,
    },
    #[error("Coordinate ({0}, {1}) given more than once")]
    DuplicateEntry(ConcreteIndex, ConcreteIndex),
    #[error("A {n_rows}x{n_cols} matrix has more cells than a linear index can address")]
    ShapeTooLarge { n_rows: usize, n_cols: usize },
    #[error("Key {key} is past the {cells} cells of the matrix")]
    KeyOutOfBounds { key: usize, cells: usize },
}

/// Number of cells of an `n_rows` by `n_cols` matrix, if every cell has a distinct linear index.
pub(crate) fn check_shape(n_rows: usize, n_cols: usize) -> Result<usize, StorageError> {
    n_rows
        .checked_mul(n_cols)
        .ok_or(StorageError::ShapeTooLarge { n_rows, n_cols })
}

pub(crate) fn check_bounds(
    row: ConcreteIndex,
    col: ConcreteIndex,
    n_rows: usize,
    n_cols: usize,
) -> Result<(), StorageError> {
    if row >= n_rows || col >= n_cols {
        return Err(StorageError::IndexOutOfBounds {
            row,
            col,
            n_rows,
            n_cols,
        });
    }
    Ok(())
}
