use std::cmp::Ordering;

use bincode::Decode;
use bincode::Encode;
use derive_more::Add;
use derive_more::AddAssign;
use derive_more::Display;
use derive_more::From;
use derive_more::Into;
use derive_more::Sub;
use derive_more::SubAssign;

use serde::{Deserialize, Serialize};

/// A concrete row or column index into a matrix
pub type ConcreteIndex = usize;

/// Column-major linear index of a matrix cell, `row + col * n_rows`.
///
/// This is the key under which [`MapMatrix`](crate::storage::map::MapMatrix) stores its entries,
/// so the natural ordering of keys is column-major coordinate order.
#[derive(
    Debug,
    Copy,
    Clone,
    Default,
    Ord,
    PartialOrd,
    Eq,
    PartialEq,
    Hash,
    Serialize,
    Deserialize,
    From,
    Into,
    Display,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Encode,
    Decode,
)]
#[display(fmt = "{}", index)]
pub struct LinearIndex {
    index: usize,
}

impl LinearIndex {
    /// Encodes `(row, col)` for a matrix with `n_rows` rows.
    ///
    /// Saturates instead of overflowing, so absurd coordinates map past every stored key.
    pub fn encode(row: ConcreteIndex, col: ConcreteIndex, n_rows: usize) -> Self {
        LinearIndex {
            index: col.saturating_mul(n_rows).saturating_add(row),
        }
    }

    /// Decodes the key back into a coordinate.
    ///
    /// A matrix without rows cannot hold entries; every key decodes to `(index, 0)` there.
    pub fn decode(self, n_rows: usize) -> Coordinate {
        if n_rows == 0 {
            return Coordinate::new(self.index, 0);
        }
        Coordinate::new(self.index % n_rows, self.index / n_rows)
    }
}

/// A `(row, col)` pair, as reported by every sparse iterator.
#[derive(
    Debug, Copy, Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize, Encode, Decode,
)]
pub struct Coordinate {
    pub row: ConcreteIndex,
    pub col: ConcreteIndex,
}

impl Coordinate {
    pub fn new(row: ConcreteIndex, col: ConcreteIndex) -> Self {
        Coordinate { row, col }
    }

    /// Compares by row first, then by column.
    pub fn cmp_row_major(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }

    /// Compares by column first, then by row.
    pub fn cmp_col_major(&self, other: &Self) -> Ordering {
        self.col.cmp(&other.col).then(self.row.cmp(&other.row))
    }
}

impl From<(ConcreteIndex, ConcreteIndex)> for Coordinate {
    fn from((row, col): (ConcreteIndex, ConcreteIndex)) -> Self {
        Coordinate { row, col }
    }
}

impl From<Coordinate> for (ConcreteIndex, ConcreteIndex) {
    fn from(value: Coordinate) -> Self {
        (value.row, value.col)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
