//! Traits shared by every sparse iterator
//!
//! Generic sparse algorithms only see [`CoordinateProvider`] and [`SparseCursor`],
//! so they can walk and compare iterators without knowing the storage behind them.

use crate::index::{ConcreteIndex, Coordinate};

/// Which storage layout an iterator walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageKind {
    /// [`CscMatrix`](crate::storage::CscMatrix)
    Compressed,
    /// [`MapMatrix`](crate::storage::MapMatrix)
    Map,
}

/// Identifies a position inside one particular storage instance.
///
/// Two identities are only comparable when `kind` and `owner` agree; `slot`
/// then pins down the element (a storage offset or a map key, `None` past the end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StorageIdentity {
    pub kind: StorageKind,
    /// Address of the owning matrix
    pub owner: usize,
    pub slot: Option<usize>,
}

impl StorageIdentity {
    pub fn of<M>(kind: StorageKind, owner: &M, slot: Option<usize>) -> Self {
        StorageIdentity {
            kind,
            owner: owner as *const M as usize,
            slot,
        }
    }

    pub fn same_owner(&self, other: &Self) -> bool {
        self.kind == other.kind && self.owner == other.owner
    }
}

/// Anything that sits at a `(row, col)` position of a matrix.
pub trait CoordinateProvider {
    /// Row of the current position, `n_rows` past the end
    fn row(&self) -> ConcreteIndex;

    /// Column of the current position. Past the end this depends on the storage.
    fn col(&self) -> ConcreteIndex;

    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.row(), self.col())
    }

    /// Fast identity used when both sides walk the same storage instance.
    fn storage_identity(&self) -> Option<StorageIdentity> {
        None
    }
}

/// A bidirectional cursor over the nonzero entries of a sparse matrix.
///
/// Stepping forward from the end, or backward from the first element, breaks
/// the contract: it trips a debug assertion and is otherwise ignored.
pub trait SparseCursor: CoordinateProvider {
    type Value<'v>
    where
        Self: 'v;

    /// Rank of the current element in the traversal order, the stored count past the end
    fn pos(&self) -> usize;

    fn is_end(&self) -> bool;

    /// The current element, `None` past the end
    fn value(&self) -> Option<Self::Value<'_>>;

    fn advance(&mut self) -> &mut Self;

    fn retreat(&mut self) -> &mut Self;
}

/// Compares two positions, possibly from different storage formats.
///
/// Positions in the same storage instance compare by identity, all others by coordinate.
pub fn same_element<A, B>(a: &A, b: &B) -> bool
where
    A: CoordinateProvider + ?Sized,
    B: CoordinateProvider + ?Sized,
{
    match (a.storage_identity(), b.storage_identity()) {
        (Some(x), Some(y)) if x.same_owner(&y) => x.slot == y.slot,
        _ => a.coordinate() == b.coordinate(),
    }
}

impl CoordinateProvider for Coordinate {
    fn row(&self) -> ConcreteIndex {
        self.row
    }

    fn col(&self) -> ConcreteIndex {
        self.col
    }
}

impl CoordinateProvider for (ConcreteIndex, ConcreteIndex) {
    fn row(&self) -> ConcreteIndex {
        self.0
    }

    fn col(&self) -> ConcreteIndex {
        self.1
    }
}
