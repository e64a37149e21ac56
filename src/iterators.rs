//! Iterators for sparse matrices
//!
//! This module provides the traversal layer, organized as:
//!
//! - `traits`: the coordinate and cursor traits every iterator implements, and the
//!   comparison rule shared between them
//! - `row_major`: row-major cursors over compressed-column storage
//! - `map_order`: natural-order cursors over map-backed storage
//!
//! Cursors are bidirectional and compare with `==` against any other cursor,
//! whatever storage it walks. Each family also has a std [`Iterator`] adapter
//! ([`RowMajorEntries`], [`MapEntries`]) built from a pair of cursors.

mod map_order;
mod row_major;
mod traits;

#[cfg(test)]
mod tests;

pub use map_order::{MapEntries, MapOrderIter, MapOrderIterMut};
pub use row_major::{RowMajorEntries, RowMajorIter, RowMajorIterMut};
pub use traits::{same_element, CoordinateProvider, SparseCursor, StorageIdentity, StorageKind};
