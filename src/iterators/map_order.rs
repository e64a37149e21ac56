//! Natural-order traversal of map-backed storage
//!
//! Map keys are column-major linear indices, so the map's own ordering is the
//! traversal order and stepping needs no search.

use std::iter::FusedIterator;
use std::ops::Bound::{Excluded, Unbounded};

use delegate::delegate;
use log::trace;

use super::traits::{same_element, CoordinateProvider, SparseCursor, StorageIdentity, StorageKind};
use crate::{
    index::{ConcreteIndex, Coordinate, LinearIndex},
    proxy::MapValProxy,
    storage::MapMatrix,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct MapCursor {
    /// `None` past the end
    key: Option<LinearIndex>,
    pos: usize,
}

impl MapCursor {
    fn begin<T>(matrix: &MapMatrix<T>) -> Self {
        MapCursor {
            key: matrix.elements.keys().next().copied(),
            pos: 0,
        }
    }

    fn end<T>(matrix: &MapMatrix<T>) -> Self {
        MapCursor {
            key: None,
            pos: matrix.n_nonzero(),
        }
    }

    /// First stored entry at or after `(row, col)` in column-major order.
    ///
    /// Rows at or past `n_rows` all sort after the last row of the column, so the row is clamped
    /// before encoding.
    fn lower_bound<T>(matrix: &MapMatrix<T>, row: ConcreteIndex, col: ConcreteIndex) -> Self {
        let target = matrix.encode(row.min(matrix.n_rows()), col);
        let key = matrix.elements.range(target..).next().map(|(k, _)| *k);
        let pos = match key {
            Some(k) => matrix.elements.range(..k).count(),
            None => matrix.n_nonzero(),
        };
        trace!("map seek to ({row}, {col}) landed on rank {pos}");
        MapCursor { key, pos }
    }

    fn advance<T>(&mut self, matrix: &MapMatrix<T>) {
        debug_assert!(self.key.is_some(), "advanced a map iterator past its end");
        let Some(key) = self.key else {
            return;
        };
        self.key = matrix
            .elements
            .range((Excluded(key), Unbounded))
            .next()
            .map(|(k, _)| *k);
        self.pos += 1;
    }

    fn retreat<T>(&mut self, matrix: &MapMatrix<T>) {
        debug_assert!(
            self.pos > 0,
            "retreated a map iterator before its first element"
        );
        let previous = match self.key {
            None => matrix.elements.keys().next_back(),
            Some(key) => matrix.elements.range(..key).next_back().map(|(k, _)| k),
        };
        if let Some(previous) = previous {
            self.key = Some(*previous);
            self.pos = self.pos.saturating_sub(1);
        }
    }

    fn row<T>(&self, matrix: &MapMatrix<T>) -> ConcreteIndex {
        match self.key {
            Some(key) => matrix.decode(key).row,
            None => matrix.n_rows(),
        }
    }

    fn col<T>(&self, matrix: &MapMatrix<T>) -> ConcreteIndex {
        match self.key {
            Some(key) => matrix.decode(key).col,
            None => matrix.n_cols(),
        }
    }

    fn identity<T>(&self, matrix: &MapMatrix<T>) -> StorageIdentity {
        StorageIdentity::of(StorageKind::Map, matrix, self.key.map(usize::from))
    }
}

/// Read-only cursor over a [`MapMatrix`] in key (column-major) order.
///
/// Past the end it reports row `n_rows` and column `n_cols`.
#[derive(Debug)]
pub struct MapOrderIter<'a, T> {
    matrix: &'a MapMatrix<T>,
    cursor: MapCursor,
}

impl<T> Clone for MapOrderIter<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for MapOrderIter<'_, T> {}

impl<'a, T> MapOrderIter<'a, T> {
    pub fn begin(matrix: &'a MapMatrix<T>) -> Self {
        MapOrderIter {
            matrix,
            cursor: MapCursor::begin(matrix),
        }
    }

    pub fn end(matrix: &'a MapMatrix<T>) -> Self {
        MapOrderIter {
            matrix,
            cursor: MapCursor::end(matrix),
        }
    }

    /// Positions the iterator on the first stored coordinate not before `(row, col)`,
    /// comparing column first.
    pub fn at(matrix: &'a MapMatrix<T>, row: ConcreteIndex, col: ConcreteIndex) -> Self {
        MapOrderIter {
            matrix,
            cursor: MapCursor::lower_bound(matrix, row, col),
        }
    }

    pub fn matrix(&self) -> &'a MapMatrix<T> {
        self.matrix
    }

    /// Key of the current entry, `None` past the end
    pub fn key(&self) -> Option<LinearIndex> {
        self.cursor.key
    }

    pub fn get(&self) -> Option<&'a T> {
        self.matrix.get_linear(self.cursor.key?)
    }

    pub fn post_advance(&mut self) -> Self {
        let before = *self;
        self.advance();
        before
    }

    pub fn post_retreat(&mut self) -> Self {
        let before = *self;
        self.retreat();
        before
    }
}

impl<T> CoordinateProvider for MapOrderIter<'_, T> {
    fn row(&self) -> ConcreteIndex {
        self.cursor.row(self.matrix)
    }

    fn col(&self) -> ConcreteIndex {
        self.cursor.col(self.matrix)
    }

    fn storage_identity(&self) -> Option<StorageIdentity> {
        Some(self.cursor.identity(self.matrix))
    }
}

impl<T> SparseCursor for MapOrderIter<'_, T> {
    type Value<'v>
        = &'v T
    where
        Self: 'v;

    fn pos(&self) -> usize {
        self.cursor.pos
    }

    fn is_end(&self) -> bool {
        self.cursor.key.is_none()
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

impl<T, O: CoordinateProvider> PartialEq<O> for MapOrderIter<'_, T> {
    fn eq(&self, other: &O) -> bool {
        same_element(self, other)
    }
}

/// Map-order cursor that can write, insert and erase through [`MapValProxy`].
///
/// Erasing the current entry leaves the cursor on its key: stepping still works,
/// but [`SparseCursor::value`] returns `None` and ranks after it are off by one.
#[derive(Debug)]
pub struct MapOrderIterMut<'a, T> {
    matrix: &'a mut MapMatrix<T>,
    cursor: MapCursor,
}

impl<'a, T> MapOrderIterMut<'a, T> {
    pub fn begin(matrix: &'a mut MapMatrix<T>) -> Self {
        let cursor = MapCursor::begin(matrix);
        MapOrderIterMut { matrix, cursor }
    }

    pub fn end(matrix: &'a mut MapMatrix<T>) -> Self {
        let cursor = MapCursor::end(matrix);
        MapOrderIterMut { matrix, cursor }
    }

    pub fn at(matrix: &'a mut MapMatrix<T>, row: ConcreteIndex, col: ConcreteIndex) -> Self {
        let cursor = MapCursor::lower_bound(matrix, row, col);
        MapOrderIterMut { matrix, cursor }
    }

    pub fn as_const(&self) -> MapOrderIter<'_, T> {
        MapOrderIter {
            matrix: &*self.matrix,
            cursor: self.cursor,
        }
    }

    /// Handle bound to the current key, `None` past the end
    pub fn proxy(&mut self) -> Option<MapValProxy<'_, T>> {
        let key = self.cursor.key?;
        Some(MapValProxy::new(&mut *self.matrix, key))
    }

    delegate! {
        to self.as_const() {
            pub fn key(&self) -> Option<LinearIndex>;
        }
    }
}

impl<T> CoordinateProvider for MapOrderIterMut<'_, T> {
    delegate! {
        to self.as_const() {
            fn row(&self) -> ConcreteIndex;
            fn col(&self) -> ConcreteIndex;
            fn storage_identity(&self) -> Option<StorageIdentity>;
        }
    }
}

impl<T> SparseCursor for MapOrderIterMut<'_, T> {
    type Value<'v>
        = &'v T
    where
        Self: 'v;

    fn pos(&self) -> usize {
        self.cursor.pos
    }

    fn is_end(&self) -> bool {
        self.cursor.key.is_none()
    }

    fn value(&self) -> Option<&T> {
        self.matrix.get_linear(self.cursor.key?)
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

impl<T, O: CoordinateProvider> PartialEq<O> for MapOrderIterMut<'_, T> {
    fn eq(&self, other: &O) -> bool {
        same_element(self, other)
    }
}

/// Iterator over all the entries of a map-backed matrix in column-major order
///
/// Returns the coordinate and the element at that coordinate, from either end.
#[derive(Debug)]
pub struct MapEntries<'a, T> {
    front: MapOrderIter<'a, T>,
    back: MapOrderIter<'a, T>,
}

impl<T> Clone for MapEntries<'_, T> {
    fn clone(&self) -> Self {
        MapEntries {
            front: self.front,
            back: self.back,
        }
    }
}

impl<'a, T> MapEntries<'a, T> {
    pub fn new(matrix: &'a MapMatrix<T>) -> Self {
        MapEntries {
            front: MapOrderIter::begin(matrix),
            back: MapOrderIter::end(matrix),
        }
    }

    /// Entries from `front` up to, not including, `back`
    pub fn between(front: MapOrderIter<'a, T>, back: MapOrderIter<'a, T>) -> Self {
        MapEntries { front, back }
    }
}

impl<'a, T> Iterator for MapEntries<'a, T> {
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

impl<T> DoubleEndedIterator for MapEntries<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front.pos() >= self.back.pos() {
            return None;
        }
        self.back.retreat();
        Some((self.back.coordinate(), self.back.get()?))
    }
}

impl<T> ExactSizeIterator for MapEntries<'_, T> {}

impl<T> FusedIterator for MapEntries<'_, T> {}
