//! Write-through handles produced by the mutable iterators
//!
//! A proxy is bound to one coordinate of one matrix. Reading through it is
//! always allowed; what a write does depends on the storage format.

use crate::{
    algebra::IsZero,
    index::{ConcreteIndex, Coordinate, LinearIndex},
    iterators::CoordinateProvider,
    storage::{CscMatrix, MapMatrix},
};

/// Handle to a stored entry of a [`CscMatrix`].
///
/// Writes happen in place at the storage offset. The sparsity pattern never changes,
/// so writing zero keeps an explicit zero entry.
#[derive(Debug)]
pub struct CscValProxy<'m, T> {
    row: ConcreteIndex,
    col: ConcreteIndex,
    matrix: &'m mut CscMatrix<T>,
    offset: usize,
}

impl<'m, T> CscValProxy<'m, T> {
    pub(crate) fn new(
        row: ConcreteIndex,
        col: ConcreteIndex,
        matrix: &'m mut CscMatrix<T>,
        offset: usize,
    ) -> Self {
        CscValProxy {
            row,
            col,
            matrix,
            offset,
        }
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn get(&self) -> &T {
        &self.matrix.values()[self.offset]
    }

    /// Overwrites the entry, returning the previous value
    pub fn set(&mut self, value: T) -> T {
        std::mem::replace(&mut self.matrix.values_mut()[self.offset], value)
    }

    pub fn update(&mut self, f: impl FnOnce(&mut T)) {
        f(&mut self.matrix.values_mut()[self.offset]);
    }
}

impl<T> CoordinateProvider for CscValProxy<'_, T> {
    fn row(&self) -> ConcreteIndex {
        self.row
    }

    fn col(&self) -> ConcreteIndex {
        self.col
    }
}

/// Handle to one key of a [`MapMatrix`], stored or not.
///
/// Writing a nonzero inserts or overwrites, writing zero erases the key.
#[derive(Debug)]
pub struct MapValProxy<'m, T> {
    matrix: &'m mut MapMatrix<T>,
    key: LinearIndex,
}

impl<'m, T> MapValProxy<'m, T> {
    pub(crate) fn new(matrix: &'m mut MapMatrix<T>, key: LinearIndex) -> Self {
        MapValProxy { matrix, key }
    }

    pub fn key(&self) -> LinearIndex {
        self.key
    }

    /// The stored value, `None` once it has been erased
    pub fn get(&self) -> Option<&T> {
        self.matrix.get_linear(self.key)
    }

    /// Writes `value`, erasing the entry instead when it is zero. Returns the previous value.
    pub fn set(&mut self, value: T) -> Option<T>
    where
        T: IsZero,
    {
        if value.is_zero() {
            self.matrix.elements.remove(&self.key)
        } else {
            self.matrix.elements.insert(self.key, value)
        }
    }

    /// Modifies the stored value in place, erasing it if the result is zero.
    ///
    /// Does nothing when the key holds no value.
    pub fn update(&mut self, f: impl FnOnce(&mut T))
    where
        T: IsZero,
    {
        let Some(value) = self.matrix.elements.get_mut(&self.key) else {
            return;
        };
        f(value);
        if value.is_zero() {
            self.matrix.elements.remove(&self.key);
        }
    }
}

impl<T> CoordinateProvider for MapValProxy<'_, T> {
    fn row(&self) -> ConcreteIndex {
        self.matrix.decode(self.key).row
    }

    fn col(&self) -> ConcreteIndex {
        self.matrix.decode(self.key).col
    }

    fn coordinate(&self) -> Coordinate {
        self.matrix.decode(self.key)
    }
}
