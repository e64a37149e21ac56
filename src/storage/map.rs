use std::collections::BTreeMap;
use std::fmt::Display;

use anyhow::{Context, Result};
use bincode::{Decode, Encode};
use log::debug;
use serde::{Deserialize, Serialize};

use super::{check_bounds, check_shape, CscMatrix, StorageError};
use crate::{
    index::{ConcreteIndex, Coordinate, LinearIndex},
    iterators::{MapEntries, MapOrderIter, MapOrderIterMut},
};

/// Sparse matrix held in an ordered map.
///
/// Keys are column-major [`LinearIndex`]es, so walking the map in key order
/// visits entries column by column, rows ascending within a column.
/// The shape is limited to what a [`LinearIndex`] can address, so distinct cells never share a key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Encode)]
#[serde(try_from = "MapParts<T>")]
pub struct MapMatrix<T> {
    n_rows: usize,
    n_cols: usize,
    pub(crate) elements: BTreeMap<LinearIndex, T>,
}

/// Unchecked wire form of a [`MapMatrix`], fields in the same order
#[derive(Deserialize, Decode)]
pub(crate) struct MapParts<T> {
    n_rows: usize,
    n_cols: usize,
    elements: BTreeMap<LinearIndex, T>,
}

impl<T> TryFrom<MapParts<T>> for MapMatrix<T> {
    type Error = StorageError;

    fn try_from(parts: MapParts<T>) -> Result<Self, Self::Error> {
        let cells = check_shape(parts.n_rows, parts.n_cols)?;
        if let Some((key, _)) = parts.elements.last_key_value() {
            let key = usize::from(*key);
            if key >= cells {
                return Err(StorageError::KeyOutOfBounds { key, cells });
            }
        }
        Ok(MapMatrix {
            n_rows: parts.n_rows,
            n_cols: parts.n_cols,
            elements: parts.elements,
        })
    }
}

impl<T> MapMatrix<T> {
    /// Create a new empty matrix with the given shape.
    ///
    /// Fails when `n_rows * n_cols` overflows, since cells would then share keys.
    pub fn new(n_rows: usize, n_cols: usize) -> Result<Self, StorageError> {
        check_shape(n_rows, n_cols)
            .inspect_err(|e| debug!("rejected map-backed shape: {e}"))?;
        Ok(MapMatrix {
            n_rows,
            n_cols,
            elements: BTreeMap::new(),
        })
    }

    /// Generates a matrix from `(row, col, value)` entries; later duplicates overwrite earlier ones.
    pub fn from_entries(
        n_rows: usize,
        n_cols: usize,
        entries: impl IntoIterator<Item = (ConcreteIndex, ConcreteIndex, T)>,
    ) -> Result<Self> {
        let mut matrix =
            MapMatrix::new(n_rows, n_cols).context("building a map-backed matrix")?;
        for (row, col, value) in entries {
            matrix
                .insert(row, col, value)
                .context("building a map-backed matrix")?;
        }
        Ok(matrix)
    }

    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn n_nonzero(&self) -> usize {
        self.elements.len()
    }

    pub fn encode(&self, row: ConcreteIndex, col: ConcreteIndex) -> LinearIndex {
        LinearIndex::encode(row, col, self.n_rows)
    }

    pub fn decode(&self, key: LinearIndex) -> Coordinate {
        key.decode(self.n_rows)
    }

    /// Stores `value` at `(row, col)`, returning what was there before.
    ///
    /// Zeros are stored as given; removal on zero is the job of [`MapValProxy`](crate::proxy::MapValProxy).
    pub fn insert(
        &mut self,
        row: ConcreteIndex,
        col: ConcreteIndex,
        value: T,
    ) -> Result<Option<T>, StorageError> {
        check_bounds(row, col, self.n_rows, self.n_cols)?;
        let key = self.encode(row, col);
        Ok(self.elements.insert(key, value))
    }

    pub fn remove(&mut self, row: ConcreteIndex, col: ConcreteIndex) -> Option<T> {
        if check_bounds(row, col, self.n_rows, self.n_cols).is_err() {
            return None;
        }
        let key = self.encode(row, col);
        self.elements.remove(&key)
    }

    pub fn get(&self, row: ConcreteIndex, col: ConcreteIndex) -> Option<&T> {
        check_bounds(row, col, self.n_rows, self.n_cols).ok()?;
        self.elements.get(&self.encode(row, col))
    }

    pub fn get_linear(&self, key: LinearIndex) -> Option<&T> {
        self.elements.get(&key)
    }

    pub fn begin(&self) -> MapOrderIter<'_, T> {
        MapOrderIter::begin(self)
    }

    pub fn end(&self) -> MapOrderIter<'_, T> {
        MapOrderIter::end(self)
    }

    /// Iterator positioned on the first entry at or after `(row, col)` in column-major order
    pub fn iter_at(&self, row: ConcreteIndex, col: ConcreteIndex) -> MapOrderIter<'_, T> {
        MapOrderIter::at(self, row, col)
    }

    pub fn begin_mut(&mut self) -> MapOrderIterMut<'_, T> {
        MapOrderIterMut::begin(self)
    }

    pub fn end_mut(&mut self) -> MapOrderIterMut<'_, T> {
        MapOrderIterMut::end(self)
    }

    pub fn iter_mut_at(&mut self, row: ConcreteIndex, col: ConcreteIndex) -> MapOrderIterMut<'_, T> {
        MapOrderIterMut::at(self, row, col)
    }

    /// All entries in column-major order, as `(coordinate, value)`
    pub fn iter(&self) -> MapEntries<'_, T> {
        MapEntries::new(self)
    }

    /// Converts to compressed-column storage. Map order already is column-major.
    pub fn to_csc(&self) -> CscMatrix<T>
    where
        T: Clone,
    {
        let mut col_offsets = vec![0; self.n_cols + 1];
        let mut row_indices = Vec::with_capacity(self.n_nonzero());
        let mut values = Vec::with_capacity(self.n_nonzero());

        for (key, value) in &self.elements {
            let Coordinate { row, col } = self.decode(*key);
            col_offsets[col + 1] += 1;
            row_indices.push(row);
            values.push(value.clone());
        }
        for c in 0..self.n_cols {
            col_offsets[c + 1] += col_offsets[c];
        }

        CscMatrix::from_sorted_parts(self.n_rows, self.n_cols, col_offsets, row_indices, values)
    }
}

impl<T: Clone> TryFrom<&CscMatrix<T>> for MapMatrix<T> {
    type Error = StorageError;

    fn try_from(csc: &CscMatrix<T>) -> Result<Self, Self::Error> {
        let mut matrix = MapMatrix::new(csc.n_rows(), csc.n_cols())?;
        for (Coordinate { row, col }, value) in csc.iter_storage() {
            let key = matrix.encode(row, col);
            matrix.elements.insert(key, value.clone());
        }
        Ok(matrix)
    }
}

impl<T> Display for MapMatrix<T>
where
    T: Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut s = String::new();
        for (i, v) in self.iter() {
            s.push_str(&format!("{}: {}\n", i, v));
        }
        write!(f, "{}", s)
    }
}
