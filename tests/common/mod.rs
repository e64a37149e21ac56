#![allow(dead_code)]

use std::collections::BTreeMap;

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoroshiro64Star;
use spmat::{index::Coordinate, storage::CscMatrix};

pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Random `(row, col, value)` entries without duplicates, fill between 0 and `max_density`.
pub fn test_entries(
    n_rows: usize,
    n_cols: usize,
    max_density: f64,
    seed: u64,
) -> Vec<(usize, usize, i64)> {
    let mut rng = Xoroshiro64Star::seed_from_u64(seed);
    let size = n_rows * n_cols;
    if size == 0 {
        return vec![];
    }

    let density = rng.random_range(0.0..=max_density);
    let target = (size as f64 * density) as usize;

    let mut entries = BTreeMap::new();
    for _ in 0..target {
        let row = rng.random_range(0..n_rows);
        let col = rng.random_range(0..n_cols);
        entries.insert((row, col), rng.random_range(1..=1000i64));
    }

    entries.into_iter().map(|((r, c), v)| (r, c, v)).collect()
}

pub fn test_matrix(n_rows: usize, n_cols: usize, max_density: f64, seed: u64) -> CscMatrix<i64> {
    CscMatrix::from_triplets(n_rows, n_cols, test_entries(n_rows, n_cols, max_density, seed))
        .unwrap()
}

/// Shapes worth covering: degenerate, thin, wide and square
pub const SHAPES: [(usize, usize); 8] = [
    (0, 0),
    (1, 1),
    (1, 7),
    (7, 1),
    (3, 3),
    (5, 9),
    (9, 5),
    (16, 16),
];

/// Brute force reference: every stored entry sorted by `order`
pub fn sorted_by<T: Copy>(
    matrix: &CscMatrix<T>,
    order: impl Fn(&Coordinate, &Coordinate) -> std::cmp::Ordering,
) -> Vec<(Coordinate, T)> {
    let mut all: Vec<_> = matrix.iter_storage().map(|(c, v)| (c, *v)).collect();
    all.sort_by(|a, b| order(&a.0, &b.0));
    all
}
