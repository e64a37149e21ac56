mod common;

use common::{init_logger, sorted_by, test_matrix, SHAPES};
use spmat::{
    index::Coordinate,
    iterators::{CoordinateProvider, SparseCursor},
    storage::MapMatrix,
};

const SEEDS: std::ops::Range<u64> = 0..12;

#[test]
fn row_major_matches_sorted_entries() {
    init_logger();
    for (n_rows, n_cols) in SHAPES {
        for seed in SEEDS {
            let m = test_matrix(n_rows, n_cols, 0.6, seed);
            let expected = sorted_by(&m, Coordinate::cmp_row_major);

            let got: Vec<_> = m.iter_row_major().map(|(c, v)| (c, *v)).collect();
            assert_eq!(got, expected, "{n_rows}x{n_cols} seed {seed}");

            let mut back: Vec<_> = m.iter_row_major().rev().map(|(c, v)| (c, *v)).collect();
            back.reverse();
            assert_eq!(back, expected, "{n_rows}x{n_cols} seed {seed} backwards");
        }
    }
}

#[test]
fn ranks_are_consistent() {
    for (n_rows, n_cols) in SHAPES {
        for seed in SEEDS {
            let m = test_matrix(n_rows, n_cols, 0.5, seed);
            let mut it = m.row_begin();
            for rank in 0..m.n_nonzero() {
                let direct = m.row_iter_at_rank(rank);
                assert_eq!(it.pos(), rank);
                assert_eq!(direct.pos(), rank);
                assert_eq!(it, direct);
                assert_eq!(it.offset(), direct.offset());
                assert_eq!(m.values()[it.offset()], *it.value().unwrap());
                it.advance();
            }
            assert!(it.is_end());
            assert_eq!(it, m.row_end());
            assert_eq!(it.coordinate(), Coordinate::new(n_rows, 0));
        }
    }
}

#[test]
fn advance_then_retreat_round_trips() {
    for (n_rows, n_cols) in SHAPES {
        for seed in SEEDS {
            let m = test_matrix(n_rows, n_cols, 0.4, seed);
            for rank in 0..m.n_nonzero() {
                let start = m.row_iter_at_rank(rank);

                let mut it = start;
                it.advance().retreat();
                assert_eq!(it, start);
                assert_eq!(it.pos(), rank);

                if rank > 0 {
                    let mut it = start;
                    it.retreat().advance();
                    assert_eq!(it.coordinate(), start.coordinate());
                }
            }
        }
    }
}

#[test]
fn row_major_seek_is_lower_bound() {
    for (n_rows, n_cols) in SHAPES {
        for seed in SEEDS {
            let m = test_matrix(n_rows, n_cols, 0.5, seed);
            let sorted = sorted_by(&m, Coordinate::cmp_row_major);

            for row in 0..=n_rows {
                for col in 0..=n_cols {
                    let target = Coordinate::new(row, col);
                    let rank = sorted
                        .iter()
                        .position(|(c, _)| c.cmp_row_major(&target).is_ge())
                        .unwrap_or(sorted.len());

                    let it = m.row_iter_at(row, col);
                    assert_eq!(it.pos(), rank, "seek ({row}, {col}) seed {seed}");
                    match sorted.get(rank) {
                        Some((c, v)) => {
                            assert_eq!(it.coordinate(), *c);
                            assert_eq!(it.value(), Some(v));
                        }
                        None => assert!(it.is_end()),
                    }
                }
            }
        }
    }
}

#[test]
fn map_order_matches_column_major() {
    for (n_rows, n_cols) in SHAPES {
        for seed in SEEDS {
            let csc = test_matrix(n_rows, n_cols, 0.6, seed);
            let map = MapMatrix::try_from(&csc).unwrap();
            let expected = sorted_by(&csc, Coordinate::cmp_col_major);

            let mut it = map.begin();
            let mut got = vec![];
            while !it.is_end() {
                assert_eq!(it.pos(), got.len());
                got.push((it.coordinate(), *it.value().unwrap()));
                it.advance();
            }
            assert_eq!(got, expected);
            assert_eq!(it.coordinate(), Coordinate::new(n_rows, n_cols));

            let back: Vec<_> = map.iter().rev().map(|(c, v)| (c, *v)).collect();
            assert!(back.iter().rev().eq(expected.iter()));

            assert_eq!(map.to_csc(), csc);
        }
    }
}

#[test]
fn map_seek_is_column_major_lower_bound() {
    for (n_rows, n_cols) in SHAPES {
        for seed in SEEDS {
            let csc = test_matrix(n_rows, n_cols, 0.5, seed);
            let map = MapMatrix::try_from(&csc).unwrap();
            let keys: Vec<Coordinate> = map.iter().map(|(c, _)| c).collect();

            for row in 0..=n_rows + 1 {
                for col in 0..=n_cols {
                    let target = Coordinate::new(row, col);
                    let rank = keys
                        .iter()
                        .position(|c| c.cmp_col_major(&target).is_ge())
                        .unwrap_or(keys.len());

                    let it = map.iter_at(row, col);
                    assert_eq!(it.pos(), rank, "seek ({row}, {col}) seed {seed}");
                    assert_eq!(it.is_end(), rank == keys.len());
                }
            }
        }
    }
}

#[test]
fn every_element_matches_across_storages() {
    for (n_rows, n_cols) in SHAPES {
        for seed in SEEDS {
            let csc = test_matrix(n_rows, n_cols, 0.5, seed);
            let map = MapMatrix::try_from(&csc).unwrap();

            let mut it = csc.row_begin();
            while !it.is_end() {
                let other = map.iter_at(it.row(), it.col());
                assert!(it == other);
                assert_eq!(it.value(), other.value());
                it.advance();
            }
        }
    }
}

#[test]
fn mutable_walk_scales_every_value() {
    for seed in SEEDS {
        let mut m = test_matrix(6, 8, 0.7, seed);
        let before = m.clone();

        let mut it = m.row_iter_mut_at_rank(0);
        while let Some(mut proxy) = it.proxy() {
            proxy.update(|v| *v *= -2);
            it.advance();
        }

        for ((c, new), (_, old)) in m.iter_storage().zip(before.iter_storage()) {
            assert_eq!(*new, -2 * old, "at {c}");
        }
    }
}
