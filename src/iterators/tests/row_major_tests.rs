//! Tests for row-major traversal of compressed-column storage

use crate::{
    index::Coordinate,
    iterators::{CoordinateProvider, RowMajorIter, SparseCursor},
    storage::CscMatrix,
};

/// 3x3 with (0,0)=5, (2,0)=3, (1,2)=7
fn example() -> CscMatrix<i32> {
    CscMatrix::new(3, 3, vec![0, 2, 2, 3], vec![0, 2, 1], vec![5, 3, 7]).unwrap()
}

/// 4x3 whose row 1 and column 1 are empty
fn holes() -> CscMatrix<f64> {
    CscMatrix::from_triplets(
        4,
        3,
        [(0, 2, 1.0), (2, 0, 2.0), (2, 2, 3.0), (3, 0, 4.0), (0, 0, 5.0)],
    )
    .unwrap()
}

fn walk_forward<T: Copy>(m: &CscMatrix<T>) -> Vec<(usize, usize, usize, T)> {
    let mut out = vec![];
    let mut it = m.row_begin();
    while !it.is_end() {
        out.push((it.pos(), it.row(), it.col(), *it.value().unwrap()));
        it.advance();
    }
    out
}

#[test]
fn forward_order() {
    let m = example();
    assert_eq!(
        walk_forward(&m),
        vec![(0, 0, 0, 5), (1, 1, 2, 7), (2, 2, 0, 3)]
    );
}

#[test]
fn backward_from_end() {
    let m = example();
    let mut it = m.row_end();
    assert_eq!(it.coordinate(), Coordinate::new(3, 0));
    assert_eq!(it.pos(), 3);
    assert_eq!(it.offset(), 3);
    assert!(it.value().is_none());

    let mut seen = vec![];
    while it.pos() > 0 {
        it.retreat();
        seen.push((it.pos(), it.row(), it.col(), *it.value().unwrap()));
    }
    assert_eq!(seen, vec![(2, 2, 0, 3), (1, 1, 2, 7), (0, 0, 0, 5)]);
    assert_eq!(it, m.row_begin());
}

#[test]
fn rank_construction() {
    let m = example();
    let expected = [(0, 0, 0), (1, 2, 2), (2, 0, 1)];
    for (rank, &(row, col, offset)) in expected.iter().enumerate() {
        let it = m.row_iter_at_rank(rank);
        assert_eq!(it.pos(), rank);
        assert_eq!((it.row(), it.col()), (row, col));
        assert_eq!(it.offset(), offset);
    }
    assert!(m.row_iter_at_rank(3).is_end());
    assert!(m.row_iter_at_rank(100).is_end());
}

#[test]
fn rank_construction_skips_empty_rows() {
    let m = holes();
    let coords: Vec<_> = (0..m.n_nonzero())
        .map(|k| m.row_iter_at_rank(k).coordinate())
        .map(|c| (c.row, c.col))
        .collect();
    assert_eq!(coords, vec![(0, 0), (0, 2), (2, 0), (2, 2), (3, 0)]);
}

#[test]
fn stepping_skips_empty_rows_and_columns() {
    let m = holes();
    let forward: Vec<_> = walk_forward(&m)
        .into_iter()
        .map(|(_, r, c, v)| (r, c, v))
        .collect();
    assert_eq!(
        forward,
        vec![
            (0, 0, 5.0),
            (0, 2, 1.0),
            (2, 0, 2.0),
            (2, 2, 3.0),
            (3, 0, 4.0)
        ]
    );

    let mut it = m.row_end();
    it.retreat().retreat();
    assert_eq!(it.coordinate(), Coordinate::new(2, 2));
    it.retreat();
    assert_eq!(it.coordinate(), Coordinate::new(2, 0));
    it.retreat();
    assert_eq!(it.coordinate(), Coordinate::new(0, 2));
}

#[test]
fn seek_lands_on_lower_bound() {
    let m = example();

    let it = m.row_iter_at(1, 1);
    assert_eq!((it.row(), it.col()), (1, 2));
    assert_eq!(it.value(), Some(&7));
    assert_eq!(it.pos(), 1);

    assert_eq!(m.row_iter_at(0, 0), m.row_begin());
    assert_eq!(m.row_iter_at(1, 2).pos(), 1);
    assert_eq!(m.row_iter_at(0, 1).coordinate(), Coordinate::new(1, 2));
    assert!(m.row_iter_at(2, 1).is_end());
    assert!(m.row_iter_at(7, 7).is_end());
}

#[test]
fn empty_matrix_is_all_end() {
    let m = CscMatrix::<f64>::zeros(4, 5);
    assert!(m.row_begin().is_end());
    assert_eq!(m.row_begin(), m.row_end());
    assert_eq!(m.row_begin().coordinate(), Coordinate::new(4, 0));
    assert!(m.row_iter_at(2, 2).is_end());
    assert!(m.row_iter_at_rank(0).is_end());
    assert_eq!(m.iter_row_major().count(), 0);

    let degenerate = CscMatrix::<f64>::zeros(0, 0);
    assert!(degenerate.row_iter_at(0, 0).is_end());
}

#[test]
fn post_step_forms_return_previous_position() {
    let m = example();
    let mut it = m.row_begin();
    let before = it.post_advance();
    assert_eq!(before.pos(), 0);
    assert_eq!(it.pos(), 1);

    let before = it.post_retreat();
    assert_eq!(before.coordinate(), Coordinate::new(1, 2));
    assert_eq!(it.coordinate(), Coordinate::new(0, 0));
}

#[test]
fn writes_go_through_the_proxy() {
    let mut m = example();
    {
        let mut it = m.row_iter_mut_at_rank(0);
        while !it.is_end() {
            let expected = it.coordinate();
            let mut proxy = it.proxy().unwrap();
            assert_eq!(proxy.coordinate(), expected);
            let old = *proxy.get();
            proxy.set(old * 10);
            it.advance();
        }
        assert!(it.proxy().is_none());
    }
    assert_eq!(m.values(), &[50, 30, 70]);

    let mut it = m.row_iter_mut_at(1, 1);
    assert_eq!(it.offset(), 2);
    it.proxy().unwrap().update(|v| *v += 1);
    assert_eq!(it.value(), Some(&71));
    assert_eq!(it.as_const().get(), Some(&71));
}

#[test]
fn zero_writes_keep_the_pattern() {
    let mut m = example();
    let mut it = m.row_iter_mut_at(2, 0);
    assert_eq!(it.proxy().unwrap().set(0), 3);
    assert_eq!(m.n_nonzero(), 3);
    assert_eq!(m.get(2, 0), Some(&0));
}

#[test]
fn entries_iterate_from_both_ends() {
    let m = example();
    let entries = m.iter_row_major();
    assert_eq!(entries.len(), 3);

    let back: Vec<_> = m
        .iter_row_major()
        .rev()
        .map(|(c, v)| (c.row, c.col, *v))
        .collect();
    assert_eq!(back, vec![(2, 0, 3), (1, 2, 7), (0, 0, 5)]);

    let mut mixed = m.iter_row_major();
    assert_eq!(mixed.next().map(|(c, _)| c), Some(Coordinate::new(0, 0)));
    assert_eq!(mixed.next_back().map(|(c, _)| c), Some(Coordinate::new(2, 0)));
    assert_eq!(mixed.len(), 1);
    assert_eq!(mixed.next().map(|(_, v)| *v), Some(7));
    assert!(mixed.next().is_none());
    assert!(mixed.next_back().is_none());
}

#[test]
fn entries_between_cursors() {
    let m = holes();
    let from = m.row_iter_at(0, 1);
    let to = m.row_iter_at(3, 0);
    let values: Vec<f64> = crate::iterators::RowMajorEntries::between(from, to)
        .map(|(_, v)| *v)
        .collect();
    assert_eq!(values, vec![1.0, 2.0, 3.0]);
}

#[test]
fn display_lists_row_major() {
    insta::assert_snapshot!(example().to_string().trim_end(), @r"
    (0, 0): 5
    (1, 2): 7
    (2, 0): 3
    ");
}

#[test]
fn constructors_agree() {
    let m = holes();
    assert_eq!(RowMajorIter::begin(&m), m.row_iter_at_rank(0));
    assert_eq!(RowMajorIter::end(&m), m.row_iter_at_rank(m.n_nonzero()));
    assert!(std::ptr::eq(m.row_begin().matrix(), &m));
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "past its end")]
fn advancing_the_end_is_caught() {
    let m = example();
    m.row_end().advance();
}

#[test]
#[cfg(debug_assertions)]
#[should_panic(expected = "before its first element")]
fn retreating_the_beginning_is_caught() {
    let m = example();
    m.row_begin().retreat();
}

#[test]
#[cfg(not(debug_assertions))]
fn stepping_out_of_range_is_ignored() {
    let m = example();
    let mut it = m.row_end();
    it.advance();
    assert!(it.is_end() && it.value().is_none());
    let mut it = m.row_begin();
    it.retreat();
    assert_eq!(it, m.row_begin());
}
