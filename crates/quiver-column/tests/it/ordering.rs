use std::cmp::Ordering;

use quiver_column::{ArrayColumn, Column, NanDirection, PrimitiveColumn, Value};

use crate::{assert_consistent, int_array, rows};

fn float_array(data: &[f64], offsets: &[u64]) -> ArrayColumn {
    ArrayColumn::try_new(
        Column::Float64(PrimitiveColumn::from_vec(data.to_vec())),
        Column::UInt64(PrimitiveColumn::from_vec(offsets.to_vec())),
    )
    .unwrap()
}

#[test]
fn compares_elementwise_then_by_length() {
    // rows [[1, 2], [1, 3], [1, 2], [1], []]
    let col = int_array(&[1, 2, 1, 3, 1, 2, 1], &[2, 4, 6, 7, 7]);
    let cmp = |n, m| col.compare_at(n, m, &col, NanDirection::Max).unwrap();
    assert_eq!(cmp(0, 1), Ordering::Less);
    assert_eq!(cmp(0, 2), Ordering::Equal);
    // shared prefix, shorter row first
    assert_eq!(cmp(3, 0), Ordering::Less);
    assert_eq!(cmp(4, 3), Ordering::Less);
}

#[test]
fn comparison_is_antisymmetric() {
    let lhs = int_array(&[1, 2, 3], &[2, 2, 3]);
    let rhs = int_array(&[1, 2, 9, 9], &[2, 4]);
    for n in 0..lhs.len() {
        for m in 0..rhs.len() {
            let forward = lhs.compare_at(n, m, &rhs, NanDirection::Max).unwrap();
            let backward = rhs.compare_at(m, n, &lhs, NanDirection::Max).unwrap();
            assert_eq!(forward, backward.reverse());
        }
    }
}

#[test]
fn comparison_requires_matching_element_types() {
    let lhs = int_array(&[1], &[1]);
    let rhs = float_array(&[1.0], &[1]);
    assert!(lhs.compare_at(0, 0, &rhs, NanDirection::Max).is_err());
}

#[test]
fn permutation_orders_rows_lexicographically() {
    // rows [[2], [1, 9], [], [1]]
    let col = int_array(&[2, 1, 9, 1], &[1, 3, 3, 4]);
    let perm = col.get_permutation(false, 0, NanDirection::Max);
    assert_eq!(perm, vec![2, 3, 1, 0]);

    let reversed = col.get_permutation(true, 0, NanDirection::Max);
    assert_eq!(reversed, vec![0, 1, 3, 2]);
}

#[test]
fn permutation_is_consistent_with_compare_at() {
    let col = int_array(&[3, 3, 1, 2, 2, 4, 1], &[2, 3, 5, 5, 7]);
    for &direction in &[NanDirection::Min, NanDirection::Max] {
        let perm = col.get_permutation(false, 0, direction);
        assert_eq!(perm.len(), col.len());
        for pair in perm.windows(2) {
            let ord = col.compare_at(pair[0], pair[1], &col, direction).unwrap();
            assert_ne!(ord, Ordering::Greater);
        }
    }
}

#[test]
fn permutation_limit_produces_a_sorted_prefix() {
    let col = int_array(&[5, 4, 3, 2, 1], &[1, 2, 3, 4, 5]);
    let prefix = col.get_permutation(false, 2, NanDirection::Max);
    assert_eq!(prefix.len(), col.len());
    assert_eq!(&prefix[..2], &[4, 3]);
}

#[test]
fn nan_rows_sort_by_direction() {
    // rows [[1.0], [NaN], [0.0]]
    let col = float_array(&[1.0, f64::NAN, 0.0], &[1, 2, 3]);
    assert_eq!(col.get_permutation(false, 0, NanDirection::Min), vec![1, 2, 0]);
    assert_eq!(col.get_permutation(false, 0, NanDirection::Max), vec![2, 0, 1]);
}

#[test]
fn identity_permutation_is_identity() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    let permuted = col.permute(&[0, 1, 2], col.len()).unwrap();
    assert_eq!(permuted, col);
}

#[test]
fn permute_reorders_and_selects_rows() {
    // rows [[1, 2], [], [3]]
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    let permuted = col.permute(&[2, 0], 2).unwrap();
    assert_eq!(
        rows(&permuted),
        vec![
            Value::Array(vec![Value::Int64(3)]),
            Value::Array(vec![Value::Int64(1), Value::Int64(2)]),
        ]
    );
    assert_consistent(&permuted);

    // limit 0 selects everything the permutation covers
    let full = col.permute(&[2, 1, 0], 0).unwrap();
    assert_eq!(full.len(), 3);
    assert_eq!(full.offsets().as_slice(), &[1, 1, 3]);
}

#[test]
fn permute_rejects_short_permutations() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    assert!(col.permute(&[0, 1], 0).is_err());
    assert!(col.permute(&[0, 1], 3).is_err());
    // a limit larger than the column clamps down
    let clamped = col.permute(&[0, 1, 2], 10).unwrap();
    assert_eq!(clamped.len(), 3);
}

#[test]
fn sorting_a_permuted_column_restores_order() {
    let col = int_array(&[9, 8, 7, 6], &[1, 2, 3, 4]);
    let perm = col.get_permutation(false, 0, NanDirection::Max);
    let sorted = col.permute(&perm, 0).unwrap();
    assert_eq!(
        rows(&sorted),
        vec![
            Value::Array(vec![Value::Int64(6)]),
            Value::Array(vec![Value::Int64(7)]),
            Value::Array(vec![Value::Int64(8)]),
            Value::Array(vec![Value::Int64(9)]),
        ]
    );
}
