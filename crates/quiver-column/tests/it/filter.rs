use quiver_column::{ArrayColumn, Column, PrimitiveColumn, Value};

use crate::{assert_consistent, int_array, nullable_array, rows, string_array};

#[test]
fn keeps_masked_rows_in_order() {
    // rows [[1, 2], [], [3]]
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    let filtered = col.filter(&[true, false, true], None).unwrap();
    assert_eq!(filtered.offsets().as_slice(), &[2, 3]);
    assert_eq!(
        rows(&filtered),
        vec![
            Value::Array(vec![Value::Int64(1), Value::Int64(2)]),
            Value::Array(vec![Value::Int64(3)]),
        ]
    );
    assert_consistent(&filtered);
}

#[test]
fn all_true_is_identity_and_all_false_is_empty() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    let kept = col.filter(&[true, true, true], None).unwrap();
    assert_eq!(kept, col);

    let none = col.filter(&[false, false, false], None).unwrap();
    assert!(none.is_empty());
    assert_eq!(none.offsets().len(), 0);
    assert_eq!(none.data().len(), 0);
}

#[test]
fn mask_length_must_match_row_count() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    assert!(col.filter(&[true, false], None).is_err());
    assert!(col.clone().filter_in_place(&[true]).is_err());
}

#[test]
fn size_hint_never_changes_the_result() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    let mask = [true, false, true];
    let baseline = col.filter(&mask, None).unwrap();
    assert_eq!(col.filter(&mask, Some(0)).unwrap(), baseline);
    assert_eq!(col.filter(&mask, Some(1024)).unwrap(), baseline);
}

#[test]
fn in_place_filter_matches_pure_filter() {
    let mask = [false, true, true, false];

    let numeric = int_array(&[1, 2, 3, 4, 5], &[2, 3, 3, 5]);
    let pure = numeric.filter(&mask, None).unwrap();
    let mut in_place = numeric.clone();
    assert_eq!(in_place.filter_in_place(&mask).unwrap(), 2);
    assert_eq!(in_place, pure);
    assert_consistent(&in_place);

    let text = string_array(&["ab", "c", "", "de", "f"], &[2, 3, 4, 5]);
    let pure = text.filter(&mask, None).unwrap();
    let mut in_place = text.clone();
    assert_eq!(in_place.filter_in_place(&mask).unwrap(), 2);
    assert_eq!(in_place, pure);
    assert_consistent(&in_place);

    let nullable = nullable_array(&[1, 0, 3, 4, 5], &[0, 1, 0, 0, 1], &[2, 3, 3, 5]);
    let pure = nullable.filter(&mask, None).unwrap();
    let mut in_place = nullable.clone();
    assert_eq!(in_place.filter_in_place(&mask).unwrap(), 2);
    assert_eq!(in_place, pure);
    assert_consistent(&in_place);
}

#[test]
fn string_rows_are_remapped() {
    // rows [["ab", "c"], [], ["def"]]
    let col = string_array(&["ab", "c", "def"], &[2, 2, 3]);
    let filtered = col.filter(&[false, false, true], None).unwrap();
    assert_eq!(filtered.offsets().as_slice(), &[1]);
    assert_eq!(
        rows(&filtered),
        vec![Value::Array(vec![Value::String("def".to_string())])]
    );
    assert_consistent(&filtered);
}

#[test]
fn nullable_rows_keep_their_null_markers() {
    // rows [[1, null], [], [3]]
    let col = nullable_array(&[1, 0, 3], &[0, 1, 0], &[2, 2, 3]);
    let filtered = col.filter(&[true, false, true], None).unwrap();
    assert_eq!(
        rows(&filtered),
        vec![
            Value::Array(vec![Value::Int64(1), Value::Null]),
            Value::Array(vec![Value::Int64(3)]),
        ]
    );
    assert_consistent(&filtered);
}

#[test]
fn nested_arrays_filter_through_the_generic_path() {
    // inner: rows [[1], [2, 3], [], [4]]
    let inner = int_array(&[1, 2, 3, 4], &[1, 3, 3, 4]);
    // outer: rows [[[1], [2, 3]], [[], [4]]]
    let outer = ArrayColumn::try_new(
        Column::Array(inner),
        Column::UInt64(PrimitiveColumn::from_vec(vec![2, 4])),
    )
    .unwrap();

    let filtered = outer.filter(&[false, true], None).unwrap();
    assert_eq!(
        rows(&filtered),
        vec![Value::Array(vec![
            Value::Array(vec![]),
            Value::Array(vec![Value::Int64(4)]),
        ])]
    );
    assert_consistent(&filtered);

    let mut in_place = outer.clone();
    assert_eq!(in_place.filter_in_place(&[false, true]).unwrap(), 1);
    assert_eq!(in_place, filtered);
}

#[test]
fn empty_columns_filter_to_empty() {
    let col = int_array(&[], &[]);
    let filtered = col.filter(&[], None).unwrap();
    assert!(filtered.is_empty());
}
