use quiver_column::{ArrayColumn, Column, PrimitiveColumn, Value};

use crate::{assert_consistent, int_array, nullable_array, rows, string_array};

#[test]
fn repeats_rows_consecutively() {
    // rows [[1, 2], [], [3]] replicated 2/0/3 times
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    let replicated = col.replicate(&[2, 2, 5]).unwrap();
    assert_eq!(replicated.len(), 5);
    assert_eq!(
        rows(&replicated),
        vec![
            Value::Array(vec![Value::Int64(1), Value::Int64(2)]),
            Value::Array(vec![Value::Int64(1), Value::Int64(2)]),
            Value::Array(vec![Value::Int64(3)]),
            Value::Array(vec![Value::Int64(3)]),
            Value::Array(vec![Value::Int64(3)]),
        ]
    );
    assert_consistent(&replicated);
}

#[test]
fn replicating_each_row_once_is_identity() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    assert_eq!(col.replicate(&[1, 2, 3]).unwrap(), col);

    let text = string_array(&["ab", "c", "def"], &[2, 2, 3]);
    assert_eq!(text.replicate(&[1, 2, 3]).unwrap(), text);

    let nullable = nullable_array(&[1, 0, 3], &[0, 1, 0], &[2, 2, 3]);
    assert_eq!(nullable.replicate(&[1, 2, 3]).unwrap(), nullable);
}

#[test]
fn replicate_offsets_length_must_match() {
    let col = int_array(&[1, 2, 3], &[2, 2, 3]);
    assert!(col.replicate(&[1, 2]).is_err());
}

#[test]
fn string_rows_replicate_with_their_characters() {
    // rows [["ab", "c"], ["def"]] replicated 0/2 times
    let col = string_array(&["ab", "c", "def"], &[2, 3]);
    let replicated = col.replicate(&[0, 2]).unwrap();
    assert_eq!(
        rows(&replicated),
        vec![
            Value::Array(vec![Value::String("def".to_string())]),
            Value::Array(vec![Value::String("def".to_string())]),
        ]
    );
    assert_consistent(&replicated);
}

#[test]
fn nullable_rows_replicate_values_and_markers_together() {
    // rows [[1, null], [7]] replicated 2/1 times
    let col = nullable_array(&[1, 0, 7], &[0, 1, 0], &[2, 3]);
    let replicated = col.replicate(&[2, 3]).unwrap();
    assert_eq!(
        rows(&replicated),
        vec![
            Value::Array(vec![Value::Int64(1), Value::Null]),
            Value::Array(vec![Value::Int64(1), Value::Null]),
            Value::Array(vec![Value::Int64(7)]),
        ]
    );
    assert_consistent(&replicated);
}

#[test]
fn nested_arrays_replicate_through_the_generic_path() {
    // outer: rows [[[1], [2, 3]], [[4]]]
    let inner = int_array(&[1, 2, 3, 4], &[1, 3, 4]);
    let outer = ArrayColumn::try_new(
        Column::Array(inner),
        Column::UInt64(PrimitiveColumn::from_vec(vec![2, 3])),
    )
    .unwrap();
    let replicated = outer.replicate(&[2, 2]).unwrap();
    assert_eq!(
        rows(&replicated),
        vec![
            Value::Array(vec![
                Value::Array(vec![Value::Int64(1)]),
                Value::Array(vec![Value::Int64(2), Value::Int64(3)]),
            ]),
            Value::Array(vec![
                Value::Array(vec![Value::Int64(1)]),
                Value::Array(vec![Value::Int64(2), Value::Int64(3)]),
            ]),
        ]
    );
    assert_consistent(&replicated);
}

#[test]
fn empty_replication_yields_empty_columns() {
    let col = int_array(&[], &[]);
    assert!(col.replicate(&[]).unwrap().is_empty());

    let col = int_array(&[1, 2], &[2]);
    let none = col.replicate(&[0]).unwrap();
    assert!(none.is_empty());
    assert_eq!(none.data().len(), 0);
}
