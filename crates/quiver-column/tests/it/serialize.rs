use quiver_column::{Arena, ArrayColumn, Column, PrimitiveColumn, ScratchArena};

use crate::{assert_consistent, int_array, nullable_array, string_array};

/// Serializes every row, then rebuilds an equal column by deserializing the
/// spans in order.
fn round_trip(col: &ArrayColumn) {
    let mut arena = ScratchArena::new();
    let mut spans = Vec::new();
    for row in 0..col.len() {
        spans.push(col.serialize_value_into_arena(row, &mut arena));
    }
    // spans are contiguous and cover the arena
    for pair in spans.windows(2) {
        assert_eq!(pair[0].end, pair[1].start);
    }
    assert_eq!(spans.last().map_or(0, |s| s.end), arena.len());

    let mut rebuilt = col.clone_empty();
    let mut pos = 0;
    for span in &spans {
        assert_eq!(pos, span.start);
        pos = rebuilt
            .deserialize_and_insert_from_arena(arena.as_slice(), pos)
            .unwrap();
        assert_eq!(pos, span.end);
    }
    assert_eq!(&rebuilt, col);
    assert_consistent(&rebuilt);
}

#[test]
fn int_rows_round_trip() {
    round_trip(&int_array(&[1, 2, 3], &[2, 2, 3]));
}

#[test]
fn string_rows_round_trip() {
    round_trip(&string_array(&["ab", "", "cde", "f"], &[2, 2, 4]));
}

#[test]
fn nullable_rows_round_trip() {
    round_trip(&nullable_array(&[1, 0, 3], &[0, 1, 0], &[2, 2, 3]));
}

#[test]
fn nested_array_rows_round_trip() {
    let inner = int_array(&[1, 2, 3, 4], &[1, 3, 3, 4]);
    let outer = ArrayColumn::try_new(
        Column::Array(inner),
        Column::UInt64(PrimitiveColumn::from_vec(vec![2, 4])),
    )
    .unwrap();
    round_trip(&outer);
}

#[test]
fn deserialization_rejects_truncated_buffers() {
    let col = int_array(&[1, 2], &[2]);
    let mut arena = ScratchArena::new();
    let span = col.serialize_value_into_arena(0, &mut arena);
    assert_eq!(span, 0..8 + 2 * 8);

    let mut rebuilt = col.clone_empty();
    let truncated = &arena.as_slice()[..arena.len() - 1];
    assert!(rebuilt
        .deserialize_and_insert_from_arena(truncated, 0)
        .is_err());
}

#[test]
fn serialized_rows_can_interleave_with_other_writes() {
    // one arena shared by two columns, as grouping states do
    let left = int_array(&[1, 2, 3], &[2, 3]);
    let right = string_array(&["xy", "z"], &[1, 2]);
    let mut arena = ScratchArena::new();

    let l0 = left.serialize_value_into_arena(0, &mut arena);
    let r0 = right.serialize_value_into_arena(0, &mut arena);
    let l1 = left.serialize_value_into_arena(1, &mut arena);
    let r1 = right.serialize_value_into_arena(1, &mut arena);

    let mut left_rebuilt = left.clone_empty();
    let mut right_rebuilt = right.clone_empty();
    let buf = arena.as_slice();
    assert_eq!(
        left_rebuilt
            .deserialize_and_insert_from_arena(buf, l0.start)
            .unwrap(),
        l0.end
    );
    assert_eq!(
        left_rebuilt
            .deserialize_and_insert_from_arena(buf, l1.start)
            .unwrap(),
        l1.end
    );
    assert_eq!(
        right_rebuilt
            .deserialize_and_insert_from_arena(buf, r0.start)
            .unwrap(),
        r0.end
    );
    assert_eq!(
        right_rebuilt
            .deserialize_and_insert_from_arena(buf, r1.start)
            .unwrap(),
        r1.end
    );
    assert_eq!(left_rebuilt, left);
    assert_eq!(right_rebuilt, right);
}
