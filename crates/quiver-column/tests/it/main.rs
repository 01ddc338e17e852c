mod filter;
mod hashing;
mod ordering;
mod replicate;
mod serialize;

use quiver_column::{ArrayColumn, Column, PrimitiveColumn, StringColumn};

/// `Array(Int64)` from flattened elements and cumulative offsets.
pub fn int_array(data: &[i64], offsets: &[u64]) -> ArrayColumn {
    ArrayColumn::try_new(
        Column::Int64(PrimitiveColumn::from_vec(data.to_vec())),
        Column::UInt64(PrimitiveColumn::from_vec(offsets.to_vec())),
    )
    .unwrap()
}

/// `Array(String)` from flattened strings and cumulative offsets.
pub fn string_array(data: &[&str], offsets: &[u64]) -> ArrayColumn {
    ArrayColumn::try_new(
        Column::String(StringColumn::from_slice(data)),
        Column::UInt64(PrimitiveColumn::from_vec(offsets.to_vec())),
    )
    .unwrap()
}

/// `Array(Nullable(Int64))` from flattened elements, their null map and
/// cumulative offsets.
pub fn nullable_array(data: &[i64], nulls: &[u8], offsets: &[u64]) -> ArrayColumn {
    let nested = quiver_column::NullableColumn::try_new(
        Column::Int64(PrimitiveColumn::from_vec(data.to_vec())),
        PrimitiveColumn::from_vec(nulls.to_vec()),
    )
    .unwrap();
    ArrayColumn::try_new(
        Column::Nullable(nested),
        Column::UInt64(PrimitiveColumn::from_vec(offsets.to_vec())),
    )
    .unwrap()
}

/// The offsets/element-count invariant that must hold after every operator.
pub fn assert_consistent(col: &ArrayColumn) {
    if !col.offsets().is_empty() {
        assert_eq!(col.data().len() as u64, col.offsets().last());
    }
    let raw = col.offsets().as_slice();
    assert!(raw.windows(2).all(|w| w[0] <= w[1]));
}

/// Materializes every row for structural comparisons in tests.
pub fn rows(col: &ArrayColumn) -> Vec<quiver_column::Value> {
    (0..col.len()).map(|i| col.get(i).unwrap()).collect()
}
