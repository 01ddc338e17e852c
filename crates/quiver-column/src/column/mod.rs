//! The closed set of column variants and the bulk-operator surface every
//! variant supports.
//!
//! Operator dispatch is a `match` over this enum; adding a leaf kind means
//! adding a variant arm, never subclassing. Binary operations (copying rows
//! between columns, comparing rows) require both sides to be the same
//! variant and fail with an internal error otherwise.

use std::cmp::Ordering;
use std::hash::Hasher;
use std::ops::Range;

use quiver_error::{quiver_bail, Result};

use crate::arena::Arena;
use crate::ord::NanDirection;
use crate::types::Value;

pub mod array;
pub mod constant;
pub mod nullable;
pub mod primitive;
pub mod string;

use array::ArrayColumn;
use constant::ConstColumn;
use nullable::NullableColumn;
use primitive::PrimitiveColumn;
use string::StringColumn;

/// Row indices describing a reordering or a prefix selection of rows.
pub type Permutation = Vec<usize>;

#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    UInt8(PrimitiveColumn<u8>),
    Int8(PrimitiveColumn<i8>),
    Int16(PrimitiveColumn<i16>),
    Int32(PrimitiveColumn<i32>),
    Int64(PrimitiveColumn<i64>),
    UInt32(PrimitiveColumn<u32>),
    UInt64(PrimitiveColumn<u64>),
    Float32(PrimitiveColumn<f32>),
    Float64(PrimitiveColumn<f64>),
    String(StringColumn),
    Nullable(NullableColumn),
    Const(ConstColumn),
    Array(ArrayColumn),
}

/// Applies `$body` to the concrete column bound as `$col`.
macro_rules! with_each_column {
    ($self:expr, $col:ident => $body:expr) => {
        match $self {
            Column::UInt8($col) => $body,
            Column::Int8($col) => $body,
            Column::Int16($col) => $body,
            Column::Int32($col) => $body,
            Column::Int64($col) => $body,
            Column::UInt32($col) => $body,
            Column::UInt64($col) => $body,
            Column::Float32($col) => $body,
            Column::Float64($col) => $body,
            Column::String($col) => $body,
            Column::Nullable($col) => $body,
            Column::Const($col) => $body,
            Column::Array($col) => $body,
        }
    };
}

/// Like [`with_each_column!`], rewrapping the produced concrete column into
/// the matching variant.
macro_rules! with_each_column_to_column {
    ($self:expr, $col:ident => $body:expr) => {
        match $self {
            Column::UInt8($col) => Column::UInt8($body),
            Column::Int8($col) => Column::Int8($body),
            Column::Int16($col) => Column::Int16($body),
            Column::Int32($col) => Column::Int32($body),
            Column::Int64($col) => Column::Int64($body),
            Column::UInt32($col) => Column::UInt32($body),
            Column::UInt64($col) => Column::UInt64($body),
            Column::Float32($col) => Column::Float32($body),
            Column::Float64($col) => Column::Float64($body),
            Column::String($col) => Column::String($body),
            Column::Nullable($col) => Column::Nullable($body),
            Column::Const($col) => Column::Const($body),
            Column::Array($col) => Column::Array($body),
        }
    };
}

/// Applies `$body` to two columns of the same variant; the last arm receives
/// the mismatched pair.
macro_rules! with_matched_columns {
    ($lhs:expr, $rhs:expr, ($l:ident, $r:ident) => $body:expr, else ($le:ident, $re:ident) => $mismatch:expr) => {
        match ($lhs, $rhs) {
            (Column::UInt8($l), Column::UInt8($r)) => $body,
            (Column::Int8($l), Column::Int8($r)) => $body,
            (Column::Int16($l), Column::Int16($r)) => $body,
            (Column::Int32($l), Column::Int32($r)) => $body,
            (Column::Int64($l), Column::Int64($r)) => $body,
            (Column::UInt32($l), Column::UInt32($r)) => $body,
            (Column::UInt64($l), Column::UInt64($r)) => $body,
            (Column::Float32($l), Column::Float32($r)) => $body,
            (Column::Float64($l), Column::Float64($r)) => $body,
            (Column::String($l), Column::String($r)) => $body,
            (Column::Nullable($l), Column::Nullable($r)) => $body,
            (Column::Const($l), Column::Const($r)) => $body,
            (Column::Array($l), Column::Array($r)) => $body,
            ($le, $re) => $mismatch,
        }
    };
}

impl Column {
    /// Number of logical rows.
    #[inline]
    pub fn len(&self) -> usize {
        with_each_column!(self, col => col.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The column shape, e.g. `"Array(Nullable(Int32))"`.
    pub fn name(&self) -> String {
        with_each_column!(self, col => col.name())
    }

    /// Whether elements of this column carry a null marker.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        matches!(self, Column::Nullable(_))
    }

    #[inline]
    pub fn is_const(&self) -> bool {
        matches!(self, Column::Const(_))
    }

    /// Materializes a const column into a full one; identity for full
    /// columns.
    pub fn to_full(self) -> Result<Column> {
        match self {
            Column::Const(col) => col.to_full(),
            other => Ok(other),
        }
    }

    /// An empty column of the same shape.
    pub fn clone_empty(&self) -> Column {
        with_each_column_to_column!(self, col => col.clone_empty())
    }

    /// A copy truncated or extended with default rows to exactly `n` rows.
    pub fn clone_resized(&self, n: usize) -> Column {
        with_each_column_to_column!(self, col => col.clone_resized(n))
    }

    pub fn byte_size(&self) -> usize {
        with_each_column!(self, col => col.byte_size())
    }

    pub fn allocated_bytes(&self) -> usize {
        with_each_column!(self, col => col.allocated_bytes())
    }

    pub fn reserve(&mut self, additional: usize) {
        with_each_column!(self, col => col.reserve(additional))
    }

    /// Grows with default rows or truncates to exactly `n` rows.
    pub fn resize(&mut self, n: usize) {
        with_each_column!(self, col => col.resize(n))
    }

    /// Removes the last `n` rows.
    pub fn pop_back(&mut self, n: usize) {
        with_each_column!(self, col => col.pop_back(n))
    }

    /// Removes rows `[start, start + length)`, clamped to the column.
    pub fn erase(&mut self, start: usize, length: usize) {
        with_each_column!(self, col => col.erase(start, length))
    }

    /// Appends one default row (zero, empty string, null, empty array).
    pub fn insert_default(&mut self) {
        with_each_column!(self, col => col.insert_default())
    }

    /// Whether row `row` holds the default value of this column.
    pub fn is_default_at(&self, row: usize) -> bool {
        with_each_column!(self, col => col.is_default_at(row))
    }

    /// Materializes row `row` as an owned [`Value`].
    pub fn get(&self, row: usize) -> Result<Value> {
        with_each_column!(self, col => col.get(row))
    }

    /// Appends one row from a value of this column's type.
    pub fn insert(&mut self, value: &Value) -> Result<()> {
        with_each_column!(self, col => col.insert(value))
    }

    /// Appends row `row` of `src`, which must be of the same variant.
    pub fn insert_from(&mut self, src: &Column, row: usize) -> Result<()> {
        with_matched_columns!(self, src, (l, r) => l.insert_from(r, row),
            else (l, r) => {
                quiver_bail!(
                    InternalError: "cannot insert a row of '{}' into '{}'",
                    r.name(),
                    l.name()
                )
            })
    }

    /// Appends rows `[start, start + length)` of `src`, which must be of the
    /// same variant.
    pub fn insert_range_from(&mut self, src: &Column, start: usize, length: usize) -> Result<()> {
        with_matched_columns!(self, src, (l, r) => l.insert_range_from(r, start, length),
            else (l, r) => {
                quiver_bail!(
                    InternalError: "cannot insert rows of '{}' into '{}'",
                    r.name(),
                    l.name()
                )
            })
    }

    /// Appends `src[row]` for every row index in `indices`.
    pub fn insert_indices_from(&mut self, src: &Column, indices: &[usize]) -> Result<()> {
        for &row in indices {
            self.insert_from(src, row)?;
        }
        Ok(())
    }

    /// Appends row `row` of `src` `times` times.
    pub fn insert_many_from(&mut self, src: &Column, row: usize, times: usize) -> Result<()> {
        for _ in 0..times {
            self.insert_from(src, row)?;
        }
        Ok(())
    }

    /// Rows where `mask` is true, in order. `size_hint` drives preallocation
    /// only and never changes the result.
    pub fn filter(&self, mask: &[bool], size_hint: Option<usize>) -> Result<Column> {
        Ok(with_each_column_to_column!(self, col => col.filter(mask, size_hint)?))
    }

    /// In-place variant of [`filter`](Column::filter); returns the new row
    /// count.
    pub fn filter_in_place(&mut self, mask: &[bool]) -> Result<usize> {
        with_each_column!(self, col => col.filter_in_place(mask))
    }

    /// Repeats row `i` `replicate_offsets[i] - replicate_offsets[i - 1]`
    /// times, in row order.
    pub fn replicate(&self, replicate_offsets: &[u64]) -> Result<Column> {
        Ok(with_each_column_to_column!(self, col => col.replicate(replicate_offsets)?))
    }

    /// A column whose row `i` equals this column's row `perm[i]`, for
    /// `i < limit` (`limit == 0` keeps all rows of `perm`'s prefix).
    pub fn permute(&self, perm: &[usize], limit: usize) -> Result<Column> {
        Ok(with_each_column_to_column!(self, col => col.permute(perm, limit)?))
    }

    /// Row indices in sorted order. The sort is comparison-based and
    /// unstable; rows comparing equal may appear in either relative order.
    pub fn get_permutation(
        &self,
        reverse: bool,
        limit: usize,
        nan_direction: NanDirection,
    ) -> Permutation {
        with_each_column!(self, col => col.get_permutation(reverse, limit, nan_direction))
    }

    /// Three-way comparison of `self[n]` against `other[m]`; `other` must be
    /// of the same variant.
    pub fn compare_at(
        &self,
        n: usize,
        m: usize,
        other: &Column,
        nan_direction: NanDirection,
    ) -> Result<Ordering> {
        with_matched_columns!(self, other, (l, r) => l.compare_at(n, m, r, nan_direction),
            else (l, r) => {
                quiver_bail!(
                    InternalError: "cannot compare '{}' with '{}'",
                    l.name(),
                    r.name()
                )
            })
    }

    /// Serializes row `row` into `arena`; returns the byte span written.
    pub fn serialize_value_into_arena(&self, row: usize, arena: &mut dyn Arena) -> Range<usize> {
        with_each_column!(self, col => col.serialize_value_into_arena(row, arena))
    }

    /// Reads one row serialized at `buf[pos..]`, appends it, and returns the
    /// advanced read position.
    pub fn deserialize_and_insert_from_arena(&mut self, buf: &[u8], pos: usize) -> Result<usize> {
        with_each_column!(self, col => col.deserialize_and_insert_from_arena(buf, pos))
    }

    /// Feeds row `row` into a running hash state.
    pub fn update_hash_with_value<H: Hasher>(&self, row: usize, state: &mut H) {
        with_each_column!(self, col => col.update_hash_with_value(row, state))
    }

    /// Folds rows `[start, end)` into `hash` with seeded xxHash64 chaining.
    /// Rows whose `null_data` byte is non-zero are skipped.
    pub fn update_xxhash_with_value(
        &self,
        start: usize,
        end: usize,
        hash: &mut u64,
        null_data: Option<&[u8]>,
    ) {
        with_each_column!(self, col => col.update_xxhash_with_value(start, end, hash, null_data))
    }

    /// Folds rows `[start, end)` into `hash` as a continued CRC32. Rows whose
    /// `null_data` byte is non-zero are skipped.
    pub fn update_crc_with_value(
        &self,
        start: usize,
        end: usize,
        hash: &mut u32,
        null_data: Option<&[u8]>,
    ) {
        with_each_column!(self, col => col.update_crc_with_value(start, end, hash, null_data))
    }

    /// Mixes each row into its own hash slot; `hashes.len()` must equal
    /// `len()`.
    pub fn update_hashes_with_value(&self, hashes: &mut [u64], null_data: Option<&[u8]>) {
        debug_assert_eq!(hashes.len(), self.len());
        match null_data {
            Some(nulls) => {
                for (i, hash) in hashes.iter_mut().enumerate() {
                    if nulls[i] == 0 {
                        self.update_xxhash_with_value(i, i + 1, hash, None);
                    }
                }
            },
            None => {
                for (i, hash) in hashes.iter_mut().enumerate() {
                    self.update_xxhash_with_value(i, i + 1, hash, None);
                }
            },
        }
    }

    /// CRC32 counterpart of [`update_hashes_with_value`](Column::update_hashes_with_value).
    pub fn update_crcs_with_value(&self, hashes: &mut [u32], null_data: Option<&[u8]>) {
        debug_assert_eq!(hashes.len(), self.len());
        match null_data {
            Some(nulls) => {
                for (i, hash) in hashes.iter_mut().enumerate() {
                    if nulls[i] == 0 {
                        self.update_crc_with_value(i, i + 1, hash, None);
                    }
                }
            },
            None => {
                for (i, hash) in hashes.iter_mut().enumerate() {
                    self.update_crc_with_value(i, i + 1, hash, None);
                }
            },
        }
    }
}

/// Index sort shared by every variant's `get_permutation`: unstable, with a
/// partial sort when only a meaningful prefix of `limit` rows is requested.
pub(crate) fn sort_indices(
    len: usize,
    reverse: bool,
    limit: usize,
    cmp: impl Fn(usize, usize) -> Ordering,
) -> Permutation {
    let mut perm: Permutation = (0..len).collect();
    let compare = |a: &usize, b: &usize| {
        let ord = cmp(*a, *b);
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    };
    if limit > 0 && limit < len {
        perm.select_nth_unstable_by(limit, compare);
        perm[..limit].sort_unstable_by(compare);
    } else {
        perm.sort_unstable_by(compare);
    }
    perm
}
