//! Nested (array) column: one array value per row, stored as a flattened
//! element column plus the cumulative per-row length index.
//!
//! Row `i` covers the nested element range
//! `[offset_at(i), offset_at(i) + size_at(i))`; every operator below is
//! phrased over that range. Two invariants hold at construction and after
//! every mutation: the offsets never decrease, and once the index is
//! non-empty its last entry equals the element column's length.

use std::cmp::Ordering;
use std::hash::Hasher;
use std::ops::Range;

use quiver_error::{quiver_bail, quiver_ensure, Result};
use xxhash_rust::xxh64::xxh64;

use crate::arena::{read_u64, write_bytes, Arena};
use crate::column::nullable::NullableColumn;
use crate::column::primitive::{crc_continue, resolve_permute_limit, PrimitiveColumn};
use crate::column::string::StringColumn;
use crate::column::{sort_indices, Column, Permutation};
use crate::offsets::{rebased_range, Offsets};
use crate::ord::NanDirection;
use crate::types::{NativeType, Value, MAX_ARRAY_SIZE_AS_VALUE};

pub(crate) mod filter;
pub(crate) mod replicate;

use filter::{
    filter_arrays_impl, filter_arrays_impl_only_data, filter_arrays_in_place,
    filter_string_arrays, filter_string_arrays_in_place,
};
use replicate::{replicate_arrays_impl, replicate_string_arrays};

/// Dispatches on the concrete element column: one arm instantiated per
/// fixed-width type, then whatever trailing arms the call site adds for
/// text, nullable and the generic fallback.
macro_rules! dispatch_nested {
    ($data:expr, $col:ident => $numeric:expr, $($rest:tt)*) => {
        match $data {
            Column::UInt8($col) => $numeric,
            Column::Int8($col) => $numeric,
            Column::Int16($col) => $numeric,
            Column::Int32($col) => $numeric,
            Column::Int64($col) => $numeric,
            Column::UInt32($col) => $numeric,
            Column::UInt64($col) => $numeric,
            Column::Float32($col) => $numeric,
            Column::Float64($col) => $numeric,
            $($rest)*
        }
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct ArrayColumn {
    data: Box<Column>,
    offsets: Offsets,
}

impl ArrayColumn {
    /// Builds an array column from its element column and its offsets
    /// column. Const inputs are materialized first; the offsets column must
    /// be `UInt64`, non-decreasing, and end at the element count.
    pub fn try_new(data: Column, offsets: Column) -> Result<Self> {
        let data = data.to_full()?;
        let offsets = offsets.to_full()?;
        let offsets = match offsets {
            Column::UInt64(col) => Offsets::try_from_vec(col.into_vec())?,
            other => {
                quiver_bail!(InternalError: "offsets column must be UInt64, got '{}'", other.name())
            },
        };
        if !offsets.is_empty() && data.len() as u64 != offsets.last() {
            quiver_bail!(
                InternalError: "element column's size {} is not consistent with offsets column's {}",
                data.len(),
                offsets.last()
            );
        }
        Ok(Self {
            data: Box::new(data),
            offsets,
        })
    }

    /// Builds an empty array column over an (empty) element column; the
    /// offsets index starts empty.
    pub fn from_data(data: Column) -> Result<Self> {
        let data = data.to_full()?;
        quiver_ensure!(
            data.is_empty(),
            InternalError: "non-empty element column passed without an offsets column"
        );
        Ok(Self {
            data: Box::new(data),
            offsets: Offsets::new(),
        })
    }

    /// Panicking form of [`try_new`](ArrayColumn::try_new).
    ///
    /// # Panics
    /// Iff [`try_new`](ArrayColumn::try_new) would error.
    pub fn new(data: Column, offsets: Column) -> Self {
        Self::try_new(data, offsets).unwrap()
    }

    /// Assembles a column from parts an operator has already made
    /// consistent.
    pub(crate) fn from_parts(data: Column, offsets: Offsets) -> Self {
        debug_assert!(offsets.is_empty() || data.len() as u64 == offsets.last());
        Self {
            data: Box::new(data),
            offsets,
        }
    }

    pub(crate) fn into_parts(self) -> (Column, Offsets) {
        (*self.data, self.offsets)
    }

    /// The flattened element column.
    #[inline]
    pub fn data(&self) -> &Column {
        &self.data
    }

    #[inline]
    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    /// Number of logical rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Start of row `row` in the element column.
    #[inline]
    pub fn offset_at(&self, row: usize) -> u64 {
        self.offsets.offset_at(row)
    }

    /// Element count of row `row`.
    #[inline]
    pub fn size_at(&self, row: usize) -> u64 {
        self.offsets.size_at(row)
    }

    pub fn name(&self) -> String {
        format!("Array({})", self.data.name())
    }

    pub fn clone_empty(&self) -> Self {
        Self {
            data: Box::new(self.data.clone_empty()),
            offsets: Offsets::new(),
        }
    }

    pub fn clone_resized(&self, n: usize) -> Self {
        if n == 0 {
            return self.clone_empty();
        }
        if n <= self.len() {
            let offsets = Offsets::new_unchecked(self.offsets.as_slice()[..n].to_vec());
            let data = self.data.clone_resized(offsets.last() as usize);
            Self::from_parts(data, offsets)
        } else {
            let mut offsets = self.offsets.clone();
            offsets.extend_constant(n - self.len());
            Self::from_parts((*self.data).clone(), offsets)
        }
    }

    pub fn byte_size(&self) -> usize {
        self.data.byte_size() + self.offsets.byte_size()
    }

    pub fn allocated_bytes(&self) -> usize {
        self.data.allocated_bytes() + self.offsets.allocated_bytes()
    }

    /// The average row length is not taken into account here, or considered
    /// to be no more than 1.
    pub fn reserve(&mut self, additional: usize) {
        self.offsets.reserve(additional);
        self.data.reserve(additional);
    }

    /// Grows with empty rows or truncates to exactly `n` rows, resizing the
    /// element column to match the new last offset.
    pub fn resize(&mut self, n: usize) {
        if n <= self.len() {
            self.offsets.truncate(n);
        } else {
            self.offsets.extend_constant(n - self.len());
        }
        self.data.resize(self.offsets.last() as usize);
    }

    /// Removes the last `n` rows and the elements they cover.
    pub fn pop_back(&mut self, n: usize) {
        let n = n.min(self.len());
        if n == 0 {
            return;
        }
        let remaining = self.len() - n;
        let removed = (self.offsets.last() - self.offsets.offset_at(remaining)) as usize;
        if removed > 0 {
            self.data.pop_back(removed);
        }
        self.offsets.truncate(remaining);
    }

    /// Removes rows `[start, start + length)`, clamped to the column, and
    /// the contiguous element span they cover; every later offset drops by
    /// the removed element count.
    pub fn erase(&mut self, start: usize, length: usize) {
        if start >= self.len() || length == 0 {
            return;
        }
        let length = length.min(self.len() - start);
        let data_start = self.offsets.offset_at(start) as usize;
        let removed = self.offsets.erase(start, length) as usize;
        self.data.erase(data_start, removed);
    }

    /// Appends an empty row.
    pub fn insert_default(&mut self) {
        self.offsets.push_length(0);
    }

    /// Whether row `row` is empty.
    pub fn is_default_at(&self, row: usize) -> bool {
        self.offsets.size_at(row) == 0
    }

    pub fn has_equal_offsets(&self, other: &Self) -> bool {
        self.offsets.as_slice() == other.offsets.as_slice()
    }

    /// Materializes row `row` as an owned array value. Rows longer than
    /// [`MAX_ARRAY_SIZE_AS_VALUE`] cannot be boxed as one scalar value and
    /// are rejected as invalid input data.
    pub fn get(&self, row: usize) -> Result<Value> {
        quiver_ensure!(
            row < self.len(),
            InternalError: "row {} out of bounds in {} column of {} rows",
            row,
            self.name(),
            self.len()
        );
        let (start, end) = self.offsets.start_end(row);
        let size = (end - start) as u64;
        quiver_ensure!(
            size <= MAX_ARRAY_SIZE_AS_VALUE,
            InvalidArgument: "array of size {} in row {} is too large to be manipulated as a single value, maximum size {}",
            size,
            row,
            MAX_ARRAY_SIZE_AS_VALUE
        );
        let mut items = Vec::with_capacity(size as usize);
        for i in start..end {
            items.push(self.data.get(i)?);
        }
        Ok(Value::Array(items))
    }

    /// Appends one row. A null marker appends a single null element; an
    /// array value appends each of its elements.
    pub fn insert(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Null => {
                self.data.insert(&Value::Null)?;
                self.offsets.push_length(1);
            },
            Value::Array(items) => {
                for item in items {
                    self.data.insert(item)?;
                }
                self.offsets.push_length(items.len() as u64);
            },
            other => quiver_bail!(
                InternalError: "cannot insert a {} value into {}",
                other.kind(),
                self.name()
            ),
        }
        Ok(())
    }

    /// Copies one row from another array column. If the element nullability
    /// differs, rows of a non-nullable source are wrapped with null markers;
    /// the reverse adaptation is unsupported.
    pub fn insert_from(&mut self, src: &Self, row: usize) -> Result<()> {
        let length = src.offsets.size_at(row) as usize;
        let offset = src.offsets.offset_at(row) as usize;
        match (self.data.as_mut(), src.data.as_ref()) {
            (Column::Nullable(dst), src_data) if !src_data.is_nullable() => {
                dst.insert_range_from_not_nullable(src_data, offset, length)?;
            },
            (dst, src_data) if dst.is_nullable() == src_data.is_nullable() => {
                dst.insert_range_from(src_data, offset, length)?;
            },
            (dst, src_data) => {
                quiver_bail!(
                    InternalError: "cannot insert a row of 'Array({})' into 'Array({})'",
                    src_data.name(),
                    dst.name()
                );
            },
        }
        self.offsets.push_length(length as u64);
        Ok(())
    }

    /// Copies rows `[start, start + length)` of `src`, rebasing the copied
    /// offsets onto this column's running total.
    pub fn insert_range_from(&mut self, src: &Self, start: usize, length: usize) -> Result<()> {
        if length == 0 {
            return Ok(());
        }
        quiver_ensure!(
            start + length <= src.len(),
            InternalError: "parameter out of bound in array range insert: start {} + length {} > {} rows",
            start,
            length,
            src.len()
        );
        let nested_offset = src.offsets.offset_at(start) as usize;
        let nested_length =
            (src.offsets.as_slice()[start + length - 1] - nested_offset as u64) as usize;
        self.data
            .insert_range_from(&src.data, nested_offset, nested_length)?;
        for offset in rebased_range(src.offsets.as_slice(), start, length, self.offsets.last()) {
            self.offsets.push_offset(offset);
        }
        Ok(())
    }

    /// Appends `src[row]` for every row index in `indices`.
    pub fn insert_indices_from(&mut self, src: &Self, indices: &[usize]) -> Result<()> {
        for &row in indices {
            self.insert_from(src, row)?;
        }
        Ok(())
    }

    /// Appends row `row` of `src` `times` times.
    pub fn insert_many_from(&mut self, src: &Self, row: usize, times: usize) -> Result<()> {
        for _ in 0..times {
            self.insert_from(src, row)?;
        }
        Ok(())
    }

    /// Rows where `mask` is true, in order. `size_hint` drives preallocation
    /// only.
    pub fn filter(&self, mask: &[bool], size_hint: Option<usize>) -> Result<Self> {
        quiver_ensure!(
            mask.len() == self.len(),
            InternalError: "filter mask has {} entries for {} rows",
            mask.len(),
            self.len()
        );
        if self.is_empty() {
            return Ok(self.clone_empty());
        }
        dispatch_nested!(self.data.as_ref(), col => self.filter_number(col, mask, size_hint),
            Column::String(col) => self.filter_string(col, mask, size_hint),
            Column::Nullable(col) => self.filter_nullable(col, mask, size_hint),
            _ => self.filter_generic(mask, size_hint),
        )
    }

    /// In-place form of [`filter`](ArrayColumn::filter); returns the new row
    /// count.
    pub fn filter_in_place(&mut self, mask: &[bool]) -> Result<usize> {
        quiver_ensure!(
            mask.len() == self.len(),
            InternalError: "filter mask has {} entries for {} rows",
            mask.len(),
            self.len()
        );
        if self.is_empty() {
            return Ok(0);
        }
        dispatch_nested!(self.data.as_mut(),
            col => Ok(filter_arrays_in_place(col.values_mut(), &mut self.offsets, mask)),
            Column::String(col) => {
                let (chars, str_offsets) = col.parts_mut();
                Ok(filter_string_arrays_in_place(chars, str_offsets, &mut self.offsets, mask))
            },
            _ => self.filter_generic_in_place(mask),
        )
    }

    fn filter_number<T: NativeType>(
        &self,
        nested: &PrimitiveColumn<T>,
        mask: &[bool],
        size_hint: Option<usize>,
    ) -> Result<Self> {
        let (values, offsets) =
            filter_arrays_impl(nested.values(), self.offsets.as_slice(), mask, size_hint);
        Ok(Self::from_parts(
            T::upcast_column(PrimitiveColumn::from_vec(values)),
            Offsets::new_unchecked(offsets),
        ))
    }

    fn filter_string(
        &self,
        nested: &StringColumn,
        mask: &[bool],
        size_hint: Option<usize>,
    ) -> Result<Self> {
        let (chars, str_offsets, arr_offsets) = filter_string_arrays(
            nested.chars(),
            nested.offsets().as_slice(),
            self.offsets.as_slice(),
            mask,
            size_hint,
        );
        Ok(Self::from_parts(
            Column::String(StringColumn::from_parts(
                chars,
                Offsets::new_unchecked(str_offsets),
            )),
            Offsets::new_unchecked(arr_offsets),
        ))
    }

    /// Decomposes the nullable elements into (values as array, null map as
    /// array), filters both through the array logic, and recombines.
    fn filter_nullable(
        &self,
        nested: &NullableColumn,
        mask: &[bool],
        size_hint: Option<usize>,
    ) -> Result<Self> {
        let values_as_array = Self::from_parts(nested.nested().clone(), self.offsets.clone());
        let filtered = values_as_array.filter(mask, size_hint)?;
        let null_map = filter_arrays_impl_only_data(
            nested.null_map().values(),
            self.offsets.as_slice(),
            mask,
            size_hint,
        );
        let (values, offsets) = filtered.into_parts();
        quiver_ensure!(
            values.len() == null_map.len(),
            InternalError: "nullable filter produced {} values but {} null entries",
            values.len(),
            null_map.len()
        );
        Ok(Self::from_parts(
            Column::Nullable(NullableColumn::from_parts(
                values,
                PrimitiveColumn::from_vec(null_map),
            )),
            offsets,
        ))
    }

    /// Broadcasts the row mask to one entry per element and delegates to the
    /// element column's own filter.
    fn filter_generic(&self, mask: &[bool], size_hint: Option<usize>) -> Result<Self> {
        let (nested_mask, nested_hint) = self.expand_mask(mask);
        let data = self.data.filter(&nested_mask, Some(nested_hint))?;
        let mut offsets = Offsets::with_capacity(size_hint.unwrap_or(self.len()));
        for (i, &keep) in mask.iter().enumerate() {
            if keep {
                offsets.push_length(self.offsets.size_at(i));
            }
        }
        Ok(Self::from_parts(data, offsets))
    }

    fn filter_generic_in_place(&mut self, mask: &[bool]) -> Result<usize> {
        let (nested_mask, _) = self.expand_mask(mask);
        self.data.filter_in_place(&nested_mask)?;
        let mut offsets = Offsets::with_capacity(self.len());
        for (i, &keep) in mask.iter().enumerate() {
            if keep {
                offsets.push_length(self.offsets.size_at(i));
            }
        }
        self.offsets = offsets;
        Ok(self.offsets.len())
    }

    fn expand_mask(&self, mask: &[bool]) -> (Vec<bool>, usize) {
        let mut nested_mask = vec![false; self.offsets.last() as usize];
        let mut kept_elements = 0;
        for (i, &keep) in mask.iter().enumerate() {
            if keep {
                let (start, end) = self.offsets.start_end(i);
                nested_mask[start..end].fill(true);
                kept_elements += end - start;
            }
        }
        (nested_mask, kept_elements)
    }

    /// A column in which row `i` appears
    /// `replicate_offsets[i] - replicate_offsets[i - 1]` consecutive times.
    pub fn replicate(&self, replicate_offsets: &[u64]) -> Result<Self> {
        quiver_ensure!(
            replicate_offsets.len() == self.len(),
            InternalError: "replicate offsets have {} entries for {} rows",
            replicate_offsets.len(),
            self.len()
        );
        if self.is_empty() {
            return Ok(self.clone_empty());
        }
        dispatch_nested!(self.data.as_ref(), col => self.replicate_number(col, replicate_offsets),
            Column::String(col) => self.replicate_string(col, replicate_offsets),
            Column::Nullable(col) => self.replicate_nullable(col, replicate_offsets),
            _ => self.replicate_generic(replicate_offsets),
        )
    }

    fn replicate_number<T: NativeType>(
        &self,
        nested: &PrimitiveColumn<T>,
        replicate_offsets: &[u64],
    ) -> Result<Self> {
        let (values, offsets) =
            replicate_arrays_impl(nested.values(), self.offsets.as_slice(), replicate_offsets);
        Ok(Self::from_parts(
            T::upcast_column(PrimitiveColumn::from_vec(values)),
            Offsets::new_unchecked(offsets),
        ))
    }

    fn replicate_string(
        &self,
        nested: &StringColumn,
        replicate_offsets: &[u64],
    ) -> Result<Self> {
        let (chars, str_offsets, arr_offsets) = replicate_string_arrays(
            nested.chars(),
            nested.offsets().as_slice(),
            self.offsets.as_slice(),
            replicate_offsets,
        );
        Ok(Self::from_parts(
            Column::String(StringColumn::from_parts(
                chars,
                Offsets::new_unchecked(str_offsets),
            )),
            Offsets::new_unchecked(arr_offsets),
        ))
    }

    /// Replicates values and null map as two independent array replications
    /// sharing this column's offsets, then recombines.
    fn replicate_nullable(
        &self,
        nested: &NullableColumn,
        replicate_offsets: &[u64],
    ) -> Result<Self> {
        let values_as_array = Self::from_parts(nested.nested().clone(), self.offsets.clone())
            .replicate(replicate_offsets)?;
        let nulls_as_array =
            Self::from_parts(Column::UInt8(nested.null_map().clone()), self.offsets.clone())
                .replicate(replicate_offsets)?;
        quiver_ensure!(
            values_as_array.has_equal_offsets(&nulls_as_array),
            InternalError: "nullable replication produced diverging offsets"
        );
        let (values, offsets) = values_as_array.into_parts();
        let (null_values, _) = nulls_as_array.into_parts();
        let null_map = match null_values {
            Column::UInt8(map) => map,
            other => quiver_bail!(
                InternalError: "null map must stay a UInt8 column, got '{}'",
                other.name()
            ),
        };
        Ok(Self::from_parts(
            Column::Nullable(NullableColumn::from_parts(values, null_map)),
            offsets,
        ))
    }

    fn replicate_generic(&self, replicate_offsets: &[u64]) -> Result<Self> {
        let mut res = self.clone_empty();
        let mut prev = 0u64;
        for (i, &rep) in replicate_offsets.iter().enumerate() {
            for _ in prev..rep {
                res.insert_from(self, i)?;
            }
            prev = rep;
        }
        Ok(res)
    }

    /// A column whose row `i` equals this column's row `perm[i]`, for
    /// `i < limit`. The element permutation is composed first, then the
    /// element column permutes itself.
    pub fn permute(&self, perm: &[usize], limit: usize) -> Result<Self> {
        let limit = resolve_permute_limit(self.len(), perm.len(), limit)?;
        if limit == 0 {
            return Ok(self.clone_empty());
        }
        let mut offsets = Offsets::with_capacity(limit);
        let mut nested_perm: Permutation = Vec::with_capacity(self.data.len());
        for &row in &perm[..limit] {
            quiver_ensure!(
                row < self.len(),
                InternalError: "permutation index {} out of bounds for {} rows",
                row,
                self.len()
            );
            offsets.push_length(self.offsets.size_at(row));
            let (start, end) = self.offsets.start_end(row);
            nested_perm.extend(start..end);
        }
        let data = if nested_perm.is_empty() {
            self.data.clone_empty()
        } else {
            self.data.permute(&nested_perm, nested_perm.len())?
        };
        Ok(Self::from_parts(data, offsets))
    }

    /// Row indices sorted by the array comparator. The sort is unstable:
    /// rows comparing equal may appear in either relative order. When
    /// `limit` is non-zero only the first `limit` indices are meaningfully
    /// ordered.
    pub fn get_permutation(
        &self,
        reverse: bool,
        limit: usize,
        nan_direction: NanDirection,
    ) -> Permutation {
        sort_indices(self.len(), reverse, limit, |a, b| {
            self.compare_at(a, b, self, nan_direction)
                // self comparison; element variants always match
                .unwrap_or(Ordering::Equal)
        })
    }

    /// Three-way comparison of `self[n]` against `other[m]`: elements are
    /// compared position by position over the shorter length; if that prefix
    /// is equal the shorter array sorts first.
    pub fn compare_at(
        &self,
        n: usize,
        m: usize,
        other: &Self,
        nan_direction: NanDirection,
    ) -> Result<Ordering> {
        let lhs_size = self.offsets.size_at(n);
        let rhs_size = other.offsets.size_at(m);
        let lhs_offset = self.offsets.offset_at(n) as usize;
        let rhs_offset = other.offsets.offset_at(m) as usize;
        for i in 0..lhs_size.min(rhs_size) as usize {
            let ord =
                self.data
                    .compare_at(lhs_offset + i, rhs_offset + i, &other.data, nan_direction)?;
            if ord != Ordering::Equal {
                return Ok(ord);
            }
        }
        Ok(lhs_size.cmp(&rhs_size))
    }

    /// Writes an 8-byte element count followed by each element's own arena
    /// encoding; returns the byte span written.
    pub fn serialize_value_into_arena(&self, row: usize, arena: &mut dyn Arena) -> Range<usize> {
        let span_start = arena.len();
        let (start, end) = self.offsets.start_end(row);
        write_bytes(arena, &((end - start) as u64).to_ne_bytes());
        for i in start..end {
            self.data.serialize_value_into_arena(i, arena);
        }
        span_start..arena.len()
    }

    /// Reads the element count, deserializes that many elements into the
    /// element column, and appends the new cumulative offset.
    pub fn deserialize_and_insert_from_arena(&mut self, buf: &[u8], pos: usize) -> Result<usize> {
        let (count, mut pos) = read_u64(buf, pos)?;
        for _ in 0..count {
            pos = self.data.deserialize_and_insert_from_arena(buf, pos)?;
        }
        self.offsets.push_length(count);
        Ok(pos)
    }

    /// Feeds every element of row `row` into the hash state, in order.
    pub fn update_hash_with_value<H: Hasher>(&self, row: usize, state: &mut H) {
        let (start, end) = self.offsets.start_end(row);
        for i in start..end {
            self.data.update_hash_with_value(i, state);
        }
    }

    /// Folds rows `[start, end)` into `hash`. An empty row mixes in its
    /// 0-length marker so it is distinguishable from an untouched slot; a
    /// row whose `null_data` byte is non-zero is skipped.
    pub fn update_xxhash_with_value(
        &self,
        start: usize,
        end: usize,
        hash: &mut u64,
        null_data: Option<&[u8]>,
    ) {
        for row in start..end {
            if null_data.is_some_and(|nulls| nulls[row] != 0) {
                continue;
            }
            let size = self.offsets.size_at(row);
            if size == 0 {
                *hash = xxh64(&size.to_ne_bytes(), *hash);
            } else {
                let (elem_start, elem_end) = self.offsets.start_end(row);
                self.data
                    .update_xxhash_with_value(elem_start, elem_end, hash, None);
            }
        }
    }

    /// CRC32 counterpart of
    /// [`update_xxhash_with_value`](ArrayColumn::update_xxhash_with_value).
    pub fn update_crc_with_value(
        &self,
        start: usize,
        end: usize,
        hash: &mut u32,
        null_data: Option<&[u8]>,
    ) {
        for row in start..end {
            if null_data.is_some_and(|nulls| nulls[row] != 0) {
                continue;
            }
            let size = self.offsets.size_at(row);
            if size == 0 {
                *hash = crc_continue(*hash, &size.to_ne_bytes());
            } else {
                let (elem_start, elem_end) = self.offsets.start_end(row);
                self.data
                    .update_crc_with_value(elem_start, elem_end, hash, None);
            }
        }
    }

    /// Mixes each row into its own hash slot; used for grouping/join keys.
    pub fn update_hashes_with_value(&self, hashes: &mut [u64], null_data: Option<&[u8]>) {
        debug_assert_eq!(hashes.len(), self.len());
        for (i, hash) in hashes.iter_mut().enumerate() {
            if null_data.is_some_and(|nulls| nulls[i] != 0) {
                continue;
            }
            self.update_xxhash_with_value(i, i + 1, hash, None);
        }
    }

    /// CRC32 counterpart of
    /// [`update_hashes_with_value`](ArrayColumn::update_hashes_with_value).
    pub fn update_crcs_with_value(&self, hashes: &mut [u32], null_data: Option<&[u8]>) {
        debug_assert_eq!(hashes.len(), self.len());
        for (i, hash) in hashes.iter_mut().enumerate() {
            if null_data.is_some_and(|nulls| nulls[i] != 0) {
                continue;
            }
            self.update_crc_with_value(i, i + 1, hash, None);
        }
    }
}
