//! Nullable leaf column: a nested column of the same length plus a byte
//! null map (1 = null). The null map is itself a `UInt8` column so that bulk
//! operators can decompose a nullable column into two parallel flat columns.

use std::cmp::Ordering;
use std::hash::Hasher;
use std::ops::Range;

use quiver_error::{quiver_ensure, Result};

use crate::arena::{read_bytes, write_bytes, Arena};
use crate::column::primitive::PrimitiveColumn;
use crate::column::{sort_indices, Column, Permutation};
use crate::ord::NanDirection;
use crate::types::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct NullableColumn {
    nested: Box<Column>,
    null_map: PrimitiveColumn<u8>,
}

impl NullableColumn {
    /// Wraps a nested column and its null map. The nested column must not be
    /// nullable or const, and the null map must have one byte per row.
    pub fn try_new(nested: Column, null_map: PrimitiveColumn<u8>) -> Result<Self> {
        quiver_ensure!(
            !nested.is_nullable(),
            InternalError: "nested column of a Nullable must not be Nullable itself"
        );
        quiver_ensure!(
            !nested.is_const(),
            InternalError: "nested column of a Nullable must be a full column"
        );
        quiver_ensure!(
            nested.len() == null_map.len(),
            InternalError: "null map has {} entries for {} rows",
            null_map.len(),
            nested.len()
        );
        Ok(Self {
            nested: Box::new(nested),
            null_map,
        })
    }

    /// Wraps a column with an all-valid null map.
    pub fn from_column(nested: Column) -> Result<Self> {
        let null_map = PrimitiveColumn::from_vec(vec![0u8; nested.len()]);
        Self::try_new(nested, null_map)
    }

    pub(crate) fn from_parts(nested: Column, null_map: PrimitiveColumn<u8>) -> Self {
        debug_assert!(!nested.is_nullable() && !nested.is_const());
        debug_assert_eq!(nested.len(), null_map.len());
        Self {
            nested: Box::new(nested),
            null_map,
        }
    }

    #[inline]
    pub fn nested(&self) -> &Column {
        &self.nested
    }

    #[inline]
    pub fn null_map(&self) -> &PrimitiveColumn<u8> {
        &self.null_map
    }

    #[inline]
    pub fn is_null_at(&self, row: usize) -> bool {
        self.null_map.values()[row] != 0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.null_map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.null_map.is_empty()
    }

    pub fn name(&self) -> String {
        format!("Nullable({})", self.nested.name())
    }

    pub fn clone_empty(&self) -> Self {
        Self {
            nested: Box::new(self.nested.clone_empty()),
            null_map: PrimitiveColumn::new(),
        }
    }

    pub fn clone_resized(&self, n: usize) -> Self {
        Self {
            nested: Box::new(self.nested.clone_resized(n)),
            null_map: self.null_map.clone_resized(n),
        }
    }

    pub fn byte_size(&self) -> usize {
        self.nested.byte_size() + self.null_map.byte_size()
    }

    pub fn allocated_bytes(&self) -> usize {
        self.nested.allocated_bytes() + self.null_map.allocated_bytes()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.nested.reserve(additional);
        self.null_map.reserve(additional);
    }

    pub fn resize(&mut self, n: usize) {
        self.nested.resize(n);
        self.null_map.resize(n);
    }

    pub fn pop_back(&mut self, n: usize) {
        self.nested.pop_back(n);
        self.null_map.pop_back(n);
    }

    pub fn erase(&mut self, start: usize, length: usize) {
        self.nested.erase(start, length);
        self.null_map.erase(start, length);
    }

    /// The default of a nullable column is null.
    pub fn insert_default(&mut self) {
        self.nested.insert_default();
        self.null_map.values_mut().push(1);
    }

    pub fn is_default_at(&self, row: usize) -> bool {
        self.is_null_at(row)
    }

    pub fn get(&self, row: usize) -> Result<Value> {
        quiver_ensure!(
            row < self.len(),
            InternalError: "row {} out of bounds in {} column of {} rows",
            row,
            self.name(),
            self.len()
        );
        if self.is_null_at(row) {
            Ok(Value::Null)
        } else {
            self.nested.get(row)
        }
    }

    pub fn insert(&mut self, value: &Value) -> Result<()> {
        if let Value::Null = value {
            self.insert_default();
        } else {
            self.nested.insert(value)?;
            self.null_map.values_mut().push(0);
        }
        Ok(())
    }

    pub fn insert_from(&mut self, src: &Self, row: usize) -> Result<()> {
        self.insert_range_from(src, row, 1)
    }

    pub fn insert_range_from(&mut self, src: &Self, start: usize, length: usize) -> Result<()> {
        self.nested.insert_range_from(&src.nested, start, length)?;
        self.null_map.insert_range_from(&src.null_map, start, length)
    }

    /// Appends rows of a non-nullable column as valid rows, wrapping them
    /// with null markers.
    pub fn insert_range_from_not_nullable(
        &mut self,
        src: &Column,
        start: usize,
        length: usize,
    ) -> Result<()> {
        self.nested.insert_range_from(src, start, length)?;
        self.null_map
            .values_mut()
            .extend(std::iter::repeat(0).take(length));
        Ok(())
    }

    pub fn filter(&self, mask: &[bool], size_hint: Option<usize>) -> Result<Self> {
        let nested = self.nested.filter(mask, size_hint)?;
        let null_map = self.null_map.filter(mask, size_hint)?;
        Ok(Self {
            nested: Box::new(nested),
            null_map,
        })
    }

    pub fn filter_in_place(&mut self, mask: &[bool]) -> Result<usize> {
        let kept = self.nested.filter_in_place(mask)?;
        let kept_nulls = self.null_map.filter_in_place(mask)?;
        quiver_ensure!(
            kept == kept_nulls,
            InternalError: "nullable filter kept {} values but {} null entries",
            kept,
            kept_nulls
        );
        Ok(kept)
    }

    pub fn replicate(&self, replicate_offsets: &[u64]) -> Result<Self> {
        let nested = self.nested.replicate(replicate_offsets)?;
        let null_map = self.null_map.replicate(replicate_offsets)?;
        Ok(Self {
            nested: Box::new(nested),
            null_map,
        })
    }

    pub fn permute(&self, perm: &[usize], limit: usize) -> Result<Self> {
        let nested = self.nested.permute(perm, limit)?;
        let null_map = self.null_map.permute(perm, limit)?;
        Ok(Self {
            nested: Box::new(nested),
            null_map,
        })
    }

    pub fn get_permutation(
        &self,
        reverse: bool,
        limit: usize,
        nan_direction: NanDirection,
    ) -> Permutation {
        sort_indices(self.len(), reverse, limit, |a, b| {
            self.compare_rows_within(a, b, nan_direction)
        })
    }

    fn compare_rows_within(&self, a: usize, b: usize, nan_direction: NanDirection) -> Ordering {
        match (self.is_null_at(a), self.is_null_at(b)) {
            (true, true) => Ordering::Equal,
            (true, false) => nan_direction.left_ordering(),
            (false, true) => nan_direction.left_ordering().reverse(),
            (false, false) => self
                .nested
                .compare_at(a, b, &self.nested, nan_direction)
                // self comparison; nested variants always match
                .unwrap_or(Ordering::Equal),
        }
    }

    pub fn compare_at(
        &self,
        n: usize,
        m: usize,
        other: &Self,
        nan_direction: NanDirection,
    ) -> Result<Ordering> {
        match (self.is_null_at(n), other.is_null_at(m)) {
            (true, true) => Ok(Ordering::Equal),
            (true, false) => Ok(nan_direction.left_ordering()),
            (false, true) => Ok(nan_direction.left_ordering().reverse()),
            (false, false) => self.nested.compare_at(n, m, &other.nested, nan_direction),
        }
    }

    pub fn serialize_value_into_arena(&self, row: usize, arena: &mut dyn Arena) -> Range<usize> {
        let start = arena.len();
        let null = self.null_map.values()[row];
        write_bytes(arena, &[null]);
        if null == 0 {
            self.nested.serialize_value_into_arena(row, arena);
        }
        start..arena.len()
    }

    pub fn deserialize_and_insert_from_arena(&mut self, buf: &[u8], pos: usize) -> Result<usize> {
        let (flag, pos) = read_bytes(buf, pos, 1)?;
        if flag[0] != 0 {
            self.insert_default();
            Ok(pos)
        } else {
            let pos = self.nested.deserialize_and_insert_from_arena(buf, pos)?;
            self.null_map.values_mut().push(0);
            Ok(pos)
        }
    }

    pub fn update_hash_with_value<H: Hasher>(&self, row: usize, state: &mut H) {
        if self.is_null_at(row) {
            state.write_u8(0);
        } else {
            self.nested.update_hash_with_value(row, state);
        }
    }

    pub fn update_xxhash_with_value(
        &self,
        start: usize,
        end: usize,
        hash: &mut u64,
        null_data: Option<&[u8]>,
    ) {
        match null_data {
            None => self
                .nested
                .update_xxhash_with_value(start, end, hash, Some(self.null_map.values())),
            Some(nulls) => {
                for row in start..end {
                    if nulls[row] == 0 {
                        self.nested.update_xxhash_with_value(
                            row,
                            row + 1,
                            hash,
                            Some(self.null_map.values()),
                        );
                    }
                }
            },
        }
    }

    pub fn update_crc_with_value(
        &self,
        start: usize,
        end: usize,
        hash: &mut u32,
        null_data: Option<&[u8]>,
    ) {
        match null_data {
            None => self
                .nested
                .update_crc_with_value(start, end, hash, Some(self.null_map.values())),
            Some(nulls) => {
                for row in start..end {
                    if nulls[row] == 0 {
                        self.nested.update_crc_with_value(
                            row,
                            row + 1,
                            hash,
                            Some(self.null_map.values()),
                        );
                    }
                }
            },
        }
    }
}
