//! Variable-length text leaf column: one byte string per row, stored as a
//! flat character buffer plus a cumulative length index.

use std::cmp::Ordering;
use std::hash::Hasher;
use std::ops::Range;

use quiver_error::{quiver_bail, quiver_ensure, Result};
use xxhash_rust::xxh64::xxh64;

use crate::arena::{read_bytes, read_u64, write_bytes, Arena};
use crate::column::array::filter::{filter_arrays_impl, filter_arrays_in_place};
use crate::column::array::replicate::replicate_arrays_impl;
use crate::column::primitive::{crc_continue, resolve_permute_limit};
use crate::column::{sort_indices, Permutation};
use crate::offsets::{rebased_range, Offsets};
use crate::ord::NanDirection;
use crate::types::Value;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StringColumn {
    chars: Vec<u8>,
    offsets: Offsets,
}

impl StringColumn {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_slice<T: AsRef<str>, P: AsRef<[T]>>(slice: P) -> Self {
        let mut col = Self::new();
        for s in slice.as_ref() {
            col.push_bytes(s.as_ref().as_bytes());
        }
        col
    }

    pub(crate) fn from_parts(chars: Vec<u8>, offsets: Offsets) -> Self {
        debug_assert_eq!(offsets.last() as usize, chars.len());
        Self { chars, offsets }
    }

    /// Appends one string.
    #[inline]
    pub fn push_bytes(&mut self, bytes: &[u8]) {
        self.chars.extend_from_slice(bytes);
        self.offsets.push_length(bytes.len() as u64);
    }

    /// The bytes of row `row`.
    #[inline]
    pub fn value_bytes(&self, row: usize) -> &[u8] {
        let (start, end) = self.offsets.start_end(row);
        &self.chars[start..end]
    }

    #[inline]
    pub fn chars(&self) -> &[u8] {
        &self.chars
    }

    #[inline]
    pub fn offsets(&self) -> &Offsets {
        &self.offsets
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Vec<u8>, &mut Offsets) {
        (&mut self.chars, &mut self.offsets)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    pub fn name(&self) -> String {
        "String".to_string()
    }

    pub fn clone_empty(&self) -> Self {
        Self::new()
    }

    pub fn clone_resized(&self, n: usize) -> Self {
        if n <= self.len() {
            let offsets = Offsets::new_unchecked(self.offsets.as_slice()[..n].to_vec());
            let chars = self.chars[..offsets.last() as usize].to_vec();
            Self { chars, offsets }
        } else {
            let mut res = self.clone();
            res.offsets.extend_constant(n - self.len());
            res
        }
    }

    pub fn byte_size(&self) -> usize {
        self.chars.len() + self.offsets.byte_size()
    }

    pub fn allocated_bytes(&self) -> usize {
        self.chars.capacity() + self.offsets.allocated_bytes()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.offsets.reserve(additional);
        self.chars.reserve(additional);
    }

    pub fn resize(&mut self, n: usize) {
        if n <= self.len() {
            self.offsets.truncate(n);
            self.chars.truncate(self.offsets.last() as usize);
        } else {
            self.offsets.extend_constant(n - self.len());
        }
    }

    pub fn pop_back(&mut self, n: usize) {
        let n = n.min(self.len());
        let remaining = self.len() - n;
        self.offsets.truncate(remaining);
        self.chars.truncate(self.offsets.last() as usize);
    }

    pub fn erase(&mut self, start: usize, length: usize) {
        if start >= self.len() || length == 0 {
            return;
        }
        let length = length.min(self.len() - start);
        let char_start = self.offsets.offset_at(start) as usize;
        let removed = self.offsets.erase(start, length) as usize;
        self.chars.drain(char_start..char_start + removed);
    }

    pub fn insert_default(&mut self) {
        self.offsets.push_length(0);
    }

    pub fn is_default_at(&self, row: usize) -> bool {
        self.offsets.size_at(row) == 0
    }

    pub fn get(&self, row: usize) -> Result<Value> {
        quiver_ensure!(
            row < self.len(),
            InternalError: "row {} out of bounds in String column of {} rows",
            row,
            self.len()
        );
        Ok(Value::String(
            String::from_utf8_lossy(self.value_bytes(row)).into_owned(),
        ))
    }

    pub fn insert(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::String(s) => {
                self.push_bytes(s.as_bytes());
                Ok(())
            },
            other => quiver_bail!(
                InternalError: "cannot insert a {} value into a String column",
                other.kind()
            ),
        }
    }

    pub fn insert_from(&mut self, src: &Self, row: usize) -> Result<()> {
        self.insert_range_from(src, row, 1)
    }

    pub fn insert_range_from(&mut self, src: &Self, start: usize, length: usize) -> Result<()> {
        if length == 0 {
            return Ok(());
        }
        quiver_ensure!(
            start + length <= src.len(),
            InternalError: "parameter out of bound in range insert: start {} + length {} > {} rows",
            start,
            length,
            src.len()
        );
        let char_start = src.offsets.offset_at(start) as usize;
        let char_end = src.offsets.as_slice()[start + length - 1] as usize;
        self.chars.extend_from_slice(&src.chars[char_start..char_end]);
        for offset in rebased_range(src.offsets.as_slice(), start, length, self.offsets.last()) {
            self.offsets.push_offset(offset);
        }
        Ok(())
    }

    pub fn filter(&self, mask: &[bool], size_hint: Option<usize>) -> Result<Self> {
        quiver_ensure!(
            mask.len() == self.len(),
            InternalError: "filter mask has {} entries for {} rows",
            mask.len(),
            self.len()
        );
        let (chars, offsets) =
            filter_arrays_impl(&self.chars, self.offsets.as_slice(), mask, size_hint);
        Ok(Self::from_parts(chars, Offsets::new_unchecked(offsets)))
    }

    pub fn filter_in_place(&mut self, mask: &[bool]) -> Result<usize> {
        quiver_ensure!(
            mask.len() == self.len(),
            InternalError: "filter mask has {} entries for {} rows",
            mask.len(),
            self.len()
        );
        Ok(filter_arrays_in_place(&mut self.chars, &mut self.offsets, mask))
    }

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
        let (chars, offsets) =
            replicate_arrays_impl(&self.chars, self.offsets.as_slice(), replicate_offsets);
        Ok(Self::from_parts(chars, Offsets::new_unchecked(offsets)))
    }

    pub fn permute(&self, perm: &[usize], limit: usize) -> Result<Self> {
        let limit = resolve_permute_limit(self.len(), perm.len(), limit)?;
        let mut res = Self::new();
        res.reserve(limit);
        for &row in &perm[..limit] {
            quiver_ensure!(
                row < self.len(),
                InternalError: "permutation index {} out of bounds for {} rows",
                row,
                self.len()
            );
            res.push_bytes(self.value_bytes(row));
        }
        Ok(res)
    }

    pub fn get_permutation(
        &self,
        reverse: bool,
        limit: usize,
        _nan_direction: NanDirection,
    ) -> Permutation {
        sort_indices(self.len(), reverse, limit, |a, b| {
            self.value_bytes(a).cmp(self.value_bytes(b))
        })
    }

    pub fn compare_at(
        &self,
        n: usize,
        m: usize,
        other: &Self,
        _nan_direction: NanDirection,
    ) -> Result<Ordering> {
        Ok(self.value_bytes(n).cmp(other.value_bytes(m)))
    }

    pub fn serialize_value_into_arena(&self, row: usize, arena: &mut dyn Arena) -> Range<usize> {
        let start = arena.len();
        let bytes = self.value_bytes(row);
        write_bytes(arena, &(bytes.len() as u64).to_ne_bytes());
        write_bytes(arena, bytes);
        start..arena.len()
    }

    pub fn deserialize_and_insert_from_arena(&mut self, buf: &[u8], pos: usize) -> Result<usize> {
        let (length, pos) = read_u64(buf, pos)?;
        let (bytes, pos) = read_bytes(buf, pos, length as usize)?;
        self.push_bytes(bytes);
        Ok(pos)
    }

    pub fn update_hash_with_value<H: Hasher>(&self, row: usize, state: &mut H) {
        let bytes = self.value_bytes(row);
        state.write_u64(bytes.len() as u64);
        state.write(bytes);
    }

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
            *hash = xxh64(self.value_bytes(row), *hash);
        }
    }

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
            *hash = crc_continue(*hash, self.value_bytes(row));
        }
    }
}
