//! Const column: one stored row standing for `len` identical logical rows.
//!
//! Consts appear at expression boundaries (literals, broadcast scalars) and
//! are materialized into full columns before entering the bulk operators;
//! the operations kept here are the length bookkeeping the engine needs up
//! to that point.

use std::cmp::Ordering;
use std::hash::Hasher;
use std::ops::Range;

use quiver_error::{quiver_bail, quiver_ensure, Result};

use crate::arena::Arena;
use crate::column::{Column, Permutation};
use crate::ord::NanDirection;
use crate::types::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct ConstColumn {
    data: Box<Column>,
    len: usize,
}

impl ConstColumn {
    /// Wraps a one-row column as `len` identical rows.
    pub fn try_new(data: Column, len: usize) -> Result<Self> {
        let data = data.to_full()?;
        quiver_ensure!(
            data.len() == 1,
            InternalError: "const column must wrap exactly one row, got {}",
            data.len()
        );
        Ok(Self {
            data: Box::new(data),
            len,
        })
    }

    #[inline]
    pub fn data(&self) -> &Column {
        &self.data
    }

    /// Materializes into a full column by replicating the single row.
    pub fn to_full(self) -> Result<Column> {
        self.data.replicate(&[self.len as u64])
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn name(&self) -> String {
        format!("Const({})", self.data.name())
    }

    pub fn clone_empty(&self) -> Self {
        Self {
            data: self.data.clone(),
            len: 0,
        }
    }

    pub fn clone_resized(&self, n: usize) -> Self {
        Self {
            data: self.data.clone(),
            len: n,
        }
    }

    pub fn byte_size(&self) -> usize {
        self.data.byte_size() + std::mem::size_of::<usize>()
    }

    pub fn allocated_bytes(&self) -> usize {
        self.data.allocated_bytes() + std::mem::size_of::<usize>()
    }

    pub fn reserve(&mut self, _additional: usize) {}

    pub fn resize(&mut self, n: usize) {
        self.len = n;
    }

    pub fn pop_back(&mut self, n: usize) {
        self.len -= n.min(self.len);
    }

    pub fn erase(&mut self, start: usize, length: usize) {
        if start >= self.len || length == 0 {
            return;
        }
        self.len -= length.min(self.len - start);
    }

    pub fn insert_default(&mut self) {
        self.len += 1;
    }

    pub fn is_default_at(&self, _row: usize) -> bool {
        self.data.is_default_at(0)
    }

    pub fn get(&self, row: usize) -> Result<Value> {
        quiver_ensure!(
            row < self.len,
            InternalError: "row {} out of bounds in {} column of {} rows",
            row,
            self.name(),
            self.len
        );
        self.data.get(0)
    }

    pub fn insert(&mut self, _value: &Value) -> Result<()> {
        quiver_bail!(InternalError: "cannot insert a value into {}", self.name())
    }

    pub fn insert_from(&mut self, src: &Self, row: usize) -> Result<()> {
        self.insert_range_from(src, row, 1)
    }

    pub fn insert_range_from(&mut self, src: &Self, start: usize, length: usize) -> Result<()> {
        quiver_ensure!(
            start + length <= src.len,
            InternalError: "parameter out of bound in range insert: start {} + length {} > {} rows",
            start,
            length,
            src.len
        );
        self.len += length;
        Ok(())
    }

    pub fn filter(&self, mask: &[bool], _size_hint: Option<usize>) -> Result<Self> {
        quiver_ensure!(
            mask.len() == self.len,
            InternalError: "filter mask has {} entries for {} rows",
            mask.len(),
            self.len
        );
        Ok(Self {
            data: self.data.clone(),
            len: mask.iter().filter(|&&keep| keep).count(),
        })
    }

    pub fn filter_in_place(&mut self, mask: &[bool]) -> Result<usize> {
        quiver_ensure!(
            mask.len() == self.len,
            InternalError: "filter mask has {} entries for {} rows",
            mask.len(),
            self.len
        );
        self.len = mask.iter().filter(|&&keep| keep).count();
        Ok(self.len)
    }

    pub fn replicate(&self, replicate_offsets: &[u64]) -> Result<Self> {
        quiver_ensure!(
            replicate_offsets.len() == self.len,
            InternalError: "replicate offsets have {} entries for {} rows",
            replicate_offsets.len(),
            self.len
        );
        Ok(Self {
            data: self.data.clone(),
            len: replicate_offsets.last().copied().unwrap_or(0) as usize,
        })
    }

    pub fn permute(&self, perm: &[usize], limit: usize) -> Result<Self> {
        let limit = super::primitive::resolve_permute_limit(self.len, perm.len(), limit)?;
        Ok(Self {
            data: self.data.clone(),
            len: limit,
        })
    }

    pub fn get_permutation(
        &self,
        _reverse: bool,
        _limit: usize,
        _nan_direction: NanDirection,
    ) -> Permutation {
        (0..self.len).collect()
    }

    pub fn compare_at(
        &self,
        _n: usize,
        _m: usize,
        other: &Self,
        nan_direction: NanDirection,
    ) -> Result<Ordering> {
        self.data.compare_at(0, 0, &other.data, nan_direction)
    }

    pub fn serialize_value_into_arena(&self, _row: usize, arena: &mut dyn Arena) -> Range<usize> {
        self.data.serialize_value_into_arena(0, arena)
    }

    pub fn deserialize_and_insert_from_arena(&mut self, _buf: &[u8], _pos: usize) -> Result<usize> {
        quiver_bail!(InternalError: "cannot deserialize into {}", self.name())
    }

    pub fn update_hash_with_value<H: Hasher>(&self, _row: usize, state: &mut H) {
        self.data.update_hash_with_value(0, state);
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
            self.data.update_xxhash_with_value(0, 1, hash, None);
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
            self.data.update_crc_with_value(0, 1, hash, None);
        }
    }
}
