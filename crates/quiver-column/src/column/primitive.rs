//! Fixed-width numeric leaf column: one native value per row in a flat
//! buffer.

use std::cmp::Ordering;
use std::hash::Hasher;
use std::ops::Range;

use quiver_error::{quiver_bail, quiver_ensure, Result};
use xxhash_rust::xxh64::xxh64;

use crate::arena::{read_bytes, write_bytes, Arena};
use crate::column::{sort_indices, Permutation};
use crate::ord::{compare_native, NanDirection};
use crate::types::{NativeType, Value};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PrimitiveColumn<T: NativeType> {
    values: Vec<T>,
}

impl<T: NativeType> PrimitiveColumn<T> {
    #[inline]
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    #[inline]
    pub fn from_vec(values: Vec<T>) -> Self {
        Self { values }
    }

    #[inline]
    pub fn values(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub(crate) fn values_mut(&mut self) -> &mut Vec<T> {
        &mut self.values
    }

    #[inline]
    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn name(&self) -> String {
        T::NAME.to_string()
    }

    pub fn clone_empty(&self) -> Self {
        Self::new()
    }

    pub fn clone_resized(&self, n: usize) -> Self {
        let take = n.min(self.values.len());
        let mut values = Vec::with_capacity(n);
        values.extend_from_slice(&self.values[..take]);
        values.resize(n, T::default());
        Self { values }
    }

    pub fn byte_size(&self) -> usize {
        self.values.len() * std::mem::size_of::<T>()
    }

    pub fn allocated_bytes(&self) -> usize {
        self.values.capacity() * std::mem::size_of::<T>()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.values.reserve(additional);
    }

    pub fn resize(&mut self, n: usize) {
        self.values.resize(n, T::default());
    }

    pub fn pop_back(&mut self, n: usize) {
        let n = n.min(self.values.len());
        self.values.truncate(self.values.len() - n);
    }

    pub fn erase(&mut self, start: usize, length: usize) {
        if start >= self.values.len() || length == 0 {
            return;
        }
        let length = length.min(self.values.len() - start);
        self.values.drain(start..start + length);
    }

    pub fn insert_default(&mut self) {
        self.values.push(T::default());
    }

    pub fn is_default_at(&self, row: usize) -> bool {
        self.values[row] == T::default()
    }

    pub fn get(&self, row: usize) -> Result<Value> {
        quiver_ensure!(
            row < self.values.len(),
            InternalError: "row {} out of bounds in {} column of {} rows",
            row,
            T::NAME,
            self.values.len()
        );
        Ok(self.values[row].into_value())
    }

    pub fn insert(&mut self, value: &Value) -> Result<()> {
        match T::from_value(value) {
            Some(v) => {
                self.values.push(v);
                Ok(())
            },
            None => quiver_bail!(
                InternalError: "cannot insert a {} value into a {} column",
                value.kind(),
                T::NAME
            ),
        }
    }

    pub fn insert_from(&mut self, src: &Self, row: usize) -> Result<()> {
        self.insert_range_from(src, row, 1)
    }

    pub fn insert_range_from(&mut self, src: &Self, start: usize, length: usize) -> Result<()> {
        quiver_ensure!(
            start + length <= src.values.len(),
            InternalError: "parameter out of bound in range insert: start {} + length {} > {} rows",
            start,
            length,
            src.values.len()
        );
        self.values.extend_from_slice(&src.values[start..start + length]);
        Ok(())
    }

    pub fn filter(&self, mask: &[bool], size_hint: Option<usize>) -> Result<Self> {
        quiver_ensure!(
            mask.len() == self.values.len(),
            InternalError: "filter mask has {} entries for {} rows",
            mask.len(),
            self.values.len()
        );
        let mut values = Vec::with_capacity(size_hint.unwrap_or(0));
        for (value, &keep) in self.values.iter().zip(mask) {
            if keep {
                values.push(*value);
            }
        }
        Ok(Self { values })
    }

    pub fn filter_in_place(&mut self, mask: &[bool]) -> Result<usize> {
        quiver_ensure!(
            mask.len() == self.values.len(),
            InternalError: "filter mask has {} entries for {} rows",
            mask.len(),
            self.values.len()
        );
        let mut write = 0;
        for i in 0..self.values.len() {
            if mask[i] {
                self.values[write] = self.values[i];
                write += 1;
            }
        }
        self.values.truncate(write);
        Ok(write)
    }

    pub fn replicate(&self, replicate_offsets: &[u64]) -> Result<Self> {
        quiver_ensure!(
            replicate_offsets.len() == self.values.len(),
            InternalError: "replicate offsets have {} entries for {} rows",
            replicate_offsets.len(),
            self.values.len()
        );
        let mut values = Vec::with_capacity(replicate_offsets.last().copied().unwrap_or(0) as usize);
        let mut prev = 0;
        for (value, &offset) in self.values.iter().zip(replicate_offsets) {
            for _ in prev..offset {
                values.push(*value);
            }
            prev = offset;
        }
        Ok(Self { values })
    }

    pub fn permute(&self, perm: &[usize], limit: usize) -> Result<Self> {
        let limit = resolve_permute_limit(self.values.len(), perm.len(), limit)?;
        let mut values = Vec::with_capacity(limit);
        for &row in &perm[..limit] {
            quiver_ensure!(
                row < self.values.len(),
                InternalError: "permutation index {} out of bounds for {} rows",
                row,
                self.values.len()
            );
            values.push(self.values[row]);
        }
        Ok(Self { values })
    }

    pub fn get_permutation(
        &self,
        reverse: bool,
        limit: usize,
        nan_direction: NanDirection,
    ) -> Permutation {
        sort_indices(self.values.len(), reverse, limit, |a, b| {
            compare_native(self.values[a], self.values[b], nan_direction)
        })
    }

    pub fn compare_at(
        &self,
        n: usize,
        m: usize,
        other: &Self,
        nan_direction: NanDirection,
    ) -> Result<Ordering> {
        Ok(compare_native(self.values[n], other.values[m], nan_direction))
    }

    pub fn serialize_value_into_arena(&self, row: usize, arena: &mut dyn Arena) -> Range<usize> {
        let start = arena.len();
        write_bytes(arena, bytemuck::bytes_of(&self.values[row]));
        start..arena.len()
    }

    pub fn deserialize_and_insert_from_arena(&mut self, buf: &[u8], pos: usize) -> Result<usize> {
        let (bytes, pos) = read_bytes(buf, pos, std::mem::size_of::<T>())?;
        self.values.push(bytemuck::pod_read_unaligned(bytes));
        Ok(pos)
    }

    pub fn update_hash_with_value<H: Hasher>(&self, row: usize, state: &mut H) {
        state.write(bytemuck::bytes_of(&self.values[row]));
    }

    pub fn update_xxhash_with_value(
        &self,
        start: usize,
        end: usize,
        hash: &mut u64,
        null_data: Option<&[u8]>,
    ) {
        match null_data {
            None => {
                *hash = xxh64(bytemuck::cast_slice(&self.values[start..end]), *hash);
            },
            Some(nulls) => {
                for i in start..end {
                    if nulls[i] == 0 {
                        *hash = xxh64(bytemuck::bytes_of(&self.values[i]), *hash);
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
            None => {
                *hash = crc_continue(*hash, bytemuck::cast_slice(&self.values[start..end]));
            },
            Some(nulls) => {
                for i in start..end {
                    if nulls[i] == 0 {
                        *hash = crc_continue(*hash, bytemuck::bytes_of(&self.values[i]));
                    }
                }
            },
        }
    }
}

/// Resolves the effective row count of a permute call: `limit == 0` selects
/// everything, otherwise the limit is clamped to the column; the permutation
/// must cover it.
pub(crate) fn resolve_permute_limit(rows: usize, perm_len: usize, limit: usize) -> Result<usize> {
    let limit = if limit == 0 { rows } else { limit.min(rows) };
    quiver_ensure!(
        perm_len >= limit,
        InternalError: "size of permutation ({}) is less than required ({})",
        perm_len,
        limit
    );
    Ok(limit)
}

/// CRC32 continued from a previous state, the seeded-chaining counterpart of
/// `xxh64(bytes, seed)`.
#[inline]
pub(crate) fn crc_continue(state: u32, bytes: &[u8]) -> u32 {
    let mut hasher = crc32fast::Hasher::new_with_initial(state);
    hasher.update(bytes);
    hasher.finalize()
}
