//! The cumulative length index of variable-length columns.

use quiver_error::{quiver_bail, Result};

/// Monotonically non-decreasing cumulative element counts, one per row.
///
/// There is no leading zero: `offsets[i]` is the exclusive end of row `i` in
/// the flattened element buffer, and the start of row 0 is the virtual
/// offset `-1`, defined to be 0. Row `i` covers the half-open element range
/// `[offset_at(i), offset_at(i) + size_at(i))`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Offsets(Vec<u64>);

impl Offsets {
    #[inline]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self(Vec::with_capacity(capacity))
    }

    /// Builds an index from raw cumulative counts, rejecting a decreasing
    /// sequence.
    pub fn try_from_vec(offsets: Vec<u64>) -> Result<Self> {
        for window in offsets.windows(2) {
            if window[1] < window[0] {
                quiver_bail!(
                    InternalError: "offsets must not decrease, got {} after {}",
                    window[1],
                    window[0]
                );
            }
        }
        Ok(Self(offsets))
    }

    /// Builds an index from counts already known to be non-decreasing.
    #[inline]
    pub(crate) fn new_unchecked(offsets: Vec<u64>) -> Self {
        debug_assert!(offsets.windows(2).all(|w| w[0] <= w[1]));
        Self(offsets)
    }

    /// Number of rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The cumulative count after the last row; 0 for an empty index.
    #[inline]
    pub fn last(&self) -> u64 {
        self.0.last().copied().unwrap_or(0)
    }

    /// Start of row `i` in the element buffer. `offset_at(len())` is the end
    /// of the last row, mirroring the virtual `-1 == 0` boundary on the
    /// other side.
    #[inline]
    pub fn offset_at(&self, i: usize) -> u64 {
        if i == 0 {
            0
        } else {
            self.0[i - 1]
        }
    }

    /// Element count of row `i`.
    #[inline]
    pub fn size_at(&self, i: usize) -> u64 {
        self.0[i] - self.offset_at(i)
    }

    /// Element range of row `i` as `usize` bounds.
    #[inline]
    pub fn start_end(&self, i: usize) -> (usize, usize) {
        (self.offset_at(i) as usize, self.0[i] as usize)
    }

    #[inline]
    pub fn as_slice(&self) -> &[u64] {
        &self.0
    }

    /// Appends a row of `length` elements.
    #[inline]
    pub fn push_length(&mut self, length: u64) {
        self.0.push(self.last() + length);
    }

    /// Appends a raw cumulative count; the caller keeps the sequence
    /// non-decreasing.
    #[inline]
    pub(crate) fn push_offset(&mut self, offset: u64) {
        debug_assert!(offset >= self.last());
        self.0.push(offset);
    }

    /// Appends `additional` empty rows.
    #[inline]
    pub fn extend_constant(&mut self, additional: usize) {
        let last = self.last();
        self.0.resize(self.0.len() + additional, last);
    }

    #[inline]
    pub fn reserve(&mut self, additional: usize) {
        self.0.reserve(additional);
    }

    #[inline]
    pub fn truncate(&mut self, len: usize) {
        self.0.truncate(len);
    }

    /// Removes rows `[start, start + length)` and shifts every later offset
    /// down by the element count the removed rows covered. Returns that
    /// element count.
    pub fn erase(&mut self, start: usize, length: usize) -> u64 {
        let removed = self.0[start + length - 1] - self.offset_at(start);
        self.0.drain(start..start + length);
        for offset in &mut self.0[start..] {
            *offset -= removed;
        }
        removed
    }

    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.0.capacity() * std::mem::size_of::<u64>()
    }

    #[inline]
    pub fn byte_size(&self) -> usize {
        self.0.len() * std::mem::size_of::<u64>()
    }
}

/// Cumulative offsets of rows `[start, start + length)` of `src`, shifted so
/// that the copied range starts at `base`. This is the append arithmetic of
/// range insertion: the caller passes its current last offset as `base`.
pub(crate) fn rebased_range(src: &[u64], start: usize, length: usize, base: u64) -> Vec<u64> {
    let first = if start == 0 { 0 } else { src[start - 1] };
    src[start..start + length]
        .iter()
        .map(|&offset| offset - first + base)
        .collect()
}
