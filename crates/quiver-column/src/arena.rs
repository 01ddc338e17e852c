//! Arena allocation for transient serialized row encodings (grouping keys,
//! spill records).

use quiver_error::{quiver_ensure, Result};

/// An append-only allocator handing out contiguous growable storage.
///
/// Repeated [`alloc_continue`](Arena::alloc_continue) calls extend one
/// contiguous encoding, so a multi-part serialized value can be read back as
/// a single byte span.
pub trait Arena {
    /// Extends the buffer by `additional` zeroed bytes and returns the new
    /// span for the caller to fill.
    fn alloc_continue(&mut self, additional: usize) -> &mut [u8];

    /// Bytes written so far.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Everything written so far, contiguously.
    fn as_slice(&self) -> &[u8];
}

/// The default arena: a plain growable byte buffer, reused across rows by
/// clearing it between batches.
#[derive(Debug, Default, Clone)]
pub struct ScratchArena {
    buf: Vec<u8>,
}

impl ScratchArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl Arena for ScratchArena {
    fn alloc_continue(&mut self, additional: usize) -> &mut [u8] {
        let start = self.buf.len();
        self.buf.resize(start + additional, 0);
        &mut self.buf[start..]
    }

    fn len(&self) -> usize {
        self.buf.len()
    }

    fn as_slice(&self) -> &[u8] {
        &self.buf
    }
}

#[inline]
pub(crate) fn write_bytes(arena: &mut dyn Arena, bytes: &[u8]) {
    arena.alloc_continue(bytes.len()).copy_from_slice(bytes);
}

/// Reads `length` bytes at `pos`, returning the bytes and the advanced
/// position. Deserialization never reads past what serialization wrote, so a
/// short buffer is a corrupted encoding.
#[inline]
pub(crate) fn read_bytes(buf: &[u8], pos: usize, length: usize) -> Result<(&[u8], usize)> {
    quiver_ensure!(
        pos + length <= buf.len(),
        InternalError: "serialized buffer exhausted: need {} bytes at {}, have {}",
        length,
        pos,
        buf.len()
    );
    Ok((&buf[pos..pos + length], pos + length))
}

#[inline]
pub(crate) fn read_u64(buf: &[u8], pos: usize) -> Result<(u64, usize)> {
    let (bytes, pos) = read_bytes(buf, pos, std::mem::size_of::<u64>())?;
    let mut raw = [0u8; 8];
    raw.copy_from_slice(bytes);
    Ok((u64::from_ne_bytes(raw), pos))
}
