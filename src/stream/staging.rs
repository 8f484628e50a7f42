//! Internally owned staging buffers.
//!
//! Both buffers allocate lazily, on the first call that actually needs them,
//! and reserve their full capacity in one fallible step so a failed
//! allocation never leaves a half-grown buffer behind.

use crate::status::{Error, Result};

/// Reserves exactly `capacity` bytes in an empty vector.
fn allocate(buf: &mut Vec<u8>, capacity: usize) -> Result<()> {
    if buf.capacity() >= capacity {
        return Ok(());
    }
    buf.try_reserve_exact(capacity)
        .map_err(|_| Error::Memory(capacity))
}

// ─────────────────────────────────────────────────────────────────────────────
// Input staging
// ─────────────────────────────────────────────────────────────────────────────

/// Coalesces caller chunks into blocks of exactly `capacity` bytes.
#[derive(Debug)]
pub struct InputStaging {
    buf: Vec<u8>,
    capacity: usize,
}

impl InputStaging {
    pub fn new(capacity: usize) -> Self {
        InputStaging {
            buf: Vec::new(),
            capacity,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.buf.len() == self.capacity
    }

    /// Bytes that can still be appended before the block is complete.
    #[inline]
    pub fn room(&self) -> usize {
        self.capacity - self.buf.len()
    }

    /// `true` once the backing storage has been reserved.
    pub fn is_allocated(&self) -> bool {
        self.buf.capacity() >= self.capacity
    }

    pub fn allocate(&mut self) -> Result<()> {
        allocate(&mut self.buf, self.capacity)
    }

    /// Appends as much of `src` as fits and returns the number of bytes taken.
    ///
    /// The buffer must have been allocated.
    pub fn fill(&mut self, src: &[u8]) -> usize {
        let n = src.len().min(self.room());
        self.buf.extend_from_slice(&src[..n]);
        n
    }

    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.buf
    }

    /// Forgets the staged bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Output staging
// ─────────────────────────────────────────────────────────────────────────────

/// Holds one compressed block that did not fit the caller's output window,
/// and hands it out across as many calls as the caller needs.
#[derive(Debug)]
pub struct OutputStaging {
    buf: Vec<u8>,
    capacity: usize,
    pos: usize,
    end: usize,
}

impl OutputStaging {
    pub fn new(capacity: usize) -> Self {
        OutputStaging {
            buf: Vec::new(),
            capacity,
            pos: 0,
            end: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Compressed bytes not yet handed to the caller.
    #[inline]
    pub fn pending(&self) -> &[u8] {
        &self.buf[self.pos..self.end]
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pos < self.end
    }

    pub fn is_allocated(&self) -> bool {
        self.buf.len() == self.capacity
    }

    pub fn allocate(&mut self) -> Result<()> {
        allocate(&mut self.buf, self.capacity)?;
        // Within the reservation, so this never reallocates.
        self.buf.resize(self.capacity, 0);
        Ok(())
    }

    /// Whole buffer as a compression destination. Only valid when nothing is pending.
    pub fn dest(&mut self) -> &mut [u8] {
        debug_assert!(!self.is_pending());
        &mut self.buf[..]
    }

    /// Records that `n` bytes were written into [`dest`](Self::dest).
    pub fn set_filled(&mut self, n: usize) {
        debug_assert!(n <= self.buf.len());
        self.pos = 0;
        self.end = n;
    }

    /// Copies pending bytes into the caller's window, shrinking it, and
    /// returns the number of bytes copied.
    pub fn drain(&mut self, output: &mut &mut [u8]) -> usize {
        let n = (self.end - self.pos).min(output.len());
        let window = std::mem::take(output);
        let (head, tail) = window.split_at_mut(n);
        head.copy_from_slice(&self.buf[self.pos..self.pos + n]);
        *output = tail;
        self.pos += n;
        if self.pos == self.end {
            self.pos = 0;
            self.end = 0;
        }
        n
    }
}
