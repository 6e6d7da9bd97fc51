//! A sequential reader over one contiguous buffer.

use bytes::{Buf, Bytes};

use crate::{
    count::check_request,
    errors::{FetchError, Result},
};


/// How a reader takes hold of a buffer handed to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyMode {
    /// Keep a reference-counted handle to the caller's allocation. Slices
    /// returned by the reader share that allocation too.
    #[default]
    Shared,
    /// Copy the contents into a fresh allocation owned by the reader, so the
    /// caller's allocation is not kept alive by anything the reader returns.
    Copied,
}

impl CopyMode {
    pub(crate) fn apply(self, buffer: Bytes) -> Bytes {
        match self {
            CopyMode::Shared => buffer,
            CopyMode::Copied => Bytes::copy_from_slice(&buffer),
        }
    }
}

/// A sequential reader over a single buffer.
///
/// Reads hand out zero-copy slices of the underlying buffer. A failed call
/// leaves the position where it was.
#[derive(Debug, Clone, Default)]
pub struct ByteCursor {
    buffer: Bytes,
    position: usize,
}

impl ByteCursor {
    /// Creates a cursor that shares the given buffer.
    #[must_use]
    pub fn new(buffer: Bytes) -> Self {
        Self {
            buffer,
            position: 0,
        }
    }

    /// Creates a cursor over a private copy of `data`.
    #[must_use]
    pub fn copied(data: &[u8]) -> Self {
        Self::new(Bytes::copy_from_slice(data))
    }

    #[must_use]
    pub fn with_mode(buffer: Bytes, mode: CopyMode) -> Self {
        Self::new(mode.apply(buffer))
    }

    /// Reads one byte.
    pub fn fetch(&mut self) -> Result<u8> {
        if self.is_end() {
            return Err(FetchError::EndOfStream);
        }
        let byte = self.buffer[self.position];
        self.position += 1;
        Ok(byte)
    }

    /// Reads every unread byte.
    ///
    /// Fails with [`FetchError::EndOfStream`] if the cursor was already at the
    /// end, so a successful result is never empty.
    pub fn fetch_all(&mut self) -> Result<Bytes> {
        if self.is_end() {
            return Err(FetchError::EndOfStream);
        }
        Ok(self.take_rest())
    }

    /// Reads exactly `count` bytes.
    pub fn fetch_bytes<C>(&mut self, count: C) -> Result<Bytes>
    where
        C: num::PrimInt,
    {
        let count = check_request("count", count, self.remaining())?;
        Ok(self.take(count))
    }

    /// Moves past `steps` bytes without reading them.
    pub fn skip<C>(&mut self, steps: C) -> Result<()>
    where
        C: num::PrimInt,
    {
        let steps = check_request("steps", steps, self.remaining())?;
        self.position += steps;
        Ok(())
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.buffer.len() - self.position
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.position == self.buffer.len()
    }

    /// Returns the number of bytes consumed since the last reset.
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    /// Returns the whole underlying buffer, including consumed bytes.
    #[must_use]
    pub fn buffer(&self) -> &Bytes {
        &self.buffer
    }

    /// Returns the bytes that have not been consumed yet.
    #[must_use]
    pub fn unread(&self) -> &[u8] {
        &self.buffer[self.position..]
    }

    /// Rewinds to the start of the buffer.
    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Replaces the buffer in place and rewinds.
    pub fn reinitialize(&mut self, buffer: Bytes) {
        self.buffer = buffer;
        self.position = 0;
    }

    pub fn reinitialize_with_mode(&mut self, buffer: Bytes, mode: CopyMode) {
        self.reinitialize(mode.apply(buffer));
    }

    /// Takes up to `count` bytes without validation. Callers cap `count` at
    /// `remaining()`.
    pub(crate) fn take(&mut self, count: usize) -> Bytes {
        let end = self.position + count.min(self.remaining());
        let out = self.buffer.slice(self.position..end);
        self.position = end;
        out
    }

    /// Takes every unread byte; empty if the cursor is at the end.
    pub(crate) fn take_rest(&mut self) -> Bytes {
        let out = self.buffer.slice(self.position..);
        self.position = self.buffer.len();
        out
    }

    /// Advances by up to `count` bytes without validation.
    pub(crate) fn advance_by(&mut self, count: usize) {
        self.position += count.min(self.remaining());
    }
}

impl From<Bytes> for ByteCursor {
    fn from(buffer: Bytes) -> Self {
        Self::new(buffer)
    }
}

impl Buf for ByteCursor {
    fn remaining(&self) -> usize {
        ByteCursor::remaining(self)
    }

    fn chunk(&self) -> &[u8] {
        self.unread()
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= ByteCursor::remaining(self),
            "cannot advance past the end of the buffer: {cnt} > {}",
            ByteCursor::remaining(self)
        );
        self.position += cnt;
    }
}
