//! Concatenation of byte buffers.

use bytes::{BufMut as _, Bytes, BytesMut};

#[cfg(test)]
mod tests;

/// Collects buffers and concatenates them on demand.
#[derive(Debug, Clone, Default)]
pub struct BufferMerger {
    parts: Vec<Bytes>,
}

impl BufferMerger {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a buffer for the next merge. Nothing is copied yet.
    pub fn push<B>(&mut self, buffer: B)
    where
        B: Into<Bytes>,
    {
        self.parts.push(buffer.into());
    }

    /// Returns the concatenation of every pushed buffer, in push order.
    ///
    /// The result is allocated once at its exact final size. Calling this
    /// again without pushing returns equal content.
    #[must_use]
    pub fn merge(&self) -> Bytes {
        let mut out = BytesMut::with_capacity(self.total_len());
        for part in &self.parts {
            out.put_slice(part);
        }
        out.freeze()
    }

    /// Forgets every pushed buffer. Buffers returned by earlier merges are
    /// unaffected.
    pub fn reset(&mut self) {
        self.parts.clear();
    }

    /// Returns the number of pushed buffers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// Returns the length the next merge will have.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.parts.iter().map(Bytes::len).sum()
    }
}

impl<B> Extend<B> for BufferMerger
where
    B: Into<Bytes>,
{
    fn extend<I: IntoIterator<Item = B>>(&mut self, iter: I) {
        self.parts.extend(iter.into_iter().map(Into::into));
    }
}

impl<B> FromIterator<B> for BufferMerger
where
    B: Into<Bytes>,
{
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        let mut merger = Self::new();
        merger.extend(iter);
        merger
    }
}

/// Concatenates `blocks` into one buffer.
///
/// A single block is returned as is, without copying.
#[must_use]
pub fn concatenate(mut blocks: Vec<Bytes>) -> Bytes {
    match blocks.len() {
        0 => Bytes::new(),
        1 => blocks.swap_remove(0),
        _ => blocks.into_iter().collect::<BufferMerger>().merge(),
    }
}
