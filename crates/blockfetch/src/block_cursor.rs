//! A reader over a sequence of discontiguous blocks.

use bytes::{Buf, Bytes};

use crate::{
    count::check_request,
    cursor::{ByteCursor, CopyMode},
    errors::{FetchError, Result},
    merger::concatenate,
};


/// Reads an ordered list of byte blocks as one logical stream.
///
/// Empty blocks are dropped when the cursor is built, so every segment holds
/// at least one byte. Reads that stay inside one block return zero-copy
/// slices of it; reads that cross block boundaries are concatenated, or can
/// be returned as per-block fragments with
/// [`fetch_bytes_as_blocks`](Self::fetch_bytes_as_blocks).
///
/// The cursor can be rewound with [`reset`](Self::reset), or pointed at a new
/// list of blocks with [`reinitialize`](Self::reinitialize), which reuses the
/// existing segment storage.
#[derive(Debug, Clone, Default)]
pub struct BlockCursor {
    segments: Vec<ByteCursor>,
    // Index of the first segment with unread bytes, or `segments.len()`.
    active: usize,
    // Unread bytes across `segments[active..]`.
    remaining: usize,
}

fn non_empty<I, B>(blocks: I, mode: CopyMode) -> impl Iterator<Item = Bytes>
where
    I: IntoIterator<Item = B>,
    B: Into<Bytes>,
{
    blocks
        .into_iter()
        .map(Into::into)
        .filter(|block: &Bytes| !block.is_empty())
        .map(move |block| mode.apply(block))
}

impl BlockCursor {
    /// Creates a cursor that shares the given blocks.
    #[must_use]
    pub fn new<I, B>(blocks: I) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        Self::with_mode(blocks, CopyMode::Shared)
    }

    #[must_use]
    pub fn with_mode<I, B>(blocks: I, mode: CopyMode) -> Self
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let segments: Vec<ByteCursor> = non_empty(blocks, mode).map(ByteCursor::new).collect();
        let remaining = segments.iter().map(ByteCursor::remaining).sum();
        Self {
            segments,
            active: 0,
            remaining,
        }
    }

    /// Reads one byte.
    pub fn fetch(&mut self) -> Result<u8> {
        while let Some(segment) = self.segments.get_mut(self.active) {
            if segment.is_end() {
                self.active += 1;
                continue;
            }
            let byte = segment.fetch()?;
            self.remaining -= 1;
            self.skip_exhausted();
            return Ok(byte);
        }
        Err(FetchError::EndOfStream)
    }

    /// Reads every unread byte as one buffer.
    pub fn fetch_all(&mut self) -> Result<Bytes> {
        Ok(concatenate(self.fetch_all_as_blocks()?))
    }

    /// Reads every unread byte, one fragment per block.
    pub fn fetch_all_as_blocks(&mut self) -> Result<Vec<Bytes>> {
        if self.is_end() {
            return Err(FetchError::EndOfStream);
        }
        let fragments = self.segments[self.active..]
            .iter_mut()
            .map(ByteCursor::take_rest)
            .filter(|fragment| !fragment.is_empty())
            .collect();
        self.active = self.segments.len();
        self.remaining = 0;
        Ok(fragments)
    }

    /// Reads exactly `count` bytes as one buffer.
    ///
    /// The result is a slice of the underlying block when the read does not
    /// cross a block boundary, and a fresh concatenation otherwise.
    pub fn fetch_bytes<C>(&mut self, count: C) -> Result<Bytes>
    where
        C: num::PrimInt,
    {
        Ok(concatenate(self.fetch_bytes_as_blocks(count)?))
    }

    /// Reads exactly `count` bytes, one fragment per block touched.
    pub fn fetch_bytes_as_blocks<C>(&mut self, count: C) -> Result<Vec<Bytes>>
    where
        C: num::PrimInt,
    {
        let count = check_request("count", count, self.remaining)?;
        let mut fragments = Vec::new();
        self.walk(count, |segment, amount| {
            fragments.push(segment.take(amount));
        });
        fragments.retain(|fragment| !fragment.is_empty());
        Ok(fragments)
    }

    /// Moves past `steps` bytes without reading them.
    pub fn skip<C>(&mut self, steps: C) -> Result<()>
    where
        C: num::PrimInt,
    {
        let steps = check_request("steps", steps, self.remaining)?;
        self.walk(steps, ByteCursor::advance_by);
        Ok(())
    }

    /// Returns the number of unread bytes across all blocks.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[must_use]
    pub fn is_end(&self) -> bool {
        self.remaining == 0
    }

    /// Returns the number of non-empty blocks the cursor holds.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.segments.len()
    }

    /// Rewinds every block to its start.
    pub fn reset(&mut self) {
        self.segments.iter_mut().for_each(ByteCursor::reset);
        self.active = 0;
        self.remaining = self.segments.iter().map(ByteCursor::remaining).sum();
    }

    /// Points the cursor at a new list of blocks.
    ///
    /// Existing segments are reinitialized in place; the segment list only
    /// grows or shrinks at its tail.
    pub fn reinitialize<I, B>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        self.reinitialize_with_mode(blocks, CopyMode::Shared);
    }

    pub fn reinitialize_with_mode<I, B>(&mut self, blocks: I, mode: CopyMode)
    where
        I: IntoIterator<Item = B>,
        B: Into<Bytes>,
    {
        let old_count = self.segments.len();
        let mut blocks = non_empty(blocks, mode);

        let mut reused = 0;
        // `zip` polls the segments first, so no block is lost when they run out.
        for (segment, block) in self.segments.iter_mut().zip(&mut blocks) {
            segment.reinitialize(block);
            reused += 1;
        }
        self.segments.truncate(reused);
        self.segments.extend(blocks.map(ByteCursor::new));

        log::trace!(
            "reinitialized block cursor: {reused} segments reused, {} added, {} dropped",
            self.segments.len() - reused,
            old_count - reused,
        );

        self.active = 0;
        self.remaining = self.segments.iter().map(ByteCursor::remaining).sum();
    }

    /// Consumes `amount` bytes front to back, handing each per-segment piece
    /// to `step`. `amount` must not exceed `self.remaining`.
    fn walk<F>(&mut self, mut amount: usize, mut step: F)
    where
        F: FnMut(&mut ByteCursor, usize),
    {
        while amount > 0 {
            let Some(segment) = self.segments.get_mut(self.active) else {
                unreachable!("remaining count exceeds the bytes held by the segments");
            };
            let taken = amount.min(segment.remaining());
            step(&mut *segment, taken);
            amount -= taken;
            self.remaining -= taken;
            if segment.is_end() {
                self.active += 1;
            }
        }
        self.skip_exhausted();
    }

    fn skip_exhausted(&mut self) {
        while self
            .segments
            .get(self.active)
            .is_some_and(ByteCursor::is_end)
        {
            self.active += 1;
        }
    }
}

impl<B> FromIterator<B> for BlockCursor
where
    B: Into<Bytes>,
{
    fn from_iter<I: IntoIterator<Item = B>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl Buf for BlockCursor {
    fn remaining(&self) -> usize {
        self.remaining
    }

    fn chunk(&self) -> &[u8] {
        self.segments
            .get(self.active)
            .map(ByteCursor::unread)
            .unwrap_or_default()
    }

    fn advance(&mut self, cnt: usize) {
        assert!(
            cnt <= self.remaining,
            "cannot advance past the end of the blocks: {cnt} > {}",
            self.remaining
        );
        self.walk(cnt, ByteCursor::advance_by);
    }
}
