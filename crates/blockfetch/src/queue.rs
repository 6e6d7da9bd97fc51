//! A FIFO byte queue fed with buffers as they arrive.

use std::collections::VecDeque;

use bytes::Bytes;

use crate::{
    count::check_request,
    cursor::ByteCursor,
    errors::{FetchError, Result},
    merger::concatenate,
};


/// A queue of byte buffers that is drained by exact byte counts.
///
/// Producers [`push`](Self::push) buffers as they arrive; a consumer
/// [`pop`](Self::pop)s exactly as many bytes as it needs, regardless of how
/// the pushed buffers were split.
#[derive(Debug, Clone, Default)]
pub struct DataQueue {
    queue: VecDeque<ByteCursor>,
    remaining: usize,
}

impl DataQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a buffer to the back of the queue. Empty buffers are ignored.
    pub fn push<B>(&mut self, buffer: B)
    where
        B: Into<Bytes>,
    {
        let buffer = buffer.into();
        if buffer.is_empty() {
            return;
        }
        self.remaining += buffer.len();
        self.queue.push_back(ByteCursor::new(buffer));
    }

    /// Removes exactly `count` bytes from the front of the queue.
    ///
    /// Asking an empty queue for one or more bytes fails with
    /// [`FetchError::EndOfStream`], not [`FetchError::OutOfRange`], the same as
    /// the cursors.
    pub fn pop<C>(&mut self, count: C) -> Result<Bytes>
    where
        C: num::PrimInt,
    {
        let count = check_request("count", count, self.remaining)?;

        let mut fragments = Vec::new();
        let mut owed = count;
        while owed > 0 {
            let Some(front) = self.queue.front_mut() else {
                log::error!(
                    "data queue ran dry with {owed} of {count} bytes still owed (remaining count was {})",
                    self.remaining
                );
                return Err(FetchError::Internal(
                    "queue emptied before the requested bytes were popped",
                ));
            };
            let available = front.remaining();
            if available <= owed {
                fragments.push(front.take_rest());
                self.queue.pop_front();
                owed -= available;
            } else {
                fragments.push(front.take(owed));
                owed = 0;
            }
        }

        self.remaining -= count;
        Ok(concatenate(fragments))
    }

    /// Removes every queued byte. Returns an empty buffer if the queue is
    /// empty.
    pub fn pop_all(&mut self) -> Bytes {
        let fragments = self
            .queue
            .drain(..)
            .map(|mut cursor| cursor.take_rest())
            .filter(|fragment| !fragment.is_empty())
            .collect();
        self.remaining = 0;
        concatenate(fragments)
    }

    /// Returns the number of bytes waiting in the queue.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.remaining == 0
    }

    /// Discards every queued byte.
    pub fn reset(&mut self) {
        self.queue.clear();
        self.remaining = 0;
    }
}

impl<B> Extend<B> for DataQueue
where
    B: Into<Bytes>,
{
    fn extend<I: IntoIterator<Item = B>>(&mut self, iter: I) {
        for buffer in iter {
            self.push(buffer);
        }
    }
}
