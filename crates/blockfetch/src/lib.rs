//! Sequential, bounds-checked readers over in-memory byte buffers.
//!
//! [`ByteCursor`] reads from a single contiguous buffer. [`BlockCursor`]
//! reads from an ordered list of discontiguous buffers ("blocks") as if they
//! were one stream, handing out zero-copy slices whenever a read stays inside
//! one block. [`DataQueue`] is the producer/consumer variant: buffers are
//! pushed as they arrive and exact byte counts are popped off the front.
//!
//! None of these types interpret the bytes they hand out. They implement
//! [`bytes::Buf`] where that makes sense, so decoders can layer integer and
//! framing reads on top.

pub mod block_cursor;
mod count;
pub mod cursor;
pub mod errors;
pub mod merger;
pub mod queue;

#[cfg(test)]
mod testing;

pub use block_cursor::BlockCursor;
pub use cursor::{ByteCursor, CopyMode};
pub use errors::{FetchError, Result};
pub use merger::{BufferMerger, concatenate};
pub use queue::DataQueue;
