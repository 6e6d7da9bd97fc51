use bytes::Bytes;
use proptest::prelude::*;

/// Returns `len` bytes counting up from `start`, wrapping at 256.
#[must_use]
#[expect(clippy::cast_possible_truncation)]
pub(crate) fn counting_bytes(start: u8, len: usize) -> Bytes {
    (0..len)
        .map(|i| start.wrapping_add((i % 256) as u8))
        .collect::<Vec<u8>>()
        .into()
}

/// Concatenates blocks the slow, obvious way.
#[must_use]
pub(crate) fn flatten<B: AsRef<[u8]>>(blocks: &[B]) -> Vec<u8> {
    blocks.iter().flat_map(|b| b.as_ref().iter().copied()).collect()
}

/// Drops empty blocks, mirroring what the block readers do on construction.
#[must_use]
pub(crate) fn non_empty(blocks: &[Vec<u8>]) -> Vec<Bytes> {
    blocks
        .iter()
        .filter(|b| !b.is_empty())
        .map(|b| Bytes::copy_from_slice(b))
        .collect()
}

/// A list of blocks, some of which may be empty.
pub(crate) fn block_list() -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(prop::collection::vec(any::<u8>(), 0..48), 0..8)
}

/// A list of blocks together with a sequence of read sizes. The sizes are
/// not guaranteed to fit the blocks.
pub(crate) fn blocks_and_reads() -> impl Strategy<Value = (Vec<Vec<u8>>, Vec<usize>)> {
    (block_list(), prop::collection::vec(0usize..64, 0..16))
}
