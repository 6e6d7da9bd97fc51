#![no_main]

use blockfetch::{BlockCursor, DataQueue, FetchError};
use bytes::Bytes;
use libfuzzer_sys::fuzz_target;

// Input layout: [block count | op count | block sizes.. | ops.. | payload..]
fn split_input(data: &[u8]) -> Option<(Vec<Bytes>, &[u8])> {
    let (&block_count, rest) = data.split_first()?;
    let (&op_count, rest) = rest.split_first()?;
    let block_count = usize::from(block_count % 8);
    let op_count = usize::from(op_count);
    if rest.len() < block_count + op_count {
        return None;
    }
    let (sizes, rest) = rest.split_at(block_count);
    let (ops, mut payload) = rest.split_at(op_count);

    let mut blocks = Vec::with_capacity(block_count + 1);
    for &size in sizes {
        let (block, tail) = payload.split_at(usize::from(size).min(payload.len()));
        blocks.push(Bytes::copy_from_slice(block));
        payload = tail;
    }
    blocks.push(Bytes::copy_from_slice(payload));
    Some((blocks, ops))
}

fuzz_target!(|data: &[u8]| {
    let Some((blocks, ops)) = split_input(data) else {
        return;
    };
    let flat: Vec<u8> = blocks.iter().flat_map(|b| b.iter().copied()).collect();

    let mut cursor = BlockCursor::new(blocks.clone());
    let mut queue = DataQueue::new();
    queue.extend(blocks);
    let mut offset = 0;
    let mut queue_offset = 0;

    for &op in ops {
        let amount = usize::from(op & 0x3f);
        let available = flat.len() - offset;
        let expected_err = if amount == 0 {
            None
        } else if available == 0 {
            Some(FetchError::EndOfStream)
        } else if amount > available {
            Some(FetchError::OutOfRange {
                requested: amount,
                available,
            })
        } else {
            None
        };

        match op >> 6 {
            0 => match cursor.fetch() {
                Ok(byte) => {
                    assert_eq!(byte, flat[offset]);
                    offset += 1;
                }
                Err(err) => {
                    assert_eq!(err, FetchError::EndOfStream);
                    assert_eq!(available, 0);
                }
            },
            1 => match cursor.fetch_bytes(amount) {
                Ok(out) => {
                    assert_eq!(&out[..], &flat[offset..offset + amount]);
                    offset += amount;
                }
                Err(err) => assert_eq!(Some(err), expected_err),
            },
            2 => match cursor.fetch_bytes_as_blocks(amount) {
                Ok(fragments) => {
                    assert!(fragments.iter().all(|f| !f.is_empty()));
                    let joined: Vec<u8> = fragments.iter().flat_map(|f| f.iter().copied()).collect();
                    assert_eq!(&joined[..], &flat[offset..offset + amount]);
                    offset += amount;
                }
                Err(err) => assert_eq!(Some(err), expected_err),
            },
            _ => match cursor.skip(amount) {
                Ok(()) => offset += amount,
                Err(err) => assert_eq!(Some(err), expected_err),
            },
        }
        assert_eq!(cursor.remaining(), flat.len() - offset);

        let popped_len = amount.min(queue.remaining());
        let popped = queue.pop(popped_len).unwrap();
        assert_eq!(&popped[..], &flat[queue_offset..queue_offset + popped_len]);
        queue_offset += popped_len;
        assert_eq!(queue.remaining(), flat.len() - queue_offset);
    }

    cursor.reset();
    assert_eq!(cursor.remaining(), flat.len());
    if !flat.is_empty() {
        assert_eq!(&cursor.fetch_all().unwrap()[..], &flat[..]);
    }
    assert_eq!(&queue.pop_all()[..], &flat[queue_offset..]);
    assert!(queue.is_empty());
});
