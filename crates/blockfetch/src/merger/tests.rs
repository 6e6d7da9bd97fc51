use datalit::datalit;

use crate::testing::counting_bytes;

use super::*;

#[test]
fn merge_concatenates_in_push_order() {
    let mut merger = BufferMerger::new();
    merger.push(datalit!(1u8, 2u8).to_vec());
    merger.push(Bytes::new());
    merger.push(Bytes::from_static(&[3, 4, 5]));
    assert_eq!(merger.len(), 3);
    assert_eq!(merger.total_len(), 5);
    assert_eq!(&merger.merge()[..], &[1, 2, 3, 4, 5]);
}

#[test]
fn merge_is_idempotent() {
    let merger: BufferMerger = [counting_bytes(0, 3), counting_bytes(50, 4)]
        .into_iter()
        .collect();
    assert_eq!(merger.merge(), merger.merge());
}

#[test]
fn reset_does_not_touch_earlier_results() {
    let mut merger = BufferMerger::new();
    merger.push(counting_bytes(0, 4));
    merger.push(counting_bytes(4, 4));
    let first = merger.merge();
    merger.reset();
    assert!(merger.is_empty());
    assert!(merger.merge().is_empty());
    assert_eq!(first, counting_bytes(0, 8));
}

#[test]
fn concatenate_of_nothing_is_empty() {
    assert!(concatenate(Vec::new()).is_empty());
}

#[test]
fn concatenate_of_one_block_does_not_copy() {
    let block = counting_bytes(9, 16);
    let out = concatenate(vec![block.clone()]);
    assert_eq!(out, block);
    assert_eq!(out.as_ptr(), block.as_ptr());
}

#[test]
fn concatenate_of_many_blocks() {
    let x = counting_bytes(0, 5);
    let y = counting_bytes(5, 0);
    let z = counting_bytes(5, 7);
    assert_eq!(concatenate(vec![x, y, z]), counting_bytes(0, 12));
}
