// Flush semantics, checked byte-for-byte through the stored codec.

use blockstream::codec::stored::StoredBlockDecompressor;
use blockstream::{decompress_to_vec, Direction, Operation, Options, Stored, Stream};

use crate::support::{pump, sample_text};

fn stored(block_size: usize) -> Stream<Stored> {
    let options = Options::new().with_block_size(block_size);
    Stream::<Stored>::with_codec(Direction::Compress, &options).unwrap()
}

#[test]
fn flush_emits_short_non_final_block() {
    let mut s = stored(64);
    let mut window = vec![0u8; 128];
    let mut out = Vec::new();
    pump(&mut s, b"first", &mut window, &mut out, Operation::Process);
    assert!(out.is_empty());
    pump(&mut s, b"", &mut window, &mut out, Operation::Flush);
    assert_eq!(out, [5, 0, 0, 0, b'f', b'i', b'r', b's', b't']);
    assert_eq!(s.staged_input(), 0);
    assert!(!s.is_finished());
}

#[test]
fn flush_with_nothing_staged_is_a_no_op() {
    let mut s = stored(64);
    let mut window = vec![0u8; 128];
    let mut out = Vec::new();
    let calls = pump(&mut s, b"", &mut window, &mut out, Operation::Flush);
    assert_eq!(calls, 1);
    assert!(out.is_empty());
    assert_eq!(s.total_out(), 0);
}

#[test]
fn flush_splits_blocks_where_requested() {
    let data = sample_text(150);
    let mut s = stored(64);
    let mut window = vec![0u8; 32];
    let mut out = Vec::new();
    pump(&mut s, &data[..40], &mut window, &mut out, Operation::Flush);
    pump(&mut s, &data[40..], &mut window, &mut out, Operation::Process);
    pump(&mut s, b"", &mut window, &mut out, Operation::Finish);

    let blocks = StoredBlockDecompressor::blocks(&out).unwrap();
    let layout: Vec<(usize, bool)> = blocks.iter().map(|(b, f)| (b.len(), *f)).collect();
    assert_eq!(layout, [(40, false), (64, false), (46, true)]);
    let joined: Vec<u8> = blocks.iter().flat_map(|(b, _)| b.iter().copied()).collect();
    assert_eq!(joined, data);
}

#[test]
fn repeated_flushes_each_end_a_block() {
    let mut s = stored(1024);
    let mut window = vec![0u8; 64];
    let mut out = Vec::new();
    for piece in [&b"ab"[..], b"cde", b"f"] {
        pump(&mut s, piece, &mut window, &mut out, Operation::Flush);
    }
    pump(&mut s, b"", &mut window, &mut out, Operation::Finish);
    let blocks = StoredBlockDecompressor::blocks(&out).unwrap();
    let layout: Vec<(&[u8], bool)> = blocks.to_vec();
    assert_eq!(
        layout,
        [
            (&b"ab"[..], false),
            (&b"cde"[..], false),
            (&b"f"[..], false),
            (&b""[..], true)
        ]
    );
}

#[test]
fn brotli_flush_output_is_a_decodable_prefix_once_finished() {
    let options = Options::new().with_quality(1);
    let mut s = Stream::compressor(&options).unwrap();
    let mut window = vec![0u8; 4096];
    let mut out = Vec::new();
    pump(&mut s, b"line one\n", &mut window, &mut out, Operation::Flush);
    let after_first = out.len();
    pump(&mut s, b"line two\n", &mut window, &mut out, Operation::Flush);
    assert!(out.len() > after_first);
    pump(&mut s, b"", &mut window, &mut out, Operation::Finish);
    assert_eq!(
        decompress_to_vec(&out, &options).unwrap(),
        b"line one\nline two\n"
    );
}
