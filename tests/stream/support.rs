// Shared helpers for driving a Stream in integration tests.
#![allow(dead_code)]

use blockstream::{BlockCodec, Operation, Status, Stream};

/// Runs one operation on `data` to completion, offering `window.len()` bytes
/// of output per call and appending everything produced to `out`. Returns the
/// number of `advance` calls made.
pub fn pump<K: BlockCodec>(
    stream: &mut Stream<K>,
    data: &[u8],
    window: &mut [u8],
    out: &mut Vec<u8>,
    op: Operation,
) -> usize {
    let mut input = data;
    let mut calls = 0;
    loop {
        let room = window.len();
        let mut output: &mut [u8] = &mut window[..];
        let status = stream.advance(&mut input, &mut output, op).unwrap();
        let produced = room - output.len();
        out.extend_from_slice(&window[..produced]);
        calls += 1;
        assert!(calls < 1_000_000, "advance never completed");
        match status {
            Status::Ok => return calls,
            Status::Processing => {}
            Status::BufferFull => panic!("BufferFull with {} bytes of room", room),
        }
    }
}

/// Feeds every chunk with `Process`, then issues an empty `Finish`.
pub fn compress_chunked<K: BlockCodec>(
    stream: &mut Stream<K>,
    chunks: &[&[u8]],
    out_size: usize,
) -> Vec<u8> {
    let mut window = vec![0u8; out_size];
    let mut out = Vec::new();
    for chunk in chunks {
        pump(stream, chunk, &mut window, &mut out, Operation::Process);
    }
    pump(stream, &[], &mut window, &mut out, Operation::Finish);
    out
}

/// Splits `data` into consecutive chunks whose sizes cycle through `sizes`.
pub fn split_cycling<'a>(data: &'a [u8], sizes: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = data;
    let mut i = 0;
    while !rest.is_empty() {
        let n = sizes[i % sizes.len()].max(1).min(rest.len());
        let (head, tail) = rest.split_at(n);
        chunks.push(head);
        rest = tail;
        i += 1;
    }
    chunks
}

/// Compressible text with some variety, `len` bytes long.
pub fn sample_text(len: usize) -> Vec<u8> {
    const WORDS: &[&str] = &[
        "block", "stream", "staging", "buffer", "brotli", "window", "flush", "finish",
        "cursor", "output", "input", "drain", "metablock", "codec", "adapter",
    ];
    let mut out = Vec::with_capacity(len + 16);
    let mut x = 0x9E37_79B9u32;
    while out.len() < len {
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        out.extend_from_slice(WORDS[(x as usize) % WORDS.len()].as_bytes());
        out.push(if x % 11 == 0 { b'\n' } else { b' ' });
    }
    out.truncate(len);
    out
}
