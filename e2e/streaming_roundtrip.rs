//! E2E Test Suite 01: Streaming round trips
//!
//! Drives `Stream::advance` the way an embedding application would and checks
//! that the result is an ordinary Brotli stream:
//! - output decodes with the `brotli` crate's own reader, not just our wrapper
//! - every quality level and both modes round-trip
//! - file-to-file compression through the pumps matches the in-memory result

use std::fs;
use std::io::Read;

use blockstream::io::{compress_reader, decompress_reader, open_dst_file, open_src_file, PumpConfig};
use blockstream::{compress_to_vec, Brotli, Mode, Operation, Options, Status, Stream};

fn corpus(len: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(len);
    let mut n = 0u64;
    while out.len() < len {
        let line = format!(
            "{{\"id\":{},\"name\":\"item-{}\",\"tags\":[\"a{}\",\"b{}\"]}}\n",
            n,
            n * 31 % 1000,
            n % 7,
            n % 13
        );
        out.extend_from_slice(line.as_bytes());
        n += 1;
    }
    out.truncate(len);
    out
}

/// Compresses `data` in `chunk` sized pieces with an `out` byte window.
fn stream_compress(data: &[u8], options: &Options, chunk: usize, out: usize) -> Vec<u8> {
    let mut s = Stream::compressor(options).unwrap();
    let mut window = vec![0u8; out];
    let mut result = Vec::new();
    let mut pieces = data.chunks(chunk).peekable();
    loop {
        let piece = pieces.next().unwrap_or(&[]);
        let op = if pieces.peek().is_none() { Operation::Finish } else { Operation::Process };
        let mut input = piece;
        loop {
            let mut output: &mut [u8] = &mut window;
            let status = s.advance(&mut input, &mut output, op).unwrap();
            let produced = out - output.len();
            result.extend_from_slice(&window[..produced]);
            if status == Status::Ok {
                break;
            }
        }
        if op == Operation::Finish {
            return result;
        }
    }
}

fn brotli_decode(compressed: &[u8]) -> Vec<u8> {
    let mut reader = brotli::Decompressor::new(compressed, 4096);
    let mut out = Vec::new();
    reader.read_to_end(&mut out).unwrap();
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: independent decoder accepts the stream
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_output_is_a_standard_brotli_stream() {
    let options = Options::new().with_quality(5).with_block_size(32 * 1024);
    let data = corpus(300_000);
    let compressed = stream_compress(&data, &options, 10_000, 8192);
    assert!(compressed.len() < data.len() / 2);
    assert_eq!(brotli_decode(&compressed), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: every quality level
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_all_quality_levels_roundtrip() {
    let data = corpus(40_000);
    for q in 0..=11 {
        let options = Options::new().with_quality(q).with_block_size(16 * 1024);
        let compressed = stream_compress(&data, &options, 3_000, 1_000);
        assert_eq!(brotli_decode(&compressed), data, "quality {}", q);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: modes and window sizes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_modes_and_windows_roundtrip() {
    let data = corpus(100_000);
    for mode in [Mode::Text, Mode::Font] {
        for bits in ["10", "16", "24"] {
            let mut options = Options::new().with_quality(4).with_mode(mode);
            options.parse_option("window-bits", bits).unwrap();
            let compressed = stream_compress(&data, &options, 7_777, 4_096);
            assert_eq!(brotli_decode(&compressed), data, "{:?} window {}", mode, bits);
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: binary, incompressible input
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_incompressible_input_roundtrip() {
    let mut x = 0xDEAD_BEEF_u64;
    let data: Vec<u8> = (0..200_000)
        .map(|_| {
            x ^= x << 7;
            x ^= x >> 9;
            (x >> 11) as u8
        })
        .collect();
    let options = Options::new().with_quality(6).with_block_size(64 * 1024);
    let compressed = stream_compress(&data, &options, 50_000, 65_536);
    assert_eq!(brotli_decode(&compressed), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 5: file to file through the pumps
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_file_to_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let src = dir.path().join("input.jsonl");
    let packed = dir.path().join("input.jsonl.br");
    let unpacked = dir.path().join("output.jsonl");
    let data = corpus(500_000);
    fs::write(&src, &data).unwrap();

    let options = Options::new().with_quality(3);
    let config = PumpConfig { chunk_size: 12_345, out_size: 999 };
    {
        let mut r = open_src_file(src.to_str().unwrap()).unwrap();
        let mut w = open_dst_file(packed.to_str().unwrap(), false).unwrap();
        let stats = compress_reader::<Brotli, _, _>(&mut r, &mut w, &options, &config).unwrap();
        assert_eq!(stats.bytes_in, data.len() as u64);
    }
    assert_eq!(fs::read(&packed).unwrap(), compress_to_vec(&data, &options).unwrap());

    {
        let mut r = open_src_file(packed.to_str().unwrap()).unwrap();
        let mut w = open_dst_file(unpacked.to_str().unwrap(), false).unwrap();
        decompress_reader::<Brotli, _, _>(&mut r, &mut w, &options).unwrap();
    }
    assert_eq!(fs::read(&unpacked).unwrap(), data);
}
