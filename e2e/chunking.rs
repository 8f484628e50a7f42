//! E2E Test Suite 02: Chunking independence
//!
//! The compressed bytes must depend only on the input bytes, the options and
//! where `Flush` was requested. How the caller slices its input and how much
//! output room it offers per call must never change the result.

use blockstream::{
    compress_to_vec, compress_to_vec_with, decompress_to_vec, BlockCodec, Direction, Operation,
    Options, Status, Stored, Stream,
};
use proptest::prelude::*;

/// Feeds `data` as consecutive pieces of the given sizes (cycled), offering
/// `out_sizes` (cycled) bytes of output per call, then finishes.
fn compress_sliced<K: BlockCodec>(
    data: &[u8],
    options: &Options,
    in_sizes: &[usize],
    out_sizes: &[usize],
) -> Vec<u8> {
    let mut s = Stream::<K>::with_codec(Direction::Compress, options).unwrap();
    let max_out = out_sizes.iter().copied().max().unwrap_or(1).max(1);
    let mut window = vec![0u8; max_out];
    let mut result = Vec::new();
    let mut rest = data;
    let mut i = 0usize;
    let mut j = 0usize;
    loop {
        let take = in_sizes[i % in_sizes.len()].max(1).min(rest.len());
        i += 1;
        let (mut input, tail) = rest.split_at(take);
        rest = tail;
        let op = if rest.is_empty() { Operation::Finish } else { Operation::Process };
        loop {
            let room = out_sizes[j % out_sizes.len()].max(1);
            j += 1;
            let mut output: &mut [u8] = &mut window[..room];
            let status = s.advance(&mut input, &mut output, op).unwrap();
            let produced = room - output.len();
            result.extend_from_slice(&window[..produced]);
            if status == Status::Ok {
                break;
            }
            assert_eq!(status, Status::Processing);
        }
        if op == Operation::Finish {
            assert!(s.is_finished());
            return result;
        }
    }
}

fn text(len: usize) -> Vec<u8> {
    const LINE: &[u8] = b"2024-01-01T00:00:00Z INFO request served path=/api/v1/items status=200\n";
    let mut out: Vec<u8> = LINE.iter().copied().cycle().take(len).collect();
    for (k, b) in out.iter_mut().enumerate().step_by(97) {
        *b = b'0' + (k % 10) as u8;
    }
    out
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 1: 5 MB one byte at a time equals one call
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_byte_at_a_time_equals_single_call() {
    let options = Options::new().with_quality(1);
    let data = text(5 * 1024 * 1024);
    let whole = compress_sliced::<blockstream::Brotli>(&data, &options, &[data.len()], &[1 << 20]);
    let bytewise = compress_sliced::<blockstream::Brotli>(&data, &options, &[1], &[1 << 20]);
    assert_eq!(whole, bytewise);
    assert_eq!(whole, compress_to_vec(&data, &options).unwrap());
    assert_eq!(decompress_to_vec(&whole, &options).unwrap(), data);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 2: tiny output windows equal a large one
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_one_byte_output_window_equals_large_window() {
    let options = Options::new().with_quality(2).with_block_size(4096);
    let data = text(60_000);
    let large = compress_sliced::<blockstream::Brotli>(&data, &options, &[5000], &[1 << 16]);
    let tiny = compress_sliced::<blockstream::Brotli>(&data, &options, &[5000], &[1]);
    assert_eq!(large, tiny);
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 3: incompressible input at the smallest window, staged vs direct output
// ─────────────────────────────────────────────────────────────────────────────

fn noise(len: usize) -> Vec<u8> {
    let mut x = 0x2545_F491_4F6C_DD1Du64;
    (0..len)
        .map(|_| {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            (x >> 32) as u8
        })
        .collect()
}

#[test]
fn test_small_window_noise_staged_equals_direct() {
    let data = noise(4 * 1024 * 1024);
    for (quality, block_size) in [(0u32, None), (1, None), (1, Some(16 * 1024 * 1024))] {
        let mut options = Options::new().with_quality(quality);
        options.parse_option("window-bits", "10").unwrap();
        if let Some(block_size) = block_size {
            options = options.with_block_size(block_size);
        }
        let staged = compress_sliced::<blockstream::Brotli>(&data, &options, &[data.len()], &[64 * 1024]);
        let direct =
            compress_sliced::<blockstream::Brotli>(&data, &options, &[data.len()], &[32 * 1024 * 1024]);
        assert_eq!(staged, direct, "quality {quality}");
        assert!(staged.len() > data.len());
        assert_eq!(compress_to_vec(&data, &options).unwrap(), staged);
        assert_eq!(decompress_to_vec(&staged, &options).unwrap(), data);
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Test 4: property, stored codec (cheap enough for many cases)
// ─────────────────────────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_stored_output_is_independent_of_slicing(
        data in proptest::collection::vec(any::<u8>(), 0..4000),
        block_size in 16usize..600,
        in_sizes in proptest::collection::vec(1usize..900, 1..6),
        out_sizes in proptest::collection::vec(1usize..900, 1..6),
    ) {
        let options = Options::new().with_block_size(block_size);
        let sliced = compress_sliced::<Stored>(&data, &options, &in_sizes, &out_sizes);
        let one_shot = compress_to_vec_with::<Stored>(&data, &options).unwrap();
        prop_assert_eq!(&sliced, &one_shot);
    }

    #[test]
    fn prop_brotli_loses_no_data(
        data in proptest::collection::vec(any::<u8>(), 0..20_000),
        in_sizes in proptest::collection::vec(1usize..5000, 1..4),
        out_sizes in proptest::collection::vec(1usize..3000, 1..4),
    ) {
        let options = Options::new().with_quality(1).with_block_size(2048);
        let sliced = compress_sliced::<blockstream::Brotli>(&data, &options, &in_sizes, &out_sizes);
        prop_assert_eq!(&sliced, &compress_to_vec(&data, &options).unwrap());
        prop_assert_eq!(decompress_to_vec(&sliced, &options).unwrap(), data);
    }
}
