//! One-shot compression and decompression of whole buffers.
//!
//! [`compress_buffer`] produces exactly the bytes a [`Stream`] would produce
//! for the same input fed in any chunking and finished in one go: the input is
//! cut into `block_size` blocks and each block is compressed straight into the
//! caller's buffer.
//!
//! [`Stream`]: crate::stream::Stream

use crate::codec::{BlockCodec, BlockCompressor, BlockDecompressor, Brotli};
use crate::options::Options;
use crate::status::{Error, Result};

/// Number of blocks an `n`-byte input is cut into; an empty input still
/// produces one (empty, final) block.
#[inline]
pub fn block_count(n: usize, block_size: usize) -> usize {
    n.div_ceil(block_size).max(1)
}

/// Worst-case compressed size of an `n`-byte input with the Brotli codec.
pub fn max_compressed_size(n: usize, options: &Options) -> usize {
    max_compressed_size_with::<Brotli>(n, options)
}

/// Worst-case compressed size of an `n`-byte input with codec `K`: the sum of
/// the per-block bounds of the full blocks and of the tail.
pub fn max_compressed_size_with<K: BlockCodec>(n: usize, options: &Options) -> usize {
    let block_size = options.base.block_size;
    let full = n / block_size;
    let tail = n % block_size;
    let mut bound = full.saturating_mul(K::max_block_size(block_size));
    if tail > 0 || n == 0 {
        bound = bound.saturating_add(K::max_block_size(tail));
    }
    bound
}

/// Compresses `input` into `output` with Brotli, returning the compressed length.
pub fn compress_buffer(input: &[u8], output: &mut [u8], options: &Options) -> Result<usize> {
    compress_buffer_with::<Brotli>(input, output, options)
}

/// Compresses `input` into `output` with codec `K`.
///
/// `output` must hold at least [`max_compressed_size_with`] bytes; a smaller
/// buffer is rejected with [`Error::OutputTooSmall`] before any work is done.
pub fn compress_buffer_with<K: BlockCodec>(
    input: &[u8],
    output: &mut [u8],
    options: &Options,
) -> Result<usize> {
    let needed = max_compressed_size_with::<K>(input.len(), options);
    if output.len() < needed {
        return Err(Error::OutputTooSmall {
            needed,
            available: output.len(),
        });
    }
    let block_size = options.base.block_size;
    let mut compressor = K::compressor(options)?;
    let mut pos = 0usize;

    if input.is_empty() {
        return Ok(compressor.compress_block(&[], true, output)?);
    }
    let blocks = block_count(input.len(), block_size);
    for (i, block) in input.chunks(block_size).enumerate() {
        pos += compressor.compress_block(block, i + 1 == blocks, &mut output[pos..])?;
    }
    Ok(pos)
}

/// Compresses `input` with Brotli into a vector sized to the worst case and
/// truncated to the compressed length.
pub fn compress_to_vec(input: &[u8], options: &Options) -> Result<Vec<u8>> {
    compress_to_vec_with::<Brotli>(input, options)
}

pub fn compress_to_vec_with<K: BlockCodec>(input: &[u8], options: &Options) -> Result<Vec<u8>> {
    let capacity = max_compressed_size_with::<K>(input.len(), options);
    let mut out = Vec::new();
    out.try_reserve_exact(capacity)
        .map_err(|_| Error::Memory(capacity))?;
    out.resize(capacity, 0);
    let n = compress_buffer_with::<K>(input, &mut out, options)?;
    out.truncate(n);
    Ok(out)
}

/// Decompresses a complete Brotli stream into `output`, returning the decoded length.
pub fn decompress_buffer(input: &[u8], output: &mut [u8], options: &Options) -> Result<usize> {
    decompress_buffer_with::<Brotli>(input, output, options)
}

pub fn decompress_buffer_with<K: BlockCodec>(
    input: &[u8],
    output: &mut [u8],
    options: &Options,
) -> Result<usize> {
    Ok(K::decompressor(options).decompress_buffer(input, output)?)
}

/// Decompresses a complete Brotli stream into a new vector.
pub fn decompress_to_vec(input: &[u8], options: &Options) -> Result<Vec<u8>> {
    decompress_to_vec_with::<Brotli>(input, options)
}

pub fn decompress_to_vec_with<K: BlockCodec>(input: &[u8], options: &Options) -> Result<Vec<u8>> {
    Ok(K::decompressor(options).decompress_to_vec(input)?)
}
