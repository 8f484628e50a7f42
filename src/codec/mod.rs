//! Block codecs: the "compress one whole buffer at a time" capability the
//! stream controller adapts to a push-style interface.
//!
//! A codec is described by three traits:
//!
//! - [`BlockCompressor`] compresses one complete block into a destination that
//!   the caller has already sized with [`BlockCompressor::max_block_size`].
//! - [`BlockDecompressor`] decodes a complete compressed stream in one call.
//!   Incremental decoding is declared by [`BlockDecompressor::decompress_stream`]
//!   but not provided; it always fails with [`CodecError::Unimplemented`].
//! - [`BlockCodec`] is a zero-sized marker tying a name, the two halves and their
//!   constructors together so that [`Stream`](crate::stream::Stream) and the
//!   one-shot functions can be generic over the codec.
//!
//! Two codecs are provided: [`Brotli`] (the production codec) and [`Stored`]
//! (blocks copied verbatim behind a 4-byte header), which is small enough to
//! reason about byte-for-byte in tests.

pub mod brotli;
pub mod stored;

use thiserror::Error;

use crate::options::Options;
use crate::status::Status;

pub use self::brotli::{Brotli, BrotliBlockCompressor, BrotliBlockDecompressor};
pub use self::stored::{Stored, StoredBlockCompressor, StoredBlockDecompressor};

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Failures reported by a block codec.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The destination cannot hold the produced bytes. A decoder that stops
    /// as soon as it overflows reports `available + 1` as `needed`.
    #[error("destination too small: {needed} bytes produced, {available} bytes of room")]
    DestinationTooSmall { needed: usize, available: usize },

    /// A block was submitted after the final block.
    #[error("block submitted after the final block")]
    Finished,

    /// The compressed input is malformed or truncated.
    #[error("corrupt compressed data: {0}")]
    Corrupt(String),

    /// The underlying encoder reported a failure.
    #[error("encoder failure: {0}")]
    Encoder(String),

    /// The operation is declared but not provided.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

// ─────────────────────────────────────────────────────────────────────────────
// Traits
// ─────────────────────────────────────────────────────────────────────────────

/// Compresses a stream one complete block at a time.
///
/// Blocks submitted through one compressor form one compressed stream: the
/// concatenation of everything written into the successive `dest` buffers is
/// a valid input for the matching [`BlockDecompressor`].
pub trait BlockCompressor {
    /// Worst-case number of bytes [`compress_block`](Self::compress_block) may
    /// write for an `n`-byte block. Never decreases as `n` grows.
    fn max_block_size(&self, n: usize) -> usize;

    /// Compresses `input` into `dest` and returns the number of bytes written.
    ///
    /// `is_final` marks the last block of the stream; the compressor emits its
    /// trailer with it and refuses any later block. The caller guarantees
    /// `dest.len() >= self.max_block_size(input.len())`.
    fn compress_block(
        &mut self,
        input: &[u8],
        is_final: bool,
        dest: &mut [u8],
    ) -> Result<usize, CodecError>;
}

/// Decodes a complete compressed stream.
pub trait BlockDecompressor {
    /// Decodes the whole of `input` into a freshly allocated vector.
    fn decompress_to_vec(&mut self, input: &[u8]) -> Result<Vec<u8>, CodecError>;

    /// Decodes the whole of `input` into `output`, returning the decoded length.
    fn decompress_buffer(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
        let decoded = self.decompress_to_vec(input)?;
        if decoded.len() > output.len() {
            return Err(CodecError::DestinationTooSmall {
                needed: decoded.len(),
                available: output.len(),
            });
        }
        output[..decoded.len()].copy_from_slice(&decoded);
        Ok(decoded.len())
    }

    /// Incremental decoding. Not provided by any codec in this crate.
    fn decompress_stream(
        &mut self,
        _input: &mut &[u8],
        _output: &mut &mut [u8],
    ) -> Result<Status, CodecError> {
        Err(CodecError::Unimplemented("streaming decompression"))
    }
}

/// Zero-sized description of a block codec.
pub trait BlockCodec {
    /// Short lowercase name, e.g. `"brotli"`.
    const NAME: &'static str;

    type Compressor: BlockCompressor;
    type Decompressor: BlockDecompressor;

    /// Builds a compressor configured from `options`.
    fn compressor(options: &Options) -> Result<Self::Compressor, CodecError>;

    /// Builds a decompressor configured from `options`.
    fn decompressor(options: &Options) -> Self::Decompressor;

    /// Per-block worst case, identical to the compressor's `max_block_size`.
    fn max_block_size(n: usize) -> usize;
}

/// Copies encoder output into `dest`, failing without a partial write.
pub(crate) fn copy_into(produced: &[u8], dest: &mut [u8]) -> Result<usize, CodecError> {
    if produced.len() > dest.len() {
        return Err(CodecError::DestinationTooSmall {
            needed: produced.len(),
            available: dest.len(),
        });
    }
    dest[..produced.len()].copy_from_slice(produced);
    Ok(produced.len())
}
