//! Verbatim block codec.
//!
//! Every block is written as a 4-byte little-endian header followed by the
//! block bytes unchanged. The header holds the block length, with the high
//! bit set on the final block:
//!
//! ```text
//! +----------------------------+-----------------+
//! | u32 LE: len | FINAL_FLAG   | len raw bytes   |
//! +----------------------------+-----------------+
//! ```
//!
//! The per-block bound is exactly `n + 4`, so destination sizing and block
//! boundaries chosen by the stream controller are visible byte-for-byte in
//! the output.

use super::{copy_into, BlockCodec, BlockCompressor, BlockDecompressor, CodecError};
use crate::options::Options;

/// Block header size in bytes.
pub const BLOCK_HEADER_SIZE: usize = 4;

/// High bit of the block header: this is the last block of the stream.
pub const FINAL_FLAG: u32 = 0x8000_0000;

/// Largest block length representable in a header.
pub const MAX_STORED_BLOCK: usize = (FINAL_FLAG - 1) as usize;

/// Marker type for the verbatim codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stored;

impl BlockCodec for Stored {
    const NAME: &'static str = "stored";

    type Compressor = StoredBlockCompressor;
    type Decompressor = StoredBlockDecompressor;

    fn compressor(_options: &Options) -> Result<StoredBlockCompressor, CodecError> {
        Ok(StoredBlockCompressor::default())
    }

    fn decompressor(_options: &Options) -> StoredBlockDecompressor {
        StoredBlockDecompressor
    }

    fn max_block_size(n: usize) -> usize {
        n + BLOCK_HEADER_SIZE
    }
}

/// Counts blocks as it writes them.
#[derive(Debug, Default)]
pub struct StoredBlockCompressor {
    blocks: usize,
    finished: bool,
}

impl StoredBlockCompressor {
    /// Number of blocks written so far.
    pub fn blocks(&self) -> usize {
        self.blocks
    }
}

impl BlockCompressor for StoredBlockCompressor {
    fn max_block_size(&self, n: usize) -> usize {
        Stored::max_block_size(n)
    }

    fn compress_block(
        &mut self,
        input: &[u8],
        is_final: bool,
        dest: &mut [u8],
    ) -> Result<usize, CodecError> {
        if self.finished {
            return Err(CodecError::Finished);
        }
        if input.len() > MAX_STORED_BLOCK {
            return Err(CodecError::Encoder(format!(
                "block of {} bytes exceeds the stored block limit",
                input.len()
            )));
        }
        let needed = input.len() + BLOCK_HEADER_SIZE;
        if dest.len() < needed {
            return Err(CodecError::DestinationTooSmall {
                needed,
                available: dest.len(),
            });
        }
        let mut header = input.len() as u32;
        if is_final {
            header |= FINAL_FLAG;
        }
        dest[..BLOCK_HEADER_SIZE].copy_from_slice(&header.to_le_bytes());
        copy_into(input, &mut dest[BLOCK_HEADER_SIZE..])?;
        self.blocks += 1;
        self.finished = is_final;
        Ok(needed)
    }
}

/// Stateless decoder for stored streams.
#[derive(Debug, Default, Clone, Copy)]
pub struct StoredBlockDecompressor;

impl StoredBlockDecompressor {
    /// Splits a stored stream into its blocks as `(payload, is_final)` pairs.
    ///
    /// The stream must end with exactly one final block and carry no trailing bytes.
    pub fn blocks(input: &[u8]) -> Result<Vec<(&[u8], bool)>, CodecError> {
        let mut blocks = Vec::new();
        let mut pos = 0usize;
        loop {
            let header_end = pos + BLOCK_HEADER_SIZE;
            let header = input
                .get(pos..header_end)
                .ok_or_else(|| CodecError::Corrupt(format!("truncated block header at offset {pos}")))?;
            let word = u32::from_le_bytes([header[0], header[1], header[2], header[3]]);
            let len = (word & !FINAL_FLAG) as usize;
            let is_final = word & FINAL_FLAG != 0;
            let payload = header_end
                .checked_add(len)
                .and_then(|end| input.get(header_end..end))
                .ok_or_else(|| {
                    CodecError::Corrupt(format!(
                        "block at offset {pos} declares {len} bytes, {} available",
                        input.len() - header_end
                    ))
                })?;
            blocks.push((payload, is_final));
            pos = header_end + len;
            if is_final {
                break;
            }
        }
        if pos != input.len() {
            return Err(CodecError::Corrupt(format!(
                "{} trailing bytes after the final block",
                input.len() - pos
            )));
        }
        Ok(blocks)
    }
}

impl BlockDecompressor for StoredBlockDecompressor {
    fn decompress_to_vec(&mut self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let blocks = Self::blocks(input)?;
        let total = blocks.iter().map(|(b, _)| b.len()).sum();
        let mut out = Vec::with_capacity(total);
        for (payload, _) in blocks {
            out.extend_from_slice(payload);
        }
        Ok(out)
    }
}
