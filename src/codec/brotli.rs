//! Brotli block codec built on the `brotli` crate.
//!
//! One encoder lives for the whole stream, so the window carries over block
//! boundaries. A non-final block is written and then flushed, which closes the
//! current metablock and makes every byte of the block decodable. The final
//! block is written and the encoder is finished, emitting the ISLAST
//! metablock. The concatenation of all blocks is one ordinary Brotli stream
//! that any Brotli decoder accepts.
//!
//! Decoding runs the decoder state machine over the input slice directly, so
//! it never writes past the caller's buffer and can tell where the stream
//! ends inside `input`.

use std::io::Write;

use brotli::enc::backward_references::BrotliEncoderMode;
use brotli::enc::BrotliEncoderParams;
use brotli::{BrotliDecompressStream, BrotliResult, BrotliState, CompressorWriter, HeapAlloc, HuffmanCode};

use super::{copy_into, BlockCodec, BlockCompressor, BlockDecompressor, CodecError};
use crate::config::{BLOCK_GROWTH_SHIFT, BROTLI_IO_BUFFER_SIZE, MAX_BLOCK_OVERHEAD};
use crate::options::{BrotliOptions, Mode, Options};

/// Marker type for the Brotli codec.
#[derive(Debug, Clone, Copy, Default)]
pub struct Brotli;

impl BlockCodec for Brotli {
    const NAME: &'static str = "brotli";

    type Compressor = BrotliBlockCompressor;
    type Decompressor = BrotliBlockDecompressor;

    fn compressor(options: &Options) -> Result<BrotliBlockCompressor, CodecError> {
        Ok(BrotliBlockCompressor::new(&options.brotli))
    }

    fn decompressor(_options: &Options) -> BrotliBlockDecompressor {
        BrotliBlockDecompressor
    }

    fn max_block_size(n: usize) -> usize {
        n + (n >> BLOCK_GROWTH_SHIFT) + MAX_BLOCK_OVERHEAD
    }
}

/// Maps the crate options onto encoder parameters.
pub fn encoder_params(options: &BrotliOptions) -> BrotliEncoderParams {
    let mut params = BrotliEncoderParams::default();
    params.quality = options.quality as i32;
    params.lgwin = options.window_bits as i32;
    params.mode = match options.mode {
        Mode::Text => BrotliEncoderMode::BROTLI_MODE_TEXT,
        Mode::Font => BrotliEncoderMode::BROTLI_MODE_FONT,
    };
    // Off only on request; the encoder searches the static dictionary by default.
    params.use_dictionary = options.enable_transforms;
    params
}

/// Stream-lifetime Brotli encoder.
pub struct BrotliBlockCompressor {
    // `None` once the final block has been written.
    writer: Option<CompressorWriter<Vec<u8>>>,
}

impl BrotliBlockCompressor {
    pub fn new(options: &BrotliOptions) -> Self {
        let params = encoder_params(options);
        BrotliBlockCompressor {
            writer: Some(CompressorWriter::with_params(
                Vec::new(),
                BROTLI_IO_BUFFER_SIZE,
                &params,
            )),
        }
    }

    /// `true` once the final block has been emitted.
    pub fn is_finished(&self) -> bool {
        self.writer.is_none()
    }
}

impl core::fmt::Debug for BrotliBlockCompressor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BrotliBlockCompressor")
            .field("finished", &self.is_finished())
            .finish()
    }
}

fn encoder_error(e: std::io::Error) -> CodecError {
    CodecError::Encoder(e.to_string())
}

impl BlockCompressor for BrotliBlockCompressor {
    fn max_block_size(&self, n: usize) -> usize {
        Brotli::max_block_size(n)
    }

    fn compress_block(
        &mut self,
        input: &[u8],
        is_final: bool,
        dest: &mut [u8],
    ) -> Result<usize, CodecError> {
        if is_final {
            let mut writer = self.writer.take().ok_or(CodecError::Finished)?;
            writer.write_all(input).map_err(encoder_error)?;
            let produced = writer.into_inner();
            copy_into(&produced, dest)
        } else {
            let writer = self.writer.as_mut().ok_or(CodecError::Finished)?;
            writer.write_all(input).map_err(encoder_error)?;
            writer.flush().map_err(encoder_error)?;
            let produced = std::mem::take(writer.get_mut());
            copy_into(&produced, dest)
        }
    }
}

/// Whole-stream Brotli decoder.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrotliBlockDecompressor;

type DecoderState = BrotliState<HeapAlloc<u8>, HeapAlloc<u32>, HeapAlloc<HuffmanCode>>;

// Largest slice handed to the decoder in one call; its offsets are 32-bit.
const MAX_FEED: usize = 1 << 30;

/// Decoder over one complete input slice.
struct SliceDecoder<'a> {
    state: DecoderState,
    input: &'a [u8],
    pos: usize,
}

impl<'a> SliceDecoder<'a> {
    fn new(input: &'a [u8]) -> Self {
        SliceDecoder {
            state: BrotliState::new(HeapAlloc::default(), HeapAlloc::default(), HeapAlloc::default()),
            input,
            pos: 0,
        }
    }

    /// Decodes into `output`. Returns the bytes written and whether the end of
    /// the stream was reached; `false` means `output` is full.
    fn fill(&mut self, output: &mut [u8]) -> Result<(usize, bool), CodecError> {
        let input = self.input;
        let mut written = 0usize;
        loop {
            let end = input.len().min(self.pos + MAX_FEED);
            let window = &input[self.pos..end];
            let mut available_in = window.len();
            let mut input_offset = 0usize;
            let mut available_out = output.len() - written;
            let mut total_out = 0usize;
            let result = BrotliDecompressStream(
                &mut available_in,
                &mut input_offset,
                window,
                &mut available_out,
                &mut written,
                output,
                &mut total_out,
                &mut self.state,
            );
            self.pos += input_offset;
            match result {
                BrotliResult::ResultSuccess => return Ok((written, true)),
                BrotliResult::NeedsMoreOutput => return Ok((written, false)),
                BrotliResult::NeedsMoreInput if input_offset > 0 && self.pos < input.len() => {}
                BrotliResult::NeedsMoreInput => {
                    return Err(CodecError::Corrupt(format!(
                        "stream truncated after {} bytes",
                        input.len()
                    )))
                }
                BrotliResult::ResultFailure => {
                    return Err(CodecError::Corrupt(format!("invalid stream near byte {}", self.pos)))
                }
            }
        }
    }

    /// Fails if bytes follow the end of the stream.
    fn check_consumed(&self) -> Result<(), CodecError> {
        match self.input.len() - self.pos {
            0 => Ok(()),
            rest => Err(CodecError::Corrupt(format!(
                "{rest} trailing bytes after the end of the stream"
            ))),
        }
    }
}

impl BlockDecompressor for BrotliBlockDecompressor {
    fn decompress_to_vec(&mut self, input: &[u8]) -> Result<Vec<u8>, CodecError> {
        let mut decoder = SliceDecoder::new(input);
        let mut chunk = vec![0u8; 16 * BROTLI_IO_BUFFER_SIZE];
        let mut out = Vec::new();
        loop {
            let (n, done) = decoder.fill(&mut chunk)?;
            out.extend_from_slice(&chunk[..n]);
            if done {
                break;
            }
        }
        decoder.check_consumed()?;
        Ok(out)
    }

    /// Decodes straight into `output`. When the stream is longer, decoding
    /// stops one byte past the end of `output`, so `needed` in the error is a
    /// lower bound.
    fn decompress_buffer(&mut self, input: &[u8], output: &mut [u8]) -> Result<usize, CodecError> {
        let mut decoder = SliceDecoder::new(input);
        let (written, done) = decoder.fill(output)?;
        if !done {
            let mut spare = [0u8; 1];
            match decoder.fill(&mut spare)? {
                (0, true) => {}
                (0, false) => return Err(CodecError::Corrupt("decoder made no progress".into())),
                (extra, _) => {
                    return Err(CodecError::DestinationTooSmall {
                        needed: output.len() + extra,
                        available: output.len(),
                    })
                }
            }
        }
        decoder.check_consumed()?;
        Ok(written)
    }
}
