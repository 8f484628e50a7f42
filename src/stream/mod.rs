//! Push-style streams over a block codec.
//!
//! A [`Stream`] owns its configuration, the codec context for its direction,
//! and two staging buffers. The caller drives it with
//! [`advance`](Stream::advance), handing over an input cursor and an output
//! window on every call; both shrink in place by exactly the number of bytes
//! consumed and produced. The returned [`Status`] tells the caller what to do
//! next:
//!
//! | status | meaning | caller action |
//! |---|---|---|
//! | `Ok` | operation complete for the data supplied | supply more input or stop |
//! | `Processing` | progress was made, more remains | drain output, call again |
//! | `BufferFull` | nothing could move, output window was empty | provide room, call again |
//!
//! Errors poison the stream when they leave the codec in an unknown state;
//! every later call then fails with [`Error::Poisoned`]. Dropping the stream
//! releases the codec context and both staging buffers whatever state it is in.

mod compress;
pub mod staging;

use crate::codec::{BlockCodec, BlockDecompressor, Brotli, CodecError};
use crate::options::Options;
use crate::status::{Error, Result, Status};

use self::staging::{InputStaging, OutputStaging};

/// Which way data flows through a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Compress,
    Decompress,
}

/// What the caller asks of one [`Stream::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    /// Accept input; emit whole blocks when they are available.
    #[default]
    Process,
    /// Emit everything accepted so far without ending the stream.
    Flush,
    /// Emit everything and terminate the stream.
    Finish,
}

/// Codec state, tagged by direction.
enum Context<K: BlockCodec> {
    Compress(K::Compressor),
    Decompress(K::Decompressor),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Active,
    /// The final block has been handed to the compressor.
    Finished,
    Poisoned,
}

/// A streaming compressor or decompressor over the block codec `K`.
pub struct Stream<K: BlockCodec = Brotli> {
    options: Options,
    context: Context<K>,
    input_staging: InputStaging,
    output_staging: OutputStaging,
    state: State,
    total_in: u64,
    total_out: u64,
}

impl Stream<Brotli> {
    /// Creates a Brotli stream.
    pub fn new(direction: Direction, options: &Options) -> Result<Self> {
        Self::with_codec(direction, options)
    }

    /// Shorthand for a compress-direction Brotli stream.
    pub fn compressor(options: &Options) -> Result<Self> {
        Self::new(Direction::Compress, options)
    }

    /// Shorthand for a decompress-direction Brotli stream.
    pub fn decompressor(options: &Options) -> Result<Self> {
        Self::new(Direction::Decompress, options)
    }
}

impl<K: BlockCodec> Stream<K> {
    /// Creates a stream over any block codec. No staging memory is allocated
    /// until the first call that needs it.
    pub fn with_codec(direction: Direction, options: &Options) -> Result<Self> {
        let context = match direction {
            Direction::Compress => Context::Compress(K::compressor(options)?),
            Direction::Decompress => Context::Decompress(K::decompressor(options)),
        };
        let block_size = options.base.block_size;
        Ok(Stream {
            options: *options,
            context,
            input_staging: InputStaging::new(block_size),
            output_staging: OutputStaging::new(K::max_block_size(block_size)),
            state: State::Active,
            total_in: 0,
            total_out: 0,
        })
    }

    pub fn direction(&self) -> Direction {
        match self.context {
            Context::Compress(_) => Direction::Compress,
            Context::Decompress(_) => Direction::Decompress,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Total input bytes accepted so far.
    pub fn total_in(&self) -> u64 {
        self.total_in
    }

    /// Total output bytes handed to the caller so far.
    pub fn total_out(&self) -> u64 {
        self.total_out
    }

    /// `true` once the final block has been emitted and drained.
    pub fn is_finished(&self) -> bool {
        self.state == State::Finished && !self.output_staging.is_pending()
    }

    /// `true` after a failure that made the stream unusable.
    pub fn is_poisoned(&self) -> bool {
        self.state == State::Poisoned
    }

    /// Bytes held in the input staging buffer.
    pub fn staged_input(&self) -> usize {
        self.input_staging.len()
    }

    /// Compressed bytes waiting in the output staging buffer.
    pub fn pending_output(&self) -> usize {
        self.output_staging.pending().len()
    }

    /// Consumes input from `input` and writes output into `output`, shrinking
    /// both cursors by the amounts consumed and produced.
    pub fn advance(
        &mut self,
        input: &mut &[u8],
        output: &mut &mut [u8],
        op: Operation,
    ) -> Result<Status> {
        if self.state == State::Poisoned {
            return Err(Error::Poisoned);
        }
        let avail_in = input.len();
        let avail_out = output.len();

        let result = match self.context {
            Context::Compress(_) => self.advance_compress(input, output, op),
            Context::Decompress(ref mut decompressor) => {
                match decompressor.decompress_stream(input, output) {
                    Err(CodecError::Unimplemented(what)) => Err(Error::Unimplemented(what)),
                    other => other.map_err(Error::from),
                }
            }
        };

        self.total_in += (avail_in - input.len()) as u64;
        self.total_out += (avail_out - output.len()) as u64;
        if let Err(ref e) = result {
            if matches!(e, Error::Codec(_) | Error::Starved { .. }) {
                self.state = State::Poisoned;
            }
        }
        result
    }

    /// The codec compressor of a compress-direction stream.
    pub fn block_compressor(&self) -> Option<&K::Compressor> {
        match self.context {
            Context::Compress(ref c) => Some(c),
            Context::Decompress(_) => None,
        }
    }
}

impl<K: BlockCodec> core::fmt::Debug for Stream<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Stream")
            .field("codec", &K::NAME)
            .field("direction", &self.direction())
            .field("state", &self.state)
            .field("staged_input", &self.input_staging.len())
            .field("pending_output", &self.output_staging.pending().len())
            .field("total_in", &self.total_in)
            .field("total_out", &self.total_out)
            .finish()
    }
}
