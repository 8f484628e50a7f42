//! Compress-direction controller.
//!
//! Every call loops over three phases until it can go no further:
//!
//! 1. drain the output staging buffer into the caller's window;
//! 2. pick the next block, see [`next_step`];
//! 3. compress it, straight into the caller's window when the per-block bound
//!    fits there, otherwise into the output staging buffer.
//!
//! Block boundaries depend only on the bytes and on where `Flush` was
//! requested, never on how the caller sliced its input: every block is exactly
//! `block_size` bytes except the one that ends a flush or the stream. A full
//! input staging buffer is therefore submitted lazily, once more input shows
//! up or the caller flushes or finishes, so the last block always carries the
//! final flag.

use crate::codec::BlockCompressor;
use crate::codec::BlockCodec;
use crate::display::TRACE_LEVEL;
use crate::displaylevel;
use crate::status::{Error, Result, Status};

use super::{Context, Operation, State, Stream};

/// Origin of a block's bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Source {
    /// The whole input staging buffer.
    Staged,
    /// The first `n` bytes of the caller's input (zero-copy).
    Caller(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Step {
    Submit { source: Source, is_final: bool },
    /// Copy caller input into the staging buffer.
    Stage,
    Stop,
}

/// Chooses what to do next given the staging level, the caller's remaining
/// input and the requested operation.
pub(super) fn next_step(
    staged: usize,
    staging_full: bool,
    avail_in: usize,
    block_size: usize,
    op: Operation,
) -> Step {
    if staged > 0 {
        if avail_in > 0 {
            if staging_full {
                Step::Submit { source: Source::Staged, is_final: false }
            } else {
                Step::Stage
            }
        } else {
            match op {
                Operation::Process => Step::Stop,
                Operation::Flush => Step::Submit { source: Source::Staged, is_final: false },
                Operation::Finish => Step::Submit { source: Source::Staged, is_final: true },
            }
        }
    } else if avail_in > block_size {
        Step::Submit { source: Source::Caller(block_size), is_final: false }
    } else if avail_in == 0 {
        match op {
            Operation::Finish => Step::Submit { source: Source::Caller(0), is_final: true },
            Operation::Process | Operation::Flush => Step::Stop,
        }
    } else {
        match op {
            Operation::Process => Step::Stage,
            Operation::Flush => Step::Submit { source: Source::Caller(avail_in), is_final: false },
            Operation::Finish => Step::Submit { source: Source::Caller(avail_in), is_final: true },
        }
    }
}

impl<K: BlockCodec> Stream<K> {
    pub(super) fn advance_compress(
        &mut self,
        input: &mut &[u8],
        output: &mut &mut [u8],
        op: Operation,
    ) -> Result<Status> {
        if self.state == State::Finished && !input.is_empty() {
            return Err(Error::Finished(input.len()));
        }
        let block_size = self.options.base.block_size;
        let avail_in = input.len();
        let avail_out = output.len();

        loop {
            if self.output_staging.is_pending() {
                self.output_staging.drain(output);
                if self.output_staging.is_pending() {
                    break;
                }
            }
            if self.state == State::Finished || output.is_empty() {
                break;
            }

            let step = next_step(
                self.input_staging.len(),
                self.input_staging.is_full(),
                input.len(),
                block_size,
                op,
            );
            let done = match step {
                Step::Stop => break,
                Step::Stage => self.stage(input),
                Step::Submit { source, is_final } => self.submit(input, output, source, is_final),
            };
            if let Err(e) = done {
                let progressed = input.len() < avail_in || output.len() < avail_out;
                return match e {
                    // Nothing was lost; the caller may retry once memory is available.
                    Error::Memory(_) if progressed => Ok(Status::Processing),
                    e => Err(e),
                };
            }
        }

        self.status(input.len(), output.len(), op, avail_in, avail_out)
    }

    fn stage(&mut self, input: &mut &[u8]) -> Result<()> {
        self.input_staging.allocate()?;
        let n = self.input_staging.fill(input);
        *input = &input[n..];
        displaylevel!(
            TRACE_LEVEL,
            "stream: staged {} bytes ({}/{})\n",
            n,
            self.input_staging.len(),
            self.input_staging.capacity()
        );
        Ok(())
    }

    fn submit(
        &mut self,
        input: &mut &[u8],
        output: &mut &mut [u8],
        source: Source,
        is_final: bool,
    ) -> Result<()> {
        let Stream {
            context,
            input_staging,
            output_staging,
            state,
            ..
        } = self;
        let compressor = match context {
            Context::Compress(c) => c,
            Context::Decompress(_) => return Err(Error::Unimplemented("compression on a decompress stream")),
        };
        let src: &[u8] = match source {
            Source::Staged => input_staging.as_slice(),
            Source::Caller(n) => &input[..n],
        };
        let bound = compressor.max_block_size(src.len());

        let direct = bound <= output.len();
        let written = if direct {
            let window = std::mem::take(output);
            match compressor.compress_block(src, is_final, window) {
                Ok(n) => {
                    *output = &mut window[n..];
                    n
                }
                Err(e) => {
                    *output = window;
                    return Err(e.into());
                }
            }
        } else {
            output_staging.allocate()?;
            let n = compressor.compress_block(src, is_final, output_staging.dest())?;
            output_staging.set_filled(n);
            n
        };
        displaylevel!(
            TRACE_LEVEL,
            "stream: {} block of {} bytes from {} -> {} bytes into {}\n",
            if is_final { "final" } else { "non-final" },
            src.len(),
            if source == Source::Staged { "staging" } else { "caller" },
            written,
            if direct { "caller" } else { "staging" }
        );

        match source {
            Source::Staged => input_staging.clear(),
            Source::Caller(n) => *input = &input[n..],
        }
        if is_final {
            *state = State::Finished;
        }
        Ok(())
    }

    fn status(
        &self,
        remaining_in: usize,
        remaining_out: usize,
        op: Operation,
        avail_in: usize,
        avail_out: usize,
    ) -> Result<Status> {
        let work_left = self.output_staging.is_pending()
            || remaining_in > 0
            || match op {
                Operation::Process => false,
                Operation::Flush => !self.input_staging.is_empty(),
                Operation::Finish => self.state != State::Finished,
            };
        if !work_left {
            return Ok(Status::Ok);
        }
        if remaining_in < avail_in || remaining_out < avail_out {
            return Ok(Status::Processing);
        }
        if avail_out == 0 {
            return Ok(Status::BufferFull);
        }
        Err(Error::Starved {
            avail_in,
            avail_out,
        })
    }
}
