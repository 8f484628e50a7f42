//! Reader → writer pumps.
//!
//! [`compress_reader`] is the reference polling loop for [`Stream::advance`]:
//! it reads fixed-size chunks, passes `Finish` with the chunk that hits EOF and
//! `Process` otherwise, and keeps calling `advance` on a chunk, writing out
//! whatever was produced, until the call reports `Ok`.
//!
//! Decompression has no streaming path; [`decompress_reader`] reads the whole
//! input and decodes it in one shot.

use std::io::{self, Read, Write};

use crate::codec::{BlockCodec, BlockDecompressor};
use crate::config::{DEFAULT_CHUNK_SIZE, DEFAULT_OUT_SIZE};
use crate::displaylevel;
use crate::options::Options;
use crate::status::Status;
use crate::stream::{Direction, Operation, Stream};

/// Buffer sizes used by the pumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PumpConfig {
    /// Bytes read from the source per `advance` chunk.
    pub chunk_size: usize,
    /// Output window offered to each `advance` call.
    pub out_size: usize,
}

impl Default for PumpConfig {
    fn default() -> Self {
        PumpConfig {
            chunk_size: DEFAULT_CHUNK_SIZE,
            out_size: DEFAULT_OUT_SIZE,
        }
    }
}

/// What a pump moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpStats {
    pub bytes_in: u64,
    pub bytes_out: u64,
    /// Number of `advance` calls made.
    pub calls: u64,
}

impl PumpStats {
    /// Output size as a percentage of input size.
    pub fn ratio_percent(&self) -> f64 {
        if self.bytes_in == 0 {
            return 100.0;
        }
        self.bytes_out as f64 / self.bytes_in as f64 * 100.0
    }
}

// ---------------------------------------------------------------------------
// read_to_capacity: fill `buf` from `reader`, stopping early only at EOF
// ---------------------------------------------------------------------------

pub fn read_to_capacity<R: Read + ?Sized>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut total = 0;
    while total < buf.len() {
        match reader.read(&mut buf[total..]) {
            Ok(0) => break, // EOF
            Ok(n) => total += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}

/// Compresses everything `reader` yields into `writer` with codec `K`.
pub fn compress_reader<K, R, W>(
    reader: &mut R,
    writer: &mut W,
    options: &Options,
    config: &PumpConfig,
) -> io::Result<PumpStats>
where
    K: BlockCodec,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let chunk_size = config.chunk_size.max(1);
    let out_size = config.out_size.max(1);
    let mut stream = Stream::<K>::with_codec(Direction::Compress, options)?;
    let mut in_buf = vec![0u8; chunk_size];
    let mut out_buf = vec![0u8; out_size];
    let mut calls = 0u64;

    loop {
        let n = read_to_capacity(reader, &mut in_buf)?;
        let op = if n < chunk_size {
            Operation::Finish
        } else {
            Operation::Process
        };
        let mut input: &[u8] = &in_buf[..n];
        loop {
            let mut output: &mut [u8] = &mut out_buf;
            let status = stream.advance(&mut input, &mut output, op)?;
            let produced = out_size - output.len();
            writer.write_all(&out_buf[..produced])?;
            calls += 1;
            match status {
                Status::Ok => break,
                Status::Processing => {}
                Status::BufferFull => {
                    return Err(io::Error::new(
                        io::ErrorKind::Other,
                        "stream reported a full buffer with output room available",
                    ))
                }
            }
        }
        displaylevel!(
            3,
            "\rRead : {} MiB   ==> {:.2}%   ",
            stream.total_in() >> 20,
            stream.total_out() as f64 / stream.total_in().max(1) as f64 * 100.0
        );
        if op == Operation::Finish {
            break;
        }
    }
    writer.flush()?;

    Ok(PumpStats {
        bytes_in: stream.total_in(),
        bytes_out: stream.total_out(),
        calls,
    })
}

/// Decompresses the complete stream `reader` yields into `writer` with codec `K`.
pub fn decompress_reader<K, R, W>(
    reader: &mut R,
    writer: &mut W,
    options: &Options,
) -> io::Result<PumpStats>
where
    K: BlockCodec,
    R: Read + ?Sized,
    W: Write + ?Sized,
{
    let mut compressed = Vec::new();
    reader.read_to_end(&mut compressed)?;
    let decoded = K::decompressor(options)
        .decompress_to_vec(&compressed)
        .map_err(crate::status::Error::from)?;
    writer.write_all(&decoded)?;
    writer.flush()?;
    Ok(PumpStats {
        bytes_in: compressed.len() as u64,
        bytes_out: decoded.len() as u64,
        calls: 1,
    })
}
