//! Status codes and error types shared by every entry point.
//!
//! Flow control is not an error: [`Status`] carries `Ok`, `Processing` and
//! `BufferFull`, and is returned inside `Ok(..)`. Everything that ends a call
//! unsuccessfully is an [`Error`]. [`StatusCode`] flattens both into the single
//! code space callers of a C-style interface expect.

use core::fmt;

use thiserror::Error;

use crate::codec::CodecError;

// ─────────────────────────────────────────────────────────────────────────────
// Flow-control status
// ─────────────────────────────────────────────────────────────────────────────

/// Outcome of a successful [`advance`](crate::stream::Stream::advance) call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// The requested operation is complete for the data supplied so far.
    Ok,
    /// More work remains; call again (with more output room if it ran out).
    Processing,
    /// Nothing moved: the caller offered no output room while work is pending.
    BufferFull,
}

impl Status {
    #[inline]
    pub fn code(self) -> StatusCode {
        match self {
            Status::Ok => StatusCode::Ok,
            Status::Processing => StatusCode::Processing,
            Status::BufferFull => StatusCode::BufferFull,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Flat status code space
// ─────────────────────────────────────────────────────────────────────────────

/// Every status an entry point can report, flow control and errors alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    Ok = 0,
    Processing = 1,
    BufferFull = 2,
    Failed = -1,
    Memory = -2,
    BadParam = -3,
    BadValue = -4,
}

impl StatusCode {
    /// Stable upper-case name of the code.
    pub fn name(self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Processing => "PROCESSING",
            StatusCode::BufferFull => "BUFFER_FULL",
            StatusCode::Failed => "FAILED",
            StatusCode::Memory => "MEMORY",
            StatusCode::BadParam => "BAD_PARAM",
            StatusCode::BadValue => "BAD_VALUE",
        }
    }

    /// `true` for the three flow-control codes.
    #[inline]
    pub fn is_flow_control(self) -> bool {
        (self as i32) >= 0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors returned by stream, one-shot and option entry points.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Unrecognized option key.
    #[error("unknown option `{0}`")]
    BadParam(String),

    /// Recognized option key with an unparseable or out-of-range value.
    #[error("invalid value `{value}` for option `{key}`")]
    BadValue { key: String, value: String },

    /// A staging buffer could not be allocated.
    #[error("unable to allocate a {0} byte staging buffer")]
    Memory(usize),

    /// The block codec reported a failure; the stream is no longer usable.
    #[error("block codec failure: {0}")]
    Codec(#[from] CodecError),

    /// Input and output were available but the controller could not move any byte.
    #[error("stream made no progress with {avail_in} input bytes and {avail_out} bytes of output room")]
    Starved { avail_in: usize, avail_out: usize },

    /// Input supplied after the final block was already emitted.
    #[error("stream already finished; {0} bytes of input rejected")]
    Finished(usize),

    /// A previous call failed; the stream must be dropped.
    #[error("stream is unusable after an earlier failure")]
    Poisoned,

    /// One-shot destination smaller than the worst-case bound.
    #[error("output buffer too small: {needed} bytes needed, {available} available")]
    OutputTooSmall { needed: usize, available: usize },

    /// Operation declared but not provided by this adapter.
    #[error("{0} is not implemented")]
    Unimplemented(&'static str),
}

impl Error {
    /// Flat status code reported for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadParam(_) => StatusCode::BadParam,
            Error::BadValue { .. } => StatusCode::BadValue,
            Error::Memory(_) => StatusCode::Memory,
            Error::OutputTooSmall { .. } => StatusCode::BufferFull,
            Error::Codec(CodecError::DestinationTooSmall { .. }) => StatusCode::BufferFull,
            Error::Codec(_)
            | Error::Starved { .. }
            | Error::Finished(_)
            | Error::Poisoned
            | Error::Unimplemented(_) => StatusCode::Failed,
        }
    }

    pub(crate) fn bad_value(key: &str, value: &str) -> Self {
        Error::BadValue {
            key: key.to_owned(),
            value: value.to_owned(),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self {
        let kind = match e {
            Error::BadParam(_) | Error::BadValue { .. } => std::io::ErrorKind::InvalidInput,
            Error::Memory(_) => std::io::ErrorKind::OutOfMemory,
            Error::Codec(CodecError::Corrupt(_)) => std::io::ErrorKind::InvalidData,
            Error::Unimplemented(_) => std::io::ErrorKind::Unsupported,
            _ => std::io::ErrorKind::Other,
        };
        std::io::Error::new(kind, e)
    }
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
