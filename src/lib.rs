// blockstream: push-style streaming over block compressors

pub mod config;
pub mod display;
pub mod status;
pub mod options;
pub mod codec;
pub mod stream;
pub mod buffer;
pub mod io;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const VERSION_MAJOR: u32 = 0;
pub const VERSION_MINOR: u32 = 1;
pub const VERSION_RELEASE: u32 = 0;
pub const VERSION_NUMBER: u32 = VERSION_MAJOR * 100 * 100 + VERSION_MINOR * 100 + VERSION_RELEASE;
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

/// Returns the runtime version number.
pub fn version_number() -> u32 {
    VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    VERSION_STRING
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use buffer::{
    compress_buffer, compress_buffer_with, compress_to_vec, compress_to_vec_with,
    decompress_buffer, decompress_buffer_with, decompress_to_vec, decompress_to_vec_with,
    max_compressed_size, max_compressed_size_with,
};
pub use codec::{BlockCodec, BlockCompressor, BlockDecompressor, Brotli, CodecError, Stored};
pub use options::{BaseOptions, BrotliOptions, Mode, Options};
pub use status::{Error, Result, Status, StatusCode};
pub use stream::{Direction, Operation, Stream};
