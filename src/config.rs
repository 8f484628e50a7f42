// config.rs: Compile-time configuration constants.
//
// Staging capacities and codec defaults. The relationship between the two
// staging buffers is fixed: the output buffer must hold the worst-case
// compressed size of one full input block, so the default input capacity is
// the largest block whose Brotli bound fits the output capacity.

pub const KB: usize = 1 << 10;
pub const MB: usize = 1 << 20;

// Fixed part of the Brotli per-block bound: stream header on the first block,
// byte-alignment padding after the flush and the ISLAST trailer on the last.
pub const MAX_BLOCK_OVERHEAD: usize = 4 * KB;

// Proportional part of the Brotli per-block bound, as a right shift of the
// block length. Incompressible input at the smallest window is emitted in
// window-sized metablocks of about three header bytes per KiB, so one byte per
// 256 covers every accepted quality and window size.
pub const BLOCK_GROWTH_SHIFT: u32 = 8;

// Capacity of the output staging buffer at the default block size.
pub const OUTPUT_BUFFER_SIZE: usize = 2 * MB;

// Default capacity of the input staging buffer, i.e. the default block size.
// Every block handed to the compressor is exactly this long except the last.
// Solves n + n / 256 + MAX_BLOCK_OVERHEAD <= OUTPUT_BUFFER_SIZE for a multiple of 256.
pub const INPUT_BUFFER_SIZE: usize =
    (OUTPUT_BUFFER_SIZE - MAX_BLOCK_OVERHEAD) / 257 * 256;

// Accepted range for the `block-size` option.
pub const MIN_BLOCK_SIZE: usize = 16;
pub const MAX_BLOCK_SIZE: usize = 16 * MB;

// Brotli encoder defaults (quality 11 and a 4 MiB window).
pub const BROTLI_DEFAULT_QUALITY: u32 = 11;
pub const BROTLI_MAX_QUALITY: u32 = 11;
pub const BROTLI_DEFAULT_WINDOW_BITS: u32 = 22;
pub const BROTLI_MIN_WINDOW_BITS: u32 = 10;
pub const BROTLI_MAX_WINDOW_BITS: u32 = 24;

// Internal buffer size of the Brotli writer/reader adapters.
pub const BROTLI_IO_BUFFER_SIZE: usize = 4 * KB;

// Default read chunk and output window used by the I/O pump and the CLI.
pub const DEFAULT_CHUNK_SIZE: usize = 64 * KB;
pub const DEFAULT_OUT_SIZE: usize = 64 * KB;
