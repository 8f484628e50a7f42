//! Public API surface for file and stream I/O.
//!
//! This module assembles the I/O sub-modules and re-exports the symbols
//! consumed by the CLI and library users.

pub mod file_io;
pub mod pump;

// ── Special I/O sentinels ────────────────────────────────────────────────────
pub use file_io::{NUL_MARK, STDIN_MARK, STDOUT_MARK};

pub use file_io::{open_dst_file, open_src_file, DstFile};

// ── Pumps ────────────────────────────────────────────────────────────────────
pub use pump::{compress_reader, decompress_reader, read_to_capacity, PumpConfig, PumpStats};
