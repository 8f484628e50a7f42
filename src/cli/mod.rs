//! Command-line interface for the `bstream` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings, extensions, environment variable names, exit codes. |
//! | [`arg_utils`] | Size parsing with `K`/`M`/`G` suffixes for the clap value parsers. |
//! | [`op_mode`]   | `OpMode`, mode inference from extensions, output naming, environment defaults. |
//! | [`args`]      | clap `Args` and their resolution into `Settings`. |
//!
//! Typical call sequence: `Args::parse` → `Args::resolve` → dispatch to the I/O layer.

pub mod constants;
pub mod arg_utils;
pub mod op_mode;
pub mod args;
