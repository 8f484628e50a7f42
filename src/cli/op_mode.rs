//! Operation mode selection, output naming and startup defaults for the CLI.
//!
//! This module provides:
//! - [`OpMode`]: compress or decompress, possibly inferred from the input name.
//! - [`determine_op_mode`]: infers the mode from a filename's extension.
//! - [`output_filename`]: derives the destination name from the input name.
//! - [`init_quality`]: reads the default Brotli quality from the environment.

use crate::cli::arg_utils::read_size_from_str;
use crate::cli::constants::ENV_QUALITY;
use crate::config::{BROTLI_DEFAULT_QUALITY, BROTLI_MAX_QUALITY};
use crate::displaylevel;
use crate::io::{STDIN_MARK, STDOUT_MARK};

/// What the CLI should do with its input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpMode {
    /// Decompress if the input carries the codec extension, compress otherwise.
    Auto,
    Compress,
    Decompress,
}

/// Infer the operation mode from `filename`'s extension.
pub fn determine_op_mode(filename: &str, extension: &str) -> OpMode {
    if filename.ends_with(extension) {
        OpMode::Decompress
    } else {
        OpMode::Compress
    }
}

/// Derives the output name for `input` when none was given.
///
/// Compression appends `extension`; decompression strips it and fails when
/// the input does not carry it. Reading stdin always writes stdout.
pub fn output_filename(input: &str, mode: OpMode, extension: &str) -> Result<String, String> {
    if input == STDIN_MARK {
        return Ok(STDOUT_MARK.to_owned());
    }
    match mode {
        OpMode::Decompress => match input.strip_suffix(extension) {
            Some(stem) if !stem.is_empty() => Ok(stem.to_owned()),
            _ => Err(format!(
                "cannot determine an output filename: {} does not end with {}",
                input, extension
            )),
        },
        OpMode::Compress | OpMode::Auto => Ok(format!("{}{}", input, extension)),
    }
}

/// Read the default Brotli quality from the `BSTREAM_QUALITY` environment variable.
pub fn init_quality() -> u32 {
    init_quality_from(std::env::var(ENV_QUALITY).ok().as_deref())
}

/// Testable core of [`init_quality`]: parse an optional `BSTREAM_QUALITY` value.
pub fn init_quality_from(env_val: Option<&str>) -> u32 {
    if let Some(env) = env_val {
        match read_size_from_str(env) {
            Some((val, "")) if val <= BROTLI_MAX_QUALITY as usize => return val as u32,
            _ => {
                displaylevel!(
                    2,
                    "Ignore environment variable setting {}={}: not a valid quality \n",
                    ENV_QUALITY,
                    env
                );
            }
        }
    }
    BROTLI_DEFAULT_QUALITY
}
