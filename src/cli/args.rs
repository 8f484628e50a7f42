//! Command-line arguments for `bstream` and their resolution into runtime settings.
//!
//! [`Args`] is the raw clap model. [`Args::resolve`] turns it into
//! [`Settings`]: the operation mode is fixed, the codec options are parsed
//! (environment default first, then every `-o KEY=VALUE` in order), and the
//! input and output names are settled, sentinels included.

use anyhow::{bail, Context};
use clap::{ArgAction, Parser, ValueEnum};

use crate::cli::arg_utils::parse_size;
use crate::cli::constants::{BROTLI_EXTENSION, STORED_EXTENSION};
use crate::cli::op_mode::{determine_op_mode, init_quality, output_filename, OpMode};
use crate::config::{DEFAULT_CHUNK_SIZE, DEFAULT_OUT_SIZE};
use crate::io::{PumpConfig, STDIN_MARK, STDOUT_MARK};
use crate::options::Options;

/// Block codec selectable on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CodecChoice {
    Brotli,
    Stored,
}

impl CodecChoice {
    /// File extension written on compression and stripped on decompression.
    pub fn extension(self) -> &'static str {
        match self {
            CodecChoice::Brotli => BROTLI_EXTENSION,
            CodecChoice::Stored => STORED_EXTENSION,
        }
    }
}

/// Block-streaming compressor.
#[derive(Parser, Debug, Clone)]
#[command(name = "bstream")]
#[command(version)]
#[command(about = "Compress or decompress through a block-streaming Brotli adapter", long_about = None)]
pub struct Args {
    /// Force compression
    #[arg(short = 'z', long, conflicts_with = "decompress")]
    pub compress: bool,

    /// Decompress
    #[arg(short = 'd', long)]
    pub decompress: bool,

    /// Write to standard output
    #[arg(short = 'c', long = "stdout")]
    pub to_stdout: bool,

    /// Overwrite an existing output file
    #[arg(short = 'f', long)]
    pub force: bool,

    /// Codec option, repeatable (block-size, mode, enable-transforms, quality, window-bits)
    #[arg(short = 'o', long = "option", value_name = "KEY=VALUE")]
    pub options: Vec<String>,

    /// Block codec
    #[arg(long, value_enum, default_value_t = CodecChoice::Brotli)]
    pub codec: CodecChoice,

    /// Bytes read from the input per stream call (K/M/G suffixes accepted)
    #[arg(long, value_parser = parse_size, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Output window offered to each stream call (K/M/G suffixes accepted)
    #[arg(long, value_parser = parse_size, default_value_t = DEFAULT_OUT_SIZE)]
    pub out_size: usize,

    /// Increase verbosity (repeatable)
    #[arg(short = 'v', long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short = 'q', long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Input file, or `stdin`
    pub input: Option<String>,

    /// Output file, or `stdout`
    pub output: Option<String>,
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Never [`OpMode::Auto`].
    pub mode: OpMode,
    pub codec: CodecChoice,
    pub options: Options,
    pub pump: PumpConfig,
    pub input: String,
    pub output: String,
    pub overwrite: bool,
    pub display_level: u32,
}

impl Args {
    /// Notification level implied by `-v` / `-q`, starting from the default of 2.
    pub fn display_level(&self) -> u32 {
        (2 + self.verbose as u32).saturating_sub(self.quiet as u32)
    }

    pub fn resolve(self) -> anyhow::Result<Settings> {
        self.resolve_with_quality(init_quality())
    }

    /// [`resolve`](Self::resolve) with an explicit default quality instead of
    /// the environment lookup.
    pub fn resolve_with_quality(self, default_quality: u32) -> anyhow::Result<Settings> {
        let display_level = self.display_level();
        let mut options = Options::new().with_quality(default_quality);
        for assignment in &self.options {
            options
                .parse_assignment(assignment)
                .with_context(|| format!("invalid option `-o {}`", assignment))?;
        }

        let extension = self.codec.extension();
        let input = self.input.unwrap_or_else(|| STDIN_MARK.to_owned());
        let mode = if self.decompress {
            OpMode::Decompress
        } else if self.compress || input == STDIN_MARK {
            OpMode::Compress
        } else {
            determine_op_mode(&input, extension)
        };

        let output = match (self.to_stdout, self.output) {
            (true, Some(o)) if o != STDOUT_MARK => {
                bail!("output file `{}` conflicts with --stdout", o)
            }
            (true, _) => STDOUT_MARK.to_owned(),
            (false, Some(o)) => o,
            (false, None) => output_filename(&input, mode, extension).map_err(anyhow::Error::msg)?,
        };
        if input != STDIN_MARK && input == output {
            bail!("input and output are the same file: {}", input);
        }

        Ok(Settings {
            mode,
            codec: self.codec,
            options,
            pump: PumpConfig {
                chunk_size: self.chunk_size,
                out_size: self.out_size,
            },
            input,
            output,
            overwrite: self.force,
            display_level,
        })
    }
}
