//! Binary entry point for the `bstream` command-line tool.
//!
//! # Control flow
//!
//! 1. [`Args::parse`] processes all flags; `-v`/`-q` set the notification level.
//! 2. [`Args::resolve`] fixes the mode, codec options and file names.
//! 3. [`run`] opens source and destination and dispatches to the I/O pumps.
//!
//! Any failure is reported on stderr and the process exits with status 1.

use anyhow::Context;
use clap::Parser;

use blockstream::cli::args::{Args, CodecChoice, Settings};
use blockstream::cli::constants::{COMPRESSOR_NAME, EXIT_ERROR, EXIT_OK};
use blockstream::cli::op_mode::OpMode;
use blockstream::codec::{Brotli, Stored};
use blockstream::display::set_display_level;
use blockstream::io::{
    compress_reader, decompress_reader, open_dst_file, open_src_file, PumpStats,
};

/// Execute the operation selected by argument resolution.
fn run(settings: &Settings) -> anyhow::Result<PumpStats> {
    blockstream::displaylevel!(
        3,
        "*** {} v{} {}-bit, {} codec ***\n",
        COMPRESSOR_NAME,
        blockstream::VERSION_STRING,
        std::mem::size_of::<*const ()>() * 8,
        match settings.codec {
            CodecChoice::Brotli => "brotli",
            CodecChoice::Stored => "stored",
        }
    );

    let mut src = open_src_file(&settings.input)
        .with_context(|| format!("cannot open {}", settings.input))?;
    let mut dst = open_dst_file(&settings.output, settings.overwrite)
        .with_context(|| format!("cannot create {}", settings.output))?;

    let stats = match (settings.mode, settings.codec) {
        (OpMode::Decompress, CodecChoice::Brotli) => {
            decompress_reader::<Brotli, _, _>(&mut src, &mut dst, &settings.options)
        }
        (OpMode::Decompress, CodecChoice::Stored) => {
            decompress_reader::<Stored, _, _>(&mut src, &mut dst, &settings.options)
        }
        (_, CodecChoice::Brotli) => {
            compress_reader::<Brotli, _, _>(&mut src, &mut dst, &settings.options, &settings.pump)
        }
        (_, CodecChoice::Stored) => {
            compress_reader::<Stored, _, _>(&mut src, &mut dst, &settings.options, &settings.pump)
        }
    }
    .with_context(|| format!("{}: processing failed", settings.input))?;

    if settings.mode == OpMode::Decompress {
        blockstream::displaylevel!(
            2,
            "\r{:<30}: decoded {} bytes \n",
            settings.input,
            stats.bytes_out
        );
    } else {
        blockstream::displaylevel!(
            2,
            "\rCompressed {} bytes into {} bytes ==> {:.2}% \n",
            stats.bytes_in,
            stats.bytes_out,
            stats.ratio_percent()
        );
    }
    Ok(stats)
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    let args = Args::parse();
    set_display_level(args.display_level());

    let exit_code = match args.resolve().and_then(|settings| run(&settings)) {
        Ok(_) => EXIT_OK,
        Err(e) => {
            blockstream::displaylevel!(1, "{}: {:#}\n", COMPRESSOR_NAME, e);
            EXIT_ERROR
        }
    };
    std::process::exit(exit_code);
}
