// Integration tests for cli/args.rs: clap parsing and resolution into Settings.

use blockstream::cli::args::{Args, CodecChoice};
use blockstream::cli::op_mode::OpMode;
use blockstream::io::{PumpConfig, STDOUT_MARK};
use blockstream::{Mode, Options};
use clap::Parser;

fn parse(argv: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("bstream").chain(argv.iter().copied())).unwrap()
}

#[test]
fn codec_extensions() {
    assert_eq!(CodecChoice::Brotli.extension(), ".br");
    assert_eq!(CodecChoice::Stored.extension(), ".sto");
}

#[test]
fn environment_quality_is_overridden_by_option() {
    let s = parse(&["in.txt"]).resolve_with_quality(4).unwrap();
    assert_eq!(s.options.brotli.quality, 4);
    let s = parse(&["-o", "quality=9", "in.txt"]).resolve_with_quality(4).unwrap();
    assert_eq!(s.options.brotli.quality, 9);
}

#[test]
fn all_option_keys_reach_settings() {
    let s = parse(&[
        "--option",
        "block-size=65536",
        "-o",
        "mode=font",
        "-o",
        "enable-transforms=false",
        "-o",
        "window-bits=16",
        "in.txt",
    ])
    .resolve_with_quality(11)
    .unwrap();
    let mut expected = Options::new()
        .with_block_size(65536)
        .with_mode(Mode::Font);
    expected.brotli.enable_transforms = false;
    expected.brotli.window_bits = 16;
    assert_eq!(s.options, expected);
}

#[test]
fn explicit_output_and_force() {
    let s = parse(&["-f", "in.txt", "out.bin"]).resolve_with_quality(11).unwrap();
    assert_eq!(s.output, "out.bin");
    assert!(s.overwrite);
    assert_eq!(s.mode, OpMode::Compress);
}

#[test]
fn stdout_flag() {
    let s = parse(&["-c", "in.txt"]).resolve_with_quality(11).unwrap();
    assert_eq!(s.output, STDOUT_MARK);
    let s = parse(&["-c", "in.txt", "stdout"]).resolve_with_quality(11).unwrap();
    assert_eq!(s.output, STDOUT_MARK);
}

#[test]
fn stored_extension_drives_auto_mode() {
    let s = parse(&["--codec", "stored", "data.sto"]).resolve_with_quality(11).unwrap();
    assert_eq!(s.mode, OpMode::Decompress);
    assert_eq!(s.output, "data");
    let s = parse(&["data.sto"]).resolve_with_quality(11).unwrap();
    assert_eq!(s.mode, OpMode::Compress);
    assert_eq!(s.output, "data.sto.br");
}

#[test]
fn same_input_and_output_is_rejected() {
    let err = parse(&["a.txt", "a.txt"]).resolve_with_quality(11).unwrap_err();
    assert!(err.to_string().contains("same file"));
}

#[test]
fn pump_sizes_default_and_override() {
    assert_eq!(parse(&["x"]).resolve_with_quality(11).unwrap().pump, PumpConfig::default());
    let s = parse(&["--chunk-size", "1", "--out-size", "1M", "x"])
        .resolve_with_quality(11)
        .unwrap();
    assert_eq!(s.pump, PumpConfig { chunk_size: 1, out_size: 1 << 20 });
}

#[test]
fn unknown_codec_is_a_parse_error() {
    assert!(Args::try_parse_from(["bstream", "--codec", "zstd", "x"]).is_err());
}
