// Integration tests for cli/op_mode.rs: mode inference, output naming and
// the environment quality default.

use blockstream::cli::constants::ENV_QUALITY;
use blockstream::cli::op_mode::{determine_op_mode, init_quality_from, output_filename, OpMode};
use blockstream::config::BROTLI_DEFAULT_QUALITY;
use blockstream::io::{STDIN_MARK, STDOUT_MARK};

#[test]
fn extension_must_be_a_suffix() {
    assert_eq!(determine_op_mode("archive.br", ".br"), OpMode::Decompress);
    assert_eq!(determine_op_mode("archive.br.txt", ".br"), OpMode::Compress);
    assert_eq!(determine_op_mode("archive.sto", ".sto"), OpMode::Decompress);
}

#[test]
fn auto_mode_names_like_compression() {
    assert_eq!(output_filename("x", OpMode::Auto, ".br").unwrap(), "x.br");
}

#[test]
fn decompress_name_error_mentions_extension() {
    let err = output_filename("notes.txt", OpMode::Decompress, ".sto").unwrap_err();
    assert!(err.contains(".sto"));
    assert!(err.contains("notes.txt"));
}

#[test]
fn stdin_always_writes_stdout() {
    for mode in [OpMode::Auto, OpMode::Compress, OpMode::Decompress] {
        assert_eq!(output_filename(STDIN_MARK, mode, ".br").unwrap(), STDOUT_MARK);
    }
}

#[test]
fn quality_env_values() {
    assert_eq!(ENV_QUALITY, "BSTREAM_QUALITY");
    assert_eq!(init_quality_from(Some("0")), 0);
    assert_eq!(init_quality_from(Some("11")), 11);
    assert_eq!(init_quality_from(Some("5K")), BROTLI_DEFAULT_QUALITY);
    assert_eq!(init_quality_from(Some("")), BROTLI_DEFAULT_QUALITY);
}
