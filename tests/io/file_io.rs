// Integration tests for io/file_io.rs: sentinels, source and destination opening.

use blockstream::io::file_io::{is_stdin, is_stdout};
use blockstream::io::{open_dst_file, open_src_file, NUL_MARK, STDIN_MARK, STDOUT_MARK};
use std::fs;
use std::io::{ErrorKind, Read, Write};

// ─────────────────────────────────────────────────────────────────────────────
// Sentinels
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn sentinel_values() {
    assert_eq!(STDIN_MARK, "stdin");
    assert_eq!(STDOUT_MARK, "stdout");
    assert!(is_stdin("stdin"));
    assert!(!is_stdin("stdout"));
    assert!(is_stdout("stdout"));
    assert!(!is_stdout("out.br"));
}

// ─────────────────────────────────────────────────────────────────────────────
// open_src_file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn src_missing_file_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing.txt");
    let err = open_src_file(path.to_str().unwrap()).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn src_directory_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let err = open_src_file(dir.path().to_str().unwrap()).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[test]
fn src_reads_file_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("in.txt");
    fs::write(&path, b"source bytes").unwrap();
    let mut r = open_src_file(path.to_str().unwrap()).unwrap();
    let mut got = Vec::new();
    r.read_to_end(&mut got).unwrap();
    assert_eq!(got, b"source bytes");
}

// ─────────────────────────────────────────────────────────────────────────────
// open_dst_file
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn dst_stdout_sentinel() {
    let d = open_dst_file(STDOUT_MARK, false).unwrap();
    assert!(d.is_stdout);
}

#[test]
fn dst_null_device_discards() {
    let mut d = open_dst_file(NUL_MARK, false).unwrap();
    assert!(!d.is_stdout);
    d.write_all(b"discarded").unwrap();
    d.flush().unwrap();
}

#[test]
fn dst_refuses_existing_file_without_overwrite() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.br");
    fs::write(&path, b"keep me").unwrap();
    let err = open_dst_file(path.to_str().unwrap(), false).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::AlreadyExists);
    assert_eq!(fs::read(&path).unwrap(), b"keep me");
}

#[test]
fn dst_overwrite_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out.br");
    fs::write(&path, b"a much longer previous content").unwrap();
    {
        let mut d = open_dst_file(path.to_str().unwrap(), true).unwrap();
        d.write_all(b"new").unwrap();
        d.flush().unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"new");
}

#[test]
fn dst_creates_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fresh.br");
    {
        let mut d = open_dst_file(path.to_str().unwrap(), false).unwrap();
        d.write_all(b"fresh").unwrap();
    }
    assert_eq!(fs::read(&path).unwrap(), b"fresh");
}
