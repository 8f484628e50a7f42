// e2e/cli_integration.rs: CLI integration tests (Suite 03)
//
// Tests the `bstream` binary as a black-box CLI tool using std::process::Command.
// Covers compress/decompress dispatch, overwrite protection, option errors,
// stdin/stdout piping and the stored codec.

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use tempfile::TempDir;

/// Locate the `bstream` binary produced by Cargo.
fn bstream_bin() -> PathBuf {
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_bstream") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop();
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("bstream");
    p
}

/// Create a TempDir containing a text file with ~40 KB of content.
fn make_temp_input() -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let input_path = dir.path().join("input.txt");
    let content = "Hello, block stream!\n".repeat(2000);
    fs::write(&input_path, content).unwrap();
    (dir, input_path)
}

fn brotli_decode(compressed: &[u8]) -> Vec<u8> {
    let mut out = Vec::new();
    brotli::Decompressor::new(compressed, 4096)
        .read_to_end(&mut out)
        .unwrap();
    out
}

// ── 1. Compress / decompress roundtrip with derived names ────────────────────

#[test]
fn test_cli_compress_decompress_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let status = Command::new(bstream_bin())
        .args(["-q", "-o", "quality=5", input.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .expect("failed to run bstream compress");
    assert!(status.success(), "compress step should exit 0");
    let compressed = dir.path().join("input.txt.br");
    assert!(compressed.exists(), "compressed file should exist");
    assert_eq!(brotli_decode(&fs::read(&compressed).unwrap()), original);

    fs::remove_file(&input).unwrap();
    let status = Command::new(bstream_bin())
        .args(["-q", compressed.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .expect("failed to run bstream decompress");
    assert!(status.success(), "decompress step should exit 0");
    assert_eq!(fs::read(&input).unwrap(), original);
}

// ── 2. Refuse to overwrite without -f ────────────────────────────────────────

#[test]
fn test_cli_refuses_overwrite_without_force() {
    let (dir, input) = make_temp_input();
    let out = dir.path().join("existing.br");
    fs::write(&out, b"precious").unwrap();

    let output = Command::new(bstream_bin())
        .args([input.to_str().unwrap(), out.to_str().unwrap()])
        .output()
        .expect("failed to run bstream");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(fs::read(&out).unwrap(), b"precious");

    let status = Command::new(bstream_bin())
        .args(["-q", "-f", input.to_str().unwrap(), out.to_str().unwrap()])
        .status()
        .expect("failed to run bstream -f");
    assert!(status.success());
    assert_eq!(brotli_decode(&fs::read(&out).unwrap()), fs::read(&input).unwrap());
}

// ── 3. Invalid -o option exits 1 ─────────────────────────────────────────────

#[test]
fn test_cli_bad_option_exits_1() {
    let (dir, input) = make_temp_input();
    let output = Command::new(bstream_bin())
        .args(["-o", "quality=42", input.to_str().unwrap()])
        .current_dir(dir.path())
        .output()
        .expect("failed to run bstream");
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("quality"), "stderr: {stderr}");
    assert!(!dir.path().join("input.txt.br").exists());
}

// ── 4. stdin → stdout ────────────────────────────────────────────────────────

#[test]
fn test_cli_stdin_to_stdout() {
    let data = b"piped through standard streams\n".repeat(500);
    let mut child = Command::new(bstream_bin())
        .args(["-q", "--out-size", "100", "--chunk-size", "1K"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("failed to spawn bstream");
    {
        let mut stdin = child.stdin.take().unwrap();
        stdin.write_all(&data).unwrap();
    }
    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert_eq!(brotli_decode(&output.stdout), data);
}

// ── 5. Stored codec ──────────────────────────────────────────────────────────

#[test]
fn test_cli_stored_codec_roundtrip() {
    let (dir, input) = make_temp_input();
    let original = fs::read(&input).unwrap();

    let status = Command::new(bstream_bin())
        .args(["-q", "--codec", "stored", "-o", "block-size=1000", input.to_str().unwrap()])
        .current_dir(dir.path())
        .status()
        .unwrap();
    assert!(status.success());
    let packed = dir.path().join("input.txt.sto");
    let bytes = fs::read(&packed).unwrap();
    let blocks = original.len().div_ceil(1000);
    assert_eq!(bytes.len(), original.len() + 4 * blocks);

    let restored = dir.path().join("restored.txt");
    let status = Command::new(bstream_bin())
        .args([
            "-q",
            "-d",
            "--codec",
            "stored",
            packed.to_str().unwrap(),
            restored.to_str().unwrap(),
        ])
        .status()
        .unwrap();
    assert!(status.success());
    assert_eq!(fs::read(&restored).unwrap(), original);
}

// ── 6. --version ─────────────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let output = Command::new(bstream_bin())
        .arg("--version")
        .output()
        .expect("failed to run bstream --version");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(blockstream::VERSION_STRING), "got: {stdout}");
}

// ── 7. Decompressing garbage fails ───────────────────────────────────────────

#[test]
fn test_cli_corrupt_input_exits_1() {
    let dir = TempDir::new().unwrap();
    let bad = dir.path().join("bad.sto");
    fs::write(&bad, [0x40, 0, 0, 0x80, 1, 2, 3]).unwrap();
    let output = Command::new(bstream_bin())
        .args(["-d", "--codec", "stored", bad.to_str().unwrap()])
        .current_dir(dir.path())
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1));
}
