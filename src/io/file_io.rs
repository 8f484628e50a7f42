//! Source and destination resolution for the `bstream` pipeline.
//!
//! - [`open_src_file`] resolves a path to a `Box<dyn Read>`, handling the
//!   `"stdin"` sentinel and rejecting directories.
//! - [`open_dst_file`] resolves a path to a [`DstFile`], handling the
//!   `"stdout"` and null-device sentinels and refusing to clobber an existing
//!   file unless overwriting was requested.

use std::fs::{File, OpenOptions};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;

use crate::displaylevel;

// ---------------------------------------------------------------------------
// Sentinel strings
// ---------------------------------------------------------------------------

/// Sentinel: read from standard input.
pub const STDIN_MARK: &str = "stdin";

/// Sentinel: write to standard output.
pub const STDOUT_MARK: &str = "stdout";

/// Sentinel: discard output.
#[cfg(windows)]
pub const NUL_MARK: &str = "nul";
#[cfg(not(windows))]
pub const NUL_MARK: &str = "/dev/null";

#[inline]
pub fn is_stdin(s: &str) -> bool {
    s == STDIN_MARK
}

#[inline]
pub fn is_stdout(s: &str) -> bool {
    s == STDOUT_MARK
}

#[inline]
fn is_dev_null(s: &str) -> bool {
    s == NUL_MARK
}

// ---------------------------------------------------------------------------
// Source file
// ---------------------------------------------------------------------------

/// Opens a source for reading.
pub fn open_src_file(path: &str) -> io::Result<Box<dyn Read>> {
    if is_stdin(path) {
        displaylevel!(4, "Using stdin for input\n");
        return Ok(Box::new(io::stdin()));
    }

    if Path::new(path).is_dir() {
        displaylevel!(1, "bstream: {} is a directory -- ignored\n", path);
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{}: is a directory", path),
        ));
    }

    let f = File::open(path).map_err(|e| {
        displaylevel!(1, "{}: {}\n", path, e);
        e
    })?;
    Ok(Box::new(BufReader::new(f)))
}

// ---------------------------------------------------------------------------
// Destination file
// ---------------------------------------------------------------------------

/// A write-capable destination produced by [`open_dst_file`].
pub struct DstFile {
    inner: Box<dyn Write>,
    pub is_stdout: bool,
}

impl Write for DstFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write(buf)
    }
    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Opens a destination for writing.
///
/// An existing regular file is only replaced when `overwrite` is set;
/// otherwise the call fails with [`io::ErrorKind::AlreadyExists`].
pub fn open_dst_file(path: &str, overwrite: bool) -> io::Result<DstFile> {
    if is_stdout(path) {
        displaylevel!(4, "Using stdout for output\n");
        return Ok(DstFile {
            inner: Box::new(io::stdout().lock()),
            is_stdout: true,
        });
    }

    if is_dev_null(path) {
        return Ok(DstFile {
            inner: Box::new(io::sink()),
            is_stdout: false,
        });
    }

    if !overwrite && Path::new(path).exists() {
        displaylevel!(1, "{} already exists; not overwritten\n", path);
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!("{}: already exists; not overwritten", path),
        ));
    }

    let f = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(path)
        .map_err(|e| {
            displaylevel!(1, "{}: {}\n", path, e);
            e
        })?;

    Ok(DstFile {
        inner: Box::new(BufWriter::new(f)),
        is_stdout: false,
    })
}
