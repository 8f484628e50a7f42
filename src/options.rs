//! Stream and session configuration.
//!
//! [`Options`] is a generic [`BaseOptions`] (knobs the stream controller
//! itself reads) composed with the codec-specific [`BrotliOptions`]. Both
//! halves are plain values: they are validated eagerly when parsed and are
//! read-only once a stream or one-shot call has been started with them.
//!
//! Option keys are matched case-insensitively:
//!
//! | key | values | default |
//! |---|---|---|
//! | `block-size` | 16 ..= 16777216 | 2093056 |
//! | `mode` | `text`, `font` | `text` |
//! | `enable-transforms` | `true`, `false` | `false` |
//! | `quality` | 0 ..= 11 | 11 |
//! | `window-bits` | 10 ..= 24 | 22 |

use crate::config::{
    BROTLI_DEFAULT_QUALITY, BROTLI_DEFAULT_WINDOW_BITS, BROTLI_MAX_QUALITY,
    BROTLI_MAX_WINDOW_BITS, BROTLI_MIN_WINDOW_BITS, INPUT_BUFFER_SIZE, MAX_BLOCK_SIZE,
    MIN_BLOCK_SIZE,
};
use crate::status::{Error, Result};

// ─────────────────────────────────────────────────────────────────────────────
// Base (codec-independent) options
// ─────────────────────────────────────────────────────────────────────────────

/// Options understood by the stream controller regardless of codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BaseOptions {
    /// Input staging capacity; every block except the last has exactly this length.
    pub block_size: usize,
}

impl Default for BaseOptions {
    fn default() -> Self {
        BaseOptions {
            block_size: INPUT_BUFFER_SIZE,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Brotli extension
// ─────────────────────────────────────────────────────────────────────────────

/// Encoder profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// UTF-8 text.
    #[default]
    Text,
    /// WOFF 2.0 font data.
    Font,
}

/// Brotli-specific settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BrotliOptions {
    pub mode: Mode,
    /// Search the static dictionary and its word transforms. On by default,
    /// matching a stock Brotli encoder.
    pub enable_transforms: bool,
    pub quality: u32,
    /// Base-2 logarithm of the sliding window size.
    pub window_bits: u32,
}

impl Default for BrotliOptions {
    fn default() -> Self {
        BrotliOptions {
            mode: Mode::Text,
            enable_transforms: true,
            quality: BROTLI_DEFAULT_QUALITY,
            window_bits: BROTLI_DEFAULT_WINDOW_BITS,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Composed options
// ─────────────────────────────────────────────────────────────────────────────

/// Complete configuration for a stream or one-shot call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub base: BaseOptions,
    pub brotli: BrotliOptions,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a whole list of `(key, value)` pairs.
    ///
    /// Stops at the first invalid pair; nothing is partially applied to the
    /// returned value in that case because the error is returned instead.
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut options = Options::default();
        for (key, value) in pairs {
            options.parse_option(key.as_ref(), value.as_ref())?;
        }
        Ok(options)
    }

    /// Parses a single `KEY=VALUE` assignment.
    pub fn parse_assignment(&mut self, assignment: &str) -> Result<()> {
        match assignment.split_once('=') {
            Some((key, value)) => self.parse_option(key.trim(), value.trim()),
            None => Err(Error::bad_value(assignment.trim(), "")),
        }
    }

    /// Applies one option. Unknown keys yield [`Error::BadParam`], bad values
    /// for known keys yield [`Error::BadValue`]; `self` is unchanged on error.
    pub fn parse_option(&mut self, key: &str, value: &str) -> Result<()> {
        if key.eq_ignore_ascii_case("block-size") {
            self.base.block_size = parse_ranged(key, value, MIN_BLOCK_SIZE, MAX_BLOCK_SIZE)?;
        } else if key.eq_ignore_ascii_case("mode") {
            self.brotli.mode = if value.eq_ignore_ascii_case("text") {
                Mode::Text
            } else if value.eq_ignore_ascii_case("font") {
                Mode::Font
            } else {
                return Err(Error::bad_value(key, value));
            };
        } else if key.eq_ignore_ascii_case("enable-transforms") {
            self.brotli.enable_transforms = parse_bool(key, value)?;
        } else if key.eq_ignore_ascii_case("quality") {
            self.brotli.quality = parse_ranged(key, value, 0, BROTLI_MAX_QUALITY as usize)? as u32;
        } else if key.eq_ignore_ascii_case("window-bits") {
            self.brotli.window_bits = parse_ranged(
                key,
                value,
                BROTLI_MIN_WINDOW_BITS as usize,
                BROTLI_MAX_WINDOW_BITS as usize,
            )? as u32;
        } else {
            return Err(Error::BadParam(key.to_owned()));
        }
        Ok(())
    }

    /// Builder-style block size override; the value is clamped to the accepted range.
    pub fn with_block_size(mut self, block_size: usize) -> Self {
        self.base.block_size = block_size.clamp(MIN_BLOCK_SIZE, MAX_BLOCK_SIZE);
        self
    }

    /// Builder-style quality override; the value is clamped to 0 ..= 11.
    pub fn with_quality(mut self, quality: u32) -> Self {
        self.brotli.quality = quality.min(BROTLI_MAX_QUALITY);
        self
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.brotli.mode = mode;
        self
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::bad_value(key, value))
    }
}

fn parse_ranged(key: &str, value: &str, min: usize, max: usize) -> Result<usize> {
    match value.parse::<usize>() {
        Ok(v) if (min..=max).contains(&v) => Ok(v),
        _ => Err(Error::bad_value(key, value)),
    }
}
