//! Notification level and the stderr display macro.
//!
//! A single crate-wide atomic controls how chatty both the library and the
//! `bstream` binary are:
//!
//! | level | meaning |
//! |---|---|
//! | 0 | silent |
//! | 1 | errors only |
//! | 2 | results and warnings (CLI default) |
//! | 3 | progress |
//! | 4 | verbose |
//! | 5 | trace: per-block decisions inside the stream controller |
//!
//! The stream controller and the pumps only write at level 3 and above; the
//! file helpers report open failures at level 1.

use std::sync::atomic::{AtomicU32, Ordering};

/// Level at which per-block controller decisions are traced.
pub const TRACE_LEVEL: u32 = 5;

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current notification level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the notification level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Returns `true` when trace output is enabled.
#[inline]
pub fn trace_enabled() -> bool {
    display_level() >= TRACE_LEVEL
}

/// Print to stderr when the notification level is at least `$level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::display::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
