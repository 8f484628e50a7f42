// cli/constants.rs: program identity strings and environment variable names.

// ── String / identity constants ───────────────────────────────────────────────
pub const COMPRESSOR_NAME: &str = "bstream";
pub const BROTLI_EXTENSION: &str = ".br";
pub const STORED_EXTENSION: &str = ".sto";

// ── Environment overrides ─────────────────────────────────────────────────────
/// Default Brotli quality when `-o quality=N` is not given.
pub const ENV_QUALITY: &str = "BSTREAM_QUALITY";

// ── Exit codes ────────────────────────────────────────────────────────────────
pub const EXIT_OK: i32 = 0;
pub const EXIT_ERROR: i32 = 1;
