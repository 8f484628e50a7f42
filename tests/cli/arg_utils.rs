// Integration tests for cli/arg_utils.rs: size parsing for --chunk-size / --out-size.

use blockstream::cli::arg_utils::{parse_size, read_size_from_str};

#[test]
fn leading_digits_and_remainder() {
    assert_eq!(read_size_from_str("0"), Some((0, "")));
    assert_eq!(read_size_from_str("17 bytes"), Some((17, " bytes")));
    assert_eq!(read_size_from_str("K"), None);
}

#[test]
fn suffix_forms_are_equivalent() {
    for s in ["8K", "8KB", "8KiB"] {
        assert_eq!(parse_size(s), Ok(8192), "{}", s);
    }
    for s in ["3M", "3MB", "3MiB"] {
        assert_eq!(parse_size(s), Ok(3 << 20), "{}", s);
    }
}

#[test]
fn trailing_garbage_is_rejected() {
    assert!(parse_size("8KX").is_err());
    assert!(parse_size("8 K").is_err());
    assert!(parse_size("").is_err());
}

#[test]
fn overflow_through_suffix_is_rejected() {
    let huge = format!("{}G", usize::MAX / 2);
    assert_eq!(read_size_from_str(&huge), None);
    assert!(parse_size(&huge).is_err());
}
