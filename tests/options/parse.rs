// Option parsing through the public API: key matching, validation and
// atomicity of rejected assignments.

use blockstream::config::{INPUT_BUFFER_SIZE, MAX_BLOCK_SIZE, MIN_BLOCK_SIZE};
use blockstream::{Error, Mode, Options, StatusCode};

#[test]
fn every_key_is_accepted_case_insensitively() {
    let o = Options::from_pairs([
        ("Block-Size", "4096"),
        ("MODE", "Font"),
        ("enable-TRANSFORMS", "FALSE"),
        ("quality", "7"),
        ("Window-Bits", "18"),
    ])
    .unwrap();
    assert_eq!(o.base.block_size, 4096);
    assert_eq!(o.brotli.mode, Mode::Font);
    assert!(!o.brotli.enable_transforms);
    assert_eq!(o.brotli.quality, 7);
    assert_eq!(o.brotli.window_bits, 18);
}

#[test]
fn block_size_bounds_are_inclusive() {
    let mut o = Options::new();
    o.parse_option("block-size", &MIN_BLOCK_SIZE.to_string()).unwrap();
    assert_eq!(o.base.block_size, MIN_BLOCK_SIZE);
    o.parse_option("block-size", &MAX_BLOCK_SIZE.to_string()).unwrap();
    assert_eq!(o.base.block_size, MAX_BLOCK_SIZE);

    for bad in ["15", "16777217", "-1", "", "4k"] {
        let err = o.parse_option("block-size", bad).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BadValue, "{:?}", bad);
    }
    assert_eq!(o.base.block_size, MAX_BLOCK_SIZE);
}

#[test]
fn quality_and_window_ranges() {
    let mut o = Options::new();
    o.parse_option("quality", "0").unwrap();
    assert_eq!(o.brotli.quality, 0);
    assert!(o.parse_option("quality", "12").is_err());
    o.parse_option("window-bits", "10").unwrap();
    o.parse_option("window-bits", "24").unwrap();
    assert!(o.parse_option("window-bits", "9").is_err());
    assert!(o.parse_option("window-bits", "25").is_err());
    assert_eq!(o.brotli.window_bits, 24);
    assert_eq!(o.brotli.quality, 0);
}

#[test]
fn bad_values_leave_options_unchanged() {
    let mut o = Options::new();
    let before = o;
    assert_eq!(
        o.parse_option("mode", "generic"),
        Err(Error::BadValue {
            key: "mode".into(),
            value: "generic".into()
        })
    );
    assert!(o.parse_option("enable-transforms", "yes").is_err());
    assert_eq!(o, before);
}

#[test]
fn unknown_key_is_bad_param() {
    let mut o = Options::new();
    let err = o.parse_option("level", "3").unwrap_err();
    assert_eq!(err, Error::BadParam("level".into()));
    assert_eq!(err.status_code(), StatusCode::BadParam);
}

#[test]
fn assignments_split_on_first_equals() {
    let mut o = Options::new();
    o.parse_assignment(" quality = 3 ").unwrap();
    assert_eq!(o.brotli.quality, 3);
    assert!(o.parse_assignment("quality").is_err());
    assert!(o.parse_assignment("mode=text=font").is_err());
}

#[test]
fn from_pairs_stops_at_first_error() {
    let err = Options::from_pairs([("quality", "5"), ("quality", "x"), ("nope", "1")]).unwrap_err();
    assert_eq!(err.status_code(), StatusCode::BadValue);
}

#[test]
fn builders_clamp() {
    assert_eq!(Options::new().with_block_size(1).base.block_size, MIN_BLOCK_SIZE);
    assert_eq!(Options::new().with_block_size(usize::MAX).base.block_size, MAX_BLOCK_SIZE);
    assert_eq!(Options::new().with_quality(99).brotli.quality, 11);
    assert_eq!(Options::new().base.block_size, INPUT_BUFFER_SIZE);
    assert_eq!(Options::new().with_mode(Mode::Font).brotli.mode, Mode::Font);
}
