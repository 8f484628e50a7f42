// arg_utils.rs: size parsing shared by the clap value parsers.

/// Parses an unsigned size from the start of `s`, optionally followed by a
/// size suffix. Returns `None` if no leading digits are present or the value
/// overflows, or `Some((value, remainder))` where `remainder` is the part of
/// `s` that was not consumed.
///
/// Recognised suffixes (case-sensitive):
///   `K` / `KB` / `KiB`  → multiply by 1 024
///   `M` / `MB` / `MiB`  → multiply by 1 048 576
///   `G` / `GB` / `GiB`  → multiply by 1 073 741 824
pub fn read_size_from_str(s: &str) -> Option<(usize, &str)> {
    let bytes = s.as_bytes();
    let mut i = 0usize;

    // Require at least one digit.
    if bytes.first().map_or(true, |b| !b.is_ascii_digit()) {
        return None;
    }

    let mut result: usize = 0;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        result = result
            .checked_mul(10)?
            .checked_add((bytes[i] - b'0') as usize)?;
        i += 1;
    }

    let shift = match bytes.get(i) {
        Some(b'K') => 10,
        Some(b'M') => 20,
        Some(b'G') => 30,
        _ => 0,
    };
    if shift > 0 {
        result = result.checked_mul(1usize << shift)?;
        i += 1;
        if bytes.get(i) == Some(&b'i') {
            i += 1;
        }
        if bytes.get(i) == Some(&b'B') {
            i += 1;
        }
    }

    Some((result, &s[i..]))
}

/// clap value parser for `--chunk-size` / `--out-size`: a positive size with
/// an optional suffix and nothing after it.
pub fn parse_size(s: &str) -> Result<usize, String> {
    match read_size_from_str(s) {
        Some((0, _)) => Err(format!("`{}` must be at least 1", s)),
        Some((v, "")) => Ok(v),
        Some((_, rest)) => Err(format!("unexpected `{}` after size", rest)),
        None => Err(format!("`{}` is not a size", s)),
    }
}
