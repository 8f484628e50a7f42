#![no_main]
use blockstream::{decompress_to_vec_with, Options, Stored};
use libfuzzer_sys::fuzz_target;

// Arbitrary bytes must decode or fail cleanly, never panic.
fuzz_target!(|data: &[u8]| {
    let _ = decompress_to_vec_with::<Stored>(data, &Options::new());
});
