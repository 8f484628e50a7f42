#![no_main]
use blockstream::{compress_to_vec, decompress_to_vec, Operation, Options, Status, Stream};
use libfuzzer_sys::fuzz_target;

// The first two bytes pick the input slice size and the output window size;
// the rest is the payload.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }
    let in_step = data[0] as usize + 1;
    let out_size = data[1] as usize + 1;
    let payload = &data[2..];
    let options = Options::new().with_quality(1).with_block_size(1024);

    let mut s = Stream::compressor(&options).unwrap();
    let mut window = vec![0u8; out_size];
    let mut compressed = Vec::new();
    let mut rest = payload;
    loop {
        let take = in_step.min(rest.len());
        let (mut input, tail) = rest.split_at(take);
        rest = tail;
        let op = if rest.is_empty() { Operation::Finish } else { Operation::Process };
        loop {
            let mut output: &mut [u8] = &mut window;
            let status = s.advance(&mut input, &mut output, op).unwrap();
            let produced = out_size - output.len();
            compressed.extend_from_slice(&window[..produced]);
            if status == Status::Ok {
                break;
            }
        }
        if op == Operation::Finish {
            break;
        }
    }

    assert_eq!(
        compressed,
        compress_to_vec(payload, &options).unwrap(),
        "streamed output differs from one-shot output for {} bytes",
        payload.len()
    );
    let recovered = decompress_to_vec(&compressed, &options).unwrap();
    assert_eq!(recovered, payload);
});
