// Integration tests for io/pump.rs: reader-to-writer compression loops.

use blockstream::codec::stored::StoredBlockDecompressor;
use blockstream::io::{compress_reader, decompress_reader, PumpConfig, PumpStats};
use blockstream::{compress_to_vec, compress_to_vec_with, Brotli, Options, Stored};
use std::io::{self, Cursor, Read};

/// Reader that returns at most `step` bytes per call and an `Interrupted`
/// error every other call.
struct Choppy<'a> {
    data: &'a [u8],
    step: usize,
    interrupt: bool,
}

impl Read for Choppy<'_> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.interrupt = !self.interrupt;
        if self.interrupt {
            return Err(io::Error::new(io::ErrorKind::Interrupted, "again"));
        }
        let n = self.data.len().min(self.step).min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

fn corpus(len: usize) -> Vec<u8> {
    b"pump corpus: the quick brown fox jumps over the lazy dog\n"
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

#[test]
fn brotli_pump_output_equals_one_shot() {
    let options = Options::new().with_quality(2).with_block_size(10_000);
    let data = corpus(123_457);
    let config = PumpConfig { chunk_size: 4096, out_size: 777 };
    let mut packed = Vec::new();
    let stats =
        compress_reader::<Brotli, _, _>(&mut Cursor::new(&data), &mut packed, &options, &config)
            .unwrap();
    assert_eq!(stats.bytes_in, data.len() as u64);
    assert_eq!(stats.bytes_out, packed.len() as u64);
    assert_eq!(packed, compress_to_vec(&data, &options).unwrap());
}

#[test]
fn short_and_interrupted_reads_do_not_end_the_stream_early() {
    let options = Options::new().with_block_size(64);
    let data = corpus(1000);
    let mut reader = Choppy { data: &data, step: 5, interrupt: false };
    let config = PumpConfig { chunk_size: 100, out_size: 16 };
    let mut packed = Vec::new();
    compress_reader::<Stored, _, _>(&mut reader, &mut packed, &options, &config).unwrap();

    assert_eq!(packed, compress_to_vec_with::<Stored>(&data, &options).unwrap());
    let blocks = StoredBlockDecompressor::blocks(&packed).unwrap();
    assert_eq!(blocks.iter().filter(|(_, f)| *f).count(), 1);
}

#[test]
fn input_of_exact_chunk_multiple_finishes_on_empty_read() {
    let options = Options::new().with_block_size(50);
    let data = corpus(300);
    let config = PumpConfig { chunk_size: 100, out_size: 1024 };
    let mut packed = Vec::new();
    let stats =
        compress_reader::<Stored, _, _>(&mut &data[..], &mut packed, &options, &config).unwrap();
    assert_eq!(stats.bytes_in, 300);
    let blocks = StoredBlockDecompressor::blocks(&packed).unwrap();
    let sizes: Vec<usize> = blocks.iter().map(|(b, _)| b.len()).collect();
    assert_eq!(sizes, [50, 50, 50, 50, 50, 50]);
}

#[test]
fn empty_reader_produces_a_valid_empty_stream() {
    let options = Options::new().with_quality(1);
    let mut packed = Vec::new();
    let stats = compress_reader::<Brotli, _, _>(
        &mut io::empty(),
        &mut packed,
        &options,
        &PumpConfig::default(),
    )
    .unwrap();
    assert_eq!(stats.bytes_in, 0);
    assert!(!packed.is_empty());

    let mut plain = Vec::new();
    let stats = decompress_reader::<Brotli, _, _>(&mut &packed[..], &mut plain, &options).unwrap();
    assert_eq!(stats.bytes_out, 0);
    assert!(plain.is_empty());
}

#[test]
fn decompress_reader_roundtrip_and_corruption() {
    let options = Options::new().with_quality(3);
    let data = corpus(20_000);
    let packed = compress_to_vec(&data, &options).unwrap();
    let mut plain = Vec::new();
    let stats = decompress_reader::<Brotli, _, _>(&mut &packed[..], &mut plain, &options).unwrap();
    assert_eq!(plain, data);
    assert_eq!(stats.bytes_in, packed.len() as u64);

    let err = decompress_reader::<Stored, _, _>(&mut &b"\x09\x00\x00"[..], &mut Vec::new(), &options)
        .unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::InvalidData);
}

#[test]
fn ratio_of_empty_input_is_one_hundred() {
    assert_eq!(PumpStats::default().ratio_percent(), 100.0);
    let s = PumpStats { bytes_in: 200, bytes_out: 50, calls: 3 };
    assert_eq!(s.ratio_percent(), 25.0);
}
