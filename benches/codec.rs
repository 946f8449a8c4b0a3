//! Benchmarks for lzhuff coding throughput.
//!
//! Measures each stage on its own and the framed pipeline over a few data patterns.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use lzhuff::huffman;
use lzhuff::lzss;
use lzhuff::{compress, decompress, CompressConfig, Method};
use std::hint::black_box;

/// Generate random (incompressible) data
fn generate_random_data(size: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let mut data = Vec::with_capacity(size);
    let mut hasher = DefaultHasher::new();

    for i in 0..size {
        i.hash(&mut hasher);
        data.push((hasher.finish() & 0xFF) as u8);
    }
    data
}

/// Generate repetitive (highly compressible) data
fn generate_repetitive_data(size: usize) -> Vec<u8> {
    b"ABCDABCDABCDABCD".iter().cycle().take(size).copied().collect()
}

/// Generate DNA-like data (4 character alphabet, some patterns)
fn generate_dna_data(size: usize) -> Vec<u8> {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    let bases = [b'A', b'C', b'G', b'T'];
    let mut data = Vec::with_capacity(size);
    let mut hasher = DefaultHasher::new();

    let mut i = 0;
    while data.len() < size {
        // Occasionally insert a repeat region
        if i % 1000 == 0 {
            data.extend_from_slice(&b"ATATATATAT".repeat(5));
        } else {
            i.hash(&mut hasher);
            data.push(bases[(hasher.finish() % 4) as usize]);
        }
        i += 1;
    }
    data.truncate(size);
    data
}

fn patterns(size: usize) -> [(&'static str, Vec<u8>); 3] {
    [
        ("random", generate_random_data(size)),
        ("repetitive", generate_repetitive_data(size)),
        ("dna", generate_dna_data(size)),
    ]
}

fn bench_lzss(c: &mut Criterion) {
    let mut group = c.benchmark_group("lzss");
    let size = 64 * 1024;
    group.throughput(Throughput::Bytes(size as u64));

    for (name, data) in patterns(size) {
        group.bench_with_input(BenchmarkId::new("encode", name), &data, |b, data| {
            b.iter(|| lzss::encode(black_box(data)).unwrap());
        });

        let encoded = lzss::encode(&data).unwrap();
        group.bench_with_input(BenchmarkId::new("decode", name), &encoded, |b, encoded| {
            b.iter(|| lzss::decode(black_box(encoded)).unwrap());
        });
    }

    group.finish();
}

fn bench_huffman(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman");
    let size = 256 * 1024;
    group.throughput(Throughput::Bytes(size as u64));

    for (name, data) in patterns(size) {
        group.bench_with_input(BenchmarkId::new("encode", name), &data, |b, data| {
            b.iter(|| huffman::encode(black_box(data)).unwrap());
        });

        let encoded = huffman::encode(&data).unwrap();
        group.bench_with_input(BenchmarkId::new("decode", name), &encoded, |b, encoded| {
            b.iter(|| {
                huffman::decode(black_box(&encoded.data), encoded.bit_len, &encoded.codebook)
                    .unwrap()
            });
        });
    }

    group.finish();
}

fn bench_framed(c: &mut Criterion) {
    let mut group = c.benchmark_group("framed");
    let size = 64 * 1024;
    let data = generate_dna_data(size);
    group.throughput(Throughput::Bytes(size as u64));

    for method in [Method::Lzss, Method::Huffman, Method::LzssHuffman] {
        let config = CompressConfig { method, ..Default::default() };
        group.bench_with_input(BenchmarkId::new("compress", method), &data, |b, data| {
            b.iter(|| compress(black_box(data), &config).unwrap());
        });

        let (frame, _) = compress(&data, &config).unwrap();
        group.bench_with_input(BenchmarkId::new("decompress", method), &frame, |b, frame| {
            b.iter(|| decompress(black_box(frame)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lzss, bench_huffman, bench_framed);
criterion_main!(benches);
