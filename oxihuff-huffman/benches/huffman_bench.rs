//! Performance benchmarks for OxiHuff Huffman compression
//!
//! This benchmark suite evaluates:
//! - Tree construction from frequency tables
//! - Compression of text-like and random data
//! - Decompression throughput

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxihuff_huffman::{CodeTable, FrequencyTable, HuffmanTree, compress_bytes, decompress_bytes};
use std::hint::black_box;

/// Generate test data for benchmarking
fn generate_test_data(size: usize, pattern: &str) -> Vec<u8> {
    match pattern {
        "text" => {
            let text = b"It was the best of times, it was the worst of times, \
                         it was the age of wisdom, it was the age of foolishness. ";
            text.iter().cycle().take(size).copied().collect()
        }
        "random" => {
            let mut data = Vec::with_capacity(size);
            let mut seed: u64 = 0x123456789ABCDEF0;
            for _ in 0..size {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                data.push((seed >> 32) as u8);
            }
            data
        }
        _ => vec![b'x'; size],
    }
}

fn bench_tree_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("tree_build");

    for pattern in ["text", "random"] {
        let table = FrequencyTable::from_bytes(&generate_test_data(64 * 1024, pattern));
        group.bench_with_input(BenchmarkId::from_parameter(pattern), &table, |b, table| {
            b.iter(|| {
                let tree = HuffmanTree::build(black_box(table)).unwrap();
                black_box(CodeTable::from_tree(&tree))
            });
        });
    }

    group.finish();
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");

    for pattern in ["text", "random", "repeated"] {
        for size in [4 * 1024usize, 64 * 1024] {
            let data = generate_test_data(size, pattern);
            group.throughput(Throughput::Bytes(size as u64));
            group.bench_with_input(
                BenchmarkId::new(pattern, size),
                &data,
                |b, data| b.iter(|| black_box(compress_bytes(black_box(data)).unwrap())),
            );
        }
    }

    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");

    for pattern in ["text", "random"] {
        let size = 64 * 1024usize;
        let compressed = compress_bytes(&generate_test_data(size, pattern)).unwrap();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(pattern),
            &compressed,
            |b, compressed| b.iter(|| black_box(decompress_bytes(black_box(compressed)).unwrap())),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_tree_build, bench_compress, bench_decompress);
criterion_main!(benches);
