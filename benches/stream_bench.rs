//! Benchmarks for bytepipe.
//!
//! Run with:
//!     cargo bench

use std::num::NonZeroU64;

use bytes::Bytes;
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use bytepipe::{ByteStreamExt, ByteStreamFold, from_chunks};

/// Deterministic pseudo-random data, pre-chunked.
fn make_chunks(total: usize, chunk_len: usize) -> Vec<Bytes> {
    let data: Vec<u8> = (0..total).map(|i| (i * 7 + 13) as u8).collect();
    data.chunks(chunk_len).map(Bytes::copy_from_slice).collect()
}

fn bench_transforms(c: &mut Criterion) {
    let mut group = c.benchmark_group("transforms");

    for size in [64 * 1024, 1024 * 1024] {
        let chunks = make_chunks(size, 4 * 1024);

        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(format!("map_collect_{}kb", size / 1024), &chunks, |b, chunks| {
            b.iter(|| {
                let stream = from_chunks(black_box(chunks.clone())).map(|x| x.wrapping_mul(31));
                let (bytes, ()) = stream.collect_bytes();
                black_box(bytes.len())
            });
        });

        group.bench_with_input(format!("filter_fold_{}kb", size / 1024), &chunks, |b, chunks| {
            b.iter(|| {
                let count = from_chunks(black_box(chunks.clone()))
                    .filter(|x| x & 1 == 0)
                    .length();
                black_box(count)
            });
        });
    }

    group.finish();
}

fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");
    let size = 1024 * 1024;
    let chunks = make_chunks(size, 4 * 1024);

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input("chunks_of_join", &chunks, |b, chunks| {
        let bound = NonZeroU64::new(1500).unwrap();
        b.iter(|| {
            let grouped = from_chunks(black_box(chunks.clone())).chunks_of(bound);
            let (bytes, ()) = grouped.intercalate("").collect_bytes();
            black_box(bytes.len())
        });
    });

    group.bench_with_input("take_skip", &chunks, |b, chunks| {
        b.iter(|| {
            let taken = from_chunks(black_box(chunks.clone())).take(512 * 1024).length();
            let skipped = from_chunks(black_box(chunks.clone())).skip(512 * 1024).length();
            black_box(taken + skipped)
        });
    });

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    let size = 1024 * 1024;
    let chunks = make_chunks(size, 4 * 1024);

    group.throughput(Throughput::Bytes(size as u64));
    group.bench_with_input("positions_of", &chunks, |b, chunks| {
        b.iter(|| {
            let hits = from_chunks(black_box(chunks.clone())).positions_of(0).count();
            black_box(hits)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_transforms, bench_grouping, bench_search);
criterion_main!(benches);
