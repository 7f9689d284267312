//! # Bloom Filter Benchmarks
//!
//! - Add: k probes, one bit write each
//! - Contains: k probes, short-circuits on the first unset bit
//! - Merge: byte-wise OR over m/8 bytes
//! - Hash schemes: Murmur3/SipHash versus SHA-256/SHA-512 seeding

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use probably::{BloomConfig, BloomFilter, HashScheme};

fn filled_filter(size: usize, fp_rate: f64, scheme: HashScheme) -> BloomFilter {
    let config = BloomConfig::new(size, fp_rate)
        .expect("valid config")
        .with_hash_scheme(scheme);
    let mut filter = BloomFilter::with_config(config).expect("valid filter");
    for i in 0..size {
        filter.add(format!("element_{}", i).as_bytes());
    }
    filter
}

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");
    group.throughput(Throughput::Elements(1));

    for scheme in [HashScheme::Murmur3, HashScheme::Sha2] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{:?}", scheme)),
            &scheme,
            |b, &scheme| {
                let config = BloomConfig::new(10_000, 0.01)
                    .expect("valid config")
                    .with_hash_scheme(scheme);
                let mut filter = BloomFilter::with_config(config).expect("valid filter");
                let mut i = 0u64;
                b.iter(|| {
                    i += 1;
                    filter.add(black_box(&i.to_le_bytes()));
                });
            },
        );
    }
    group.finish();
}

fn bench_contains(c: &mut Criterion) {
    let mut group = c.benchmark_group("contains");

    for fp_rate in [0.1, 0.01, 0.001] {
        let filter = filled_filter(10_000, fp_rate, HashScheme::Murmur3);
        group.bench_with_input(
            BenchmarkId::new("hit", fp_rate),
            &filter,
            |b, filter| b.iter(|| filter.contains(black_box(b"element_42"))),
        );
        group.bench_with_input(
            BenchmarkId::new("miss", fp_rate),
            &filter,
            |b, filter| b.iter(|| filter.contains(black_box(b"absent_element"))),
        );
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for size in [1_000, 10_000, 100_000] {
        let left = filled_filter(size, 0.01, HashScheme::Murmur3);
        let right = filled_filter(size, 0.01, HashScheme::Murmur3);
        group.throughput(Throughput::Bytes(left.bit_array().byte_len() as u64));

        group.bench_with_input(BenchmarkId::new("in_place", size), &size, |b, _| {
            let mut target = left.clone();
            b.iter(|| target.merge(black_box(&right)).expect("compatible"));
        });
        group.bench_with_input(BenchmarkId::new("union", size), &size, |b, _| {
            b.iter(|| left.union(black_box(&right)).expect("compatible"));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_add, bench_contains, bench_merge);
criterion_main!(benches);
