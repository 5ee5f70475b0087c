//! Criterion view of the same workloads the experiment binaries run.
//!
//! Run: `cargo bench --bench idioms`

use std::collections::{BTreeMap, HashMap};
use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use idiom_bench::generate::DataGen;
use idiom_bench::workloads::allocation::{
    self, concat_by_copy, concat_in_place, merge_by_copy, merge_in_place, transform_all_borrowed,
    transform_all_owned,
};
use idiom_bench::workloads::iteration::{sum_fold, sum_for_each, sum_for_loop, VALUE_RANGE};
use idiom_bench::workloads::key_store::{contains_all, lookup_all, remove_all, KeyStore, KvInput};

const SEED: u64 = 0x1d10;

fn iteration(c: &mut Criterion) {
    let mut group = c.benchmark_group("iteration/sum");
    let mut gen = DataGen::seeded(SEED);

    for size in [1_000usize, 100_000] {
        let values = gen.numbers(size, VALUE_RANGE);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("for_loop", size), &values, |b, v| {
            b.iter(|| sum_for_loop(black_box(v)));
        });
        group.bench_with_input(BenchmarkId::new("for_each", size), &values, |b, v| {
            b.iter(|| sum_for_each(black_box(v)));
        });
        group.bench_with_input(BenchmarkId::new("fold", size), &values, |b, v| {
            b.iter(|| sum_fold(black_box(v)));
        });
    }
    group.finish();
}

fn bench_store<S: KeyStore>(c: &mut Criterion, input: &KvInput, size: usize) {
    let mut group = c.benchmark_group(format!("key_store/{}", S::NAME));
    group.throughput(Throughput::Elements(size as u64));

    group.bench_function(BenchmarkId::new("fill", size), |b| {
        b.iter(|| S::fill(black_box(&input.keys), black_box(&input.values)));
    });

    let store = S::fill(&input.keys, &input.values);
    group.bench_function(BenchmarkId::new("exists", size), |b| {
        b.iter(|| contains_all(&store, black_box(&input.probes)));
    });
    group.bench_function(BenchmarkId::new("get", size), |b| {
        b.iter(|| lookup_all(&store, black_box(&input.probes)).len());
    });
    group.bench_function(BenchmarkId::new("iterate", size), |b| {
        b.iter(|| black_box(&store).entries().len());
    });

    group.bench_function(BenchmarkId::new("clear", size), |b| {
        b.iter_with_setup(
            || S::fill(&input.keys, &input.values),
            |mut s| {
                remove_all(&mut s, &input.keys);
                s
            },
        );
    });
    group.finish();
}

fn key_store(c: &mut Criterion) {
    let mut gen = DataGen::seeded(SEED);
    let size = 10_000;
    let input = KvInput::generate(&mut gen, size);
    bench_store::<HashMap<String, String>>(c, &input, size);
    bench_store::<BTreeMap<String, String>>(c, &input, size);
}

fn allocation(c: &mut Criterion) {
    let mut gen = DataGen::seeded(SEED);

    let mut group = c.benchmark_group("allocation/concat");
    let arrays = allocation::generate_arrays(&mut gen, 200);
    group.bench_function("spread_copy", |b| {
        b.iter(|| concat_by_copy(black_box(&arrays)));
    });
    group.bench_function("extend_in_place", |b| {
        b.iter(|| concat_in_place(black_box(&arrays)));
    });
    group.finish();

    let mut group = c.benchmark_group("allocation/merge");
    let maps = allocation::generate_maps(&mut gen, 50);
    group.bench_function("rebuild_copy", |b| {
        b.iter(|| merge_by_copy(black_box(&maps)));
    });
    group.bench_function("extend_in_place", |b| {
        b.iter(|| merge_in_place(black_box(&maps)));
    });
    group.finish();

    let mut group = c.benchmark_group("allocation/params");
    let records = allocation::generate_records(&mut gen, 10_000);
    let mixed = allocation::generate_mixed_records(&mut gen, 10_000);
    for (shape, input) in [("uniform", &records), ("mixed", &mixed)] {
        group.bench_with_input(BenchmarkId::new("by_value", shape), input, |b, r| {
            b.iter(|| transform_all_owned(black_box(r)));
        });
        group.bench_with_input(BenchmarkId::new("by_reference", shape), input, |b, r| {
            b.iter(|| transform_all_borrowed(black_box(r)));
        });
    }
    group.finish();
}

criterion_group!(benches, iteration, key_store, allocation);
criterion_main!(benches);
