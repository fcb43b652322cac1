use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::collections::BTreeMap;
use std::hint::black_box;
use tempfile::TempDir;
use vars_store::format::{parse, serialize};
use vars_store::{FixedRoot, MapEnvironment, Store};

fn sample(entries: usize) -> BTreeMap<String, String> {
    (0..entries).map(|i| (format!("key_{i:05}"), format!("value {i}\nsecond line"))).collect()
}

// ============================================================================
// Benchmark: Property File Codec
// ============================================================================

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("codec");

    for entries in [10, 100, 1_000] {
        let data = sample(entries);
        let text = serialize(&data);
        group.throughput(Throughput::Bytes(u64::try_from(text.len()).unwrap_or(u64::MAX)));

        group.bench_with_input(BenchmarkId::new("serialize", entries), &data, |b, data| {
            b.iter(|| black_box(serialize(data)));
        });
        group.bench_with_input(BenchmarkId::new("parse", entries), &text, |b, text| {
            b.iter(|| black_box(parse(text)));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Store Round Trips (reload + atomic rewrite per call)
// ============================================================================

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("store");

    let temp = TempDir::new().unwrap();
    let store = Store::builder()
        .namespace("bench")
        .state_root(FixedRoot::new(temp.path()))
        .environment(MapEnvironment::new())
        .build();
    store.init().unwrap();
    for (k, v) in sample(100) {
        store.set(&k, v).unwrap();
    }

    group.bench_function("get", |b| {
        b.iter(|| black_box(store.get("key_00050").unwrap()));
    });

    group.bench_function("set", |b| {
        b.iter(|| store.set("key_00050", "updated").unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_codec, bench_store);
criterion_main!(benches);
