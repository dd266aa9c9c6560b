use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use memo_cache::{BackingKind, ConfiguredMap, KeyPolicy, KeyedCache, MergingCollectionCache};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::thread;

fn accession(i: usize) -> String {
    format!("P{i:05}")
}

fn filled(backing: BackingKind, entries: usize) -> KeyedCache<String, u64, ConfiguredMap<String, u64>> {
    let cache: KeyedCache<String, u64, ConfiguredMap<String, u64>> =
        KeyedCache::with_map_factory(|| ConfiguredMap::new(backing, entries));
    cache.put_all((0..entries).map(|i| (accession(i), i as u64)));
    cache
}

fn benchmark_lookups(c: &mut Criterion) {
    let mut group = c.benchmark_group("KeyedCache");

    for backing in [BackingKind::Hashed, BackingKind::Ordered, BackingKind::Indexed] {
        let cache = filled(backing, 10_000);
        let hit = accession(4_321);
        let miss = "Q99999".to_string();

        group.bench_with_input(BenchmarkId::new("get_hit", backing), &hit, |b, key| {
            b.iter(|| black_box(cache.get(key)));
        });
        group.bench_with_input(BenchmarkId::new("get_miss", backing), &miss, |b, key| {
            b.iter(|| black_box(cache.get(key)));
        });
    }

    let cache = filled(BackingKind::Hashed, 10_000);
    let batch: Vec<String> = (0..100).map(|i| accession(i * 97)).collect();
    group.bench_function("get_many_100", |b| {
        b.iter(|| black_box(cache.get_many(&batch)));
    });

    group.bench_function("put_all_1000", |b| {
        b.iter(|| {
            let cache: KeyedCache<String, u64> = KeyedCache::new();
            cache.put_all((0..1_000).map(|i| (accession(i), i as u64)));
            black_box(cache)
        });
    });

    group.finish();
}

fn benchmark_normalization(c: &mut Criterion) {
    let mut group = c.benchmark_group("KeyNormalization");

    let identity: KeyedCache<String, u64> = KeyedCache::new();
    let upper: KeyedCache<String, u64> = KeyedCache::with_normalizer(KeyPolicy::Uppercase);
    for i in 0..1_000 {
        identity.put(accession(i), i as u64);
        upper.put(accession(i), i as u64);
    }
    let canonical = accession(500);
    let lower = canonical.to_lowercase();

    group.bench_function("identity", |b| b.iter(|| black_box(identity.get(&canonical))));
    group.bench_function("uppercase_canonical", |b| {
        b.iter(|| black_box(upper.get(&canonical)))
    });
    group.bench_function("uppercase_rewrite", |b| b.iter(|| black_box(upper.get(&lower))));

    group.finish();
}

fn benchmark_merging(c: &mut Criterion) {
    let mut group = c.benchmark_group("MergingCollectionCache");

    group.bench_function("add_vec_1000", |b| {
        b.iter(|| {
            let cache: MergingCollectionCache<String, Vec<usize>> =
                MergingCollectionCache::new(Vec::new);
            for i in 0..1_000 {
                cache.add(accession(i % 10), i);
            }
            black_box(cache)
        });
    });

    group.bench_function("put_set_1000", |b| {
        b.iter(|| {
            let cache: MergingCollectionCache<String, BTreeSet<usize>> =
                MergingCollectionCache::new(BTreeSet::new);
            for i in 0..1_000 {
                cache.put(accession(i % 10), BTreeSet::from([i, i % 7]));
            }
            black_box(cache)
        });
    });

    group.finish();
}

fn benchmark_contention(c: &mut Criterion) {
    let mut group = c.benchmark_group("Contention");
    group.sample_size(20);

    for threads in [2usize, 4, 8] {
        group.bench_with_input(BenchmarkId::new("mixed", threads), &threads, |b, &threads| {
            let cache = Arc::new(filled(BackingKind::Hashed, 1_000));
            b.iter(|| {
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let cache = Arc::clone(&cache);
                        thread::spawn(move || {
                            for i in 0..1_000 {
                                if i % 10 == t {
                                    cache.put(accession(i), i as u64);
                                } else {
                                    black_box(cache.get(&accession(i)));
                                }
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    let _ = handle.join();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_lookups,
    benchmark_normalization,
    benchmark_merging,
    benchmark_contention
);
criterion_main!(benches);
