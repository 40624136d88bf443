use bucket_hashmap::BucketTable;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::thread;
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn bench_insert(c: &mut Criterion) {
    let keys: Vec<_> = lcg(1).take(10_000).map(key).collect();
    c.bench_function("bucket_table_insert_10k", |b| {
        b.iter_batched(
            BucketTable::new,
            |t| {
                for (i, k) in keys.iter().enumerate() {
                    t.add_entry(k, i as u32);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("bucket_table_get_hit", |b| {
        let t = BucketTable::new();
        let keys: Vec<_> = lcg(7).take(20_000).map(key).collect();
        for (i, k) in keys.iter().enumerate() {
            t.add_entry(k, i as u32);
        }
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(t.get_value(k));
        })
    });
}

fn bench_get_miss(c: &mut Criterion) {
    c.bench_function("bucket_table_get_miss", |b| {
        let t = BucketTable::new();
        for (i, x) in lcg(11).take(10_000).enumerate() {
            t.add_entry(&key(x), i as u32);
        }
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            // generate keys unlikely in table
            let k = key(miss.next().unwrap());
            black_box(t.contains(&k));
        })
    });
}

// Eight writers on disjoint keys; measures per-bucket lock contention.
fn bench_parallel_insert(c: &mut Criterion) {
    let threads = 8;
    let keys: Vec<Vec<String>> = (0..threads)
        .map(|t| lcg(100 + t).take(5_000).map(key).collect())
        .collect();
    c.bench_function("bucket_table_parallel_insert_8x5k", |b| {
        b.iter_batched(
            BucketTable::new,
            |t| {
                thread::scope(|s| {
                    for chunk in &keys {
                        let t = &t;
                        s.spawn(move || {
                            for (i, k) in chunk.iter().enumerate() {
                                t.add_entry(k, i as u32);
                            }
                        });
                    }
                });
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_get_hit, bench_get_miss, bench_parallel_insert
}
criterion_main!(benches);
