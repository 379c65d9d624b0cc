use std::hint::black_box;
use std::ops::ControlFlow;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use skiplist_engine::{MemTable, SkipList};

const N: u64 = 100_000;

fn shuffled(n: u64) -> Vec<u64> {
    let mut keys: Vec<u64> = (0..n).collect();
    keys.shuffle(&mut SmallRng::seed_from_u64(23));
    keys
}

fn filled(keys: &[u64]) -> SkipList<u64, u64> {
    let mut sl = SkipList::seeded(23);
    for &k in keys {
        sl.add(k, k).unwrap();
    }
    sl
}

fn insert(c: &mut Criterion) {
    let keys = shuffled(N);

    c.bench_function("skiplist add", |b| {
        b.iter(|| black_box(filled(&keys)));
    });

    c.bench_function("skiplist set", |b| {
        b.iter(|| {
            let mut sl = SkipList::seeded(23);
            for &k in &keys {
                sl.set(k, k).unwrap();
            }
            black_box(sl)
        });
    });

    c.bench_function("skiplist set existing", |b| {
        let mut sl = filled(&keys);
        b.iter(|| {
            for &k in &keys {
                black_box(sl.set(k, k + 1).unwrap());
            }
        });
    });
}

fn lookup(c: &mut Criterion) {
    let keys = shuffled(N);
    let sl = filled(&keys);

    c.bench_function("skiplist get", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(sl.get(k));
            }
        });
    });

    c.bench_function("skiplist get missing", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(sl.get(&(k + N)));
            }
        });
    });

    c.bench_function("skiplist contains", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(sl.contains(k));
            }
        });
    });
}

fn remove(c: &mut Criterion) {
    let keys = shuffled(N);
    let template = || filled(&keys);

    c.bench_function("skiplist delete", |b| {
        b.iter_batched(
            template,
            |mut sl| {
                for k in &keys {
                    black_box(sl.delete(k));
                }
                sl
            },
            BatchSize::LargeInput,
        );
    });

    c.bench_function("skiplist delete missing", |b| {
        let mut sl = filled(&keys);
        b.iter(|| {
            for k in &keys {
                black_box(sl.delete(&(k + N)));
            }
        });
    });

    c.bench_function("skiplist pop_first", |b| {
        b.iter_batched(
            template,
            |mut sl| {
                while let Some(pair) = sl.pop_first() {
                    black_box(pair);
                }
                sl
            },
            BatchSize::LargeInput,
        );
    });

    c.bench_function("skiplist pop_last", |b| {
        b.iter_batched(
            template,
            |mut sl| {
                while let Some(pair) = sl.pop_last() {
                    black_box(pair);
                }
                sl
            },
            BatchSize::LargeInput,
        );
    });

    c.bench_function("skiplist clear", |b| {
        b.iter_batched(
            template,
            |mut sl| {
                black_box(sl.clear());
                sl
            },
            BatchSize::LargeInput,
        );
    });
}

fn scan(c: &mut Criterion) {
    let sl = filled(&shuffled(N));

    c.bench_function("skiplist sum", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let _ = sl.iterate(|_, v| {
                sum += v;
                ControlFlow::Continue(())
            });
            black_box(sum)
        });
    });

    c.bench_function("skiplist sum partway", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            let _ = sl.iterate_from(&(N / 2), |_, v| {
                sum += v;
                if *v >= 3 * N / 4 {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
            black_box(sum)
        });
    });

    c.bench_function("skiplist iter", |b| {
        b.iter(|| black_box(sl.iter().map(|(_, v)| *v).sum::<u64>()));
    });
}

fn memtable(c: &mut Criterion) {
    let keys: Vec<Vec<u8>> = shuffled(N)
        .into_iter()
        .map(|k| format!("key_{k:08}").into_bytes())
        .collect();

    c.bench_function("memtable put", |b| {
        b.iter(|| {
            let mut mt = MemTable::new(usize::MAX);
            for k in &keys {
                mt.put(k.clone(), b"value".to_vec()).unwrap();
            }
            black_box(mt)
        });
    });

    let mut mt = MemTable::new(usize::MAX);
    for k in &keys {
        mt.put(k.clone(), b"value".to_vec()).unwrap();
    }
    c.bench_function("memtable get", |b| {
        b.iter(|| {
            for k in &keys {
                black_box(mt.get(k));
            }
        });
    });
}

criterion_group!(benches, insert, lookup, remove, scan, memtable);
criterion_main!(benches);
