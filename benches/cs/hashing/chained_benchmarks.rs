use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hashbench::cs::hashing::workload::{populate, run_workload, workload_key};
use hashbench::cs::hashing::{ChainedHashTable, NUM_KEYS};

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("chained_insert");
    for &n in &[64, 200, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let mut table = ChainedHashTable::new();
                populate(&mut table, n).unwrap();
                black_box(table.len())
            })
        });
    }
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let mut table = ChainedHashTable::new();
    populate(&mut table, NUM_KEYS).unwrap();

    c.bench_function("chained_lookup_hit_and_miss", |b| {
        b.iter(|| {
            let mut hits = 0;
            for i in 0..NUM_KEYS * 2 {
                if table.lookup(black_box(workload_key(i).unwrap())).is_some() {
                    hits += 1;
                }
            }
            black_box(hits)
        })
    });
}

fn bench_delete(c: &mut Criterion) {
    c.bench_function("chained_insert_then_delete", |b| {
        b.iter(|| {
            let mut table = ChainedHashTable::new();
            populate(&mut table, NUM_KEYS).unwrap();
            for i in (0..NUM_KEYS).rev() {
                black_box(table.delete(workload_key(i).unwrap()));
            }
            table.teardown()
        })
    });
}

fn bench_workload(c: &mut Criterion) {
    c.bench_function("hash_lookup_workload", |b| {
        b.iter(|| black_box(run_workload().unwrap()))
    });
}

criterion_group!(
    benches,
    bench_insert,
    bench_lookup,
    bench_delete,
    bench_workload
);
criterion_main!(benches);
