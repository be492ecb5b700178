use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use wordex::IntArray;

const SIZES: &[usize] = &[16, 1_000, 100_000];

fn bench_push(c: &mut Criterion) {
    let mut group = c.benchmark_group("int_array_push");

    for &n in SIZES {
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("IntArray", n), &n, |b, &n| {
            b.iter(|| {
                let mut arr = IntArray::with_capacity(2).unwrap();
                for i in 0..n as i32 {
                    arr.push(black_box(i)).unwrap();
                }
                arr
            });
        });

        group.bench_with_input(BenchmarkId::new("Vec", n), &n, |b, &n| {
            b.iter(|| {
                let mut v = Vec::with_capacity(2);
                for i in 0..n as i32 {
                    v.push(black_box(i));
                }
                v
            });
        });
    }

    group.finish();
}

fn bench_iter(c: &mut Criterion) {
    let mut arr = IntArray::new();
    for i in 0..100_000 {
        arr.push(i).unwrap();
    }

    c.bench_function("int_array_sum 100_000", |b| {
        b.iter(|| black_box(arr.iter().map(i64::from).sum::<i64>()));
    });
}

criterion_group!(benches, bench_push, bench_iter);
criterion_main!(benches);
