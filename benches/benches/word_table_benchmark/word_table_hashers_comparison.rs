use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use wordex::{build_from_reader, HashKind, ResizePolicy, TableParams, WordTable};

const LINES: usize = 2_000;
const WORDS_PER_LINE: usize = 10;
const START_SIZES: &[usize] = &[16, 1_024, 65_536];

/// Синтетический текст: слова из 2..10 строчных букв, распределение
/// похоже на словарь средней длины.
fn corpus() -> String {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    let mut text = String::new();

    for _ in 0..LINES {
        for w in 0..WORDS_PER_LINE {
            if w > 0 {
                text.push(' ');
            }
            let len = rng.gen_range(2..10);
            for _ in 0..len {
                text.push(char::from(b'a' + rng.gen_range(0..26u8)));
            }
        }
        text.push('\n');
    }

    text
}

fn bench_build(c: &mut Criterion) {
    let text = corpus();
    let mut group = c.benchmark_group("word_table_build");
    group.throughput(Throughput::Elements((LINES * WORDS_PER_LINE) as u64));

    for &start_size in START_SIZES {
        for hash in HashKind::ALL {
            let params = TableParams::new(start_size, 1.0, hash);
            group.bench_with_input(
                BenchmarkId::new(hash.to_string(), start_size),
                &params,
                |b, params| {
                    b.iter(|| build_from_reader(black_box(text.as_bytes()), params).unwrap());
                },
            );
        }
    }

    group.finish();
}

fn bench_build_grow(c: &mut Criterion) {
    let text = corpus();
    let mut group = c.benchmark_group("word_table_build_grow");
    group.throughput(Throughput::Elements((LINES * WORDS_PER_LINE) as u64));

    for hash in HashKind::ALL {
        let params = TableParams::new(16, 1.0, hash).with_policy(ResizePolicy::Grow);
        group.bench_with_input(BenchmarkId::new(hash.to_string(), 16), &params, |b, params| {
            b.iter(|| build_from_reader(black_box(text.as_bytes()), params).unwrap());
        });
    }

    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let text = corpus();
    let queries: Vec<&str> = text.split_whitespace().take(1_000).collect();
    let mut group = c.benchmark_group("word_table_lookup");
    group.throughput(Throughput::Elements(queries.len() as u64));

    for hash in HashKind::ALL {
        let table: WordTable =
            build_from_reader(text.as_bytes(), &TableParams::new(1_024, 1.0, hash)).unwrap();

        group.bench_function(BenchmarkId::new(hash.to_string(), 1_024), |b| {
            b.iter(|| {
                for q in &queries {
                    black_box(table.lookup(black_box(q)));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_build, bench_build_grow, bench_lookup);
criterion_main!(benches);
