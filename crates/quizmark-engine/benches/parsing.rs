use criterion::{Criterion, criterion_group, criterion_main};
use quizmark_engine::{ParseOptions, parse_message};
mod common;

fn bench_parse_message(c: &mut Criterion) {
    let mut group = c.benchmark_group("parsing");
    group.sample_size(20);

    let options = ParseOptions::default();

    let prose = common::generate_prose_message(100);
    group.bench_function("prose_and_fences", |b| {
        b.iter(|| {
            let message = parse_message(std::hint::black_box(&prose), &options);
            std::hint::black_box(message);
        });
    });

    let quizzes = common::generate_quiz_message(20);
    group.bench_function("quiz_forms", |b| {
        b.iter(|| {
            let message = parse_message(std::hint::black_box(&quizzes), &options);
            std::hint::black_box(message);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_parse_message);
criterion_main!(benches);
