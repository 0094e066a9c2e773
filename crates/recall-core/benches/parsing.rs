use criterion::{black_box, criterion_group, criterion_main, Criterion};

use rand::rngs::StdRng;
use rand::SeedableRng;

use recall_core::model::Discipline;
use recall_core::parser::parse;

fn digits_text(n: usize) -> String {
    (0..n)
        .map(|i| char::from(b'0' + (i * 7 % 10) as u8))
        .collect::<Vec<_>>()
        .chunks(40)
        .map(|row| row.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

fn dates_text(n: usize) -> String {
    (0..n)
        .map(|i| format!("{} event number {i}", 1000 + i))
        .collect::<Vec<_>>()
        .join("\n")
}

fn words_text(n: usize) -> String {
    (0..n)
        .map(|i| format!("Word{i}"))
        .collect::<Vec<_>>()
        .join("\n")
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    let digits = digits_text(2000);
    let dates = dates_text(500);
    let words = words_text(500);
    let cards = (0..520)
        .map(|i| (i % 52).to_string())
        .collect::<Vec<_>>()
        .join(", ");

    group.bench_function("base10_2000", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| parse(Discipline::Base10, black_box(&digits), None, &mut rng))
    });

    group.bench_function("cards_520", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| parse(Discipline::Cards, black_box(&cards), None, &mut rng))
    });

    group.bench_function("words_500", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| parse(Discipline::Words, black_box(&words), Some("english"), &mut rng))
    });

    group.bench_function("dates_500", |b| {
        let mut rng = StdRng::seed_from_u64(1);
        b.iter(|| parse(Discipline::Dates, black_box(&dates), Some("english"), &mut rng))
    });

    group.finish();
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
