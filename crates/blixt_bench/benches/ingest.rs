//! Document ingestion benchmarks.

use blixt_bench::{articles_index, generate_articles, random_text, vocabulary};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Benchmark ingesting single documents of increasing size.
fn bench_add_document(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_document");
    let words = vocabulary(500);

    for size in [10, 100, 1000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("body_words", size), &size, |b, &size| {
            let (_driver, index) = articles_index();
            let documents = generate_articles(1, size, &words);
            let template = &documents[0];
            let mut key = 0i64;
            b.iter(|| {
                key += 1;
                let mut document = blixt_core::Indexable::new(key);
                for (name, value) in template.fields() {
                    document.set(name.as_str(), value.clone());
                }
                index.add(black_box(&document)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark batch ingestion into a fresh index.
fn bench_add_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_all");
    let words = vocabulary(500);

    for count in [10, 100] {
        let documents = generate_articles(count, 50, &words);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("documents", count), &documents, |b, documents| {
            b.iter(|| {
                let (_driver, index) = articles_index();
                index.add_all(black_box(documents)).unwrap();
            });
        });
    }

    group.finish();
}

/// Benchmark term lookup on a populated index.
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    let words = vocabulary(200);
    let (_driver, index) = articles_index();
    index
        .add_all(&generate_articles(200, 50, &words))
        .unwrap();

    group.bench_function("single_word", |b| {
        let term = words[0].clone();
        b.iter(|| {
            let result = index.lookup(black_box(&term)).unwrap();
            black_box(result);
        });
    });

    group.bench_function("three_words", |b| {
        let text = random_text(&words, 3);
        b.iter(|| {
            let result = index.lookup(black_box(&text)).unwrap();
            black_box(result);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_add_document, bench_add_all, bench_lookup);
criterion_main!(benches);
