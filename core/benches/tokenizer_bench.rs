use cinesearch_core::Tokenizer;
use criterion::{criterion_group, criterion_main, Criterion};
use std::collections::HashSet;

fn bench_normalize(c: &mut Criterion) {
    let stopwords: HashSet<String> = ["a", "an", "and", "is", "of", "the"]
        .iter()
        .map(|w| w.to_string())
        .collect();
    let tokenizer = Tokenizer::new(stopwords);
    let text = include_str!("../../README.md");
    c.bench_function("normalize_readme", |b| b.iter(|| tokenizer.normalize(text)));
}

criterion_group!(benches, bench_normalize);
criterion_main!(benches);
