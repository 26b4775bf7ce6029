use criterion::{criterion_group, criterion_main, Criterion};

use uri_utility::percent_decode::{percent_decode, OnInvalid};
use uri_utility::percent_encode::{escape, EscapeOptions};

pub fn criterion_benchmark(c: &mut Criterion) {
    let raw: Vec<u16> = "http://example.com/caf\u{e9} au lait/[\u{1F600}]?q=a b#\u{4E00}\u{4E01}"
        .encode_utf16()
        .collect();
    let escaped = escape(&raw, EscapeOptions::default()).expect("lenient escaping should succeed");

    c.bench_function("escape", |b| {
        b.iter(|| escape(&raw, EscapeOptions::default()).expect("should succeed"))
    });

    c.bench_function("percent_decode", |b| {
        b.iter(|| percent_decode(&escaped, OnInvalid::Fail).expect("should be well-formed"))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
