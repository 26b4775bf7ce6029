use criterion::{criterion_group, criterion_main, Criterion};

use uri_utility::mode::ParseMode;
use uri_utility::normalize::remove_dot_segments;
use uri_utility::resolve::resolve;

pub fn criterion_benchmark(c: &mut Criterion) {
    let base: Vec<u16> = "https://sub.example.com/foo1/foo2/foo3/foo4/foo5"
        .encode_utf16()
        .collect();
    let rel: Vec<u16> = concat!(
        "bar1/bar2/bar3/../bar4/../../bar5/bar6/bar7/../../../../..",
        "/bar8/../../../bar9/././././././bar10/bar11",
    )
    .encode_utf16()
    .collect();

    c.bench_function("resolve", |b| {
        b.iter(|| {
            resolve(&rel, Some(&base), ParseMode::IriStrict)
                .expect("resolvable inputs should be passed")
        })
    });

    c.bench_function("remove_dot_segments", |b| {
        b.iter(|| remove_dot_segments(&rel))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
