//! Performance benchmarks for rs-http-features.
//!
//! Run with: `cargo bench`
//!
//! Benchmarks include:
//! - A small synthetic login page for microbenchmarks
//! - The line scanner alone on a script-heavy page
//! - Synthetic pages of growing size for throughput

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rs_http_features::line_scan::LineStats;
use rs_http_features::{
    ArtifactLoader, FeatureExtractor, Options, Result, StaticArtifacts, Vocabulary,
};

const SAMPLE_HTML: &str = r##"
<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Sign in - Example Bank | Online Banking</title>
    <link rel="stylesheet" href="https://cdn.example.net/site.css">
    <script src="https://cdn.example.net/jquery.min.js"></script>
    <style>
        body { font-family: sans-serif; }
        .login { width: 320px; }
    </style>
</head>
<body>
    <img src="https://cdn.example.net/logo.png">
    <form class="login" action="/auth" method="post">
        <input type="text" name="user">
        <input type="password" name="pass">
        <button type="submit">Sign in</button>
    </form>
    <a href="https://example.com/help">Help</a>
    <a href="#">Forgot password?</a>
    <a href="javascript:void(0)">Register</a>
    <script>
        document.forms[0].onsubmit = function () { return true; };
    </script>
</body>
</html>
"##;

fn loader() -> Arc<dyn ArtifactLoader> {
    let terms = ["sign", "in", "bank", "online", "banking", "login", "verify", "account"];
    Arc::new(StaticArtifacts::new(
        Vocabulary::from_terms(terms),
        |batch: &[Vec<f64>]| -> Result<Vec<f64>> {
            Ok(batch.iter().map(|v| v.iter().sum::<f64>() / v.len() as f64).collect())
        },
    ))
}

fn bench_feature_vector(c: &mut Criterion) {
    let loader = loader();
    c.bench_function("feature_vector", |b| {
        b.iter(|| {
            FeatureExtractor::new(black_box(SAMPLE_HTML), "https://example.com/", Arc::clone(&loader))
                .feature_vector()
        });
    });
}

fn bench_structural_with_options(c: &mut Criterion) {
    let loader = loader();
    let options = Options { tfidf_percent: 0.8 };

    c.bench_function("structural_features", |b| {
        b.iter(|| {
            FeatureExtractor::with_options(
                black_box(SAMPLE_HTML),
                "https://example.com/",
                black_box(&options),
                Arc::clone(&loader),
            )
            .structural_features()
        });
    });
}

fn bench_line_scan(c: &mut Criterion) {
    let html = SAMPLE_HTML.repeat(50);
    c.bench_function("line_scan", |b| {
        b.iter(|| LineStats::scan(black_box(&html), true));
    });
}

/// Throughput over pages of growing size
fn bench_page_sizes(c: &mut Criterion) {
    let loader = loader();
    let mut group = c.benchmark_group("page_size");

    for copies in [1usize, 10, 100] {
        let html = SAMPLE_HTML.repeat(copies);
        let size_kb = html.len() / 1024;
        group.throughput(Throughput::Bytes(html.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("feature_vector", format!("{copies}x ({size_kb}KB)")),
            &html,
            |b, html| {
                b.iter(|| {
                    FeatureExtractor::new(black_box(html), "https://example.com/", Arc::clone(&loader))
                        .feature_vector()
                });
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_feature_vector,
    bench_structural_with_options,
    bench_line_scan,
    bench_page_sizes
);
criterion_main!(benches);
