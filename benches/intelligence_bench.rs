// ABOUTME: Criterion benchmarks for the trend predictor and FAQ matcher
// ABOUTME: Measures model fitting over growing weight logs and per-query FAQ matching
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the prediction and matching algorithms.
//!
//! Fitting cost grows with the log length because the kernel matrix is dense, so the trend
//! group sweeps several log sizes.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tracker_core::models::WeightSample;
use tracker_intelligence::{predict_future, FaqMatcher, TrendPredictor};

/// Weight log sizes to fit
const LOG_SIZES: [usize; 4] = [10, 50, 100, 365];

/// Daily log with a slow downward trend and a weekly wobble
#[allow(clippy::cast_precision_loss)]
fn generate_log(count: usize) -> Vec<WeightSample> {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or_default();
    (0..count)
        .map(|day| {
            let t = day as f64;
            WeightSample {
                date: start + Duration::days(day as i64),
                weight: 0.3f64.mul_add((t / 7.0).sin(), 85.0 - 0.05 * t),
            }
        })
        .collect()
}

fn bench_trend_fit(c: &mut Criterion) {
    let mut group = c.benchmark_group("trend_fit");

    for count in LOG_SIZES {
        let log = generate_log(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &log, |b, log| {
            b.iter(|| TrendPredictor::fit(black_box(log)));
        });
    }

    group.finish();
}

fn bench_forecast(c: &mut Criterion) {
    let mut group = c.benchmark_group("forecast");
    let log = generate_log(90);

    group.bench_function("predict_future_30_days", |b| {
        b.iter(|| predict_future(black_box(&log), black_box(30)));
    });

    group.finish();
}

fn bench_faq_matching(c: &mut Criterion) {
    let mut group = c.benchmark_group("faq");
    let Ok(matcher) = FaqMatcher::with_default_corpus() else {
        return;
    };
    let queries = [
        "how much protein should I eat",
        "is it ok to skip breakfast",
        "quantum chromodynamics",
    ];

    group.bench_function("build_default_corpus", |b| {
        b.iter(FaqMatcher::with_default_corpus);
    });

    group.throughput(Throughput::Elements(queries.len() as u64));
    group.bench_function("match_queries", |b| {
        b.iter(|| {
            for query in queries {
                black_box(matcher.find_match(black_box(query)));
            }
        });
    });

    group.finish();
}

criterion_group!(benches, bench_trend_fit, bench_forecast, bench_faq_matching);
criterion_main!(benches);
