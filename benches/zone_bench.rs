// ABOUTME: Criterion benchmarks for zone classification hot paths
// ABOUTME: Measures segment reconstruction, statistics aggregation, and zone lookup
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

//! Criterion benchmarks for the zone classification hot paths.
//!
//! Measures segment reconstruction and statistics aggregation over a
//! synthetic 10k-sample workout, plus raw zone lookup throughput.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use chrono::{DateTime, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use pulse_zones::{
    BpmSample, SegmentBuilder, TimeSegment, ZoneEngineConfig, ZoneStatisticsAggregator,
};

/// Synthetic workout length used by the throughput benchmarks
const WORKOUT_SAMPLES: usize = 10_000;

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap()
}

/// Deterministic sample series sweeping across all four default zones
fn generate_samples(count: usize) -> Vec<BpmSample> {
    (0..count)
        .map(|index| {
            let value = 90 + ((index * 7) % 100) as i32;
            BpmSample::new(value, timestamp(index as i64))
        })
        .collect()
}

fn bench_segment_builder(c: &mut Criterion) {
    let config = ZoneEngineConfig::default();
    let zone_set = config.zone_set().unwrap();
    let builder = SegmentBuilder::new(&zone_set, config.max_bpm);
    let samples = generate_samples(WORKOUT_SAMPLES);

    let mut group = c.benchmark_group("segment_builder");
    group.throughput(Throughput::Elements(WORKOUT_SAMPLES as u64));
    group.bench_function("build_10k_samples", |b| {
        b.iter(|| builder.build(black_box(&samples)));
    });
    group.finish();
}

fn bench_statistics_aggregation(c: &mut Criterion) {
    let config = ZoneEngineConfig::default();
    let zone_set = config.zone_set().unwrap();
    let aggregator = ZoneStatisticsAggregator::new(&zone_set, config.max_bpm);
    let samples = generate_samples(WORKOUT_SAMPLES);
    let segment = TimeSegment::new(
        timestamp(0),
        timestamp(WORKOUT_SAMPLES as i64),
        samples,
    );
    let segments = vec![segment];

    let mut group = c.benchmark_group("statistics");
    group.throughput(Throughput::Elements(WORKOUT_SAMPLES as u64));
    group.bench_function("aggregate_10k_samples", |b| {
        b.iter(|| aggregator.aggregate(black_box(&segments)));
    });
    group.bench_function("smoothed_percentages", |b| {
        let stats = aggregator.aggregate(&segments);
        b.iter(|| black_box(&stats).smoothed_percentages());
    });
    group.finish();
}

fn bench_zone_lookup(c: &mut Criterion) {
    let config = ZoneEngineConfig::default();
    let zone_set = config.zone_set().unwrap();

    let mut group = c.benchmark_group("zone_lookup");
    group.throughput(Throughput::Elements(220));
    group.bench_function("zone_for_bpm_sweep", |b| {
        b.iter(|| {
            for bpm in -10..210 {
                black_box(zone_set.zone_for_bpm(black_box(bpm), config.max_bpm));
            }
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_segment_builder,
    bench_statistics_aggregation,
    bench_zone_lookup
);
criterion_main!(benches);
