// ABOUTME: Pause-aware time-in-zone aggregation and percentage smoothing
// ABOUTME: Left-closed pair attribution; smoothed percentages always total exactly 100
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

use crate::constants::smoothing::TOTAL_PERCENT;
use crate::models::{BpmSample, TimeSegment};
use crate::zones::ZoneSet;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Aggregate residency statistics for one workout.
///
/// Derived entirely from the segments handed to
/// [`ZoneStatisticsAggregator::aggregate`]; re-running the aggregation on
/// the same input yields an identical value.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ZoneStatistics {
    /// Seconds spent per zone id
    pub time_in_zones: HashMap<u8, f64>,
    /// Fraction of total time per zone id, 0..1
    pub percentages_in_zones: HashMap<u8, f64>,
    /// Total measured seconds
    pub total_time_seconds: f64,
}

impl ZoneStatistics {
    /// Seconds spent in `zone_id` (zero when the zone was never visited).
    #[must_use]
    pub fn time_in_zone(&self, zone_id: u8) -> f64 {
        self.time_in_zones.get(&zone_id).copied().unwrap_or(0.0)
    }

    /// Fraction of total time spent in `zone_id`, 0..1.
    #[must_use]
    pub fn percentage_in_zone(&self, zone_id: u8) -> f64 {
        self.percentages_in_zones
            .get(&zone_id)
            .copied()
            .unwrap_or(0.0)
    }

    /// Integer percentages rounded so they total exactly 100.
    ///
    /// Largest-remainder rounding: floor every raw percentage, then hand the
    /// shortfall out one point at a time to the largest fractional
    /// remainders, ties broken by ascending zone id, cycling until the total
    /// reaches [`TOTAL_PERCENT`]. The summary screen never shows 99 or 101.
    /// Degenerate all-zero statistics smooth to all zeros.
    #[must_use]
    pub fn smoothed_percentages(&self) -> HashMap<u8, u32> {
        let mut entries: Vec<(u8, f64)> = self
            .percentages_in_zones
            .iter()
            .map(|(&id, &fraction)| (id, fraction * 100.0))
            .collect();
        entries.sort_by_key(|&(id, _)| id);

        if entries.is_empty() || entries.iter().all(|&(_, raw)| raw <= 0.0) {
            return entries.into_iter().map(|(id, _)| (id, 0)).collect();
        }

        let mut smoothed: Vec<(u8, u32)> = entries
            .iter()
            .map(|&(id, raw)| (id, raw.floor() as u32))
            .collect();
        let floor_sum: u32 = smoothed.iter().map(|&(_, pct)| pct).sum();

        // Distribution order: largest fractional remainder first, ascending
        // zone id on ties.
        let mut by_remainder: Vec<usize> = (0..entries.len()).collect();
        by_remainder.sort_by(|&a, &b| {
            let remainder_a = entries[a].1 - entries[a].1.floor();
            let remainder_b = entries[b].1 - entries[b].1.floor();
            remainder_b
                .partial_cmp(&remainder_a)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(entries[a].0.cmp(&entries[b].0))
        });

        let mut shortfall = TOTAL_PERCENT.saturating_sub(floor_sum);
        let mut cursor = 0_usize;
        while shortfall > 0 {
            smoothed[by_remainder[cursor % by_remainder.len()]].1 += 1;
            cursor += 1;
            shortfall -= 1;
        }

        smoothed.into_iter().collect()
    }
}

/// Computes cumulative time and share per zone from pause-delimited
/// segments.
///
/// The elapsed time between two consecutive samples is attributed to the
/// zone of the first sample of the pair (left-closed attribution - the
/// statistics path deliberately skips the boundary splitting the graphing
/// path performs). Gaps between segments contribute nothing, so paused time
/// never counts.
#[derive(Debug, Clone, Copy)]
pub struct ZoneStatisticsAggregator<'a> {
    zone_set: &'a ZoneSet,
    max_bpm: u16,
}

impl<'a> ZoneStatisticsAggregator<'a> {
    /// Aggregate over `zone_set` with the given max BPM.
    #[must_use]
    pub const fn new(zone_set: &'a ZoneSet, max_bpm: u16) -> Self {
        Self { zone_set, max_bpm }
    }

    /// Compute statistics for the given segments.
    ///
    /// Every zone of the set appears in the output maps, zero-filled when it
    /// was never visited. Empty input yields zeroed statistics.
    #[must_use]
    pub fn aggregate(&self, segments: &[TimeSegment]) -> ZoneStatistics {
        // Thread-local accumulation per segment, merged at the end.
        let (time_in_zones, total) = segments
            .par_iter()
            .fold(
                || (self.zeroed_times(), 0.0_f64),
                |(mut times, mut total), segment| {
                    for pair in segment.samples.windows(2) {
                        let elapsed = elapsed_seconds(&pair[0], &pair[1]);
                        let zone = self.zone_set.zone_for_bpm(pair[0].value, self.max_bpm);
                        *times.entry(zone.id).or_insert(0.0) += elapsed;
                        total += elapsed;
                    }
                    (times, total)
                },
            )
            .reduce(
                || (self.zeroed_times(), 0.0_f64),
                |(mut left, left_total), (right, right_total)| {
                    for (id, seconds) in right {
                        *left.entry(id).or_insert(0.0) += seconds;
                    }
                    (left, left_total + right_total)
                },
            );

        let percentages_in_zones = if total > 0.0 {
            time_in_zones
                .iter()
                .map(|(&id, &seconds)| (id, seconds / total))
                .collect()
        } else {
            time_in_zones.keys().map(|&id| (id, 0.0)).collect()
        };

        debug!(
            segments = segments.len(),
            total_seconds = total,
            "zone statistics aggregated"
        );

        ZoneStatistics {
            time_in_zones,
            percentages_in_zones,
            total_time_seconds: total,
        }
    }

    /// Every zone of the set, zero-filled.
    fn zeroed_times(&self) -> HashMap<u8, f64> {
        self.zone_set
            .zones()
            .iter()
            .map(|zone| (zone.id, 0.0))
            .collect()
    }
}

/// Magnitude of the interval between two samples, in seconds.
///
/// Direction-agnostic, so a descending-ordered history replay aggregates
/// the same as a live ascending feed.
fn elapsed_seconds(first: &BpmSample, second: &BpmSample) -> f64 {
    ((second.timestamp - first.timestamp).num_milliseconds() as f64 / 1000.0).abs()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn stats_with_fractions(fractions: &[(u8, f64)]) -> ZoneStatistics {
        ZoneStatistics {
            time_in_zones: HashMap::new(),
            percentages_in_zones: fractions.iter().copied().collect(),
            total_time_seconds: 1.0,
        }
    }

    #[test]
    fn test_smoothing_distributes_shortfall_by_remainder() {
        let stats = stats_with_fractions(&[(0, 0.333), (1, 0.333), (2, 0.334)]);
        let smoothed = stats.smoothed_percentages();
        assert_eq!(smoothed[&0], 33);
        assert_eq!(smoothed[&1], 33);
        assert_eq!(smoothed[&2], 34);
        assert_eq!(smoothed.values().sum::<u32>(), 100);
    }

    #[test]
    fn test_smoothing_breaks_remainder_ties_by_ascending_id() {
        let stats = stats_with_fractions(&[(0, 0.335), (1, 0.335), (2, 0.33)]);
        let smoothed = stats.smoothed_percentages();
        assert_eq!(smoothed[&0], 34);
        assert_eq!(smoothed[&1], 33);
        assert_eq!(smoothed[&2], 33);
        assert_eq!(smoothed.values().sum::<u32>(), 100);
    }

    #[test]
    fn test_smoothing_cycles_when_floors_fall_far_short() {
        let stats = stats_with_fractions(&[(0, 0.333), (1, 0.333)]);
        let smoothed = stats.smoothed_percentages();
        assert_eq!(smoothed.values().sum::<u32>(), 100);
    }

    #[test]
    fn test_degenerate_statistics_smooth_to_zero() {
        let stats = stats_with_fractions(&[(0, 0.0), (1, 0.0)]);
        let smoothed = stats.smoothed_percentages();
        assert_eq!(smoothed[&0], 0);
        assert_eq!(smoothed[&1], 0);
    }
}
