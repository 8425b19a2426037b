// ABOUTME: Reconstructs zone-colored line segments from a BPM time series
// ABOUTME: Synthesizes boundary crossing points and marginal segments for skipped zones
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

use crate::interpolate::interpolate_timestamp;
use crate::models::{BpmSample, Segment, Zone};
use crate::zones::ZoneSet;
use rayon::prelude::*;
use tracing::debug;

/// Rebuilds a continuously colored trace from a flat BPM series.
///
/// Consecutive samples in one zone accumulate into a single [`Segment`]; at
/// a zone change the exact boundary crossing is interpolated and inserted on
/// both sides of the cut, so a renderer can switch color precisely at the
/// boundary instead of at the nearest raw sample. A jump across more than
/// one boundary with no sample in between emits one full-width "marginal"
/// segment per skipped zone, keeping the drawn line continuous through zones
/// the sensor never reported from.
///
/// The walk is positional, so a trace iterated in descending timestamp order
/// produces the mirror image of its ascending rendering.
#[derive(Debug, Clone, Copy)]
pub struct SegmentBuilder<'a> {
    zone_set: &'a ZoneSet,
    max_bpm: u16,
}

impl<'a> SegmentBuilder<'a> {
    /// Build over `zone_set` with the given max BPM.
    #[must_use]
    pub const fn new(zone_set: &'a ZoneSet, max_bpm: u16) -> Self {
        Self { zone_set, max_bpm }
    }

    /// Reconstruct the colored segments of `samples`.
    ///
    /// Empty input yields no segments; a single sample yields one
    /// single-sample segment colored by its zone.
    #[must_use]
    pub fn build(&self, samples: &[BpmSample]) -> Vec<Segment> {
        let Some(last_sample) = samples.last() else {
            return Vec::new();
        };

        // Parallel classification pass; the walk below is order-dependent
        // and stays sequential.
        let indices: Vec<usize> = samples
            .par_iter()
            .map(|sample| self.zone_set.index_for_bpm(sample.value, self.max_bpm))
            .collect();

        let zones = self.zone_set.zones();
        let mut segments = Vec::new();
        let mut open: Vec<BpmSample> = Vec::new();

        for i in 1..samples.len() {
            let (prev_idx, next_idx) = (indices[i - 1], indices[i]);
            open.push(samples[i - 1]);
            if prev_idx == next_idx {
                continue;
            }

            let (from, to) = (&samples[i - 1], &samples[i]);
            let prev_zone = &zones[prev_idx];
            let next_zone = &zones[next_idx];
            let moving_up = prev_zone.id < next_zone.id;

            // Close the open segment at the exact exit boundary.
            let exit_bpm = if moving_up {
                prev_zone.upper_bpm(self.max_bpm)
            } else {
                prev_zone.lower_bpm(self.max_bpm)
            };
            open.push(BpmSample::new(
                exit_bpm,
                interpolate_timestamp(from, to, exit_bpm),
            ));
            segments.push(Segment {
                zone_id: prev_zone.id,
                color: prev_zone.color,
                samples: std::mem::take(&mut open),
            });

            // Full-width marginal segments for zones the jump skipped.
            if next_idx.abs_diff(prev_idx) > 1 {
                debug!(
                    from_zone = prev_zone.id,
                    to_zone = next_zone.id,
                    skipped = next_idx.abs_diff(prev_idx) - 1,
                    "multi-zone jump, synthesizing marginal segments"
                );
                self.push_marginals(&mut segments, prev_idx, next_idx, from, to);
            }

            // Open the next segment at the exact entry boundary.
            let entry_bpm = if moving_up {
                next_zone.lower_bpm(self.max_bpm)
            } else {
                next_zone.upper_bpm(self.max_bpm)
            };
            open.push(BpmSample::new(
                entry_bpm,
                interpolate_timestamp(from, to, entry_bpm),
            ));
        }

        open.push(*last_sample);
        let final_zone = &zones[indices[indices.len() - 1]];
        segments.push(Segment {
            zone_id: final_zone.id,
            color: final_zone.color,
            samples: open,
        });
        segments
    }

    /// Emit a two-point segment per zone strictly between `prev_idx` and
    /// `next_idx`, walking in travel direction.
    fn push_marginals(
        &self,
        segments: &mut Vec<Segment>,
        prev_idx: usize,
        next_idx: usize,
        from: &BpmSample,
        to: &BpmSample,
    ) {
        let zones = self.zone_set.zones();
        let moving_up = prev_idx < next_idx;
        let skipped: Vec<&Zone> = if moving_up {
            zones[prev_idx + 1..next_idx].iter().collect()
        } else {
            zones[next_idx + 1..prev_idx].iter().rev().collect()
        };
        for zone in skipped {
            let (entry_bpm, exit_bpm) = if moving_up {
                (zone.lower_bpm(self.max_bpm), zone.upper_bpm(self.max_bpm))
            } else {
                (zone.upper_bpm(self.max_bpm), zone.lower_bpm(self.max_bpm))
            };
            segments.push(Segment {
                zone_id: zone.id,
                color: zone.color,
                samples: vec![
                    BpmSample::new(entry_bpm, interpolate_timestamp(from, to, entry_bpm)),
                    BpmSample::new(exit_bpm, interpolate_timestamp(from, to, exit_bpm)),
                ],
            });
        }
    }
}
