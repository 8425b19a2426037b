// ABOUTME: Validated zone tables and BPM-to-zone lookup
// ABOUTME: Classification is total via boundary clamping; movement derives from bound comparison
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

use crate::errors::ZoneConfigError;
use crate::models::{Movement, Zone};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Outcome of re-evaluating the current zone against a fresh BPM reading.
///
/// `zone` is `None` exactly when the reading stayed in the current zone; the
/// caller must not re-enter the zone it is already in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmChange {
    /// Direction of the change
    pub movement: Movement,
    /// The newly matched zone, absent on `Stay`
    pub zone: Option<Zone>,
}

/// An ordered, contiguous, total-coverage set of heart rate zones.
///
/// Construction validates the table invariants once; afterwards every lookup
/// is total - out-of-range readings clamp to the nearest boundary zone, so
/// "not found" cannot happen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneSet {
    zones: Vec<Zone>,
}

impl ZoneSet {
    /// Build a validated zone set.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneConfigError`] when the table is empty, ids are not
    /// strictly ascending, a range is empty, adjacent ranges do not share a
    /// boundary, coverage is not the full 0-100% band, or the target flag is
    /// not on exactly one zone.
    pub fn new(zones: Vec<Zone>) -> Result<Self, ZoneConfigError> {
        let Some(first) = zones.first() else {
            return Err(ZoneConfigError::EmptyZoneSet);
        };
        let last = &zones[zones.len() - 1];
        if first.range.lower != 0 || last.range.upper != 100 {
            return Err(ZoneConfigError::IncompleteCoverage {
                lower: first.range.lower,
                upper: last.range.upper,
            });
        }
        for zone in &zones {
            if zone.range.lower >= zone.range.upper {
                return Err(ZoneConfigError::EmptyZoneRange {
                    id: zone.id,
                    lower: zone.range.lower,
                    upper: zone.range.upper,
                });
            }
        }
        for pair in zones.windows(2) {
            if pair[1].id <= pair[0].id {
                return Err(ZoneConfigError::UnorderedZoneIds { id: pair[1].id });
            }
            if pair[0].range.upper != pair[1].range.lower {
                return Err(ZoneConfigError::NonContiguousRanges {
                    upper: pair[0].range.upper,
                    lower: pair[1].range.lower,
                });
            }
        }
        let target_count = zones.iter().filter(|zone| zone.is_target).count();
        if target_count != 1 {
            return Err(ZoneConfigError::TargetZoneCount {
                count: target_count,
            });
        }
        Ok(Self { zones })
    }

    /// The zones, ascending by id.
    #[must_use]
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    /// The zone the user trains in.
    #[must_use]
    pub fn target_zone(&self) -> &Zone {
        // Exactly one target zone exists after validation.
        self.zones
            .iter()
            .find(|zone| zone.is_target)
            .unwrap_or(&self.zones[0])
    }

    /// Look up a zone by id.
    #[must_use]
    pub fn zone_by_id(&self, id: u8) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// The zone containing `bpm`, clamped to the nearest boundary zone when
    /// the reading falls off either end of the scale. Never fails.
    #[must_use]
    pub fn zone_for_bpm(&self, bpm: i32, max_bpm: u16) -> &Zone {
        &self.zones[self.index_for_bpm(bpm, max_bpm)]
    }

    /// Index variant of [`Self::zone_for_bpm`] for walk-based callers.
    pub(crate) fn index_for_bpm(&self, bpm: i32, max_bpm: u16) -> usize {
        self.index_containing(bpm, max_bpm)
            .unwrap_or_else(|| self.clamped_index(bpm, max_bpm))
    }

    /// Index of the zone whose absolute range contains `bpm`, if any.
    ///
    /// Bands are half-open; the top zone owns its upper bound, so every
    /// boundary BPM belongs to exactly one zone.
    fn index_containing(&self, bpm: i32, max_bpm: u16) -> Option<usize> {
        let top = self.zones.len() - 1;
        self.zones.iter().enumerate().find_map(|(index, zone)| {
            let lower = zone.lower_bpm(max_bpm);
            let upper = zone.upper_bpm(max_bpm);
            let inside = bpm >= lower && (bpm < upper || (index == top && bpm == upper));
            inside.then_some(index)
        })
    }

    /// Nearest boundary zone for an off-scale reading.
    fn clamped_index(&self, bpm: i32, max_bpm: u16) -> usize {
        if bpm < self.zones[0].lower_bpm(max_bpm) {
            trace!(
                bpm,
                clamped_to = %self.zones[0].name,
                "BPM below scale, clamping to lowest zone"
            );
            0
        } else {
            let top = self.zones.len() - 1;
            trace!(
                bpm,
                clamped_to = %self.zones[top].name,
                "BPM above scale, clamping to highest zone"
            );
            top
        }
    }

    /// Re-evaluate the current zone against a fresh reading.
    ///
    /// Off-scale readings clamp and report `Undefined` movement; an unset
    /// current zone also reports `Undefined`. A reading inside the current
    /// zone reports `Stay` with no zone payload. Otherwise the movement is
    /// `Up` when every BPM of the current zone sits below the matched zone
    /// and `Down` otherwise - bound comparison rather than id arithmetic, so
    /// the semantics hold for any ordered zone table.
    #[must_use]
    pub fn evaluate_bpm_change(
        &self,
        current: Option<&Zone>,
        bpm: i32,
        max_bpm: u16,
    ) -> BpmChange {
        let Some(matched) = self
            .index_containing(bpm, max_bpm)
            .map(|index| &self.zones[index])
        else {
            let clamped = &self.zones[self.clamped_index(bpm, max_bpm)];
            return BpmChange {
                movement: Movement::Undefined,
                zone: Some(clamped.clone()),
            };
        };
        match current {
            None => BpmChange {
                movement: Movement::Undefined,
                zone: Some(matched.clone()),
            },
            Some(current) if current.id == matched.id => BpmChange {
                movement: Movement::Stay,
                zone: None,
            },
            Some(current) => {
                let movement = if current.upper_bpm(max_bpm) <= matched.lower_bpm(max_bpm) {
                    Movement::Up
                } else {
                    Movement::Down
                };
                BpmChange {
                    movement,
                    zone: Some(matched.clone()),
                }
            }
        }
    }
}
