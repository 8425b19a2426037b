// ABOUTME: Core data models for zone classification
// ABOUTME: Zones, BPM samples, movement direction, and segment types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// RGB color a zone renders with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneColor {
    /// Red channel
    pub red: u8,
    /// Green channel
    pub green: u8,
    /// Blue channel
    pub blue: u8,
}

impl ZoneColor {
    /// Create a color from RGB channels.
    #[must_use]
    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }
}

/// Percentage band of max BPM a zone covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PercentRange {
    /// Lower bound, percent of max BPM (inclusive)
    pub lower: u8,
    /// Upper bound, percent of max BPM (exclusive, except for the top zone)
    pub upper: u8,
}

impl PercentRange {
    /// Create a band from its bounds.
    #[must_use]
    pub const fn new(lower: u8, upper: u8) -> Self {
        Self { lower, upper }
    }
}

/// A contiguous heart rate zone.
///
/// Zones are immutable once constructed; [`Zone::with_range`] produces a new
/// zone when bounds change. `id` defines the low-to-high ordering of the set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Identity and ordering, low to high
    pub id: u8,
    /// Display name
    pub name: String,
    /// Render color
    pub color: ZoneColor,
    /// Band of max BPM this zone covers
    pub range: PercentRange,
    /// Whether this is the zone the user trains in
    pub is_target: bool,
}

impl Zone {
    /// Create a zone.
    #[must_use]
    pub fn new(
        id: u8,
        name: impl Into<String>,
        color: ZoneColor,
        range: PercentRange,
        is_target: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            range,
            is_target,
        }
    }

    /// Replace the percentage bounds, producing a new zone.
    #[must_use]
    pub fn with_range(&self, range: PercentRange) -> Self {
        Self {
            range,
            ..self.clone()
        }
    }

    /// Absolute lower bound in BPM for the given max BPM.
    #[must_use]
    pub fn lower_bpm(&self, max_bpm: u16) -> i32 {
        percent_to_bpm(self.range.lower, max_bpm)
    }

    /// Absolute upper bound in BPM for the given max BPM.
    #[must_use]
    pub fn upper_bpm(&self, max_bpm: u16) -> i32 {
        percent_to_bpm(self.range.upper, max_bpm)
    }

    /// Linear position of `bpm` within this zone's absolute range, clamped
    /// to `[0, 1]`. Drives the in-zone gauge on the workout display.
    #[must_use]
    pub fn bpm_ratio(&self, bpm: i32, max_bpm: u16) -> f64 {
        let lower = f64::from(self.lower_bpm(max_bpm));
        let upper = f64::from(self.upper_bpm(max_bpm));
        if upper <= lower {
            return 0.0;
        }
        ((f64::from(bpm) - lower) / (upper - lower)).clamp(0.0, 1.0)
    }
}

/// Convert a percent-of-max bound to an absolute BPM bound.
fn percent_to_bpm(percent: u8, max_bpm: u16) -> i32 {
    (f64::from(percent) / 100.0 * f64::from(max_bpm)).floor() as i32
}

/// One instantaneous heart rate reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BpmSample {
    /// Heart rate in beats per minute
    pub value: i32,
    /// When the reading was taken
    pub timestamp: DateTime<Utc>,
}

impl BpmSample {
    /// Create a sample.
    #[must_use]
    pub const fn new(value: i32, timestamp: DateTime<Utc>) -> Self {
        Self { value, timestamp }
    }
}

/// Direction of a zone change between two classifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    /// Crossed into a higher zone
    Up,
    /// Crossed into a lower zone
    Down,
    /// Same zone as before
    Stay,
    /// No prior zone, or the reading fell outside every zone
    Undefined,
}

/// A maximal run of same-zone samples, possibly with synthetic boundary
/// samples at either end, colored for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Id of the zone the run lies in
    pub zone_id: u8,
    /// Render color of that zone
    pub color: ZoneColor,
    /// Ordered samples, raw and synthetic
    pub samples: Vec<BpmSample>,
}

/// A pause-delimited stretch of a workout: the samples recorded between a
/// start and an end with no interruption. Time between stretches (pauses)
/// never counts toward statistics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSegment {
    /// When the stretch began
    pub start: DateTime<Utc>,
    /// When the stretch ended
    pub end: DateTime<Utc>,
    /// Ordered BPM samples recorded during the stretch
    pub samples: Vec<BpmSample>,
}

impl TimeSegment {
    /// Create a stretch over `start..end` holding `samples`.
    #[must_use]
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, samples: Vec<BpmSample>) -> Self {
        Self {
            start,
            end,
            samples,
        }
    }
}
