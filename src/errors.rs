// ABOUTME: Error types for zone table construction and validation
// ABOUTME: Runtime classification never fails; only malformed configuration errors here
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

use thiserror::Error;

/// Errors raised while constructing a validated zone table.
///
/// Classification itself is total: out-of-range BPM values clamp to the
/// nearest boundary zone and never produce an error. Everything that can go
/// wrong is caught once, when the configuration provider builds the
/// [`ZoneSet`](crate::zones::ZoneSet).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ZoneConfigError {
    /// A zone set must contain at least one zone.
    #[error("zone set must contain at least one zone")]
    EmptyZoneSet,

    /// Zone ids must be strictly ascending.
    #[error("zone ids must be strictly ascending: zone {id} is out of order")]
    UnorderedZoneIds {
        /// Id of the first zone found out of order
        id: u8,
    },

    /// A zone's bounds must satisfy `lower < upper`.
    #[error("zone {id} has an empty range: {lower}%..{upper}%")]
    EmptyZoneRange {
        /// Id of the offending zone
        id: u8,
        /// Lower bound, percent of max BPM
        lower: u8,
        /// Upper bound, percent of max BPM
        upper: u8,
    },

    /// Adjacent zones must share a boundary percentage.
    #[error("zone ranges must be contiguous: {upper}% is followed by {lower}%")]
    NonContiguousRanges {
        /// Upper bound of the earlier zone
        upper: u8,
        /// Lower bound of the later zone
        lower: u8,
    },

    /// The set must cover the full 0-100 percent band of max BPM.
    #[error("zone set must cover 0-100% of max BPM, covers {lower}%-{upper}%")]
    IncompleteCoverage {
        /// Lower bound of the first zone
        lower: u8,
        /// Upper bound of the last zone
        upper: u8,
    },

    /// Exactly one zone must be flagged as the target zone.
    #[error("exactly one target zone required, found {count}")]
    TargetZoneCount {
        /// Number of zones carrying the target flag
        count: usize,
    },

    /// Max BPM must be positive for percentage bands to be meaningful.
    #[error("max BPM must be positive")]
    ZeroMaxBpm,
}
