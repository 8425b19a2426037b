// ABOUTME: Heart rate zone classification engine for workout tracking
// ABOUTME: Zone lookup, segment reconstruction, hysteresis state machine, and statistics
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

#![deny(unsafe_code)]

//! # Pulse Zones
//!
//! Heart-rate-zone classification engine: turns a stream of timestamped BPM
//! samples into a stable current-zone signal with hysteresis, a zone-colored
//! segment trace for graphing, and time/percentage-in-zone statistics for a
//! workout.
//!
//! The crate is a synchronous, pure-computation core. Sensor acquisition,
//! rendering, persistence, and audio/haptic alerting belong to the host
//! application; the seams are the [`AlertSettings`] trait, the
//! [`ZoneEngineConfig`] provider, and the plain serializable data models.
//!
//! ## Modules
//!
//! - **models**: core data types (`Zone`, `BpmSample`, `Segment`, ...)
//! - **zones**: validated zone tables and BPM-to-zone lookup with clamping
//! - **interpolate**: boundary-crossing timestamp interpolation
//! - **segments**: colored segment reconstruction for graphing
//! - **state_machine**: current-zone tracking with target-zone hysteresis
//! - **statistics**: pause-aware time-in-zone aggregation
//! - **config**: environment-driven zone configuration provider

/// Zone table validation errors
pub mod errors;

/// Named defaults for the zone scheme, hysteresis, and percentage smoothing
pub mod constants;

/// Core data models (`Zone`, `BpmSample`, `Movement`, `Segment`, ...)
pub mod models;

/// Validated zone tables and BPM-to-zone lookup with clamping
pub mod zones;

/// Linear interpolation of zone-boundary crossing timestamps
pub mod interpolate;

/// Zone-colored segment reconstruction for graph rendering
pub mod segments;

/// Current-zone state machine with selective hysteresis
pub mod state_machine;

/// Per-zone residency time and smoothed percentage statistics
pub mod statistics;

/// Environment-driven configuration provider for zones and alert settings
pub mod config;

pub use config::ZoneEngineConfig;
pub use errors::ZoneConfigError;
pub use interpolate::interpolate_timestamp;
pub use models::{BpmSample, Movement, PercentRange, Segment, TimeSegment, Zone, ZoneColor};
pub use segments::SegmentBuilder;
pub use state_machine::{AlertSettings, ZoneChangeEvent, ZoneStateMachine};
pub use statistics::{ZoneStatistics, ZoneStatisticsAggregator};
pub use zones::{BpmChange, ZoneSet};
