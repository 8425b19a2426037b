// ABOUTME: Current-zone state machine with selective target-zone hysteresis
// ABOUTME: One BPM reading at a time; emits zone change events for the alert sink
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

use crate::constants::hysteresis::TARGET_EXIT_RUN_THRESHOLD;
use crate::models::{Movement, Zone};
use crate::zones::ZoneSet;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Alert configuration read at decision time, never cached.
///
/// Implemented by the host's configuration provider; the state machine
/// consults it on every reading so a setting flipped mid-workout takes
/// effect on the next sample.
pub trait AlertSettings {
    /// Whether leaving the target zone should alert (and therefore be
    /// guarded by hysteresis).
    fn target_zone_alert_enabled(&self) -> bool;

    /// Whether every zone boundary pass should alert.
    fn zone_pass_alert_enabled(&self) -> bool;
}

/// A committed zone change, handed to the alert sink and the UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneChangeEvent {
    /// Direction of the change
    pub movement: Movement,
    /// Zone the machine switched into
    pub zone: Zone,
    /// Zone the machine left, absent on the initial fix
    pub previous: Option<Zone>,
    /// Whether the sink should produce feedback, computed from the settings
    /// read at decision time; the sink owns the actual audio/haptic output
    pub should_alert: bool,
}

/// Run of consecutive identical candidate-zone observations.
///
/// Only the streak length matters, so a scalar counter stands in for the
/// grow-only sample container a naive implementation would keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
struct CandidateRun {
    zone_id: Option<u8>,
    length: u32,
}

impl CandidateRun {
    /// Record one observation of `zone_id`, returning the updated streak.
    fn observe(&mut self, zone_id: u8) -> u32 {
        if self.zone_id == Some(zone_id) {
            self.length += 1;
        } else {
            *self = Self {
                zone_id: Some(zone_id),
                length: 1,
            };
        }
        self.length
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Machine state: no zone assigned yet, or actively tracking one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum State {
    #[default]
    NotAvailable,
    Active {
        zone: Zone,
        candidate: CandidateRun,
    },
}

/// Tracks the wearer's current heart rate zone across a workout.
///
/// Feed readings one at a time, in arrival order, from a single logical
/// stream; the machine holds the only mutable state in the crate and is not
/// meant for concurrent use (serialize delivery before calling in).
///
/// Exits from the target zone are hysteresis-guarded while target alerting
/// is enabled: two consecutive identical candidates are required before the
/// switch commits, which keeps the alert from flapping when the heart rate
/// hovers at the target boundary. Every other boundary switches on the very
/// next reading.
#[derive(Debug, Clone, Default)]
pub struct ZoneStateMachine {
    state: State,
}

impl ZoneStateMachine {
    /// A machine with no zone assigned.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The currently tracked zone, if one has been assigned.
    #[must_use]
    pub fn current_zone(&self) -> Option<&Zone> {
        match &self.state {
            State::NotAvailable => None,
            State::Active { zone, .. } => Some(zone),
        }
    }

    /// Drop back to the unassigned state (workout teardown).
    pub fn reset(&mut self) {
        self.state = State::NotAvailable;
    }

    /// Process one BPM reading; returns the zone change it committed, if
    /// any. The caller forwards committed events to the alert sink.
    pub fn bpm_changed(
        &mut self,
        bpm: i32,
        zone_set: &ZoneSet,
        max_bpm: u16,
        settings: &dyn AlertSettings,
    ) -> Option<ZoneChangeEvent> {
        let (state, event) = Self::transition(
            std::mem::take(&mut self.state),
            bpm,
            zone_set,
            max_bpm,
            settings,
        );
        self.state = state;
        event
    }

    /// Pure transition table over the tagged state.
    fn transition(
        state: State,
        bpm: i32,
        zone_set: &ZoneSet,
        max_bpm: u16,
        settings: &dyn AlertSettings,
    ) -> (State, Option<ZoneChangeEvent>) {
        match state {
            State::NotAvailable => {
                let change = zone_set.evaluate_bpm_change(None, bpm, max_bpm);
                let movement = change.movement;
                change.zone.map_or((State::NotAvailable, None), |zone| {
                    debug!(zone = %zone.name, bpm, "initial heart rate zone assigned");
                    let event = ZoneChangeEvent {
                        movement,
                        zone: zone.clone(),
                        previous: None,
                        should_alert: false,
                    };
                    (
                        State::Active {
                            zone,
                            candidate: CandidateRun::default(),
                        },
                        Some(event),
                    )
                })
            }
            State::Active {
                zone,
                mut candidate,
            } => {
                let change = zone_set.evaluate_bpm_change(Some(&zone), bpm, max_bpm);
                let next = match change.zone {
                    Some(next) if next.id != zone.id => next,
                    // Stay, or an off-scale reading clamped into the current
                    // zone: the candidate streak is broken either way.
                    _ => {
                        candidate.reset();
                        return (State::Active { zone, candidate }, None);
                    }
                };

                let run = candidate.observe(next.id);
                let guarded = zone.is_target && settings.target_zone_alert_enabled();
                if guarded && run < TARGET_EXIT_RUN_THRESHOLD {
                    trace!(
                        candidate = %next.name,
                        run,
                        required = TARGET_EXIT_RUN_THRESHOLD,
                        "holding target zone, candidate streak too short"
                    );
                    return (State::Active { zone, candidate }, None);
                }

                let involves_target = zone.is_target || next.is_target;
                let should_alert = settings.zone_pass_alert_enabled()
                    || (involves_target && settings.target_zone_alert_enabled());
                debug!(
                    from = %zone.name,
                    to = %next.name,
                    movement = ?change.movement,
                    should_alert,
                    "zone change committed"
                );
                let event = ZoneChangeEvent {
                    movement: change.movement,
                    zone: next.clone(),
                    previous: Some(zone),
                    should_alert,
                };
                (
                    State::Active {
                        zone: next,
                        candidate: CandidateRun::default(),
                    },
                    Some(event),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_run_counts_identical_observations() {
        let mut run = CandidateRun::default();
        assert_eq!(run.observe(3), 1);
        assert_eq!(run.observe(3), 2);
        assert_eq!(run.observe(1), 1);
        run.reset();
        assert_eq!(run.observe(1), 1);
    }
}
