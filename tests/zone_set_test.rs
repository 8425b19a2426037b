// ABOUTME: Tests for zone lookup totality, clamping, and movement evaluation
// ABOUTME: Validates coverage over the full BPM range and movement symmetry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

use pulse_zones::{Movement, PercentRange, Zone, ZoneColor, ZoneConfigError, ZoneEngineConfig, ZoneSet};

const MAX_BPM: u16 = 195;

fn default_zone_set() -> ZoneSet {
    ZoneEngineConfig::default().zone_set().unwrap()
}

#[test]
fn test_every_bpm_classifies() {
    let zone_set = default_zone_set();
    for bpm in -1000..=1000 {
        let zone = zone_set.zone_for_bpm(bpm, MAX_BPM);
        assert!(zone.id <= 3, "bpm {bpm} classified outside the table");
    }
}

#[test]
fn test_clamping_at_both_ends() {
    let zone_set = default_zone_set();
    assert_eq!(zone_set.zone_for_bpm(-1000, MAX_BPM).id, 0);
    assert_eq!(zone_set.zone_for_bpm(0, MAX_BPM).id, 0);
    assert_eq!(zone_set.zone_for_bpm(195, MAX_BPM).id, 3);
    assert_eq!(zone_set.zone_for_bpm(1000, MAX_BPM).id, 3);
}

#[test]
fn test_movement_symmetry() {
    let zone_set = default_zone_set();
    let recovery = zone_set.zone_by_id(0).unwrap().clone();
    let endurance = zone_set.zone_by_id(1).unwrap().clone();

    let up = zone_set.evaluate_bpm_change(Some(&recovery), 130, MAX_BPM);
    assert_eq!(up.movement, Movement::Up);
    assert_eq!(up.zone.as_ref().map(|z| z.id), Some(1));

    let down = zone_set.evaluate_bpm_change(Some(&endurance), 100, MAX_BPM);
    assert_eq!(down.movement, Movement::Down);
    assert_eq!(down.zone.as_ref().map(|z| z.id), Some(0));
}

#[test]
fn test_same_zone_reports_stay_without_payload() {
    let zone_set = default_zone_set();
    let recovery = zone_set.zone_by_id(0).unwrap().clone();
    let change = zone_set.evaluate_bpm_change(Some(&recovery), 90, MAX_BPM);
    assert_eq!(change.movement, Movement::Stay);
    assert!(change.zone.is_none());
}

#[test]
fn test_uninitialized_current_reports_undefined() {
    let zone_set = default_zone_set();
    let change = zone_set.evaluate_bpm_change(None, 150, MAX_BPM);
    assert_eq!(change.movement, Movement::Undefined);
    assert_eq!(change.zone.map(|z| z.id), Some(2));
}

#[test]
fn test_off_scale_reports_undefined_with_clamped_zone() {
    let zone_set = default_zone_set();
    let tempo = zone_set.zone_by_id(2).unwrap().clone();
    let change = zone_set.evaluate_bpm_change(Some(&tempo), 250, MAX_BPM);
    assert_eq!(change.movement, Movement::Undefined);
    assert_eq!(change.zone.map(|z| z.id), Some(3));
}

#[test]
fn test_multi_zone_movement_derives_from_bounds() {
    let zone_set = default_zone_set();
    let recovery = zone_set.zone_by_id(0).unwrap().clone();
    let peak = zone_set.zone_by_id(3).unwrap().clone();

    let up = zone_set.evaluate_bpm_change(Some(&recovery), 180, MAX_BPM);
    assert_eq!(up.movement, Movement::Up);
    assert_eq!(up.zone.map(|z| z.id), Some(3));

    let down = zone_set.evaluate_bpm_change(Some(&peak), 50, MAX_BPM);
    assert_eq!(down.movement, Movement::Down);
    assert_eq!(down.zone.map(|z| z.id), Some(0));
}

#[test]
fn test_bpm_ratio_tracks_position_in_zone() {
    let zone_set = default_zone_set();
    let endurance = zone_set.zone_by_id(1).unwrap();
    // Endurance spans 117..146 BPM at max 195.
    assert!((endurance.bpm_ratio(117, MAX_BPM) - 0.0).abs() < f64::EPSILON);
    assert!((endurance.bpm_ratio(146, MAX_BPM) - 1.0).abs() < f64::EPSILON);
    assert!((endurance.bpm_ratio(131, MAX_BPM) - 14.0 / 29.0).abs() < 1e-12);
    assert!((endurance.bpm_ratio(60, MAX_BPM) - 0.0).abs() < f64::EPSILON);
}

fn raw_zone(id: u8, lower: u8, upper: u8, is_target: bool) -> Zone {
    Zone::new(
        id,
        format!("zone-{id}"),
        ZoneColor::new(0, 0, 0),
        PercentRange::new(lower, upper),
        is_target,
    )
}

#[test]
fn test_validation_rejects_empty_table() {
    assert_eq!(ZoneSet::new(Vec::new()).unwrap_err(), ZoneConfigError::EmptyZoneSet);
}

#[test]
fn test_validation_rejects_unordered_ids() {
    let result = ZoneSet::new(vec![
        raw_zone(1, 0, 50, true),
        raw_zone(0, 50, 100, false),
    ]);
    assert_eq!(result.unwrap_err(), ZoneConfigError::UnorderedZoneIds { id: 0 });
}

#[test]
fn test_validation_rejects_partial_coverage() {
    let result = ZoneSet::new(vec![
        raw_zone(0, 10, 50, true),
        raw_zone(1, 50, 100, false),
    ]);
    assert_eq!(
        result.unwrap_err(),
        ZoneConfigError::IncompleteCoverage { lower: 10, upper: 100 }
    );
}

#[test]
fn test_validation_rejects_two_targets() {
    let result = ZoneSet::new(vec![
        raw_zone(0, 0, 50, true),
        raw_zone(1, 50, 100, true),
    ]);
    assert_eq!(result.unwrap_err(), ZoneConfigError::TargetZoneCount { count: 2 });
}
