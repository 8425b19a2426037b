// ABOUTME: Zone configuration provider with compiled-in defaults and env overrides
// ABOUTME: Builds the validated ZoneSet and supplies alert settings at decision time
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pulse Fitness

use crate::constants::zone_defaults::{
    DEFAULT_MAX_BPM, DEFAULT_TARGET_ZONE_ID, ENDURANCE_UPPER_PERCENT, FULL_SCALE_PERCENT,
    RECOVERY_UPPER_PERCENT, TEMPO_UPPER_PERCENT,
};
use crate::errors::ZoneConfigError;
use crate::models::{PercentRange, Zone, ZoneColor};
use crate::state_machine::AlertSettings;
use crate::zones::ZoneSet;
use serde::{Deserialize, Serialize};
use std::env;

/// Default render colors, low zone to high.
const RECOVERY_COLOR: ZoneColor = ZoneColor::new(52, 120, 246);
const ENDURANCE_COLOR: ZoneColor = ZoneColor::new(88, 189, 103);
const TEMPO_COLOR: ZoneColor = ZoneColor::new(250, 179, 53);
const PEAK_COLOR: ZoneColor = ZoneColor::new(237, 66, 69);

/// Zone engine configuration - the configuration-provider collaborator.
///
/// Defaults to the four-zone scheme over a max BPM of 195 with the tempo
/// zone as target. Every field can be overridden from the environment, the
/// same way the host's other subsystems configure themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneEngineConfig {
    /// Maximum heart rate the percentage bands scale against
    pub max_bpm: u16,
    /// Id of the zone the user trains in
    pub target_zone_id: u8,
    /// Upper bound of the recovery zone, percent of max BPM
    pub recovery_upper_percent: u8,
    /// Upper bound of the endurance zone, percent of max BPM
    pub endurance_upper_percent: u8,
    /// Upper bound of the tempo zone, percent of max BPM
    pub tempo_upper_percent: u8,
    /// Alert when leaving the target zone
    pub target_zone_alert_enabled: bool,
    /// Alert on every zone boundary pass
    pub zone_pass_alert_enabled: bool,
}

impl Default for ZoneEngineConfig {
    fn default() -> Self {
        Self {
            max_bpm: DEFAULT_MAX_BPM,
            target_zone_id: DEFAULT_TARGET_ZONE_ID,
            recovery_upper_percent: RECOVERY_UPPER_PERCENT,
            endurance_upper_percent: ENDURANCE_UPPER_PERCENT,
            tempo_upper_percent: TEMPO_UPPER_PERCENT,
            target_zone_alert_enabled: true,
            zone_pass_alert_enabled: true,
        }
    }
}

impl ZoneEngineConfig {
    /// Load configuration from the environment, falling back to the default
    /// for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_bpm: env::var("PULSE_ZONES_MAX_BPM")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_MAX_BPM),
            target_zone_id: env::var("PULSE_ZONES_TARGET_ZONE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TARGET_ZONE_ID),
            recovery_upper_percent: env::var("PULSE_ZONES_RECOVERY_UPPER_PERCENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(RECOVERY_UPPER_PERCENT),
            endurance_upper_percent: env::var("PULSE_ZONES_ENDURANCE_UPPER_PERCENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(ENDURANCE_UPPER_PERCENT),
            tempo_upper_percent: env::var("PULSE_ZONES_TEMPO_UPPER_PERCENT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(TEMPO_UPPER_PERCENT),
            target_zone_alert_enabled: env::var("PULSE_ZONES_TARGET_ALERT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            zone_pass_alert_enabled: env::var("PULSE_ZONES_PASS_ALERT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
        }
    }

    /// Build the validated zone set this configuration describes.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneConfigError`] when max BPM is zero, the boundary
    /// percentages are not strictly ascending below 100, or the target id
    /// names no zone.
    pub fn zone_set(&self) -> Result<ZoneSet, ZoneConfigError> {
        if self.max_bpm == 0 {
            return Err(ZoneConfigError::ZeroMaxBpm);
        }
        let bands = [
            (0_u8, "Recovery", RECOVERY_COLOR, 0, self.recovery_upper_percent),
            (
                1,
                "Endurance",
                ENDURANCE_COLOR,
                self.recovery_upper_percent,
                self.endurance_upper_percent,
            ),
            (
                2,
                "Tempo",
                TEMPO_COLOR,
                self.endurance_upper_percent,
                self.tempo_upper_percent,
            ),
            (
                3,
                "Peak",
                PEAK_COLOR,
                self.tempo_upper_percent,
                FULL_SCALE_PERCENT,
            ),
        ];
        let zones = bands
            .into_iter()
            .map(|(id, name, color, lower, upper)| {
                Zone::new(
                    id,
                    name,
                    color,
                    PercentRange::new(lower, upper),
                    id == self.target_zone_id,
                )
            })
            .collect();
        ZoneSet::new(zones)
    }
}

impl AlertSettings for ZoneEngineConfig {
    fn target_zone_alert_enabled(&self) -> bool {
        self.target_zone_alert_enabled
    }

    fn zone_pass_alert_enabled(&self) -> bool {
        self.zone_pass_alert_enabled
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scheme_is_valid() {
        let zone_set = ZoneEngineConfig::default().zone_set().unwrap();
        assert_eq!(zone_set.zones().len(), 4);
        assert_eq!(zone_set.target_zone().id, 2);
        assert_eq!(zone_set.target_zone().name, "Tempo");
    }

    #[test]
    fn test_zero_max_bpm_is_rejected() {
        let config = ZoneEngineConfig {
            max_bpm: 0,
            ..ZoneEngineConfig::default()
        };
        assert_eq!(config.zone_set().unwrap_err(), ZoneConfigError::ZeroMaxBpm);
    }

    #[test]
    fn test_unknown_target_id_is_rejected() {
        let config = ZoneEngineConfig {
            target_zone_id: 9,
            ..ZoneEngineConfig::default()
        };
        assert_eq!(
            config.zone_set().unwrap_err(),
            ZoneConfigError::TargetZoneCount { count: 0 }
        );
    }

    #[test]
    fn test_misordered_boundaries_are_rejected() {
        let config = ZoneEngineConfig {
            recovery_upper_percent: 80,
            endurance_upper_percent: 75,
            ..ZoneEngineConfig::default()
        };
        assert!(config.zone_set().is_err());
    }
}
