// ABOUTME: Named defaults for the zone scheme, hysteresis, and percentage smoothing
// ABOUTME: Grouped by domain so call sites read as prose

/// Default four-zone percentage scheme and scale ceiling.
pub mod zone_defaults {
    /// Default maximum heart rate (BPM) when the host supplies none.
    pub const DEFAULT_MAX_BPM: u16 = 195;

    /// Upper bound of the recovery zone, percent of max BPM.
    pub const RECOVERY_UPPER_PERCENT: u8 = 60;

    /// Upper bound of the endurance zone, percent of max BPM.
    pub const ENDURANCE_UPPER_PERCENT: u8 = 75;

    /// Upper bound of the tempo (default target) zone, percent of max BPM.
    pub const TEMPO_UPPER_PERCENT: u8 = 85;

    /// Full scale; the peak zone always ends here.
    pub const FULL_SCALE_PERCENT: u8 = 100;

    /// Id of the default target zone (tempo).
    pub const DEFAULT_TARGET_ZONE_ID: u8 = 2;
}

/// Hysteresis applied when leaving the target zone.
pub mod hysteresis {
    /// Consecutive identical candidate observations required before a
    /// target-zone exit commits. One spurious reading at the boundary
    /// therefore never alerts.
    pub const TARGET_EXIT_RUN_THRESHOLD: u32 = 2;
}

/// Percentage smoothing for displayed statistics.
pub mod smoothing {
    /// Smoothed per-zone percentages always total exactly this.
    pub const TOTAL_PERCENT: u32 = 100;
}
