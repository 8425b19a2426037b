// ABOUTME: Linear interpolation of zone boundary crossing timestamps
// ABOUTME: Positional between two samples, so ascending and descending traces both work

use crate::models::BpmSample;
use chrono::{DateTime, Duration, Utc};

/// Timestamp at which the trace between two samples crosses `target_bpm`.
///
/// Linear interpolation on the BPM value: with
/// `ratio = (target - start) / (end - start)`, the crossing sits at
/// `start.timestamp + ratio * (end.timestamp - start.timestamp)`. No
/// clamping is applied; callers invoke this only with a target between the
/// two sample values, which a zone transition between the samples
/// guarantees. The formula is positional rather than chronological, so it
/// serves descending-time traces unchanged.
///
/// Equal sample values are a caller contract violation (the ratio would
/// divide by zero); adjacent samples in the same zone never reach here.
#[must_use]
pub fn interpolate_timestamp(
    start: &BpmSample,
    end: &BpmSample,
    target_bpm: i32,
) -> DateTime<Utc> {
    debug_assert_ne!(
        start.value, end.value,
        "interpolation requires distinct BPM endpoints"
    );
    let ratio = f64::from(target_bpm - start.value) / f64::from(end.value - start.value);
    let span_ms = (end.timestamp - start.timestamp).num_milliseconds();
    let offset_ms = (ratio * span_ms as f64).round() as i64;
    start.timestamp + Duration::milliseconds(offset_ms)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample(value: i32, seconds: i64) -> BpmSample {
        BpmSample::new(value, DateTime::from_timestamp(seconds, 0).unwrap())
    }

    #[test]
    fn test_midpoint_bpm_yields_midpoint_timestamp() {
        let start = sample(100, 100);
        let end = sample(120, 200);
        let crossing = interpolate_timestamp(&start, &end, 110);
        assert_eq!(crossing, DateTime::from_timestamp(150, 0).unwrap());
    }

    #[test]
    fn test_quarter_position() {
        let start = sample(100, 0);
        let end = sample(140, 80);
        let crossing = interpolate_timestamp(&start, &end, 110);
        assert_eq!(crossing, DateTime::from_timestamp(20, 0).unwrap());
    }

    #[test]
    fn test_descending_time_order() {
        // Historical replay hands the later sample first.
        let start = sample(120, 200);
        let end = sample(100, 100);
        let crossing = interpolate_timestamp(&start, &end, 110);
        assert_eq!(crossing, DateTime::from_timestamp(150, 0).unwrap());
    }

    #[test]
    fn test_descending_bpm_trend() {
        let start = sample(140, 0);
        let end = sample(100, 100);
        let crossing = interpolate_timestamp(&start, &end, 130);
        assert_eq!(crossing, DateTime::from_timestamp(25, 0).unwrap());
    }
}
