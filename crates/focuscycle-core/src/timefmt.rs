//! Clock-time formatting and cycle arithmetic.

use chrono::{DateTime, Local};

use crate::config::SessionConfig;

/// 24-hour `"HH:MM"` rendering in the local timezone.
pub fn format_time(t: DateTime<Local>) -> String {
    t.format("%H:%M").to_string()
}

/// `"HH:MM:SS"` rendering, used for log entry timestamps.
pub fn format_timestamp(t: DateTime<Local>) -> String {
    t.format("%H:%M:%S").to_string()
}

/// Projected session end: `start + cycles * (work + break)`.
pub fn end_time_for_cycles(
    start: DateTime<Local>,
    cycles: u32,
    config: &SessionConfig,
) -> DateTime<Local> {
    start + config.cycle_duration() * cycles as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(h: u32, m: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 2, h, m, 0).unwrap()
    }

    #[test]
    fn formats_24_hour_time() {
        assert_eq!(format_time(local(9, 5)), "09:05");
        assert_eq!(format_time(local(23, 59)), "23:59");
    }

    #[test]
    fn timestamp_includes_seconds() {
        let t = Local.with_ymd_and_hms(2026, 3, 2, 9, 5, 7).unwrap();
        assert_eq!(format_timestamp(t), "09:05:07");
    }

    #[test]
    fn end_time_scales_linearly_with_cycles() {
        let cfg = SessionConfig::default();
        let start = local(9, 0);
        for n in 0..=8u32 {
            assert_eq!(
                end_time_for_cycles(start, n, &cfg),
                start + cfg.cycle_duration() * n as i32
            );
        }
    }

    #[test]
    fn zero_cycles_ends_at_start() {
        let cfg = SessionConfig::default();
        let start = local(14, 30);
        assert_eq!(end_time_for_cycles(start, 0, &cfg), start);
    }

    #[test]
    fn four_cycles_at_default_durations() {
        let cfg = SessionConfig::default();
        // 4 * 40min = 160min
        assert_eq!(end_time_for_cycles(local(9, 0), 4, &cfg), local(11, 40));
    }
}
