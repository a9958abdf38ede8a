//! Setup candidate lists shown to the user before a session starts.
//!
//! Both generators are pure: they take "now" (or the chosen start) as input
//! and produce labeled values, no I/O.

use chrono::{DateTime, Duration, Local, Timelike};

use crate::config::SessionConfig;
use crate::timefmt::{end_time_for_cycles, format_time};

/// A labeled candidate value for a select prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption<T> {
    pub label: String,
    pub value: T,
}

/// Round `now` down to the nearest 5-minute boundary, seconds zeroed.
fn round_to_boundary(now: DateTime<Local>) -> DateTime<Local> {
    let minute = now.minute() - now.minute() % 5;
    now.with_second(0)
        .and_then(|t| t.with_nanosecond(0))
        .and_then(|t| t.with_minute(minute))
        .unwrap_or(now)
}

/// Nine start-time candidates at 5-minute increments, from 20 minutes
/// before to 20 minutes after `now` rounded down to a 5-minute boundary.
pub fn start_time_options(now: DateTime<Local>) -> Vec<SelectOption<DateTime<Local>>> {
    let base = round_to_boundary(now);
    (-4i64..=4)
        .map(|step| {
            let time = base + Duration::minutes(step * 5);
            SelectOption {
                label: format_time(time),
                value: time,
            }
        })
        .collect()
}

/// Cycle-count candidates 2 through 8, each labeled with the projected
/// session end time.
pub fn cycle_options(
    start: DateTime<Local>,
    config: &SessionConfig,
) -> Vec<SelectOption<u32>> {
    (2..=8)
        .map(|cycles| {
            let end = end_time_for_cycles(start, cycles, config);
            SelectOption {
                label: format!("{cycles} cycles (until {})", format_time(end)),
                value: cycles,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2026, 3, 2, h, m, s).unwrap()
    }

    #[test]
    fn nine_options_five_minutes_apart() {
        let opts = start_time_options(local(10, 17, 42));
        assert_eq!(opts.len(), 9);
        for pair in opts.windows(2) {
            assert_eq!(pair[1].value - pair[0].value, Duration::minutes(5));
        }
    }

    #[test]
    fn options_center_on_rounded_now() {
        let opts = start_time_options(local(10, 17, 42));
        assert_eq!(opts[4].value, local(10, 15, 0));
        assert_eq!(opts[0].value, local(9, 55, 0));
        assert_eq!(opts[8].value, local(10, 35, 0));
    }

    #[test]
    fn boundary_time_stays_put() {
        let opts = start_time_options(local(10, 15, 0));
        assert_eq!(opts[4].value, local(10, 15, 0));
    }

    #[test]
    fn labels_are_clock_times() {
        let opts = start_time_options(local(10, 17, 0));
        assert_eq!(opts[4].label, "10:15");
    }

    #[test]
    fn seven_cycle_options_from_two_to_eight() {
        let cfg = SessionConfig::default();
        let opts = cycle_options(local(9, 0, 0), &cfg);
        assert_eq!(opts.len(), 7);
        assert_eq!(opts.first().map(|o| o.value), Some(2));
        assert_eq!(opts.last().map(|o| o.value), Some(8));
    }

    #[test]
    fn cycle_labels_carry_projected_end() {
        let cfg = SessionConfig::default();
        let start = local(9, 0, 0);
        for opt in cycle_options(start, &cfg) {
            let end = end_time_for_cycles(start, opt.value, &cfg);
            assert_eq!(
                opt.label,
                format!("{} cycles (until {})", opt.value, format_time(end))
            );
        }
    }
}
