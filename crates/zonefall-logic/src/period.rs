//! Period math — where a challenge sits in its day/week timeline.
//!
//! All timestamps are microseconds since the Unix epoch, matching what the
//! database layer hands us. Periods are 1-based: period 1 starts at the
//! challenge start timestamp. 0 means "not started yet".

pub const MICROS_PER_DAY: i64 = 86_400_000_000;

/// Open-ended challenges default to this many day-periods.
pub const DEFAULT_CHALLENGE_DAYS: u32 = 30;

/// Total day-periods in `[start, end]`, rounding partial trailing days up.
/// A missing end date means `start + 30 days`. Never less than 1.
pub fn total_periods(start_micros: i64, end_micros: Option<i64>) -> u32 {
    let end = end_micros
        .unwrap_or(start_micros + DEFAULT_CHALLENGE_DAYS as i64 * MICROS_PER_DAY);
    if end <= start_micros {
        return 1;
    }
    let days = (end - start_micros + MICROS_PER_DAY - 1) / MICROS_PER_DAY;
    days as u32
}

/// 1-based day-period containing `now`, or 0 if the challenge has not
/// started. Day 1 covers the first 24 hours from the start timestamp.
pub fn current_period(start_micros: i64, now_micros: i64) -> u32 {
    if now_micros < start_micros {
        return 0;
    }
    ((now_micros - start_micros) / MICROS_PER_DAY + 1) as u32
}

/// 1-based week index for a 1-based day index: `ceil(day / 7)`.
pub fn week_index(day: u32) -> u32 {
    (day + 6) / 7
}

/// Whether `day` is a processing day for a weekly challenge.
///
/// Weekly challenges shrink once per week; the daily batch only touches
/// them on days that close out a week, plus the final day so the last
/// (possibly partial) week still gets its pass.
pub fn is_week_boundary(day: u32, total_days: u32) -> bool {
    day >= 1 && (day % 7 == 0 || day == total_days)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_periods_thirty_day_span() {
        let start = 1_700_000_000_000_000;
        let end = start + 30 * MICROS_PER_DAY;
        assert_eq!(total_periods(start, Some(end)), 30);
    }

    #[test]
    fn test_total_periods_defaults_open_ended() {
        assert_eq!(total_periods(0, None), DEFAULT_CHALLENGE_DAYS);
    }

    #[test]
    fn test_total_periods_partial_day_rounds_up() {
        let start = 0;
        let end = 3 * MICROS_PER_DAY + 1;
        assert_eq!(total_periods(start, Some(end)), 4);
    }

    #[test]
    fn test_total_periods_degenerate_range() {
        assert_eq!(total_periods(100, Some(100)), 1);
        assert_eq!(total_periods(100, Some(50)), 1);
    }

    #[test]
    fn test_current_period_before_start() {
        assert_eq!(current_period(MICROS_PER_DAY, 0), 0);
    }

    #[test]
    fn test_current_period_day_boundaries() {
        assert_eq!(current_period(0, 0), 1);
        assert_eq!(current_period(0, MICROS_PER_DAY - 1), 1);
        assert_eq!(current_period(0, MICROS_PER_DAY), 2);
        assert_eq!(current_period(0, 14 * MICROS_PER_DAY), 15);
    }

    #[test]
    fn test_week_index() {
        assert_eq!(week_index(1), 1);
        assert_eq!(week_index(7), 1);
        assert_eq!(week_index(8), 2);
        assert_eq!(week_index(14), 2);
        assert_eq!(week_index(15), 3);
        assert_eq!(week_index(30), 5);
    }

    #[test]
    fn test_week_boundary_days() {
        assert!(is_week_boundary(7, 30));
        assert!(is_week_boundary(14, 30));
        assert!(is_week_boundary(28, 30));
        assert!(!is_week_boundary(1, 30));
        assert!(!is_week_boundary(15, 30));
        // Final day always processes, even mid-week.
        assert!(is_week_boundary(30, 30));
    }
}
