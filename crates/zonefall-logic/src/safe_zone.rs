//! Safe-zone radius — linear shrink from the initial radius to the minimum.
//!
//! The radius is never stored; it is recomputed from the challenge timeline
//! on every pass, which keeps batch processing replay-safe.

use crate::period::week_index;
use crate::settings::{SurvivalSettings, Timeframe};

/// Safe-zone radius for the given period.
///
/// Linear interpolation between `initial_safe_zone_radius` at period 1 and
/// `min_safe_zone_radius` at the final period, by elapsed fraction
/// `(period - 1) / (total - 1)`. Weekly challenges convert both day indices
/// to week indices before interpolating.
///
/// Edge-case ordering, checked in sequence:
/// - `total <= 1` → minimum (a one-period challenge is fully shrunk)
/// - `period <= 1` → initial (the first period is always fully safe)
/// - `period >= total` → minimum
pub fn safe_zone_radius(
    current_period: u32,
    total_periods: u32,
    settings: &SurvivalSettings,
) -> f32 {
    let (period, total) = match settings.timeframe {
        Timeframe::Daily => (current_period, total_periods),
        Timeframe::Weekly => (
            week_index(current_period.max(1)),
            week_index(total_periods.max(1)),
        ),
    };

    let initial = settings.initial_safe_zone_radius;
    let min = settings.min_safe_zone_radius;

    if total <= 1 {
        return min;
    }
    if period <= 1 {
        return initial;
    }
    if period >= total {
        return min;
    }

    let elapsed = (period - 1) as f32 / (total - 1) as f32;
    initial - (initial - min) * elapsed
}
