//! Activity-driven inward movement.
//!
//! Earning points never moves a participant outward; failing a period's
//! target simply leaves them where the shrinking zone catches up to them.
//! Short challenges and weekly challenges amplify each step, since there
//! are fewer opportunities to move.

use crate::settings::{SurvivalSettings, Timeframe};

/// Floor on the inward step for any qualifying activity, before the
/// duration and timeframe multipliers. Keeps small point totals visible.
const MIN_MOVEMENT_PERCENT: f32 = 0.01;

/// Movement multiplier by challenge length: short challenges give fewer
/// chances to move, so each one counts more.
pub fn duration_factor(total_periods: u32) -> f32 {
    if total_periods <= 7 {
        2.0
    } else if total_periods <= 14 {
        1.5
    } else {
        1.0
    }
}

/// Movement multiplier by timeframe: a weekly challenge has roughly a
/// seventh of the movement opportunities of a daily one.
pub fn timeframe_factor(timeframe: Timeframe) -> f32 {
    match timeframe {
        Timeframe::Daily => 1.0,
        Timeframe::Weekly => 3.0,
    }
}

/// New distance from center after a participant earns points this period.
///
/// Returns a value in `[0, current_distance]`. Zero or negative points
/// leave the distance unchanged. A non-positive `max_possible_points`
/// treats any qualifying points as a full-ratio period.
pub fn apply_movement(
    current_distance: f32,
    points_earned: f32,
    max_possible_points: f32,
    settings: &SurvivalSettings,
    total_periods: u32,
) -> f32 {
    if points_earned <= 0.0 {
        return current_distance;
    }

    let points_ratio = if max_possible_points > 0.0 {
        (points_earned / max_possible_points).min(1.0)
    } else {
        1.0
    };

    let duration = duration_factor(total_periods);
    let timeframe = timeframe_factor(settings.timeframe);

    let movement_amount = settings.max_movement_per_period * duration * points_ratio * timeframe;
    let movement_floor = MIN_MOVEMENT_PERCENT * duration * timeframe;

    let effective = movement_amount.max(movement_floor);
    (current_distance - effective).max(0.0)
}
