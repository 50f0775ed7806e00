//! Starting distance for joining participants.
//!
//! Joining during period 1 places a participant at the outer edge. After
//! that, placing late joiners at the edge would eliminate them before they
//! could move, so they start just inside the current safe zone instead.

use crate::safe_zone::safe_zone_radius;
use crate::settings::SurvivalSettings;

/// Late joiners are placed at this fraction of the current safe radius.
const LATE_JOIN_SAFETY_MARGIN: f32 = 0.95;

/// A challenge this short gets the reduced late-join advantage once past
/// its midpoint. Matches the short tier of the movement duration factor.
const SHORT_CHALLENGE_PERIODS: u32 = 7;

/// Distance from center for a participant joining at `current_period`.
///
/// - Period 1 (or earlier): the outer edge, 1.0.
/// - Later: `0.95 ×` the current safe-zone radius — except very short
///   challenges already past their midpoint, where the joiner lands
///   halfway between the radius and the edge so a nearly finished sprint
///   is not trivialized.
pub fn starting_distance(
    current_period: u32,
    total_periods: u32,
    settings: &SurvivalSettings,
) -> f32 {
    if current_period <= 1 {
        return 1.0;
    }

    let radius = safe_zone_radius(current_period, total_periods, settings);
    let short = total_periods <= SHORT_CHALLENGE_PERIODS;
    let past_midpoint = current_period * 2 > total_periods;

    if short && past_midpoint {
        radius + (1.0 - radius) * 0.5
    } else {
        LATE_JOIN_SAFETY_MARGIN * radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn daily() -> SurvivalSettings {
        SurvivalSettings::default()
    }

    #[test]
    fn test_period_one_joins_at_edge() {
        assert!((starting_distance(1, 30, &daily()) - 1.0).abs() < f32::EPSILON);
        assert!((starting_distance(0, 30, &daily()) - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_late_joiner_day_fifteen_of_thirty() {
        let radius = 1.0 - 0.9 * 14.0 / 29.0; // ≈ 0.5655
        let d = starting_distance(15, 30, &daily());
        assert!((d - 0.95 * radius).abs() < 1e-6);
        assert!((d - 0.537).abs() < 0.001);
    }

    #[test]
    fn test_late_joiner_lands_inside_safe_zone() {
        let s = daily();
        for day in 2..=29 {
            let d = starting_distance(day, 30, &s);
            let radius = crate::safe_zone::safe_zone_radius(day, 30, &s);
            assert!(d < radius, "day={day}");
        }
    }

    #[test]
    fn test_short_challenge_past_midpoint_advantage_halved() {
        let s = daily();
        // Day 5 of 6: short and past midpoint → outside the radius.
        let radius = crate::safe_zone::safe_zone_radius(5, 6, &s);
        let d = starting_distance(5, 6, &s);
        assert!((d - (radius + (1.0 - radius) * 0.5)).abs() < 1e-6);
        assert!(d > radius);
    }

    #[test]
    fn test_short_challenge_before_midpoint_normal_placement() {
        let s = daily();
        let radius = crate::safe_zone::safe_zone_radius(2, 6, &s);
        let d = starting_distance(2, 6, &s);
        assert!((d - 0.95 * radius).abs() < 1e-6);
    }
}
