//! Integration tests for a full survival season.
//!
//! Exercises: period resolution → SafeZone shrink → movement →
//! danger/elimination stepping → late-joiner placement, day by day,
//! the way the server's batch processor drives it.
//!
//! All tests are pure logic — no SpacetimeDB.

use zonefall_logic::elimination::{elimination_threshold, step, DangerState};
use zonefall_logic::movement::apply_movement;
use zonefall_logic::period::{current_period, total_periods, MICROS_PER_DAY};
use zonefall_logic::placement::starting_distance;
use zonefall_logic::safe_zone::safe_zone_radius;
use zonefall_logic::settings::{resolve, SurvivalSettings, Timeframe};

const START: i64 = 1_750_000_000_000_000;

fn thirty_day_challenge() -> (i64, Option<i64>, SurvivalSettings) {
    (START, Some(START + 30 * MICROS_PER_DAY), SurvivalSettings::default())
}

/// The §-scenario: 30-day daily challenge, participant idle at the edge.
/// On day 15 the radius is ≈0.5655; three idle days beyond it cost exactly
/// one life and reset the consecutive-danger counter.
#[test]
fn test_idle_participant_loses_one_life_midway() {
    let (start, end, settings) = thirty_day_challenge();
    let total = total_periods(start, end);
    assert_eq!(total, 30);
    assert_eq!(elimination_threshold(total), 3);

    let mut state = DangerState::new(3);
    let distance = 1.0;

    let day15 = current_period(start, start + 14 * MICROS_PER_DAY);
    assert_eq!(day15, 15);
    let radius = safe_zone_radius(day15, total, &settings);
    assert!((radius - 0.565_517_2).abs() < 1e-6);

    let mut lives_lost = 0;
    for day in 15..=17 {
        let radius = safe_zone_radius(day, total, &settings);
        assert!(distance > radius);
        let out = step(distance, radius, state, &settings, total);
        state = out.state;
        if out.lost_life {
            lives_lost += 1;
        }
    }

    assert_eq!(lives_lost, 1);
    assert_eq!(state.lives, 2);
    assert_eq!(state.days_in_danger, 0);
    assert!(!state.is_eliminated);
}

/// An active participant who logs full points every day stays ahead of
/// the shrinking zone for the whole season.
#[test]
fn test_active_participant_survives_season() {
    let (start, end, settings) = thirty_day_challenge();
    let total = total_periods(start, end);

    let mut distance = 1.0_f32;
    let mut state = DangerState::new(3);

    for day in 1..=total {
        // Push path: activity logged before the nightly batch.
        distance = apply_movement(distance, 10.0, 10.0, &settings, total);
        // Pull path: nightly danger check.
        let radius = safe_zone_radius(day, total, &settings);
        let out = step(distance, radius, state, &settings, total);
        state = out.state;
    }

    assert_eq!(state.lives, 3);
    assert!(!state.is_eliminated);
    assert!((distance - 0.0).abs() < f32::EPSILON, "reached the center");
}

/// An idle participant runs out of lives and the eliminated state is
/// terminal under continued batch passes.
#[test]
fn test_idle_participant_eliminated_exactly_once() {
    let (start, end, settings) = thirty_day_challenge();
    let total = total_periods(start, end);

    let mut state = DangerState::new(3);
    let mut eliminations = 0;

    for day in 1..=total {
        let radius = safe_zone_radius(day, total, &settings);
        let out = step(1.0, radius, state, &settings, total);
        state = out.state;
        if out.newly_eliminated {
            eliminations += 1;
        }
    }

    // Day 1 is safe (radius 1.0, strict comparison); danger starts day 2.
    // Three lives × threshold 3 → eliminated on day 10.
    assert_eq!(eliminations, 1);
    assert!(state.is_eliminated);
    assert_eq!(state.lives, 0);
}

/// Late joiner on day 15 of 30 is placed just inside the current radius,
/// not at the edge, and is not in danger on arrival.
#[test]
fn test_late_joiner_day_fifteen() {
    let (start, end, settings) = thirty_day_challenge();
    let total = total_periods(start, end);
    let day = current_period(start, start + 14 * MICROS_PER_DAY);

    let d = starting_distance(day, total, &settings);
    assert!((d - 0.537).abs() < 0.001);

    let radius = safe_zone_radius(day, total, &settings);
    let out = step(d, radius, DangerState::new(3), &settings, total);
    assert!(!out.in_danger);
}

/// Weekly challenge: settings resolved from a legacy rules blob, radius
/// held constant within a week, one shrink step at the week boundary.
#[test]
fn test_weekly_challenge_from_legacy_rules() {
    let rules = r#"{"survival_settings":{"timeframe":"weekly","start_lives":2}}"#;
    let settings = resolve(None, Some(rules));
    assert_eq!(settings.timeframe, Timeframe::Weekly);
    assert_eq!(settings.start_lives, 2);

    let total = 28;
    let week1 = safe_zone_radius(3, total, &settings);
    let week1_still = safe_zone_radius(7, total, &settings);
    let week2 = safe_zone_radius(8, total, &settings);
    assert!((week1 - week1_still).abs() < f32::EPSILON);
    assert!(week2 < week1);
}
