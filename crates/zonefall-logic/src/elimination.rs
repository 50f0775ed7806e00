//! Danger and elimination — the per-participant state machine.
//!
//! States: Safe → Danger → (Danger, life lost) → Eliminated, with the
//! backward Danger → Safe transition allowed and Eliminated terminal.
//! One policy only: lives are lost after `elimination_threshold`
//! consecutive in-danger periods, and elimination follows the last life.

use crate::settings::SurvivalSettings;

/// The danger/elimination fields of a participant row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DangerState {
    pub days_in_danger: u32,
    pub lives: u32,
    pub is_eliminated: bool,
}

impl DangerState {
    pub fn new(start_lives: u32) -> Self {
        Self {
            days_in_danger: 0,
            lives: start_lives,
            is_eliminated: false,
        }
    }
}

/// What one period transition did to a participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepOutcome {
    pub state: DangerState,
    pub in_danger: bool,
    pub lost_life: bool,
    pub newly_eliminated: bool,
}

/// Consecutive in-danger periods required before a life is lost, scaled
/// by challenge length: short challenges punish faster.
pub fn elimination_threshold(total_periods: u32) -> u32 {
    if total_periods <= 3 {
        1
    } else if total_periods <= 10 {
        2
    } else {
        3
    }
}

/// Whether a position is in the danger zone for the given radius.
pub fn is_in_danger(distance_from_center: f32, safe_zone_radius: f32, danger_threshold: f32) -> bool {
    distance_from_center > safe_zone_radius * danger_threshold
}

/// Advance a participant's danger state by one period.
///
/// Eliminated participants pass through unchanged, so re-applying a
/// period (or replaying a batch) can never double-penalize them. Leaving
/// the danger zone fully resets the consecutive-danger counter.
pub fn step(
    distance_from_center: f32,
    safe_zone_radius: f32,
    state: DangerState,
    settings: &SurvivalSettings,
    total_periods: u32,
) -> StepOutcome {
    if state.is_eliminated {
        return StepOutcome {
            state,
            in_danger: false,
            lost_life: false,
            newly_eliminated: false,
        };
    }

    let in_danger = is_in_danger(distance_from_center, safe_zone_radius, settings.danger_threshold);
    let mut next = state;
    let mut lost_life = false;
    let mut newly_eliminated = false;

    if in_danger {
        next.days_in_danger += 1;
        if next.days_in_danger >= elimination_threshold(total_periods) {
            next.lives = next.lives.saturating_sub(1);
            next.days_in_danger = 0;
            lost_life = true;
            if next.lives == 0 {
                next.is_eliminated = true;
                newly_eliminated = true;
            }
        }
    } else {
        next.days_in_danger = 0;
    }

    StepOutcome {
        state: next,
        in_danger,
        lost_life,
        newly_eliminated,
    }
}
