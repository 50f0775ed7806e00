//! One processing pass over one challenge.
//!
//! Resolves the challenge's place in its timeline, computes the safe-zone
//! radius, and steps every active participant through the danger state
//! machine. Each participant is persisted individually; one bad row is
//! counted and skipped, never aborting the rest of the pass.

use super::notify::{self, DeltaFields};
use crate::tables::*;
use spacetimedb::{ReducerContext, Table};
use zonefall_logic::elimination::{step, DangerState};
use zonefall_logic::period::{current_period, is_week_boundary, total_periods};
use zonefall_logic::safe_zone::safe_zone_radius;
use zonefall_logic::settings::{self, Timeframe};

/// Per-participant counters for one challenge pass.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChallengeTotals {
    pub participants_processed: u32,
    pub participants_in_danger: u32,
    pub participants_eliminated: u32,
    pub errors: u32,
}

/// Why a challenge was left untouched this invocation. None of these are
/// errors; they are the scheduling gates working as intended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotStarted,
    MidWeek,
    AlreadyProcessed,
}

#[derive(Debug, Clone, Copy)]
pub enum ChallengeOutcome {
    Processed(ChallengeTotals),
    Skipped(SkipReason),
    /// The challenge ran past its final period and was marked completed.
    Completed,
}

/// Advance one survival challenge by one period, if one is due.
pub fn process_challenge(ctx: &ReducerContext, challenge: &Challenge) -> ChallengeOutcome {
    // Single normalized settings-resolution step; everything downstream
    // uses this one canonical value.
    let resolved = settings::resolve(
        Some(&challenge.settings_json),
        Some(&challenge.rules_json),
    );

    let start = challenge.start_at.to_micros_since_unix_epoch();
    let end = challenge.end_at.map(|t| t.to_micros_since_unix_epoch());
    let total = total_periods(start, end);
    let current = current_period(start, ctx.timestamp.to_micros_since_unix_epoch());

    if current == 0 {
        return ChallengeOutcome::Skipped(SkipReason::NotStarted);
    }
    if current > total {
        let mut ended = challenge.clone();
        ended.status = challenge_statuses::COMPLETED;
        ctx.db.challenge().id().update(ended);
        log::info!("Challenge {} ran its course, marked completed", challenge.id);
        return ChallengeOutcome::Completed;
    }
    // Daily invocation must not double-shrink weekly challenges.
    if resolved.timeframe == Timeframe::Weekly && !is_week_boundary(current, total) {
        return ChallengeOutcome::Skipped(SkipReason::MidWeek);
    }
    if challenge.last_processed_period == current {
        return ChallengeOutcome::Skipped(SkipReason::AlreadyProcessed);
    }

    let radius = safe_zone_radius(current, total, &resolved);
    let mut totals = ChallengeTotals::default();

    // Collect first to avoid mutation during iteration.
    let roster: Vec<Participant> = ctx
        .db
        .participant()
        .iter()
        .filter(|p| p.challenge_id == challenge.id && !p.is_eliminated)
        .collect();

    for participant in roster {
        if !participant.distance_from_center.is_finite() {
            log::warn!(
                "Participant {} has a corrupt position, skipping this cycle",
                participant.id
            );
            totals.errors += 1;
            continue;
        }

        let before = DangerState {
            days_in_danger: participant.days_in_danger,
            lives: participant.lives,
            is_eliminated: participant.is_eliminated,
        };
        let outcome = step(
            participant.distance_from_center,
            radius,
            before,
            &resolved,
            total,
        );

        totals.participants_processed += 1;
        if outcome.in_danger {
            totals.participants_in_danger += 1;
        }
        if outcome.newly_eliminated {
            totals.participants_eliminated += 1;
            log::info!(
                "Participant {} eliminated from challenge {} (period {})",
                participant.id,
                challenge.id,
                current
            );
        }

        if outcome.state != before {
            // Danger-counter churn stays internal; only life and
            // elimination changes fan out to subscribers.
            let fields = DeltaFields {
                lives: outcome.lost_life.then_some(outcome.state.lives),
                is_eliminated: outcome.newly_eliminated.then_some(true),
                ..Default::default()
            };

            let mut row = participant;
            row.days_in_danger = outcome.state.days_in_danger;
            row.lives = outcome.state.lives;
            row.is_eliminated = outcome.state.is_eliminated;
            if !fields.is_empty() {
                row.delta_seq += 1;
            }
            let (challenge_id, participant_id, seq) = (row.challenge_id, row.id, row.delta_seq);
            ctx.db.participant().id().update(row);

            notify::publish(ctx, challenge_id, participant_id, seq, fields);
        }
    }

    let mut marked = challenge.clone();
    marked.last_processed_period = current;
    ctx.db.challenge().id().update(marked);

    ChallengeOutcome::Processed(totals)
}
