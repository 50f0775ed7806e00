//! The batch pass over every active survival challenge.
//!
//! Challenges are fully isolated from each other: one challenge's outcome
//! never aborts its siblings, and the run always lands an aggregate
//! `BatchRun` report row.

use super::challenge::{process_challenge, ChallengeOutcome, SkipReason};
use super::notify;
use crate::tables::*;
use spacetimedb::{ReducerContext, Table};

/// Run one batch pass. Safe to invoke any number of times per period;
/// the per-challenge `last_processed_period` marker and the terminal
/// eliminated state make re-runs counted skips.
pub fn run_batch(ctx: &ReducerContext) {
    let active: Vec<Challenge> = ctx
        .db
        .challenge()
        .iter()
        .filter(|c| {
            c.challenge_type == challenge_types::SURVIVAL
                && c.status == challenge_statuses::ACTIVE
        })
        .collect();

    let mut report = BatchRun {
        id: 0,
        ran_at: ctx.timestamp,
        challenges_processed: 0,
        challenges_skipped: 0,
        challenges_completed: 0,
        participants_processed: 0,
        participants_in_danger: 0,
        participants_eliminated: 0,
        errors: 0,
    };

    for challenge in &active {
        // A cancellation earlier in this run must silence the challenge.
        let Some(fresh) = ctx.db.challenge().id().find(challenge.id) else {
            report.errors += 1;
            continue;
        };
        if fresh.status != challenge_statuses::ACTIVE {
            report.challenges_skipped += 1;
            continue;
        }

        match process_challenge(ctx, &fresh) {
            ChallengeOutcome::Processed(totals) => {
                report.challenges_processed += 1;
                report.participants_processed += totals.participants_processed;
                report.participants_in_danger += totals.participants_in_danger;
                report.participants_eliminated += totals.participants_eliminated;
                report.errors += totals.errors;
            }
            ChallengeOutcome::Skipped(reason) => {
                report.challenges_skipped += 1;
                if reason == SkipReason::AlreadyProcessed {
                    log::info!(
                        "Challenge {} already processed this period, skipping",
                        challenge.id
                    );
                }
            }
            ChallengeOutcome::Completed => {
                report.challenges_completed += 1;
            }
        }
    }

    notify::prune_stale(ctx);

    log::info!(
        "Survival batch: {} challenges processed, {} skipped, {} completed; \
         {} participants ({} in danger, {} eliminated), {} errors",
        report.challenges_processed,
        report.challenges_skipped,
        report.challenges_completed,
        report.participants_processed,
        report.participants_in_danger,
        report.participants_eliminated,
        report.errors,
    );

    ctx.db.batch_run().insert(report);
}
