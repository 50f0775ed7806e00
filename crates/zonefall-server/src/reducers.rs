//! Client-facing reducers: challenge lifecycle, joining, the immediate
//! activity path, subscriptions, and the batch entry points.

use crate::processing::{self, DeltaFields};
use crate::tables::*;
use spacetimedb::rand::Rng;
use spacetimedb::{reducer, ReducerContext, ScheduleAt, Table};
use zonefall_logic::movement::apply_movement;
use zonefall_logic::period::{current_period, total_periods};
use zonefall_logic::placement::starting_distance;
use zonefall_logic::settings;

// ============================================================================
// MODULE LIFECYCLE
// ============================================================================

/// Seeds the daily batch schedule. Idempotent across hot-reloads.
#[reducer(init)]
pub fn init(ctx: &ReducerContext) {
    if ctx.db.survival_tick_schedule().iter().count() == 0 {
        ctx.db.survival_tick_schedule().insert(SurvivalTickSchedule {
            id: 0,
            scheduled_at: ScheduleAt::Interval(
                std::time::Duration::from_secs(24 * 60 * 60).into(),
            ),
        });
        log::info!("Scheduled daily survival batch");
    }
}

#[reducer(client_connected)]
pub fn client_connected(ctx: &ReducerContext) {
    log::info!("Client connected: {:?}", ctx.sender);
}

/// Subscriptions are tied to the subscriber's connection lifetime.
#[reducer(client_disconnected)]
pub fn client_disconnected(ctx: &ReducerContext) {
    log::info!("Client disconnected: {:?}", ctx.sender);
    let stale: Vec<u64> = ctx
        .db
        .challenge_subscription()
        .iter()
        .filter(|s| s.identity == ctx.sender)
        .map(|s| s.id)
        .collect();
    for id in stale {
        ctx.db.challenge_subscription().id().delete(id);
    }
}

// ============================================================================
// CHALLENGE AUTHORING (thin plumbing; the authoring flow lives outside)
// ============================================================================

/// Create a survival challenge starting now. `duration_days == 0` leaves
/// the end date open (treated as start + 30 days).
#[reducer]
pub fn create_challenge(
    ctx: &ReducerContext,
    name: String,
    duration_days: u32,
    settings_json: String,
    rules_json: String,
) {
    let end_at = (duration_days > 0).then(|| {
        ctx.timestamp + std::time::Duration::from_secs(duration_days as u64 * 86_400)
    });
    let challenge = ctx.db.challenge().insert(Challenge {
        id: 0,
        name,
        challenge_type: challenge_types::SURVIVAL,
        status: challenge_statuses::DRAFT,
        start_at: ctx.timestamp,
        end_at,
        settings_json,
        rules_json,
        last_processed_period: 0,
    });
    log::info!("Created survival challenge {} ({})", challenge.id, challenge.name);
}

#[reducer]
pub fn activate_challenge(ctx: &ReducerContext, challenge_id: u64) {
    let Some(mut challenge) = ctx.db.challenge().id().find(challenge_id) else {
        log::warn!("activate_challenge: no challenge {}", challenge_id);
        return;
    };
    if challenge.status != challenge_statuses::DRAFT {
        log::warn!("activate_challenge: challenge {} is not a draft", challenge_id);
        return;
    }
    challenge.status = challenge_statuses::ACTIVE;
    ctx.db.challenge().id().update(challenge);
}

#[reducer]
pub fn cancel_challenge(ctx: &ReducerContext, challenge_id: u64) {
    let Some(mut challenge) = ctx.db.challenge().id().find(challenge_id) else {
        log::warn!("cancel_challenge: no challenge {}", challenge_id);
        return;
    };
    if challenge.status == challenge_statuses::COMPLETED {
        log::warn!("cancel_challenge: challenge {} already completed", challenge_id);
        return;
    }
    challenge.status = challenge_statuses::CANCELLED;
    ctx.db.challenge().id().update(challenge);
    log::info!("Challenge {} cancelled", challenge_id);
}

// ============================================================================
// PARTICIPANTS
// ============================================================================

/// Join a challenge. Late joiners are placed relative to the current
/// safe zone rather than at the outer edge; the angle is assigned once
/// and never used in any survival math.
#[reducer]
pub fn join_challenge(ctx: &ReducerContext, challenge_id: u64, user_id: String) {
    let Some(challenge) = ctx.db.challenge().id().find(challenge_id) else {
        log::warn!("join_challenge: no challenge {}", challenge_id);
        return;
    };
    if challenge.status == challenge_statuses::COMPLETED
        || challenge.status == challenge_statuses::CANCELLED
    {
        log::warn!("join_challenge: challenge {} is over", challenge_id);
        return;
    }
    if ctx
        .db
        .participant()
        .iter()
        .any(|p| p.challenge_id == challenge_id && p.user_id == user_id)
    {
        log::warn!(
            "join_challenge: user {} already in challenge {}",
            user_id,
            challenge_id
        );
        return;
    }

    let resolved = settings::resolve(
        Some(&challenge.settings_json),
        Some(&challenge.rules_json),
    );
    let start = challenge.start_at.to_micros_since_unix_epoch();
    let end = challenge.end_at.map(|t| t.to_micros_since_unix_epoch());
    let total = total_periods(start, end);
    let current = current_period(start, ctx.timestamp.to_micros_since_unix_epoch());

    let distance = starting_distance(current, total, &resolved);
    let angle = ctx.rng().gen_range(0.0_f32..360.0);

    let participant = ctx.db.participant().insert(Participant {
        id: 0,
        challenge_id,
        user_id,
        distance_from_center: distance,
        angle,
        lives: resolved.start_lives,
        days_in_danger: 0,
        is_eliminated: false,
        last_activity_at: None,
        total_points: 0.0,
        delta_seq: 1,
    });

    processing::publish(
        ctx,
        challenge_id,
        participant.id,
        participant.delta_seq,
        DeltaFields {
            distance_from_center: Some(distance),
            lives: Some(resolved.start_lives),
            ..Default::default()
        },
    );

    log::info!(
        "Participant {} joined challenge {} at distance {:.3} (period {})",
        participant.id,
        challenge_id,
        distance,
        current
    );
}

/// The immediate movement path. The external activity subsystem reports
/// points earned this period; the participant moves inward right away,
/// independent of the nightly batch.
#[reducer]
pub fn record_activity(
    ctx: &ReducerContext,
    participant_id: u64,
    points_earned: f32,
    max_possible_points: f32,
) {
    let Some(mut participant) = ctx.db.participant().id().find(participant_id) else {
        log::warn!("record_activity: no participant {}", participant_id);
        return;
    };
    if participant.is_eliminated {
        return;
    }
    let Some(challenge) = ctx.db.challenge().id().find(participant.challenge_id) else {
        log::warn!(
            "record_activity: participant {} has no challenge {}",
            participant_id,
            participant.challenge_id
        );
        return;
    };
    if challenge.status != challenge_statuses::ACTIVE {
        return;
    }
    if points_earned <= 0.0 {
        // Not a qualifying activity.
        return;
    }

    let resolved = settings::resolve(
        Some(&challenge.settings_json),
        Some(&challenge.rules_json),
    );
    let start = challenge.start_at.to_micros_since_unix_epoch();
    let end = challenge.end_at.map(|t| t.to_micros_since_unix_epoch());
    let total = total_periods(start, end);

    let new_distance = apply_movement(
        participant.distance_from_center,
        points_earned,
        max_possible_points,
        &resolved,
        total,
    );

    participant.distance_from_center = new_distance;
    participant.total_points += points_earned;
    participant.last_activity_at = Some(ctx.timestamp);
    participant.delta_seq += 1;
    let (challenge_id, seq, total_points) = (
        participant.challenge_id,
        participant.delta_seq,
        participant.total_points,
    );
    ctx.db.participant().id().update(participant);

    processing::publish(
        ctx,
        challenge_id,
        participant_id,
        seq,
        DeltaFields {
            distance_from_center: Some(new_distance),
            total_points: Some(total_points),
            ..Default::default()
        },
    );
}

// ============================================================================
// SUBSCRIPTIONS
// ============================================================================

#[reducer]
pub fn subscribe_challenge(ctx: &ReducerContext, challenge_id: u64) {
    if ctx.db.challenge().id().find(challenge_id).is_none() {
        log::warn!("subscribe_challenge: no challenge {}", challenge_id);
        return;
    }
    let already = ctx
        .db
        .challenge_subscription()
        .iter()
        .any(|s| s.identity == ctx.sender && s.challenge_id == challenge_id);
    if already {
        return;
    }
    ctx.db.challenge_subscription().insert(ChallengeSubscription {
        id: 0,
        identity: ctx.sender,
        challenge_id,
        subscribed_at: ctx.timestamp,
    });
}

#[reducer]
pub fn unsubscribe_challenge(ctx: &ReducerContext, challenge_id: u64) {
    let stale: Vec<u64> = ctx
        .db
        .challenge_subscription()
        .iter()
        .filter(|s| s.identity == ctx.sender && s.challenge_id == challenge_id)
        .map(|s| s.id)
        .collect();
    for id in stale {
        ctx.db.challenge_subscription().id().delete(id);
    }
}

// ============================================================================
// BATCH ENTRY POINTS
// ============================================================================

/// No-argument entry point for an external trigger: discovers active
/// survival challenges itself from persisted state.
#[reducer]
pub fn process_survival_challenges(ctx: &ReducerContext) {
    processing::run_batch(ctx);
}

/// Scheduled daily variant of the batch.
#[reducer]
pub fn run_survival_batch(ctx: &ReducerContext, _schedule: SurvivalTickSchedule) {
    // Only allow the scheduler to call this, not clients.
    if ctx.sender != ctx.identity() {
        log::warn!("run_survival_batch called by non-scheduler, ignoring");
        return;
    }
    processing::run_batch(ctx);
}
