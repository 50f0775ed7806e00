//! SpacetimeDB table definitions for the survival challenge engine.
//!
//! The engine owns `distance_from_center`, `lives`, `days_in_danger`,
//! `is_eliminated`, and `last_activity_at` on participant rows; everything
//! else (nicknames, avatars, point accounting) belongs to external
//! collaborators and lives outside this module.

use crate::reducers::run_survival_batch;
use spacetimedb::{client_visibility_filter, table, Filter, Identity, ScheduleAt, Timestamp};

// ============================================================================
// CHALLENGES
// ============================================================================

/// A group challenge. Only the survival type is simulated here; race and
/// streak challenges are stored but advanced elsewhere.
#[table(name = challenge, public)]
#[derive(Clone)]
pub struct Challenge {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    pub name: String,
    pub challenge_type: u8, // challenge_types::*
    pub status: u8,         // challenge_statuses::*
    pub start_at: Timestamp,
    /// None = open-ended, treated as start + 30 days.
    pub end_at: Option<Timestamp>,
    /// Canonical survival settings as JSON (dedicated column).
    pub settings_json: String,
    /// Legacy free-form rules blob; may nest `survival_settings`.
    pub rules_json: String,
    /// Last period the batch fully processed. Re-invoking the batch within
    /// the same period is a counted skip, never a second shrink.
    pub last_processed_period: u32,
}

/// A participant on the ring. Rows are never deleted; elimination is a
/// terminal flag.
#[table(name = participant, public)]
#[derive(Clone)]
pub struct Participant {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    #[index(btree)]
    pub challenge_id: u64,
    pub user_id: String,
    /// Normalized position: 0.0 = center (safest), 1.0 = outer edge.
    pub distance_from_center: f32,
    /// Placement angle in degrees, assigned once at join. Display only.
    pub angle: f32,
    pub lives: u32,
    pub days_in_danger: u32,
    pub is_eliminated: bool,
    pub last_activity_at: Option<Timestamp>,
    pub total_points: f32,
    /// Monotonic per-row version; orders this participant's deltas.
    pub delta_seq: u64,
}

// ============================================================================
// NOTIFICATION FAN-OUT
// ============================================================================

/// A published state change for one participant. Only the changed fields
/// are set. Deltas for one participant are ordered by `seq`; deltas across
/// participants carry no ordering guarantee.
#[table(name = participant_delta, public)]
#[derive(Clone)]
pub struct ParticipantDelta {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    #[index(btree)]
    pub challenge_id: u64,
    pub participant_id: u64,
    pub seq: u64,
    pub distance_from_center: Option<f32>,
    pub total_points: Option<f32>,
    pub lives: Option<u32>,
    pub is_eliminated: Option<bool>,
    pub published_at: Timestamp,
}

/// A client's subscription to one challenge's delta stream. This is the
/// only per-subscriber state the engine holds; rows are removed on
/// unsubscribe and when the client disconnects.
#[table(name = challenge_subscription, public)]
pub struct ChallengeSubscription {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    #[index(btree)]
    pub identity: Identity,
    pub challenge_id: u64,
    pub subscribed_at: Timestamp,
}

/// RLS filter: clients only see deltas for challenges they subscribed to.
#[client_visibility_filter]
const DELTA_VISIBILITY: Filter = Filter::Sql(
    "SELECT d.* FROM participant_delta d
     JOIN challenge_subscription s ON d.challenge_id = s.challenge_id
     WHERE s.identity = :sender",
);

// ============================================================================
// BATCH PROCESSING
// ============================================================================

/// Aggregate report for one batch invocation. The batch never fails
/// outright; it always lands one of these.
#[table(name = batch_run, public)]
pub struct BatchRun {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    pub ran_at: Timestamp,
    pub challenges_processed: u32,
    pub challenges_skipped: u32,
    pub challenges_completed: u32,
    pub participants_processed: u32,
    pub participants_in_danger: u32,
    pub participants_eliminated: u32,
    pub errors: u32,
}

/// Schedule table driving the daily survival batch.
#[table(name = survival_tick_schedule, scheduled(run_survival_batch))]
pub struct SurvivalTickSchedule {
    #[primary_key]
    #[auto_inc]
    pub id: u64,
    pub scheduled_at: ScheduleAt,
}

// ============================================================================
// ENUM CONSTANTS
// ============================================================================

pub mod challenge_types {
    pub const SURVIVAL: u8 = 0;
    pub const RACE: u8 = 1;
    pub const STREAK: u8 = 2;
    pub const CUSTOM: u8 = 3;
}

pub mod challenge_statuses {
    pub const DRAFT: u8 = 0;
    pub const ACTIVE: u8 = 1;
    pub const COMPLETED: u8 = 2;
    pub const CANCELLED: u8 = 3;
}
