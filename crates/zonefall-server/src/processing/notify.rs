//! Delta fan-out — publishes per-participant state changes.
//!
//! State persistence is the source of truth; a delta row is a derived,
//! retryable side channel written after the participant row update in the
//! same transaction. Clients order a participant's deltas by `seq`.

use crate::tables::*;
use spacetimedb::{ReducerContext, Table};

/// Delta rows older than this are pruned by the batch.
const DELTA_RETENTION_MICROS: i64 = 7 * 86_400_000_000;

/// The changed fields of one participant update. Unset fields did not
/// change and must not supersede earlier values on the client.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeltaFields {
    pub distance_from_center: Option<f32>,
    pub total_points: Option<f32>,
    pub lives: Option<u32>,
    pub is_eliminated: Option<bool>,
}

impl DeltaFields {
    pub fn is_empty(&self) -> bool {
        self.distance_from_center.is_none()
            && self.total_points.is_none()
            && self.lives.is_none()
            && self.is_eliminated.is_none()
    }
}

/// Publish one delta for a participant. `seq` must be the participant
/// row's already-bumped `delta_seq`, so the stream stays ordered per row.
pub fn publish(
    ctx: &ReducerContext,
    challenge_id: u64,
    participant_id: u64,
    seq: u64,
    fields: DeltaFields,
) {
    if fields.is_empty() {
        return;
    }
    ctx.db.participant_delta().insert(ParticipantDelta {
        id: 0,
        challenge_id,
        participant_id,
        seq,
        distance_from_center: fields.distance_from_center,
        total_points: fields.total_points,
        lives: fields.lives,
        is_eliminated: fields.is_eliminated,
        published_at: ctx.timestamp,
    });
}

/// Drop delta rows past the retention window. At-least-once delivery only
/// needs deltas to outlive one push cycle; a week is generous.
pub fn prune_stale(ctx: &ReducerContext) {
    let cutoff = ctx.timestamp.to_micros_since_unix_epoch() - DELTA_RETENTION_MICROS;
    let stale: Vec<u64> = ctx
        .db
        .participant_delta()
        .iter()
        .filter(|d| d.published_at.to_micros_since_unix_epoch() < cutoff)
        .map(|d| d.id)
        .collect();
    for id in stale {
        ctx.db.participant_delta().id().delete(id);
    }
}
