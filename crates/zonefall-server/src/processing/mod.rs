//! Batch processing — advances every active survival challenge one period.
//!
//! The batch is driven by the scheduled tick reducer (daily) or by an
//! external trigger reducer, and is safe to invoke repeatedly within the
//! same period.

mod batch;
mod challenge;
mod notify;

pub use batch::run_batch;
pub use challenge::{process_challenge, ChallengeOutcome, ChallengeTotals, SkipReason};
pub use notify::{publish, DeltaFields};
