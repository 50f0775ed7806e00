//! Pure simulation logic for Zonefall survival challenges.
//!
//! Participants sit on a normalized ring around a center point. A safe-zone
//! radius shrinks over the life of the challenge; earning activity points
//! moves a participant inward, and spending consecutive periods outside the
//! safe zone costs lives until elimination.
//!
//! This crate contains everything that is independent of any database or
//! runtime. Functions take plain data and return results, making them
//! unit-testable and portable; the SpacetimeDB module in `zonefall-server`
//! is a thin persistence and fan-out layer on top.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`settings`] | Canonical challenge settings, sanitization, legacy resolution |
//! | [`period`] | Day/week period math over the challenge date range |
//! | [`safe_zone`] | Shrinking safe-zone radius interpolation |
//! | [`movement`] | Activity-driven inward movement |
//! | [`elimination`] | Danger/lives state machine, terminal elimination |
//! | [`placement`] | Starting distance for joiners, including late joiners |

pub mod elimination;
pub mod movement;
pub mod period;
pub mod placement;
pub mod safe_zone;
pub mod settings;
