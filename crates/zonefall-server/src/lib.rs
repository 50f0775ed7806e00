//! Zonefall Server - SpacetimeDB Module
//!
//! Survival challenge engine running as a SpacetimeDB module. The nightly
//! batch, the immediate activity path, and delta fan-out all run here as
//! reducers; clients are thin renderers over the public tables.

mod processing;
mod reducers;
mod tables;

pub use reducers::*;
pub use tables::*;
