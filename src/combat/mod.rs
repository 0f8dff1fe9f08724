//! Combat reporting
//!
//! The duel simulation itself lives in `crate::duel`. This module turns its
//! per-tick output into bevy events and an in-memory combat log:
//! - `events` - `CombatEventFired` and `MatchEndedEvent`
//! - `log` - chronological `CombatLog` with damage and kill aggregation

pub mod events;
pub mod log;
