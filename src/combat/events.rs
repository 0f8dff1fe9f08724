//! Combat events
//!
//! Bevy event wrappers around what the duel simulation reports, so other
//! systems (logging, effects, headless bookkeeping) can react without
//! touching the `Encounter` resource.

use bevy::prelude::*;
use smallvec::SmallVec;

use crate::duel::body::CombatantId;
use crate::duel::encounter::MatchOutcome;
use crate::duel::events::CombatEvent;

/// Event fired for every simulation event produced by a tick
#[derive(Event, Debug, Clone, Copy)]
pub struct CombatEventFired(pub CombatEvent);

/// Event fired once when the duel is decided
#[derive(Event, Debug, Clone)]
pub struct MatchEndedEvent {
    pub outcome: MatchOutcome,
    /// Combatants at zero health when the match ended
    pub defeated: SmallVec<[CombatantId; 2]>,
    /// Simulation ticks run
    pub ticks: u64,
}
