//! Serializable encounter state for replays and determinism checks.

use serde::{Deserialize, Serialize};

use super::combatant::Duelist;
use super::encounter::MatchOutcome;
use super::opponent_ai::OpponentAi;
use super::rng::GameRng;

/// Positions, velocities, health, cooldowns, AI state, timers and the
/// generator state. Tuning is supplied again on restore.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub tick: u64,
    pub player: Duelist,
    pub opponent: Duelist,
    pub ai: OpponentAi,
    pub rng: GameRng,
    pub outcome: Option<MatchOutcome>,
}

impl EncounterSnapshot {
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string(self).map_err(|e| format!("Failed to serialize snapshot: {}", e))
    }

    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("Failed to parse snapshot: {}", e))
    }
}
