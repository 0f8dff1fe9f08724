//! Read-only per-frame view of the duel for renderers and HUDs.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::abilities::{AbilityState, AbilityType};
use super::body::CombatantId;
use super::combatant::Duelist;
use super::encounter::MatchOutcome;
use super::events::EventBuffer;
use super::opponent_ai::{AiState, Stance};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityView {
    pub kind: AbilityType,
    pub remaining_cooldown_ms: f32,
    pub active: bool,
    /// Whole seconds left, rounded up
    pub cooldown_secs: u32,
}

impl AbilityView {
    fn of(ability: &AbilityState) -> Self {
        Self {
            kind: ability.kind,
            remaining_cooldown_ms: ability.remaining_cooldown_ms(),
            active: ability.is_active(),
            cooldown_secs: ability.cooldown_seconds_display(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatantView {
    pub id: CombatantId,
    pub position: Vec2,
    pub health: f32,
    pub max_health: f32,
    pub health_pct: f32,
    pub alive: bool,
    pub flashing: bool,
    pub blade_tip: Vec2,
    pub blade_angle: f32,
    pub blade_active: bool,
    pub abilities: SmallVec<[AbilityView; 2]>,
}

impl CombatantView {
    pub fn of(duelist: &Duelist, now_ms: f64) -> Self {
        let mut abilities = SmallVec::new();
        abilities.push(AbilityView::of(&duelist.force_push));
        if let Some(dash) = duelist.force_dash.as_ref() {
            abilities.push(AbilityView::of(dash));
        }

        Self {
            id: duelist.id,
            position: duelist.body.position,
            health: duelist.body.health(),
            max_health: duelist.body.max_health(),
            health_pct: duelist.body.health_pct(),
            alive: duelist.is_alive(),
            flashing: duelist.body.is_flashing(now_ms),
            blade_tip: duelist.weapon.tip(),
            blade_angle: duelist.weapon.angle(),
            blade_active: duelist.weapon.is_active(),
            abilities,
        }
    }

    pub fn ability(&self, kind: AbilityType) -> Option<&AbilityView> {
        self.abilities.iter().find(|a| a.kind == kind)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub tick: u64,
    pub now_ms: f64,
    pub player: CombatantView,
    pub opponent: CombatantView,
    /// Events from the most recent tick
    pub events: EventBuffer,
    pub outcome: Option<MatchOutcome>,
    pub ai_state: AiState,
    pub stance: Stance,
}

impl FrameView {
    /// HUD line for the player's cooldowns.
    pub fn cooldown_line(&self) -> String {
        let secs = |kind| self.player.ability(kind).map_or(0, |a| a.cooldown_secs);
        format!(
            "{}: {}s | {}: {}s",
            AbilityType::ForcePush.name(),
            secs(AbilityType::ForcePush),
            AbilityType::ForceDash.name(),
            secs(AbilityType::ForceDash),
        )
    }
}
