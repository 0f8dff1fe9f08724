//! Per-tick combat events
//!
//! The encounter reports what happened during a tick as a flat list of
//! events. They carry just enough for a renderer to spawn sparks or force
//! waves (position and colour category) and for the combat log to record
//! damage; the simulation never reads them back.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::abilities::AbilityType;
use super::body::CombatantId;

/// Events produced by a single tick. Most ticks produce zero to two.
pub type EventBuffer = SmallVec<[CombatEvent; 4]>;

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub enum CombatEventKind {
    /// A blade tip connected. `amount` is the health removed.
    MeleeHit,
    /// A push impulse was applied. `amount` is the impulse magnitude.
    ForcePush,
    /// An ability went from ready to active.
    AbilityActivated(AbilityType),
}

/// Cosmetic grouping for the particle layer.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum EffectCategory {
    DamageSparks,
    ForceWave,
    AbilityCue,
}

#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct CombatEvent {
    pub kind: CombatEventKind,
    /// Combatant the effect is attributed to
    pub source: CombatantId,
    /// Combatant on the receiving end, if any
    pub target: Option<CombatantId>,
    /// Where the effect should be drawn
    pub position: Vec2,
    pub amount: f32,
}

impl CombatEvent {
    pub fn melee_hit(attacker: CombatantId, position: Vec2, damage: f32) -> Self {
        Self {
            kind: CombatEventKind::MeleeHit,
            source: attacker,
            target: Some(attacker.other()),
            position,
            amount: damage,
        }
    }

    pub fn force_push(pusher: CombatantId, position: Vec2, impulse: f32) -> Self {
        Self {
            kind: CombatEventKind::ForcePush,
            source: pusher,
            target: Some(pusher.other()),
            position,
            amount: impulse,
        }
    }

    pub fn ability_activated(caster: CombatantId, ability: AbilityType, position: Vec2) -> Self {
        Self {
            kind: CombatEventKind::AbilityActivated(ability),
            source: caster,
            target: None,
            position,
            amount: 0.0,
        }
    }

    pub fn category(&self) -> EffectCategory {
        match self.kind {
            CombatEventKind::MeleeHit => EffectCategory::DamageSparks,
            CombatEventKind::ForcePush => EffectCategory::ForceWave,
            CombatEventKind::AbilityActivated(_) => EffectCategory::AbilityCue,
        }
    }

    /// RGB tint (0.0-1.0) for the effect. Sparks are tinted by who was hit,
    /// force effects by who pushed.
    pub fn tint(&self) -> [f32; 3] {
        match (self.category(), self.source) {
            // Opponent struck by the player's blade
            (EffectCategory::DamageSparks, CombatantId::Player) => [1.0, 0.0, 0.4],
            // Player struck by the opponent's blade
            (EffectCategory::DamageSparks, CombatantId::Opponent) => [0.0, 0.4, 1.0],
            (_, CombatantId::Player) => [0.0, 1.0, 1.0],
            (_, CombatantId::Opponent) => [1.0, 0.0, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_melee_hit_targets_other_side() {
        let event = CombatEvent::melee_hit(CombatantId::Player, Vec2::new(1.0, 2.0), 7.5);
        assert_eq!(event.target, Some(CombatantId::Opponent));
        assert_eq!(event.category(), EffectCategory::DamageSparks);
        assert_eq!(event.tint(), [1.0, 0.0, 0.4]);
    }

    #[test]
    fn test_force_tints_follow_pusher() {
        let by_player = CombatEvent::force_push(CombatantId::Player, Vec2::ZERO, 150.0);
        let by_opponent = CombatEvent::force_push(CombatantId::Opponent, Vec2::ZERO, 150.0);
        assert_eq!(by_player.tint(), [0.0, 1.0, 1.0]);
        assert_eq!(by_opponent.tint(), [1.0, 0.0, 1.0]);
    }

    #[test]
    fn test_ability_event_has_no_target() {
        let event = CombatEvent::ability_activated(CombatantId::Player, AbilityType::ForceDash, Vec2::ZERO);
        assert_eq!(event.target, None);
        assert_eq!(event.category(), EffectCategory::AbilityCue);
    }
}
