//! A combatant: body, blade and force abilities bundled under one id.

use serde::{Deserialize, Serialize};

use super::abilities::{AbilityState, AbilityType};
use super::body::{CombatantBody, CombatantId};
use super::intent::DashWindow;
use super::tuning::DuelTuning;
use super::weapon::MeleeWeapon;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Duelist {
    pub id: CombatantId,
    pub body: CombatantBody,
    pub weapon: MeleeWeapon,
    pub force_push: AbilityState,
    /// Only the player can dash
    pub force_dash: Option<AbilityState>,
    pub dash: DashWindow,
}

impl Duelist {
    pub fn player(tuning: &DuelTuning) -> Self {
        let mut duelist = Self::spawn(CombatantId::Player, tuning);
        duelist.force_dash = Some(AbilityState::new(
            AbilityType::ForceDash,
            tuning.force_dash.cooldown_ms,
            tuning.force_dash.active_duration_ms,
        ));
        duelist
    }

    pub fn opponent(tuning: &DuelTuning) -> Self {
        Self::spawn(CombatantId::Opponent, tuning)
    }

    fn spawn(id: CombatantId, tuning: &DuelTuning) -> Self {
        let body_tuning = match id {
            CombatantId::Player => &tuning.player,
            CombatantId::Opponent => &tuning.opponent,
        };
        let body = CombatantBody::new(body_tuning, tuning.damage_cooldown_ms, tuning.flash_duration_ms);
        let weapon = MeleeWeapon::new(id, body.position, tuning.melee.reach);

        Self {
            id,
            body,
            weapon,
            force_push: AbilityState::new(
                AbilityType::ForcePush,
                tuning.force_push.cooldown_ms,
                tuning.force_push.active_duration_ms,
            ),
            force_dash: None,
            dash: DashWindow::default(),
        }
    }

    /// Advance every ability's cooldown and active window.
    pub fn tick_abilities(&mut self, delta_ms: f32) {
        self.force_push.tick(delta_ms);
        if let Some(dash) = self.force_dash.as_mut() {
            dash.tick(delta_ms);
        }
    }

    pub fn ability(&self, kind: AbilityType) -> Option<&AbilityState> {
        match kind {
            AbilityType::ForcePush => Some(&self.force_push),
            AbilityType::ForceDash => self.force_dash.as_ref(),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.body.is_alive()
    }
}
