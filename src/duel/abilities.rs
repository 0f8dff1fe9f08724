//! Ability System
//!
//! Force Push and Force Dash share one cooldown/active-duration state machine.
//! Cooldown starts the moment an ability activates; it is not gated on the
//! active window ending.

use serde::{Deserialize, Serialize};

/// The two force abilities available in a duel.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AbilityType {
    /// Shoves the other combatant away every tick while active.
    ForcePush,
    /// Launches the caster along its aim direction.
    ForceDash,
}

impl AbilityType {
    pub fn name(&self) -> &'static str {
        match self {
            AbilityType::ForcePush => "Force Push",
            AbilityType::ForceDash => "Force Dash",
        }
    }
}

/// Cooldown and activation state for one ability of one combatant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityState {
    pub kind: AbilityType,
    cooldown_ms: f32,
    remaining_cooldown_ms: f32,
    active: bool,
    active_elapsed_ms: f32,
    active_duration_ms: f32,
}

impl AbilityState {
    pub fn new(kind: AbilityType, cooldown_ms: f32, active_duration_ms: f32) -> Self {
        Self {
            kind,
            cooldown_ms: cooldown_ms.max(0.0),
            remaining_cooldown_ms: 0.0,
            active: false,
            active_elapsed_ms: 0.0,
            active_duration_ms: active_duration_ms.max(0.0),
        }
    }

    /// Advance cooldown and the active window by `delta_ms`.
    pub fn tick(&mut self, delta_ms: f32) {
        let delta_ms = if delta_ms.is_finite() { delta_ms.max(0.0) } else { 0.0 };

        if self.remaining_cooldown_ms > 0.0 {
            self.remaining_cooldown_ms = (self.remaining_cooldown_ms - delta_ms).max(0.0);
        }

        if self.active {
            self.active_elapsed_ms += delta_ms;
            if self.active_elapsed_ms >= self.active_duration_ms {
                self.active = false;
                self.active_elapsed_ms = 0.0;
            }
        }
    }

    pub fn can_use(&self) -> bool {
        self.remaining_cooldown_ms <= 0.0
    }

    /// Start the ability. Returns false (and changes nothing) while on cooldown.
    pub fn activate(&mut self) -> bool {
        if !self.can_use() {
            return false;
        }
        self.active = true;
        self.active_elapsed_ms = 0.0;
        self.remaining_cooldown_ms = self.cooldown_ms;
        true
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn cooldown_ms(&self) -> f32 {
        self.cooldown_ms
    }

    pub fn remaining_cooldown_ms(&self) -> f32 {
        self.remaining_cooldown_ms
    }

    pub fn active_elapsed_ms(&self) -> f32 {
        self.active_elapsed_ms
    }

    pub fn active_duration_ms(&self) -> f32 {
        self.active_duration_ms
    }

    /// Whole seconds left on cooldown, rounded up, as shown on the HUD.
    pub fn cooldown_seconds_display(&self) -> u32 {
        (self.remaining_cooldown_ms / 1000.0).ceil().max(0.0) as u32
    }
}
