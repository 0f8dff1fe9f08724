//! Lightsaber geometry.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::body::CombatantId;

/// A blade held by one combatant. Only the angle carries over between ticks;
/// the tip is recomputed from the owner's position every time the aim updates.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeleeWeapon {
    owner: CombatantId,
    angle: f32,
    reach: f32,
    tip: Vec2,
    /// Both blades are always lit today; the flag is kept so a future
    /// ignite/retract mechanic can gate hits without touching the resolver.
    pub active: bool,
}

impl MeleeWeapon {
    pub fn new(owner: CombatantId, owner_position: Vec2, reach: f32) -> Self {
        let mut weapon = Self {
            owner,
            angle: 0.0,
            reach,
            tip: owner_position,
            active: true,
        };
        weapon.set_angle(owner_position, 0.0);
        weapon
    }

    /// Point the blade from `owner_position` at `target`.
    pub fn update_aim(&mut self, owner_position: Vec2, target: Vec2) {
        let delta = target - owner_position;
        // atan2(0, 0) is 0, so aiming at our own center just points right.
        let angle = delta.y.atan2(delta.x);
        self.set_angle(owner_position, angle);
    }

    pub fn set_angle(&mut self, owner_position: Vec2, angle: f32) {
        if angle.is_finite() {
            self.angle = angle;
        }
        self.tip = owner_position + Vec2::from_angle(self.angle) * self.reach;
    }

    pub fn owner(&self) -> CombatantId {
        self.owner
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn reach(&self) -> f32 {
        self.reach
    }

    pub fn tip(&self) -> Vec2 {
        self.tip
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Unit vector along the blade.
    pub fn direction(&self) -> Vec2 {
        Vec2::from_angle(self.angle)
    }
}
