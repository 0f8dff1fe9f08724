//! Combatant physics and health
//!
//! `CombatantBody` is shared by the player and the opponent: an impulse-model
//! integrator with per-tick friction, arena clamping, a health pool and a
//! damage-cooldown gate. Timestamps come from the caller's clock.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::tuning::{ArenaBounds, BodyTuning};

/// Identifies one side of the duel. Weapons and events refer to combatants
/// by id rather than holding references to them.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum CombatantId {
    Player,
    Opponent,
}

impl CombatantId {
    pub fn other(&self) -> CombatantId {
        match self {
            CombatantId::Player => CombatantId::Opponent,
            CombatantId::Opponent => CombatantId::Player,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CombatantId::Player => "Player",
            CombatantId::Opponent => "Opponent",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatantBody {
    pub position: Vec2,
    pub velocity: Vec2,
    health: f32,
    max_health: f32,
    /// Movement acceleration in units/second
    pub speed: f32,
    /// Baseline per-tick velocity decay
    pub friction: f32,
    last_damage_ms: Option<f64>,
    damage_cooldown_ms: f32,
    flash_duration_ms: f32,
}

impl CombatantBody {
    pub fn new(tuning: &BodyTuning, damage_cooldown_ms: f32, flash_duration_ms: f32) -> Self {
        Self {
            position: tuning.spawn,
            velocity: Vec2::ZERO,
            health: tuning.max_health,
            max_health: tuning.max_health,
            speed: tuning.speed,
            friction: tuning.friction,
            last_damage_ms: None,
            damage_cooldown_ms,
            flash_duration_ms,
        }
    }

    /// Add an impulse straight onto the velocity. Non-finite forces are dropped.
    pub fn apply_force(&mut self, force: Vec2) {
        if force.is_finite() {
            self.velocity += force;
        }
    }

    /// Apply friction, move by the velocity and clamp into the arena.
    pub fn integrate(&mut self, delta_ms: f32, friction_override: Option<f32>, arena: &ArenaBounds) {
        let friction = friction_override.unwrap_or(self.friction);
        self.velocity *= friction;
        self.position += self.velocity * (delta_ms / 1000.0);
        self.position = arena.clamp(self.position);
    }

    /// Accumulate a movement force of `direction * speed` scaled by the tick length.
    pub fn accelerate(&mut self, direction: Vec2, delta_ms: f32) {
        self.apply_force(direction * self.speed * (delta_ms / 1000.0));
    }

    pub fn can_take_damage(&self, now_ms: f64) -> bool {
        match self.last_damage_ms {
            Some(last) => now_ms - last > self.damage_cooldown_ms as f64,
            None => true,
        }
    }

    /// Apply damage if the cooldown gate is open. Returns the health actually lost.
    pub fn take_damage(&mut self, amount: f32, now_ms: f64) -> Option<f32> {
        if amount.is_nan() || !self.can_take_damage(now_ms) {
            return None;
        }

        let before = self.health;
        self.health = (self.health - amount).clamp(0.0, self.max_health);
        self.last_damage_ms = Some(now_ms);
        Some(before - self.health)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// True for `flash_duration_ms` after the last hit. Cosmetic only.
    pub fn is_flashing(&self, now_ms: f64) -> bool {
        match self.last_damage_ms {
            Some(last) => now_ms - last <= self.flash_duration_ms as f64,
            None => false,
        }
    }

    pub fn health(&self) -> f32 {
        self.health
    }

    pub fn max_health(&self) -> f32 {
        self.max_health
    }

    /// Health as a fraction (0.0 to 1.0)
    pub fn health_pct(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn last_damage_ms(&self) -> Option<f64> {
        self.last_damage_ms
    }

    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body() -> CombatantBody {
        let tuning = BodyTuning {
            spawn: Vec2::new(400.0, 300.0),
            max_health: 100.0,
            speed: 1000.0,
            friction: 0.85,
        };
        CombatantBody::new(&tuning, 100.0, 200.0)
    }

    #[test]
    fn test_integrate_applies_friction_then_moves() {
        let mut b = body();
        b.apply_force(Vec2::new(100.0, 0.0));
        b.integrate(1000.0, None, &ArenaBounds::default());
        assert!((b.velocity.x - 85.0).abs() < 1e-4);
        assert!((b.position.x - 485.0).abs() < 1e-3);
    }

    #[test]
    fn test_integrate_friction_override() {
        let mut b = body();
        b.apply_force(Vec2::new(0.0, 100.0));
        b.integrate(0.0, Some(0.9), &ArenaBounds::default());
        assert!((b.velocity.y - 90.0).abs() < 1e-4);
        assert_eq!(b.position, Vec2::new(400.0, 300.0), "Zero delta must not move");
    }

    #[test]
    fn test_position_clamped_after_huge_velocity() {
        let arena = ArenaBounds::default();
        let mut b = body();
        for force in [
            Vec2::new(1e9, 1e9),
            Vec2::new(-1e12, 5e8),
            Vec2::new(3e7, -9e9),
            Vec2::new(f32::MAX, f32::MAX),
        ] {
            b.velocity = Vec2::ZERO;
            b.apply_force(force);
            b.integrate(1000.0, None, &arena);
            assert!(arena.contains(b.position), "Position {:?} escaped arena", b.position);
        }
    }

    #[test]
    fn test_non_finite_force_is_ignored() {
        let mut b = body();
        b.apply_force(Vec2::new(f32::NAN, 1.0));
        b.apply_force(Vec2::new(f32::INFINITY, 0.0));
        assert_eq!(b.velocity, Vec2::ZERO);
    }

    #[test]
    fn test_health_stays_in_range() {
        let mut b = body();
        let mut now = 0.0;
        for amount in [5.0, -500.0, 1e9, -1e9, 0.0, f32::INFINITY, f32::NEG_INFINITY, f32::NAN, 42.0] {
            b.take_damage(amount, now);
            assert!(
                b.health() >= 0.0 && b.health() <= b.max_health(),
                "Health {} out of range after {}",
                b.health(),
                amount
            );
            now += 150.0;
        }
    }

    #[test]
    fn test_damage_cooldown_gate() {
        let mut b = body();
        assert!(b.can_take_damage(0.0), "Fresh body can be hit immediately");
        assert_eq!(b.take_damage(10.0, 1000.0), Some(10.0));

        assert!(!b.can_take_damage(1000.0));
        assert!(!b.can_take_damage(1099.0));
        assert!(!b.can_take_damage(1100.0), "Gate requires strictly more than 100ms");
        assert_eq!(b.take_damage(10.0, 1050.0), None);
        assert_eq!(b.health(), 90.0);

        assert!(b.can_take_damage(1100.5));
        assert_eq!(b.take_damage(10.0, 1101.0), Some(10.0));
        assert_eq!(b.health(), 80.0);
    }

    #[test]
    fn test_flash_window() {
        let mut b = body();
        assert!(!b.is_flashing(0.0));
        b.take_damage(1.0, 500.0);
        assert!(b.is_flashing(500.0));
        assert!(b.is_flashing(700.0));
        assert!(!b.is_flashing(701.0));
    }

    #[test]
    fn test_is_alive() {
        let mut b = body();
        assert!(b.is_alive());
        b.take_damage(100.0, 0.0);
        assert!(!b.is_alive());
        assert_eq!(b.health_pct(), 0.0);
    }

    #[test]
    fn test_combatant_id_other() {
        assert_eq!(CombatantId::Player.other(), CombatantId::Opponent);
        assert_eq!(CombatantId::Opponent.other(), CombatantId::Player);
    }
}
