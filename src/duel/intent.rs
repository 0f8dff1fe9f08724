//! Player Intent Translation
//!
//! Turns what the input layer reports (held movement keys or an analog
//! vector, an aim point and edge-triggered ability requests) into forces and
//! ability activations on the player's body.
//!
//! Per tick, in order:
//! 1. Ability cooldowns advance
//! 2. The blade aims at the aim point (the dash direction comes from here)
//! 3. Push / dash requests fire if their ability is ready
//! 4. An armed dash window adds its decaying follow-through force
//! 5. Movement force is added, then the body integrates
//! 6. The blade is re-aimed from the new position

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::abilities::AbilityType;
use super::combatant::Duelist;
use super::events::{CombatEvent, EventBuffer};
use super::tuning::{DashTuning, DuelTuning};

/// Per-axis scale for diagonal key movement (≈ 1/√2).
pub const DIAGONAL_SCALE: f32 = 0.707;

/// Four independent direction keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovementKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl MovementKeys {
    /// Direction in arena coordinates (+y is down). Opposite keys cancel.
    pub fn direction(&self) -> Vec2 {
        let mut x = 0.0;
        let mut y = 0.0;
        if self.left {
            x -= 1.0;
        }
        if self.right {
            x += 1.0;
        }
        if self.up {
            y -= 1.0;
        }
        if self.down {
            y += 1.0;
        }

        if x != 0.0 && y != 0.0 {
            x *= DIAGONAL_SCALE;
            y *= DIAGONAL_SCALE;
        }
        Vec2::new(x, y)
    }
}

/// Everything the player asks for in one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerIntent {
    /// Desired movement direction, length at most 1
    pub movement: Vec2,
    /// Point the blade (and a dash) should aim at
    pub aim: Vec2,
    pub force_push: bool,
    pub force_dash: bool,
}

impl PlayerIntent {
    pub fn from_keys(keys: MovementKeys, aim: Vec2) -> Self {
        Self {
            movement: keys.direction(),
            aim,
            ..Default::default()
        }
    }

    pub fn from_vector(movement: Vec2, aim: Vec2) -> Self {
        Self {
            movement,
            aim,
            ..Default::default()
        }
    }

    pub fn with_push(mut self) -> Self {
        self.force_push = true;
        self
    }

    pub fn with_dash(mut self) -> Self {
        self.force_dash = true;
        self
    }

    /// Movement with non-finite input zeroed and analog input capped at unit length.
    pub fn movement_direction(&self) -> Vec2 {
        if !self.movement.is_finite() {
            return Vec2::ZERO;
        }
        self.movement.clamp_length_max(1.0)
    }

    /// Clear the edge-triggered requests once they have been consumed.
    pub fn consume_triggers(&mut self) {
        self.force_push = false;
        self.force_dash = false;
    }
}

/// Follow-through window after a Force Dash.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DashWindow {
    armed: bool,
    elapsed_ms: f32,
    angle: f32,
}

impl DashWindow {
    pub fn arm(&mut self, angle: f32) {
        self.armed = true;
        self.elapsed_ms = 0.0;
        self.angle = angle;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn elapsed_ms(&self) -> f32 {
        self.elapsed_ms
    }

    /// Advance the window and return this tick's follow-through force, if any.
    /// The force decays linearly from `supplemental_force` to zero across the window.
    pub fn step(&mut self, delta_ms: f32, tuning: &DashTuning) -> Option<Vec2> {
        if !self.armed {
            return None;
        }

        self.elapsed_ms += delta_ms;
        if self.elapsed_ms < tuning.window_ms {
            let progress = self.elapsed_ms / tuning.window_ms;
            let magnitude = tuning.supplemental_force * (1.0 - progress) * (delta_ms / 1000.0);
            Some(Vec2::from_angle(self.angle) * magnitude)
        } else {
            self.armed = false;
            self.elapsed_ms = 0.0;
            None
        }
    }
}

/// Advance the player by one tick of `intent`.
pub fn update_player(
    player: &mut Duelist,
    intent: &PlayerIntent,
    delta_ms: f32,
    tuning: &DuelTuning,
    events: &mut EventBuffer,
) {
    player.tick_abilities(delta_ms);
    player.weapon.update_aim(player.body.position, intent.aim);

    if intent.force_push && player.force_push.activate() {
        debug!("Player used {}", AbilityType::ForcePush.name());
        events.push(CombatEvent::ability_activated(
            player.id,
            AbilityType::ForcePush,
            player.body.position,
        ));
    }

    if intent.force_dash {
        let dashed = player
            .force_dash
            .as_mut()
            .map(|dash| dash.activate())
            .unwrap_or(false);
        if dashed {
            let angle = player.weapon.angle();
            player.body.apply_force(Vec2::from_angle(angle) * tuning.dash.impulse);
            player.dash.arm(angle);
            debug!("Player used {} at angle {:.2}", AbilityType::ForceDash.name(), angle);
            events.push(CombatEvent::ability_activated(
                player.id,
                AbilityType::ForceDash,
                player.body.position,
            ));
        }
    }

    if let Some(force) = player.dash.step(delta_ms, &tuning.dash) {
        player.body.apply_force(force);
    }

    player.body.accelerate(intent.movement_direction(), delta_ms);

    let friction = player.dash.is_armed().then_some(tuning.dash.friction);
    player.body.integrate(delta_ms, friction, &tuning.arena);

    player.weapon.update_aim(player.body.position, intent.aim);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (Duelist, DuelTuning, EventBuffer) {
        let tuning = DuelTuning::default();
        (Duelist::player(&tuning), tuning, EventBuffer::new())
    }

    #[test]
    fn test_diagonal_keys_are_scaled() {
        let keys = MovementKeys {
            right: true,
            down: true,
            ..Default::default()
        };
        assert_eq!(keys.direction(), Vec2::new(0.707, 0.707));
    }

    #[test]
    fn test_opposite_keys_cancel() {
        let keys = MovementKeys {
            left: true,
            right: true,
            up: true,
            ..Default::default()
        };
        assert_eq!(keys.direction(), Vec2::new(0.0, -1.0));
    }

    #[test]
    fn test_analog_movement_is_capped() {
        let intent = PlayerIntent::from_vector(Vec2::new(3.0, 4.0), Vec2::ZERO);
        assert!((intent.movement_direction().length() - 1.0).abs() < 1e-6);

        let broken = PlayerIntent::from_vector(Vec2::new(f32::NAN, 0.0), Vec2::ZERO);
        assert_eq!(broken.movement_direction(), Vec2::ZERO);
    }

    #[test]
    fn test_movement_force_scales_with_delta() {
        let (mut player, tuning, mut events) = setup();
        let start = player.body.position;
        let intent = PlayerIntent::from_keys(
            MovementKeys {
                right: true,
                ..Default::default()
            },
            Vec2::new(700.0, 300.0),
        );

        update_player(&mut player, &intent, 100.0, &tuning, &mut events);

        // 1000 * 0.1 = 100 added, then friction 0.85, then 0.1s of travel
        assert!((player.body.velocity.x - 85.0).abs() < 1e-3);
        assert!((player.body.position.x - (start.x + 8.5)).abs() < 1e-3);
        assert!(events.is_empty());
    }

    #[test]
    fn test_push_only_activates_ability() {
        let (mut player, tuning, mut events) = setup();
        let intent = PlayerIntent::from_vector(Vec2::ZERO, Vec2::new(700.0, 300.0)).with_push();

        update_player(&mut player, &intent, 16.0, &tuning, &mut events);

        assert!(player.force_push.is_active());
        assert_eq!(player.body.velocity, Vec2::ZERO, "Push must not move the pusher");
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_dash_impulse_along_aim() {
        let (mut player, tuning, mut events) = setup();
        let aim = player.body.position + Vec2::new(0.0, 200.0);
        let intent = PlayerIntent::from_vector(Vec2::ZERO, aim).with_dash();

        update_player(&mut player, &intent, 0.0, &tuning, &mut events);

        // Impulse 1200 straight down, dash friction 0.9, zero-length tick
        assert!(player.body.velocity.x.abs() < 1e-3);
        assert!((player.body.velocity.y - 1080.0).abs() < 1e-2);
        assert!(player.dash.is_armed());
        assert!(player.force_dash.as_ref().is_some_and(|d| !d.can_use()));
    }

    #[test]
    fn test_dash_window_decays_and_disarms() {
        let tuning = DuelTuning::default();
        let mut window = DashWindow::default();
        window.arm(0.0);

        let first = window.step(100.0, &tuning.dash).expect("armed window should push");
        let second = window.step(100.0, &tuning.dash).expect("still inside window");
        assert!(first.x > second.x, "Follow-through force must decay");
        assert!((first.x - 400.0 * (2.0 / 3.0) * 0.1).abs() < 1e-3);

        assert!(window.step(100.0, &tuning.dash).is_none(), "Window closes at 300ms");
        assert!(!window.is_armed());
    }

    #[test]
    fn test_dash_on_cooldown_is_ignored() {
        let (mut player, tuning, mut events) = setup();
        let intent = PlayerIntent::from_vector(Vec2::ZERO, Vec2::new(700.0, 300.0)).with_dash();

        update_player(&mut player, &intent, 16.0, &tuning, &mut events);
        let velocity_after_first = player.body.velocity;
        events.clear();

        let mut rested = player.clone();
        update_player(&mut rested, &PlayerIntent { force_dash: false, ..intent }, 16.0, &tuning, &mut events);
        events.clear();
        update_player(&mut player, &intent, 16.0, &tuning, &mut events);

        assert!(events.is_empty(), "Second dash during cooldown must not fire");
        assert_eq!(player.body.velocity, rested.body.velocity);
        assert_ne!(velocity_after_first, Vec2::ZERO);
    }

    #[test]
    fn test_consume_triggers() {
        let mut intent = PlayerIntent::default().with_push().with_dash();
        intent.consume_triggers();
        assert!(!intent.force_push && !intent.force_dash);
    }
}
