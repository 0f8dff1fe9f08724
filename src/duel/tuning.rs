//! Data-Driven Duel Tuning
//!
//! Every combat number that affects balance lives in `DuelTuning`. The built-in
//! values (`DuelTuning::default()`) reproduce the classic duel; a RON file such
//! as `assets/config/duel.ron` can override them without recompiling.
//!
//! ## Usage
//! ```ignore
//! let tuning = load_duel_tuning(Path::new(DEFAULT_TUNING_PATH))?;
//! let encounter = Encounter::new(tuning, GameRng::from_seed(7));
//! ```

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default location of the tuning file, relative to the working directory.
pub const DEFAULT_TUNING_PATH: &str = "assets/config/duel.ron";

/// Rectangular arena. Positions are clamped into it after every integration step.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArenaBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl ArenaBounds {
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        point.clamp(self.min, self.max)
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x && point.x <= self.max.x && point.y >= self.min.y && point.y <= self.max.y
    }
}

impl Default for ArenaBounds {
    fn default() -> Self {
        Self {
            min: Vec2::new(20.0, 20.0),
            max: Vec2::new(780.0, 580.0),
        }
    }
}

/// Physical stats for one combatant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyTuning {
    /// Spawn position in arena coordinates
    pub spawn: Vec2,
    pub max_health: f32,
    /// Movement acceleration in units/second
    pub speed: f32,
    /// Multiplicative velocity decay applied once per tick
    pub friction: f32,
}

/// Cooldown and active window for one ability.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AbilityTuning {
    pub cooldown_ms: f32,
    pub active_duration_ms: f32,
}

/// Force Dash movement profile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DashTuning {
    /// Immediate impulse along the aim direction
    pub impulse: f32,
    /// Length of the decaying follow-through window
    pub window_ms: f32,
    /// Follow-through force at the start of the window, decaying linearly to zero
    pub supplemental_force: f32,
    /// Friction used while the window is armed
    pub friction: f32,
}

/// Lightsaber geometry and damage.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MeleeTuning {
    /// Blade length from the owner's center to the tip
    pub reach: f32,
    /// A hit lands when the tip is closer than this to the defender's center
    pub hit_radius: f32,
    pub damage_min: f32,
    pub damage_max: f32,
    /// Impulse applied to the opponent when the player lands a hit
    pub knockback: f32,
}

/// Complete tuning for a duel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DuelTuning {
    /// Fixed at the default 800x600 arena. The AI target clamp in
    /// `constants` sits 30 units inside these walls, so the arena is not
    /// read from tuning files.
    #[serde(skip)]
    pub arena: ArenaBounds,
    pub player: BodyTuning,
    pub opponent: BodyTuning,
    pub force_push: AbilityTuning,
    pub force_dash: AbilityTuning,
    pub dash: DashTuning,
    pub melee: MeleeTuning,
    /// Impulse applied to the pushed combatant on every tick the push is active
    pub push_impulse: f32,
    /// Minimum time between two damage applications on the same combatant
    pub damage_cooldown_ms: f32,
    /// How long a combatant flashes after being hit
    pub flash_duration_ms: f32,
    /// Larger deltas are clamped to this to keep the integrator stable
    pub max_tick_delta_ms: f32,
}

impl Default for DuelTuning {
    fn default() -> Self {
        Self {
            arena: ArenaBounds::default(),
            player: BodyTuning {
                spawn: Vec2::new(100.0, 300.0),
                max_health: 200.0,
                speed: 1000.0,
                friction: 0.85,
            },
            opponent: BodyTuning {
                spawn: Vec2::new(700.0, 300.0),
                max_health: 100.0,
                speed: 1000.0,
                friction: 0.85,
            },
            force_push: AbilityTuning {
                cooldown_ms: 10_000.0,
                active_duration_ms: 500.0,
            },
            force_dash: AbilityTuning {
                cooldown_ms: 8_000.0,
                active_duration_ms: 500.0,
            },
            dash: DashTuning {
                impulse: 1200.0,
                window_ms: 300.0,
                supplemental_force: 400.0,
                friction: 0.9,
            },
            melee: MeleeTuning {
                reach: 80.0,
                hit_radius: 14.0,
                damage_min: 5.0,
                damage_max: 10.0,
                knockback: 800.0,
            },
            push_impulse: 150.0,
            damage_cooldown_ms: 100.0,
            flash_duration_ms: 200.0,
            max_tick_delta_ms: 250.0,
        }
    }
}

impl DuelTuning {
    /// Check the tuning for values that would break the simulation.
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in self.float_fields() {
            if !value.is_finite() {
                return Err(format!("{} must be finite, got {}", name, value));
            }
        }

        if self.arena.min.x >= self.arena.max.x || self.arena.min.y >= self.arena.max.y {
            return Err(format!(
                "arena min {:?} must be strictly below max {:?}",
                self.arena.min, self.arena.max
            ));
        }

        for (label, body) in [("player", &self.player), ("opponent", &self.opponent)] {
            if body.max_health <= 0.0 {
                return Err(format!("{} max_health must be positive", label));
            }
            if body.speed < 0.0 {
                return Err(format!("{} speed must be non-negative", label));
            }
            if !(0.0..=1.0).contains(&body.friction) {
                return Err(format!("{} friction must be within 0.0..=1.0", label));
            }
            if !self.arena.contains(body.spawn) {
                return Err(format!("{} spawn {:?} is outside the arena", label, body.spawn));
            }
        }

        for (label, ability) in [("force_push", &self.force_push), ("force_dash", &self.force_dash)] {
            if ability.cooldown_ms < 0.0 || ability.active_duration_ms < 0.0 {
                return Err(format!("{} timings must be non-negative", label));
            }
        }

        if !(0.0..=1.0).contains(&self.dash.friction) {
            return Err("dash friction must be within 0.0..=1.0".to_string());
        }
        if self.dash.window_ms < 0.0 {
            return Err("dash window_ms must be non-negative".to_string());
        }
        if self.melee.damage_min < 0.0 || self.melee.damage_min > self.melee.damage_max {
            return Err(format!(
                "melee damage range {}..{} is invalid",
                self.melee.damage_min, self.melee.damage_max
            ));
        }
        if self.melee.reach <= 0.0 || self.melee.hit_radius <= 0.0 {
            return Err("melee reach and hit_radius must be positive".to_string());
        }
        if self.damage_cooldown_ms < 0.0 || self.flash_duration_ms < 0.0 {
            return Err("damage_cooldown_ms and flash_duration_ms must be non-negative".to_string());
        }
        if self.max_tick_delta_ms <= 0.0 {
            return Err("max_tick_delta_ms must be positive".to_string());
        }

        Ok(())
    }

    fn float_fields(&self) -> [(&'static str, f32); 31] {
        [
            ("arena.min.x", self.arena.min.x),
            ("arena.min.y", self.arena.min.y),
            ("arena.max.x", self.arena.max.x),
            ("arena.max.y", self.arena.max.y),
            ("player.spawn.x", self.player.spawn.x),
            ("player.spawn.y", self.player.spawn.y),
            ("player.max_health", self.player.max_health),
            ("player.speed", self.player.speed),
            ("player.friction", self.player.friction),
            ("opponent.spawn.x", self.opponent.spawn.x),
            ("opponent.spawn.y", self.opponent.spawn.y),
            ("opponent.max_health", self.opponent.max_health),
            ("opponent.speed", self.opponent.speed),
            ("opponent.friction", self.opponent.friction),
            ("force_push.cooldown_ms", self.force_push.cooldown_ms),
            ("force_push.active_duration_ms", self.force_push.active_duration_ms),
            ("force_dash.cooldown_ms", self.force_dash.cooldown_ms),
            ("force_dash.active_duration_ms", self.force_dash.active_duration_ms),
            ("dash.impulse", self.dash.impulse),
            ("dash.window_ms", self.dash.window_ms),
            ("dash.supplemental_force", self.dash.supplemental_force),
            ("dash.friction", self.dash.friction),
            ("melee.reach", self.melee.reach),
            ("melee.hit_radius", self.melee.hit_radius),
            ("melee.damage_min", self.melee.damage_min),
            ("melee.damage_max", self.melee.damage_max),
            ("melee.knockback", self.melee.knockback),
            ("push_impulse", self.push_impulse),
            ("damage_cooldown_ms", self.damage_cooldown_ms),
            ("flash_duration_ms", self.flash_duration_ms),
            ("max_tick_delta_ms", self.max_tick_delta_ms),
        ]
    }

    /// Clamp a host-supplied delta into the range the integrator is stable for.
    /// Negative and non-finite deltas become zero.
    pub fn sanitize_delta(&self, delta_ms: f32) -> f32 {
        if !delta_ms.is_finite() || delta_ms <= 0.0 {
            return 0.0;
        }
        delta_ms.min(self.max_tick_delta_ms)
    }
}

/// Parse tuning from RON text and validate it.
pub fn parse_duel_tuning(contents: &str) -> Result<DuelTuning, String> {
    let tuning: DuelTuning =
        ron::from_str(contents).map_err(|e| format!("Failed to parse duel tuning: {}", e))?;
    tuning.validate()?;
    Ok(tuning)
}

/// Load tuning from a RON file.
pub fn load_duel_tuning(path: &Path) -> Result<DuelTuning, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;

    let tuning = parse_duel_tuning(&contents)
        .map_err(|e| format!("{} ({})", e, path.display()))?;

    info!("Loaded duel tuning from {}", path.display());
    Ok(tuning)
}
