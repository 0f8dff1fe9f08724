//! Opponent AI
//!
//! The opponent is driven by a small tactical brain layered over the same
//! `CombatantBody` physics the player uses:
//!
//! - `personality` - four traits rolled per match that drift with the fight
//! - `memory` - a short buffer of player observations used for prediction
//! - `stance` - short-term posture that sets the preferred engage distance
//! - `states` - the Patrol/Engage/Retreat/Flank/Counter decision functions
//!
//! `update_opponent` runs one tick: think, steer toward the chosen target,
//! aim the blade at the predicted player position and decide on Force Push.

pub mod memory;
pub mod personality;
pub mod stance;
pub mod states;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub use memory::{CombatMemory, Observation};
pub use personality::Personality;
pub use stance::Stance;
pub use states::{decide, AiState, Decision, TacticalContext};

use super::abilities::AbilityType;
use super::body::CombatantBody;
use super::combatant::Duelist;
use super::constants::*;
use super::events::{CombatEvent, EventBuffer};
use super::rng::GameRng;
use super::tuning::DuelTuning;

/// Everything the opponent carries between ticks besides its body.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OpponentAi {
    pub state: AiState,
    pub stance: Stance,
    pub state_timer_ms: f32,
    pub stance_timer_ms: f32,
    /// Point the opponent is steering toward
    pub target: Vec2,
    /// +1.0 or -1.0
    pub strafe_direction: f32,
    pub personality: Personality,
    pub memory: CombatMemory,
    /// Player health as seen on the previous tick, for the push heuristic
    pub observed_player_health: f32,
}

impl OpponentAi {
    pub fn new(spawn: Vec2, player_position: Vec2, player_health: f32, rng: &mut GameRng) -> Self {
        let personality = Personality::roll(rng);
        let strafe_direction = if rng.coin_flip() { 1.0 } else { -1.0 };

        Self {
            state: AiState::Patrol,
            stance: Stance::Balanced,
            state_timer_ms: 0.0,
            stance_timer_ms: 0.0,
            target: spawn,
            strafe_direction,
            personality,
            memory: CombatMemory::new(player_position),
            observed_player_health: player_health,
        }
    }

    /// Observe the player, adapt, and pick this tick's state and target.
    pub fn think(
        &mut self,
        self_body: &CombatantBody,
        player: &CombatantBody,
        delta_ms: f32,
        now_ms: f64,
        rng: &mut GameRng,
    ) {
        self.state_timer_ms += delta_ms;
        self.stance_timer_ms += delta_ms;

        let own_health_pct = self_body.health_pct();
        let player_health_pct = player.health_pct();

        self.memory.observe(player.position, now_ms);
        self.personality.adapt(
            own_health_pct,
            player_health_pct,
            self.memory.defense_success_rate(),
        );

        if self.stance_timer_ms > STANCE_INTERVAL_MS {
            let stance = Stance::choose(own_health_pct, player_health_pct, rng);
            if stance != self.stance {
                debug!("Opponent stance {:?} -> {:?}", self.stance, stance);
            }
            self.stance = stance;
            self.stance_timer_ms = 0.0;
        }

        let ctx = TacticalContext {
            self_position: self_body.position,
            player_position: player.position,
            distance: self_body.distance_to(player.position),
            own_health_pct,
            predicted_player: self.predicted_player(),
            counter_lead: self.memory.predict(COUNTER_LEAD_TICKS),
            stance: self.stance,
            state_timer_ms: self.state_timer_ms,
            strafe_direction: self.strafe_direction,
        };

        let decision = decide(self.state, &ctx, rng);
        self.apply(decision);
    }

    fn apply(&mut self, decision: Decision) {
        if let Some(target) = decision.target {
            self.target = target;
        }
        if decision.flip_strafe {
            self.strafe_direction = -self.strafe_direction;
        }
        if decision.reset_timer {
            self.state_timer_ms = 0.0;
        }
        if let Some(next) = decision.transition {
            if next != self.state {
                debug!("Opponent AI {} -> {}", self.state.name(), next.name());
            }
            self.state = next;
            self.state_timer_ms = 0.0;
        }
    }

    /// Where the opponent expects the player to be, scaled by the prediction trait.
    pub fn predicted_player(&self) -> Vec2 {
        self.memory.predict(self.personality.prediction)
    }

    /// Decide whether to Force Push this tick. The player-health snapshot is
    /// refreshed on every call, so a drop only shows up one tick after the hit.
    pub fn wants_force_push(&mut self, own_health_pct: f32, distance: f32, player_health: f32) -> bool {
        let player_damage = self.observed_player_health - player_health;
        self.observed_player_health = player_health;

        player_damage > PUSH_HEAVY_DAMAGE
            || (own_health_pct < PUSH_LOW_HP_THRESHOLD && distance < PUSH_CLOSE_RANGE)
            || (player_damage > PUSH_EMERGENCY_DAMAGE && own_health_pct < PUSH_EMERGENCY_HP_THRESHOLD)
    }
}

/// Advance the opponent by one tick.
#[allow(clippy::too_many_arguments)]
pub fn update_opponent(
    opponent: &mut Duelist,
    ai: &mut OpponentAi,
    player: &CombatantBody,
    delta_ms: f32,
    now_ms: f64,
    tuning: &DuelTuning,
    rng: &mut GameRng,
    events: &mut EventBuffer,
) {
    opponent.tick_abilities(delta_ms);
    ai.think(&opponent.body, player, delta_ms, now_ms, rng);

    let to_target = ai.target - opponent.body.position;
    if to_target.length() > ARRIVAL_THRESHOLD {
        opponent.body.accelerate(to_target.normalize_or_zero(), delta_ms);
    }
    opponent.body.integrate(delta_ms, None, &tuning.arena);

    opponent.weapon.update_aim(opponent.body.position, ai.predicted_player());
    opponent.weapon.active = true;

    let distance = opponent.body.distance_to(player.position);
    if ai.wants_force_push(opponent.body.health_pct(), distance, player.health())
        && opponent.force_push.activate()
    {
        debug!("Opponent used {}", AbilityType::ForcePush.name());
        events.push(CombatEvent::ability_activated(
            opponent.id,
            AbilityType::ForcePush,
            opponent.body.position,
        ));
    }
}
