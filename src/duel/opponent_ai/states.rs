//! Tactical state machine
//!
//! One enum of states and one pure decision function per state. Each handler
//! reads a `TacticalContext` snapshot and returns a `Decision`; the caller
//! applies it (state change, timer reset, new movement target, strafe flip).
//!
//! ## Transitions
//! - **Patrol** → Engage when the player is inside `ENGAGE_RANGE`
//! - **Engage** → Patrol past `DISENGAGE_RANGE`, → Retreat below 30% health,
//!   occasionally → Flank or Counter
//! - **Retreat** → Engage above 50% health or past `RETREAT_ABANDON_RANGE`
//! - **Flank** → Engage past `MANEUVER_ABORT_RANGE` or after `FLANK_DURATION_MS`
//! - **Counter** → Engage past `MANEUVER_ABORT_RANGE` or after `COUNTER_DURATION_MS`

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;

use super::stance::Stance;
use crate::duel::constants::*;
use crate::duel::rng::GameRng;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum AiState {
    #[default]
    Patrol,
    Engage,
    Retreat,
    Flank,
    Counter,
}

impl AiState {
    pub fn name(&self) -> &'static str {
        match self {
            AiState::Patrol => "Patrol",
            AiState::Engage => "Engage",
            AiState::Retreat => "Retreat",
            AiState::Flank => "Flank",
            AiState::Counter => "Counter",
        }
    }
}

/// Everything a state handler may look at for one tick.
#[derive(Clone, Copy, Debug)]
pub struct TacticalContext {
    pub self_position: Vec2,
    pub player_position: Vec2,
    pub distance: f32,
    pub own_health_pct: f32,
    /// Player position extrapolated by the prediction trait
    pub predicted_player: Vec2,
    /// Player position extrapolated `COUNTER_LEAD_TICKS` ahead
    pub counter_lead: Vec2,
    pub stance: Stance,
    /// Milliseconds since the last state change or patrol replan
    pub state_timer_ms: f32,
    /// +1.0 or -1.0
    pub strafe_direction: f32,
}

impl TacticalContext {
    /// Angle pointing from the player to the opponent.
    fn away_angle(&self) -> f32 {
        let away = self.self_position - self.player_position;
        away.y.atan2(away.x)
    }
}

/// What a state handler wants done this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Decision {
    pub transition: Option<AiState>,
    /// New movement target; `None` keeps the previous one
    pub target: Option<Vec2>,
    pub flip_strafe: bool,
    /// Restart the state timer without changing state
    pub reset_timer: bool,
}

impl Decision {
    fn hold() -> Self {
        Self::default()
    }

    fn transition(to: AiState) -> Self {
        Self {
            transition: Some(to),
            ..Self::default()
        }
    }

    fn move_to(target: Vec2) -> Self {
        Self {
            target: Some(target),
            ..Self::default()
        }
    }
}

/// Keep AI target points away from the walls.
pub fn clamp_target(point: Vec2) -> Vec2 {
    Vec2::new(
        point.x.clamp(AI_TARGET_MIN_X, AI_TARGET_MAX_X),
        point.y.clamp(AI_TARGET_MIN_Y, AI_TARGET_MAX_Y),
    )
}

/// Run the handler for `state`.
pub fn decide(state: AiState, ctx: &TacticalContext, rng: &mut GameRng) -> Decision {
    match state {
        AiState::Patrol => patrol(ctx, rng),
        AiState::Engage => engage(ctx, rng),
        AiState::Retreat => retreat(ctx),
        AiState::Flank => flank(ctx),
        AiState::Counter => counter(ctx),
    }
}

fn patrol(ctx: &TacticalContext, rng: &mut GameRng) -> Decision {
    if ctx.distance < ENGAGE_RANGE {
        return Decision::transition(AiState::Engage);
    }

    if ctx.state_timer_ms <= PATROL_REPLAN_MS {
        return Decision::hold();
    }

    // Wander toward where the player is
    let toward = ctx.player_position - ctx.self_position;
    let angle = toward.y.atan2(toward.x);
    let distance = PATROL_DISTANCE_MIN + rng.random_f32() * PATROL_DISTANCE_SPREAD;

    Decision {
        target: Some(clamp_target(ctx.self_position + Vec2::from_angle(angle) * distance)),
        reset_timer: true,
        ..Decision::default()
    }
}

fn engage(ctx: &TacticalContext, rng: &mut GameRng) -> Decision {
    if ctx.distance > DISENGAGE_RANGE {
        return Decision::transition(AiState::Patrol);
    }
    if ctx.own_health_pct < RETREAT_HP_THRESHOLD {
        return Decision::transition(AiState::Retreat);
    }

    let away_angle = ctx.away_angle();
    let target_distance = ctx.stance.engage_distance(rng);

    let mut decision = if ctx.distance < target_distance - ENGAGE_DISTANCE_TOLERANCE
        || ctx.distance > target_distance + ENGAGE_DISTANCE_TOLERANCE
    {
        // Close or open the gap, anchored on where the player is heading
        Decision::move_to(ctx.predicted_player + Vec2::from_angle(away_angle) * target_distance)
    } else {
        strafe(ctx, away_angle, rng)
    };

    if rng.chance(MANEUVER_CHANCE) {
        let maneuver = if rng.coin_flip() {
            AiState::Flank
        } else {
            AiState::Counter
        };
        decision.transition = Some(maneuver);
    }

    decision
}

/// Circle the player at roughly the current distance.
fn strafe(ctx: &TacticalContext, away_angle: f32, rng: &mut GameRng) -> Decision {
    let strafe_angle = away_angle + FRAC_PI_2 * ctx.strafe_direction;
    let step = STRAFE_DISTANCE_MIN + rng.random_f32() * STRAFE_DISTANCE_SPREAD;

    Decision {
        target: Some(ctx.self_position + Vec2::from_angle(strafe_angle) * step),
        flip_strafe: rng.chance(STRAFE_REVERSE_CHANCE),
        ..Decision::default()
    }
}

fn retreat(ctx: &TacticalContext) -> Decision {
    if ctx.own_health_pct > RECOVERED_HP_THRESHOLD {
        return Decision::transition(AiState::Engage);
    }

    let target = clamp_target(ctx.self_position + Vec2::from_angle(ctx.away_angle()) * RETREAT_DISTANCE);
    let mut decision = Decision::move_to(target);

    if ctx.distance > RETREAT_ABANDON_RANGE {
        decision.transition = Some(AiState::Engage);
    }
    decision
}

fn flank(ctx: &TacticalContext) -> Decision {
    if ctx.distance > MANEUVER_ABORT_RANGE {
        return Decision::transition(AiState::Engage);
    }

    let flank_angle = ctx.away_angle() + FRAC_PI_2 * ctx.strafe_direction;
    let mut decision =
        Decision::move_to(clamp_target(ctx.player_position + Vec2::from_angle(flank_angle) * FLANK_DISTANCE));

    if ctx.state_timer_ms > FLANK_DURATION_MS {
        // Come around the other side next time
        decision.transition = Some(AiState::Engage);
        decision.flip_strafe = true;
    }
    decision
}

fn counter(ctx: &TacticalContext) -> Decision {
    if ctx.distance > MANEUVER_ABORT_RANGE {
        return Decision::transition(AiState::Engage);
    }

    let mut decision = Decision::move_to(ctx.counter_lead + Vec2::from_angle(ctx.away_angle()) * COUNTER_DISTANCE);

    if ctx.state_timer_ms > COUNTER_DURATION_MS {
        decision.transition = Some(AiState::Engage);
    }
    decision
}
