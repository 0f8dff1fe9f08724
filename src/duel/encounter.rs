//! Encounter Resolver
//!
//! Owns both duelists, the opponent's AI and the RNG, and advances them one
//! tick at a time:
//!
//! 1. Sanitize the delta (negative/NaN to zero, spikes capped)
//! 2. Update the player from its intent (skipped once dead)
//! 3. Update the opponent through its AI (skipped once dead)
//! 4. Resolve blade hits and active pushes, only while both are alive
//! 5. Settle the match outcome once either side is down
//!
//! The encounter is also a bevy `Resource` so `DuelPlugin` can drive it, but
//! nothing here depends on the ECS; tests and the headless runner call
//! `tick` directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::body::CombatantId;
use super::clock::MonotonicClock;
use super::combatant::Duelist;
use super::events::{CombatEvent, EventBuffer};
use super::intent::{update_player, PlayerIntent};
use super::opponent_ai::{update_opponent, OpponentAi};
use super::rng::GameRng;
use super::snapshot::EncounterSnapshot;
use super::tuning::DuelTuning;
use super::view::{CombatantView, FrameView};

/// How the duel ended.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum MatchOutcome {
    PlayerWins,
    OpponentWins,
    /// Both fell on the same tick, or the match timed out
    Draw,
}

impl MatchOutcome {
    pub fn banner(&self) -> &'static str {
        match self {
            MatchOutcome::PlayerWins => "PLAYER WINS!",
            MatchOutcome::OpponentWins => "OPPONENT WINS!",
            MatchOutcome::Draw => "DRAW!",
        }
    }

    pub fn winner(&self) -> Option<CombatantId> {
        match self {
            MatchOutcome::PlayerWins => Some(CombatantId::Player),
            MatchOutcome::OpponentWins => Some(CombatantId::Opponent),
            MatchOutcome::Draw => None,
        }
    }
}

#[derive(Resource, Debug)]
pub struct Encounter {
    tuning: DuelTuning,
    pub player: Duelist,
    pub opponent: Duelist,
    pub ai: OpponentAi,
    rng: GameRng,
    events: EventBuffer,
    outcome: Option<MatchOutcome>,
    tick_count: u64,
}

impl Encounter {
    pub fn new(tuning: DuelTuning, mut rng: GameRng) -> Self {
        let player = Duelist::player(&tuning);
        let opponent = Duelist::opponent(&tuning);
        let ai = OpponentAi::new(
            opponent.body.position,
            player.body.position,
            player.body.health(),
            &mut rng,
        );

        info!(
            "Duel set up (seed: {:?}, opponent personality: {:?})",
            rng.seed, ai.personality
        );

        Self {
            tuning,
            player,
            opponent,
            ai,
            rng,
            events: EventBuffer::new(),
            outcome: None,
            tick_count: 0,
        }
    }

    /// Rebuild an encounter from a snapshot. The generator resumes where the
    /// snapshot left it, so the restored duel continues exactly as the live one.
    pub fn restore(snapshot: EncounterSnapshot, tuning: DuelTuning) -> Self {
        Self {
            tuning,
            player: snapshot.player,
            opponent: snapshot.opponent,
            ai: snapshot.ai,
            rng: snapshot.rng,
            events: EventBuffer::new(),
            outcome: snapshot.outcome,
            tick_count: snapshot.tick,
        }
    }

    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            tick: self.tick_count,
            player: self.player.clone(),
            opponent: self.opponent.clone(),
            ai: self.ai.clone(),
            rng: self.rng.clone(),
            outcome: self.outcome,
        }
    }

    /// Advance the duel by `delta_ms` and return the events it produced.
    /// Once the match is over, ticks are no-ops that return no events.
    ///
    /// The push and dash requests in `intent` are edge triggers: they are
    /// cleared here, so a held request fires once rather than on every
    /// cooldown expiry.
    pub fn tick(
        &mut self,
        clock: &impl MonotonicClock,
        delta_ms: f32,
        intent: &mut PlayerIntent,
    ) -> &[CombatEvent] {
        let intent = {
            let current = *intent;
            intent.consume_triggers();
            current
        };

        self.events.clear();
        if self.outcome.is_some() {
            return &self.events;
        }

        let delta_ms = self.sanitize_delta(delta_ms);
        let now_ms = clock.now_ms();

        if self.player.is_alive() {
            update_player(&mut self.player, &intent, delta_ms, &self.tuning, &mut self.events);
        }

        if self.opponent.is_alive() {
            update_opponent(
                &mut self.opponent,
                &mut self.ai,
                &self.player.body,
                delta_ms,
                now_ms,
                &self.tuning,
                &mut self.rng,
                &mut self.events,
            );
        }

        if self.player.is_alive() && self.opponent.is_alive() {
            self.resolve_collisions(now_ms);
        }

        self.settle_outcome();
        self.tick_count += 1;

        &self.events
    }

    fn sanitize_delta(&self, delta_ms: f32) -> f32 {
        let sanitized = self.tuning.sanitize_delta(delta_ms);
        if delta_ms.is_finite() && delta_ms > self.tuning.max_tick_delta_ms {
            warn!(
                "Tick delta {:.1}ms exceeds {:.1}ms, clamping",
                delta_ms, self.tuning.max_tick_delta_ms
            );
        } else if !delta_ms.is_finite() || delta_ms < 0.0 {
            warn!("Ignoring invalid tick delta {}", delta_ms);
        }
        sanitized
    }

    fn resolve_collisions(&mut self, now_ms: f64) {
        // Player blade first; the opponent's blade still swings this tick
        // even if the player's strike just dropped it.
        strike(
            &self.player,
            &mut self.opponent,
            now_ms,
            &self.tuning,
            &mut self.rng,
            &mut self.events,
        );
        strike(
            &self.opponent,
            &mut self.player,
            now_ms,
            &self.tuning,
            &mut self.rng,
            &mut self.events,
        );

        push(&self.player, &mut self.opponent, &self.tuning, &mut self.events);
        push(&self.opponent, &mut self.player, &self.tuning, &mut self.events);
    }

    fn settle_outcome(&mut self) {
        if self.outcome.is_some() {
            return;
        }

        let outcome = match (self.player.is_alive(), self.opponent.is_alive()) {
            (true, true) => return,
            (true, false) => MatchOutcome::PlayerWins,
            (false, true) => MatchOutcome::OpponentWins,
            (false, false) => MatchOutcome::Draw,
        };

        info!(
            "{} after {} ticks (player {:.0}/{:.0}, opponent {:.0}/{:.0})",
            outcome.banner(),
            self.tick_count + 1,
            self.player.body.health(),
            self.player.body.max_health(),
            self.opponent.body.health(),
            self.opponent.body.max_health(),
        );
        self.outcome = Some(outcome);
    }

    /// End a match that ran out of time. Has no effect on a decided match.
    pub fn declare_timeout(&mut self) -> MatchOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        info!("Duel timed out after {} ticks, declaring a draw", self.tick_count);
        self.outcome = Some(MatchOutcome::Draw);
        MatchOutcome::Draw
    }

    pub fn is_match_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    /// Events produced by the most recent tick.
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn tuning(&self) -> &DuelTuning {
        &self.tuning
    }

    pub fn seed(&self) -> Option<u64> {
        self.rng.seed
    }

    pub fn duelist(&self, id: CombatantId) -> &Duelist {
        match id {
            CombatantId::Player => &self.player,
            CombatantId::Opponent => &self.opponent,
        }
    }

    /// Read model for a renderer or HUD.
    pub fn frame(&self, clock: &impl MonotonicClock) -> FrameView {
        let now_ms = clock.now_ms();
        FrameView {
            tick: self.tick_count,
            now_ms,
            player: CombatantView::of(&self.player, now_ms),
            opponent: CombatantView::of(&self.opponent, now_ms),
            events: self.events.clone(),
            outcome: self.outcome,
            ai_state: self.ai.state,
            stance: self.ai.stance,
        }
    }
}

/// Blade tip against the defender's center. Only the player's strikes knock back.
fn strike(
    attacker: &Duelist,
    defender: &mut Duelist,
    now_ms: f64,
    tuning: &DuelTuning,
    rng: &mut GameRng,
    events: &mut EventBuffer,
) {
    if !attacker.weapon.is_active() || !defender.is_alive() {
        return;
    }
    if attacker.weapon.tip().distance(defender.body.position) >= tuning.melee.hit_radius {
        return;
    }
    if !defender.body.can_take_damage(now_ms) {
        return;
    }

    let roll = rng.random_range(tuning.melee.damage_min, tuning.melee.damage_max);
    let Some(dealt) = defender.body.take_damage(roll, now_ms) else {
        return;
    };

    if attacker.id == CombatantId::Player {
        defender
            .body
            .apply_force(direction_between(attacker.body.position, defender.body.position) * tuning.melee.knockback);
    }

    debug!(
        "{} hit {} for {:.1} ({:.0} left)",
        attacker.id.name(),
        defender.id.name(),
        dealt,
        defender.body.health()
    );
    events.push(CombatEvent::melee_hit(attacker.id, defender.body.position, dealt));
}

/// One push impulse for every tick the pusher's Force Push is active, at any range.
fn push(pusher: &Duelist, target: &mut Duelist, tuning: &DuelTuning, events: &mut EventBuffer) {
    if !pusher.force_push.is_active() {
        return;
    }

    target
        .body
        .apply_force(direction_between(pusher.body.position, target.body.position) * tuning.push_impulse);
    events.push(CombatEvent::force_push(pusher.id, pusher.body.position, tuning.push_impulse));
}

/// Unit vector from `from` toward `to`. Coincident points resolve to +x.
fn direction_between(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    Vec2::from_angle(delta.y.atan2(delta.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duel::clock::SimClock;

    fn encounter(seed: u64) -> Encounter {
        Encounter::new(DuelTuning::default(), GameRng::from_seed(seed))
    }

    #[test]
    fn test_new_encounter_is_live() {
        let duel = encounter(1);
        assert!(!duel.is_match_over());
        assert_eq!(duel.tick_count(), 0);
        assert_eq!(duel.seed(), Some(1));
        assert_eq!(duel.player.body.health(), 200.0);
        assert_eq!(duel.opponent.body.health(), 100.0);
    }

    #[test]
    fn test_direction_between() {
        let right = direction_between(Vec2::ZERO, Vec2::new(10.0, 0.0));
        assert!((right - Vec2::X).length() < 1e-6);
        let same = direction_between(Vec2::ONE, Vec2::ONE);
        assert!((same - Vec2::X).length() < 1e-6);
    }

    #[test]
    fn test_outcome_settles_once() {
        let mut duel = encounter(2);
        let clock = SimClock::new();
        duel.opponent.body.take_damage(1000.0, 0.0);

        duel.tick(&clock, 16.0, &mut PlayerIntent::default());
        assert_eq!(duel.outcome(), Some(MatchOutcome::PlayerWins));
        let ticks = duel.tick_count();

        let events = duel.tick(&clock, 16.0, &mut PlayerIntent::default()).len();
        assert_eq!(events, 0);
        assert_eq!(duel.tick_count(), ticks, "Finished duels do not advance");
    }

    #[test]
    fn test_double_knockout_is_a_draw() {
        let mut duel = encounter(3);
        duel.player.body.take_damage(1000.0, 0.0);
        duel.opponent.body.take_damage(1000.0, 0.0);
        duel.tick(&SimClock::new(), 16.0, &mut PlayerIntent::default());
        assert_eq!(duel.outcome(), Some(MatchOutcome::Draw));
        assert_eq!(MatchOutcome::Draw.winner(), None);
    }

    #[test]
    fn test_timeout_does_not_override_result() {
        let mut duel = encounter(4);
        assert_eq!(duel.declare_timeout(), MatchOutcome::Draw);

        let mut decided = encounter(5);
        decided.player.body.take_damage(1000.0, 0.0);
        decided.tick(&SimClock::new(), 16.0, &mut PlayerIntent::default());
        assert_eq!(decided.declare_timeout(), MatchOutcome::OpponentWins);
    }

    #[test]
    fn test_tick_consumes_ability_triggers() {
        let mut duel = encounter(7);
        let mut clock = SimClock::new();
        let mut intent = PlayerIntent::from_vector(Vec2::ZERO, Vec2::new(700.0, 300.0))
            .with_push()
            .with_dash();

        duel.tick(&clock, 16.0, &mut intent);
        assert!(!intent.force_push && !intent.force_dash, "Triggers fire once");
        assert!(duel.player.force_push.is_active());

        // Reusing the same intent past the cooldown must not push again
        let mut activations = 0;
        for _ in 0..60 {
            clock.advance(200.0);
            let events = duel.tick(&clock, 200.0, &mut intent);
            activations += events
                .iter()
                .filter(|e| {
                    e.source == CombatantId::Player
                        && matches!(e.kind, crate::duel::events::CombatEventKind::AbilityActivated(_))
                })
                .count();
            if duel.is_match_over() {
                break;
            }
        }
        assert_eq!(activations, 0);
    }

    #[test]
    fn test_frame_reports_cooldown_seconds() {
        let mut duel = encounter(6);
        let clock = SimClock::new();
        let mut intent = PlayerIntent::from_vector(Vec2::ZERO, Vec2::new(700.0, 300.0)).with_push();
        duel.tick(&clock, 16.0, &mut intent);

        let frame = duel.frame(&clock);
        let push = frame
            .player
            .ability(crate::duel::abilities::AbilityType::ForcePush)
            .expect("player has Force Push");
        assert!(push.active);
        assert_eq!(push.cooldown_secs, 10);
        assert!(frame.player.ability(crate::duel::abilities::AbilityType::ForceDash).is_some());
        assert!(frame.opponent.ability(crate::duel::abilities::AbilityType::ForceDash).is_none());
    }
}
