//! Bevy integration
//!
//! `DuelPlugin` owns one `Encounter` and advances it once per `Update` using
//! the frame's `Time` delta. Systems are grouped into phases:
//!
//! 1. `Input` - whoever controls the player writes `PendingIntent`
//! 2. `Simulation` - `advance_duel` ticks the encounter and fires events
//! 3. `Resolution` - the combat log and match bookkeeping read those events
//!
//! Hosts only add systems to `Input` (keyboard, scripted pilots) or
//! `Resolution` (effects, HUD); the simulation step itself is shared.

use bevy::prelude::*;
use smallvec::SmallVec;

use super::clock::{MonotonicClock, SimClock};
use super::encounter::Encounter;
use super::intent::PlayerIntent;
use super::rng::GameRng;
use super::tuning::DuelTuning;
use crate::combat::events::{CombatEventFired, MatchEndedEvent};
use crate::combat::log::{CombatLog, CombatLogEventType};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum DuelSystemPhase {
    /// Phase 1: player intent for this frame
    Input,
    /// Phase 2: one encounter tick
    Simulation,
    /// Phase 3: logging and outcome handling
    Resolution,
}

/// Simulation clock advanced by the frame delta.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct DuelClock(pub SimClock);

/// Player intent for the next tick. `Encounter::tick` clears the ability triggers.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct PendingIntent(pub PlayerIntent);

pub struct DuelPlugin {
    pub tuning: DuelTuning,
    /// Fixed seed for a reproducible duel; entropy when `None`
    pub seed: Option<u64>,
}

impl Plugin for DuelPlugin {
    fn build(&self, app: &mut App) {
        let rng = match self.seed {
            Some(seed) => {
                info!("Using deterministic RNG with seed: {}", seed);
                GameRng::from_seed(seed)
            }
            None => {
                info!("Using non-deterministic RNG (no seed provided)");
                GameRng::from_entropy()
            }
        };

        app.insert_resource(Encounter::new(self.tuning.clone(), rng))
            .init_resource::<DuelClock>()
            .init_resource::<PendingIntent>()
            .init_resource::<CombatLog>()
            .add_event::<CombatEventFired>()
            .add_event::<MatchEndedEvent>()
            .add_systems(Startup, start_combat_log);

        configure_duel_system_ordering(app);
        add_core_duel_systems(app);
    }
}

pub fn configure_duel_system_ordering(app: &mut App) {
    app.configure_sets(
        Update,
        (
            DuelSystemPhase::Input,
            DuelSystemPhase::Simulation,
            DuelSystemPhase::Resolution,
        )
            .chain(),
    );
}

pub fn add_core_duel_systems(app: &mut App) {
    app.add_systems(Update, advance_duel.in_set(DuelSystemPhase::Simulation))
        .add_systems(Update, record_combat_log.in_set(DuelSystemPhase::Resolution));
}

fn start_combat_log(mut combat_log: ResMut<CombatLog>) {
    combat_log.clear();
    combat_log.log(CombatLogEventType::MatchEvent, "Duel started!".to_string());
}

/// Tick the encounter by this frame's delta and publish what happened.
pub fn advance_duel(
    time: Res<Time>,
    mut clock: ResMut<DuelClock>,
    mut intent: ResMut<PendingIntent>,
    mut encounter: ResMut<Encounter>,
    mut fired: EventWriter<CombatEventFired>,
    mut ended: EventWriter<MatchEndedEvent>,
) {
    if encounter.is_match_over() {
        return;
    }

    let delta_ms = time.delta_secs() * 1000.0;
    clock.0.advance(delta_ms);

    let events = encounter.tick(&clock.0, delta_ms, &mut intent.0);
    fired.send_batch(events.iter().copied().map(CombatEventFired));

    if let Some(outcome) = encounter.outcome() {
        let defeated: SmallVec<[_; 2]> = [&encounter.player, &encounter.opponent]
            .into_iter()
            .filter(|d| !d.is_alive())
            .map(|d| d.id)
            .collect();
        ended.send(MatchEndedEvent {
            outcome,
            defeated,
            ticks: encounter.tick_count(),
        });
    }
}

/// Mirror simulation events into the combat log.
pub fn record_combat_log(
    clock: Res<DuelClock>,
    mut fired: EventReader<CombatEventFired>,
    mut ended: EventReader<MatchEndedEvent>,
    mut combat_log: ResMut<CombatLog>,
) {
    combat_log.match_time = (clock.0.now_ms() / 1000.0) as f32;

    for CombatEventFired(event) in fired.read() {
        combat_log.record_event(event);
    }

    for end in ended.read() {
        for victim in &end.defeated {
            let killer = Some(victim.other()).filter(|k| !end.defeated.contains(k));
            combat_log.log_death(*victim, killer, format!("{} has fallen", victim.name()));
        }
        combat_log.log(CombatLogEventType::MatchEvent, end.outcome.banner().to_string());
    }
}
