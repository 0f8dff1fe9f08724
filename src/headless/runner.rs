//! Headless duel execution
//!
//! Runs a duel without any graphical output on a fixed time step, with a
//! scripted pilot standing in for the player. Suitable for automated testing
//! and balance runs.

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use crate::combat::log::{CombatLog, CombatLogEventType};
use crate::duel::body::CombatantId;
use crate::duel::encounter::{Encounter, MatchOutcome};
use crate::duel::intent::PlayerIntent;
use crate::duel::systems::{DuelPlugin, DuelSystemPhase, PendingIntent};
use crate::duel::tuning::DuelTuning;

use super::config::{HeadlessDuelConfig, PlayerPilot};

/// The Aggressor dashes when the opponent is farther than this.
const PILOT_DASH_RANGE: f32 = 200.0;
/// The Aggressor pushes when the opponent is closer than this.
const PILOT_PUSH_RANGE: f32 = 60.0;

/// Result of a completed headless duel
///
/// This struct provides programmatic access to duel results for testing and analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct DuelResult {
    pub outcome: MatchOutcome,
    /// Simulated duel duration in seconds
    pub match_time: f32,
    /// Encounter ticks run
    pub ticks: u64,
    pub player: CombatantResult,
    pub opponent: CombatantResult,
    /// Random seed used (if deterministic mode)
    pub random_seed: Option<u64>,
}

impl DuelResult {
    pub fn winner(&self) -> Option<CombatantId> {
        self.outcome.winner()
    }
}

/// Statistics for one combatant after the duel
#[derive(Debug, Clone, PartialEq)]
pub struct CombatantResult {
    pub id: CombatantId,
    pub max_health: f32,
    /// Health remaining at duel end (0 if dead)
    pub final_health: f32,
    pub survived: bool,
    /// Total blade damage dealt during the duel
    pub damage_dealt: f32,
    /// Total blade damage taken during the duel
    pub damage_taken: f32,
}

/// Resource to track headless duel state
#[derive(Resource, Debug)]
pub struct HeadlessDuelState {
    pub pilot: PlayerPilot,
    /// Maximum duel duration before declaring a draw
    pub max_duration: f32,
    /// Elapsed simulated time
    pub elapsed_time: f32,
    /// Whether the duel has completed
    pub match_complete: bool,
    /// Duel result (populated when the duel completes)
    pub result: Option<DuelResult>,
}

/// Plugin for headless duel execution
pub struct HeadlessPlugin {
    pub config: HeadlessDuelConfig,
    pub tuning: DuelTuning,
}

impl Plugin for HeadlessPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(DuelPlugin {
            tuning: self.tuning.clone(),
            seed: self.config.random_seed,
        })
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs_f64(
            self.config.step_ms as f64 / 1000.0,
        )))
        .insert_resource(HeadlessDuelState {
            pilot: self.config.pilot,
            max_duration: self.config.max_duration_secs,
            elapsed_time: 0.0,
            match_complete: false,
            result: None,
        })
        .add_systems(Update, headless_pilot.in_set(DuelSystemPhase::Input))
        .add_systems(
            Update,
            (headless_track_time, headless_check_match_end)
                .chain()
                .after(DuelSystemPhase::Resolution),
        );
    }
}

/// Scripted stand-in for the player's input.
pub fn pilot_intent(pilot: PlayerPilot, encounter: &Encounter) -> PlayerIntent {
    let me = encounter.player.body.position;
    let them = encounter.opponent.body.position;

    match pilot {
        PlayerPilot::Idle => PlayerIntent::from_vector(Vec2::ZERO, them),
        PlayerPilot::Aggressor => {
            let distance = me.distance(them);
            let mut intent = PlayerIntent::from_vector((them - me).normalize_or_zero(), them);
            intent.force_dash = distance > PILOT_DASH_RANGE;
            intent.force_push = distance < PILOT_PUSH_RANGE;
            intent
        }
    }
}

fn headless_pilot(
    headless_state: Res<HeadlessDuelState>,
    encounter: Res<Encounter>,
    mut intent: ResMut<PendingIntent>,
) {
    intent.0 = pilot_intent(headless_state.pilot, &encounter);
}

fn headless_track_time(time: Res<Time>, mut headless_state: ResMut<HeadlessDuelState>) {
    if !headless_state.match_complete {
        headless_state.elapsed_time += time.delta_secs();
    }
}

/// Check if the duel has ended (knockout or timeout)
fn headless_check_match_end(
    mut encounter: ResMut<Encounter>,
    mut combat_log: ResMut<CombatLog>,
    mut headless_state: ResMut<HeadlessDuelState>,
) {
    if headless_state.match_complete {
        return;
    }

    let outcome = match encounter.outcome() {
        Some(outcome) => outcome,
        None if headless_state.elapsed_time >= headless_state.max_duration => {
            info!(
                "Duel timed out after {:.1}s - declaring DRAW",
                headless_state.elapsed_time
            );
            combat_log.log(
                CombatLogEventType::MatchEvent,
                format!("Time limit reached. {}", MatchOutcome::Draw.banner()),
            );
            encounter.declare_timeout()
        }
        None => return,
    };

    let result = build_duel_result(&encounter, outcome, &combat_log, &headless_state);
    headless_state.result = Some(result);
    headless_state.match_complete = true;
}

fn build_duel_result(
    encounter: &Encounter,
    outcome: MatchOutcome,
    combat_log: &CombatLog,
    headless_state: &HeadlessDuelState,
) -> DuelResult {
    let combatant = |id: CombatantId| {
        let body = &encounter.duelist(id).body;
        CombatantResult {
            id,
            max_health: body.max_health(),
            final_health: body.health(),
            survived: body.is_alive(),
            damage_dealt: combat_log.total_damage_dealt(id),
            damage_taken: combat_log.total_damage_taken(id),
        }
    };

    DuelResult {
        outcome,
        match_time: headless_state.elapsed_time,
        ticks: encounter.tick_count(),
        player: combatant(CombatantId::Player),
        opponent: combatant(CombatantId::Opponent),
        random_seed: encounter.seed(),
    }
}

/// Build the headless app without running it.
pub fn build_headless_app(config: HeadlessDuelConfig, tuning: DuelTuning, with_logging: bool) -> App {
    let mut app = App::new();
    // Minimal plugins - no window, no rendering
    app.add_plugins(MinimalPlugins);
    if with_logging {
        app.add_plugins(LogPlugin::default());
    }
    app.add_plugins(HeadlessPlugin { config, tuning });
    app
}

/// Step the app until the duel completes and return its result.
pub fn drive_to_completion(app: &mut App) -> Result<DuelResult, String> {
    app.finish();
    app.cleanup();

    loop {
        app.update();
        let state = app.world().resource::<HeadlessDuelState>();
        if state.match_complete {
            return state
                .result
                .clone()
                .ok_or_else(|| "Duel completed without a result".to_string());
        }
    }
}

/// Run a headless duel and return the result, without installing a logger.
pub fn simulate_headless_duel(config: HeadlessDuelConfig) -> Result<DuelResult, String> {
    config.validate()?;
    let tuning = config.resolve_tuning()?;
    let mut app = build_headless_app(config, tuning, false);
    drive_to_completion(&mut app)
}

/// Run a headless duel with logging and print a summary.
pub fn run_headless_duel(config: HeadlessDuelConfig) -> Result<DuelResult, String> {
    config.validate()?;
    println!("Starting headless duel simulation...");
    println!("  Pilot: {:?}", config.pilot);
    println!("  Seed: {:?}", config.random_seed);
    println!("  Max duration: {:.0}s", config.max_duration_secs);

    let tuning = config.resolve_tuning()?;
    let mut app = build_headless_app(config, tuning, true);

    let result = drive_to_completion(&mut app)?;
    print_summary(&result, app.world().resource::<CombatLog>());
    Ok(result)
}

fn print_summary(result: &DuelResult, combat_log: &CombatLog) {
    println!(
        "{} ({:.1}s, {} ticks)",
        result.outcome.banner(),
        result.match_time,
        result.ticks
    );
    for combatant in [&result.player, &result.opponent] {
        println!(
            "  {}: {:.0}/{:.0} HP, dealt {:.1}, taken {:.1}",
            combatant.id.name(),
            combatant.final_health,
            combatant.max_health,
            combatant.damage_dealt,
            combatant.damage_taken
        );
    }
    println!("Last events:");
    for entry in combat_log.recent(5) {
        println!("  [{:>6.2}s] {}", entry.timestamp, entry.message);
    }
}
