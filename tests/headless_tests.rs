//! Integration tests for headless duel execution
//!
//! These tests verify that:
//! - Headless duels run to completion
//! - Duel results are accessible programmatically
//! - Seeded RNG produces deterministic results

use saberduel::duel::CombatantId;
use saberduel::headless::{simulate_headless_duel, HeadlessDuelConfig, PlayerPilot};
use saberduel::MatchOutcome;

/// Helper to create a basic duel config
fn create_config(pilot: PlayerPilot, seed: Option<u64>, max_duration_secs: f32) -> HeadlessDuelConfig {
    HeadlessDuelConfig {
        random_seed: seed,
        max_duration_secs,
        pilot,
        ..HeadlessDuelConfig::default()
    }
}

#[test]
fn test_config_from_json() {
    let config = HeadlessDuelConfig::from_json(r#"{"random_seed": 42, "pilot": "Idle"}"#)
        .expect("valid config");

    assert_eq!(config.random_seed, Some(42));
    assert_eq!(config.pilot, PlayerPilot::Idle);
    assert_eq!(config.max_duration_secs, 300.0);
}

#[test]
fn test_config_rejects_bad_values() {
    assert!(HeadlessDuelConfig::from_json(r#"{"max_duration_secs": -5}"#).is_err());
    assert!(HeadlessDuelConfig::from_json(r#"{"step_ms": 1000}"#).is_err());
    assert!(HeadlessDuelConfig::from_json(r#"{"pilot": "Berserker"}"#).is_err());
}

#[test]
fn test_idle_duel_times_out_as_draw() {
    // The opponent holds its spawn point for the first few seconds, so an
    // idle player is never in reach during a one second duel
    let config = create_config(PlayerPilot::Idle, Some(1), 1.0);

    let result = simulate_headless_duel(config).expect("duel runs");

    assert_eq!(result.outcome, MatchOutcome::Draw);
    assert_eq!(result.winner(), None);
    assert!(result.match_time >= 1.0);
    assert!(result.ticks > 0);
    assert_eq!(result.random_seed, Some(1));

    assert!(result.player.survived && result.opponent.survived);
    assert_eq!(result.player.final_health, result.player.max_health);
    assert_eq!(result.opponent.final_health, result.opponent.max_health);
    assert_eq!(result.player.damage_dealt, 0.0);
}

#[test]
fn test_seeded_duels_are_deterministic() {
    let first = simulate_headless_duel(create_config(PlayerPilot::Aggressor, Some(42), 60.0))
        .expect("first duel runs");
    let second = simulate_headless_duel(create_config(PlayerPilot::Aggressor, Some(42), 60.0))
        .expect("second duel runs");

    assert_eq!(first, second);
}

#[test]
fn test_result_bookkeeping_is_consistent() {
    let result = simulate_headless_duel(create_config(PlayerPilot::Aggressor, Some(7), 60.0))
        .expect("duel runs");

    assert_eq!(result.player.id, CombatantId::Player);
    assert_eq!(result.opponent.id, CombatantId::Opponent);
    assert!((result.player.damage_dealt - result.opponent.damage_taken).abs() < 1e-3);
    assert!((result.opponent.damage_dealt - result.player.damage_taken).abs() < 1e-3);

    // Blade hits are the only source of damage
    let opponent_lost = result.opponent.max_health - result.opponent.final_health;
    assert!((result.opponent.damage_taken - opponent_lost).abs() < 1e-2);
    let player_lost = result.player.max_health - result.player.final_health;
    assert!((result.player.damage_taken - player_lost).abs() < 1e-2);

    match result.outcome {
        MatchOutcome::PlayerWins => assert!(!result.opponent.survived && result.player.survived),
        MatchOutcome::OpponentWins => assert!(!result.player.survived && result.opponent.survived),
        MatchOutcome::Draw => {}
    }
    assert_eq!(result.winner(), result.outcome.winner());
}
