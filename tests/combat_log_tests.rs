//! Unit tests for combat log query and aggregation methods
//!
//! These tests verify that the CombatLog correctly:
//! - Aggregates damage by ability
//! - Translates simulation events into entries
//! - Counts killing blows and push impulses
//! - Identifies surviving combatants

use bevy::math::Vec2;
use saberduel::combat::log::{
    CombatLog, CombatLogEventType, CombatantId, StructuredEventData, LIGHTSABER,
};
use saberduel::duel::abilities::AbilityType;
use saberduel::duel::CombatEvent;

fn create_test_log() -> CombatLog {
    CombatLog::default()
}

fn hit(log: &mut CombatLog, source: CombatantId, amount: f32) {
    log.log_damage(
        source,
        source.other(),
        LIGHTSABER.to_string(),
        amount,
        "Test".to_string(),
    );
}

// =============================================================================
// Damage Aggregation Tests
// =============================================================================

#[test]
fn test_damage_by_ability_empty_log() {
    let log = create_test_log();
    let damage = log.damage_by_ability(CombatantId::Player);
    assert!(damage.is_empty(), "Empty log should return empty damage map");
}

#[test]
fn test_damage_by_ability_single_source() {
    let mut log = create_test_log();

    hit(&mut log, CombatantId::Player, 7.0);
    hit(&mut log, CombatantId::Player, 9.0);
    hit(&mut log, CombatantId::Opponent, 6.0);

    let damage = log.damage_by_ability(CombatantId::Player);

    assert_eq!(damage.len(), 1, "Blade hits are the only damaging ability");
    assert_eq!(damage.get(LIGHTSABER), Some(&16.0));
}

#[test]
fn test_total_damage_dealt_and_taken() {
    let mut log = create_test_log();

    hit(&mut log, CombatantId::Player, 5.0);
    hit(&mut log, CombatantId::Player, 10.0);
    hit(&mut log, CombatantId::Opponent, 8.0);

    assert_eq!(log.total_damage_dealt(CombatantId::Player), 15.0);
    assert_eq!(log.total_damage_taken(CombatantId::Opponent), 15.0);
    assert_eq!(log.total_damage_dealt(CombatantId::Opponent), 8.0);
    assert_eq!(log.total_damage_taken(CombatantId::Player), 8.0);
}

// =============================================================================
// Event Translation Tests
// =============================================================================

#[test]
fn test_record_melee_hit() {
    let mut log = create_test_log();
    log.match_time = 2.5;

    log.record_event(&CombatEvent::melee_hit(CombatantId::Player, Vec2::new(300.0, 300.0), 7.5));

    assert_eq!(log.entries.len(), 1);
    let entry = &log.entries[0];
    assert_eq!(entry.event_type, CombatLogEventType::MeleeHit);
    assert_eq!(entry.timestamp, 2.5);
    assert_eq!(
        entry.data,
        Some(StructuredEventData::Damage {
            source: CombatantId::Player,
            target: CombatantId::Opponent,
            ability: LIGHTSABER.to_string(),
            amount: 7.5,
        })
    );
    assert!(entry.message.contains("7.5"));
}

#[test]
fn test_record_push_and_ability() {
    let mut log = create_test_log();

    log.record_event(&CombatEvent::ability_activated(
        CombatantId::Opponent,
        AbilityType::ForcePush,
        Vec2::ZERO,
    ));
    for _ in 0..3 {
        log.record_event(&CombatEvent::force_push(CombatantId::Opponent, Vec2::ZERO, 150.0));
    }

    assert_eq!(log.filter_by_type(CombatLogEventType::AbilityUsed).len(), 1);
    assert_eq!(log.filter_by_type(CombatLogEventType::ForcePush).len(), 3);
    assert_eq!(log.push_impulses(CombatantId::Opponent), 3);
    assert_eq!(log.push_impulses(CombatantId::Player), 0);
    assert!(log.hp_changes_only().is_empty(), "Pushes never change health");
}

// =============================================================================
// Kill Tracking Tests
// =============================================================================

#[test]
fn test_killing_blows() {
    let mut log = create_test_log();

    log.log_death(
        CombatantId::Opponent,
        Some(CombatantId::Player),
        "Opponent has fallen".to_string(),
    );

    assert_eq!(log.killing_blows(CombatantId::Player), 1);
    assert_eq!(log.killing_blows(CombatantId::Opponent), 0);
}

#[test]
fn test_double_knockout_has_no_killer() {
    let mut log = create_test_log();

    log.log_death(CombatantId::Player, None, "Player has fallen".to_string());
    log.log_death(CombatantId::Opponent, None, "Opponent has fallen".to_string());

    assert_eq!(log.killing_blows(CombatantId::Player), 0);
    assert_eq!(log.killing_blows(CombatantId::Opponent), 0);
    assert!(!log.combatant_survived(CombatantId::Player));
    assert!(!log.combatant_survived(CombatantId::Opponent));
}

#[test]
fn test_combatant_survived() {
    let mut log = create_test_log();

    hit(&mut log, CombatantId::Opponent, 9.0);
    log.log_death(
        CombatantId::Opponent,
        Some(CombatantId::Player),
        "Opponent has fallen".to_string(),
    );

    assert!(log.combatant_survived(CombatantId::Player));
    assert!(!log.combatant_survived(CombatantId::Opponent));
}

// =============================================================================
// Query Helper Tests
// =============================================================================

#[test]
fn test_hp_changes_only() {
    let mut log = create_test_log();

    log.log(CombatLogEventType::MatchEvent, "Duel started!".to_string());
    hit(&mut log, CombatantId::Player, 6.0);
    log.record_event(&CombatEvent::force_push(CombatantId::Player, Vec2::ZERO, 150.0));
    log.log_death(CombatantId::Opponent, Some(CombatantId::Player), "Test".to_string());

    assert_eq!(log.hp_changes_only().len(), 2);
}

#[test]
fn test_recent_keeps_chronological_order() {
    let mut log = create_test_log();

    for i in 0..5 {
        log.match_time = i as f32;
        log.log(CombatLogEventType::MatchEvent, format!("Event {}", i));
    }

    let recent = log.recent(2);
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].message, "Event 3");
    assert_eq!(recent[1].message, "Event 4");
    assert_eq!(log.recent(10).len(), 5);
}

#[test]
fn test_clear_resets_log() {
    let mut log = create_test_log();
    log.match_time = 12.0;
    hit(&mut log, CombatantId::Player, 5.0);

    log.clear();

    assert!(log.entries.is_empty());
    assert_eq!(log.match_time, 0.0);
}
