//! Combat logging
//!
//! Records duel events for display and post-match analysis. The log lives in
//! memory only; nothing is written to disk.

use bevy::prelude::*;
use serde::Serialize;
use std::collections::HashMap;

use crate::duel::abilities::AbilityType;
use crate::duel::events::{CombatEvent, CombatEventKind};

pub use crate::duel::body::CombatantId;

/// Ability name recorded for blade hits.
pub const LIGHTSABER: &str = "Lightsaber";

/// A single entry in the combat log
#[derive(Debug, Clone, Serialize)]
pub struct CombatLogEntry {
    /// Timestamp in match time (seconds since match start)
    pub timestamp: f32,
    /// The type of event
    pub event_type: CombatLogEventType,
    /// Human-readable description of the event
    pub message: String,
    /// Machine-readable details, when the entry has any
    pub data: Option<StructuredEventData>,
}

/// Types of combat log events for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CombatLogEventType {
    /// A blade hit that removed health
    MeleeHit,
    /// A Force Push impulse landed
    ForcePush,
    /// Ability activated
    AbilityUsed,
    /// Combatant died
    Death,
    /// Match event (start, end, etc.)
    MatchEvent,
}

/// Details behind a log entry, used for aggregation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum StructuredEventData {
    Damage {
        source: CombatantId,
        target: CombatantId,
        ability: String,
        amount: f32,
    },
    Push {
        source: CombatantId,
        target: CombatantId,
        impulse: f32,
    },
    Ability {
        caster: CombatantId,
        ability: AbilityType,
    },
    Death {
        victim: CombatantId,
        killer: Option<CombatantId>,
    },
}

/// The combat log resource storing all events
#[derive(Resource, Default, Debug)]
pub struct CombatLog {
    /// All log entries in chronological order
    pub entries: Vec<CombatLogEntry>,
    /// Current match time
    pub match_time: f32,
}

impl CombatLog {
    /// Clear the log for a new match
    pub fn clear(&mut self) {
        self.entries.clear();
        self.match_time = 0.0;
    }

    /// Add a new entry to the log
    pub fn log(&mut self, event_type: CombatLogEventType, message: String) {
        self.push(event_type, message, None);
    }

    fn push(&mut self, event_type: CombatLogEventType, message: String, data: Option<StructuredEventData>) {
        self.entries.push(CombatLogEntry {
            timestamp: self.match_time,
            event_type,
            message,
            data,
        });
    }

    pub fn log_damage(
        &mut self,
        source: CombatantId,
        target: CombatantId,
        ability: String,
        amount: f32,
        message: String,
    ) {
        self.push(
            CombatLogEventType::MeleeHit,
            message,
            Some(StructuredEventData::Damage {
                source,
                target,
                ability,
                amount,
            }),
        );
    }

    pub fn log_death(&mut self, victim: CombatantId, killer: Option<CombatantId>, message: String) {
        self.push(
            CombatLogEventType::Death,
            message,
            Some(StructuredEventData::Death { victim, killer }),
        );
    }

    /// Translate one simulation event into a log entry.
    pub fn record_event(&mut self, event: &CombatEvent) {
        let target = event.target.unwrap_or_else(|| event.source.other());
        match event.kind {
            CombatEventKind::MeleeHit => self.log_damage(
                event.source,
                target,
                LIGHTSABER.to_string(),
                event.amount,
                format!(
                    "{}'s {} hits {} for {:.1} damage",
                    event.source.name(),
                    LIGHTSABER,
                    target.name(),
                    event.amount
                ),
            ),
            CombatEventKind::ForcePush => self.push(
                CombatLogEventType::ForcePush,
                format!("{} pushes {} ({:.0})", event.source.name(), target.name(), event.amount),
                Some(StructuredEventData::Push {
                    source: event.source,
                    target,
                    impulse: event.amount,
                }),
            ),
            CombatEventKind::AbilityActivated(ability) => self.push(
                CombatLogEventType::AbilityUsed,
                format!("{} uses {}", event.source.name(), ability.name()),
                Some(StructuredEventData::Ability {
                    caster: event.source,
                    ability,
                }),
            ),
        }
    }

    /// Get entries filtered by event type
    pub fn filter_by_type(&self, event_type: CombatLogEventType) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Get only HP-changing events (blade hits and deaths)
    pub fn hp_changes_only(&self) -> Vec<&CombatLogEntry> {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.event_type,
                    CombatLogEventType::MeleeHit | CombatLogEventType::Death
                )
            })
            .collect()
    }

    /// Get the last N entries
    pub fn recent(&self, count: usize) -> Vec<&CombatLogEntry> {
        self.entries.iter().rev().take(count).rev().collect()
    }

    fn damage_entries(&self) -> impl Iterator<Item = (CombatantId, CombatantId, &str, f32)> {
        self.entries.iter().filter_map(|e| match &e.data {
            Some(StructuredEventData::Damage {
                source,
                target,
                ability,
                amount,
            }) => Some((*source, *target, ability.as_str(), *amount)),
            _ => None,
        })
    }

    /// Damage dealt by `source`, keyed by ability name
    pub fn damage_by_ability(&self, source: CombatantId) -> HashMap<String, f32> {
        let mut totals = HashMap::new();
        for (from, _, ability, amount) in self.damage_entries() {
            if from == source {
                *totals.entry(ability.to_string()).or_insert(0.0) += amount;
            }
        }
        totals
    }

    pub fn total_damage_dealt(&self, source: CombatantId) -> f32 {
        self.damage_entries()
            .filter(|(from, ..)| *from == source)
            .map(|(.., amount)| amount)
            .sum()
    }

    pub fn total_damage_taken(&self, target: CombatantId) -> f32 {
        self.damage_entries()
            .filter(|(_, to, ..)| *to == target)
            .map(|(.., amount)| amount)
            .sum()
    }

    /// Number of Force Push impulses `source` landed
    pub fn push_impulses(&self, source: CombatantId) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.data, Some(StructuredEventData::Push { source: s, .. }) if s == source))
            .count()
    }

    pub fn killing_blows(&self, killer: CombatantId) -> usize {
        self.entries
            .iter()
            .filter(|e| matches!(e.data, Some(StructuredEventData::Death { killer: Some(k), .. }) if k == killer))
            .count()
    }

    pub fn combatant_survived(&self, id: CombatantId) -> bool {
        !self
            .entries
            .iter()
            .any(|e| matches!(e.data, Some(StructuredEventData::Death { victim, .. }) if victim == id))
    }
}
