//! Combat memory: what the opponent has seen the player do recently.
//!
//! Velocity here is inferred from the position delta between two ticks, not
//! read from the player's body, so prediction is only as good as the
//! observation rate.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::duel::constants::MEMORY_CAPACITY;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub position: Vec2,
    pub velocity: Vec2,
    pub timestamp_ms: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CombatMemory {
    observations: VecDeque<Observation>,
    last_known_position: Vec2,
    inferred_velocity: Vec2,
    /// Defense outcome counters feeding personality adaptation. Nothing in
    /// the duel detects blocks yet; see `record_defense`.
    pub successful_defenses: u32,
    pub failed_defenses: u32,
}

impl CombatMemory {
    /// Start with the player's spawn point so the first inferred velocity is zero.
    pub fn new(initial_player_position: Vec2) -> Self {
        Self {
            observations: VecDeque::with_capacity(MEMORY_CAPACITY),
            last_known_position: initial_player_position,
            inferred_velocity: Vec2::ZERO,
            successful_defenses: 0,
            failed_defenses: 0,
        }
    }

    pub fn observe(&mut self, player_position: Vec2, now_ms: f64) {
        self.inferred_velocity = player_position - self.last_known_position;
        self.last_known_position = player_position;

        if self.observations.len() >= MEMORY_CAPACITY {
            self.observations.pop_front();
        }
        self.observations.push_back(Observation {
            position: player_position,
            velocity: self.inferred_velocity,
            timestamp_ms: now_ms,
        });
    }

    /// Extrapolate the player `lead` ticks ahead of the last observation.
    pub fn predict(&self, lead: f32) -> Vec2 {
        self.last_known_position + self.inferred_velocity * lead
    }

    pub fn last_known_position(&self) -> Vec2 {
        self.last_known_position
    }

    pub fn inferred_velocity(&self) -> Vec2 {
        self.inferred_velocity
    }

    pub fn observations(&self) -> impl Iterator<Item = &Observation> {
        self.observations.iter()
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn record_defense(&mut self, success: bool) {
        if success {
            self.successful_defenses += 1;
        } else {
            self.failed_defenses += 1;
        }
    }

    /// successful / max(1, successful + failed). Zero before any defense
    /// has been recorded.
    pub fn defense_success_rate(&self) -> f32 {
        let total = self.successful_defenses + self.failed_defenses;
        self.successful_defenses as f32 / total.max(1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_observation_has_zero_velocity() {
        let mut memory = CombatMemory::new(Vec2::new(100.0, 300.0));
        memory.observe(Vec2::new(100.0, 300.0), 0.0);
        assert_eq!(memory.inferred_velocity(), Vec2::ZERO);
    }

    #[test]
    fn test_velocity_is_per_tick_delta() {
        let mut memory = CombatMemory::new(Vec2::new(100.0, 300.0));
        memory.observe(Vec2::new(110.0, 295.0), 16.0);
        assert_eq!(memory.inferred_velocity(), Vec2::new(10.0, -5.0));
        assert_eq!(memory.predict(2.0), Vec2::new(130.0, 285.0));
    }

    #[test]
    fn test_buffer_is_bounded() {
        let mut memory = CombatMemory::new(Vec2::ZERO);
        for i in 0..25 {
            memory.observe(Vec2::new(i as f32, 0.0), i as f64 * 16.0);
        }
        assert_eq!(memory.len(), MEMORY_CAPACITY);
        let oldest = memory.observations().next().map(|o| o.position.x);
        assert_eq!(oldest, Some(15.0), "Oldest entries are evicted first");
    }

    #[test]
    fn test_defense_success_rate() {
        let mut memory = CombatMemory::new(Vec2::ZERO);
        assert_eq!(memory.defense_success_rate(), 0.0);

        memory.record_defense(true);
        memory.record_defense(true);
        memory.record_defense(false);
        memory.record_defense(true);
        assert_eq!(memory.defense_success_rate(), 0.75);
    }
}
