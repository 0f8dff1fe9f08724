//! Opponent personality traits and their in-match drift.

use serde::{Deserialize, Serialize};

use crate::duel::constants::ADAPT_HP_THRESHOLD;
use crate::duel::rng::GameRng;

/// Step applied to aggression/caution when either side is badly hurt.
const HEALTH_ADAPT_STEP: f32 = 0.1;
/// Step applied from the defense success rate.
const DEFENSE_ADAPT_STEP: f32 = 0.05;

/// Traits in [0, 1]. Only `prediction` steers behavior directly today (how
/// far ahead the player is extrapolated); the others drift with the fight
/// and are exposed for stance and tuning work.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Personality {
    pub aggression: f32,
    pub caution: f32,
    pub prediction: f32,
    pub adaptability: f32,
}

impl Personality {
    /// Roll a fresh personality for a new match.
    pub fn roll(rng: &mut GameRng) -> Self {
        Self {
            aggression: rng.random_range(0.6, 0.9),
            caution: rng.random_range(0.3, 0.7),
            prediction: rng.random_range(0.4, 0.8),
            adaptability: rng.random_range(0.5, 0.9),
        }
    }

    /// Drift traits based on how the fight is going. Runs every tick.
    pub fn adapt(&mut self, own_health_pct: f32, player_health_pct: f32, defense_success_rate: f32) {
        if own_health_pct < ADAPT_HP_THRESHOLD {
            self.aggression = (self.aggression - HEALTH_ADAPT_STEP).max(0.2);
            self.caution = (self.caution + HEALTH_ADAPT_STEP).min(0.9);
        } else if player_health_pct < ADAPT_HP_THRESHOLD {
            self.aggression = (self.aggression + HEALTH_ADAPT_STEP).min(0.95);
            self.caution = (self.caution - HEALTH_ADAPT_STEP).max(0.1);
        }

        // With no recorded defenses the rate is zero, so caution creeps up
        // every tick until the clamp holds it at 1.0.
        if defense_success_rate > 0.7 {
            self.aggression += DEFENSE_ADAPT_STEP;
        } else if defense_success_rate < 0.3 {
            self.caution += DEFENSE_ADAPT_STEP;
        }

        self.clamp_traits();
    }

    fn clamp_traits(&mut self) {
        self.aggression = self.aggression.clamp(0.0, 1.0);
        self.caution = self.caution.clamp(0.0, 1.0);
        self.prediction = self.prediction.clamp(0.0, 1.0);
        self.adaptability = self.adaptability.clamp(0.0, 1.0);
    }
}
