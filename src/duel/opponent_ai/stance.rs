//! Stance: the opponent's short-term posture, re-rolled on a timer.

use serde::{Deserialize, Serialize};

use crate::duel::constants::STANCE_HP_THRESHOLD;
use crate::duel::rng::GameRng;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, Serialize, Deserialize)]
pub enum Stance {
    #[default]
    Balanced,
    Aggressive,
    Defensive,
}

impl Stance {
    /// Pick the stance for the next interval. Health emergencies override
    /// the weighted roll (40% balanced, 30% aggressive, 30% defensive).
    pub fn choose(own_health_pct: f32, player_health_pct: f32, rng: &mut GameRng) -> Stance {
        let roll = rng.random_f32();

        if own_health_pct < STANCE_HP_THRESHOLD {
            Stance::Defensive
        } else if player_health_pct < STANCE_HP_THRESHOLD {
            Stance::Aggressive
        } else if roll < 0.4 {
            Stance::Balanced
        } else if roll < 0.7 {
            Stance::Aggressive
        } else {
            Stance::Defensive
        }
    }

    /// Preferred engagement distance, re-rolled every time it is asked for.
    pub fn engage_distance(&self, rng: &mut GameRng) -> f32 {
        match self {
            Stance::Aggressive => rng.random_range(45.0, 125.0),
            Stance::Defensive => rng.random_range(150.0, 180.0),
            Stance::Balanced => rng.random_range(75.0, 135.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_low_own_health_forces_defensive() {
        let mut rng = GameRng::from_seed(1);
        for _ in 0..50 {
            assert_eq!(Stance::choose(0.39, 0.1, &mut rng), Stance::Defensive);
        }
    }

    #[test]
    fn test_low_player_health_forces_aggressive() {
        let mut rng = GameRng::from_seed(2);
        for _ in 0..50 {
            assert_eq!(Stance::choose(0.9, 0.2, &mut rng), Stance::Aggressive);
        }
    }

    #[test]
    fn test_weighted_roll_uses_all_stances() {
        let mut rng = GameRng::from_seed(3);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            match Stance::choose(1.0, 1.0, &mut rng) {
                Stance::Balanced => counts[0] += 1,
                Stance::Aggressive => counts[1] += 1,
                Stance::Defensive => counts[2] += 1,
            }
        }
        assert!(counts[0] > 1000 && counts[0] < 1400, "Balanced ~40%: {:?}", counts);
        assert!(counts[1] > 700 && counts[1] < 1100, "Aggressive ~30%: {:?}", counts);
        assert!(counts[2] > 700 && counts[2] < 1100, "Defensive ~30%: {:?}", counts);
    }

    #[test]
    fn test_engage_distance_ranges() {
        let mut rng = GameRng::from_seed(4);
        for _ in 0..200 {
            let aggressive = Stance::Aggressive.engage_distance(&mut rng);
            let defensive = Stance::Defensive.engage_distance(&mut rng);
            let balanced = Stance::Balanced.engage_distance(&mut rng);
            assert!((45.0..=125.0).contains(&aggressive));
            assert!((150.0..=180.0).contains(&defensive));
            assert!((75.0..=135.0).contains(&balanced));
        }
    }
}
