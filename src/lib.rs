//! SaberDuel - Lightsaber Duel Simulator
//!
//! A two-combatant lightsaber duel: a player-controlled duelist against an
//! adaptive AI opponent, with blades, Force Push and Force Dash.
//!
//! This library exposes the simulation core, its bevy plugin, the combat log
//! and the headless runner for testing and reuse.

pub mod cli;
pub mod combat;
pub mod duel;
pub mod headless;

// Re-export commonly used types
pub use combat::log::{CombatLog, CombatLogEventType};
pub use duel::{DuelPlugin, DuelTuning, Encounter, MatchOutcome, PlayerIntent};
pub use headless::HeadlessDuelConfig;
