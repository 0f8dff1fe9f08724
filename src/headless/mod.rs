//! Headless mode for automated duels
//!
//! This module runs a duel without any graphical output, with a scripted
//! pilot in place of the player, suitable for automated testing and balance
//! runs.
//!
//! ## Usage
//!
//! ```bash
//! # Run a headless duel
//! cargo run --release -- --headless duel_config.json
//! ```
//!
//! ## JSON Configuration
//!
//! ```json
//! {
//!   "random_seed": 42,
//!   "max_duration_secs": 120,
//!   "pilot": "Aggressor"
//! }
//! ```

pub mod config;
pub mod runner;

pub use config::{HeadlessDuelConfig, PlayerPilot};
pub use runner::{run_headless_duel, simulate_headless_duel, CombatantResult, DuelResult};
