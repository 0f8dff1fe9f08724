//! Lightsaber duel simulation
//!
//! A player and an AI opponent fight in a bounded 2D arena with blades and
//! two force abilities. Everything here is plain data advanced by explicit
//! ticks; time comes from an injected `MonotonicClock` and randomness from a
//! seeded `GameRng`, so a duel replays exactly given the same inputs.
//!
//! ## Modules
//! - `abilities` - cooldown/active-window state shared by Force Push and Force Dash
//! - `body` - physics integrator, health pool and damage gate
//! - `weapon` - blade aim and tip geometry
//! - `intent` - player input to forces and ability activations
//! - `opponent_ai` - personality, memory, stance and tactical states
//! - `encounter` - per-tick orchestration and collision resolution
//! - `systems` - bevy plugin driving an `Encounter` from `Time`

pub mod abilities;
pub mod body;
pub mod clock;
pub mod combatant;
pub mod constants;
pub mod encounter;
pub mod events;
pub mod intent;
pub mod opponent_ai;
pub mod rng;
pub mod snapshot;
pub mod systems;
pub mod tuning;
pub mod view;
pub mod weapon;

pub use abilities::{AbilityState, AbilityType};
pub use body::{CombatantBody, CombatantId};
pub use clock::{MonotonicClock, SimClock};
pub use combatant::Duelist;
pub use encounter::{Encounter, MatchOutcome};
pub use events::{CombatEvent, CombatEventKind, EffectCategory, EventBuffer};
pub use intent::{MovementKeys, PlayerIntent};
pub use opponent_ai::{AiState, OpponentAi, Stance};
pub use rng::GameRng;
pub use snapshot::EncounterSnapshot;
pub use systems::{DuelClock, DuelPlugin, DuelSystemPhase, PendingIntent};
pub use tuning::{load_duel_tuning, parse_duel_tuning, DuelTuning};
pub use view::FrameView;
