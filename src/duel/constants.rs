//! Duel Constants
//!
//! Centralized location for the magic numbers used by the opponent AI.
//! Combat numbers that balance the duel (cooldowns, damage, forces) live in
//! `DuelTuning` instead, so they can be changed from `assets/config/duel.ron`.

// ============================================================================
// Opponent Movement
// ============================================================================

/// The opponent stops steering once it is this close to its chosen target point.
pub const ARRIVAL_THRESHOLD: f32 = 5.0;

/// AI target points are kept this far inside the arena walls.
pub const AI_TARGET_MIN_X: f32 = 50.0;
pub const AI_TARGET_MAX_X: f32 = 750.0;
pub const AI_TARGET_MIN_Y: f32 = 50.0;
pub const AI_TARGET_MAX_Y: f32 = 550.0;

// ============================================================================
// State Transition Distances
// ============================================================================

/// Patrol switches to Engage when the player comes closer than this.
pub const ENGAGE_RANGE: f32 = 250.0;

/// Engage falls back to Patrol once the player is farther than this.
pub const DISENGAGE_RANGE: f32 = 350.0;

/// Retreat gives up and re-engages when the player is farther than this.
pub const RETREAT_ABANDON_RANGE: f32 = 400.0;

/// Flank and Counter abort back to Engage past this distance.
pub const MANEUVER_ABORT_RANGE: f32 = 300.0;

// ============================================================================
// Health Thresholds
// ============================================================================

/// Below this fraction the opponent retreats out of Engage.
pub const RETREAT_HP_THRESHOLD: f32 = 0.3;

/// Above this fraction a retreating opponent re-engages.
pub const RECOVERED_HP_THRESHOLD: f32 = 0.5;

/// Stance is forced (Defensive for self, Aggressive against the player) below this.
pub const STANCE_HP_THRESHOLD: f32 = 0.4;

/// Personality adaptation reacts to either side dropping below this.
pub const ADAPT_HP_THRESHOLD: f32 = 0.3;

// ============================================================================
// Timers (milliseconds)
// ============================================================================

/// Patrol picks a new wander target this often.
pub const PATROL_REPLAN_MS: f32 = 3000.0;

/// Stance is re-evaluated this often.
pub const STANCE_INTERVAL_MS: f32 = 3000.0;

/// Maximum time spent flanking before returning to Engage.
pub const FLANK_DURATION_MS: f32 = 2000.0;

/// Maximum time spent in a counter maneuver before returning to Engage.
pub const COUNTER_DURATION_MS: f32 = 1500.0;

// ============================================================================
// Positioning
// ============================================================================

/// Random patrol offset toward the player: `PATROL_MIN + rand * PATROL_SPREAD`.
pub const PATROL_DISTANCE_MIN: f32 = 100.0;
pub const PATROL_DISTANCE_SPREAD: f32 = 200.0;

/// Engage keeps the stance distance within this tolerance before strafing.
pub const ENGAGE_DISTANCE_TOLERANCE: f32 = 30.0;

/// Strafe step taken from the current position: `STRAFE_MIN + rand * STRAFE_SPREAD`.
pub const STRAFE_DISTANCE_MIN: f32 = 30.0;
pub const STRAFE_DISTANCE_SPREAD: f32 = 20.0;

pub const RETREAT_DISTANCE: f32 = 200.0;
pub const FLANK_DISTANCE: f32 = 100.0;
pub const COUNTER_DISTANCE: f32 = 70.0;

/// Counter extrapolates the player this many ticks ahead.
pub const COUNTER_LEAD_TICKS: f32 = 2.0;

// ============================================================================
// Per-tick Probabilities
// ============================================================================

/// Chance per Engage tick to break off into a Flank or Counter maneuver.
pub const MANEUVER_CHANCE: f32 = 0.02;

/// Chance per strafing tick to reverse the strafe direction.
pub const STRAFE_REVERSE_CHANCE: f32 = 0.1;

// ============================================================================
// Force Push Heuristic
// ============================================================================

/// Player health drop (since last tick) that always triggers a push.
pub const PUSH_HEAVY_DAMAGE: f32 = 25.0;

/// Player health drop that triggers a push once the opponent is below half health.
pub const PUSH_EMERGENCY_DAMAGE: f32 = 15.0;

/// Opponent health fraction below which a close player triggers a push.
pub const PUSH_LOW_HP_THRESHOLD: f32 = 0.3;

/// Distance considered "close" for the low-health push.
pub const PUSH_CLOSE_RANGE: f32 = 100.0;

/// Opponent health fraction for the emergency push.
pub const PUSH_EMERGENCY_HP_THRESHOLD: f32 = 0.5;

// ============================================================================
// Combat Memory
// ============================================================================

/// Maximum number of player observations retained.
pub const MEMORY_CAPACITY: usize = 10;
