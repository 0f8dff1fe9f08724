//! Simulation time
//!
//! Damage gating and flash timing read timestamps from a `MonotonicClock`
//! handed to every tick, never from the wall clock. Hosts that want replay
//! determinism drive a `SimClock` by the same delta they feed the encounter.

use serde::{Deserialize, Serialize};

/// A source of monotonically non-decreasing timestamps in milliseconds.
pub trait MonotonicClock {
    fn now_ms(&self) -> f64;
}

/// Manually advanced clock.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimClock {
    now_ms: f64,
}

impl SimClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(now_ms: f64) -> Self {
        Self {
            now_ms: if now_ms.is_finite() { now_ms.max(0.0) } else { 0.0 },
        }
    }

    /// Move the clock forward. Negative or non-finite steps are ignored.
    pub fn advance(&mut self, delta_ms: f32) {
        if delta_ms.is_finite() && delta_ms > 0.0 {
            self.now_ms += delta_ms as f64;
        }
    }
}

impl MonotonicClock for SimClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}
