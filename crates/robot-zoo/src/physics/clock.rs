//! The simulation clock.

use serde::{Deserialize, Serialize};

/// Simulated time, owned by whoever drives the simulation.
///
/// The clock is only read to evaluate spring actuation. Individuals that are stepped with the
/// same clock breathe in phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationClock {
    /// The current time.
    time: f64,
}

impl SimulationClock {
    /// Creates a clock at `t = 0`.
    #[must_use]
    pub const fn new() -> Self {
        Self { time: 0.0 }
    }

    /// Creates a clock at the given time.
    #[must_use]
    pub const fn starting_at(time: f64) -> Self {
        Self { time }
    }

    /// Returns the current time.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Moves the clock forward by `dt` and returns the new time.
    pub fn advance(&mut self, dt: f64) -> f64 {
        self.time += dt;
        self.time
    }

    /// Sets the clock back to `t = 0`.
    pub fn reset(&mut self) {
        self.time = 0.0;
    }
}
