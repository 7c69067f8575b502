use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fastest allowed tick period, in seconds
pub const MIN_TICK_SECS: f64 = 0.1;
/// Slowest allowed tick period, in seconds
pub const MAX_TICK_SECS: f64 = 1.0;
/// Step used by the speed control
pub const TICK_STEP_SECS: f64 = 0.1;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width and height of the square grid
    pub grid_size: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,
    /// Seconds between ticks
    pub tick_interval_secs: f64,
    /// Random draws tried before food placement falls back to scanning free cells
    pub food_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: 20,
            initial_snake_length: 3,
            tick_interval_secs: 0.3,
            food_attempts: 1000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(grid_size: usize) -> Self {
        Self {
            grid_size,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10)
    }

    pub fn tick_speed(&self) -> TickSpeed {
        TickSpeed::from_secs(self.tick_interval_secs)
    }

    /// Check that the configuration can produce a playable game
    pub fn validate(&self) -> Result<()> {
        if self.initial_snake_length == 0 {
            bail!("initial snake length must be at least 1");
        }
        // Snake starts at the centre and trails to the left
        let centre = self.grid_size / 2;
        if self.grid_size == 0 || centre + 1 < self.initial_snake_length {
            bail!(
                "grid size {} cannot fit an initial snake of length {}",
                self.grid_size,
                self.initial_snake_length
            );
        }
        if self.grid_size * self.grid_size <= self.initial_snake_length {
            bail!("grid size {} leaves no room for food", self.grid_size);
        }
        if !(MIN_TICK_SECS..=MAX_TICK_SECS).contains(&self.tick_interval_secs) {
            bail!(
                "tick interval {}s is outside {}..={}s",
                self.tick_interval_secs,
                MIN_TICK_SECS,
                MAX_TICK_SECS
            );
        }
        if self.food_attempts == 0 {
            bail!("food_attempts must be at least 1");
        }
        Ok(())
    }
}

/// Tick period as exposed to the player's speed control
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSpeed {
    secs: f64,
}

impl TickSpeed {
    /// Clamp `secs` into the allowed range and snap it to the control's step
    pub fn from_secs(secs: f64) -> Self {
        let clamped = secs.clamp(MIN_TICK_SECS, MAX_TICK_SECS);
        let snapped = (clamped / TICK_STEP_SECS).round() * TICK_STEP_SECS;
        Self {
            secs: snapped.clamp(MIN_TICK_SECS, MAX_TICK_SECS),
        }
    }

    pub fn secs(&self) -> f64 {
        self.secs
    }

    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.secs)
    }

    /// Shorter period, saturating at the fastest setting
    pub fn faster(&self) -> Self {
        Self::from_secs(self.secs - TICK_STEP_SECS)
    }

    /// Longer period, saturating at the slowest setting
    pub fn slower(&self) -> Self {
        Self::from_secs(self.secs + TICK_STEP_SECS)
    }
}
