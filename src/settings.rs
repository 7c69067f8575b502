//! Layered configuration: defaults, then an optional JSON file, then CLI flags.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::info;

use crate::game::GameConfig;
use crate::input::{ControlScheme, InputConfig};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub game: GameConfig,
    pub input: InputConfig,
    /// Fixed food-placement seed; entropy when absent
    pub seed: Option<u64>,
}

/// Values given on the command line win over the file
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub grid_size: Option<usize>,
    pub tick_interval_secs: Option<f64>,
    pub control_scheme: Option<ControlScheme>,
    pub seed: Option<u64>,
}

impl Settings {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        let settings: Settings = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file {:?}", path))?;
        info!(?path, "loaded config file");
        Ok(settings)
    }

    /// Build the effective settings and check them
    pub fn resolve(path: Option<&Path>, overrides: Overrides) -> Result<Self> {
        let mut settings = match path {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        settings.apply(overrides);
        settings.validate()?;
        Ok(settings)
    }

    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(grid_size) = overrides.grid_size {
            self.game.grid_size = grid_size;
        }
        if let Some(secs) = overrides.tick_interval_secs {
            self.game.tick_interval_secs = secs;
        }
        if let Some(scheme) = overrides.control_scheme {
            self.input.control_scheme = scheme;
        }
        if overrides.seed.is_some() {
            self.seed = overrides.seed;
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.game.validate().context("Invalid game settings")?;
        if self.input.turn_buffer == 0 {
            bail!("Invalid input settings: turn_buffer must be at least 1");
        }
        Ok(())
    }
}
