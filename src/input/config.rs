use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::controls::ControlScheme;

/// Configuration for input capture
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Identical presses closer together than this are dropped
    pub debounce_ms: u64,
    /// Direction table used by the on-screen buttons
    pub control_scheme: ControlScheme,
    /// Turns that may wait for later ticks
    pub turn_buffer: usize,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            control_scheme: ControlScheme::Natural,
            turn_buffer: 3,
        }
    }
}

impl InputConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
