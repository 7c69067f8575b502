//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The engine owns the single live [`GameState`]; callers feed it intents and read
//! [`Snapshot`]s back.

pub mod action;
pub mod config;
pub mod engine;
pub mod state;

// Re-export commonly used types
pub use action::{Direction, Intent};
pub use config::{GameConfig, TickSpeed};
pub use engine::{GameEngine, TickResult};
pub use state::{GameOverReason, GameState, Phase, Position, Snake, Snapshot};
