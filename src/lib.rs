//! Grid Snake - a single-player Snake game for the terminal
//!
//! This library provides:
//! - Core game simulation (game module)
//! - Keyboard/mouse intent capture (input module)
//! - TUI rendering (render module)
//! - Session statistics (metrics module)
//! - The interactive play loop (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod settings;
