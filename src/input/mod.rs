//! Turning terminal events into game intents.

pub mod config;
pub mod controls;
pub mod handler;
pub mod queue;

pub use config::InputConfig;
pub use controls::{ControlScheme, DirectionMap, PadButton};
pub use handler::{InputHandler, KeyAction};
pub use queue::IntentQueue;
