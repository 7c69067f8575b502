//! Terminal front end: draws snapshots, never mutates game state.

pub mod layout;
pub mod renderer;

pub use layout::ScreenLayout;
pub use renderer::{Hud, Renderer};
