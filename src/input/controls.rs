//! On-screen pad buttons and the table that turns them into headings.
//!
//! Two layouts exist. `Natural` maps each arrow button to its own direction.
//! `LegacyButtons` reproduces the older button panel where "Up" sent the snake
//! down and "Down" sent it up. Which one is intended is still an open product
//! question, so the choice is a config value rather than a code change.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::game::{Direction, Intent};

/// Clickable buttons in the control bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PadButton {
    Up,
    Down,
    Left,
    Right,
    Pause,
    NewGame,
}

impl PadButton {
    /// Left-to-right order in the control bar
    pub const ALL: [PadButton; 6] = [
        PadButton::Left,
        PadButton::Up,
        PadButton::Down,
        PadButton::Right,
        PadButton::Pause,
        PadButton::NewGame,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PadButton::Up => "▲ Up",
            PadButton::Down => "▼ Down",
            PadButton::Left => "◀ Left",
            PadButton::Right => "▶ Right",
            PadButton::Pause => "Pause",
            PadButton::NewGame => "New Game",
        }
    }
}

/// Which direction table the pad buttons use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum ControlScheme {
    /// Each arrow button moves the way it points
    #[default]
    Natural,
    /// Up and Down buttons swapped, as in the older button panel
    LegacyButtons,
}

const NATURAL: [(PadButton, Direction); 4] = [
    (PadButton::Up, Direction::Up),
    (PadButton::Down, Direction::Down),
    (PadButton::Left, Direction::Left),
    (PadButton::Right, Direction::Right),
];

const LEGACY_BUTTONS: [(PadButton, Direction); 4] = [
    (PadButton::Up, Direction::Down),
    (PadButton::Down, Direction::Up),
    (PadButton::Left, Direction::Left),
    (PadButton::Right, Direction::Right),
];

/// Button → direction lookup for one control scheme
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectionMap {
    scheme: ControlScheme,
    table: &'static [(PadButton, Direction); 4],
}

impl DirectionMap {
    pub fn new(scheme: ControlScheme) -> Self {
        let table = match scheme {
            ControlScheme::Natural => &NATURAL,
            ControlScheme::LegacyButtons => &LEGACY_BUTTONS,
        };
        Self { scheme, table }
    }

    pub fn scheme(&self) -> ControlScheme {
        self.scheme
    }

    /// Direction for an arrow button; `None` for non-direction buttons
    pub fn resolve(&self, button: PadButton) -> Option<Direction> {
        self.table
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, dir)| *dir)
    }

    /// Intent produced by pressing `button`
    pub fn intent_for(&self, button: PadButton) -> Option<Intent> {
        match button {
            PadButton::Pause => Some(Intent::TogglePause),
            PadButton::NewGame => Some(Intent::NewGame),
            _ => self.resolve(button).map(Intent::Turn),
        }
    }
}

impl Default for DirectionMap {
    fn default() -> Self {
        Self::new(ControlScheme::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_natural_table() {
        let map = DirectionMap::new(ControlScheme::Natural);
        assert_eq!(map.resolve(PadButton::Up), Some(Direction::Up));
        assert_eq!(map.resolve(PadButton::Down), Some(Direction::Down));
        assert_eq!(map.resolve(PadButton::Left), Some(Direction::Left));
        assert_eq!(map.resolve(PadButton::Right), Some(Direction::Right));
        assert_eq!(map.resolve(PadButton::Pause), None);
    }

    #[test]
    fn test_legacy_table_swaps_vertical() {
        let map = DirectionMap::new(ControlScheme::LegacyButtons);
        assert_eq!(map.resolve(PadButton::Up), Some(Direction::Down));
        assert_eq!(map.resolve(PadButton::Down), Some(Direction::Up));
        assert_eq!(map.resolve(PadButton::Left), Some(Direction::Left));
        assert_eq!(map.resolve(PadButton::Right), Some(Direction::Right));
    }

    #[test]
    fn test_every_arrow_button_has_a_row() {
        for scheme in [ControlScheme::Natural, ControlScheme::LegacyButtons] {
            let map = DirectionMap::new(scheme);
            for button in [PadButton::Up, PadButton::Down, PadButton::Left, PadButton::Right] {
                assert!(map.resolve(button).is_some(), "{scheme:?} {button:?}");
            }
        }
    }

    #[test]
    fn test_button_intents() {
        let map = DirectionMap::default();
        assert_eq!(map.scheme(), ControlScheme::Natural);
        assert_eq!(map.intent_for(PadButton::Pause), Some(Intent::TogglePause));
        assert_eq!(map.intent_for(PadButton::NewGame), Some(Intent::NewGame));
        assert_eq!(
            map.intent_for(PadButton::Left),
            Some(Intent::Turn(Direction::Left))
        );
    }

    #[test]
    fn test_scheme_names() {
        let scheme: ControlScheme = serde_json::from_str("\"legacy-buttons\"").unwrap();
        assert_eq!(scheme, ControlScheme::LegacyButtons);
    }
}
