use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

use super::controls::DirectionMap;
use crate::game::{Direction, Intent};
use crate::render::ScreenLayout;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyAction {
    GameIntent(Intent),
    SpeedUp,
    SlowDown,
    Quit,
    None,
}

pub struct InputHandler {
    buttons: DirectionMap,
}

impl InputHandler {
    pub fn new(buttons: DirectionMap) -> Self {
        Self { buttons }
    }

    pub fn direction_map(&self) -> &DirectionMap {
        &self.buttons
    }

    pub fn handle_key_event(&self, key: KeyEvent) -> KeyAction {
        // Handle Ctrl+C
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            // Movement - Arrow keys
            KeyCode::Up => turn(Direction::Up),
            KeyCode::Down => turn(Direction::Down),
            KeyCode::Left => turn(Direction::Left),
            KeyCode::Right => turn(Direction::Right),

            // Movement - WASD
            KeyCode::Char('w') | KeyCode::Char('W') => turn(Direction::Up),
            KeyCode::Char('s') | KeyCode::Char('S') => turn(Direction::Down),
            KeyCode::Char('a') | KeyCode::Char('A') => turn(Direction::Left),
            KeyCode::Char('d') | KeyCode::Char('D') => turn(Direction::Right),

            // Controls
            KeyCode::Char(' ') | KeyCode::Char('p') | KeyCode::Char('P') => {
                KeyAction::GameIntent(Intent::TogglePause)
            }
            KeyCode::Char('r') | KeyCode::Char('R') => KeyAction::GameIntent(Intent::Restart),
            KeyCode::Char('n') | KeyCode::Char('N') => KeyAction::GameIntent(Intent::NewGame),
            KeyCode::Char('+') | KeyCode::Char('=') => KeyAction::SpeedUp,
            KeyCode::Char('-') | KeyCode::Char('_') => KeyAction::SlowDown,
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => KeyAction::Quit,

            _ => KeyAction::None,
        }
    }

    /// Map a left click on the control bar to the button's intent
    pub fn handle_mouse_event(&self, mouse: MouseEvent, layout: &ScreenLayout) -> KeyAction {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return KeyAction::None;
        }

        layout
            .button_at(mouse.column, mouse.row)
            .and_then(|button| self.buttons.intent_for(button))
            .map(KeyAction::GameIntent)
            .unwrap_or(KeyAction::None)
    }
}

fn turn(direction: Direction) -> KeyAction {
    KeyAction::GameIntent(Intent::Turn(direction))
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new(DirectionMap::default())
    }
}
