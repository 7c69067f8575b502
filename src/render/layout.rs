use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::input::PadButton;

/// Where each part of the screen goes for a given terminal area.
///
/// Shared by drawing and by mouse hit-testing so clicks land on what was drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub board: Rect,
    pub button_bar: Rect,
    pub footer: Rect,
    pub buttons: Vec<(PadButton, Rect)>,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Buttons
                Constraint::Length(1), // Footer
            ])
            .split(area);

        // Center the game grid horizontally
        let board = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let count = PadButton::ALL.len() as u32;
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(PadButton::ALL.iter().map(|_| Constraint::Ratio(1, count)))
            .split(chunks[2]);
        let buttons = PadButton::ALL
            .iter()
            .copied()
            .zip(cells.iter().copied())
            .collect();

        Self {
            header: chunks[0],
            board,
            button_bar: chunks[2],
            footer: chunks[3],
            buttons,
        }
    }

    /// Button under the terminal cell (column, row), if any
    pub fn button_at(&self, column: u16, row: u16) -> Option<PadButton> {
        self.buttons
            .iter()
            .find(|(_, rect)| contains(*rect, column, row))
            .map(|(button, _)| *button)
    }

    pub fn button_rect(&self, button: PadButton) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, rect)| *rect)
    }
}

impl Default for ScreenLayout {
    fn default() -> Self {
        Self::new(Rect::default())
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

/// A `width` x `height` box centred in `area`, shrunk to fit
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
