use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
    Frame,
};

use super::layout::{centered_rect, ScreenLayout};
use crate::game::{Direction, Position, Snapshot, TickSpeed};
use crate::input::PadButton;
use crate::metrics::GameMetrics;

/// Everything drawn besides the board itself
pub struct Hud<'a> {
    pub metrics: &'a GameMetrics,
    pub speed: TickSpeed,
    pub notice: Option<&'a str>,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame and return the layout used, for mouse hit-testing
    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, hud: &Hud) -> ScreenLayout {
        let layout = ScreenLayout::new(frame.area());

        frame.render_widget(self.render_stats(snapshot, hud), layout.header);
        frame.render_widget(self.render_grid(snapshot), layout.board);

        if snapshot.game_over {
            let popup = centered_rect(36, 8, layout.board);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_game_over(snapshot), popup);
        }

        for (button, rect) in &layout.buttons {
            frame.render_widget(self.render_button(*button, snapshot), *rect);
        }

        frame.render_widget(self.render_footer(hud.notice), layout.footer);

        layout
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let mut lines = Vec::with_capacity(snapshot.grid_size);

        for row in 0..snapshot.grid_size {
            let mut spans = Vec::with_capacity(snapshot.grid_size);

            for col in 0..snapshot.grid_size {
                let pos = Position::new(row as i32, col as i32);

                let cell = if pos == snapshot.head {
                    let color = if snapshot.game_over {
                        Color::Red
                    } else {
                        Color::Cyan
                    };
                    Span::styled(
                        head_glyph(snapshot.facing),
                        Style::default().fg(color).add_modifier(Modifier::BOLD),
                    )
                } else if snapshot.is_snake(pos) {
                    Span::styled("■ ", Style::default().fg(Color::Green))
                } else if pos == snapshot.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let (title, border) = if snapshot.paused {
            (" Snake · PAUSED ", Color::Yellow)
        } else {
            (" Snake ", Color::White)
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, hud: &Hud) -> Paragraph<'static> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", label),
            Span::styled(hud.metrics.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Tick: ", label),
            Span::styled(format!("{:.1}s", hud.speed.secs()), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(hud.metrics.format_time(), value),
        ])];

        Paragraph::new(text)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM))
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'static> {
        let reason = snapshot
            .game_over_reason
            .map(|r| format!("The snake {r}"))
            .unwrap_or_default();

        let text = vec![
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(Span::styled(reason, Style::default().fg(Color::Gray))),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_button(&self, button: PadButton, snapshot: &Snapshot) -> Paragraph<'static> {
        // Everything but New Game is inert once the game is over
        let active = !snapshot.game_over || button == PadButton::NewGame;
        let style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Paragraph::new(Line::from(Span::styled(button.label(), style)))
            .alignment(Alignment::Center)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(style),
            )
    }

    fn render_footer(&self, notice: Option<&str>) -> Paragraph<'static> {
        let line = match notice {
            Some(text) => Line::from(Span::styled(
                text.to_string(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
            None => Line::from(vec![
                Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
                Span::raw(" or "),
                Span::styled("WASD", Style::default().fg(Color::Cyan)),
                Span::raw(" move | "),
                Span::styled("Space", Style::default().fg(Color::Cyan)),
                Span::raw(" pause | "),
                Span::styled("+/-", Style::default().fg(Color::Cyan)),
                Span::raw(" speed | "),
                Span::styled("N", Style::default().fg(Color::Cyan)),
                Span::raw(" new game | "),
                Span::styled("Q", Style::default().fg(Color::Red)),
                Span::raw(" quit"),
            ]),
        };

        Paragraph::new(line).alignment(Alignment::Center)
    }
}

fn head_glyph(facing: Direction) -> &'static str {
    match facing {
        Direction::Up => "▲ ",
        Direction::Down => "▼ ",
        Direction::Left => "◀ ",
        Direction::Right => "▶ ",
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
