use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::{Duration, Instant};
use tokio::time::{interval, interval_at, Interval, MissedTickBehavior};
use tracing::info;

use crate::game::{GameEngine, Intent, Phase, TickSpeed};
use crate::input::{DirectionMap, InputHandler, IntentQueue, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Hud, Renderer, ScreenLayout};
use crate::settings::Settings;

/// How long a status notice stays in the footer
const NOTICE_TTL: Duration = Duration::from_secs(2);

/// Short-lived status line, e.g. "Game Paused"
#[derive(Debug, Clone)]
struct Notice {
    text: String,
    until: Instant,
}

/// Keyboard and mouse play in the terminal.
///
/// Input is captured as soon as it arrives and queued; the tick timer drains the
/// queue, advances the engine, and the render timer draws the latest snapshot.
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    queue: IntentQueue,
    speed: TickSpeed,
    speed_changed: bool,
    notice: Option<Notice>,
    layout: ScreenLayout,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(settings: &Settings) -> Self {
        let config = settings.game.clone();
        let speed = config.tick_speed();
        let engine = match settings.seed {
            Some(seed) => GameEngine::with_seed(config, seed),
            None => GameEngine::new(config),
        };

        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(DirectionMap::new(settings.input.control_scheme)),
            queue: IntentQueue::new(settings.input.debounce(), settings.input.turn_buffer),
            speed,
            speed_changed: false,
            notice: None,
            layout: ScreenLayout::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(
            grid = self.engine.config().grid_size,
            tick_secs = self.speed.secs(),
            scheme = ?self.input_handler.direction_map().scheme(),
            "session started"
        );

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            games = self.metrics.games_played,
            high_score = self.metrics.high_score,
            "session ended"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = ticker(self.speed);

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Capture input immediately; it is applied at the next tick
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event, Instant::now());
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.on_tick();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(self.engine.phase() == Phase::Playing);
                    self.expire_notice(Instant::now());
                    self.draw(terminal)?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.speed_changed {
                tick_timer = ticker(self.speed);
                self.speed_changed = false;
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) -> Result<()> {
        let snapshot = self.engine.snapshot();
        let hud = Hud {
            metrics: &self.metrics,
            speed: self.speed,
            notice: self.notice.as_ref().map(|n| n.text.as_str()),
        };
        let renderer = &self.renderer;
        let mut layout = None;

        terminal
            .draw(|frame| {
                layout = Some(renderer.render(frame, &snapshot, &hud));
            })
            .context("Failed to draw frame")?;

        if let Some(layout) = layout {
            self.layout = layout;
        }
        Ok(())
    }

    fn handle_event(&mut self, event: Event, now: Instant) {
        let action = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse, &self.layout),
            _ => KeyAction::None,
        };

        match action {
            KeyAction::GameIntent(intent) => {
                self.queue.push(intent, now);
            }
            KeyAction::SpeedUp => self.change_speed(self.speed.faster()),
            KeyAction::SlowDown => self.change_speed(self.speed.slower()),
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    /// One scheduler period: apply queued intents, then move
    fn on_tick(&mut self) {
        // Turns wait while the snake is parked so they never stack on an untravelled heading
        let release_turn = self.engine.phase() == Phase::Playing;
        for intent in self.queue.drain_for_tick(release_turn) {
            self.apply_intent(intent);
        }

        let result = self.engine.tick();

        if result.game_over.is_some() {
            let score = self.engine.state().score;
            self.metrics.on_game_over(score);
            self.set_notice(format!(
                "Game Over! Final Score: {}. Press R to restart.",
                score
            ));
        }
    }

    fn apply_intent(&mut self, intent: Intent) {
        let before = self.engine.phase();
        let score = self.engine.state().score;
        self.engine.apply(intent);
        let after = self.engine.phase();

        match (intent, before, after) {
            (Intent::TogglePause | Intent::SetPaused(_), Phase::Playing, Phase::Paused) => {
                self.set_notice("Game Paused".to_string());
            }
            (Intent::TogglePause | Intent::SetPaused(_), Phase::Paused, Phase::Playing) => {
                self.set_notice("Game Resumed".to_string());
            }
            (Intent::Restart, Phase::GameOver, Phase::Playing) => {
                self.metrics.on_game_start();
                self.set_notice("Game Restarted!".to_string());
            }
            (Intent::NewGame, before, _) => {
                // An abandoned game still counts
                if before != Phase::GameOver {
                    self.metrics.on_game_over(score);
                }
                self.metrics.on_game_start();
                self.set_notice("New Game".to_string());
            }
            _ => {}
        }
    }

    fn change_speed(&mut self, speed: TickSpeed) {
        if speed == self.speed {
            return;
        }
        self.speed = speed;
        self.speed_changed = true;
        info!(tick_secs = speed.secs(), "speed changed");
        self.set_notice(format!("Tick {:.1}s", speed.secs()));
    }

    fn set_notice(&mut self, text: String) {
        self.notice = Some(Notice {
            text,
            until: Instant::now() + NOTICE_TTL,
        });
    }

    fn expire_notice(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| now >= n.until) {
            self.notice = None;
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

/// Tick timer for `speed`, first firing one period from now
fn ticker(speed: TickSpeed) -> Interval {
    let period = speed.interval();
    let mut timer = interval_at(tokio::time::Instant::now() + period, period);
    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, GameOverReason};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn mode() -> HumanMode {
        let settings = Settings {
            seed: Some(4),
            ..Settings::default()
        };
        HumanMode::new(&settings)
    }

    fn press(mode: &mut HumanMode, code: KeyCode, now: Instant) {
        mode.handle_event(Event::Key(KeyEvent::new(code, KeyModifiers::NONE)), now);
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.engine.phase(), Phase::Playing);
        assert_eq!(mode.engine.state().score, 0);
        assert!((mode.speed.secs() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_input_waits_for_tick() {
        let mut mode = mode();
        press(&mut mode, KeyCode::Up, Instant::now());

        assert_eq!(mode.engine.state().direction, Direction::Right);
        mode.on_tick();
        assert_eq!(mode.engine.state().direction, Direction::Up);
    }

    #[test]
    fn test_two_quick_turns_do_not_reverse() {
        let mut mode = mode();
        let now = Instant::now();
        press(&mut mode, KeyCode::Up, now);
        press(&mut mode, KeyCode::Left, now);

        mode.on_tick();
        assert_eq!(mode.engine.state().direction, Direction::Up);
        assert!(!mode.engine.state().game_over);

        mode.on_tick();
        assert_eq!(mode.engine.state().direction, Direction::Left);
        assert!(!mode.engine.state().game_over);
    }

    #[test]
    fn test_pause_and_resume_notices() {
        let mut mode = mode();
        let now = Instant::now();

        press(&mut mode, KeyCode::Char(' '), now);
        mode.on_tick();
        assert_eq!(mode.engine.phase(), Phase::Paused);
        assert_eq!(mode.notice.as_ref().unwrap().text, "Game Paused");

        let steps = mode.engine.state().steps;
        mode.on_tick();
        assert_eq!(mode.engine.state().steps, steps);

        press(&mut mode, KeyCode::Char('p'), now + Duration::from_millis(200));
        mode.on_tick();
        assert_eq!(mode.engine.phase(), Phase::Playing);
        assert_eq!(mode.notice.as_ref().unwrap().text, "Game Resumed");
    }

    #[test]
    fn test_game_over_records_metrics_and_restart() {
        let mut mode = mode();

        // Heading right from the centre reaches the wall within the grid width
        for _ in 0..25 {
            mode.on_tick();
        }
        assert_eq!(mode.engine.phase(), Phase::GameOver);
        assert_eq!(
            mode.engine.state().game_over_reason,
            Some(GameOverReason::Wall)
        );
        assert_eq!(mode.metrics.games_played, 1);
        assert!(mode.notice.as_ref().unwrap().text.starts_with("Game Over!"));

        press(&mut mode, KeyCode::Char('r'), Instant::now());
        mode.on_tick();
        assert_ne!(mode.engine.phase(), Phase::GameOver);
        assert_eq!(mode.notice.as_ref().unwrap().text, "Game Restarted!");
    }

    #[test]
    fn test_turns_queued_while_paused_do_not_fold() {
        let mut mode = mode();
        let t0 = Instant::now();

        press(&mut mode, KeyCode::Char(' '), t0);
        mode.on_tick();
        assert_eq!(mode.engine.phase(), Phase::Paused);

        press(&mut mode, KeyCode::Up, t0);
        press(&mut mode, KeyCode::Left, t0);
        mode.on_tick();
        mode.on_tick();
        assert_eq!(mode.engine.state().direction, Direction::Right);

        press(&mut mode, KeyCode::Char(' '), t0 + Duration::from_millis(500));
        mode.on_tick();
        assert_eq!(mode.engine.phase(), Phase::Playing);
        assert_eq!(mode.engine.state().direction, Direction::Right);

        mode.on_tick();
        assert_eq!(mode.engine.state().direction, Direction::Up);
        mode.on_tick();
        assert_eq!(mode.engine.state().direction, Direction::Left);
        assert!(!mode.engine.state().game_over);
    }

    #[test]
    fn test_new_game_counts_abandoned_game() {
        let mut mode = mode();
        let mut state = mode.engine.state().clone();
        state.score = 5;
        mode.engine = GameEngine::from_state(mode.engine.config().clone(), state, 4).unwrap();

        press(&mut mode, KeyCode::Char('n'), Instant::now());
        mode.on_tick();

        assert_eq!(mode.metrics.games_played, 1);
        assert_eq!(mode.metrics.high_score, 5);
        assert_eq!(mode.engine.state().score, 0);
        assert_eq!(mode.notice.as_ref().unwrap().text, "New Game");
    }

    #[test]
    fn test_new_game_after_game_over_counts_once() {
        let mut mode = mode();
        for _ in 0..25 {
            mode.on_tick();
        }
        assert_eq!(mode.metrics.games_played, 1);

        press(&mut mode, KeyCode::Char('n'), Instant::now());
        mode.on_tick();
        assert_eq!(mode.metrics.games_played, 1);
    }

    #[test]
    fn test_speed_keys_clamp() {
        let mut mode = mode();
        let now = Instant::now();

        press(&mut mode, KeyCode::Char('+'), now);
        assert!(mode.speed_changed);
        assert!((mode.speed.secs() - 0.2).abs() < 1e-9);

        for _ in 0..20 {
            press(&mut mode, KeyCode::Char('-'), now);
        }
        assert!((mode.speed.secs() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_quit_key() {
        let mut mode = mode();
        press(&mut mode, KeyCode::Char('q'), Instant::now());
        assert!(mode.should_quit);
    }

    #[test]
    fn test_notice_expires() {
        let mut mode = mode();
        mode.set_notice("hello".to_string());

        mode.expire_notice(Instant::now());
        assert!(mode.notice.is_some());

        mode.expire_notice(Instant::now() + NOTICE_TTL + Duration::from_millis(1));
        assert!(mode.notice.is_none());
    }
}
