use super::{
    action::{Direction, Intent},
    config::GameConfig,
    state::{GameOverReason, GameState, Phase, Position, Snake, Snapshot},
};
use anyhow::{bail, Result};
use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};
use tracing::{debug, info, warn};

/// Outcome of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickResult {
    /// Whether the tick ran at all (false while paused or over)
    pub advanced: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set on the tick that ended the game
    pub game_over: Option<GameOverReason>,
}

impl TickResult {
    fn idle() -> Self {
        Self::default()
    }
}

/// The game engine: owns the live session state and enforces its invariants
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    state: GameState,
}

impl GameEngine {
    /// Create a new game engine seeded from OS entropy
    pub fn new(config: GameConfig) -> Self {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Resume from an arbitrary state.
    ///
    /// The snake must have at least one segment and every segment must lie on
    /// a grid of the configured size.
    pub fn from_state(config: GameConfig, state: GameState, seed: u64) -> Result<Self> {
        if state.snake.is_empty() {
            bail!("snake must have at least one segment");
        }
        if state.grid_size != config.grid_size {
            bail!(
                "state grid {} does not match configured grid {}",
                state.grid_size,
                config.grid_size
            );
        }
        if let Some(pos) = state.snake.body.iter().find(|p| !state.is_in_bounds(**p)) {
            bail!("snake segment ({}, {}) lies off the grid", pos.row, pos.col);
        }

        Ok(Self {
            config,
            rng: StdRng::seed_from_u64(seed),
            state,
        })
    }

    fn from_rng(config: GameConfig, mut rng: StdRng) -> Self {
        let state = initial_state(&config, &mut rng);
        Self { config, rng, state }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Read-only view of the live state
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Owned copy for the renderer
    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    /// Replace the live state with a fresh game
    pub fn reset(&mut self) -> &GameState {
        self.state = initial_state(&self.config, &mut self.rng);
        info!(food = ?self.state.food, "game reset");
        &self.state
    }

    /// Request a new heading; reversals and requests after game over are dropped
    pub fn set_direction(&mut self, requested: Direction) {
        if self.state.game_over || self.state.direction.is_opposite(requested) {
            return;
        }
        self.state.direction = requested;
    }

    pub fn toggle_pause(&mut self) {
        let paused = !self.state.paused;
        self.set_paused(paused);
    }

    pub fn set_paused(&mut self, paused: bool) {
        if self.state.game_over || self.state.paused == paused {
            return;
        }
        self.state.paused = paused;
        info!(paused, "pause toggled");
    }

    /// Apply a queued user intent
    pub fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::Turn(direction) => self.set_direction(direction),
            Intent::TogglePause => self.toggle_pause(),
            Intent::SetPaused(paused) => self.set_paused(paused),
            Intent::Restart => {
                if self.state.game_over {
                    self.reset();
                }
            }
            Intent::NewGame => {
                self.reset();
            }
        }
    }

    /// Advance the simulation by one cell
    pub fn tick(&mut self) -> TickResult {
        if self.state.paused || self.state.game_over {
            return TickResult::idle();
        }

        let new_head = self
            .state
            .snake
            .head()
            .moved_in_direction(self.state.direction);

        // Nothing is committed if the move collides
        if let Some(reason) = self.check_collision(new_head) {
            self.end_game(reason);
            return TickResult {
                advanced: true,
                ate_food: false,
                game_over: Some(reason),
            };
        }

        let ate_food = new_head == self.state.food;
        self.state.snake.advance(new_head, ate_food);
        self.state.steps += 1;

        if !ate_food {
            return TickResult {
                advanced: true,
                ate_food,
                game_over: None,
            };
        }

        self.state.score += 1;
        debug!(score = self.state.score, len = self.state.snake.len(), "food eaten");

        let game_over = match self.place_food() {
            Some(_) => None,
            None => {
                self.end_game(GameOverReason::BoardFilled);
                Some(GameOverReason::BoardFilled)
            }
        };

        TickResult {
            advanced: true,
            ate_food,
            game_over,
        }
    }

    /// Pick a new food cell off the snake and store it; `None` if the board is full
    pub fn place_food(&mut self) -> Option<Position> {
        let food = sample_free_cell(
            &mut self.rng,
            self.state.grid_size,
            &self.state.snake,
            self.config.food_attempts,
        )?;
        self.state.food = food;
        Some(food)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, pos: Position) -> Option<GameOverReason> {
        if !self.state.is_in_bounds(pos) {
            return Some(GameOverReason::Wall);
        }

        // The current tail still counts: it has not moved yet
        if self.state.snake.collides_with_body(pos) {
            return Some(GameOverReason::SelfCollision);
        }

        None
    }

    fn end_game(&mut self, reason: GameOverReason) {
        self.state.game_over = true;
        self.state.game_over_reason = Some(reason);
        info!(%reason, score = self.state.score, steps = self.state.steps, "game over");
    }
}

fn initial_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
    let centre = (config.grid_size / 2) as i32;
    let direction = Direction::Right;
    let snake = Snake::new(
        Position::new(centre, centre),
        direction,
        config.initial_snake_length,
    );

    // A validated config always leaves a free cell; the head is the last resort
    let food = sample_free_cell(rng, config.grid_size, &snake, config.food_attempts)
        .unwrap_or_else(|| snake.head());

    GameState::new(snake, direction, food, config.grid_size)
}

/// Uniformly pick a cell not covered by `snake`.
///
/// Rejection sampling for up to `attempts` draws, then an exact scan of the free
/// cells so a crowded board still terminates.
fn sample_free_cell<R: Rng>(
    rng: &mut R,
    grid_size: usize,
    snake: &Snake,
    attempts: usize,
) -> Option<Position> {
    if grid_size == 0 {
        return None;
    }

    for _ in 0..attempts {
        let row = rng.gen_range(0..grid_size) as i32;
        let col = rng.gen_range(0..grid_size) as i32;
        let pos = Position::new(row, col);

        if !snake.occupies(pos) {
            return Some(pos);
        }
    }

    let n = grid_size as i32;
    let free: Vec<Position> = (0..n)
        .flat_map(|row| (0..n).map(move |col| Position::new(row, col)))
        .filter(|pos| !snake.occupies(*pos))
        .collect();

    warn!(
        attempts,
        free = free.len(),
        "food sampling exhausted its draws, scanning free cells"
    );
    free.choose(rng).copied()
}
