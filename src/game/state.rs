use std::fmt;

use super::action::Direction;

/// A cell on the game grid, 0-indexed from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub row: i32,
    pub col: i32,
}

impl Position {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Move position by delta
    pub fn moved_by(&self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// Move position one cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (drow, dcol) = direction.delta();
        self.moved_by(drow, dcol)
    }
}

impl From<(i32, i32)> for Position {
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
}

impl Snake {
    /// Create a straight snake whose body trails behind `head`, opposite to `facing`
    pub fn new(head: Position, facing: Direction, length: usize) -> Self {
        let mut body = Vec::with_capacity(length.max(1));
        body.push(head);

        let back = facing.opposite();
        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_in_direction(back));
        }

        Self { body }
    }

    /// Build a snake from explicit cells, head first
    pub fn from_cells<I, P>(cells: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Position>,
    {
        Self {
            body: cells.into_iter().map(Into::into).collect(),
        }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Get body segments (excluding head)
    pub fn body_segments(&self) -> &[Position] {
        &self.body[1..]
    }

    /// Check if position collides with snake body (excluding head, including tail)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body_segments().contains(&pos)
    }

    /// Check if any segment occupies `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Push `new_head` to the front, dropping the tail unless growing
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameOverReason {
    /// Snake left the grid
    Wall,
    /// Snake ran into itself
    SelfCollision,
    /// No free cell was left for food
    BoardFilled,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            GameOverReason::Wall => "hit the wall",
            GameOverReason::SelfCollision => "ran into itself",
            GameOverReason::BoardFilled => "filled the board",
        };
        f.write_str(text)
    }
}

/// Conceptual phase derived from the state flags
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Playing,
    Paused,
    GameOver,
}

/// Complete game state, owned and mutated only by the engine
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub direction: Direction,
    pub food: Position,
    pub grid_size: usize,
    pub score: u32,
    pub steps: u32,
    pub paused: bool,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
}

impl GameState {
    /// Create a fresh, playing game state
    pub fn new(snake: Snake, direction: Direction, food: Position, grid_size: usize) -> Self {
        Self {
            snake,
            direction,
            food,
            grid_size,
            score: 0,
            steps: 0,
            paused: false,
            game_over: false,
            game_over_reason: None,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        let n = self.grid_size as i32;
        pos.row >= 0 && pos.row < n && pos.col >= 0 && pos.col < n
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Playing
        }
    }

    /// Copy out the renderable view of this state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            snake: self.snake.body.clone(),
            head: self.snake.head(),
            facing: self.direction,
            food: self.food,
            grid_size: self.grid_size,
            score: self.score,
            paused: self.paused,
            game_over: self.game_over,
            game_over_reason: self.game_over_reason,
        }
    }
}

/// Immutable per-frame view handed to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Snake cells, head first
    pub snake: Vec<Position>,
    pub head: Position,
    pub facing: Direction,
    pub food: Position,
    pub grid_size: usize,
    pub score: u32,
    pub paused: bool,
    pub game_over: bool,
    pub game_over_reason: Option<GameOverReason>,
}

impl Snapshot {
    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.paused {
            Phase::Paused
        } else {
            Phase::Playing
        }
    }

    pub fn is_snake(&self, pos: Position) -> bool {
        self.snake.contains(&pos)
    }
}
