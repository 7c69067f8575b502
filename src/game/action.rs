use serde::{Deserialize, Serialize};

/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The direction pointing the other way
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the (row, col) delta for moving in this direction.
    ///
    /// Row 0 is the top of the board, so `Up` decrements the row.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A user request queued for the next tick boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Change heading
    Turn(Direction),
    /// Flip the pause flag
    TogglePause,
    /// Force the pause flag
    SetPaused(bool),
    /// Start over after a game over
    Restart,
    /// Start over unconditionally
    NewGame,
}

impl Intent {
    pub fn is_turn(&self) -> bool {
        matches!(self, Intent::Turn(_))
    }
}

impl From<Direction> for Intent {
    fn from(direction: Direction) -> Self {
        Intent::Turn(direction)
    }
}
