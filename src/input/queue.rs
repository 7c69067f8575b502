use std::collections::VecDeque;
use std::time::{Duration, Instant};

use crate::game::Intent;

/// Intents collected between ticks.
///
/// Input arrives as fast as the terminal delivers it; the engine only sees it at
/// tick boundaries. At most one turn is released per tick so two quick turns
/// cannot fold the snake back onto its neck within a single period.
#[derive(Debug)]
pub struct IntentQueue {
    pending: VecDeque<Intent>,
    debounce: Duration,
    turn_buffer: usize,
    last_accepted: Option<(Intent, Instant)>,
}

impl IntentQueue {
    pub fn new(debounce: Duration, turn_buffer: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            debounce,
            turn_buffer: turn_buffer.max(1),
            last_accepted: None,
        }
    }

    /// Queue an intent received at `now`. Returns false if it was dropped.
    pub fn push(&mut self, intent: Intent, now: Instant) -> bool {
        if let Some((last, at)) = self.last_accepted {
            if last == intent && now.saturating_duration_since(at) < self.debounce {
                return false;
            }
        }

        if intent.is_turn() && self.queued_turns() >= self.turn_buffer {
            return false;
        }

        self.pending.push_back(intent);
        self.last_accepted = Some((intent, now));
        true
    }

    /// Take everything due this tick: every control intent plus, when
    /// `release_turn` is set, the oldest turn.
    ///
    /// Pass `release_turn = false` for ticks that will not move the snake, so
    /// turns never stack against a heading that has not been travelled yet.
    /// Later turns stay queued. A drained reset discards turns queued before it.
    pub fn drain_for_tick(&mut self, release_turn: bool) -> Vec<Intent> {
        let mut due = Vec::with_capacity(self.pending.len());
        let mut held = VecDeque::new();
        let mut turn_taken = !release_turn;

        for intent in self.pending.drain(..) {
            match intent {
                Intent::Turn(_) if !turn_taken => {
                    turn_taken = true;
                    due.push(intent);
                }
                Intent::Turn(_) => held.push_back(intent),
                Intent::Restart | Intent::NewGame => {
                    held.clear();
                    due.push(intent);
                }
                _ => due.push(intent),
            }
        }

        self.pending = held;
        due
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn queued_turns(&self) -> usize {
        self.pending.iter().filter(|i| i.is_turn()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Direction;

    fn queue() -> IntentQueue {
        IntentQueue::new(Duration::from_millis(100), 3)
    }

    #[test]
    fn test_repeated_key_is_debounced() {
        let mut q = queue();
        let t0 = Instant::now();

        assert!(q.push(Intent::Turn(Direction::Up), t0));
        assert!(!q.push(Intent::Turn(Direction::Up), t0 + Duration::from_millis(50)));
        assert!(q.push(Intent::Turn(Direction::Up), t0 + Duration::from_millis(150)));
        assert_eq!(q.len(), 2);
    }

    #[test]
    fn test_different_keys_are_not_debounced() {
        let mut q = queue();
        let t0 = Instant::now();

        assert!(q.push(Intent::Turn(Direction::Up), t0));
        assert!(q.push(Intent::Turn(Direction::Left), t0));
        assert!(q.push(Intent::TogglePause, t0));
        assert_eq!(q.len(), 3);
    }

    #[test]
    fn test_one_turn_per_tick() {
        let mut q = queue();
        let t0 = Instant::now();
        q.push(Intent::Turn(Direction::Up), t0);
        q.push(Intent::Turn(Direction::Left), t0);
        q.push(Intent::TogglePause, t0);

        assert_eq!(
            q.drain_for_tick(true),
            vec![Intent::Turn(Direction::Up), Intent::TogglePause]
        );
        assert_eq!(q.drain_for_tick(true), vec![Intent::Turn(Direction::Left)]);
        assert!(q.drain_for_tick(true).is_empty());
        assert!(q.is_empty());
    }

    #[test]
    fn test_turn_buffer_caps_queued_turns() {
        let mut q = IntentQueue::new(Duration::ZERO, 2);
        let t0 = Instant::now();

        assert!(q.push(Intent::Turn(Direction::Up), t0));
        assert!(q.push(Intent::Turn(Direction::Left), t0));
        assert!(!q.push(Intent::Turn(Direction::Down), t0));
        assert!(q.push(Intent::TogglePause, t0));
    }

    #[test]
    fn test_reset_discards_earlier_turns() {
        let mut q = queue();
        let t0 = Instant::now();
        q.push(Intent::Turn(Direction::Up), t0);
        q.push(Intent::Turn(Direction::Left), t0);
        q.push(Intent::NewGame, t0);
        q.push(Intent::Turn(Direction::Down), t0);

        assert_eq!(
            q.drain_for_tick(true),
            vec![Intent::Turn(Direction::Up), Intent::NewGame]
        );
        assert_eq!(q.drain_for_tick(true), vec![Intent::Turn(Direction::Down)]);
    }

    #[test]
    fn test_turns_held_when_not_released() {
        let mut q = queue();
        let t0 = Instant::now();
        q.push(Intent::Turn(Direction::Up), t0);
        q.push(Intent::Turn(Direction::Left), t0);
        q.push(Intent::TogglePause, t0);

        assert_eq!(q.drain_for_tick(false), vec![Intent::TogglePause]);
        assert_eq!(q.len(), 2);
        assert!(q.drain_for_tick(false).is_empty());

        assert_eq!(q.drain_for_tick(true), vec![Intent::Turn(Direction::Up)]);
        assert_eq!(q.drain_for_tick(true), vec![Intent::Turn(Direction::Left)]);
        assert!(q.is_empty());
    }
}
