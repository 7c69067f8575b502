use std::time::{Duration, Instant};

/// Per-process play statistics; nothing is persisted
pub struct GameMetrics {
    last_update: Instant,
    pub elapsed_time: Duration,
    pub high_score: u32,
    pub games_played: u32,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            last_update: Instant::now(),
            elapsed_time: Duration::ZERO,
            high_score: 0,
            games_played: 0,
        }
    }

    /// Advance the game clock; time only accumulates while `running`
    pub fn update(&mut self, running: bool) {
        let now = Instant::now();
        if running {
            self.elapsed_time += now.saturating_duration_since(self.last_update);
        }
        self.last_update = now;
    }

    pub fn on_game_start(&mut self) {
        self.last_update = Instant::now();
        self.elapsed_time = Duration::ZERO;
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.games_played += 1;
        if final_score > self.high_score {
            self.high_score = final_score;
        }
    }

    pub fn format_time(&self) -> String {
        let total_secs = self.elapsed_time.as_secs();
        let minutes = total_secs / 60;
        let seconds = total_secs % 60;
        format!("{:02}:{:02}", minutes, seconds)
    }
}

impl Default for GameMetrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_formatting() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(125);
        assert_eq!(metrics.format_time(), "02:05");

        metrics.elapsed_time = Duration::from_secs(0);
        assert_eq!(metrics.format_time(), "00:00");

        metrics.elapsed_time = Duration::from_secs(3661);
        assert_eq!(metrics.format_time(), "61:01");
    }

    #[test]
    fn test_high_score_tracking() {
        let mut metrics = GameMetrics::new();

        metrics.on_game_over(10);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 1);

        metrics.on_game_over(5);
        assert_eq!(metrics.high_score, 10);
        assert_eq!(metrics.games_played, 2);
    }

    #[test]
    fn test_clock_stops_while_not_running() {
        let mut metrics = GameMetrics::new();
        std::thread::sleep(Duration::from_millis(30));
        metrics.update(false);
        assert_eq!(metrics.elapsed_time, Duration::ZERO);

        std::thread::sleep(Duration::from_millis(30));
        metrics.update(true);
        assert!(metrics.elapsed_time.as_millis() >= 30);
    }

    #[test]
    fn test_game_start_resets_time() {
        let mut metrics = GameMetrics::new();
        metrics.elapsed_time = Duration::from_secs(90);

        metrics.on_game_start();
        metrics.update(true);
        assert!(metrics.elapsed_time < Duration::from_secs(1));
    }
}
