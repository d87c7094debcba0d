use std::time::{Duration, Instant};

/// Per-session statistics shown alongside the board
pub struct GameMetrics {
    pub start_time: Instant,
    pub elapsed_time: Duration,
    pub session_best: u32,
    pub games_played: u32,
    paused_at: Option<Instant>,
}

impl GameMetrics {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            session_best: 0,
            games_played: 0,
            paused_at: None,
        }
    }

    /// Refresh the round clock; frozen while paused
    pub fn update(&mut self) {
        if self.paused_at.is_none() {
            self.elapsed_time = self.start_time.elapsed();
        }
    }

    pub fn on_game_start(&mut self) {
        self.start_time = Instant::now();
        self.elapsed_time = Duration::ZERO;
        self.paused_at = None;
    }

    pub fn set_paused(&mut self, paused: bool) {
        match (paused, self.paused_at) {
            (true, None) => {
                self.update();
                self.paused_at = Some(Instant::now());
            }
            (false, Some(since)) => {
                // Shift the start forward so the pause does not count.
                self.start_time += since.elapsed();
                self.paused_at = None;
            }
            _ => {}
        }
    }

    pub fn on_game_over(&mut self, final_score: u32) {
        self.update();
        self.paused_at = Some(Instant::now());
        self.games_played += 1;
        if final_score > self.session_best {
            self.session_best = final_score;
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
