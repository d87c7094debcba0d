use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::board::BoardStyle;

/// Configuration for the game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Milliseconds between snake moves
    pub tick_interval_ms: u64,
    /// Board style used for every round; random per round when unset
    pub forced_style: Option<BoardStyle>,
    /// Random samples tried when the center cell is blocked at spawn
    pub max_spawn_attempts: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 40,
            grid_height: 25,
            tick_interval_ms: 150,
            forced_style: None,
            max_spawn_attempts: 10_000,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    pub fn with_style(mut self, style: Option<BoardStyle>) -> Self {
        self.forced_style = style;
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(20, 15)
    }
}
