use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

use super::store::{load_value, save_value, KeyValueStore};
use crate::game::{BoardStyle, RoundOutcome};

/// Store key holding the per-style records
pub const HIGH_SCORES_KEY: &str = "snakeHighScores";

/// Best results on one board style
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub score: u32,
    /// Best fill percentage
    pub filled: f64,
}

/// Best score and best fill percentage per board style name
#[derive(Debug, Clone, PartialEq)]
pub struct HighScores {
    entries: BTreeMap<String, HighScore>,
}

impl HighScores {
    /// Zeroed records for every known style
    pub fn new() -> Self {
        let entries = BoardStyle::ALL
            .iter()
            .map(|style| (style.name().to_string(), HighScore::default()))
            .collect();
        Self { entries }
    }

    /// Load records from the store, keeping zeroed entries for styles it lacks
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        let mut scores = Self::new();
        if let Some(stored) = load_value::<BTreeMap<String, HighScore>, _>(store, HIGH_SCORES_KEY) {
            scores.entries.extend(stored);
        }
        scores
    }

    pub fn get(&self, style_name: &str) -> HighScore {
        self.entries.get(style_name).copied().unwrap_or_default()
    }

    pub fn for_style(&self, style: BoardStyle) -> HighScore {
        self.get(style.name())
    }

    /// Fold a result into the records. Returns true when either the score or
    /// the fill percentage beat the previous best.
    pub fn update(&mut self, style_name: &str, score: u32, filled: f64) -> bool {
        let entry = self.entries.entry(style_name.to_string()).or_default();
        let mut new_record = false;

        if score > entry.score {
            entry.score = score;
            new_record = true;
        }
        if filled > entry.filled {
            entry.filled = filled;
            new_record = true;
        }

        new_record
    }

    /// Update the records with a result and persist them
    pub fn record<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        style_name: &str,
        score: u32,
        filled: f64,
    ) -> Result<bool> {
        let new_record = self.update(style_name, score, filled);
        save_value(store, HIGH_SCORES_KEY, &self.entries)?;

        if new_record {
            info!(board = style_name, score, filled, "new high score");
        }
        Ok(new_record)
    }

    /// Record a finished round under its board style's name
    pub fn record_outcome<S: KeyValueStore + ?Sized>(
        &mut self,
        store: &mut S,
        outcome: &RoundOutcome,
    ) -> Result<GameOverSummary> {
        let new_record = self.record(
            store,
            outcome.board_style.name(),
            outcome.score,
            outcome.filled_percentage,
        )?;
        Ok(GameOverSummary {
            outcome: *outcome,
            new_record,
        })
    }
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

/// What the game-over screen shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameOverSummary {
    pub outcome: RoundOutcome,
    pub new_record: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CollisionType;
    use crate::persistence::store::MemoryStore;

    #[test]
    fn test_defaults_cover_every_style() {
        let scores = HighScores::new();
        for style in BoardStyle::ALL {
            assert_eq!(scores.for_style(style), HighScore::default());
        }
    }

    #[test]
    fn test_update_tracks_maximums_independently() {
        let mut scores = HighScores::new();

        assert!(scores.update("Maze", 10, 4.5));
        assert!(!scores.update("Maze", 5, 2.0));
        // A better fill alone is still a record
        assert!(scores.update("Maze", 8, 6.25));
        assert!(scores.update("Maze", 12, 1.0));

        assert_eq!(
            scores.get("Maze"),
            HighScore {
                score: 12,
                filled: 6.25
            }
        );
    }

    #[test]
    fn test_unknown_style_gets_an_entry() {
        let mut scores = HighScores::new();
        assert!(scores.update("Standard", 3, 1.5));
        assert_eq!(scores.get("Standard").score, 3);
    }

    #[test]
    fn test_record_persists_and_reloads() {
        let mut store = MemoryStore::new();
        let mut scores = HighScores::load(&store);

        assert!(scores.record(&mut store, "Blob", 42, 7.77).unwrap());
        assert!(!scores.record(&mut store, "Blob", 40, 7.0).unwrap());

        let reloaded = HighScores::load(&store);
        assert_eq!(reloaded.get("Blob").score, 42);
        assert_eq!(reloaded.get("Blob").filled, 7.77);
        assert_eq!(reloaded.get("Circular"), HighScore::default());
    }

    #[test]
    fn test_record_outcome() {
        let mut store = MemoryStore::new();
        let mut scores = HighScores::new();
        let outcome = RoundOutcome {
            score: 19,
            filled_percentage: 3.37,
            board_style: BoardStyle::Circular,
            collision: CollisionType::Obstacle,
        };

        let summary = scores.record_outcome(&mut store, &outcome).unwrap();
        assert!(summary.new_record);
        assert_eq!(summary.outcome, outcome);
        assert_eq!(scores.get("Circular").score, 19);

        let again = scores.record_outcome(&mut store, &outcome).unwrap();
        assert!(!again.new_record);
    }
}
