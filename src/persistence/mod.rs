//! High scores and settings kept between sessions

pub mod high_scores;
pub mod settings;
pub mod store;

pub use high_scores::{GameOverSummary, HighScore, HighScores};
pub use settings::AudioSettings;
pub use store::{JsonFileStore, KeyValueStore, MemoryStore};
