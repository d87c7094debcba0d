//! Core game logic module for Snake
//!
//! This module contains the board generator and the move/collision evaluator
//! without any I/O or rendering dependencies.

pub mod action;
pub mod board;
pub mod config;
pub mod engine;
pub mod generator;
pub mod seeded;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use board::{Board, BoardStyle, Cell};
pub use config::GameConfig;
pub use engine::{advance, GameEngine, GenerationError, Move, StepResult};
pub use generator::{generate, generate_with_rng};
pub use seeded::{pseudo_random, SeededSequence};
pub use state::{CollisionType, GameState, Position, RoundOutcome, Snake};
