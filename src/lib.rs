//! Snake Arena - Snake on procedurally generated boards
//!
//! This library provides:
//! - Core game logic: board generation and move/collision evaluation (game module)
//! - High scores and settings over a key-value store (persistence module)
//! - TUI rendering (render module)
//! - Keyboard mapping (input module)
//! - Execution modes: interactive play and board preview (modes module)

pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod persistence;
pub mod render;
