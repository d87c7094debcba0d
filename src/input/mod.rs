pub mod handler;

pub use handler::{BoardChoice, InputHandler, KeyAction};
