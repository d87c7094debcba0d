pub mod human;
pub mod preview;

pub use human::{HumanMode, Screen};
pub use preview::{run_preview, run_preview_with_rng};
