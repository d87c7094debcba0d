use anyhow::Result;
use std::io::Write;
use tracing::debug;

use super::store::{load_value, save_value, KeyValueStore};

/// Store key holding the mute flag
pub const MUTED_KEY: &str = "snakeMuted";

/// Audio preferences shared across sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AudioSettings {
    pub muted: bool,
}

impl AudioSettings {
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        Self {
            muted: load_value(store, MUTED_KEY).unwrap_or(false),
        }
    }

    /// Flip the mute flag and persist it. Returns the new value.
    pub fn toggle_mute<S: KeyValueStore + ?Sized>(&mut self, store: &mut S) -> Result<bool> {
        self.muted = !self.muted;
        save_value(store, MUTED_KEY, &self.muted)?;
        debug!(muted = self.muted, "audio toggled");
        Ok(self.muted)
    }

    /// Sound the terminal bell unless muted
    pub fn play_cue<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        if self.muted {
            return Ok(());
        }
        out.write_all(b"\x07")?;
        out.flush()
    }
}
