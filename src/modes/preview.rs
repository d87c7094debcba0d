use anyhow::{Context, Result};
use rand::Rng;
use std::io::Write;
use tracing::info;

use crate::game::{generate_with_rng, Cell, GameConfig};

/// Generate one board and print it as text
pub fn run_preview<W: Write>(config: &GameConfig, out: &mut W) -> Result<()> {
    run_preview_with_rng(&mut rand::thread_rng(), config, out)
}

pub fn run_preview_with_rng<R: Rng + ?Sized, W: Write>(
    rng: &mut R,
    config: &GameConfig,
    out: &mut W,
) -> Result<()> {
    let (board, style) = generate_with_rng(
        rng,
        config.grid_width,
        config.grid_height,
        config.forced_style,
    );

    let obstacles = board.count(Cell::Obstacle);
    let empty = board.empty_cell_count();
    info!(%style, obstacles, empty, "previewing board");

    writeln!(out, "{} ({}x{})", style, board.width(), board.height())
        .context("Failed to write preview")?;
    writeln!(out, "{}", style.description()).context("Failed to write preview")?;
    write!(out, "{}", board).context("Failed to write preview")?;
    writeln!(out, "obstacles: {}  empty cells: {}", obstacles, empty)
        .context("Failed to write preview")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::BoardStyle;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_preview_prints_board() {
        let config = GameConfig::default().with_style(Some(BoardStyle::Circular));
        let mut rng = StdRng::seed_from_u64(3);
        let mut out = Vec::new();

        run_preview_with_rng(&mut rng, &config, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Circular (40x25)");
        // Header, description, 25 rows, summary
        assert_eq!(lines.len(), 28);
        assert!(lines[2..27].iter().all(|row| row.chars().count() == 40));
        assert!(lines[27].starts_with("obstacles: 30"));
    }
}
