use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_arena::game::{BoardStyle, GameConfig};
use snake_arena::modes::{run_preview, HumanMode};
use snake_arena::persistence::JsonFileStore;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "snake_arena")]
#[command(version, about = "Snake on procedurally generated boards")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// Grid width
    #[arg(long, default_value = "40")]
    width: usize,

    /// Grid height
    #[arg(long, default_value = "25")]
    height: usize,

    /// Board style for every round (random when omitted)
    #[arg(long)]
    style: Option<StyleArg>,

    /// Milliseconds between snake moves
    #[arg(long, default_value = "150")]
    tick_ms: u64,

    /// File holding high scores and settings
    #[arg(long, default_value = "snake_arena.json")]
    data_file: PathBuf,

    /// Log output file
    #[arg(long, default_value = "snake_arena.log")]
    log_file: PathBuf,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Print one generated board and exit
    Preview,
}

#[derive(Clone, Copy, ValueEnum)]
enum StyleArg {
    GappedBorder,
    Circular,
    Maze,
    Blob,
}

impl From<StyleArg> for BoardStyle {
    fn from(arg: StyleArg) -> Self {
        match arg {
            StyleArg::GappedBorder => BoardStyle::GappedBorder,
            StyleArg::Circular => BoardStyle::Circular,
            StyleArg::Maze => BoardStyle::Maze,
            StyleArg::Blob => BoardStyle::Blob,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    snake_arena::logging::init(&cli.log_file)?;

    // Create game configuration from CLI arguments
    let mut config = GameConfig::new(cli.width, cli.height).with_style(cli.style.map(Into::into));
    config.tick_interval_ms = cli.tick_ms;

    // Dispatch to appropriate mode
    match cli.mode {
        Mode::Human => {
            let store = JsonFileStore::open(&cli.data_file)
                .with_context(|| format!("Failed to open {}", cli.data_file.display()))?;
            info!(path = %store.path().display(), "store opened");
            let mut human_mode = HumanMode::new(config, store);
            human_mode.run().await?;
        }
        Mode::Preview => {
            run_preview(&config, &mut std::io::stdout().lock())?;
        }
    }

    Ok(())
}
