/// Cargoyard Terminal - drag cargo blocks around a floor grid
///
/// Controls:
///   - Left mouse drag: Move a block (snaps to the grid, capped at the height limit)
///   - WASD / Arrow Keys: Orbit the camera
///   - +/-: Zoom
///   - C: Cancel the current drag
///   - Q/ESC: Quit

use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use cargoyard_core::{BuilderSession, FloorGrid, SceneConfig, DEFAULT_HEIGHT_LIMIT};
use cargoyard_terminal::TerminalApp;
use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cargoyard", version, about = "Drag cargo blocks onto a grid in the terminal")]
struct Cli {
    /// Rows a block may be lifted above the first one
    #[arg(long, default_value_t = DEFAULT_HEIGHT_LIMIT)]
    height_limit: u32,

    /// Floor layout file: one row per line, `1`/`#` solid, `0`/`.` empty
    #[arg(long)]
    floor: Option<PathBuf>,

    /// Write logs to this file (filter with RUST_LOG, default `info`)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> Result<SceneConfig> {
    let mut config = SceneConfig::default().with_height_limit(cli.height_limit);

    if let Some(path) = &cli.floor {
        let layout = fs::read_to_string(path)
            .with_context(|| format!("failed to read floor layout {}", path.display()))?;
        let floor: FloorGrid = layout
            .parse()
            .with_context(|| format!("failed to parse floor layout {}", path.display()))?;
        config = config.with_floor(floor);
    }

    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let config = load_config(&cli)?;
    let session = BuilderSession::new(config).context("failed to start builder session")?;
    tracing::info!(height_limit = cli.height_limit, "starting terminal front-end");

    let mut app = TerminalApp::new(session)?;
    app.run()?;

    tracing::info!("terminal front-end stopped");
    Ok(())
}
