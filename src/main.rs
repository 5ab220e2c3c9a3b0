//! Capital Flow Master Board - terminal dashboard of simulated market flows
//!
//! Entry point: logging, settings, terminal setup and teardown.

use std::io;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod app;
mod config;
mod market;
mod themes;
mod ui;
mod views;
mod widgets;

use app::App;
use config::BoardSettings;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they never land on the alternate screen
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let settings = BoardSettings::resolve();
    info!(
        "Starting on {} (seed: {:?}, frame: {:?})",
        settings.display.default_view.label(),
        settings.simulation.seed,
        settings.frame_interval()
    );

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let result = run(&settings).await;

    // Restore terminal, even when the loop failed
    let restored = restore_terminal();
    result.and(restored)
}

async fn run(settings: &BoardSettings) -> Result<()> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let mut terminal =
        Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;

    let mut app = App::new(settings);
    app.run(&mut terminal).await
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(io::stdout(), LeaveAlternateScreen, crossterm::cursor::Show)
        .context("Failed to leave alternate screen")?;
    Ok(())
}
