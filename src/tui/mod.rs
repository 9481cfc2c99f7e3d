//! Interactive date browser
mod app;
mod events;
mod layout;
mod rendering;
mod terminal;

use anyhow::{Context, Result};
pub use app::App;
use chrono::NaiveDate;
use tokio::runtime::Handle;
use tracing::info;

use self::terminal::TerminalManager;
use crate::controller::DateSelectionController;

/// Run the interactive TUI until the user quits.
///
/// Favorites that failed to save during the session are written once more
/// after the terminal is restored; a failure there is returned.
pub fn run_interactive(
    controller: DateSelectionController,
    runtime: Handle,
    heading: &'static str,
    initial_date: Option<NaiveDate>,
) -> Result<()> {
    let mut app = App::new(controller, runtime, heading);
    if let Some(date) = initial_date {
        app.select_date(date);
    }

    let mut manager = TerminalManager::new()?;
    let res = app.run(manager.terminal_mut());
    manager.restore()?;
    res?;

    let mut controller = app.into_controller();
    if controller.flush().context("Favorites could not be saved")? {
        info!("Flushed unsaved favorites on exit");
    }
    Ok(())
}
