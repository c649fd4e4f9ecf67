//! Binary entry point that glues the SQLite-backed domain model to the TUI.
//! The bootstrapping pipeline is short: bring up the database, hydrate the
//! initial app state, and drive the Ratatui event loop until the user exits.
use institute_manager::{open_store, run_app, App};

/// Initialize persistence, load the initial page, and launch the Ratatui
/// event loop.
///
/// Returning a `Result` bubbles up fatal initialization problems (for example
/// an unwritable home directory) to the terminal instead of crashing
/// silently.
fn main() -> anyhow::Result<()> {
    let conn = open_store()?;
    let mut app = App::new(conn)?;
    run_app(&mut app)
}
