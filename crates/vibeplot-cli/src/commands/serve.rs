//! Serve command - open the interactive plotting UI.

use std::path::PathBuf;

use colored::Colorize;
use vibeplot::{VibeplotConfig, Workbook};

use crate::server::{app, state::AppState};

pub fn run(
    files: Vec<PathBuf>,
    port: u16,
    no_open: bool,
    config: &VibeplotConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let workbook = Workbook::load(&files, config)?;

    let common = workbook.common_columns();
    if common.is_empty() {
        println!(
            "{} No column is shared by every file; plots need a common X column.",
            "Warning:".yellow().bold()
        );
    }

    let file_count = workbook.len();
    let state = AppState::new(workbook);

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting plot server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Files: {}", file_count);
    println!("  Common columns: {}", common.join(", "));
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    if !no_open {
        if let Err(e) = open::that(&url) {
            eprintln!("{} Could not open browser: {}", "Warning:".yellow(), e);
        }
    }

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))?;

    println!("{}", "Server stopped.".yellow());
    Ok(())
}
