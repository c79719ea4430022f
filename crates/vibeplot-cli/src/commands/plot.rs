//! Plot command - build a figure from a configuration file.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;
use vibeplot::{FigureBuilder, PlotConfig, VibeplotConfig, Workbook, render_html};

pub fn run(
    files: Vec<PathBuf>,
    config_path: PathBuf,
    output: PathBuf,
    config: &VibeplotConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let plot_config = PlotConfig::load(&config_path)?;
    let workbook = Workbook::load(&files, config)?;

    let outcome = FigureBuilder::new().build(&workbook, &plot_config);

    for error in &outcome.errors {
        eprintln!(
            "{} {}:{} (X: {}): {}",
            "Skipped".yellow().bold(),
            error.file,
            error.column,
            error.x_column.as_deref().unwrap_or("-"),
            error.message
        );
    }

    let is_json = output
        .extension()
        .map(|e| e.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    let content = if is_json {
        outcome.figure.to_json_pretty()?
    } else {
        render_html(&outcome.figure)?
    };
    fs::write(&output, content)?;

    println!(
        "{} {} traces to {}",
        "Wrote".green().bold(),
        outcome.figure.data.len().to_string().white().bold(),
        output.display()
    );

    if outcome.figure.data.is_empty() {
        return Err("No series could be plotted".into());
    }

    Ok(())
}
