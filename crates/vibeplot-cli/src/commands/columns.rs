//! Columns command - show each file's columns and the shared X candidates.

use std::path::PathBuf;

use colored::Colorize;
use vibeplot::{VibeplotConfig, Workbook};

pub fn run(
    files: Vec<PathBuf>,
    json_output: bool,
    config: &VibeplotConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let workbook = Workbook::load(&files, config)?;
    let common = workbook.common_columns();

    if json_output {
        let files: Vec<_> = workbook
            .files()
            .map(|f| {
                serde_json::json!({
                    "file": f.name(),
                    "rows": f.metadata.row_count,
                    "encoding": f.metadata.encoding,
                    "decoded_cells": f.metadata.decoded_cells,
                    "columns": f.table.headers,
                })
            })
            .collect();
        let report = serde_json::json!({
            "files": files,
            "common_columns": common,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    for file in workbook.files() {
        println!(
            "{} {} ({} rows, {} decoded cells)",
            "File:".cyan().bold(),
            file.name().white().bold(),
            file.metadata.row_count,
            file.metadata.decoded_cells
        );
        for header in &file.table.headers {
            if common.contains(header) {
                println!("  {} {}", "*".green(), header);
            } else {
                println!("    {}", header);
            }
        }
        println!();
    }

    if common.is_empty() {
        println!(
            "{} No column is shared by every file, so there is no X axis candidate.",
            "Warning:".yellow().bold()
        );
    } else {
        println!("{}", "Common columns (X axis candidates):".yellow().bold());
        for column in &common {
            println!("  {}", column.green());
        }
    }

    Ok(())
}
