//! Transform command - apply a preset or expression to one column.

use std::path::PathBuf;

use colored::Colorize;
use vibeplot::{LoadedFile, SeriesTransform, Transform, VibeplotConfig};

pub fn run(
    file: PathBuf,
    column: String,
    preset: Option<Transform>,
    expression: Option<String>,
    json_output: bool,
    config: &VibeplotConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let selection = match (preset, expression) {
        (Some(preset), _) => SeriesTransform::Preset(preset),
        (None, Some(expression)) => SeriesTransform::expression(expression),
        (None, None) => return Err("Specify --preset or --expression".into()),
    };

    let loaded = LoadedFile::load(&file, config)?;
    let input = loaded.numeric_column(&column)?;
    let output = selection.apply(&input)?;

    if json_output {
        let values: Vec<Option<f64>> = output
            .iter()
            .map(|v| v.is_finite().then_some(*v))
            .collect();
        let report = serde_json::json!({
            "file": loaded.name(),
            "column": column,
            "transform": selection.to_string(),
            "values": values,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {} of {} in {}",
        "Applying".cyan().bold(),
        selection.to_string().white().bold(),
        column.white(),
        loaded.name()
    );
    println!("{:>6}  {:>16}  {:>16}", "row", "input", "output");
    for (row, (x, y)) in input.iter().zip(&output).enumerate() {
        let y = if y.is_finite() {
            format!("{:16.6}", y)
        } else {
            format!("{:>16}", y).red().to_string()
        };
        println!("{:>6}  {:16.6}  {}", row, x, y);
    }

    Ok(())
}
