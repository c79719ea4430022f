//! Transforms command - list the preset catalog.

use colored::Colorize;
use vibeplot::Transform;

pub fn run(json_output: bool) -> Result<(), Box<dyn std::error::Error>> {
    let entries = Transform::entries();

    if json_output {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    println!("{}", "Preset transforms:".cyan().bold());
    for entry in &entries {
        let params = if entry.parameters.is_empty() {
            String::new()
        } else {
            format!(" ({})", entry.parameters.join(", "))
        };
        println!(
            "  {:<16} {}{}",
            entry.name.white().bold(),
            entry.label,
            params.dimmed()
        );
    }
    println!();
    println!(
        "Custom expressions use {} for the raw value, e.g. {}",
        "x".yellow(),
        "\"np.log(x + 1)\"".yellow()
    );

    Ok(())
}
