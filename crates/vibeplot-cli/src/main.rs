//! VibePlot CLI - decode, transform and plot telemetry CSV files.

mod cli;
mod commands;
mod logging;
mod server;
mod web;

use clap::Parser;
use cli::{Cli, Commands};
use logging::LogConfig;
use vibeplot::VibeplotConfig;

fn main() {
    let cli = Cli::parse();

    logging::init_logging(&LogConfig::from_verbosity(cli.verbose));

    let config = VibeplotConfig {
        workers: cli.workers,
        ..VibeplotConfig::default()
    };

    let result = match cli.command {
        Commands::Decode {
            file,
            output,
            format,
        } => commands::decode::run(file, output, format, &config),

        Commands::Columns { files, json } => commands::columns::run(files, json, &config),

        Commands::Transforms { json } => commands::transforms::run(json),

        Commands::Transform {
            file,
            column,
            preset,
            expression,
            json,
        } => commands::transform::run(file, column, preset, expression, json, &config),

        Commands::Plot {
            files,
            config: plot_config,
            output,
        } => commands::plot::run(files, plot_config, output, &config),

        Commands::Serve {
            files,
            port,
            no_open,
        } => commands::serve::run(files, port, no_open, &config),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
