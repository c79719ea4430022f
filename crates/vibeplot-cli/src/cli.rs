//! CLI argument definitions using clap.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use vibeplot::Transform;

/// VibePlot: decode, transform and plot telemetry CSV files
#[derive(Parser)]
#[command(name = "vibeplot")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Worker threads used to load files in parallel
    #[arg(long, global = true, default_value = "4")]
    pub workers: usize,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Decode formula cells in a file and export the result
    Decode {
        /// Path to the data file (CSV/TSV)
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "csv")]
        format: OutputFormat,
    },

    /// List the columns of each file and the columns they share
    Columns {
        /// Data files to inspect
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the available preset transforms
    Transforms {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Apply a transform to one column and print the result
    Transform {
        /// Path to the data file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Column to transform
        #[arg(short, long)]
        column: String,

        /// Preset transform (e.g. sqrt, left_elevon, "scale(0, 1, 0, 100)")
        #[arg(short, long, conflicts_with = "expression", required_unless_present = "expression")]
        preset: Option<Transform>,

        /// Custom expression in terms of x (e.g. "np.log(x + 1)")
        #[arg(short, long)]
        expression: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Build a figure from a plot configuration file
    Plot {
        /// Data files to load
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Plot configuration (JSON)
        #[arg(short, long)]
        config: PathBuf,

        /// Output path; .json writes the figure, anything else writes HTML
        #[arg(short, long, default_value = "plot.html")]
        output: PathBuf,
    },

    /// Open the interactive plotting UI in a browser
    Serve {
        /// Data files to load
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,

        /// Port for web server
        #[arg(short, long, default_value = "8501")]
        port: u16,

        /// Don't automatically open browser
        #[arg(long)]
        no_open: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Csv,
    Tsv,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "tsv" => Ok(OutputFormat::Tsv),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use csv, tsv, or json.", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "csv"),
            OutputFormat::Tsv => write!(f, "tsv"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_transform_requires_preset_or_expression() {
        let missing = Cli::try_parse_from(["vibeplot", "transform", "a.csv", "-c", "ch1"]);
        assert!(missing.is_err());

        let both = Cli::try_parse_from([
            "vibeplot", "transform", "a.csv", "-c", "ch1", "-p", "sqrt", "-e", "x",
        ]);
        assert!(both.is_err());

        let cli = Cli::try_parse_from(["vibeplot", "transform", "a.csv", "-c", "ch1", "-p", "left-elevon"])
            .unwrap();
        match cli.command {
            Commands::Transform { preset, .. } => assert_eq!(preset, Some(Transform::LeftElevon)),
            _ => panic!("expected transform command"),
        }
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["vibeplot", "-vv", "transforms"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.workers, 4);
    }

    #[test]
    fn test_output_format_parse() {
        assert_eq!("TSV".parse::<OutputFormat>().unwrap(), OutputFormat::Tsv);
        assert!("xlsx".parse::<OutputFormat>().is_err());
    }
}
