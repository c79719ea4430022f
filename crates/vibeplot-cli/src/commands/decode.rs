//! Decode command - decode formula cells and export the table.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use colored::Colorize;
use indexmap::IndexMap;
use tracing::info;
use vibeplot::{DataTable, LoadedFile, VibeplotConfig};

use crate::cli::OutputFormat;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    format: OutputFormat,
    config: &VibeplotConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let loaded = LoadedFile::load(&file, config)?;
    info!(
        file = %loaded.name(),
        decoded = loaded.metadata.decoded_cells,
        "decoded formula cells"
    );

    match &output {
        Some(path) => {
            let writer = BufWriter::new(File::create(path)?);
            write_table(&loaded.table, format, writer)?;

            println!(
                "{} {} formula cells in {}",
                "Decoded".cyan().bold(),
                loaded.metadata.decoded_cells.to_string().white().bold(),
                loaded.name()
            );
            println!("Wrote {} rows to {}", loaded.table.row_count(), path.display());
        }
        None => {
            let stdout = io::stdout();
            write_table(&loaded.table, format, stdout.lock())?;
        }
    }

    Ok(())
}

fn write_table<W: Write>(
    table: &DataTable,
    format: OutputFormat,
    mut writer: W,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Csv | OutputFormat::Tsv => {
            let delimiter = if format == OutputFormat::Tsv { b'\t' } else { b',' };
            let mut csv_writer = csv::WriterBuilder::new()
                .delimiter(delimiter)
                .from_writer(writer);
            csv_writer.write_record(&table.headers)?;
            for row in &table.rows {
                csv_writer.write_record(row)?;
            }
            csv_writer.flush()?;
        }
        OutputFormat::Json => {
            let records: Vec<IndexMap<&str, &str>> = table
                .rows
                .iter()
                .map(|row| {
                    table
                        .headers
                        .iter()
                        .map(String::as_str)
                        .zip(row.iter().map(String::as_str))
                        .collect()
                })
                .collect();
            serde_json::to_writer_pretty(&mut writer, &records)?;
            writeln!(writer)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> DataTable {
        DataTable::new(
            vec!["stamp".to_string(), "alt".to_string()],
            vec![vec!["1970-01-01.5".to_string(), "12.007".to_string()]],
            b',',
        )
    }

    #[test]
    fn test_write_tsv() {
        let mut out = Vec::new();
        write_table(&table(), OutputFormat::Tsv, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "stamp\talt\n1970-01-01.5\t12.007\n");
    }

    #[test]
    fn test_write_json_keeps_column_order() {
        let mut out = Vec::new();
        write_table(&table(), OutputFormat::Json, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.find("stamp").unwrap() < text.find("alt").unwrap());

        let parsed: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed[0]["alt"], "12.007");
    }
}
