//! Data source abstraction and metadata.

use std::borrow::Cow;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::decode::decode;
use crate::error::{Result, VibeplotError};
use crate::series::parse_numeric;

/// Metadata about a loaded data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path; the key the file is known by in a workbook.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Detected encoding (`utf-8`, or `utf-8-sig` when a BOM was present).
    pub encoding: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Number of cells rewritten by formula decoding.
    pub decoded_cells: usize,
    /// When the file was loaded.
    pub loaded_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has just been parsed.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        encoding: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            encoding,
            row_count,
            column_count,
            decoded_cells: 0,
            loaded_at: Utc::now(),
        }
    }
}

/// Parsed tabular data, all cells kept as text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataTable {
    /// Column headers.
    pub headers: Vec<String>,
    /// Row data as strings (row-major order).
    pub rows: Vec<Vec<String>>,
    /// The delimiter used.
    pub delimiter: u8,
}

impl DataTable {
    /// Create a new data table.
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>, delimiter: u8) -> Self {
        Self {
            headers,
            rows,
            delimiter,
        }
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Get the number of rows (excluding header).
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Find a column index by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Check whether a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Get all values for a column by index.
    pub fn column_values(&self, index: usize) -> impl Iterator<Item = &str> {
        self.rows
            .iter()
            .map(move |row| row.get(index).map(|s| s.as_str()).unwrap_or(""))
    }

    /// Get a column by name.
    pub fn column_by_name(&self, name: &str) -> Option<Vec<&str>> {
        let index = self.column_index(name)?;
        Some(self.column_values(index).collect())
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row).and_then(|r| r.get(col).map(|s| s.as_str()))
    }

    /// Rewrite every formula-encoded cell in place with its decoded value.
    ///
    /// Returns the number of cells that changed.
    pub fn decode_formulas(&mut self) -> usize {
        let mut changed = 0;

        for cell in self.rows.iter_mut().flatten() {
            let decoded = match decode(cell) {
                Cow::Owned(decoded) => decoded,
                Cow::Borrowed(_) => continue,
            };
            *cell = decoded;
            changed += 1;
        }

        changed
    }

    /// Parse a column as a numeric series.
    ///
    /// Missing markers become NaN; anything else that is not a number is an
    /// error naming the first offending row.
    pub fn numeric_column(&self, name: &str) -> Result<Vec<f64>> {
        let index = self
            .column_index(name)
            .ok_or_else(|| VibeplotError::ColumnNotFound {
                file: String::new(),
                column: name.to_string(),
            })?;

        parse_numeric(name, self.column_values(index))
    }
}
