//! Multi-file workbook: parallel ingestion and cross-file column lookup.

use std::collections::BTreeSet;
use std::path::Path;

use indexmap::IndexMap;
use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{Result, VibeplotError};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};

/// Configuration for loading files.
#[derive(Debug, Clone)]
pub struct VibeplotConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Number of ingestion worker threads.
    pub workers: usize,
    /// Whether to decode formula-encoded cells on load.
    pub decode_formulas: bool,
}

impl Default for VibeplotConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            workers: 4,
            decode_formulas: true,
        }
    }
}

/// One ingested file: its metadata and decoded table.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedFile {
    pub metadata: SourceMetadata,
    #[serde(skip)]
    pub table: DataTable,
}

impl LoadedFile {
    /// Parse a file and, if configured, decode its formula cells.
    pub fn load(path: impl AsRef<Path>, config: &VibeplotConfig) -> Result<Self> {
        let path = path.as_ref();
        let parser = Parser::with_config(config.parser.clone());
        let (mut table, mut metadata) = parser.parse_file(path)?;

        if config.decode_formulas {
            metadata.decoded_cells = table.decode_formulas();
        }

        debug!(
            file = %metadata.file,
            rows = metadata.row_count,
            columns = metadata.column_count,
            decoded = metadata.decoded_cells,
            encoding = %metadata.encoding,
            "loaded file"
        );

        Ok(Self { metadata, table })
    }

    /// Wrap an already-parsed table, e.g. one built in memory.
    pub fn from_table(name: impl Into<String>, table: DataTable) -> Self {
        let name = name.into();
        let mut metadata = SourceMetadata::new(
            name.clone().into(),
            String::new(),
            0,
            "memory".to_string(),
            "utf-8".to_string(),
            table.row_count(),
            table.column_count(),
        );
        metadata.file = name;
        Self { metadata, table }
    }

    /// The key this file is known by.
    pub fn name(&self) -> &str {
        &self.metadata.file
    }

    /// Parse one of this file's columns as numbers.
    pub fn numeric_column(&self, column: &str) -> Result<Vec<f64>> {
        self.require_column(column)?;
        self.table.numeric_column(column)
    }

    /// Raw (decoded) text of one of this file's columns.
    pub fn text_column(&self, column: &str) -> Result<Vec<&str>> {
        self.require_column(column)?;
        Ok(self.table.column_by_name(column).unwrap_or_default())
    }

    fn require_column(&self, column: &str) -> Result<()> {
        if self.table.has_column(column) {
            Ok(())
        } else {
            Err(VibeplotError::ColumnNotFound {
                file: self.name().to_string(),
                column: column.to_string(),
            })
        }
    }
}

/// A set of loaded files keyed by file name, in load order.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    files: IndexMap<String, LoadedFile>,
}

impl Workbook {
    /// Create an empty workbook.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load files in parallel on a fixed-size worker pool.
    ///
    /// Each file is parsed and decoded independently. The first failure
    /// aborts the load.
    pub fn load<P>(paths: &[P], config: &VibeplotConfig) -> Result<Self>
    where
        P: AsRef<Path> + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers.max(1))
            .build()
            .map_err(|e| VibeplotError::Config(format!("Failed to start worker pool: {}", e)))?;

        let loaded: Vec<LoadedFile> = pool.install(|| {
            paths
                .par_iter()
                .map(|path| LoadedFile::load(path, config))
                .collect::<Result<Vec<_>>>()
        })?;

        let mut workbook = Self::new();
        for file in loaded {
            workbook.insert(file);
        }

        info!(
            files = workbook.len(),
            common_columns = workbook.common_columns().len(),
            "workbook loaded"
        );

        Ok(workbook)
    }

    /// Add a file. A file with the same name replaces the earlier one.
    pub fn insert(&mut self, file: LoadedFile) {
        let name = file.name().to_string();
        if self.files.contains_key(&name) {
            warn!(file = %name, "duplicate file name, replacing earlier file");
        }
        self.files.insert(name, file);
    }

    /// Look up a file by name.
    pub fn get(&self, name: &str) -> Option<&LoadedFile> {
        self.files.get(name)
    }

    /// Iterate over files in load order.
    pub fn files(&self) -> impl Iterator<Item = &LoadedFile> {
        self.files.values()
    }

    /// File names in load order.
    pub fn file_names(&self) -> Vec<&str> {
        self.files.keys().map(|k| k.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Columns present in every file, sorted by name.
    ///
    /// These are the columns eligible as a shared X axis.
    pub fn common_columns(&self) -> Vec<String> {
        let mut files = self.files.values();
        let Some(first) = files.next() else {
            return Vec::new();
        };

        let mut common: BTreeSet<&str> = first.table.headers.iter().map(|h| h.as_str()).collect();
        for file in files {
            common.retain(|column| file.table.has_column(column));
        }

        common.into_iter().map(String::from).collect()
    }
}
