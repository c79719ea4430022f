//! Numeric series parsing and summary statistics.

use serde::{Deserialize, Serialize};

use crate::error::{Result, VibeplotError};
use crate::input::DataTable;

/// Cell spellings read as a missing value (NaN) rather than an error.
const MISSING_MARKERS: &[&str] = &[
    "", "NA", "N/A", "n/a", "NaN", "nan", "-nan", "null", "NULL", "None", "#N/A",
];

/// Whether a cell is a missing-value marker.
pub fn is_missing(value: &str) -> bool {
    MISSING_MARKERS.contains(&value.trim())
}

/// Parse a sequence of cells into a numeric series of the same length.
pub fn parse_numeric<'a>(
    column: &str,
    values: impl IntoIterator<Item = &'a str>,
) -> Result<Vec<f64>> {
    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            if is_missing(value) {
                return Ok(f64::NAN);
            }
            value
                .trim()
                .parse::<f64>()
                .map_err(|_| VibeplotError::NonNumeric {
                    column: column.to_string(),
                    row,
                    value: value.to_string(),
                })
        })
        .collect()
}

// =============================================================================
// SUMMARY STATISTICS
// =============================================================================

/// Per-column summary, in the shape of a dataframe `describe()` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSummary {
    pub column: String,
    /// Non-missing values.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n - 1).
    pub std: f64,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

/// Welford accumulator for mean and variance in one pass.
#[derive(Debug, Default)]
struct StreamingStats {
    count: usize,
    mean: f64,
    m2: f64,
}

impl StreamingStats {
    fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn sample_std(&self) -> f64 {
        if self.count < 2 {
            f64::NAN
        } else {
            (self.m2 / (self.count - 1) as f64).sqrt()
        }
    }
}

/// Linear-interpolated quantile of an ascending, NaN-free slice.
fn quantile(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let weight = pos - lower as f64;
    sorted[lower] + (sorted[upper] - sorted[lower]) * weight
}

impl ColumnSummary {
    /// Summarize a series, skipping NaN. Returns `None` if nothing is left.
    pub fn from_values(column: &str, values: &[f64]) -> Option<Self> {
        let mut stats = StreamingStats::default();
        let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if sorted.is_empty() {
            return None;
        }

        for &v in &sorted {
            stats.add(v);
        }
        sorted.sort_by(f64::total_cmp);

        Some(Self {
            column: column.to_string(),
            count: stats.count,
            mean: stats.mean,
            std: stats.sample_std(),
            min: sorted[0],
            q1: quantile(&sorted, 0.25),
            median: quantile(&sorted, 0.5),
            q3: quantile(&sorted, 0.75),
            max: sorted[sorted.len() - 1],
        })
    }
}

impl DataTable {
    /// Summaries for every column that parses as numeric.
    ///
    /// Text columns (including decoded timestamp strings) are skipped.
    pub fn describe(&self) -> Vec<ColumnSummary> {
        self.headers
            .iter()
            .filter_map(|name| {
                let values = self.numeric_column(name).ok()?;
                ColumnSummary::from_values(name, &values)
            })
            .collect()
    }
}
