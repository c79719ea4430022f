//! Plot configuration: which series to draw and how.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VibeplotError};
use crate::transform::SeriesTransform;
use crate::workbook::Workbook;

pub const DEFAULT_TITLE: &str = "CSV data";
pub const DEFAULT_COLOR: &str = "#0000FF";
pub const DEFAULT_HEIGHT: u32 = 700;

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

fn default_x_axis_title() -> String {
    "Selected X axis".to_string()
}

fn default_y_axis_title() -> String {
    "Displayed value".to_string()
}

fn default_height() -> u32 {
    DEFAULT_HEIGHT
}

fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_scatter() -> bool {
    true
}

/// A full plot request.
///
/// Every field has a default, so `{}` is a valid (empty) configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotConfig {
    #[serde(default = "default_title")]
    pub title: String,

    /// X columns to plot against. Empty means the first common column.
    #[serde(default)]
    pub x_columns: Vec<String>,

    #[serde(default)]
    pub series: Vec<SeriesConfig>,

    #[serde(default = "default_height")]
    pub height: u32,

    #[serde(default = "default_x_axis_title")]
    pub x_axis_title: String,

    #[serde(default = "default_y_axis_title")]
    pub y_axis_title: String,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            x_columns: Vec::new(),
            series: Vec::new(),
            height: default_height(),
            x_axis_title: default_x_axis_title(),
            y_axis_title: default_y_axis_title(),
        }
    }
}

impl PlotConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style helper to add a series.
    pub fn with_series(mut self, series: SeriesConfig) -> Self {
        self.series.push(series);
        self
    }

    /// Builder-style helper to add an X column.
    pub fn with_x_column(mut self, column: impl Into<String>) -> Self {
        self.x_columns.push(column.into());
        self
    }

    /// X columns to use against `workbook`.
    ///
    /// Falls back to the first common column when none are configured, and
    /// to nothing when the files share no columns.
    pub fn resolve_x_columns(&self, workbook: &Workbook) -> Vec<String> {
        if !self.x_columns.is_empty() {
            return self.x_columns.clone();
        }
        workbook.common_columns().into_iter().take(1).collect()
    }

    /// Load a plot configuration from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let file = File::open(path).map_err(|e| VibeplotError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let reader = BufReader::new(file);
        let config: PlotConfig = serde_json::from_reader(reader).map_err(|e| {
            VibeplotError::Config(format!(
                "Failed to parse plot config '{}': {}",
                path.display(),
                e
            ))
        })?;

        Ok(config)
    }
}

/// One Y series: a column of one file, with its transform and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub file: String,
    pub column: String,

    #[serde(default)]
    pub transform: SeriesTransform,

    /// Legend name. Defaults to `file:column`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default = "default_color")]
    pub color: String,

    /// Draw markers as well as lines.
    #[serde(default = "default_scatter")]
    pub scatter: bool,
}

impl SeriesConfig {
    pub fn new(file: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            column: column.into(),
            transform: SeriesTransform::default(),
            display_name: None,
            color: default_color(),
            scatter: default_scatter(),
        }
    }

    pub fn with_transform(mut self, transform: impl Into<SeriesTransform>) -> Self {
        self.transform = transform.into();
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_scatter(mut self, scatter: bool) -> Self {
        self.scatter = scatter;
        self
    }

    /// The name shown in the legend, before the X column suffix.
    pub fn display_name(&self) -> String {
        match &self.display_name {
            Some(name) => name.clone(),
            None => format!("{}:{}", self.file, self.column),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: PlotConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, PlotConfig::default());
        assert_eq!(config.title, "CSV data");
        assert_eq!(config.height, 700);
    }

    #[test]
    fn test_series_defaults() {
        let config: PlotConfig = serde_json::from_str(
            r#"{"series": [{"file": "a.csv", "column": "roll"}]}"#,
        )
        .unwrap();

        let series = &config.series[0];
        assert_eq!(series.color, "#0000FF");
        assert!(series.scatter);
        assert_eq!(series.transform, SeriesTransform::default());
        assert_eq!(series.display_name(), "a.csv:roll");
    }

    #[test]
    fn test_series_transform_shapes() {
        let config: PlotConfig = serde_json::from_str(
            r#"{"series": [
                {"file": "a.csv", "column": "ch1", "transform": {"preset": "scale_throttle"}},
                {"file": "a.csv", "column": "ch2", "transform": {"preset": "scale", "in_min": 0, "in_max": 10, "out_min": 0, "out_max": 1}},
                {"file": "a.csv", "column": "ch3", "transform": {"expression": "np.log(x + 1)"}}
            ]}"#,
        )
        .unwrap();

        assert_eq!(
            config.series[0].transform,
            SeriesTransform::Preset(Transform::ScaleThrottle)
        );
        assert_eq!(
            config.series[1].transform,
            SeriesTransform::Preset(Transform::Scale {
                in_min: 0.0,
                in_max: 10.0,
                out_min: 0.0,
                out_max: 1.0,
            })
        );
        assert_eq!(
            config.series[2].transform,
            SeriesTransform::expression("np.log(x + 1)")
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(
            &path,
            r##"{"x_columns": ["time"], "series": [{"file": "a.csv", "column": "roll", "color": "#FF0000"}]}"##,
        )
        .unwrap();

        let expected = PlotConfig::new()
            .with_x_column("time")
            .with_series(SeriesConfig::new("a.csv", "roll").with_color("#FF0000"));
        assert_eq!(PlotConfig::load(&path).unwrap(), expected);
    }

    #[test]
    fn test_load_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.json");
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            PlotConfig::load(&path),
            Err(VibeplotError::Config(_))
        ));
    }
}
