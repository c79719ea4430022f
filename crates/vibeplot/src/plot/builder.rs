//! Builds a Plotly figure from a workbook and a plot configuration.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::config::{PlotConfig, SeriesConfig};
use super::figure::{AxisValue, Figure, Layout, Trace};
use crate::error::{Result, VibeplotError};
use crate::workbook::{LoadedFile, Workbook};

/// A series that could not be drawn against one X column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesError {
    pub file: String,
    pub column: String,
    /// `None` when there was no X column to plot against at all.
    pub x_column: Option<String>,
    pub message: String,
}

/// The figure plus every per-series failure met while building it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotOutcome {
    pub figure: Figure,
    pub errors: Vec<SeriesError>,
}

impl PlotOutcome {
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Turns plot configurations into figures.
///
/// One trace is produced per (series, X column) pair. A failing pair is
/// recorded in [`PlotOutcome::errors`] and the rest of the figure is still
/// built.
#[derive(Debug, Clone, Copy, Default)]
pub struct FigureBuilder;

impl FigureBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, workbook: &Workbook, config: &PlotConfig) -> PlotOutcome {
        let layout = Layout::new(
            config.title.clone(),
            config.x_axis_title.clone(),
            config.y_axis_title.clone(),
            config.height,
        );
        let mut figure = Figure::new(layout);
        let mut errors = Vec::new();

        let x_columns = config.resolve_x_columns(workbook);

        for series in &config.series {
            if x_columns.is_empty() {
                errors.push(series_error(
                    series,
                    None,
                    "No column is shared by every file to use as the X axis".to_string(),
                ));
                continue;
            }

            let Some(file) = workbook.get(&series.file) else {
                let message = format!("File '{}' is not loaded", series.file);
                for x_column in &x_columns {
                    errors.push(series_error(series, Some(x_column), message.clone()));
                }
                continue;
            };

            let y = series_values(file, series);

            for x_column in &x_columns {
                let trace = y
                    .as_ref()
                    .map_err(|e| e.to_string())
                    .and_then(|y| build_trace(file, series, x_column, y).map_err(|e| e.to_string()));

                match trace {
                    Ok(trace) => figure.add_trace(trace),
                    Err(message) => errors.push(series_error(series, Some(x_column), message)),
                }
            }
        }

        for error in &errors {
            warn!(
                file = %error.file,
                column = %error.column,
                x_column = error.x_column.as_deref().unwrap_or("-"),
                "series skipped: {}",
                error.message
            );
        }
        debug!(
            traces = figure.data.len(),
            errors = errors.len(),
            "figure built"
        );

        PlotOutcome { figure, errors }
    }
}

/// Parse and transform a series' Y column.
fn series_values(file: &LoadedFile, series: &SeriesConfig) -> Result<Vec<f64>> {
    let raw = file.numeric_column(&series.column)?;
    series.transform.apply(&raw)
}

fn build_trace(
    file: &LoadedFile,
    series: &SeriesConfig,
    x_column: &str,
    y: &[f64],
) -> Result<Trace> {
    let x: Vec<AxisValue> = file
        .text_column(x_column)?
        .into_iter()
        .map(AxisValue::from_cell)
        .collect();

    if x.len() != y.len() {
        return Err(VibeplotError::EmptyData(format!(
            "X column '{}' has {} values but '{}' has {}",
            x_column,
            x.len(),
            series.column,
            y.len()
        )));
    }

    let name = format!("{} (X: {})", series.display_name(), x_column);
    Ok(Trace::scattergl(name, x, y)
        .with_color(series.color.clone())
        .with_markers(series.scatter))
}

fn series_error(series: &SeriesConfig, x_column: Option<&String>, message: String) -> SeriesError {
    SeriesError {
        file: series.file.clone(),
        column: series.column.clone(),
        x_column: x_column.cloned(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DataTable;
    use crate::transform::{SeriesTransform, Transform};

    fn headers(names: [&str; 3]) -> Vec<String> {
        names.iter().map(|c| c.to_string()).collect()
    }

    fn rows(data: &[[&str; 3]]) -> Vec<Vec<String>> {
        data.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect()
    }

    fn workbook() -> Workbook {
        let mut workbook = Workbook::new();
        workbook.insert(LoadedFile::from_table(
            "a.csv",
            DataTable::new(
                headers(["time", "throttle", "label"]),
                rows(&[["0", "-100", "idle"], ["1", "0", "cruise"], ["2", "100", "full"]]),
                b',',
            ),
        ));
        workbook.insert(LoadedFile::from_table(
            "b.csv",
            DataTable::new(
                headers(["time", "elevon", "seq"]),
                rows(&[["0", "0", "1"], ["1", "100", "2"], ["2", "-100", "3"]]),
                b',',
            ),
        ));
        workbook
    }

    #[test]
    fn test_one_trace_per_series_and_x_column() {
        let config = PlotConfig::new()
            .with_x_column("time")
            .with_series(SeriesConfig::new("a.csv", "throttle"))
            .with_series(SeriesConfig::new("b.csv", "elevon"));

        let outcome = FigureBuilder::new().build(&workbook(), &config);

        assert!(outcome.is_complete(), "{:?}", outcome.errors);
        assert_eq!(outcome.figure.data.len(), 2);
        assert_eq!(outcome.figure.data[0].name, "a.csv:throttle (X: time)");
        assert_eq!(outcome.figure.data[1].name, "b.csv:elevon (X: time)");
    }

    #[test]
    fn test_default_x_is_first_common_column() {
        let config = PlotConfig::new().with_series(SeriesConfig::new("a.csv", "throttle"));
        let outcome = FigureBuilder::new().build(&workbook(), &config);

        assert_eq!(outcome.figure.data[0].name, "a.csv:throttle (X: time)");
    }

    #[test]
    fn test_transform_is_applied() {
        let config = PlotConfig::new().with_series(
            SeriesConfig::new("a.csv", "throttle").with_transform(Transform::ScaleThrottle),
        );
        let outcome = FigureBuilder::new().build(&workbook(), &config);

        assert_eq!(
            outcome.figure.data[0].y,
            vec![Some(2000.0), Some(1500.0), Some(1000.0)]
        );
    }

    #[test]
    fn test_failures_are_collected_per_series() {
        let config = PlotConfig::new()
            .with_x_column("time")
            .with_x_column("seq")
            .with_series(SeriesConfig::new("a.csv", "label"))
            .with_series(SeriesConfig::new("b.csv", "elevon").with_transform(Transform::LeftElevon))
            .with_series(
                SeriesConfig::new("b.csv", "elevon")
                    .with_transform(SeriesTransform::expression("__import__('os')")),
            )
            .with_series(SeriesConfig::new("missing.csv", "x"));

        let outcome = FigureBuilder::new().build(&workbook(), &config);

        // elevon against time and seq are the only good traces
        assert_eq!(outcome.figure.data.len(), 2);

        let failures: Vec<_> = outcome
            .errors
            .iter()
            .map(|e| (e.file.as_str(), e.column.as_str(), e.x_column.as_deref()))
            .collect();
        assert!(failures.contains(&("a.csv", "label", Some("time"))));
        assert!(failures.contains(&("a.csv", "label", Some("seq"))));
        assert!(failures.contains(&("b.csv", "elevon", Some("time"))));
        assert!(failures.contains(&("missing.csv", "x", Some("seq"))));
        assert_eq!(outcome.errors.len(), 6);
        assert!(outcome.errors[0].message.contains("Non-numeric"));
    }

    #[test]
    fn test_no_common_columns() {
        let mut workbook = Workbook::new();
        workbook.insert(LoadedFile::from_table(
            "a.csv",
            DataTable::new(vec!["a".to_string()], vec![vec!["1".to_string()]], b','),
        ));
        workbook.insert(LoadedFile::from_table(
            "b.csv",
            DataTable::new(vec!["b".to_string()], vec![vec!["1".to_string()]], b','),
        ));

        let config = PlotConfig::new().with_series(SeriesConfig::new("a.csv", "a"));
        let outcome = FigureBuilder::new().build(&workbook, &config);

        assert!(outcome.figure.data.is_empty());
        assert_eq!(outcome.errors.len(), 1);
        assert_eq!(outcome.errors[0].x_column, None);
    }

    #[test]
    fn test_styling_carries_through() {
        let config = PlotConfig::new().with_series(
            SeriesConfig::new("b.csv", "elevon")
                .with_display_name("Left elevon")
                .with_color("#00AA00")
                .with_scatter(false),
        );
        let outcome = FigureBuilder::new().build(&workbook(), &config);
        let trace = &outcome.figure.data[0];

        assert_eq!(trace.name, "Left elevon (X: time)");
        assert_eq!(trace.line.color, "#00AA00");
        assert_eq!(trace.mode, "lines");
        assert!(trace.marker.is_none());
    }
}
