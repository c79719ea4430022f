//! VibePlot: telemetry CSV plotting support.
//!
//! Flight-controller and logging tools often export CSV files whose cells
//! hold spreadsheet formula text instead of values. VibePlot decodes those
//! cells, loads several files into a [`Workbook`], applies per-series signal
//! transforms, and builds Plotly figures from the result.
//!
//! # Core pieces
//!
//! - **Decoding**: [`decode`] turns the two known formula literals into plain
//!   text and leaves everything else untouched
//! - **Transforms**: a closed catalog of presets ([`Transform`]) plus sandboxed
//!   custom expressions ([`Expression`])
//! - **Figures**: [`FigureBuilder`] turns a [`PlotConfig`] into a Plotly
//!   figure, collecting per-series failures instead of aborting
//!
//! # Example
//!
//! ```no_run
//! use vibeplot::{FigureBuilder, PlotConfig, SeriesConfig, Transform, VibeplotConfig, Workbook};
//!
//! let workbook = Workbook::load(&["flight.csv"], &VibeplotConfig::default()).unwrap();
//! let config = PlotConfig::new()
//!     .with_series(SeriesConfig::new("flight.csv", "ch2").with_transform(Transform::LeftElevon));
//!
//! let outcome = FigureBuilder::new().build(&workbook, &config);
//! println!("Traces: {}", outcome.figure.data.len());
//! ```

pub mod decode;
pub mod error;
pub mod input;
pub mod plot;
pub mod series;
pub mod transform;

mod workbook;

pub use decode::{decode, decode_value, is_formula};
pub use error::{Result, VibeplotError};
pub use input::{DataTable, Parser, ParserConfig, SourceMetadata};
pub use plot::{Figure, FigureBuilder, PlotConfig, PlotOutcome, SeriesConfig, SeriesError, render_html};
pub use series::ColumnSummary;
pub use transform::{CatalogEntry, Expression, ExpressionError, SeriesTransform, Transform};
pub use workbook::{LoadedFile, VibeplotConfig, Workbook};
