//! Figure building: plot configuration, the Plotly figure model, and export.

mod builder;
mod config;
mod figure;
mod html;

pub use builder::{FigureBuilder, PlotOutcome, SeriesError};
pub use config::{DEFAULT_COLOR, DEFAULT_HEIGHT, DEFAULT_TITLE, PlotConfig, SeriesConfig};
pub use figure::{
    AxisValue, Axis, Figure, HOVER_TEMPLATE, Layout, Legend, Line, MARKER_SIZE, Marker, Title,
    Trace,
};
pub use html::{PLOTLY_CDN, render_html};
