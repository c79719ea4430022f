//! Plotly figure model, serialized as Plotly's JSON schema.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::series::is_missing;

pub const HOVER_TEMPLATE: &str = "<b>X:</b> %{x:.6f}<br><b>Y:</b> %{y:.6f}<extra></extra>";
pub const MARKER_SIZE: u32 = 6;

/// A complete figure: traces plus layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub data: Vec<Trace>,
    pub layout: Layout,
}

impl Figure {
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    pub fn add_trace(&mut self, trace: Trace) {
        self.data.push(trace);
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// An X value: numeric when the cell parses as a number, text otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AxisValue {
    Number(f64),
    Text(String),
    Missing,
}

impl AxisValue {
    pub fn from_cell(cell: &str) -> Self {
        if is_missing(cell) {
            return AxisValue::Missing;
        }
        match cell.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => AxisValue::Number(v),
            _ => AxisValue::Text(cell.to_string()),
        }
    }
}

/// A WebGL scatter trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "type")]
    pub kind: String,
    pub mode: String,
    pub name: String,
    pub x: Vec<AxisValue>,
    /// Non-finite values are stored as `None` and serialize as `null`,
    /// which Plotly draws as a gap.
    pub y: Vec<Option<f64>>,
    pub line: Line,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    pub hovertemplate: String,
}

impl Trace {
    pub fn scattergl(name: impl Into<String>, x: Vec<AxisValue>, y: &[f64]) -> Self {
        Self {
            kind: "scattergl".to_string(),
            mode: "lines".to_string(),
            name: name.into(),
            x,
            y: y.iter().map(|v| v.is_finite().then_some(*v)).collect(),
            line: Line::default(),
            marker: None,
            hovertemplate: HOVER_TEMPLATE.to_string(),
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.line.color = color.into();
        self
    }

    /// Show markers (`lines+markers`) or lines only.
    pub fn with_markers(mut self, markers: bool) -> Self {
        if markers {
            self.mode = "lines+markers".to_string();
            self.marker = Some(Marker { size: MARKER_SIZE });
        } else {
            self.mode = "lines".to_string();
            self.marker = None;
        }
        self
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub color: String,
}

impl Default for Line {
    fn default() -> Self {
        Self {
            color: super::config::DEFAULT_COLOR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub size: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Title {
    pub text: String,
}

impl Title {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: Title,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub orientation: String,
    pub yanchor: String,
    pub y: f64,
    pub xanchor: String,
    pub x: f64,
}

impl Default for Legend {
    /// Horizontal legend centred below the plot area.
    fn default() -> Self {
        Self {
            orientation: "h".to_string(),
            yanchor: "bottom".to_string(),
            y: -0.3,
            xanchor: "center".to_string(),
            x: 0.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub title: Title,
    pub xaxis: Axis,
    pub yaxis: Axis,
    pub height: u32,
    pub legend: Legend,
}

impl Layout {
    pub fn new(
        title: impl Into<String>,
        x_title: impl Into<String>,
        y_title: impl Into<String>,
        height: u32,
    ) -> Self {
        Self {
            title: Title::new(title),
            xaxis: Axis {
                title: Title::new(x_title),
            },
            yaxis: Axis {
                title: Title::new(y_title),
            },
            height,
            legend: Legend::default(),
        }
    }
}
