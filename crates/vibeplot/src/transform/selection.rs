//! Per-series choice between a preset and a custom expression.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::catalog::Transform;
use super::expression::Expression;
use crate::error::Result;

/// How one Y series is transformed before plotting.
///
/// Deserializes from either a preset (`{"preset": "sqrt"}`) or a custom
/// expression (`{"expression": "x * 0.01"}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SeriesTransform {
    Preset(Transform),
    Expression { expression: String },
}

impl SeriesTransform {
    /// A custom expression selection; parsed when applied.
    pub fn expression(text: impl Into<String>) -> Self {
        SeriesTransform::Expression {
            expression: text.into(),
        }
    }

    /// Apply to a series, parsing the expression first if there is one.
    pub fn apply(&self, series: &[f64]) -> Result<Vec<f64>> {
        match self {
            SeriesTransform::Preset(transform) => transform.apply(series),
            SeriesTransform::Expression { expression } => {
                Ok(Expression::parse(expression)?.apply(series)?)
            }
        }
    }
}

impl Default for SeriesTransform {
    fn default() -> Self {
        SeriesTransform::Preset(Transform::Identity)
    }
}

impl From<Transform> for SeriesTransform {
    fn from(transform: Transform) -> Self {
        SeriesTransform::Preset(transform)
    }
}

impl fmt::Display for SeriesTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeriesTransform::Preset(transform) => write!(f, "{}", transform),
            SeriesTransform::Expression { expression } => write!(f, "expr({})", expression),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VibeplotError;

    #[test]
    fn test_deserialize_both_shapes() {
        let preset: SeriesTransform = serde_json::from_str(r#"{"preset": "left_elevon"}"#).unwrap();
        assert_eq!(preset, SeriesTransform::Preset(Transform::LeftElevon));

        let custom: SeriesTransform = serde_json::from_str(r#"{"expression": "x / 10"}"#).unwrap();
        assert_eq!(custom.apply(&[20.0]).unwrap(), vec![2.0]);
    }

    #[test]
    fn test_bad_expression_surfaces_as_error() {
        let custom = SeriesTransform::expression("open('x')");
        assert!(matches!(
            custom.apply(&[1.0]),
            Err(VibeplotError::Expression(_))
        ));
    }

    #[test]
    fn test_default_is_identity() {
        assert_eq!(SeriesTransform::default().apply(&[1.5]).unwrap(), vec![1.5]);
    }
}
