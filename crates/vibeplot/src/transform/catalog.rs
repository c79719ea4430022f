//! The fixed catalog of preset series transforms.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::calibration::{ELEVON_LIMIT_RAD, ELEVON_STICK_RAD, LEFT_ELEVON};
use crate::error::{Result, VibeplotError};

// =============================================================================
// ELEMENT FUNCTIONS
// =============================================================================

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// Inverted ranges are allowed. An empty input range is a domain error.
pub fn scale(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> Result<f64> {
    check_input_range(in_min, in_max)?;
    Ok(linear_map(value, in_min, in_max, out_min, out_max))
}

fn check_input_range(in_min: f64, in_max: f64) -> Result<()> {
    if in_max == in_min {
        return Err(VibeplotError::Domain(
            "Input range cannot be zero (in_min == in_max)".to_string(),
        ));
    }
    Ok(())
}

fn linear_map(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
    (value - in_min) / (in_max - in_min) * (out_max - out_min) + out_min
}

/// `ln(x + 1)`; NaN below -1.
pub fn log_plus_one(x: f64) -> f64 {
    (x + 1.0).ln()
}

/// Throttle stick percentage (-100..100) to a reversed 1000..2000 range.
pub fn scale_throttle(x: f64) -> f64 {
    (1000.0 - (((x + 100.0) / 200.0) * 1000.0)) + 1000.0
}

/// Left elevon stick input (-100..100, inverted) to servo pulse width.
pub fn left_elevon(x: f64) -> f64 {
    let rad = linear_map(x, 100.0, -100.0, -ELEVON_STICK_RAD, ELEVON_STICK_RAD);
    let rad = rad.clamp(-ELEVON_LIMIT_RAD, ELEVON_LIMIT_RAD);
    LEFT_ELEVON.evaluate(rad)
}

/// Min-max normalization over the whole series.
///
/// NaN entries are ignored when finding the extremes. A series whose values
/// are all equal normalizes to NaN.
pub fn normalize(series: &[f64]) -> Vec<f64> {
    let (min, max) = series
        .iter()
        .filter(|v| !v.is_nan())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return vec![f64::NAN; series.len()];
    }

    let range = max - min;
    series.iter().map(|&v| (v - min) / range).collect()
}

// =============================================================================
// TRANSFORM CATALOG
// =============================================================================

/// A preset transform.
///
/// Serialized with a `preset` tag, e.g. `{"preset": "sqrt"}` or
/// `{"preset": "scale", "in_min": 0, "in_max": 1, "out_min": 0, "out_max": 100}`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "preset", rename_all = "snake_case")]
pub enum Transform {
    #[default]
    #[serde(alias = "none")]
    Identity,
    LogPlusOne,
    Square,
    Sqrt,
    Normalize,
    ScaleThrottle,
    Scale {
        in_min: f64,
        in_max: f64,
        out_min: f64,
        out_max: f64,
    },
    LeftElevon,
}

/// A catalog listing entry.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    pub name: &'static str,
    pub label: &'static str,
    pub parameters: &'static [&'static str],
}

const SCALE_PARAMETERS: &[&str] = &["in_min", "in_max", "out_min", "out_max"];

impl Transform {
    /// All presets, with `Scale` shown at its unit-range defaults.
    pub fn catalog() -> [Transform; 8] {
        [
            Transform::Identity,
            Transform::LogPlusOne,
            Transform::Square,
            Transform::Sqrt,
            Transform::Normalize,
            Transform::ScaleThrottle,
            Transform::Scale {
                in_min: 0.0,
                in_max: 1.0,
                out_min: 0.0,
                out_max: 1.0,
            },
            Transform::LeftElevon,
        ]
    }

    /// Listing entries for every preset.
    pub fn entries() -> Vec<CatalogEntry> {
        Self::catalog().iter().map(Transform::entry).collect()
    }

    /// Short machine name, as accepted by `FromStr`.
    pub fn name(&self) -> &'static str {
        match self {
            Transform::Identity => "identity",
            Transform::LogPlusOne => "log_plus_one",
            Transform::Square => "square",
            Transform::Sqrt => "sqrt",
            Transform::Normalize => "normalize",
            Transform::ScaleThrottle => "scale_throttle",
            Transform::Scale { .. } => "scale",
            Transform::LeftElevon => "left_elevon",
        }
    }

    /// Human-readable label with the formula.
    pub fn label(&self) -> &'static str {
        match self {
            Transform::Identity => "None",
            Transform::LogPlusOne => "Logarithm (log(x+1))",
            Transform::Square => "Square (x^2)",
            Transform::Sqrt => "Square root (sqrt(x))",
            Transform::Normalize => "Normalize ((x - min) / (max - min))",
            Transform::ScaleThrottle => "Scale Throttle(x)",
            Transform::Scale { .. } => {
                "scale((x - in_min) / (in_max - in_min) * (out_max - out_min) + out_min)"
            }
            Transform::LeftElevon => "Left Elevon(x)",
        }
    }

    pub fn entry(&self) -> CatalogEntry {
        CatalogEntry {
            name: self.name(),
            label: self.label(),
            parameters: match self {
                Transform::Scale { .. } => SCALE_PARAMETERS,
                _ => &[],
            },
        }
    }

    /// Apply to a series. The output has the same length as the input.
    pub fn apply(&self, series: &[f64]) -> Result<Vec<f64>> {
        let elementwise =
            |f: fn(f64) -> f64| -> Vec<f64> { series.iter().map(|&x| f(x)).collect() };

        Ok(match *self {
            Transform::Identity => series.to_vec(),
            Transform::LogPlusOne => elementwise(log_plus_one),
            Transform::Square => elementwise(|x| x * x),
            Transform::Sqrt => elementwise(f64::sqrt),
            Transform::Normalize => normalize(series),
            Transform::ScaleThrottle => elementwise(scale_throttle),
            Transform::Scale {
                in_min,
                in_max,
                out_min,
                out_max,
            } => {
                check_input_range(in_min, in_max)?;
                series
                    .iter()
                    .map(|&x| linear_map(x, in_min, in_max, out_min, out_max))
                    .collect()
            }
            Transform::LeftElevon => elementwise(left_elevon),
        })
    }
}

impl fmt::Display for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Transform::Scale {
                in_min,
                in_max,
                out_min,
                out_max,
            } => write!(f, "scale({}, {}, {}, {})", in_min, in_max, out_min, out_max),
            other => write!(f, "{}", other.name()),
        }
    }
}

impl FromStr for Transform {
    type Err = VibeplotError;

    /// Parse a preset name. `scale` takes its range in parentheses:
    /// `scale(100, -100, 0, 1)`.
    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();

        if let Some(args) = lowered
            .strip_prefix("scale(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let values: Vec<f64> = args
                .split(',')
                .map(|v| v.trim().parse::<f64>())
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| VibeplotError::UnknownTransform(s.to_string()))?;

            let [in_min, in_max, out_min, out_max] = values[..] else {
                return Err(VibeplotError::UnknownTransform(format!(
                    "{} (scale takes in_min, in_max, out_min, out_max)",
                    s
                )));
            };
            return Ok(Transform::Scale {
                in_min,
                in_max,
                out_min,
                out_max,
            });
        }

        match lowered.replace('-', "_").as_str() {
            "identity" | "none" => Ok(Transform::Identity),
            "log_plus_one" | "log1p" => Ok(Transform::LogPlusOne),
            "square" => Ok(Transform::Square),
            "sqrt" => Ok(Transform::Sqrt),
            "normalize" => Ok(Transform::Normalize),
            "scale_throttle" | "throttle" => Ok(Transform::ScaleThrottle),
            "left_elevon" | "elevon" => Ok(Transform::LeftElevon),
            "scale" => Err(VibeplotError::UnknownTransform(
                "scale needs a range, e.g. scale(100, -100, 0, 1)".to_string(),
            )),
            _ => Err(VibeplotError::UnknownTransform(format!(
                "{}. Use: identity, log_plus_one, square, sqrt, normalize, \
                 scale_throttle, scale(a, b, c, d), or left_elevon.",
                s
            ))),
        }
    }
}
