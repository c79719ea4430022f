//! Signal transforms: the preset catalog, calibration curves, and sandboxed
//! custom expressions.

mod calibration;
mod catalog;
mod expression;
mod selection;

pub use calibration::{
    ELEVON_LIMIT_RAD, ELEVON_STICK_RAD, LEFT_ELEVON, LEFT_ELEVON_SEGMENTS, PiecewiseCurve,
    PiecewiseSegment,
};
pub use catalog::{
    CatalogEntry, Transform, left_elevon, log_plus_one, normalize, scale, scale_throttle,
};
pub use expression::{Expression, ExpressionError, Function, MAX_DEPTH, MAX_EXPRESSION_LEN};
pub use selection::SeriesTransform;
