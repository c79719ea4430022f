//! Piecewise-linear actuator calibration curves.

use serde::{Deserialize, Serialize};

/// One linear piece of a calibration curve, valid on `[lower, upper]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseSegment {
    pub lower: f64,
    pub upper: f64,
    pub slope: f64,
    pub intercept: f64,
}

impl PiecewiseSegment {
    pub const fn new(lower: f64, upper: f64, slope: f64, intercept: f64) -> Self {
        Self {
            lower,
            upper,
            slope,
            intercept,
        }
    }

    /// Inclusive on both ends.
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }

    pub fn evaluate(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    /// Output values at the two ends of the segment, low to high.
    pub fn output_range(&self) -> (f64, f64) {
        let a = self.evaluate(self.lower);
        let b = self.evaluate(self.upper);
        (a.min(b), a.max(b))
    }
}

/// Deflection limit of the left elevon, in radians.
pub const ELEVON_LIMIT_RAD: f64 = 0.349066;

/// Deflection reached at full stick, in radians.
pub const ELEVON_STICK_RAD: f64 = 0.174533;

/// Left elevon servo calibration: deflection (rad) to pulse width (µs).
pub const LEFT_ELEVON_SEGMENTS: [PiecewiseSegment; 8] = [
    PiecewiseSegment::new(-0.349066, -0.261799, -756.304290, 1512.0),
    PiecewiseSegment::new(-0.261799, -0.174533, -779.222601, 1506.0),
    PiecewiseSegment::new(-0.174533, -0.087266, -687.549354, 1522.0),
    PiecewiseSegment::new(-0.087266, 0.0, -939.650784, 1500.0),
    PiecewiseSegment::new(0.0, 0.087266, -870.895841, 1498.0),
    PiecewiseSegment::new(0.087266, 0.174533, -825.059225, 1496.0),
    PiecewiseSegment::new(0.174533, 0.261799, -1008.405719, 1528.0),
    PiecewiseSegment::new(0.261799, 0.349066, -905.273316, 1501.0),
];

/// A curve made of contiguous segments.
///
/// Where two segments share a boundary point, the later segment in table
/// order is used.
#[derive(Debug, Clone, Copy)]
pub struct PiecewiseCurve<'a> {
    segments: &'a [PiecewiseSegment],
}

impl<'a> PiecewiseCurve<'a> {
    pub const fn new(segments: &'a [PiecewiseSegment]) -> Self {
        Self { segments }
    }

    /// The segment used for `x`, if any.
    pub fn segment_for(&self, x: f64) -> Option<&'a PiecewiseSegment> {
        self.segments.iter().rev().find(|s| s.contains(x))
    }

    /// Evaluate at `x`; NaN when no segment covers it.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.segment_for(x).map_or(f64::NAN, |s| s.evaluate(x))
    }

    /// Domain covered by the curve, from the first and last segments.
    pub fn domain(&self) -> Option<(f64, f64)> {
        Some((self.segments.first()?.lower, self.segments.last()?.upper))
    }

    /// Whether each segment starts exactly where the previous one ends.
    pub fn is_contiguous(&self) -> bool {
        self.segments
            .windows(2)
            .all(|pair| pair[0].upper == pair[1].lower && pair[0].lower < pair[0].upper)
    }
}

/// The left elevon calibration curve.
pub const LEFT_ELEVON: PiecewiseCurve<'static> = PiecewiseCurve::new(&LEFT_ELEVON_SEGMENTS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_left_elevon_segments_are_contiguous() {
        assert!(LEFT_ELEVON.is_contiguous());
        assert_eq!(
            LEFT_ELEVON.domain(),
            Some((-ELEVON_LIMIT_RAD, ELEVON_LIMIT_RAD))
        );
    }

    #[test]
    fn test_shared_boundary_uses_later_segment() {
        for pair in LEFT_ELEVON_SEGMENTS.windows(2) {
            let boundary = pair[0].upper;
            let chosen = LEFT_ELEVON.segment_for(boundary).unwrap();
            assert_eq!(*chosen, pair[1], "boundary {}", boundary);
            assert_eq!(LEFT_ELEVON.evaluate(boundary), pair[1].evaluate(boundary));
        }
    }

    #[test]
    fn test_outer_edges_use_only_segment() {
        assert_eq!(
            LEFT_ELEVON.segment_for(-ELEVON_LIMIT_RAD),
            Some(&LEFT_ELEVON_SEGMENTS[0])
        );
        assert_eq!(
            LEFT_ELEVON.segment_for(ELEVON_LIMIT_RAD),
            Some(&LEFT_ELEVON_SEGMENTS[7])
        );
    }

    #[test]
    fn test_outside_domain_is_nan() {
        assert!(LEFT_ELEVON.evaluate(0.5).is_nan());
        assert!(LEFT_ELEVON.evaluate(f64::NAN).is_nan());
    }

    #[test]
    fn test_zero_deflection() {
        // 0.0 is shared by segments 3 and 4; segment 4 gives 1498.
        assert_eq!(LEFT_ELEVON.evaluate(0.0), 1498.0);
    }
}
