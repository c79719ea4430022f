//! Property-based tests for decoding and transforms.
//!
//! ```bash
//! cargo test -p vibeplot --test property_tests
//! PROPTEST_CASES=10000 cargo test -p vibeplot --test property_tests
//! ```

use proptest::prelude::*;
use serde_json::Value;

use vibeplot::transform::{
    LEFT_ELEVON_SEGMENTS, Transform, left_elevon, normalize, scale,
};
use vibeplot::{Expression, decode, decode_value};

// =============================================================================
// Test Strategies
// =============================================================================

/// Cells that are not formulas.
fn plain_cell() -> impl Strategy<Value = String> {
    "([^=].{0,60})?"
}

/// Cells that look like formulas but may be malformed.
fn formula_like() -> impl Strategy<Value = String> {
    prop_oneof![
        "=TEXT\\([0-9]{0,12}/86400 ?\\+ ?25569, ?\"[ydmhs:. -]{0,12}\"\\)&\"\\.\"&[0-9]{0,4}",
        "=[0-9]{0,20}&\"\\.\"&TEXT\\([0-9]{0,20},\"0{0,8}\"\\)",
        "=.{0,40}",
    ]
}

fn finite_series() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-1e6f64..1e6, 0..64)
}

fn preset() -> impl Strategy<Value = Transform> {
    prop::sample::select(Transform::catalog().to_vec())
}

// =============================================================================
// Decoding
// =============================================================================

proptest! {
    #[test]
    fn decode_passes_non_formulas_through(cell in plain_cell()) {
        prop_assert_eq!(decode(&cell), cell.as_str());
    }

    #[test]
    fn decode_never_panics(cell in formula_like()) {
        let _ = decode(&cell);
    }

    #[test]
    fn decode_is_deterministic(cell in formula_like()) {
        prop_assert_eq!(decode(&cell), decode(&cell));
    }

    #[test]
    fn concat_keeps_integer_part(int in "[0-9]{1,15}", frac in 0u32..1_000_000) {
        let cell = format!("={}&\".\"&TEXT({},\"000000\")", int, frac);
        prop_assert_eq!(decode(&cell), format!("{}.{:06}", int, frac));
    }

    #[test]
    fn non_string_values_pass_through(n in any::<i64>(), b in any::<bool>()) {
        prop_assert_eq!(decode_value(Value::from(n)), Value::from(n));
        prop_assert_eq!(decode_value(Value::Bool(b)), Value::Bool(b));
    }
}

// =============================================================================
// Transforms
// =============================================================================

proptest! {
    #[test]
    fn presets_preserve_length(series in finite_series(), transform in preset()) {
        let out = transform.apply(&series).unwrap();
        prop_assert_eq!(out.len(), series.len());
    }

    #[test]
    fn identity_is_noop(series in finite_series()) {
        prop_assert_eq!(Transform::Identity.apply(&series).unwrap(), series);
    }

    #[test]
    fn normalize_spans_unit_interval(series in finite_series()) {
        let min = series.iter().copied().fold(f64::INFINITY, f64::min);
        let max = series.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assume!(max > min);

        let out = normalize(&series);
        let out_min = out.iter().copied().fold(f64::INFINITY, f64::min);
        let out_max = out.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert_eq!(out_min, 0.0);
        prop_assert_eq!(out_max, 1.0);

        let again = normalize(&out);
        for (a, b) in out.iter().zip(&again) {
            prop_assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn unit_scale_is_identity(v in -1e6f64..1e6) {
        prop_assert!((scale(v, 0.0, 1.0, 0.0, 1.0).unwrap() - v).abs() <= 1e-9 * v.abs().max(1.0));
    }

    #[test]
    fn empty_input_range_errors(v in -1e3f64..1e3, a in -1e3f64..1e3) {
        prop_assert!(scale(v, a, a, 0.0, 1.0).is_err());
    }

    #[test]
    fn left_elevon_stick_range_is_finite(x in -100.0f64..=100.0) {
        let y = left_elevon(x);
        prop_assert!(y.is_finite());

        let lo = LEFT_ELEVON_SEGMENTS.iter().map(|s| s.output_range().0).fold(f64::INFINITY, f64::min);
        let hi = LEFT_ELEVON_SEGMENTS.iter().map(|s| s.output_range().1).fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(y >= lo && y <= hi);
    }

    #[test]
    fn left_elevon_clamps_out_of_range_input(x in 200.0f64..1e6) {
        prop_assert!(left_elevon(x).is_finite());
        prop_assert!(left_elevon(-x).is_finite());
    }

    #[test]
    fn expression_x_matches_identity(series in finite_series()) {
        let expr = Expression::parse("x").unwrap();
        prop_assert_eq!(expr.apply(&series).unwrap(), series);
    }

    #[test]
    fn expression_parser_never_panics(text in ".{0,80}") {
        if let Ok(expr) = Expression::parse(&text) {
            let _ = expr.evaluate(1.5);
        }
    }
}
