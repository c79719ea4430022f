//! Fuzz target for the custom expression parser and evaluator.

#![no_main]

use libfuzzer_sys::fuzz_target;
use vibeplot::Expression;

fuzz_target!(|data: &[u8]| {
    if data.len() > 2_048 {
        return;
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(expr) = Expression::parse(text) {
            for x in [0.0, -1.0, 1.5, f64::NAN, f64::INFINITY] {
                let _ = expr.evaluate(x);
            }
        }
    }
});
