//! Decoding of formula-encoded cell values.

mod formula;

pub use formula::{decode, decode_value, is_formula};
