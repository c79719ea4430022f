//! CLI command implementations.

pub mod columns;
pub mod decode;
pub mod plot;
pub mod serve;
pub mod transform;
pub mod transforms;
