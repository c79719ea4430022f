//! API request handlers.

mod data;
mod decode;
mod figure;
mod transforms;
mod workbook;

pub use data::*;
pub use decode::*;
pub use figure::*;
pub use transforms::*;
pub use workbook::*;
