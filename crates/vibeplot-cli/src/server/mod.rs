//! Local web server for interactive plotting.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
