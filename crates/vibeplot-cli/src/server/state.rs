//! Application state for the web server.

use std::sync::Arc;

use vibeplot::Workbook;

/// Shared application state.
///
/// The workbook is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub workbook: Arc<Workbook>,
}

impl AppState {
    pub fn new(workbook: Workbook) -> Self {
        Self {
            workbook: Arc::new(workbook),
        }
    }
}
