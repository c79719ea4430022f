//! Workbook overview handler.

use axum::{Json, extract::State};
use serde::Serialize;
use vibeplot::SourceMetadata;

use crate::server::state::AppState;

#[derive(Serialize)]
pub struct WorkbookResponse {
    pub files: Vec<FileInfo>,
    /// Columns present in every file, usable as X axes.
    pub common_columns: Vec<String>,
}

#[derive(Serialize)]
pub struct FileInfo {
    #[serde(flatten)]
    pub metadata: SourceMetadata,
    pub columns: Vec<String>,
}

/// List loaded files, their columns, and the common columns.
pub async fn get_workbook(State(state): State<AppState>) -> Json<WorkbookResponse> {
    let workbook = &state.workbook;

    let files = workbook
        .files()
        .map(|f| FileInfo {
            metadata: f.metadata.clone(),
            columns: f.table.headers.clone(),
        })
        .collect();

    Json(WorkbookResponse {
        files,
        common_columns: workbook.common_columns(),
    })
}
