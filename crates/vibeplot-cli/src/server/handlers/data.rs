//! Data preview handler.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use vibeplot::ColumnSummary;

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Response for the data preview endpoint.
#[derive(Serialize)]
pub struct DataPreviewResponse {
    pub file: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows (first N rows, decoded).
    pub rows: Vec<Vec<String>>,
    /// Total row count in the file.
    pub total_rows: usize,
    /// Whether the data was truncated.
    pub truncated: bool,
    /// Summary statistics for numeric columns.
    pub summary: Vec<ColumnSummary>,
}

/// Maximum number of rows to return in preview.
const MAX_PREVIEW_ROWS: usize = 100;

/// Get a preview of one loaded file.
pub async fn get_data_preview(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<Json<DataPreviewResponse>, ApiError> {
    let loaded = state
        .workbook
        .get(&file)
        .ok_or_else(|| ApiError::NotFound(format!("File '{}' is not loaded", file)))?;

    let table = &loaded.table;
    let total_rows = table.row_count();

    Ok(Json(DataPreviewResponse {
        file,
        headers: table.headers.clone(),
        rows: table.rows.iter().take(MAX_PREVIEW_ROWS).cloned().collect(),
        total_rows,
        truncated: total_rows > MAX_PREVIEW_ROWS,
        summary: table.describe(),
    }))
}
