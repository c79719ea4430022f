//! Transform catalog and preview handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use vibeplot::{CatalogEntry, SeriesTransform, Transform};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// List the preset transforms.
pub async fn list_transforms() -> Json<Vec<CatalogEntry>> {
    Json(Transform::entries())
}

#[derive(Deserialize)]
pub struct TransformRequest {
    pub file: String,
    pub column: String,
    #[serde(default)]
    pub transform: SeriesTransform,
}

#[derive(Serialize)]
pub struct TransformResponse {
    pub transform: String,
    /// Non-finite results are `null`.
    pub values: Vec<Option<f64>>,
}

/// Apply a transform to one column and return the values.
pub async fn apply_transform(
    State(state): State<AppState>,
    Json(request): Json<TransformRequest>,
) -> Result<Json<TransformResponse>, ApiError> {
    let file = state
        .workbook
        .get(&request.file)
        .ok_or_else(|| ApiError::NotFound(format!("File '{}' is not loaded", request.file)))?;

    let input = file.numeric_column(&request.column)?;
    let output = request.transform.apply(&input)?;

    Ok(Json(TransformResponse {
        transform: request.transform.to_string(),
        values: output.iter().map(|v| v.is_finite().then_some(*v)).collect(),
    }))
}
