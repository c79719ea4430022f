//! Figure building handler.

use axum::{Json, extract::State};
use vibeplot::{FigureBuilder, PlotConfig, PlotOutcome};

use crate::server::error::ApiError;
use crate::server::state::AppState;

/// Build a figure for the posted plot configuration.
///
/// Series that fail are reported in the outcome's `errors`; the request
/// itself only fails when nothing was asked for.
pub async fn build_figure(
    State(state): State<AppState>,
    Json(config): Json<PlotConfig>,
) -> Result<Json<PlotOutcome>, ApiError> {
    if config.series.is_empty() {
        return Err(ApiError::BadRequest("No series selected".to_string()));
    }

    Ok(Json(FigureBuilder::new().build(&state.workbook, &config)))
}
