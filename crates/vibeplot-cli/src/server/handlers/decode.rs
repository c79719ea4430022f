//! Ad-hoc formula decoding handler.

use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Deserialize)]
pub struct DecodeRequest {
    pub values: Vec<Value>,
}

#[derive(Serialize)]
pub struct DecodeResponse {
    pub values: Vec<Value>,
}

/// Decode each value; non-strings are returned unchanged.
pub async fn decode_values(Json(request): Json<DecodeRequest>) -> Json<DecodeResponse> {
    Json(DecodeResponse {
        values: request
            .values
            .into_iter()
            .map(vibeplot::decode_value)
            .collect(),
    })
}
