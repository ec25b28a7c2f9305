//! HTTP request handlers

use std::sync::Arc;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};

use super::error::{Result, ServerError};
use super::state::AppState;

pub const WELCOME_MESSAGE: &str =
    "Welcome to the California housing price API! Use the /predict endpoint.";

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction: f64,
}

/// Static welcome message
pub async fn home() -> Json<Value> {
    Json(json!({ "message": WELCOME_MESSAGE }))
}

pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "model": state.artifacts.model,
        "scaling": state.artifacts.scaling,
        "uptime_secs": state.uptime_secs(),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Predict the median house value for one district
pub async fn predict(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<PredictResponse>> {
    let Json(body) = payload.map_err(|rejection| ServerError::BadRequest(rejection.body_text()))?;

    let fields = body
        .as_object()
        .ok_or_else(|| ServerError::BadRequest("Request body must be a JSON object".to_string()))?;

    let prediction = state.pipeline.predict(fields)?;
    Ok(Json(PredictResponse { prediction }))
}
