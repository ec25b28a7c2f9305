//! Error types for the server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::error::InferenceError;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ServerError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ServerError::Inference(err) if err.is_client_error() => {
                (StatusCode::BAD_REQUEST, err.to_string())
            }
            ServerError::Inference(err) => {
                let reference = uuid::Uuid::new_v4().to_string()[..8].to_string();
                tracing::error!(
                    reference = %reference,
                    detail = %err,
                    "Prediction failed; artifacts may not match the runtime"
                );
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("An internal error occurred (reference {})", reference),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
