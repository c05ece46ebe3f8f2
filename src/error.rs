// src/error.rs
// Error kinds surfaced by the simplification pipeline and the HTTP layer

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde_json::json;
use thiserror::Error;

use crate::llm_provider::LLMError;

/// The external generative call could not produce usable output.
#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("Empty response from {model}")]
    EmptyResponse { model: String },

    #[error("{model} API failed: {source}")]
    ServiceFailure {
        model: String,
        #[source]
        source: LLMError,
    },
}

impl InferenceError {
    pub fn kind(&self) -> &'static str {
        match self {
            InferenceError::EmptyResponse { .. } => "empty-response",
            InferenceError::ServiceFailure { .. } => "service-failure",
        }
    }
}

/// Malformed client request, rejected before reaching the pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("text must contain at least 1 character")]
    EmptyText,

    #[error("grade must be between {min} and {max}, got {got}")]
    GradeOutOfRange { got: i64, min: u8, max: u8 },

    #[error("malformed request body: {0}")]
    Malformed(String),
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Inference(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({
            "detail": self.to_string(),
        }))
    }
}
