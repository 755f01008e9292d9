//! API error handling
//!
//! Every failure leaving the API carries the same structured envelope:
//! a status category, a human-readable message, and a list of detail
//! strings (field-level messages for validation, one descriptive string
//! otherwise).

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use domain_invoicing::InvoiceError;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation failed")]
    Validation { errors: Vec<String> },

    #[error("Internal server error: {message}")]
    Internal { message: String, detail: String },
}

impl ApiError {
    /// Creates a validation error from field-level detail messages
    pub fn validation(errors: Vec<String>) -> Self {
        ApiError::Validation { errors }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub errors: Vec<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorResponse {
                    status: "NOT_FOUND".to_string(),
                    message,
                    errors: vec!["Resource not found".to_string()],
                },
            ),
            ApiError::Validation { errors } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    status: "BAD_REQUEST".to_string(),
                    message: "Validation failed".to_string(),
                    errors,
                },
            ),
            ApiError::Internal { message, detail } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    status: "INTERNAL_SERVER_ERROR".to_string(),
                    message,
                    errors: vec![detail],
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<InvoiceError> for ApiError {
    fn from(err: InvoiceError) -> Self {
        match err {
            InvoiceError::NotFound(id) => {
                ApiError::NotFound(format!("Invoice not found with id: {id}"))
            }
            InvoiceError::Processing { context, source } => ApiError::Internal {
                message: context,
                detail: source.to_string(),
            },
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::validation(vec![rejection.body_text()])
    }
}
