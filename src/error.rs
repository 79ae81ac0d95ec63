//! Error types for the Service Order Report server

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::report::ReportError;

/// Message returned when a request carries nothing to render
pub const NO_DATA_MESSAGE: &str = "No data provided for generate PDF File..";

/// Message returned when generation fails
pub const RETRY_MESSAGE: &str = "Error generating PDF File, Please try again.";

/// Application-wide result type
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Report error: {0}")]
    Render(#[from] ReportError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl AppError {
    fn json(status: StatusCode, error_type: &str, message: &str, details: Option<String>) -> Response {
        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message: message.to_string(),
            details,
        });
        (status, body).into_response()
    }

    fn generation_failed() -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            RETRY_MESSAGE,
        )
            .into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::MethodNotAllowed => Self::json(
                StatusCode::METHOD_NOT_ALLOWED,
                "method_not_allowed",
                "Method Not Allowed",
                None,
            ),
            AppError::BadRequest(detail) => Self::json(
                StatusCode::BAD_REQUEST,
                "bad_request",
                NO_DATA_MESSAGE,
                if cfg!(debug_assertions) {
                    Some(detail.clone())
                } else {
                    None
                },
            ),
            AppError::Render(ReportError::Validation(detail)) => {
                tracing::warn!("Nothing to render: {}", detail);
                Self::json(StatusCode::BAD_REQUEST, "bad_request", NO_DATA_MESSAGE, None)
            }
            AppError::Render(e) => {
                tracing::error!("Error generating PDF: {}", e);
                Self::generation_failed()
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                Self::generation_failed()
            }
        }
    }
}
