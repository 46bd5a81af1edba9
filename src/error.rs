//! Error types for the relay
//!
//! Every error renders as a plain-text body with a fixed message. Diagnostic
//! detail goes to the log, never to the caller.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::{error, warn};

/// Fixed caller-visible message for upstream failures
pub const UPSTREAM_FAILURE_MESSAGE: &str = "Error from upstream service";

/// Fixed caller-visible message when no JSON object can be recovered
pub const JSON_EXTRACTION_MESSAGE: &str =
    "Invalid response from upstream: cannot extract any JSON";

/// Application-level errors
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    #[error("Missing Authorization header")]
    Unauthorized,

    #[error("Unauthorized")]
    InvalidToken,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Upstream error: {0}")]
    UpstreamError(String),

    #[error("Upstream content contained no JSON object")]
    InvalidUpstreamResponse,

    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Unauthorized | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UpstreamError(_)
            | AppError::InvalidUpstreamResponse
            | AppError::HttpError(_)
            | AppError::JsonError(_)
            | AppError::Internal(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Message safe to show the caller
    fn public_message(&self) -> String {
        match self {
            AppError::MethodNotAllowed | AppError::Unauthorized | AppError::InvalidToken => {
                self.to_string()
            }
            AppError::BadRequest(msg) => msg.clone(),
            AppError::InvalidUpstreamResponse => JSON_EXTRACTION_MESSAGE.to_string(),
            AppError::UpstreamError(_)
            | AppError::HttpError(_)
            | AppError::JsonError(_)
            | AppError::Internal(_) => UPSTREAM_FAILURE_MESSAGE.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(error = %self, status = %status.as_u16(), "Relay request failed");
        } else {
            warn!(error = %self, status = %status.as_u16(), "Relay request rejected");
        }

        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.public_message(),
        )
            .into_response()
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
