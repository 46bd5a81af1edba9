//! Authentication middleware
//!
//! Checks the caller's bearer token against the configured allow-list.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use sha2::{Digest, Sha256};
use tracing::{debug, instrument, warn};

use crate::{error::AppError, AppState};

/// Caller identity passed to handlers through request extensions
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller {
    /// Short SHA-256 fingerprint of the caller's key, safe to log
    pub key_fingerprint: String,
}

/// Extract the token from an Authorization header value
///
/// A leading `Bearer ` is removed when present and surrounding whitespace
/// trimmed. Returns `None` when nothing is left.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .unwrap_or(auth_header)
        .trim();
    (!token.is_empty()).then_some(token)
}

/// Fingerprint a caller key for logs
pub fn fingerprint_key(api_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(api_key.as_bytes());
    hex::encode(hasher.finalize())[..12].to_string()
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Rejects the request unless the token is on the allow-list
/// 3. Adds AuthenticatedCaller to request extensions
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(extract_bearer_token)
        .ok_or(AppError::Unauthorized)?;

    let key_fingerprint = fingerprint_key(token);

    if !state.config.is_allowed(token) {
        warn!(caller = %key_fingerprint, "Caller key is not on the allow-list");
        return Err(AppError::InvalidToken);
    }

    debug!(caller = %key_fingerprint, "Caller authenticated");

    request
        .extensions_mut()
        .insert(AuthenticatedCaller { key_fingerprint });

    Ok(next.run(request).await)
}
