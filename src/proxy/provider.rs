//! Upstream provider abstraction
//!
//! The relay talks to its model backend through this trait so the backend
//! can be swapped (or mocked) without touching the handler.

use async_trait::async_trait;
use serde_json::Value;

use crate::{error::AppResult, proxy::RequestContext, relay::ChatRequest};

/// Interface to a chat-completions backend
///
/// # Security
///
/// Implementations MUST:
/// - Never forward the caller's Authorization header upstream
/// - Authenticate with the service credential from configuration
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Provider name for logging and metrics
    fn name(&self) -> &'static str;

    /// Send one chat completion request and return the decoded JSON body
    ///
    /// A non-success upstream status is an `AppError::UpstreamError`; a body
    /// that is not JSON surfaces as `AppError::HttpError`.
    async fn chat_completion(&self, request: &ChatRequest, ctx: &RequestContext)
        -> AppResult<Value>;
}
