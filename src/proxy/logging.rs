//! Request logging utilities for relay requests
//!
//! Provides structured logging with a short correlation ID so one relay
//! request can be followed from arrival through the upstream call.

use std::time::Instant;
use tracing::{debug, error, info, Span};
use uuid::Uuid;

/// Context for tracking a relay request through the system
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// Upstream provider handling this request
    pub provider: String,
    /// Model being used (if known yet)
    pub model: Option<String>,
    /// Fingerprint of the caller's key, never the key itself
    pub caller: Option<String>,
    /// Whether the caller asked for JSON extraction
    pub expect_json: bool,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(provider: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            provider: provider.to_string(),
            model: None,
            caller: None,
            expect_json: false,
        }
    }

    /// Set the model for this request
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the caller fingerprint
    pub fn with_caller(mut self, caller: impl Into<String>) -> Self {
        self.caller = Some(caller.into());
        self
    }

    /// Mark whether JSON extraction was requested
    pub fn with_expect_json(mut self, expect_json: bool) -> Self {
        self.expect_json = expect_json;
        self
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log request initiation
    pub fn log_request_start(&self, attachments: usize) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            caller = ?self.caller,
            expect_json = %self.expect_json,
            attachments = %attachments,
            "Relay request started"
        );
    }

    /// Log request being sent to upstream
    pub fn log_upstream_request(&self, url: &str, body_size: Option<usize>) {
        debug!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            url = %url,
            body_size = ?body_size,
            elapsed_ms = %self.elapsed_ms(),
            "Sending request to upstream"
        );
    }

    /// Log response received from upstream
    pub fn log_upstream_response(&self, status: u16) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            status = %status,
            elapsed_ms = %self.elapsed_ms(),
            "Response received from upstream"
        );
    }

    /// Log a non-success upstream reply; the body stays in the log
    pub fn log_upstream_error(&self, status: u16, body: &str) {
        error!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            status = %status,
            body = %body,
            elapsed_ms = %self.elapsed_ms(),
            "Upstream returned an error"
        );
    }

    /// Log connection error (specific for debugging connectivity issues)
    pub fn log_connection_error(&self, error: &str, url: &str) {
        error!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            url = %url,
            elapsed_ms = %self.elapsed_ms(),
            error = %error,
            "Connection to upstream failed"
        );
    }

    /// Log successful request completion
    pub fn log_request_complete(&self, content_present: bool) {
        info!(
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
            expect_json = %self.expect_json,
            content_present = %content_present,
            elapsed_ms = %self.elapsed_ms(),
            caller = ?self.caller,
            "Relay request completed"
        );
    }

    /// Create a tracing span for this request
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "relay_request",
            trace_id = %self.trace_id,
            provider = %self.provider,
            model = ?self.model,
        )
    }
}
