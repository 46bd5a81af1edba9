//! Configuration management for the relay
//!
//! Configuration is loaded from environment variables once at startup and
//! passed to handlers through `AppState`.

use anyhow::{Context, Result};
use std::env;

use crate::prompt::PromptPreset;

/// Upstream chat-completions endpoint used when none is configured
pub const DEFAULT_UPSTREAM_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Model used when the form does not name one
pub const DEFAULT_MODEL: &str = "google/gemini-2.0-flash-lite-preview-02-05:free";

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Caller keys permitted to use the relay
    pub allowed_api_keys: Vec<String>,

    /// Upstream chat-completions URL
    pub upstream_endpoint: String,
    /// Upstream service credential
    pub upstream_api_key: String,
    /// Sent as `HTTP-Referer` for OpenRouter attribution
    pub site_url: Option<String>,
    /// Sent as `X-Title` for OpenRouter attribution
    pub site_name: Option<String>,
    /// Upstream request timeout (in seconds)
    pub upstream_timeout_seconds: u64,

    /// Model used when the request omits one
    pub default_model: String,
    /// Prompt used when the request omits one
    pub prompt_preset: Option<PromptPreset>,

    /// Maximum accepted request body size (in bytes)
    pub max_upload_bytes: usize,

    /// Port for the Prometheus exporter; metrics are disabled when unset
    pub metrics_port: Option<u16>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: env::var("RELAY_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("RELAY_PORT")
                .unwrap_or_else(|_| "8787".to_string())
                .parse()
                .context("Invalid RELAY_PORT")?,

            allowed_api_keys: parse_allow_list(
                &env::var("ALLOWED_API_KEYS").context("ALLOWED_API_KEYS must be set")?,
            ),

            upstream_endpoint: env::var("OPENROUTER_ENDPOINT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_UPSTREAM_ENDPOINT.to_string()),
            upstream_api_key: env::var("OPENROUTER_API_KEY")
                .context("OPENROUTER_API_KEY must be set")?,
            site_url: env::var("OPENROUTER_SITE_URL").ok(),
            site_name: env::var("OPENROUTER_SITE_NAME").ok(),
            upstream_timeout_seconds: env::var("UPSTREAM_TIMEOUT_SECONDS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()
                .context("Invalid UPSTREAM_TIMEOUT_SECONDS")?,

            default_model: env::var("RELAY_DEFAULT_MODEL")
                .unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            prompt_preset: env::var("RELAY_PROMPT_PRESET")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("Invalid RELAY_PROMPT_PRESET")?,

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .unwrap_or_else(|_| "20971520".to_string())
                .parse()
                .context("Invalid MAX_UPLOAD_BYTES")?,

            metrics_port: env::var("METRICS_PORT")
                .ok()
                .map(|v| v.parse())
                .transpose()
                .context("Invalid METRICS_PORT")?,
        })
    }

    /// Check whether a caller key is on the allow-list
    pub fn is_allowed(&self, api_key: &str) -> bool {
        self.allowed_api_keys.iter().any(|k| k == api_key)
    }
}

/// Split a comma-separated allow-list, dropping blank entries
pub fn parse_allow_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(String::from)
        .collect()
}
