//! Vision Relay - authenticated relay to a multimodal LLM API
//!
//! This library provides the core functionality for the relay server. It
//! accepts an image and/or PDF with a prompt, forwards them to the upstream
//! chat-completions provider, and returns the answer or the JSON it contains.

pub mod config;
pub mod error;
pub mod metrics;
pub mod middleware;
pub mod prompt;
pub mod proxy;
pub mod relay;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::proxy::{ChatProvider, OpenRouterClient};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    /// Upstream provider the relay forwards to
    pub provider: Arc<dyn ChatProvider>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(32)
            .timeout(Duration::from_secs(config.upstream_timeout_seconds))
            .build()?;

        let provider: Arc<dyn ChatProvider> =
            Arc::new(OpenRouterClient::new(http_client, &config));

        Ok(Self::with_provider(config, provider))
    }

    /// Create an application state around an existing provider
    pub fn with_provider(config: Config, provider: Arc<dyn ChatProvider>) -> Self {
        Self { config, provider }
    }
}
