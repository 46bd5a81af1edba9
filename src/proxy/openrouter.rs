//! OpenRouter proxy
//!
//! Forwards chat-completion requests to OpenRouter (or any endpoint speaking
//! the same OpenAI-compatible protocol).

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    proxy::{headers::build_default_headers, ChatProvider, RequestContext},
    relay::ChatRequest,
};

/// OpenRouter chat-completions client
pub struct OpenRouterClient {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    site_url: Option<String>,
    site_name: Option<String>,
}

impl OpenRouterClient {
    /// Create a new OpenRouter client
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            endpoint: config.upstream_endpoint.clone(),
            api_key: config.upstream_api_key.clone(),
            site_url: config.site_url.clone(),
            site_name: config.site_name.clone(),
        }
    }

    /// The configured chat-completions URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatProvider for OpenRouterClient {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn chat_completion(
        &self,
        request: &ChatRequest,
        ctx: &RequestContext,
    ) -> AppResult<Value> {
        let headers = build_default_headers(
            &self.api_key,
            self.site_url.as_deref(),
            self.site_name.as_deref(),
        )?;
        let body = serde_json::to_vec(request)?;

        ctx.log_upstream_request(&self.endpoint, Some(body.len()));

        let response = self
            .client
            .post(&self.endpoint)
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                ctx.log_connection_error(&e.to_string(), &self.endpoint);
                e
            })?;

        let status = response.status();
        ctx.log_upstream_response(status.as_u16());

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            ctx.log_upstream_error(status.as_u16(), &text);
            return Err(AppError::UpstreamError(format!(
                "OpenRouter returned status {}",
                status
            )));
        }

        let result = response.json().await?;
        Ok(result)
    }
}
