//! Header utilities for upstream requests
//!
//! Only the relay's own credential and attribution headers are sent; caller
//! headers are never forwarded.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};

use crate::error::{AppError, AppResult};

/// OpenRouter app attribution: site URL
pub const HTTP_REFERER: &str = "http-referer";
/// OpenRouter app attribution: site name
pub const X_TITLE: &str = "x-title";

/// Build the headers for an upstream chat request
pub fn build_default_headers(
    api_key: &str,
    site_url: Option<&str>,
    site_name: Option<&str>,
) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(AUTHORIZATION, header_value(&format!("Bearer {}", api_key))?);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    if let Some(url) = site_url {
        headers.insert(HeaderName::from_static(HTTP_REFERER), header_value(url)?);
    }
    if let Some(name) = site_name {
        headers.insert(HeaderName::from_static(X_TITLE), header_value(name)?);
    }

    Ok(headers)
}

fn header_value(value: &str) -> AppResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid upstream header value: {}", e)))
}
