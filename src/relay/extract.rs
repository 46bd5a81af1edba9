//! Upstream reply post-processing
//!
//! Pulls the first choice's text out of a chat-completion response and, when
//! asked to, recovers the JSON object embedded in that text.

use serde_json::Value;
use tracing::warn;

use crate::error::{AppError, AppResult};

/// `choices[0].message.content`, or `None` for any other shape
pub fn message_content(response: &Value) -> Option<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(String::from)
}

/// Find the first complete top-level `{...}` in `text`
///
/// Braces inside string literals (including escaped quotes) are ignored. An
/// opening brace that never closes is skipped and the scan resumes after it.
pub fn find_json_object(text: &str) -> Option<&str> {
    let bytes = text.as_bytes();
    let mut from = 0;

    while let Some(offset) = text[from..].find('{') {
        let start = from + offset;
        if let Some(end) = balanced_end(bytes, start) {
            return Some(&text[start..=end]);
        }
        from = start + 1;
    }

    None
}

/// Index of the `}` closing the object opened at `start`
fn balanced_end(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (index, &byte) in bytes.iter().enumerate().skip(start) {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse the first embedded JSON object in the model's text
pub fn extract_json_object(content: Option<&str>) -> AppResult<Value> {
    let candidate = content
        .and_then(find_json_object)
        .ok_or(AppError::InvalidUpstreamResponse)?;

    serde_json::from_str(candidate).map_err(|e| {
        warn!(error = %e, candidate_len = candidate.len(), "Embedded JSON failed to parse");
        AppError::InvalidUpstreamResponse
    })
}
