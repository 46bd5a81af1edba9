//! Upstream chat payload
//!
//! OpenAI-compatible chat-completion request with multimodal content blocks.

use serde::{Deserialize, Serialize};

use super::form::Attachment;

/// Chat message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// One element of a message's content array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    Text { text: String },
    /// Images and PDFs alike are sent as data URIs in this block type
    ImageUrl { image_url: String },
}

/// Chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

/// Chat completion request sent upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    /// Build a single user message: prompt text, then image, then PDF
    pub fn new(
        model: impl Into<String>,
        prompt: impl Into<String>,
        image: Option<&Attachment>,
        pdf: Option<&Attachment>,
    ) -> Self {
        let mut content = vec![ContentBlock::Text {
            text: prompt.into(),
        }];
        content.extend(
            [image, pdf]
                .into_iter()
                .flatten()
                .map(|attachment| ContentBlock::ImageUrl {
                    image_url: attachment.data_uri(),
                }),
        );

        Self {
            model: model.into(),
            messages: vec![ChatMessage {
                role: Role::User,
                content,
            }],
        }
    }

    /// Number of attachment blocks in the request
    pub fn attachment_count(&self) -> usize {
        self.messages
            .iter()
            .flat_map(|m| &m.content)
            .filter(|block| matches!(block, ContentBlock::ImageUrl { .. }))
            .count()
    }
}

/// Body returned when the caller did not ask for JSON extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelayResponse {
    pub response: Option<String>,
}
