//! Multipart form extraction
//!
//! Reads the relay's form fields (`image`, `pdf`, `prompt`, `model`,
//! `expectJson`) and turns file parts into base64 data URIs.

use axum::extract::{multipart::Field, Multipart};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use tracing::debug;

use crate::{
    error::{AppError, AppResult},
    prompt::PromptPreset,
};

/// Mime type used for every PDF attachment
pub const PDF_MIME_TYPE: &str = "application/pdf";

/// Mime type used when an image part does not declare one
const FALLBACK_MIME_TYPE: &str = "application/octet-stream";

/// Binary attachment with its mime type
#[derive(Debug, Clone)]
pub struct Attachment {
    pub bytes: Bytes,
    pub mime_type: String,
}

impl Attachment {
    pub fn new(bytes: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Render as `data:<mime>;base64,<payload>`
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, STANDARD.encode(&self.bytes))
    }
}

/// Fields extracted from a relay request body
#[derive(Debug, Default)]
pub struct RelayForm {
    pub prompt: Option<String>,
    pub model: Option<String>,
    pub expect_json: bool,
    pub image: Option<Attachment>,
    pub pdf: Option<Attachment>,
}

impl RelayForm {
    /// Read all fields from a multipart body
    ///
    /// Unknown fields are skipped. File parts with no bytes count as absent.
    pub async fn from_multipart(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = RelayForm::default();

        while let Some(field) = multipart.next_field().await.map_err(|e| {
            AppError::BadRequest(format!("Invalid multipart body: {}", e))
        })? {
            let name = field.name().unwrap_or_default().to_string();

            match name.as_str() {
                "image" => {
                    let mime_type = field
                        .content_type()
                        .filter(|m| !m.is_empty())
                        .unwrap_or(FALLBACK_MIME_TYPE)
                        .to_string();
                    let bytes = read_bytes(field, &name).await?;
                    form.image = (!bytes.is_empty()).then(|| Attachment::new(bytes, mime_type));
                }
                "pdf" => {
                    let bytes = read_bytes(field, &name).await?;
                    form.pdf = (!bytes.is_empty()).then(|| Attachment::new(bytes, PDF_MIME_TYPE));
                }
                "prompt" => form.prompt = Some(read_text(field, &name).await?),
                "model" => {
                    let model = read_text(field, &name).await?;
                    form.model = Some(model.trim().to_string()).filter(|m| !m.is_empty());
                }
                "expectJson" => form.expect_json = read_text(field, &name).await? == "true",
                _ => debug!(field = %name, "Ignoring unknown form field"),
            }
        }

        Ok(form)
    }

    /// The caller's prompt, or the preset text when the caller sent none
    pub fn resolve_prompt(&mut self, preset: Option<PromptPreset>) -> AppResult<String> {
        match (self.prompt.take(), preset) {
            (Some(prompt), _) => Ok(prompt),
            (None, Some(preset)) => Ok(preset.text().to_string()),
            (None, None) => Err(AppError::BadRequest("Missing prompt field".to_string())),
        }
    }
}

async fn read_bytes(field: Field<'_>, name: &str) -> AppResult<Bytes> {
    field
        .bytes()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field {}: {}", name, e)))
}

async fn read_text(field: Field<'_>, name: &str) -> AppResult<String> {
    field
        .text()
        .await
        .map_err(|e| AppError::BadRequest(format!("Failed to read field {}: {}", name, e)))
}
