//! Relay pipeline
//!
//! Form extraction, upstream payload assembly and reply post-processing.

pub mod extract;
pub mod form;
pub mod payload;

pub use extract::{extract_json_object, find_json_object, message_content};
pub use form::{Attachment, RelayForm};
pub use payload::{ChatMessage, ChatRequest, ContentBlock, RelayResponse, Role};
