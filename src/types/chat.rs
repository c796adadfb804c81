//! Chat message types sent to the upstream gateway.
//!
//! A deliberately small multimodal model: messages carry either plain text or
//! an ordered list of text/image parts. Images are always base64 data URIs by
//! the time they reach a message; fetching or re-encoding is the caller's job.

use serde::{Deserialize, Serialize};

/// Message role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// Content part - provider-agnostic multimodal content
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    /// Text content
    Text { text: String },
    /// Image content as a data URI (`data:<mime>;base64,<data>`)
    Image { url: String },
}

impl ContentPart {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create an image part from an already-encoded data URI
    pub fn image_data_uri(url: impl Into<String>) -> Self {
        Self::Image { url: url.into() }
    }

    /// Check whether this part is an image
    pub fn is_image(&self) -> bool {
        matches!(self, Self::Image { .. })
    }
}

/// Message content - plain text or multimodal parts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    /// Plain text
    Text(String),
    /// Multimodal content
    MultiModal(Vec<ContentPart>),
}

impl MessageContent {
    /// Extract the first text content if available
    pub fn text(&self) -> Option<&str> {
        match self {
            MessageContent::Text(text) => Some(text),
            MessageContent::MultiModal(parts) => parts.iter().find_map(|part| match part {
                ContentPart::Text { text } => Some(text.as_str()),
                _ => None,
            }),
        }
    }

    /// Get multimodal content parts if this is multimodal content
    pub fn as_multimodal(&self) -> Option<&[ContentPart]> {
        match self {
            MessageContent::MultiModal(parts) => Some(parts),
            _ => None,
        }
    }

    /// Check whether any part carries an image payload
    pub fn has_images(&self) -> bool {
        match self {
            MessageContent::Text(_) => false,
            MessageContent::MultiModal(parts) => parts.iter().any(ContentPart::is_image),
        }
    }
}

/// Chat message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Role
    pub role: MessageRole,
    /// Content - text or multimodal parts
    pub content: MessageContent,
}

impl ChatMessage {
    /// Creates a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Creates a plain-text user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text(content.into()),
        }
    }

    /// Creates a user message with multimodal content
    pub fn user_with_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::MultiModal(parts),
        }
    }

    /// Creates an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text(content.into()),
        }
    }
}
