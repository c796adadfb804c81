//! Request and result types for a research round.
//!
//! All of these are created at the start of a round and fully determined by
//! its end; nothing here carries mutable state across rounds. Conversation
//! history is the caller's concern and re-enters as compacted text inside the
//! next query.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::common::Usage;

/// Image format accepted on a research request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Gif,
    Webp,
}

impl ImageFormat {
    /// MIME type for this format
    pub const fn mime_type(&self) -> &'static str {
        match self {
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Webp => "image/webp",
        }
    }
}

/// A base64-encoded image attached to a research request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AttachedImage {
    /// Image format
    pub format: ImageFormat,
    /// Base64-encoded image bytes (no data-URI prefix)
    pub data: String,
}

impl AttachedImage {
    /// Create an attached image from base64 data
    pub fn new(format: ImageFormat, data: impl Into<String>) -> Self {
        Self {
            format,
            data: data.into(),
        }
    }

    /// Render as a `data:` URI suitable for vision-capable models
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.format.mime_type(), self.data)
    }
}

/// Input to one research round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchRequest {
    /// The user's research query
    pub query: String,
    /// Attached images, in order (0-4)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<AttachedImage>,
    /// Selected model ids, in order (1-12); empty means "use the default set"
    #[serde(default)]
    pub model_ids: Vec<String>,
    /// Model id used for the synthesis call; empty means "use the default"
    #[serde(default)]
    pub orchestrator_id: String,
    /// Caller-supplied gateway credential
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Bring-your-own-key mode: the caller's key is mandatory and billing
    /// responsibility shifts to them
    #[serde(default)]
    pub byok_mode: bool,
}

impl ResearchRequest {
    /// Create a request with just a query, using defaults for everything else
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            images: Vec::new(),
            model_ids: Vec::new(),
            orchestrator_id: String::new(),
            api_key: None,
            byok_mode: false,
        }
    }

    /// Select the models to fan out to
    pub fn with_models<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.model_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Select the synthesis model
    pub fn with_orchestrator(mut self, id: impl Into<String>) -> Self {
        self.orchestrator_id = id.into();
        self
    }

    /// Attach an image
    pub fn with_image(mut self, image: AttachedImage) -> Self {
        self.images.push(image);
        self
    }

    /// Supply an explicit gateway credential
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Enable bring-your-own-key mode
    pub fn with_byok(mut self, byok: bool) -> Self {
        self.byok_mode = byok;
        self
    }
}

/// Monetary cost attributed to one model call.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CallCost {
    /// Cost in USD
    pub amount: f64,
    /// True when derived from text length rather than reported token usage.
    /// UIs conventionally render estimated costs with a `~` prefix.
    pub is_estimate: bool,
}

impl CallCost {
    /// Zero cost (failed call, or unknown model with no usage)
    pub const fn zero() -> Self {
        Self {
            amount: 0.0,
            is_estimate: false,
        }
    }

    /// Cost computed from reported token usage
    pub const fn measured(amount: f64) -> Self {
        Self {
            amount,
            is_estimate: false,
        }
    }

    /// Cost approximated from text length
    pub const fn estimated(amount: f64) -> Self {
        Self {
            amount,
            is_estimate: true,
        }
    }
}

/// One model's outcome within a round.
///
/// Exactly one of `success == true` with content or `success == false` with
/// an error message holds; `duration_ms` is populated either way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelResponse {
    /// Display name of the model
    pub model: String,
    /// Upstream model id
    pub model_id: String,
    /// Response text; empty on failure
    pub content: String,
    /// Whether the call succeeded
    pub success: bool,
    /// Error message, present iff the call failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall-clock duration of the call in milliseconds
    pub duration_ms: u64,
    /// Token usage, when the gateway reported it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    /// Cost attributed to this call
    pub cost: CallCost,
}

impl ModelResponse {
    /// Build a successful response; cost is attached afterwards by the executor
    pub fn succeeded(
        model: impl Into<String>,
        model_id: impl Into<String>,
        content: impl Into<String>,
        duration_ms: u64,
        usage: Option<Usage>,
    ) -> Self {
        Self {
            model: model.into(),
            model_id: model_id.into(),
            content: content.into(),
            success: true,
            error: None,
            duration_ms,
            usage,
            cost: CallCost::zero(),
        }
    }

    /// Build a failed response
    pub fn failed(
        model: impl Into<String>,
        model_id: impl Into<String>,
        error: impl Into<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            model: model.into(),
            model_id: model_id.into(),
            content: String::new(),
            success: false,
            error: Some(error.into()),
            duration_ms,
            usage: None,
            cost: CallCost::zero(),
        }
    }
}

/// Aggregate result of one research round.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchResult {
    /// The original query
    pub query: String,
    /// One entry per requested model, preserving request order
    pub responses: Vec<ModelResponse>,
    /// Synthesized answer; a fixed user-facing failure message when no model
    /// succeeded
    pub synthesis: String,
    /// Wall-clock duration of the whole round in milliseconds
    pub total_duration_ms: u64,
    /// Number of models in the round
    pub model_count: usize,
    /// Number of successful responses
    pub success_count: usize,
    /// Sum of per-response costs in USD (failed calls contribute 0)
    pub total_cost: f64,
    /// When the round completed
    pub timestamp: DateTime<Utc>,
    /// Display name of the synthesis model
    pub orchestrator: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_uri_rendering() {
        let image = AttachedImage::new(ImageFormat::Png, "iVBORw0KGgo=");
        assert_eq!(image.data_uri(), "data:image/png;base64,iVBORw0KGgo=");
    }

    #[test]
    fn test_response_outcome_invariant() {
        let ok = ModelResponse::succeeded("GPT-5.1", "openai/gpt-5.1", "text", 1200, None);
        assert!(ok.success);
        assert!(ok.error.is_none());
        assert!(!ok.content.is_empty());

        let bad = ModelResponse::failed("GPT-5.1", "openai/gpt-5.1", "timeout", 30_000);
        assert!(!bad.success);
        assert_eq!(bad.error.as_deref(), Some("timeout"));
        assert!(bad.content.is_empty());
        assert_eq!(bad.duration_ms, 30_000);
    }
}
