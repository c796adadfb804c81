//! Upstream gateway abstraction.
//!
//! The orchestration core only ever talks to one logical operation: "generate
//! text for these messages on this model". Keeping that behind a trait object
//! lets tests substitute an in-process mock and keeps the HTTP client an
//! implementation detail.

mod openrouter;

pub use openrouter::{OpenRouterConfig, OpenRouterGateway};

use async_trait::async_trait;

use crate::error::ResearchError;
use crate::registry::ReasoningConfig;
use crate::types::{ChatMessage, Usage};

/// One logical text-generation call.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    /// Upstream model id; passed through verbatim, the gateway decides whether
    /// it is valid
    pub model_id: String,
    /// Ordered message sequence
    pub messages: Vec<ChatMessage>,
    /// Completion token budget
    pub max_tokens: u32,
    /// Reasoning configuration for this model
    pub reasoning: ReasoningConfig,
    /// Gateway credential
    pub api_key: String,
}

/// Result of one generation call.
#[derive(Debug, Clone)]
pub struct GenerateResponse {
    /// Generated text
    pub text: String,
    /// Token usage, when the gateway reported it
    pub usage: Option<Usage>,
}

/// A unified model-routing gateway.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Issue one generation call. Must fail cleanly (returned error) on
    /// invalid model ids or provider-side errors.
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ResearchError>;
}
