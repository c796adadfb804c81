//! Orchestration façade.
//!
//! Composes registry lookup, prompt building, the concurrent fan-out, pricing
//! and synthesis into the two public operations: a fresh multi-model research
//! round ([`Orchestrator::run_research`]) and a lightweight single-model
//! follow-up ([`Orchestrator::run_follow_up`]). The orchestrator is stateless
//! across calls; conversation history re-enters as compacted text supplied by
//! the caller.

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use crate::defaults;
use crate::error::ResearchError;
use crate::executor;
use crate::gateway::{Gateway, GenerateRequest, OpenRouterGateway};
use crate::registry::{
    DEFAULT_ORCHESTRATOR_MODEL, DEFAULT_RESEARCH_MODELS, FOLLOW_UP_MODEL, ModelDescriptor,
    ModelRegistry,
};
use crate::synthesis;
use crate::types::{ChatMessage, ResearchRequest, ResearchResult};

/// User-facing synthesis text for a round in which every model failed.
pub const ALL_MODELS_FAILED_MESSAGE: &str =
    "All models failed to respond. Please verify your API key and try again.";

/// Orchestrator configuration.
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Server-default gateway credential, used when the request carries none
    /// and BYOK mode is off
    pub default_api_key: Option<String>,
    /// Models fanned out to when the request selects none
    pub default_model_ids: Vec<String>,
    /// Synthesis model used when the request selects none
    pub default_orchestrator_id: String,
    /// Fast model used for follow-up turns
    pub follow_up_model_id: String,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            default_api_key: std::env::var(defaults::gateway::API_KEY_ENV).ok(),
            default_model_ids: DEFAULT_RESEARCH_MODELS
                .iter()
                .map(ToString::to_string)
                .collect(),
            default_orchestrator_id: DEFAULT_ORCHESTRATOR_MODEL.to_string(),
            follow_up_model_id: FOLLOW_UP_MODEL.to_string(),
        }
    }
}

impl OrchestratorConfig {
    /// Set the server-default gateway credential
    pub fn with_default_api_key(mut self, key: impl Into<String>) -> Self {
        self.default_api_key = Some(key.into());
        self
    }
}

/// The orchestration façade.
pub struct Orchestrator {
    gateway: Arc<dyn Gateway>,
    registry: ModelRegistry,
    config: OrchestratorConfig,
}

impl Default for Orchestrator {
    fn default() -> Self {
        Self::new(Arc::new(OpenRouterGateway::default()))
    }
}

impl Orchestrator {
    /// Create an orchestrator over the given gateway with default configuration
    pub fn new(gateway: Arc<dyn Gateway>) -> Self {
        Self::with_config(gateway, OrchestratorConfig::default())
    }

    /// Create an orchestrator with explicit configuration
    pub fn with_config(gateway: Arc<dyn Gateway>, config: OrchestratorConfig) -> Self {
        Self {
            gateway,
            registry: ModelRegistry::new(),
            config,
        }
    }

    /// Run one full research round: concurrent fan-out, then synthesis over
    /// the successful subset.
    pub async fn run_research(
        &self,
        request: ResearchRequest,
    ) -> Result<ResearchResult, ResearchError> {
        validate_request(&request)?;
        let api_key = self.resolve_api_key(request.api_key.as_deref(), request.byok_mode)?;

        let descriptors = self.resolve_models(&request.model_ids);
        if descriptors.is_empty() {
            return Err(ResearchError::NoValidModels);
        }
        let orchestrator_model = self.resolve_orchestrator(&request.orchestrator_id)?;

        let started = Instant::now();
        let responses = executor::run_all(&*self.gateway, &descriptors, &request, &api_key).await;

        let successful: Vec<_> = responses.iter().filter(|r| r.success).collect();
        let success_count = successful.len();

        // A round with zero successes never pays for a synthesis call.
        let synthesis = if successful.is_empty() {
            tracing::warn!(models = descriptors.len(), "every model in the round failed");
            ALL_MODELS_FAILED_MESSAGE.to_string()
        } else {
            synthesis::synthesize(
                &*self.gateway,
                orchestrator_model,
                &request.query,
                &successful,
                &api_key,
            )
            .await?
        };

        let total_cost = responses.iter().map(|r| r.cost.amount).sum();
        let total_duration_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            models = responses.len(),
            successes = success_count,
            total_cost,
            total_duration_ms,
            "research round complete"
        );

        Ok(ResearchResult {
            query: request.query,
            model_count: responses.len(),
            success_count,
            responses,
            synthesis,
            total_duration_ms,
            total_cost,
            timestamp: Utc::now(),
            orchestrator: orchestrator_model.display_name.to_string(),
        })
    }

    /// Run a lightweight single-model follow-up turn.
    ///
    /// Skips the multi-model and synthesis machinery entirely; the optional
    /// compacted context from prior rounds is seeded as a system message ahead
    /// of the new query.
    pub async fn run_follow_up(
        &self,
        query: &str,
        compacted_context: Option<&str>,
        api_key: Option<&str>,
    ) -> Result<String, ResearchError> {
        let api_key = self.resolve_api_key(api_key, false)?;
        let model = self
            .registry
            .get(&self.config.follow_up_model_id)
            .ok_or(ResearchError::NoValidModels)?;

        let mut messages = Vec::with_capacity(2);
        if let Some(context) = compacted_context {
            messages.push(ChatMessage::system(format!(
                "Context from the earlier research conversation:\n\n{context}"
            )));
        }
        messages.push(ChatMessage::user(query));

        let response = self
            .gateway
            .generate(GenerateRequest {
                model_id: model.id.to_string(),
                messages,
                max_tokens: defaults::generation::FOLLOW_UP_MAX_TOKENS,
                reasoning: model.reasoning,
                api_key,
            })
            .await?;
        Ok(response.text)
    }

    /// Resolve the credential for a round: explicit key first, then the server
    /// default (unless BYOK mode makes the caller's key mandatory).
    fn resolve_api_key(
        &self,
        explicit: Option<&str>,
        byok_mode: bool,
    ) -> Result<String, ResearchError> {
        if let Some(key) = explicit.filter(|k| !k.is_empty()) {
            return Ok(key.to_string());
        }
        if byok_mode {
            return Err(ResearchError::MissingCredential);
        }
        self.config
            .default_api_key
            .clone()
            .filter(|k| !k.is_empty())
            .ok_or(ResearchError::MissingCredential)
    }

    fn resolve_models(&self, requested: &[String]) -> Vec<&'static ModelDescriptor> {
        if requested.is_empty() {
            self.registry.lookup(&self.config.default_model_ids)
        } else {
            self.registry.lookup(requested)
        }
    }

    fn resolve_orchestrator(
        &self,
        requested: &str,
    ) -> Result<&'static ModelDescriptor, ResearchError> {
        let id = if requested.is_empty() {
            &self.config.default_orchestrator_id
        } else {
            requested
        };
        self.registry
            .get(id)
            .or_else(|| self.registry.get(&self.config.default_orchestrator_id))
            .ok_or(ResearchError::NoValidModels)
    }
}

fn validate_request(request: &ResearchRequest) -> Result<(), ResearchError> {
    if request.images.len() > defaults::limits::MAX_IMAGES {
        return Err(ResearchError::InvalidInput(format!(
            "at most {} images may be attached, got {}",
            defaults::limits::MAX_IMAGES,
            request.images.len()
        )));
    }
    if request.model_ids.len() > defaults::limits::MAX_MODELS {
        return Err(ResearchError::InvalidInput(format!(
            "at most {} models may be selected, got {}",
            defaults::limits::MAX_MODELS,
            request.model_ids.len()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AttachedImage, ImageFormat};

    fn orchestrator_without_default_key() -> Orchestrator {
        let config = OrchestratorConfig {
            default_api_key: None,
            ..OrchestratorConfig::default()
        };
        Orchestrator::with_config(Arc::new(OpenRouterGateway::default()), config)
    }

    #[test]
    fn test_key_resolution_prefers_explicit() {
        let orchestrator = orchestrator_without_default_key();
        let key = orchestrator.resolve_api_key(Some("sk-caller"), true).unwrap();
        assert_eq!(key, "sk-caller");
    }

    #[test]
    fn test_byok_without_key_is_missing_credential() {
        let orchestrator = orchestrator_without_default_key();
        let err = orchestrator.resolve_api_key(None, true).unwrap_err();
        assert!(matches!(err, ResearchError::MissingCredential));
    }

    #[test]
    fn test_default_key_used_when_not_byok() {
        let config = OrchestratorConfig {
            default_api_key: Some("sk-server".to_string()),
            ..OrchestratorConfig::default()
        };
        let orchestrator =
            Orchestrator::with_config(Arc::new(OpenRouterGateway::default()), config);
        assert_eq!(
            orchestrator.resolve_api_key(None, false).unwrap(),
            "sk-server"
        );
    }

    #[test]
    fn test_too_many_images_rejected() {
        let mut request = ResearchRequest::new("q").with_api_key("sk");
        for _ in 0..5 {
            request = request.with_image(AttachedImage::new(ImageFormat::Png, "AAAA"));
        }
        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ResearchError::InvalidInput(_)));
    }

    #[test]
    fn test_too_many_models_rejected() {
        let ids: Vec<String> = (0..13).map(|i| format!("vendor/model-{i}")).collect();
        let request = ResearchRequest::new("q").with_models(ids);
        let err = validate_request(&request).unwrap_err();
        assert!(matches!(err, ResearchError::InvalidInput(_)));
    }
}
