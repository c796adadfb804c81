//! Static model catalog.
//!
//! One immutable registry of the upstream models this crate knows how to fan
//! out to. Content is fixed at build time; adding a model means shipping a new
//! release, which is acceptable for a catalog (it is not a live feed).

use once_cell::sync::Lazy;
use serde::Serialize;

/// Reasoning effort level passed to effort-configurable models.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    Low,
    High,
}

impl ReasoningEffort {
    /// Wire value for the gateway's `reasoning.effort` field
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::High => "high",
        }
    }
}

/// Per-model reasoning configuration.
///
/// A tagged variant rather than loose string flags, so that the mapping to
/// provider metadata is a single exhaustive match and a newly added mode
/// cannot be silently ignored.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningConfig {
    /// Model takes no reasoning parameter
    #[default]
    None,
    /// Model takes a boolean reasoning toggle
    Enabled,
    /// Model takes a reasoning-effort level
    Effort(ReasoningEffort),
}

impl ReasoningConfig {
    /// Map this configuration to the gateway's `reasoning` request field.
    ///
    /// Returns `None` when the field should be omitted entirely.
    pub fn to_request_value(&self) -> Option<serde_json::Value> {
        match self {
            Self::None => None,
            Self::Enabled => Some(serde_json::json!({ "enabled": true })),
            Self::Effort(effort) => Some(serde_json::json!({ "effort": effort.as_str() })),
        }
    }
}

/// Immutable catalog entry for one upstream model.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ModelDescriptor {
    /// Upstream model identifier (gateway namespace, e.g. `openai/gpt-5.1`)
    pub id: &'static str,
    /// Human-readable name used in results and synthesis section headings
    pub display_name: &'static str,
    /// Whether the model accepts image input
    pub supports_vision: bool,
    /// Relative cost tier, 0 (cheapest) to 5; a UI hint only
    pub cost_tier: u8,
    /// Reasoning parameter configuration for this model
    pub reasoning: ReasoningConfig,
}

/// Model ids fanned out to when the caller selects none.
pub const DEFAULT_RESEARCH_MODELS: &[&str] = &[
    "openai/gpt-5.1",
    "anthropic/claude-sonnet-4.5",
    "google/gemini-2.5-pro",
    "x-ai/grok-4",
    "perplexity/sonar-pro",
];

/// Model id used for synthesis when the caller selects no orchestrator.
pub const DEFAULT_ORCHESTRATOR_MODEL: &str = "anthropic/claude-sonnet-4.5";

/// Fast, cheap model used for follow-up turns.
pub const FOLLOW_UP_MODEL: &str = "google/gemini-2.5-flash";

static CATALOG: Lazy<Vec<ModelDescriptor>> = Lazy::new(|| {
    use ReasoningConfig::{Effort, Enabled, None};
    use ReasoningEffort::{High, Low};

    vec![
        ModelDescriptor {
            id: "openai/gpt-5.1",
            display_name: "GPT-5.1",
            supports_vision: true,
            cost_tier: 4,
            reasoning: Effort(Low),
        },
        ModelDescriptor {
            id: "anthropic/claude-sonnet-4.5",
            display_name: "Claude Sonnet 4.5",
            supports_vision: true,
            cost_tier: 3,
            reasoning: Enabled,
        },
        ModelDescriptor {
            id: "anthropic/claude-opus-4.1",
            display_name: "Claude Opus 4.1",
            supports_vision: true,
            cost_tier: 5,
            reasoning: Enabled,
        },
        ModelDescriptor {
            id: "google/gemini-2.5-pro",
            display_name: "Gemini 2.5 Pro",
            supports_vision: true,
            cost_tier: 3,
            reasoning: None,
        },
        ModelDescriptor {
            id: "google/gemini-2.5-flash",
            display_name: "Gemini 2.5 Flash",
            supports_vision: true,
            cost_tier: 1,
            reasoning: None,
        },
        ModelDescriptor {
            id: "x-ai/grok-4",
            display_name: "Grok 4",
            supports_vision: true,
            cost_tier: 4,
            reasoning: None,
        },
        // Sonar models search the web natively through the gateway.
        ModelDescriptor {
            id: "perplexity/sonar-pro",
            display_name: "Perplexity Sonar Pro",
            supports_vision: false,
            cost_tier: 2,
            reasoning: None,
        },
        ModelDescriptor {
            id: "perplexity/sonar-reasoning-pro",
            display_name: "Perplexity Sonar Reasoning Pro",
            supports_vision: false,
            cost_tier: 2,
            reasoning: Effort(High),
        },
        ModelDescriptor {
            id: "deepseek/deepseek-chat-v3.1",
            display_name: "DeepSeek V3.1",
            supports_vision: false,
            cost_tier: 0,
            reasoning: None,
        },
        ModelDescriptor {
            id: "deepseek/deepseek-r1",
            display_name: "DeepSeek R1",
            supports_vision: false,
            cost_tier: 1,
            reasoning: Enabled,
        },
        ModelDescriptor {
            id: "meta-llama/llama-4-maverick",
            display_name: "Llama 4 Maverick",
            supports_vision: true,
            cost_tier: 0,
            reasoning: None,
        },
        ModelDescriptor {
            id: "mistralai/mistral-large-2411",
            display_name: "Mistral Large",
            supports_vision: false,
            cost_tier: 2,
            reasoning: None,
        },
    ]
});

/// Lookup facade over the static catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModelRegistry;

impl ModelRegistry {
    /// Create a registry handle
    pub const fn new() -> Self {
        Self
    }

    /// All catalog entries
    pub fn all(&self) -> &'static [ModelDescriptor] {
        &CATALOG
    }

    /// Look up one model by id
    pub fn get(&self, id: &str) -> Option<&'static ModelDescriptor> {
        CATALOG.iter().find(|m| m.id == id)
    }

    /// Resolve a list of ids to descriptors, preserving order.
    ///
    /// Unknown ids are filtered out rather than failing; callers reject the
    /// round if the result is empty.
    pub fn lookup(&self, ids: &[String]) -> Vec<&'static ModelDescriptor> {
        ids.iter().filter_map(|id| self.get(id)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_filters_unknown_ids() {
        let registry = ModelRegistry::new();
        let ids = vec![
            "openai/gpt-5.1".to_string(),
            "acme/imaginary-model".to_string(),
            "x-ai/grok-4".to_string(),
        ];
        let found = registry.lookup(&ids);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, "openai/gpt-5.1");
        assert_eq!(found[1].id, "x-ai/grok-4");
    }

    #[test]
    fn test_default_models_exist_in_catalog() {
        let registry = ModelRegistry::new();
        for id in DEFAULT_RESEARCH_MODELS {
            assert!(registry.get(id).is_some(), "default model {id} missing");
        }
        assert!(registry.get(DEFAULT_ORCHESTRATOR_MODEL).is_some());
        assert!(registry.get(FOLLOW_UP_MODEL).is_some());
    }

    #[test]
    fn test_reasoning_wire_mapping() {
        assert_eq!(ReasoningConfig::None.to_request_value(), None);
        assert_eq!(
            ReasoningConfig::Enabled.to_request_value(),
            Some(serde_json::json!({ "enabled": true }))
        );
        assert_eq!(
            ReasoningConfig::Effort(ReasoningEffort::High).to_request_value(),
            Some(serde_json::json!({ "effort": "high" }))
        );
        assert_eq!(
            ReasoningConfig::Effort(ReasoningEffort::Low).to_request_value(),
            Some(serde_json::json!({ "effort": "low" }))
        );
    }
}
