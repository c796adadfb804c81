//! Concurrent fan-out over the selected models.
//!
//! One gateway call per descriptor, all issued at once and joined with
//! wait-for-all semantics. A failure in one call is downgraded to data on its
//! own result slot and can never abort or affect a sibling call; that
//! isolation is the central correctness property of the whole system.

use std::time::Instant;

use futures::future::join_all;

use crate::defaults;
use crate::gateway::{Gateway, GenerateRequest};
use crate::pricing;
use crate::prompt;
use crate::registry::ModelDescriptor;
use crate::types::{CallCost, ChatMessage, ModelResponse, ResearchRequest};

/// Fan out one gateway call per descriptor.
///
/// The returned list has one entry per input descriptor in input order,
/// regardless of completion order.
pub async fn run_all(
    gateway: &dyn Gateway,
    descriptors: &[&'static ModelDescriptor],
    request: &ResearchRequest,
    api_key: &str,
) -> Vec<ModelResponse> {
    let calls = descriptors
        .iter()
        .copied()
        .map(|descriptor| call_one(gateway, descriptor, request, api_key));
    join_all(calls).await
}

/// Issue a single model's call and convert either outcome into a
/// [`ModelResponse`]. Never returns an error.
async fn call_one(
    gateway: &dyn Gateway,
    descriptor: &'static ModelDescriptor,
    request: &ResearchRequest,
    api_key: &str,
) -> ModelResponse {
    let messages = prompt::build_messages(descriptor, request);
    let input_text = prompt_text(&messages);

    let generate = GenerateRequest {
        model_id: descriptor.id.to_string(),
        messages,
        max_tokens: defaults::generation::RESEARCH_MAX_TOKENS,
        reasoning: descriptor.reasoning,
        api_key: api_key.to_string(),
    };

    let started = Instant::now();
    let outcome = gateway.generate(generate).await;
    let duration_ms = started.elapsed().as_millis() as u64;

    match outcome {
        Ok(response) => {
            let mut result = ModelResponse::succeeded(
                descriptor.display_name,
                descriptor.id,
                response.text,
                duration_ms,
                response.usage,
            );
            result.cost = attach_cost(descriptor.id, &result, &input_text);
            result
        }
        Err(error) => {
            tracing::warn!(
                model = %descriptor.id,
                error = %error,
                duration_ms,
                "model call failed"
            );
            ModelResponse::failed(
                descriptor.display_name,
                descriptor.id,
                error.to_string(),
                duration_ms,
            )
        }
    }
}

/// Cost for a successful call: exact when usage was reported, otherwise a
/// flagged text-length estimate, otherwise zero.
fn attach_cost(model_id: &str, response: &ModelResponse, input_text: &str) -> CallCost {
    if response.usage.is_some() {
        return CallCost::measured(pricing::calculate_cost(model_id, response.usage.as_ref()));
    }
    pricing::estimate_cost_from_text(model_id, input_text, &response.content)
        .unwrap_or(CallCost::zero())
}

/// Flatten the prompt's text for cost estimation.
fn prompt_text(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter_map(|m| m.content.text())
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ResearchError;
    use crate::gateway::GenerateResponse;
    use crate::registry::ModelRegistry;
    use crate::types::Usage;
    use async_trait::async_trait;

    struct ScriptedGateway;

    #[async_trait]
    impl Gateway for ScriptedGateway {
        async fn generate(
            &self,
            request: GenerateRequest,
        ) -> Result<GenerateResponse, ResearchError> {
            match request.model_id.as_str() {
                "openai/gpt-5.1" => Ok(GenerateResponse {
                    text: "with usage".to_string(),
                    usage: Some(Usage::new(100, 200)),
                }),
                "x-ai/grok-4" => Ok(GenerateResponse {
                    text: "without usage".to_string(),
                    usage: None,
                }),
                _ => Err(ResearchError::ApiError {
                    code: 500,
                    message: "provider exploded".to_string(),
                }),
            }
        }
    }

    fn descriptors(ids: &[&str]) -> Vec<&'static ModelDescriptor> {
        let registry = ModelRegistry::new();
        ids.iter().map(|id| registry.get(id).unwrap()).collect()
    }

    #[tokio::test]
    async fn test_cost_measured_when_usage_reported() {
        let request = ResearchRequest::new("q");
        let responses = run_all(
            &ScriptedGateway,
            &descriptors(&["openai/gpt-5.1"]),
            &request,
            "sk",
        )
        .await;
        assert!(responses[0].success);
        assert!(!responses[0].cost.is_estimate);
        assert!(responses[0].cost.amount > 0.0);
    }

    #[tokio::test]
    async fn test_cost_estimated_when_usage_absent() {
        let request = ResearchRequest::new("q");
        let responses = run_all(
            &ScriptedGateway,
            &descriptors(&["x-ai/grok-4"]),
            &request,
            "sk",
        )
        .await;
        assert!(responses[0].success);
        assert!(responses[0].cost.is_estimate);
        assert!(responses[0].cost.amount > 0.0);
    }

    #[tokio::test]
    async fn test_failure_becomes_data_not_error() {
        let request = ResearchRequest::new("q");
        let responses = run_all(
            &ScriptedGateway,
            &descriptors(&["deepseek/deepseek-r1"]),
            &request,
            "sk",
        )
        .await;
        assert!(!responses[0].success);
        let error = responses[0].error.as_deref().unwrap();
        assert!(error.contains("provider exploded"));
        assert_eq!(responses[0].cost, CallCost::zero());
    }
}
