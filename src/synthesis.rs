//! Synthesis of the successful fan-out responses.
//!
//! One additional gateway call whose prompt quotes every successful response
//! verbatim. Failed models are excluded entirely; the synthesizer never sees
//! error strings, only content.

use crate::defaults;
use crate::error::ResearchError;
use crate::gateway::{Gateway, GenerateRequest};
use crate::registry::ModelDescriptor;
use crate::types::{ChatMessage, ModelResponse};

/// Fixed instructions appended to every synthesis prompt.
pub const SYNTHESIS_INSTRUCTIONS: &str = "Synthesize the responses above into a single unified \
answer. Identify where the models agree (consensus), where they disagree or contribute a unique \
insight, and close with actionable takeaways. Write 300-500 words in markdown.";

/// Build the single synthesis prompt from the successful responses.
pub fn build_prompt(query: &str, successful: &[&ModelResponse]) -> String {
    let preview: String = query
        .chars()
        .take(defaults::limits::QUERY_PREVIEW_CHARS)
        .collect();

    let mut prompt = format!(
        "Multiple AI models answered this research question:\n\n\"{preview}\"\n\n"
    );
    for response in successful {
        prompt.push_str(&format!("## {}\n\n{}\n\n---\n\n", response.model, response.content));
    }
    prompt.push_str(SYNTHESIS_INSTRUCTIONS);
    prompt
}

/// Issue the synthesis call.
///
/// Callers guarantee `successful` is non-empty; the façade short-circuits the
/// all-failed case before reaching here.
pub async fn synthesize(
    gateway: &dyn Gateway,
    orchestrator: &ModelDescriptor,
    query: &str,
    successful: &[&ModelResponse],
    api_key: &str,
) -> Result<String, ResearchError> {
    let prompt = build_prompt(query, successful);
    tracing::debug!(
        orchestrator = %orchestrator.id,
        sources = successful.len(),
        "dispatching synthesis call"
    );

    let response = gateway
        .generate(GenerateRequest {
            model_id: orchestrator.id.to_string(),
            messages: vec![ChatMessage::user(prompt)],
            max_tokens: defaults::generation::SYNTHESIS_MAX_TOKENS,
            reasoning: orchestrator.reasoning,
            api_key: api_key.to_string(),
        })
        .await
        .map_err(ResearchError::synthesis)?;

    Ok(response.text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(model: &str, content: &str) -> ModelResponse {
        ModelResponse::succeeded(model, "id", content, 100, None)
    }

    #[test]
    fn test_prompt_quotes_every_successful_response() {
        let first = success("GPT-5.1", "serverless scales to zero");
        let second = success("Grok 4", "cold starts remain a problem");
        let prompt = build_prompt("Pros and cons of serverless", &[&first, &second]);

        assert!(prompt.contains("Pros and cons of serverless"));
        assert!(prompt.contains("## GPT-5.1"));
        assert!(prompt.contains("serverless scales to zero"));
        assert!(prompt.contains("## Grok 4"));
        assert!(prompt.contains("cold starts remain a problem"));
        assert!(prompt.ends_with(SYNTHESIS_INSTRUCTIONS));
    }

    #[test]
    fn test_prompt_truncates_long_queries() {
        let query = "x".repeat(500);
        let first = success("GPT-5.1", "answer");
        let prompt = build_prompt(&query, &[&first]);
        assert!(prompt.contains(&"x".repeat(200)));
        assert!(!prompt.contains(&"x".repeat(201)));
    }
}
