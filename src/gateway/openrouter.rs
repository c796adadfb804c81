//! OpenRouter gateway client.
//!
//! Speaks the OpenAI-compatible `POST /chat/completions` wire format. The base
//! URL is configurable so tests can point the client at a local mock server.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::{Gateway, GenerateRequest, GenerateResponse};
use crate::defaults;
use crate::error::ResearchError;
use crate::types::{ChatMessage, ContentPart, MessageContent, MessageRole, Usage};

/// OpenRouter client configuration.
#[derive(Debug, Clone)]
pub struct OpenRouterConfig {
    /// Base URL of the gateway API
    pub base_url: String,
    /// Attribution referer header (`HTTP-Referer`)
    pub referer: String,
    /// Attribution title header (`X-Title`)
    pub title: String,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::gateway::BASE_URL.to_string(),
            referer: defaults::gateway::ATTRIBUTION_REFERER.to_string(),
            title: defaults::gateway::ATTRIBUTION_TITLE.to_string(),
        }
    }
}

impl OpenRouterConfig {
    /// Override the gateway base URL (primarily for tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

/// Gateway implementation backed by OpenRouter's chat completions endpoint.
#[derive(Debug, Clone)]
pub struct OpenRouterGateway {
    config: OpenRouterConfig,
    client: reqwest::Client,
}

impl Default for OpenRouterGateway {
    fn default() -> Self {
        Self::new(OpenRouterConfig::default())
    }
}

impl OpenRouterGateway {
    /// Create a gateway client with the given configuration.
    ///
    /// Panics if the TLS backend cannot be initialized; a client without the
    /// configured timeouts must never be substituted silently.
    pub fn new(config: OpenRouterConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(defaults::http::REQUEST_TIMEOUT)
            .connect_timeout(defaults::http::CONNECT_TIMEOUT)
            .user_agent(defaults::http::USER_AGENT)
            .build()
            .expect("failed to build gateway HTTP client");
        Self { config, client }
    }

    fn chat_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_body(request: &GenerateRequest) -> serde_json::Value {
        let mut body = json!({
            "model": request.model_id,
            "messages": convert_messages(&request.messages),
            "max_tokens": request.max_tokens,
        });
        if let Some(reasoning) = request.reasoning.to_request_value() {
            body["reasoning"] = reasoning;
        }
        body
    }
}

#[async_trait]
impl Gateway for OpenRouterGateway {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ResearchError> {
        let body = Self::build_body(&request);
        tracing::debug!(model = %request.model_id, "dispatching gateway request");

        let response = self
            .client
            .post(self.chat_url())
            .bearer_auth(&request.api_key)
            .header("HTTP-Referer", &self.config.referer)
            .header("X-Title", &self.config.title)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(ResearchError::ApiError {
                code: status.as_u16(),
                message: extract_error_message(&text),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let text = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                ResearchError::MalformedResponse("response carried no message content".to_string())
            })?;

        Ok(GenerateResponse {
            text,
            usage: completion.usage.map(Into::into),
        })
    }
}

/// Convert unified messages to the OpenAI-compatible wire format.
fn convert_messages(messages: &[ChatMessage]) -> Vec<serde_json::Value> {
    messages
        .iter()
        .map(|message| {
            let role = match message.role {
                MessageRole::System => "system",
                MessageRole::User => "user",
                MessageRole::Assistant => "assistant",
            };
            let content = match &message.content {
                MessageContent::Text(text) => json!(text),
                MessageContent::MultiModal(parts) => json!(
                    parts
                        .iter()
                        .map(|part| match part {
                            ContentPart::Text { text } => json!({
                                "type": "text",
                                "text": text,
                            }),
                            ContentPart::Image { url } => json!({
                                "type": "image_url",
                                "image_url": { "url": url },
                            }),
                        })
                        .collect::<Vec<_>>()
                ),
            };
            json!({ "role": role, "content": content })
        })
        .collect()
}

/// Pull a human-readable message out of a gateway error body, falling back to
/// the raw body.
fn extract_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }
    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) if body.trim().is_empty() => "no error body".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: WireMessage,
}

#[derive(Debug, Deserialize)]
struct WireMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    #[serde(default)]
    prompt_tokens: u32,
    #[serde(default)]
    completion_tokens: u32,
    #[serde(default)]
    total_tokens: u32,
}

impl From<WireUsage> for Usage {
    fn from(wire: WireUsage) -> Self {
        Self {
            prompt_tokens: wire.prompt_tokens,
            completion_tokens: wire.completion_tokens,
            total_tokens: wire.total_tokens,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ReasoningConfig, ReasoningEffort};

    fn request(reasoning: ReasoningConfig) -> GenerateRequest {
        GenerateRequest {
            model_id: "openai/gpt-5.1".to_string(),
            messages: vec![ChatMessage::user("hi")],
            max_tokens: 2500,
            reasoning,
            api_key: "sk-test".to_string(),
        }
    }

    #[test]
    fn test_body_omits_reasoning_when_unconfigured() {
        let body = OpenRouterGateway::build_body(&request(ReasoningConfig::None));
        assert!(body.get("reasoning").is_none());
        assert_eq!(body["model"], "openai/gpt-5.1");
        assert_eq!(body["max_tokens"], 2500);
    }

    #[test]
    fn test_body_carries_reasoning_effort() {
        let body =
            OpenRouterGateway::build_body(&request(ReasoningConfig::Effort(ReasoningEffort::Low)));
        assert_eq!(body["reasoning"], json!({ "effort": "low" }));
    }

    #[test]
    fn test_multimodal_message_wire_shape() {
        let messages = vec![ChatMessage::user_with_parts(vec![
            ContentPart::text("look"),
            ContentPart::image_data_uri("data:image/png;base64,AAAA"),
        ])];
        let wire = convert_messages(&messages);
        assert_eq!(wire[0]["content"][0]["type"], "text");
        assert_eq!(wire[0]["content"][1]["type"], "image_url");
        assert_eq!(
            wire[0]["content"][1]["image_url"]["url"],
            "data:image/png;base64,AAAA"
        );
    }

    #[test]
    fn test_client_construction_keeps_configuration() {
        let gateway = OpenRouterGateway::new(
            OpenRouterConfig::default().with_base_url("http://localhost:1/"),
        );
        assert_eq!(gateway.chat_url(), "http://localhost:1/chat/completions");
    }

    #[test]
    fn test_error_message_extraction() {
        let body = r#"{"error":{"message":"Invalid model id","code":400}}"#;
        assert_eq!(extract_error_message(body), "Invalid model id");
        assert_eq!(extract_error_message(""), "no error body");
        assert_eq!(extract_error_message("boom"), "boom");
    }
}
