//! # Conclave - Parallel Multi-Model Research Orchestration
//!
//! Conclave fans a research query out to multiple large-language-models in
//! parallel through a unified model-routing gateway, then issues one more
//! model call to synthesize the individual answers into a single unified
//! response.
//!
#![deny(unsafe_code)]

//! ## How a round works
//!
//! - **Fan-out**: one concurrent gateway call per selected model, each with a
//!   prompt tailored to the model's capabilities (vision-capable models get
//!   attached images, others get a textual notice instead).
//! - **Failure isolation**: a failing model becomes a failed entry in the
//!   result list; it never aborts or affects any sibling call.
//! - **Pricing**: each call's cost comes from reported token usage, falling
//!   back to a flagged text-length estimate when usage is absent.
//! - **Synthesis**: one additional call over the successful subset produces a
//!   consensus/disagreement/takeaways summary. When every model failed, the
//!   round short-circuits with a fixed failure message and pays for nothing.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use conclave::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Gateway credential comes from OPENROUTER_API_KEY unless supplied
//!     // on the request.
//!     let orchestrator = Orchestrator::default();
//!
//!     let request = ResearchRequest::new("Pros and cons of serverless architectures")
//!         .with_models(["openai/gpt-5.1", "x-ai/grok-4", "perplexity/sonar-pro"]);
//!
//!     let result = orchestrator.run_research(request).await?;
//!     println!("{}", result.synthesis);
//!     println!(
//!         "{}/{} models succeeded, ${:.4}",
//!         result.success_count, result.model_count, result.total_cost
//!     );
//!
//!     Ok(())
//! }
//! ```
//!
//! The orchestrator is stateless across rounds: follow-up turns re-supply a
//! compacted textual summary of prior rounds, owned by the caller.

pub mod defaults;
pub mod error;
pub mod executor;
pub mod gateway;
pub mod orchestrator;
pub mod pricing;
pub mod prompt;
pub mod registry;
pub mod synthesis;
pub mod types;

pub use error::ResearchError;
pub use orchestrator::{ALL_MODELS_FAILED_MESSAGE, Orchestrator, OrchestratorConfig};

/// Commonly used types, re-exported for convenience.
pub mod prelude {
    pub use crate::error::ResearchError;
    pub use crate::gateway::{
        Gateway, GenerateRequest, GenerateResponse, OpenRouterConfig, OpenRouterGateway,
    };
    pub use crate::orchestrator::{ALL_MODELS_FAILED_MESSAGE, Orchestrator, OrchestratorConfig};
    pub use crate::registry::{
        DEFAULT_ORCHESTRATOR_MODEL, DEFAULT_RESEARCH_MODELS, FOLLOW_UP_MODEL, ModelDescriptor,
        ModelRegistry, ReasoningConfig, ReasoningEffort,
    };
    pub use crate::types::{
        AttachedImage, CallCost, ChatMessage, ContentPart, ImageFormat, MessageContent,
        MessageRole, ModelResponse, ResearchRequest, ResearchResult, Usage,
    };
}
