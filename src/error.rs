//! Error handling for the research orchestration core.
//!
//! The taxonomy separates errors that fail a whole round before any upstream
//! call (`MissingCredential`, `NoValidModels`, `InvalidInput`), transport and
//! protocol errors surfaced by the gateway, and the synthesis-call failure,
//! which wraps its cause so callers can distinguish it from fan-out problems.
//! A single model's failure during fan-out is never an error at this level;
//! it is recorded as data on the corresponding [`ModelResponse`].
//!
//! [`ModelResponse`]: crate::types::ModelResponse

use thiserror::Error;

/// Errors produced by the orchestration core.
#[derive(Error, Debug)]
pub enum ResearchError {
    /// No usable API key was available at round start.
    #[error("No API key available: pass one explicitly or configure a server default")]
    MissingCredential,

    /// The resolved model id list was empty after filtering against the registry.
    #[error("No valid models selected")]
    NoValidModels,

    /// The request violated a shape constraint before any upstream call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(String),

    /// The gateway returned a non-success status.
    #[error("API error {code}: {message}")]
    ApiError {
        /// HTTP status code returned by the gateway.
        code: u16,
        /// Error message extracted from the response body.
        message: String,
    },

    /// The gateway returned a 2xx response the core could not interpret.
    #[error("Malformed gateway response: {0}")]
    MalformedResponse(String),

    /// The single synthesis call failed.
    ///
    /// Distinct from a per-model fan-out failure: there is no fallback
    /// synthesis path, so this propagates out of `run_research`.
    #[error("Synthesis call failed: {0}")]
    SynthesisFailed(#[source] Box<ResearchError>),
}

impl ResearchError {
    /// Wrap an error as a synthesis failure.
    pub fn synthesis(cause: ResearchError) -> Self {
        Self::SynthesisFailed(Box::new(cause))
    }
}

impl From<reqwest::Error> for ResearchError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for ResearchError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: ResearchError = json_err.into();
        assert!(matches!(err, ResearchError::JsonError(_)));
    }

    #[test]
    fn test_synthesis_wraps_cause() {
        let err = ResearchError::synthesis(ResearchError::ApiError {
            code: 502,
            message: "upstream unavailable".to_string(),
        });
        let text = err.to_string();
        assert!(text.starts_with("Synthesis call failed"));
        assert!(matches!(err, ResearchError::SynthesisFailed(_)));
    }
}
