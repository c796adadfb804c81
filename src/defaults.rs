//! Default Configuration Values
//!
//! This module centralizes all default values used throughout the crate.
//! Having defaults in one place makes them easier to maintain, document, and adjust.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for gateway calls.
    ///
    /// Research-grade models routinely take 20-60 seconds to respond, and the
    /// round only completes once the slowest model has settled, so this is
    /// deliberately generous.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// Default connection timeout for establishing HTTP connections.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for gateway requests.
    pub const USER_AGENT: &str = "conclave/0.1.0";
}

/// Gateway endpoint defaults
pub mod gateway {
    /// Default base URL of the model-routing gateway (OpenRouter).
    pub const BASE_URL: &str = "https://openrouter.ai/api/v1";

    /// Environment variable consulted for a server-default API key.
    pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";

    /// Attribution referer sent with every gateway request.
    pub const ATTRIBUTION_REFERER: &str = "https://github.com/conclave-rs/conclave";

    /// Attribution title sent with every gateway request.
    pub const ATTRIBUTION_TITLE: &str = "Conclave Research";
}

/// Generation limits for the different call kinds
pub mod generation {
    /// Completion budget for each fan-out research call.
    pub const RESEARCH_MAX_TOKENS: u32 = 2500;

    /// Completion budget for the single synthesis call.
    pub const SYNTHESIS_MAX_TOKENS: u32 = 1500;

    /// Completion budget for a follow-up turn.
    pub const FOLLOW_UP_MAX_TOKENS: u32 = 2000;
}

/// Request shape limits
pub mod limits {
    /// Maximum number of images attached to one research request.
    pub const MAX_IMAGES: usize = 4;

    /// Maximum number of models selected for one research round.
    pub const MAX_MODELS: usize = 12;

    /// Number of query characters echoed into the synthesis prompt.
    pub const QUERY_PREVIEW_CHARS: usize = 200;
}
