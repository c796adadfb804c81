//! Core data types for research orchestration.

mod chat;
mod common;
mod research;

pub use chat::{ChatMessage, ContentPart, MessageContent, MessageRole};
pub use common::Usage;
pub use research::{
    AttachedImage, CallCost, ImageFormat, ModelResponse, ResearchRequest, ResearchResult,
};
