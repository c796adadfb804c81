//! Per-model prompt construction.
//!
//! Every model in a round receives the same research instructions; what varies
//! is how attached images are presented. Vision-capable models get real image
//! parts, non-vision models get a plain-text notice instead, and the rest of
//! the round is unaffected either way.

use crate::registry::ModelDescriptor;
use crate::types::{ChatMessage, ContentPart, ResearchRequest};

/// Fixed research instructions prepended to every fan-out call.
pub const RESEARCH_SYSTEM_PROMPT: &str = "You are a research assistant. Provide a thorough, \
well-reasoned answer to the user's question in roughly 400-600 words. Format your answer in \
markdown with clear headings and bullet points where they help. Cite sources for factual \
claims whenever you can, and use web search if it is available to you to ground your answer \
in current information.";

/// Build the plain-text notice shown to non-vision models when images are attached.
fn vision_fallback_notice(image_count: usize) -> String {
    format!("[Note: {image_count} image(s) attached but not visible to this model]")
}

/// Build the exact message sequence for one model.
///
/// Non-vision models never error over attached images; they receive a textual
/// notice and no image payloads, while vision-capable models in the same round
/// still get the images.
pub fn build_messages(descriptor: &ModelDescriptor, request: &ResearchRequest) -> Vec<ChatMessage> {
    let mut messages = vec![ChatMessage::system(RESEARCH_SYSTEM_PROMPT)];

    if request.images.is_empty() {
        messages.push(ChatMessage::user(request.query.clone()));
    } else if descriptor.supports_vision {
        let mut parts = Vec::with_capacity(1 + request.images.len());
        parts.push(ContentPart::text(request.query.clone()));
        for image in &request.images {
            parts.push(ContentPart::image_data_uri(image.data_uri()));
        }
        messages.push(ChatMessage::user_with_parts(parts));
    } else {
        let notice = vision_fallback_notice(request.images.len());
        messages.push(ChatMessage::user(format!("{notice}\n\n{}", request.query)));
    }

    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ModelRegistry;
    use crate::types::{AttachedImage, ImageFormat};

    fn vision_model() -> &'static ModelDescriptor {
        ModelRegistry::new().get("openai/gpt-5.1").unwrap()
    }

    fn text_only_model() -> &'static ModelDescriptor {
        let model = ModelRegistry::new().get("perplexity/sonar-pro").unwrap();
        assert!(!model.supports_vision);
        model
    }

    fn request_with_images(count: usize) -> ResearchRequest {
        let mut request = ResearchRequest::new("What changed in Rust 1.85?");
        for _ in 0..count {
            request = request.with_image(AttachedImage::new(ImageFormat::Jpeg, "Zm9v"));
        }
        request
    }

    #[test]
    fn test_system_prompt_always_first() {
        let messages = build_messages(vision_model(), &ResearchRequest::new("q"));
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content.text(), Some(RESEARCH_SYSTEM_PROMPT));
    }

    #[test]
    fn test_vision_model_receives_image_parts() {
        let messages = build_messages(vision_model(), &request_with_images(2));
        let parts = messages[1].content.as_multimodal().unwrap();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], ContentPart::text("What changed in Rust 1.85?"));
        assert!(parts[1].is_image());
        assert!(parts[2].is_image());
    }

    #[test]
    fn test_non_vision_model_gets_notice_and_no_images() {
        let messages = build_messages(text_only_model(), &request_with_images(2));
        assert!(!messages[1].content.has_images());
        let text = messages[1].content.text().unwrap();
        assert!(text.contains("2 image(s) attached but not visible"));
        assert!(text.contains("What changed in Rust 1.85?"));
    }

    #[test]
    fn test_no_images_means_plain_text_user_message() {
        let messages = build_messages(text_only_model(), &ResearchRequest::new("plain"));
        assert_eq!(messages[1].content.text(), Some("plain"));
        assert!(messages[1].content.as_multimodal().is_none());
    }
}
