//! Per-call cost accounting.
//!
//! The gateway does not uniformly report token usage, so cost degrades in two
//! steps: exact cost from reported usage, then an estimate from text length
//! (≈4 characters per token), and finally zero. An estimated cost is always
//! flagged so downstream consumers can render it as approximate.

use crate::types::{CallCost, Usage};

/// Per-model rates in USD per million tokens: (model id, input rate, output rate).
///
/// A rate pair of 0/0 marks a genuinely free model, which is distinct from a
/// model missing from this table.
const RATES: &[(&str, f64, f64)] = &[
    ("openai/gpt-5.1", 1.25, 10.0),
    ("anthropic/claude-sonnet-4.5", 3.0, 15.0),
    ("anthropic/claude-opus-4.1", 15.0, 75.0),
    ("google/gemini-2.5-pro", 1.25, 10.0),
    ("google/gemini-2.5-flash", 0.30, 2.50),
    ("x-ai/grok-4", 3.0, 15.0),
    ("perplexity/sonar-pro", 3.0, 15.0),
    ("perplexity/sonar-reasoning-pro", 2.0, 8.0),
    ("deepseek/deepseek-chat-v3.1", 0.27, 1.10),
    ("deepseek/deepseek-r1", 0.55, 2.19),
    ("meta-llama/llama-4-maverick", 0.20, 0.60),
    ("mistralai/mistral-large-2411", 2.0, 6.0),
];

fn rates_for(model_id: &str) -> Option<(f64, f64)> {
    RATES
        .iter()
        .find(|(id, _, _)| *id == model_id)
        .map(|(_, input, output)| (*input, *output))
}

/// Compute the cost of a call from reported token usage.
///
/// Returns 0 for an unknown model or missing usage; a pricing gap never fails
/// a round.
pub fn calculate_cost(model_id: &str, usage: Option<&Usage>) -> f64 {
    let (Some((input_rate, output_rate)), Some(usage)) = (rates_for(model_id), usage) else {
        return 0.0;
    };
    (f64::from(usage.prompt_tokens) * input_rate + f64::from(usage.completion_tokens) * output_rate)
        / 1_000_000.0
}

/// Approximate the cost of a call from its input and output text.
///
/// Token counts are approximated as `ceil(characters / 4)`. Returns `None`
/// for an unknown model or a genuinely free one (0/0 rates) so callers can
/// tell "free" apart from "we have no idea".
pub fn estimate_cost_from_text(model_id: &str, input_text: &str, output_text: &str) -> Option<CallCost> {
    let (input_rate, output_rate) = rates_for(model_id)?;
    if input_rate == 0.0 && output_rate == 0.0 {
        return None;
    }
    let input_tokens = approx_tokens(input_text);
    let output_tokens = approx_tokens(output_text);
    let amount = (input_tokens * input_rate + output_tokens * output_rate) / 1_000_000.0;
    Some(CallCost::estimated(amount))
}

fn approx_tokens(text: &str) -> f64 {
    (text.chars().count() as f64 / 4.0).ceil()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calculate_cost_with_usage() {
        let usage = Usage::new(1_000_000, 1_000_000);
        let cost = calculate_cost("anthropic/claude-sonnet-4.5", Some(&usage));
        assert!((cost - 18.0).abs() < 1e-9);
    }

    #[test]
    fn test_calculate_cost_unknown_model_is_zero() {
        let usage = Usage::new(1000, 1000);
        assert_eq!(calculate_cost("acme/imaginary-model", Some(&usage)), 0.0);
    }

    #[test]
    fn test_calculate_cost_missing_usage_is_zero() {
        assert_eq!(calculate_cost("openai/gpt-5.1", None), 0.0);
    }

    #[test]
    fn test_estimate_is_flagged() {
        let cost = estimate_cost_from_text("openai/gpt-5.1", "a".repeat(400).as_str(), "b")
            .expect("known model should estimate");
        assert!(cost.is_estimate);
        // 100 input tokens at $1.25/M plus 1 output token at $10/M
        let expected = (100.0 * 1.25 + 1.0 * 10.0) / 1_000_000.0;
        assert!((cost.amount - expected).abs() < 1e-12);
    }

    #[test]
    fn test_estimate_unknown_model_is_none() {
        assert!(estimate_cost_from_text("acme/imaginary-model", "in", "out").is_none());
    }

    #[test]
    fn test_token_approximation_rounds_up() {
        assert_eq!(approx_tokens(""), 0.0);
        assert_eq!(approx_tokens("abc"), 1.0);
        assert_eq!(approx_tokens("abcde"), 2.0);
    }
}
