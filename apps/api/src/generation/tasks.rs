//! Per-task generation flows: prompt → generation client → fallback policy,
//! with the rule-table short-circuit for method recommendation.
//!
//! Flows depend on `TextGenerator` rather than the concrete Gemini client so
//! the rate-limit and short-circuit branches are unit-testable offline.

use crate::generation::fallback::{self, GenerationResult};
use crate::generation::{prompts, rules};
use crate::llm_client::{TextGenerator, UpstreamError};

pub async fn generate_title(
    generator: &dyn TextGenerator,
    field_of_study: &str,
    keyword: &str,
    method: &str,
) -> Result<GenerationResult, UpstreamError> {
    let prompt = prompts::title_prompt(field_of_study, keyword, method);
    let outcome = generator.generate(&prompt).await;
    fallback::resolve(outcome, fallback::mock_title(field_of_study, keyword, method))
}

pub async fn generate_outline(
    generator: &dyn TextGenerator,
    title: &str,
    field_of_study: &str,
) -> Result<GenerationResult, UpstreamError> {
    let prompt = prompts::outline_prompt(title, field_of_study);
    let outcome = generator.generate(&prompt).await;
    fallback::resolve(outcome, fallback::mock_outline())
}

/// Rule table first; only on a miss does the flow reach the generation client.
pub async fn recommend_method(
    generator: &dyn TextGenerator,
    keywords: &[String],
) -> Result<GenerationResult, UpstreamError> {
    if let Some(canned) = rules::lookup(keywords) {
        return Ok(GenerationResult::canned(canned.to_string()));
    }

    let prompt = prompts::method_prompt(keywords);
    let outcome = generator.generate(&prompt).await;
    fallback::resolve(outcome, fallback::mock_method(keywords))
}
