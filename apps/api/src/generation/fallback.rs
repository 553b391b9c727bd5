//! Fallback policy: turns a rate-limited upstream failure into a deterministic
//! mock response, and propagates every other failure untouched.

use serde::Serialize;
use tracing::warn;

use crate::llm_client::UpstreamError;

/// Provenance of a generated text: the real backend or the local mock path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Api,
    Mock,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationResult {
    pub text: String,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl GenerationResult {
    pub fn api(text: String) -> Self {
        Self {
            text,
            source: Source::Api,
            note: None,
        }
    }

    pub fn mock(text: String) -> Self {
        Self {
            text,
            source: Source::Mock,
            note: Some("rate limited".to_string()),
        }
    }

    /// Canned rule-table output: not AI-generated, so it carries the mock
    /// provenance marker, but without the rate-limit note.
    pub fn canned(text: String) -> Self {
        Self {
            text,
            source: Source::Mock,
            note: None,
        }
    }
}

/// Resolves a generation outcome against the fallback policy.
///
/// Success passes through with `source: api`. A rate-limit failure is absorbed
/// and replaced by the caller-supplied mock text with `source: mock`. Any other
/// failure propagates to the handler boundary.
pub fn resolve(
    outcome: Result<String, UpstreamError>,
    mock_text: String,
) -> Result<GenerationResult, UpstreamError> {
    match outcome {
        Ok(text) => Ok(GenerationResult::api(text)),
        Err(UpstreamError::RateLimited { message }) => {
            warn!("Upstream rate limited, serving mock response: {message}");
            Ok(GenerationResult::mock(mock_text))
        }
        Err(other) => Err(other),
    }
}

/// Mock title, templated from the original request fields.
pub fn mock_title(field_of_study: &str, keyword: &str, method: &str) -> String {
    format!(
        "{} Analysis Using {method} in {field_of_study}",
        title_case(keyword)
    )
}

/// Mock outline: a fixed canonical thesis skeleton.
pub fn mock_outline() -> String {
    "1. Introduction\n   1.1 Background\n   1.2 Research Question\n\
     2. Literature Review\n   2.1 Previous Studies\n   2.2 Theoretical Framework\n\
     3. Methodology\n   3.1 Research Design\n   3.2 Data Collection\n\
     4. Results\n   4.1 Key Findings\n   4.2 Analysis\n\
     5. Discussion\n   5.1 Implications\n   5.2 Limitations\n\
     6. Conclusion\n   6.1 Summary\n   6.2 Future Work"
        .to_string()
}

/// Mock method recommendation, templated from the first two keywords.
pub fn mock_method(keywords: &[String]) -> String {
    let topics = if keywords.is_empty() {
        "your topics".to_string()
    } else {
        keywords[..keywords.len().min(2)].join(", ")
    };

    format!(
        "Recommended Method: Mixed Methods Research\n\n\
         Explanation: For the research area involving {topics}, a mixed methods \
         approach combining both qualitative and quantitative data collection \
         would be most effective. This allows for:\n\
         - Quantitative analysis to establish patterns and statistical relationships\n\
         - Qualitative exploration to understand underlying mechanisms\n\
         - Triangulation for more robust findings"
    )
}

/// Uppercases the first letter of each whitespace-separated word.
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
