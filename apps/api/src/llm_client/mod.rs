/// Generation client — the single point of entry for all Gemini API calls.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All generative-language interactions MUST go through this module.
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Upstream failure, classified so the fallback policy can distinguish a quota
/// signal from everything else. Exactly one attempt per request — no retries.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("rate limited by upstream: {message}")]
    RateLimited { message: String },

    #[error("upstream failure: {message}")]
    Other { message: String },
}

impl UpstreamError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, UpstreamError::RateLimited { .. })
    }
}

/// Seam between handlers and the generative backend. Task flows depend on this
/// trait so they can be exercised with test doubles instead of the network.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: CandidateContent,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Extracts the text of the first candidate's first text part.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()
            .and_then(|c| c.content.parts.iter().find_map(|p| p.text.as_deref()))
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    #[serde(default)]
    status: String,
}

/// Thin adapter over the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, timeout_secs: u64) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()?,
            api_key,
            model,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request_body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let url = format!("{GEMINI_API_BASE}/{}:generateContent", self.model);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&request_body)
            .send()
            .await
            .map_err(|e| UpstreamError::Other {
                message: e.to_string(),
            })?;

        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let (message, api_status) = match serde_json::from_str::<GeminiError>(&body) {
                Ok(e) => (e.error.message, e.error.status),
                Err(_) => (body, String::new()),
            };
            return Err(classify_failure(status.as_u16(), &api_status, message));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|e| UpstreamError::Other {
                message: format!("malformed upstream response: {e}"),
            })?;

        let text = parsed.text().ok_or_else(|| UpstreamError::Other {
            message: "upstream returned no text content".to_string(),
        })?;

        debug!("Gemini call succeeded ({} chars)", text.len());

        Ok(text.trim().to_string())
    }
}

/// Maps an upstream failure onto the rate-limit/other taxonomy. A 429, a
/// `RESOURCE_EXHAUSTED` status, or a quota-mentioning message all count as the
/// quota signal that triggers the mock fallback.
fn classify_failure(http_status: u16, api_status: &str, message: String) -> UpstreamError {
    if http_status == 429
        || api_status == "RESOURCE_EXHAUSTED"
        || message.to_lowercase().contains("quota")
    {
        UpstreamError::RateLimited { message }
    } else {
        UpstreamError::Other { message }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_429_as_rate_limited() {
        let err = classify_failure(429, "", "too many requests".to_string());
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_classify_resource_exhausted_as_rate_limited() {
        let err = classify_failure(403, "RESOURCE_EXHAUSTED", "limit reached".to_string());
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_classify_quota_message_as_rate_limited() {
        let err = classify_failure(400, "", "Quota exceeded for model".to_string());
        assert!(err.is_rate_limited());
    }

    #[test]
    fn test_classify_auth_failure_as_other() {
        let err = classify_failure(401, "UNAUTHENTICATED", "API key not valid".to_string());
        assert!(!err.is_rate_limited());
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "A Thesis Title"}]}}
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.text(), Some("A Thesis Title"));
    }

    #[test]
    fn test_response_text_empty_candidates() {
        let parsed: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.text(), None);
    }
}
