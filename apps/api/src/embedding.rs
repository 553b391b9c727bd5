//! Embedding client: remote sentence-embedding backend with a deterministic
//! degraded mode so the endpoint never hard-fails.
//!
//! Degraded vectors are derived from character codes and carry no semantic
//! meaning; the response's `mode` field keeps the distinction visible to
//! downstream consumers.

use axum::{extract::State, Json};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{require_fields, AppError};
use crate::state::AppState;

/// Which backend produced a vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EmbeddingMode {
    /// Real embedding model behind `EMBEDDING_URL`.
    Model,
    /// Deterministic placeholder transform, no semantic meaning.
    Degraded,
}

#[derive(Clone)]
pub struct EmbeddingClient {
    client: Client,
    backend_url: Option<String>,
    dim: usize,
}

#[derive(Debug, Serialize)]
struct BackendRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct BackendResponse {
    embedding: Vec<f32>,
}

impl EmbeddingClient {
    pub fn new(
        backend_url: Option<String>,
        dim: usize,
        timeout_secs: u64,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(timeout_secs))
                .build()?,
            backend_url,
            dim,
        })
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Embeds `text`, preferring the configured backend and recovering into
    /// degraded mode on any backend failure. Never fails the request.
    pub async fn embed(&self, text: &str) -> (Vec<f32>, EmbeddingMode) {
        if let Some(url) = &self.backend_url {
            match self.embed_remote(url, text).await {
                Ok(vector) => return (vector, EmbeddingMode::Model),
                Err(e) => {
                    warn!("Embedding backend unavailable, degrading: {e}");
                }
            }
        }

        (degraded_vector(text, self.dim), EmbeddingMode::Degraded)
    }

    async fn embed_remote(&self, url: &str, text: &str) -> anyhow::Result<Vec<f32>> {
        let response = self
            .client
            .post(url)
            .json(&BackendRequest { text })
            .send()
            .await?
            .error_for_status()?;

        let body: BackendResponse = response.json().await?;
        Ok(body.embedding)
    }
}

/// Deterministic placeholder transform: character codes as floats, truncated
/// or zero-padded to exactly `dim` entries.
pub fn degraded_vector(text: &str, dim: usize) -> Vec<f32> {
    let mut vector: Vec<f32> = text.chars().take(dim).map(|c| c as u32 as f32).collect();
    vector.resize(dim, 0.0);
    vector
}

// ────────────────────────────────────────────────────────────────────────────
// Handler
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct EmbeddingRequest {
    pub text: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingResponse {
    pub embedding: Vec<f32>,
    pub mode: EmbeddingMode,
}

/// POST /embedding
pub async fn handle_embedding(
    State(state): State<AppState>,
    Json(req): Json<EmbeddingRequest>,
) -> Result<Json<EmbeddingResponse>, AppError> {
    require_fields(&[("text", req.text.as_deref())])?;
    let text = req.text.unwrap_or_default();

    let (embedding, mode) = state.embedder.embed(&text).await;

    Ok(Json(EmbeddingResponse { embedding, mode }))
}
