//! Axum route handlers for the generation endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{require_fields, AppError};
use crate::generation::fallback::{GenerationResult, Source};
use crate::generation::tasks;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleRequest {
    pub field_of_study: Option<String>,
    pub keyword: Option<String>,
    pub method: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TitleResponse {
    pub title: String,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutlineRequest {
    pub title: Option<String>,
    pub field_of_study: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct OutlineResponse {
    pub outline: String,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MethodRequest {
    pub keywords: Option<KeywordsInput>,
}

#[derive(Debug, Serialize)]
pub struct MethodResponse {
    pub method: String,
    pub source: Source,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Keywords arrive as either a JSON array of strings or a single string.
/// Normalized into one canonical `Vec<String>` at the boundary.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum KeywordsInput {
    Many(Vec<String>),
    One(String),
}

impl KeywordsInput {
    pub fn normalize(self) -> Vec<String> {
        let raw = match self {
            KeywordsInput::Many(list) => list,
            KeywordsInput::One(single) => vec![single],
        };
        raw.into_iter()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /generate-title
pub async fn handle_generate_title(
    State(state): State<AppState>,
    Json(req): Json<TitleRequest>,
) -> Result<Json<TitleResponse>, AppError> {
    require_fields(&[
        ("fieldOfStudy", req.field_of_study.as_deref()),
        ("keyword", req.keyword.as_deref()),
        ("method", req.method.as_deref()),
    ])?;

    let field_of_study = req.field_of_study.unwrap_or_default();
    let keyword = req.keyword.unwrap_or_default();
    let method = req.method.unwrap_or_default();

    let result =
        tasks::generate_title(state.generator.as_ref(), &field_of_study, &keyword, &method).await?;
    log_mock_fallback("generate-title", &result);

    Ok(Json(TitleResponse {
        title: result.text,
        source: result.source,
        note: result.note,
    }))
}

/// POST /generate-outline
pub async fn handle_generate_outline(
    State(state): State<AppState>,
    Json(req): Json<OutlineRequest>,
) -> Result<Json<OutlineResponse>, AppError> {
    require_fields(&[
        ("title", req.title.as_deref()),
        ("fieldOfStudy", req.field_of_study.as_deref()),
    ])?;

    let title = req.title.unwrap_or_default();
    let field_of_study = req.field_of_study.unwrap_or_default();

    let result =
        tasks::generate_outline(state.generator.as_ref(), &title, &field_of_study).await?;
    log_mock_fallback("generate-outline", &result);

    Ok(Json(OutlineResponse {
        outline: result.text,
        source: result.source,
        note: result.note,
    }))
}

/// POST /recommend-method
pub async fn handle_recommend_method(
    State(state): State<AppState>,
    Json(req): Json<MethodRequest>,
) -> Result<Json<MethodResponse>, AppError> {
    let keywords = req
        .keywords
        .map(KeywordsInput::normalize)
        .unwrap_or_default();

    if keywords.is_empty() {
        return Err(AppError::Validation(
            "missing required field(s): keywords".to_string(),
        ));
    }

    let result = tasks::recommend_method(state.generator.as_ref(), &keywords).await?;
    log_mock_fallback("recommend-method", &result);

    Ok(Json(MethodResponse {
        method: result.text,
        source: result.source,
        note: result.note,
    }))
}

fn log_mock_fallback(endpoint: &str, result: &GenerationResult) {
    if result.source == Source::Mock && result.note.is_some() {
        warn!("{endpoint}: served mock response (upstream rate limited)");
    }
}
