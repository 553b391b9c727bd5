pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::embedding;
use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/generate-title", post(handlers::handle_generate_title))
        .route("/generate-outline", post(handlers::handle_generate_outline))
        .route("/recommend-method", post(handlers::handle_recommend_method))
        .route("/embedding", post(embedding::handle_embedding))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::embedding::EmbeddingClient;
    use crate::llm_client::{TextGenerator, UpstreamError};
    use async_trait::async_trait;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    struct StaticGenerator {
        outcome: fn() -> Result<String, UpstreamError>,
    }

    #[async_trait]
    impl TextGenerator for StaticGenerator {
        async fn generate(&self, _prompt: &str) -> Result<String, UpstreamError> {
            (self.outcome)()
        }
    }

    fn test_config() -> Config {
        Config {
            gemini_api_key: "test-key".to_string(),
            gemini_model: "gemini-2.0-flash".to_string(),
            embedding_url: None,
            embedding_dim: 384,
            request_timeout_secs: 5,
            port: 0,
            rust_log: "info".to_string(),
        }
    }

    fn test_app(outcome: fn() -> Result<String, UpstreamError>) -> Router {
        let config = test_config();
        let state = AppState {
            generator: Arc::new(StaticGenerator { outcome }),
            embedder: EmbeddingClient::new(None, config.embedding_dim, 5).unwrap(),
            config,
        };
        build_router(state)
    }

    fn post_json(path: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = test_app(|| Ok("ok".to_string()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["status"], "OK");
    }

    #[tokio::test]
    async fn test_generate_title_success() {
        let app = test_app(|| Ok("Spam Filtering with Naive Bayes".to_string()));
        let response = app
            .oneshot(post_json(
                "/generate-title",
                json!({"fieldOfStudy": "CS", "keyword": "spam", "method": "Naive Bayes"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["title"], "Spam Filtering with Naive Bayes");
        assert_eq!(body["source"], "api");
        assert!(body.get("note").is_none());
    }

    #[tokio::test]
    async fn test_generate_title_rate_limited_serves_mock() {
        let app = test_app(|| {
            Err(UpstreamError::RateLimited {
                message: "quota exceeded".to_string(),
            })
        });
        let response = app
            .oneshot(post_json(
                "/generate-title",
                json!({"fieldOfStudy": "CS", "keyword": "spam", "method": "Naive Bayes"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["source"], "mock");
        assert_eq!(body["note"], "rate limited");
        assert_eq!(body["title"], "Spam Analysis Using Naive Bayes in CS");
    }

    #[tokio::test]
    async fn test_generate_title_upstream_failure_is_500() {
        let app = test_app(|| {
            Err(UpstreamError::Other {
                message: "connection refused".to_string(),
            })
        });
        let response = app
            .oneshot(post_json(
                "/generate-title",
                json!({"fieldOfStudy": "CS", "keyword": "spam", "method": "Naive Bayes"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_generate_title_missing_fields_names_them() {
        let app = test_app(|| Ok("unused".to_string()));
        let response = app
            .oneshot(post_json("/generate-title", json!({"fieldOfStudy": "CS"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        let message = body["error"].as_str().unwrap();
        assert!(message.contains("keyword"));
        assert!(message.contains("method"));
        assert!(!message.contains("fieldOfStudy"));
    }

    #[tokio::test]
    async fn test_generate_outline_missing_title_is_400() {
        let app = test_app(|| Ok("unused".to_string()));
        let response = app
            .oneshot(post_json("/generate-outline", json!({"fieldOfStudy": "CS"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("title"));
    }

    #[tokio::test]
    async fn test_recommend_method_rule_table_hit() {
        // Generator would fail hard; the rule table must short-circuit it.
        let app = test_app(|| {
            Err(UpstreamError::Other {
                message: "must not be called".to_string(),
            })
        });
        let response = app
            .oneshot(post_json(
                "/recommend-method",
                json!({"keywords": ["klasifikasi", "email"]}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["method"], "Klasifikasi (Naive Bayes, SVM, Random Forest)");
    }

    #[tokio::test]
    async fn test_recommend_method_accepts_string_keywords() {
        let app = test_app(|| Ok("Recommended: survey research".to_string()));
        let response = app
            .oneshot(post_json(
                "/recommend-method",
                json!({"keywords": "blockchain"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["source"], "api");
    }

    #[tokio::test]
    async fn test_recommend_method_empty_keywords_is_400() {
        let app = test_app(|| Ok("unused".to_string()));
        let response = app
            .oneshot(post_json("/recommend-method", json!({"keywords": []})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("keywords"));
    }

    #[tokio::test]
    async fn test_embedding_returns_configured_length() {
        let app = test_app(|| Ok("unused".to_string()));
        let response = app
            .oneshot(post_json("/embedding", json!({"text": "hello"})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        assert_eq!(body["embedding"].as_array().unwrap().len(), 384);
        assert_eq!(body["mode"], "degraded");
    }

    #[tokio::test]
    async fn test_embedding_missing_text_is_400() {
        let app = test_app(|| Ok("unused".to_string()));
        let response = app
            .oneshot(post_json("/embedding", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("text"));
    }
}
