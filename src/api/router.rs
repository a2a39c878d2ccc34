use axum::{middleware, routing::get, Router};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use super::health;
use super::middleware::logging_middleware;
use super::sentence;
use super::state::AppState;
use super::types::ApiError;

/// Create the full router with application state
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/ready", get(health::ready_check))
        .route("/live", get(health::live_check))
        // Sentence lookup
        .route("/api/sentence", get(sentence::get_sentences))
        .fallback(not_found)
        // Add state and middleware
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

async fn not_found() -> ApiError {
    ApiError::not_found("Route not found")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::domain::sentence::MockSentenceSource;
    use crate::domain::{DomainError, ExampleSentence};
    use crate::infrastructure::services::{SentenceCacheConfig, SentenceService};
    use crate::infrastructure::storage::SentenceStores;

    fn app(source: MockSentenceSource) -> Router {
        let stores = SentenceStores::in_memory();
        let service = SentenceService::new(
            stores.ledger.clone(),
            stores.sentences.clone(),
            Arc::new(source),
            SentenceCacheConfig::default(),
        );

        create_router_with_state(AppState::new(Arc::new(service), stores))
    }

    fn silent_source() -> MockSentenceSource {
        let mut source = MockSentenceSource::new();
        source.expect_look_up().never();
        source
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, body)
    }

    #[tokio::test]
    async fn test_missing_q_is_bad_request() {
        let (status, body) = get(app(silent_source()), "/api/sentence").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["message"], "no valid q supplied");
        assert_eq!(body["error"]["type"], "invalid_request_error");
        assert_eq!(body["error"]["param"], "q");
    }

    #[tokio::test]
    async fn test_empty_q_is_bad_request() {
        let (status, _) = get(app(silent_source()), "/api/sentence?q=").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_repeated_q_is_bad_request() {
        let (status, _) = get(app(silent_source()), "/api/sentence?q=a&q=b").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_lookup_returns_upstream_envelope() {
        let mut source = MockSentenceSource::new();
        source
            .expect_look_up()
            .withf(|keyword: &str| keyword == "cat")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    ExampleSentence::new(1, "The cat sleeps").with_translation("猫が寝ている"),
                    ExampleSentence::new(2, "A cat appears"),
                ])
            });

        let (status, body) = get(app(source), "/api/sentence?q=cat").await;

        assert_eq!(status, StatusCode::OK);
        let examples = body["data"][0]["examples"].as_array().unwrap();
        assert_eq!(examples.len(), 2);
        assert_eq!(examples[0]["sentence"], "The cat sleeps");
        assert_eq!(examples[0]["translation"], "猫が寝ている");
    }

    #[tokio::test]
    async fn test_upstream_failure_is_service_unavailable() {
        let mut source = MockSentenceSource::new();
        source
            .expect_look_up()
            .times(1)
            .returning(|_| Err(DomainError::upstream("immersion_kit", "HTTP 502")));

        let (status, body) = get(app(source), "/api/sentence?q=cat").await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["type"], "service_unavailable_error");
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let (status, body) = get(app(silent_source()), "/api/unknown").await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["type"], "not_found_error");
    }

    #[tokio::test]
    async fn test_ready_with_in_memory_stores() {
        let (status, body) = get(app(silent_source()), "/ready").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["checks"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let response = app(silent_source())
            .oneshot(Request::builder().uri("/live").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
