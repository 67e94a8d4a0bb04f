//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each endpoint, in mock mode and with
//! a stub provider standing in for the hosted model.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;
use word_story::{
    api::create_router,
    cache::StoryCache,
    provider::{
        GenerationParams, MockProvider, ProviderError, ProviderResponse, StoryProvider,
        MOCK_STORY_TEMPLATE,
    },
    AppState, Backend, StoryService,
};

// == Helper Functions ==

/// Provider that replies with a fixed response and counts calls.
struct CountingProvider {
    calls: AtomicUsize,
    reply: ProviderResponse,
}

#[async_trait]
impl StoryProvider for CountingProvider {
    fn name(&self) -> &str {
        "counting"
    }

    async fn generate(
        &self,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl StoryProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn generate(
        &self,
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        Err(ProviderError::RateLimited { retry_after: None })
    }
}

fn mock_app() -> Router {
    let service = StoryService::new(
        Backend::Mock(MockProvider::new()),
        StoryCache::with_limit(100),
    );
    create_router(AppState::new(service))
}

fn live_app(reply: ProviderResponse) -> (Router, Arc<CountingProvider>) {
    let provider = Arc::new(CountingProvider {
        calls: AtomicUsize::new(0),
        reply,
    });
    let service = StoryService::new(Backend::Live(provider.clone()), StoryCache::new(2, 2));
    (create_router(AppState::new(service)), provider)
}

fn generate_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/generate_story")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn delete_cache_request() -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri("/cache")
        .body(Body::empty())
        .unwrap()
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// == Generate Story Endpoint Tests ==

#[tokio::test]
async fn test_generate_story_mock_mode() {
    let response = mock_app()
        .oneshot(generate_request(r#"{"word":"Adventure","length":"brief"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["word"], "Adventure");
    assert_eq!(json["length"], "brief");
    assert_eq!(json["mock"], true);
    assert_eq!(
        json["story"].as_str().unwrap(),
        MOCK_STORY_TEMPLATE.replace("{word}", "adventure")
    );
}

#[tokio::test]
async fn test_generate_story_unknown_length_falls_back() {
    let response = mock_app()
        .oneshot(generate_request(r#"{"word":"adventure","length":"invalid-tier"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["length"], "short");
}

#[tokio::test]
async fn test_generate_story_empty_word() {
    let response = mock_app()
        .oneshot(generate_request(r#"{"word":"   "}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"].as_str().unwrap().contains("non-empty"));
}

#[tokio::test]
async fn test_generate_story_disallowed_characters() {
    let response = mock_app()
        .oneshot(generate_request(r#"{"word":"word42"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_generate_story_missing_word_rejected() {
    let response = mock_app()
        .oneshot(generate_request(r#"{"length":"short"}"#))
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_generate_story_live_uses_cache() {
    let (app, provider) = live_app(ProviderResponse::from_text("The brave knight."));

    for _ in 0..2 {
        let response = app
            .clone()
            .oneshot(generate_request(r#"{"word":"brave","length":"medium"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_to_json(response.into_body()).await;
        assert_eq!(json["story"], "The brave knight.");
        assert_eq!(json["mock"], false);
    }

    assert_eq!(provider.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_generate_story_safety_block_is_bad_gateway() {
    let (app, _) = live_app(ProviderResponse::withheld("SAFETY"));

    let response = app
        .oneshot(generate_request(r#"{"word":"danger"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_to_json(response.into_body()).await;
    assert!(json["error"]
        .as_str()
        .unwrap()
        .contains("blocked by safety filters"));
    assert_eq!(json["reason"], "SAFETY");
}

#[tokio::test]
async fn test_generate_story_provider_failure_is_bad_gateway() {
    let service = StoryService::new(Backend::live(FailingProvider), StoryCache::with_limit(10));
    let app = create_router(AppState::new(service));

    let response = app
        .oneshot(generate_request(r#"{"word":"busy"}"#))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["reason"], "RATE_LIMITED");
}

// == Cache Endpoint Tests ==

#[tokio::test]
async fn test_clear_cache_reports_count() {
    let (app, provider) = live_app(ProviderResponse::from_text("A story."));

    for word in ["apple", "brave"] {
        let body = format!(r#"{{"word":"{}"}}"#, word);
        let response = app.clone().oneshot(generate_request(&body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app.clone().oneshot(delete_cache_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cleared"], 2);
    assert_eq!(json["message"], "Cache cleared. Removed 2 cached stories.");

    let response = app.clone().oneshot(delete_cache_request()).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["cleared"], 0);

    assert_eq!(provider.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_cache_stats_bounded_by_limit() {
    let (app, _) = live_app(ProviderResponse::from_text("A story."));

    for word in ["apple", "brave", "cloud", "dance"] {
        let body = format!(r#"{{"word":"{}"}}"#, word);
        app.clone().oneshot(generate_request(&body)).await.unwrap();
    }

    let response = app.oneshot(get_request("/cache/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["size"], 2);
    assert_eq!(json["limit"], 2);
    assert_eq!(json["usage_percent"], 100.0);
    assert_eq!(json["evictions"], 2);
}

// == Health Endpoint Tests ==

#[tokio::test]
async fn test_health_endpoint() {
    let response = mock_app().oneshot(get_request("/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["mock_mode"], true);
    assert_eq!(json["cache_enabled"], true);
    assert_eq!(json["cache_stats"]["size"], 0);
    assert!(json.get("timestamp").is_some());
}

#[tokio::test]
async fn test_cors_headers_present() {
    let response = mock_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
