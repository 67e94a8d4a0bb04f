//! API Handlers
//!
//! HTTP request handlers for each story service endpoint.

use std::sync::Arc;

use axum::{extract::State, Json};

use crate::cache::CacheStats;
use crate::config::Config;
use crate::error::Result;
use crate::models::{ClearCacheResponse, GenerateStoryRequest, HealthResponse, StoryResponse};
use crate::story::StoryService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Story orchestrator, owns the cache and the provider handle
    pub service: Arc<StoryService>,
}

impl AppState {
    /// Creates a new AppState around a story service.
    pub fn new(service: StoryService) -> Self {
        Self {
            service: Arc::new(service),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Self {
        Self::new(StoryService::from_config(config))
    }
}

/// Handler for POST /generate_story
pub async fn generate_story_handler(
    State(state): State<AppState>,
    Json(req): Json<GenerateStoryRequest>,
) -> Result<Json<StoryResponse>> {
    let request = req.to_story_request();
    let story = state.service.generate_story(&request).await?;

    Ok(Json(StoryResponse::new(
        req.word,
        story,
        request.tier,
        state.service.is_mock_mode(),
    )))
}

/// Handler for DELETE /cache
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.service.clear_cache().await;
    Json(ClearCacheResponse::new(cleared))
}

/// Handler for GET /cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.service.cache_stats().await)
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::healthy(
        state.service.is_mock_mode(),
        state.service.cache_stats().await,
    ))
}
