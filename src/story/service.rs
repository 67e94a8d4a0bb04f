//! Story Service
//!
//! Public entry point for story generation.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::cache::{CacheKey, CacheStats, StoryCache};
use crate::config::Config;
use crate::error::{Result, StoryError};
use crate::prompt::Prompt;
use crate::provider::{GeminiClient, GenerationParams, MockProvider, StoryProvider};
use crate::story::{extract_story, StoryRequest};

// == Backend ==
/// Where stories come from, chosen once at startup.
#[derive(Clone)]
pub enum Backend {
    /// Placeholder stories, no network and no cache
    Mock(MockProvider),
    /// A real provider shared by every request
    Live(Arc<dyn StoryProvider>),
}

impl Backend {
    /// Picks the backend for this process.
    ///
    /// Without a usable credential, or when the provider client cannot be
    /// built, the process runs in mock mode.
    pub fn from_config(config: &Config) -> Self {
        if config.mock_mode() {
            warn!("No usable GOOGLE_API_KEY configured, running in mock mode");
            return Backend::Mock(MockProvider::new());
        }

        match GeminiClient::from_config(config) {
            Ok(client) => {
                info!("Story provider: Gemini model {}", client.model());
                Backend::Live(Arc::new(client))
            }
            Err(e) => {
                warn!("Failed to initialize Gemini client ({}), running in mock mode", e);
                Backend::Mock(MockProvider::new())
            }
        }
    }

    /// Wraps a provider as the live backend.
    pub fn live<P: StoryProvider + 'static>(provider: P) -> Self {
        Backend::Live(Arc::new(provider))
    }

    pub fn is_mock(&self) -> bool {
        matches!(self, Backend::Mock(_))
    }
}

// == Story Service ==
/// Orchestrates validation, mock mode, caching and provider calls.
///
/// Cheap to clone; clones share the same cache.
#[derive(Clone)]
pub struct StoryService {
    backend: Backend,
    cache: Arc<RwLock<StoryCache>>,
}

impl StoryService {
    /// Creates a service around a backend and a fresh cache.
    pub fn new(backend: Backend, cache: StoryCache) -> Self {
        Self {
            backend,
            cache: Arc::new(RwLock::new(cache)),
        }
    }

    /// Creates the service from process configuration.
    pub fn from_config(config: &Config) -> Self {
        let cache = StoryCache::new(config.cache_limit, config.cache_eviction_threshold);
        Self::new(Backend::from_config(config), cache)
    }

    // == Generate Story ==
    /// Generates (or fetches from cache) a story for the request.
    ///
    /// # Errors
    /// - `InvalidInput` when validation fails; nothing is read or written
    /// - `GenerationFailed` when the provider fails or withholds its output
    pub async fn generate_story(&self, request: &StoryRequest) -> Result<String> {
        let (word, context) = request.validate()?;

        let provider = match &self.backend {
            Backend::Mock(mock) => return Ok(mock.story_for(&word)),
            Backend::Live(provider) => provider,
        };

        let prompt = Prompt::build(&word, request.tier, context.as_deref());
        let max_tokens = prompt.effective_max_tokens(request.max_tokens);
        let key = CacheKey::new(
            &word,
            request.tier,
            request.temperature,
            max_tokens,
            context.as_deref(),
        );

        // The guard is dropped before the provider call
        let cached = self.cache.write().await.get(&key);
        if let Some(story) = cached {
            debug!("Cache hit for {}", key);
            return Ok(story);
        }

        info!(
            "Generating {} story for '{}' via {} (max_tokens={})",
            request.tier,
            word,
            provider.name(),
            max_tokens
        );

        let params = GenerationParams {
            prompt: prompt.text,
            temperature: request.temperature,
            max_output_tokens: max_tokens,
        };

        let response = provider.generate(&params).await.map_err(|e| {
            warn!("Story provider {} failed: {}", provider.name(), e);
            StoryError::from(e)
        })?;

        let story = extract_story(response).map_err(|e| {
            warn!("Story for '{}' rejected: {}", word, e);
            e
        })?;

        self.cache.write().await.put(key, story.clone());
        Ok(story)
    }

    // == Mock Mode ==
    pub fn is_mock_mode(&self) -> bool {
        self.backend.is_mock()
    }

    // == Clear Cache ==
    /// Removes every cached story and returns how many were removed.
    pub async fn clear_cache(&self) -> usize {
        let removed = self.cache.write().await.clear();
        info!("Story cache cleared: removed {} entries", removed);
        removed
    }

    // == Cache Stats ==
    pub async fn cache_stats(&self) -> CacheStats {
        self.cache.read().await.stats()
    }
}
