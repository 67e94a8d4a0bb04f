//! Configuration Module
//!
//! Handles loading server configuration from environment variables and
//! deciding whether the process runs against the real provider or in mock mode.

use std::env;
use std::time::Duration;

/// Credential values shipped in example `.env` files. Compared lowercase.
const PLACEHOLDER_KEYS: [&str; 6] = [
    "your_google_api_key_here",
    "your_api_key_here",
    "aiza-placeholder",
    "placeholder",
    "xxx",
    "fake_key",
];

/// Default Gemini model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Default Gemini API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Returns true if the key is one of the well-known placeholder values.
pub fn is_placeholder_key(key: &str) -> bool {
    let key = key.trim().to_lowercase();
    PLACEHOLDER_KEYS.contains(&key.as_str())
}

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Raw provider credential as read from the environment
    pub api_key: Option<String>,
    /// Gemini model identifier
    pub model: String,
    /// Gemini API base URL
    pub base_url: String,
    /// Provider request timeout in seconds
    pub request_timeout: u64,
    /// Steady-state capacity of the story cache
    pub cache_limit: usize,
    /// Cache size that triggers a batch eviction back down to `cache_limit`
    pub cache_eviction_threshold: usize,
    /// HTTP server port
    pub server_port: u16,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `GOOGLE_API_KEY` - Provider credential (default: unset, mock mode)
    /// - `GEMINI_MODEL` - Model id (default: gemini-2.0-flash)
    /// - `GEMINI_BASE_URL` - API base URL
    /// - `REQUEST_TIMEOUT` - Provider timeout in seconds (default: 30)
    /// - `CACHE_LIMIT` - Cache capacity (default: 100)
    /// - `CACHE_EVICTION_THRESHOLD` - Batch eviction trigger (default: limit + 20%)
    /// - `SERVER_PORT` - HTTP server port (default: 8001)
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let cache_limit = lookup("CACHE_LIMIT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(defaults.cache_limit);
        let cache_eviction_threshold = lookup("CACHE_EVICTION_THRESHOLD")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or_else(|| default_threshold(cache_limit))
            .max(cache_limit);

        Self {
            api_key: lookup("GOOGLE_API_KEY"),
            model: lookup("GEMINI_MODEL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.model),
            base_url: lookup("GEMINI_BASE_URL")
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.base_url),
            request_timeout: lookup("REQUEST_TIMEOUT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.request_timeout),
            cache_limit,
            cache_eviction_threshold,
            server_port: lookup("SERVER_PORT")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.server_port),
        }
    }

    /// Returns the usable credential, or None when it is missing, blank or a placeholder.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty() && !is_placeholder_key(key))
    }

    /// Mock mode is on whenever there is no usable credential.
    pub fn mock_mode(&self) -> bool {
        self.credential().is_none()
    }

    /// Provider request timeout as a Duration.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout)
    }
}

fn default_threshold(limit: usize) -> usize {
    limit + limit / 5
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: 30,
            cache_limit: 100,
            cache_eviction_threshold: default_threshold(100),
            server_port: 8001,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.api_key.is_none());
        assert_eq!(config.model, "gemini-2.0-flash");
        assert_eq!(config.cache_limit, 100);
        assert_eq!(config.cache_eviction_threshold, 120);
        assert_eq!(config.server_port, 8001);
        assert_eq!(config.request_timeout, 30);
        assert!(config.mock_mode());
    }

    #[test]
    fn test_config_from_empty_lookup_uses_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.cache_limit, 100);
        assert_eq!(config.cache_eviction_threshold, 120);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert!(config.mock_mode());
    }

    #[test]
    fn test_real_key_disables_mock_mode() {
        let config = config_with(&[("GOOGLE_API_KEY", "  AIzaSyRealLookingKey  ")]);
        assert!(!config.mock_mode());
        assert_eq!(config.credential(), Some("AIzaSyRealLookingKey"));
    }

    #[test]
    fn test_blank_key_enables_mock_mode() {
        assert!(config_with(&[("GOOGLE_API_KEY", "")]).mock_mode());
        assert!(config_with(&[("GOOGLE_API_KEY", "   \t")]).mock_mode());
    }

    #[test]
    fn test_placeholder_keys_enable_mock_mode() {
        for key in ["placeholder", "XXX", "Your_API_Key_Here", "AIza-placeholder", "fake_key"] {
            let config = config_with(&[("GOOGLE_API_KEY", key)]);
            assert!(config.mock_mode(), "{} should be treated as a placeholder", key);
        }
    }

    #[test]
    fn test_is_placeholder_key() {
        assert!(is_placeholder_key("your_google_api_key_here"));
        assert!(is_placeholder_key(" xxx "));
        assert!(!is_placeholder_key("AIzaSyD-abc123"));
    }

    #[test]
    fn test_threshold_defaults_to_limit_plus_fifth() {
        let config = config_with(&[("CACHE_LIMIT", "50")]);
        assert_eq!(config.cache_limit, 50);
        assert_eq!(config.cache_eviction_threshold, 60);
    }

    #[test]
    fn test_threshold_never_below_limit() {
        let config = config_with(&[("CACHE_LIMIT", "50"), ("CACHE_EVICTION_THRESHOLD", "10")]);
        assert_eq!(config.cache_eviction_threshold, 50);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_with(&[("SERVER_PORT", "not-a-port"), ("REQUEST_TIMEOUT", "-3")]);
        assert_eq!(config.server_port, 8001);
        assert_eq!(config.request_timeout, 30);
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let config = config_with(&[("GEMINI_BASE_URL", "http://localhost:9999/")]);
        assert_eq!(config.base_url, "http://localhost:9999");
    }
}
