//! Google Gemini client for story generation.
//!
//! Talks to the `generateContent` REST endpoint.
//! See: <https://ai.google.dev/api/generate-content>

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{GenerationParams, ProviderError, ProviderResponse, StoryProvider};
use crate::config::{Config, DEFAULT_BASE_URL, DEFAULT_MODEL};

/// Client for the Gemini API.
///
/// Built once at startup and shared by every request.
#[derive(Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for the default model and endpoint.
    pub fn new(api_key: &str) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, DEFAULT_MODEL, DEFAULT_BASE_URL, Duration::from_secs(30))
    }

    /// Create a client from the process configuration.
    ///
    /// Fails with `Configuration` when there is no usable credential.
    pub fn from_config(config: &Config) -> Result<Self, ProviderError> {
        let api_key = config
            .credential()
            .ok_or_else(|| ProviderError::Configuration("no usable API key".to_string()))?;
        Self::with_base_url(
            api_key,
            &config.model,
            &config.base_url,
            config.request_timeout(),
        )
    }

    /// Create a client with a custom base URL (for testing with wiremock).
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, ProviderError> {
        let mut key_header = HeaderValue::from_str(api_key.trim()).map_err(|_| {
            ProviderError::Configuration("API key contains invalid characters".to_string())
        })?;
        key_header.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert("x-goog-api-key", key_header);

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| ProviderError::Configuration(e.to_string()))?;

        reqwest::Url::parse(base_url)
            .map_err(|e| ProviderError::Configuration(format!("invalid base URL: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }

    /// Check response status and map to appropriate error.
    async fn handle_response_errors(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, ProviderError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        // The error body is best-effort; fall back to the status text
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorBody>(&body)
            .ok()
            .and_then(|b| b.error.message)
            .unwrap_or_else(|| status.to_string());

        match status.as_u16() {
            401 | 403 => Err(ProviderError::Authentication(message)),
            429 => Err(ProviderError::RateLimited { retry_after }),
            code => Err(ProviderError::Api {
                status: code,
                message,
            }),
        }
    }
}

#[async_trait]
impl StoryProvider for GeminiClient {
    fn name(&self) -> &str {
        "gemini"
    }

    async fn generate(
        &self,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: vec![RequestPart {
                    text: &params.prompt,
                }],
            }],
            generation_config: GenerationConfig {
                temperature: params.temperature,
                max_output_tokens: params.max_output_tokens,
            },
        };

        debug!(
            "Calling Gemini model {} with max_output_tokens={}",
            self.model, params.max_output_tokens
        );

        let response = self.http.post(self.endpoint()).json(&request).send().await?;
        let response = Self::handle_response_errors(response).await?;

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ProviderError::Decode(e.to_string()))
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    role: &'static str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    message: Option<String>,
}
