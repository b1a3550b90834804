//! Gemini Text Provider
//!
//! Implementation of `TextGenerator` over the Generative Language REST API
//! (`models/{model}:generateContent`). One request per call, no retries.

use std::time::Duration;

use async_trait::async_trait;
use portfolio_core::{
    error::{PortfolioError, Result},
    provider::{Completion, FinishReason, GenerationOptions, TextGenerator, TokenUsage},
};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

/// Public Gemini API base URL
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key; empty means not configured
    pub api_key: String,

    /// API base URL (overridable for proxies and tests)
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: GEMINI_API_BASE.into(),
            timeout_secs: 30,
        }
    }
}

impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Gemini text provider
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Create from configuration
    pub fn from_config(config: GeminiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortfolioError::Config(format!("HTTP client: {e}")))?;

        Ok(Self { client, config })
    }

    fn base(&self) -> &str {
        self.config.base_url.trim_end_matches('/')
    }

    fn generate_url(&self, model: &str) -> String {
        format!("{}/models/{}:generateContent", self.base(), model)
    }

    fn build_request(prompt: &str, options: &GenerationOptions) -> GenerateContentRequest {
        GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: options.temperature,
                max_output_tokens: options.max_output_tokens,
            },
        }
    }

    /// Map a non-success status to our error taxonomy
    fn status_error(status: StatusCode, body: &str) -> PortfolioError {
        let detail = format!("Gemini API error {status}: {body}");
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortfolioError::Auth(detail),
            StatusCode::TOO_MANY_REQUESTS => PortfolioError::RateLimited(detail),
            _ => PortfolioError::Provider(detail),
        }
    }

    /// Convert a Gemini response to a completion
    fn convert_completion(response: GenerateContentResponse, model: &str) -> Result<Completion> {
        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            tracing::warn!(block_reason = %reason, "Gemini blocked the prompt");
            return Err(PortfolioError::ContentFiltered);
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| PortfolioError::MalformedResponse("no candidates".into()))?;

        let finish_reason = candidate.finish_reason.as_deref().map(|r| match r {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::Length,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" => FinishReason::ContentFilter,
            _ => FinishReason::Other,
        });

        if finish_reason == Some(FinishReason::ContentFilter) {
            return Err(PortfolioError::ContentFiltered);
        }

        let content: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(PortfolioError::MalformedResponse("candidate has no text".into()));
        }

        Ok(Completion {
            content,
            model: model.to_string(),
            usage: response.usage_metadata.map(|u| TokenUsage {
                prompt_tokens: u.prompt_token_count.unwrap_or(0),
                completion_tokens: u.candidates_token_count.unwrap_or(0),
                total_tokens: u.total_token_count.unwrap_or(0),
            }),
            finish_reason,
        })
    }
}

#[async_trait]
impl TextGenerator for GeminiProvider {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn health_check(&self) -> Result<bool> {
        if self.config.api_key.is_empty() {
            return Ok(false);
        }

        let url = format!("{}/models", self.base());
        match self
            .client
            .get(&url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .send()
            .await
        {
            Ok(response) => Ok(response.status().is_success()),
            Err(e) => {
                tracing::warn!("Gemini health check failed: {}", e);
                Ok(false)
            }
        }
    }

    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion> {
        if self.config.api_key.is_empty() {
            return Err(PortfolioError::Unconfigured);
        }

        let request = Self::build_request(prompt, options);

        tracing::debug!(
            model = %options.model,
            prompt_len = prompt.len(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(self.generate_url(&options.model))
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| PortfolioError::ProviderUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::status_error(status, &body));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| PortfolioError::MalformedResponse(e.to_string()))?;

        Self::convert_completion(body, &options.model)
    }
}

// ============================================================================
// Wire Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    max_output_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<u32>,
    candidates_token_count: Option<u32>,
    total_token_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

    fn provider(server: &MockServer, api_key: &str) -> GeminiProvider {
        GeminiProvider::from_config(GeminiConfig {
            api_key: api_key.into(),
            base_url: server.uri(),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn text_response(text: &str, finish: &str) -> serde_json::Value {
        json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": text}]},
                "finishReason": finish
            }],
            "usageMetadata": {
                "promptTokenCount": 40,
                "candidatesTokenCount": 12,
                "totalTokenCount": 52
            }
        })
    }

    #[test]
    fn test_config_defaults() {
        let config = GeminiConfig::default();
        assert_eq!(config.base_url, GEMINI_API_BASE);
        assert!(config.api_key.is_empty());
        assert!(format!("{config:?}").contains("<redacted>"));
    }

    #[test]
    fn test_request_shape() {
        let options = GenerationOptions::default();
        let request = GeminiProvider::build_request("hello", &options);
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(value["contents"][0]["parts"][0]["text"], "hello");
        assert_eq!(value["generationConfig"]["maxOutputTokens"], 500);
        assert!(value["generationConfig"]["temperature"].as_f64().unwrap() > 0.69);
    }

    #[tokio::test]
    async fn test_generate_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header(API_KEY_HEADER, "test-key"))
            .and(body_partial_json(json!({
                "contents": [{"role": "user", "parts": [{"text": "prompt text"}]}],
                "generationConfig": {"maxOutputTokens": 500}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(text_response("Hi there!", "STOP")))
            .expect(1)
            .mount(&server)
            .await;

        let completion = provider(&server, "test-key")
            .generate("prompt text", &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(completion.content, "Hi there!");
        assert_eq!(completion.model, "gemini-2.0-flash");
        assert_eq!(completion.finish_reason, Some(FinishReason::Stop));
        assert_eq!(completion.usage.unwrap().total_tokens, 52);
    }

    #[tokio::test]
    async fn test_multi_part_text_is_joined() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {"parts": [{"text": "Hello, "}, {"text": "world"}]},
                    "finishReason": "MAX_TOKENS"
                }]
            })))
            .mount(&server)
            .await;

        let completion = provider(&server, "k")
            .generate("p", &GenerationOptions::default())
            .await
            .unwrap();

        assert_eq!(completion.content, "Hello, world");
        assert_eq!(completion.finish_reason, Some(FinishReason::Length));
        assert!(completion.usage.is_none());
    }

    #[tokio::test]
    async fn test_status_mapping() {
        let cases: [(u16, &str); 3] = [
            (403, "auth"),
            (429, "rate"),
            (500, "provider"),
        ];

        for (status, expected) in cases {
            let server = MockServer::start().await;
            Mock::given(method("POST"))
                .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
                .mount(&server)
                .await;

            let err = provider(&server, "k")
                .generate("p", &GenerationOptions::default())
                .await
                .unwrap_err();

            let matched = match expected {
                "auth" => matches!(err, PortfolioError::Auth(_)),
                "rate" => matches!(err, PortfolioError::RateLimited(_)),
                _ => matches!(err, PortfolioError::Provider(_)),
            };
            assert!(matched, "status {status} mapped to {err:?}");
        }
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = provider(&server, "k")
            .generate("p", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_no_candidates() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
            .mount(&server)
            .await;

        let err = provider(&server, "k")
            .generate("p", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_safety_block() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{"finishReason": "SAFETY"}]
            })))
            .mount(&server)
            .await;

        let err = provider(&server, "k")
            .generate("p", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::ContentFiltered));
    }

    #[tokio::test]
    async fn test_unreachable_host() {
        let provider = GeminiProvider::from_config(GeminiConfig {
            api_key: "k".into(),
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: 2,
        })
        .unwrap();

        let err = provider
            .generate("p", &GenerationOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, PortfolioError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_empty_key_is_unconfigured() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let provider = provider(&server, "");
        let err = provider
            .generate("p", &GenerationOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, PortfolioError::Unconfigured));
        assert!(!provider.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/models"))
            .and(header(API_KEY_HEADER, "k"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
            .mount(&server)
            .await;

        assert!(provider(&server, "k").health_check().await.unwrap());
    }
}
