//! Text Generation Provider
//!
//! Common interface for the external model behind the chatbot. The chat
//! responder only talks to this trait, so tests can swap in a double and
//! deployments can point at a different backend.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use portfolio_core::provider::{GenerationOptions, TextGenerator};
//!
//! let provider = GeminiProvider::from_env();
//! let completion = provider.generate(&prompt, &GenerationOptions::default()).await?;
//! ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Model used when none is configured
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

/// Request shaping passed to every generation call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Model identifier (e.g., "gemini-2.0-flash")
    pub model: String,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Output token ceiling
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

const fn default_temperature() -> f32 { 0.7 }
const fn default_max_output_tokens() -> u32 { 500 }

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.into(),
            temperature: default_temperature(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

/// Response from a generation call
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Completion {
    /// The generated text
    pub content: String,

    /// Model that generated this response
    pub model: String,

    /// Token usage statistics (if available)
    pub usage: Option<TokenUsage>,

    /// Finish reason
    pub finish_reason: Option<FinishReason>,
}

/// Token usage statistics
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Reason for completion finishing
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    Stop,
    Length,
    ContentFilter,
    Other,
}

/// Strategy trait for text-generation backends
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Provider name for logs (e.g., "Gemini")
    fn name(&self) -> &str;

    /// Check if the provider is reachable and accepts our credential
    async fn health_check(&self) -> Result<bool>;

    /// Generate a completion for a single prompt
    async fn generate(&self, prompt: &str, options: &GenerationOptions) -> Result<Completion>;
}
