//! # portfolio-runtime
//!
//! Runtime providers for the portfolio chatbot.
//!
//! ## Providers
//!
//! - **Gemini**: Google's Generative Language REST API
//!
//! ## Usage
//!
//! ```rust,ignore
//! use portfolio_runtime::{GeminiConfig, GeminiProvider};
//!
//! let provider = Arc::new(GeminiProvider::from_config(GeminiConfig {
//!     api_key: key.into(),
//!     ..GeminiConfig::default()
//! })?);
//! let chat = ChatResponder::new(store, provider, config);
//! ```

pub mod gemini;

pub use gemini::{GeminiConfig, GeminiProvider};

// Re-export core types for convenience
pub use portfolio_core::{
    Completion, GenerationOptions, PortfolioError, Result, TextGenerator,
};
