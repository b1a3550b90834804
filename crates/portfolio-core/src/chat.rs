//! Chat Responder
//!
//! Orchestrates one chatbot exchange: credential check, data load, prompt
//! assembly, a single bounded call to the text generator, and the mapping
//! of every outcome to reply text.
//!
//! ```text
//!   message ──► credential usable? ──no──► Unconfigured
//!                     │yes
//!                     ▼
//!              length bound ─► context + portfolio ─► prompt ─► generate (timeout)
//!                     │                 │                          │
//!                     └─────── any failure ────────────────────────┴──► Failed(reason)
//!                                                                  │ok
//!                                                                  ▼
//!                                                           Answered(text)
//! ```
//!
//! The reason inside `Failed` is logged and kept for tests; callers on the
//! wire only ever see the fixed fallback text.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::error::PortfolioError;
use crate::model::ChatResponse;
use crate::prompt::assemble_prompt;
use crate::provider::{GenerationOptions, TextGenerator};
use crate::store::PortfolioStore;

/// Value shipped in `.env.example`; treated the same as no key at all
pub const PLACEHOLDER_API_KEY: &str = "your_gemini_api_key_here";

/// Default bound on the external call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default bound on the visitor's message, in characters
pub const DEFAULT_MAX_MESSAGE_CHARS: usize = 2000;

/// State of the text-generation credential
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    Missing,
    Placeholder,
    Present(String),
}

impl Credential {
    /// Classify a raw environment value
    pub fn from_value(value: Option<String>) -> Self {
        match value {
            None => Self::Missing,
            Some(v) if v.trim().is_empty() => Self::Missing,
            Some(v) if v.trim() == PLACEHOLDER_API_KEY => Self::Placeholder,
            Some(v) => Self::Present(v.trim().to_string()),
        }
    }

    pub const fn is_usable(&self) -> bool {
        matches!(self, Self::Present(_))
    }

    pub fn secret(&self) -> Option<&str> {
        match self {
            Self::Present(key) => Some(key),
            _ => None,
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing => write!(f, "Missing"),
            Self::Placeholder => write!(f, "Placeholder"),
            Self::Present(_) => write!(f, "Present(<redacted>)"),
        }
    }
}

/// How visitors can reach the owner when the bot cannot answer
#[derive(Clone, Debug)]
pub struct ContactInfo {
    pub owner: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            owner: "the site owner".into(),
            email: None,
            phone: None,
        }
    }
}

/// The two fixed texts a visitor can get instead of a model answer
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyTexts {
    pub not_configured: String,
    pub fallback: String,
}

impl ReplyTexts {
    pub fn for_contact(contact: &ContactInfo) -> Self {
        let owner = &contact.owner;

        let not_configured = match &contact.email {
            Some(email) => format!(
                "Sorry, the AI chatbot is not configured yet. Please contact {owner} directly at {email}"
            ),
            None => format!("Sorry, the AI chatbot is not configured yet. Please contact {owner} directly."),
        };

        let reach = match (&contact.email, &contact.phone) {
            (Some(email), Some(phone)) => format!("{owner} directly at {email} or call {phone}"),
            (Some(email), None) => format!("{owner} directly at {email}"),
            (None, Some(phone)) => format!("{owner} directly by calling {phone}"),
            (None, None) => format!("{owner} directly"),
        };
        let fallback = format!("I'm having trouble connecting right now. Please reach out to {reach}. 😊");

        Self {
            not_configured,
            fallback,
        }
    }
}

/// Immutable chat configuration
#[derive(Clone, Debug)]
pub struct ChatConfig {
    pub credential: Credential,
    pub generation: GenerationOptions,
    pub timeout: Duration,
    pub max_message_chars: usize,
    pub replies: ReplyTexts,
}

impl ChatConfig {
    pub fn new(credential: Credential, contact: &ContactInfo) -> Self {
        Self {
            credential,
            generation: GenerationOptions::default(),
            timeout: DEFAULT_TIMEOUT,
            max_message_chars: DEFAULT_MAX_MESSAGE_CHARS,
            replies: ReplyTexts::for_contact(contact),
        }
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_max_message_chars(mut self, max: usize) -> Self {
        self.max_message_chars = max;
        self
    }

    #[must_use]
    pub fn with_generation(mut self, generation: GenerationOptions) -> Self {
        self.generation = generation;
        self
    }
}

/// Why a configured chat request could not be answered
#[derive(Error, Debug)]
pub enum ChatFailure {
    #[error("message too long: {len} characters (max {max})")]
    MessageTooLong { len: usize, max: usize },

    #[error("request body exceeds {limit} bytes")]
    BodyTooLarge { limit: usize },

    #[error("portfolio data unavailable: {0}")]
    DataUnavailable(#[source] PortfolioError),

    #[error("text generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("text generation failed: {0}")]
    Provider(#[source] PortfolioError),

    #[error("text generation returned no text")]
    EmptyCompletion,
}

impl ChatFailure {
    /// Short tag for structured logs
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::MessageTooLong { .. } => "message_too_long",
            Self::BodyTooLarge { .. } => "body_too_large",
            Self::DataUnavailable(_) => "data_unavailable",
            Self::Timeout(_) => "timeout",
            Self::Provider(_) => "provider",
            Self::EmptyCompletion => "empty_completion",
        }
    }
}

/// Terminal state of one chat request
#[derive(Debug)]
pub enum ChatOutcome {
    Unconfigured,
    Answered(String),
    Failed(ChatFailure),
}

impl ChatOutcome {
    /// Collapse to the wire body; failure detail is dropped here
    pub fn reply(self, config: &ChatConfig) -> ChatResponse {
        match self {
            Self::Answered(text) => ChatResponse::new(text),
            Self::Unconfigured => ChatResponse::new(config.replies.not_configured.clone()),
            Self::Failed(_) => ChatResponse::new(config.replies.fallback.clone()),
        }
    }
}

/// Chatbot request handler
pub struct ChatResponder {
    store: PortfolioStore,
    generator: Arc<dyn TextGenerator>,
    config: ChatConfig,
}

impl ChatResponder {
    pub fn new(store: PortfolioStore, generator: Arc<dyn TextGenerator>, config: ChatConfig) -> Self {
        Self {
            store,
            generator,
            config,
        }
    }

    pub const fn config(&self) -> &ChatConfig {
        &self.config
    }

    pub const fn is_configured(&self) -> bool {
        self.config.credential.is_usable()
    }

    /// Run one exchange and report how it ended
    pub async fn respond(&self, message: &str) -> ChatOutcome {
        if !self.is_configured() {
            tracing::debug!(credential = ?self.config.credential, "chatbot not configured");
            return ChatOutcome::Unconfigured;
        }

        match self.answer(message).await {
            Ok(text) => ChatOutcome::Answered(text),
            Err(failure) => self.fail(failure),
        }
    }

    /// Run one exchange and map it to the wire body
    pub async fn reply(&self, message: &str) -> ChatResponse {
        self.respond(message).await.reply(&self.config)
    }

    /// Reply for a request whose body was too large to read
    pub fn reply_body_too_large(&self, limit: usize) -> ChatResponse {
        let outcome = if self.is_configured() {
            self.fail(ChatFailure::BodyTooLarge { limit })
        } else {
            ChatOutcome::Unconfigured
        };
        outcome.reply(&self.config)
    }

    fn fail(&self, failure: ChatFailure) -> ChatOutcome {
        let provider = self.generator.name();
        match &failure {
            ChatFailure::Provider(e) if e.is_external() => {
                tracing::warn!(reason = failure.kind(), provider, "Chat error: {}", failure);
            }
            _ => tracing::error!(reason = failure.kind(), provider, "Chat error: {}", failure),
        }
        ChatOutcome::Failed(failure)
    }

    async fn answer(&self, message: &str) -> Result<String, ChatFailure> {
        let len = message.chars().count();
        if len > self.config.max_message_chars {
            return Err(ChatFailure::MessageTooLong {
                len,
                max: self.config.max_message_chars,
            });
        }

        let context = self
            .store
            .load_context()
            .await
            .map_err(ChatFailure::DataUnavailable)?;
        let data = self
            .store
            .load_portfolio()
            .await
            .map_err(ChatFailure::DataUnavailable)?;

        let prompt = assemble_prompt(&context, &data, message);
        tracing::debug!(prompt_len = prompt.len(), model = %self.config.generation.model, "sending chat prompt");

        let completion = tokio::time::timeout(
            self.config.timeout,
            self.generator.generate(&prompt, &self.config.generation),
        )
        .await
        .map_err(|_| ChatFailure::Timeout(self.config.timeout))?
        .map_err(ChatFailure::Provider)?;

        if completion.content.trim().is_empty() {
            return Err(ChatFailure::EmptyCompletion);
        }

        Ok(completion.content)
    }
}
