//! Server Configuration
//!
//! Everything is read once at startup from the environment (after `.env` is
//! loaded) and handed to the components as immutable values.

use std::path::PathBuf;
use std::time::Duration;

use portfolio_core::{
    ChatConfig, ContactInfo, Credential, GenerationOptions, PortfolioError, Result, StorePaths,
    chat::{DEFAULT_MAX_MESSAGE_CHARS, DEFAULT_TIMEOUT},
    provider::DEFAULT_MODEL,
};
use portfolio_runtime::GeminiConfig;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Filesystem layout of a deployment
#[derive(Clone, Debug)]
pub struct SitePaths {
    /// Deployment root
    pub root: PathBuf,

    /// Directory holding `portfolio.json` and `ai_context.txt`
    pub data_dir: PathBuf,

    /// Directory holding `index.html`
    pub templates_dir: PathBuf,

    /// Directory holding images, css and js
    pub static_dir: PathBuf,
}

impl SitePaths {
    /// Conventional layout under `root`
    pub fn under(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            data_dir: root.join("backend").join("data"),
            templates_dir: root.join("templates"),
            static_dir: root.join("static"),
            root,
        }
    }

    pub fn index_html(&self) -> PathBuf {
        self.templates_dir.join("index.html")
    }

    pub fn store_paths(&self) -> StorePaths {
        StorePaths::in_dir(&self.data_dir)
    }
}

/// Complete server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_addr: String,
    pub paths: SitePaths,
    pub chat: ChatConfig,
    pub gemini: GeminiConfig,
}

impl ServerConfig {
    /// Load from process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.into());

        let mut paths = SitePaths::under(lookup("PORTFOLIO_ROOT").unwrap_or_else(|| ".".into()));
        if let Some(dir) = lookup("PORTFOLIO_DATA_DIR") {
            paths.data_dir = dir.into();
        }

        let credential = Credential::from_value(lookup("GEMINI_API_KEY"));

        let contact = ContactInfo {
            owner: lookup("PORTFOLIO_OWNER_NAME").unwrap_or_else(|| ContactInfo::default().owner),
            email: lookup("PORTFOLIO_CONTACT_EMAIL"),
            phone: lookup("PORTFOLIO_CONTACT_PHONE"),
        };

        let timeout = match lookup("CHAT_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse_number("CHAT_TIMEOUT_SECS", &raw)?),
            None => DEFAULT_TIMEOUT,
        };
        let max_message_chars = match lookup("CHAT_MAX_MESSAGE_CHARS") {
            Some(raw) => parse_number("CHAT_MAX_MESSAGE_CHARS", &raw)?,
            None => DEFAULT_MAX_MESSAGE_CHARS,
        };

        let generation = GenerationOptions {
            model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
            ..GenerationOptions::default()
        };

        let chat = ChatConfig::new(credential.clone(), &contact)
            .with_generation(generation)
            .with_timeout(timeout)
            .with_max_message_chars(max_message_chars);

        let mut gemini = GeminiConfig {
            api_key: credential.secret().unwrap_or_default().to_string(),
            ..GeminiConfig::default()
        };
        if let Some(base_url) = lookup("GEMINI_BASE_URL") {
            gemini.base_url = base_url;
        }
        if let Some(raw) = lookup("GEMINI_TIMEOUT_SECS") {
            gemini.timeout_secs = parse_number("GEMINI_TIMEOUT_SECS", &raw)?;
        }

        Ok(Self {
            bind_addr,
            paths,
            chat,
            gemini,
        })
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> Result<T> {
    raw.trim()
        .parse()
        .map_err(|_| PortfolioError::Config(format!("{key} must be a non-negative integer, got {raw:?}")))
}
