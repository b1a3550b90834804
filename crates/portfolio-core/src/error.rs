//! Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for portfolio operations
pub type Result<T> = std::result::Result<T, PortfolioError>;

/// Portfolio error types
#[derive(Error, Debug)]
pub enum PortfolioError {
    /// Backing data file is missing, unreadable or malformed
    #[error("Data unavailable at {}: {reason}", path.display())]
    DataUnavailable { path: PathBuf, reason: String },

    /// No project carries the requested id
    #[error("Project not found: {0}")]
    NotFound(i64),

    /// No usable credential for the text-generation service
    #[error("Chatbot is not configured")]
    Unconfigured,

    /// Text-generation provider returned an error
    #[error("Provider error: {0}")]
    Provider(String),

    /// Provider unreachable (network, DNS, TLS)
    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider rejected the credential
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// Rate limited by the provider
    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// Provider answered with a body we could not use
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    /// Provider blocked the generation
    #[error("Content filtered by provider")]
    ContentFiltered,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PortfolioError {
    /// Build a `DataUnavailable` for `path` from any displayable cause
    pub fn data_unavailable(path: impl Into<PathBuf>, reason: impl std::fmt::Display) -> Self {
        Self::DataUnavailable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether the error originates from the text-generation service
    pub const fn is_external(&self) -> bool {
        matches!(
            self,
            Self::Provider(_)
                | Self::ProviderUnavailable(_)
                | Self::Auth(_)
                | Self::RateLimited(_)
                | Self::MalformedResponse(_)
                | Self::ContentFiltered
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_unavailable_mentions_path() {
        let err = PortfolioError::data_unavailable("data/portfolio.json", "No such file");
        let text = err.to_string();
        assert!(text.contains("data/portfolio.json"));
        assert!(text.contains("No such file"));
        assert!(!err.is_external());
    }

    #[test]
    fn provider_family_is_external() {
        assert!(PortfolioError::RateLimited("slow down".into()).is_external());
        assert!(PortfolioError::ContentFiltered.is_external());
        assert!(!PortfolioError::NotFound(3).is_external());
        assert!(!PortfolioError::Unconfigured.is_external());
    }
}
