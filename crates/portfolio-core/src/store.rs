//! Portfolio Store
//!
//! Read-only access to `portfolio.json` and `ai_context.txt`. Every call goes
//! back to disk; there is no cache to invalidate when the files are edited.

use std::path::{Path, PathBuf};

use crate::error::{PortfolioError, Result};
use crate::model::{PortfolioData, Project};

/// Default file name of the portfolio document
pub const PORTFOLIO_FILE: &str = "portfolio.json";

/// Default file name of the chatbot context
pub const CONTEXT_FILE: &str = "ai_context.txt";

/// Locations of the backing files
#[derive(Clone, Debug)]
pub struct StorePaths {
    pub portfolio: PathBuf,
    pub context: PathBuf,
}

impl StorePaths {
    /// Standard file names inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            portfolio: dir.join(PORTFOLIO_FILE),
            context: dir.join(CONTEXT_FILE),
        }
    }
}

/// File-backed portfolio store
#[derive(Clone, Debug)]
pub struct PortfolioStore {
    paths: StorePaths,
}

impl PortfolioStore {
    pub const fn new(paths: StorePaths) -> Self {
        Self { paths }
    }

    /// Read and parse the portfolio document
    pub async fn load_portfolio(&self) -> Result<PortfolioData> {
        let path = &self.paths.portfolio;
        let raw = tokio::fs::read(path)
            .await
            .map_err(|e| PortfolioError::data_unavailable(path, e))?;

        serde_json::from_slice(&raw).map_err(|e| PortfolioError::data_unavailable(path, e))
    }

    /// Read the chatbot context text
    pub async fn load_context(&self) -> Result<String> {
        let path = &self.paths.context;
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PortfolioError::data_unavailable(path, e))
    }

    /// All projects, in file order
    pub async fn projects(&self) -> Result<Vec<Project>> {
        Ok(self.load_portfolio().await?.projects)
    }

    /// The project whose id equals `id`
    pub async fn project(&self, id: i64) -> Result<Project> {
        self.load_portfolio()
            .await?
            .find_project(id)
            .cloned()
            .ok_or(PortfolioError::NotFound(id))
    }
}
