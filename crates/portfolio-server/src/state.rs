//! Application State

use std::sync::Arc;

use portfolio_core::{ChatResponder, PortfolioStore, TextGenerator};

use crate::config::{ServerConfig, SitePaths};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Portfolio file store (re-read on every request)
    pub store: PortfolioStore,

    /// Chatbot request handler
    pub chat: Arc<ChatResponder>,

    /// Deployment file layout
    pub paths: Arc<SitePaths>,
}

impl AppState {
    /// Wire the components from configuration and a generator
    pub fn new(config: &ServerConfig, generator: Arc<dyn TextGenerator>) -> Self {
        let store = PortfolioStore::new(config.paths.store_paths());
        let chat = ChatResponder::new(store.clone(), generator, config.chat.clone());

        Self {
            store,
            chat: Arc::new(chat),
            paths: Arc::new(config.paths.clone()),
        }
    }
}
