//! # portfolio-server
//!
//! Axum HTTP surface for the portfolio site: the landing page, static
//! assets, read-only portfolio JSON and the chatbot endpoint.

pub mod config;
pub mod error;
pub mod handlers;
pub mod startup;
pub mod state;

pub use config::{ServerConfig, SitePaths};
pub use startup::build_router;
pub use state::AppState;
