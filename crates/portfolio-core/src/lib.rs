//! # portfolio-core
//!
//! Data access and chatbot logic for the portfolio site, independent of the
//! HTTP layer and of any particular model vendor.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      ChatResponder                          │
//! │  ┌────────────────┐  ┌──────────────┐  ┌─────────────────┐  │
//! │  │ PortfolioStore │──│    Prompt    │──│  TextGenerator  │  │
//! │  │  (json + txt)  │  │   Assembler  │  │   (Strategy)    │  │
//! │  └────────────────┘  └──────────────┘  └─────────────────┘  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The `TextGenerator` trait keeps the vendor client (Gemini in production,
//! a scripted double in tests) out of the chat logic.

pub mod chat;
pub mod error;
pub mod model;
pub mod prompt;
pub mod provider;
pub mod store;

pub use chat::{ChatConfig, ChatFailure, ChatOutcome, ChatResponder, ContactInfo, Credential, ReplyTexts};
pub use error::{PortfolioError, Result};
pub use model::{ChatMessage, ChatResponse, Designer, PortfolioData, Project};
pub use prompt::assemble_prompt;
pub use provider::{Completion, GenerationOptions, TextGenerator};
pub use store::{PortfolioStore, StorePaths};
