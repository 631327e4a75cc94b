//! vaxassist - FAQ and statistics assistant for a COVID-19 vaccination dashboard
//!
//! Turns free-text questions into a knowledge-base answer, a live statistic
//! from the dashboard's store, or an empathetic fallback.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`knowledge`] - Bundled FAQ catalog and pre-translated replies
//! - [`nlp`] - Spelling correction, sentiment and emotion detection
//! - [`matcher`] - TF-IDF intent matching
//! - [`entity`] - Location extraction
//! - [`storage`] - Vaccination statistics store (SQLite)
//! - [`dialogue`] - Routing rules, the [`Assistant`] service and sessions
//! - [`compose`] - Reply localization and empathy overlay
//! - [`translate`] - Machine translation client
//! - [`config`] - Configuration management and settings
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use vaxassist::config::Config;
//! use vaxassist::dialogue::{AssistantBuilder, ConversationContext};
//! use vaxassist::storage::open_gateway;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let assistant = AssistantBuilder::from_config(&config)
//!         .gateway(open_gateway(&config.database)?)
//!         .build()?;
//!
//!     let mut ctx = ConversationContext::default();
//!     println!("{}", assistant.respond(&mut ctx, "Is the vaccine safe?", "en").await);
//!     Ok(())
//! }
//! ```

// Initialize rust-i18n at crate root level
rust_i18n::i18n!("locales", fallback = "en");

pub mod compose;
pub mod config;
pub mod dialogue;
pub mod entity;
pub mod error;
pub mod i18n;
pub mod knowledge;
pub mod matcher;
pub mod metrics;
pub mod models;
pub mod nlp;
pub mod storage;
pub mod translate;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::dialogue::{
        Assistant, AssistantBuilder, Conversation, ConversationContext, SessionStore,
    };
    pub use crate::error::{AssistantErrorTrait, Error, ErrorCategory, Result};
    pub use crate::knowledge::KnowledgeBase;
    pub use crate::models::{CountryStats, Emotion, MatchResult, SentimentResult};
    pub use crate::storage::{MockStatsGateway, SqliteStatsGateway, StatsGateway};
    pub use crate::translate::{HttpTranslator, Translator};
}

// Direct re-exports for convenience
pub use dialogue::{Assistant, AssistantBuilder, ConversationContext};
pub use models::{CountryStats, Emotion, MatchResult, SentimentResult};
