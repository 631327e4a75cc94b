//! Unified error handling for the vaxassist crate
//!
//! This module provides a unified error type that consolidates all domain-specific
//! errors into a single `Error` enum, while maintaining the ability to use
//! domain-specific errors when needed.
//!
//! # Architecture
//!
//! - [`AssistantErrorTrait`] - Common interface implemented by the unified error
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all domain-specific errors
//!
//! Only startup paths (catalog loading, configuration, opening the statistics
//! store) return these errors to callers. Once the assistant is built, every
//! failure is turned into a user-facing string inside the dialogue pipeline.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vaxassist::error::{AssistantErrorTrait, Error};
//!
//! fn report(err: Error) {
//!     if err.is_recoverable() {
//!         eprintln!("Temporary problem: {}", err.localized_desc());
//!     } else {
//!         eprintln!("Fatal error: {}", err);
//!     }
//! }
//! ```

use std::io;
use thiserror::Error;

// Re-export domain-specific errors for convenience
pub use crate::utils::error::{GatewayError, KnowledgeError, NormalizeError, TranslationError};

/// Common trait for vaxassist error types
pub trait AssistantErrorTrait: std::error::Error {
    /// Check if this error is recoverable (can be retried)
    fn is_recoverable(&self) -> bool;

    /// Get localized description for user-facing messages
    fn localized_desc(&self) -> String;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Statistics lookups (store unavailable, no data)
    DataLookup,
    /// Translation service errors
    Translation,
    /// Spelling and sentiment capability errors
    Normalization,
    /// Knowledge catalog loading errors
    Knowledge,
    /// Configuration and validation errors
    Config,
    /// Local I/O errors
    Storage,
    /// Other/unknown errors
    Other,
}

impl ErrorCategory {
    /// Get localized description for the category
    pub fn localized_desc(&self) -> String {
        match self {
            Self::DataLookup => crate::i18n::t!("errors.category.data_lookup").to_string(),
            Self::Translation => crate::i18n::t!("errors.category.translation").to_string(),
            Self::Normalization => crate::i18n::t!("errors.category.normalization").to_string(),
            Self::Knowledge => crate::i18n::t!("errors.category.knowledge").to_string(),
            Self::Config => crate::i18n::t!("errors.category.config").to_string(),
            Self::Storage => crate::i18n::t!("errors.category.storage").to_string(),
            Self::Other => crate::i18n::t!("errors.category.other").to_string(),
        }
    }
}

/// Unified error type for the vaxassist crate
#[derive(Error, Debug)]
pub enum Error {
    /// Statistics store errors
    #[error("Gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// Translation service errors
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Spelling or sentiment errors
    #[error("Normalize error: {0}")]
    Normalize(#[from] NormalizeError),

    /// Knowledge catalog errors
    #[error("Knowledge error: {0}")]
    Knowledge(#[from] KnowledgeError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{context}")]
    Other {
        context: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl AssistantErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Gateway(e) => e.is_recoverable(),
            Self::Translation(e) => e.is_recoverable(),
            Self::Normalize(_) => true, // degrades to pass-through
            Self::Knowledge(_) => false,
            Self::Io(_) => true,
            Self::Json(_) => false,
            Self::Config(_) => false,
            Self::Other { .. } => false,
        }
    }

    fn localized_desc(&self) -> String {
        match self {
            Self::Gateway(e) => e.localized_desc(),
            Self::Translation(e) => e.localized_desc(),
            Self::Normalize(e) => e.localized_desc(),
            Self::Knowledge(e) => format!("{}: {e}", crate::i18n::t!("errors.knowledge.invalid")),
            Self::Io(e) => format!("{}: {e}", crate::i18n::t!("errors.io.error")),
            Self::Json(e) => format!("{}: {e}", crate::i18n::t!("errors.json.error")),
            Self::Config(msg) => format!("{}: {msg}", crate::i18n::t!("errors.config.error")),
            Self::Other { context, .. } => context.clone(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Gateway(GatewayError::InvalidQuery { .. }) => ErrorCategory::Other,
            Self::Gateway(_) => ErrorCategory::DataLookup,
            Self::Translation(_) => ErrorCategory::Translation,
            Self::Normalize(_) => ErrorCategory::Normalization,
            Self::Knowledge(_) | Self::Json(_) => ErrorCategory::Knowledge,
            Self::Io(_) => ErrorCategory::Storage,
            Self::Config(_) => ErrorCategory::Config,
            Self::Other { .. } => ErrorCategory::Other,
        }
    }
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a generic error with context
    pub fn other(context: impl Into<String>) -> Self {
        Self::Other {
            context: context.into(),
            source: None,
        }
    }

    /// Create a generic error with context and source
    pub fn with_source(
        context: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Other {
            context: context.into(),
            source: Some(Box::new(source)),
        }
    }
}

// Database errors surface through the gateway
impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Self::Gateway(GatewayError::Query(err))
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other {
            context: err.to_string(),
            source: None,
        }
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;
