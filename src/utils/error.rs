//! Error types for the assistant's external seams
//!
//! Each collaborator the dialogue pipeline talks to (statistics store,
//! translation service, normalization capabilities, knowledge catalog)
//! reports failures through its own enum so callers can tell
//! "service unavailable" apart from "no data" or "malformed input".

use thiserror::Error;

/// Errors raised by the statistics data gateway
#[derive(Error, Debug)]
pub enum GatewayError {
    /// Store could not be reached or opened
    #[error("Statistics store unavailable: {reason}")]
    Unavailable { reason: String },

    /// SQL query failed
    #[error("Statistics query failed: {0}")]
    Query(#[from] rusqlite::Error),

    /// The store has no row for the requested location
    #[error("No statistics for location: {location}")]
    NoData { location: String },

    /// Caller passed something the store cannot query
    #[error("Invalid statistics query: {reason}")]
    InvalidQuery { reason: String },
}

impl GatewayError {
    /// Create an unavailable error
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Create a no-data error
    pub fn no_data(location: impl Into<String>) -> Self {
        Self::NoData {
            location: location.into(),
        }
    }
}

/// Errors raised by the translation capability
#[derive(Error, Debug)]
pub enum TranslationError {
    /// No translation service configured
    #[error("Translation service is not configured")]
    Disabled,

    /// Service did not answer in time
    #[error("Translation timed out after {0} seconds")]
    Timeout(u64),

    /// HTTP transport failure
    #[error("Translation request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service answered with an error status
    #[error("Translation service returned status {0}")]
    Status(u16),

    /// Response body did not contain a translation
    #[error("Malformed translation response: {0}")]
    Malformed(String),
}

/// Errors raised by the spelling and sentiment capabilities
#[derive(Error, Debug)]
pub enum NormalizeError {
    /// Spelling correction failed
    #[error("Spelling correction failed: {0}")]
    Spelling(String),

    /// Sentiment scoring failed
    #[error("Sentiment scoring failed: {0}")]
    Sentiment(String),
}

/// Errors raised while loading the knowledge catalog
#[derive(Error, Debug)]
pub enum KnowledgeError {
    /// Catalog JSON could not be parsed
    #[error("Failed to parse knowledge catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two entries share an intent name
    #[error("Duplicate intent: {0}")]
    DuplicateIntent(String),

    /// Entry with a blank intent name
    #[error("Knowledge entry with empty intent name")]
    EmptyIntent,

    /// Entry without any candidate reply
    #[error("Intent '{0}' has no responses")]
    NoResponses(String),

    /// No trigger phrases at all, matcher cannot be built
    #[error("Knowledge catalog has no usable patterns")]
    EmptyCorpus,
}

impl GatewayError {
    /// Check if retrying later could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Query(_))
    }

    /// Get localized description for user-facing messages
    pub fn localized_desc(&self) -> String {
        match self {
            Self::Unavailable { .. } => crate::i18n::t!("errors.gateway.unavailable").to_string(),
            Self::NoData { location } => {
                format!("{}: {location}", crate::i18n::t!("errors.gateway.no_data"))
            }
            Self::Query(_) | Self::InvalidQuery { .. } => {
                crate::i18n::t!("errors.gateway.query").to_string()
            }
        }
    }
}

impl TranslationError {
    /// Check if retrying later could succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Timeout(_) | Self::Request(_) | Self::Status(_))
    }

    /// Get localized description for user-facing messages
    pub fn localized_desc(&self) -> String {
        match self {
            Self::Disabled => crate::i18n::t!("errors.translation.disabled").to_string(),
            Self::Timeout(_) => crate::i18n::t!("errors.translation.timeout").to_string(),
            Self::Request(_) | Self::Status(_) => {
                crate::i18n::t!("errors.translation.request").to_string()
            }
            Self::Malformed(_) => crate::i18n::t!("errors.translation.malformed").to_string(),
        }
    }
}

impl NormalizeError {
    /// Get localized description for user-facing messages
    pub fn localized_desc(&self) -> String {
        match self {
            Self::Spelling(_) => crate::i18n::t!("errors.normalize.spelling").to_string(),
            Self::Sentiment(_) => crate::i18n::t!("errors.normalize.sentiment").to_string(),
        }
    }
}
