//! Configuration management for vaxassist
//!
//! This module handles loading and validating configuration from environment variables
//! and TOML files. Every section has defaults, so a file only needs the keys it changes.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Dialogue behaviour
    pub assistant: AssistantConfig,

    /// Statistics store
    pub database: DatabaseConfig,

    /// Machine translation service
    pub translation: TranslationConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Dialogue configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    /// Minimum cosine similarity for a knowledge-base answer
    pub min_confidence: f32,

    /// Language of the knowledge base
    pub base_language: String,

    /// Rows in a ranking answer when the user gives no number
    pub ranking_limit: usize,

    /// Upper bound for "top N" requests
    pub max_ranking_limit: usize,

    /// Seed for reply selection; random when unset
    pub reply_seed: Option<u64>,

    /// Sessions idle longer than this are dropped
    pub session_idle_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            min_confidence: 0.3,
            base_language: String::from("en"),
            ranking_limit: 5,
            max_ranking_limit: 20,
            reply_seed: None,
            session_idle_secs: 1800,
        }
    }
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database path
    pub sqlite_path: PathBuf,

    /// How long a query waits on a locked database
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            sqlite_path: PathBuf::from("data/vax_tracker.db"),
            busy_timeout_ms: 2000,
        }
    }
}

/// Translation service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationConfig {
    /// Call the service for replies without a pre-translated version
    pub enabled: bool,

    /// Service base URL
    pub endpoint: String,

    /// API key (optional)
    pub api_key: Option<String>,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: String::from("http://localhost:5000"),
            api_key: None,
            timeout_secs: 5,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn parse_var<T: std::str::FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    lookup(key).and_then(|v| v.trim().parse().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from any key lookup (environment-style names)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();

        let assistant = AssistantConfig {
            min_confidence: parse_var(&lookup, "VAXASSIST_MIN_CONFIDENCE")
                .unwrap_or(defaults.assistant.min_confidence),
            base_language: lookup("VAXASSIST_BASE_LANGUAGE")
                .unwrap_or(defaults.assistant.base_language),
            ranking_limit: parse_var(&lookup, "VAXASSIST_RANKING_LIMIT")
                .unwrap_or(defaults.assistant.ranking_limit),
            max_ranking_limit: parse_var(&lookup, "VAXASSIST_MAX_RANKING_LIMIT")
                .unwrap_or(defaults.assistant.max_ranking_limit),
            reply_seed: parse_var(&lookup, "VAXASSIST_REPLY_SEED"),
            session_idle_secs: parse_var(&lookup, "VAXASSIST_SESSION_IDLE_SECS")
                .unwrap_or(defaults.assistant.session_idle_secs),
        };

        let database = DatabaseConfig {
            sqlite_path: lookup("VAXASSIST_SQLITE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database.sqlite_path),
            busy_timeout_ms: parse_var(&lookup, "VAXASSIST_BUSY_TIMEOUT_MS")
                .unwrap_or(defaults.database.busy_timeout_ms),
        };

        let endpoint = lookup("VAXASSIST_TRANSLATE_ENDPOINT");
        let translation = TranslationConfig {
            // Setting an endpoint implies enabling the service
            enabled: parse_var(&lookup, "VAXASSIST_TRANSLATE_ENABLED").unwrap_or(endpoint.is_some()),
            endpoint: endpoint.unwrap_or(defaults.translation.endpoint),
            api_key: lookup("VAXASSIST_TRANSLATE_API_KEY"),
            timeout_secs: parse_var(&lookup, "VAXASSIST_TRANSLATE_TIMEOUT")
                .unwrap_or(defaults.translation.timeout_secs),
        };

        let logging = LoggingConfig {
            level: lookup("VAXASSIST_LOG_LEVEL").unwrap_or(defaults.logging.level),
            format: lookup("VAXASSIST_LOG_FORMAT").unwrap_or(defaults.logging.format),
        };

        Ok(Self {
            assistant,
            database,
            translation,
            logging,
        })
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        let a = &self.assistant;

        if !(0.0..=1.0).contains(&a.min_confidence) {
            anyhow::bail!("min_confidence must be between 0.0 and 1.0");
        }

        if a.base_language.trim().is_empty() {
            anyhow::bail!("base_language must not be empty");
        }

        if a.ranking_limit == 0 {
            anyhow::bail!("ranking_limit must be greater than 0");
        }

        if a.max_ranking_limit < a.ranking_limit {
            anyhow::bail!("max_ranking_limit must be at least ranking_limit");
        }

        if self.translation.enabled {
            if self.translation.endpoint.trim().is_empty() {
                anyhow::bail!("translation endpoint must be set when translation is enabled");
            }
            if self.translation.timeout_secs == 0 {
                anyhow::bail!("translation timeout_secs must be greater than 0");
            }
        }

        if !matches!(self.logging.format.as_str(), "text" | "json") {
            anyhow::bail!("log format must be 'text' or 'json'");
        }

        Ok(())
    }

    /// Get translation timeout as Duration
    #[must_use]
    pub fn translation_timeout(&self) -> Duration {
        Duration::from_secs(self.translation.timeout_secs)
    }

    /// Get session idle limit as Duration
    #[must_use]
    pub fn session_idle(&self) -> Duration {
        Duration::from_secs(self.assistant.session_idle_secs)
    }
}
