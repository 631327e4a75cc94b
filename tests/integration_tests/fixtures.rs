//! Test fixtures for integration tests
//!
//! Provides sample statistics and assistant builders

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use vaxassist::dialogue::Assistant;
use vaxassist::knowledge::KnowledgeBase;
use vaxassist::models::CountryStats;
use vaxassist::storage::{MockStatsGateway, SharedStatsGateway, SqliteStatsGateway};
use vaxassist::translate::SharedTranslator;

/// Sample statistics JSON
pub const SAMPLE_STATS_JSON: &str = r#"[
    {"location": "India", "date": "2023-03-01", "total_doses": 2206954213, "pct_vaccinated": 72.46},
    {"location": "India", "date": "2022-01-01", "total_doses": 1500000000, "pct_vaccinated": 50.0},
    {"location": "United States", "date": "2023-03-01", "total_doses": 672076105, "pct_vaccinated": 80.9},
    {"location": "United Kingdom", "date": "2023-03-01", "total_doses": 151280020, "pct_vaccinated": 79.7},
    {"location": "France", "date": "2023-03-01", "total_doses": 157620513, "pct_vaccinated": 80.7},
    {"location": "Brazil", "date": "2023-03-01", "total_doses": 502262440, "pct_vaccinated": 88.1},
    {"location": "Qatar", "date": "2023-03-01", "total_doses": 7591000, "pct_vaccinated": 105.8},
    {"location": "Nigeria", "date": "2023-03-01", "total_doses": 111853290, "pct_vaccinated": 33.0}
]"#;

/// Expected country line for India's latest row
pub const INDIA_REPLY: &str =
    "In India, 2,206,954,213 doses have been administered (72.5% vaccinated).";

/// Expected fixed fallback
pub const FALLBACK_REPLY: &str = "I'm not sure I understand. I am trained to answer questions \
     about COVID-19, vaccines, and symptoms. Could you rephrase that?";

/// Expected store apology
pub const DATA_ERROR_REPLY: &str =
    "Sorry, I couldn't retrieve the vaccination statistics right now. Please try again later.";

/// Parse the sample statistics
pub fn sample_rows() -> Vec<CountryStats> {
    serde_json::from_str(SAMPLE_STATS_JSON).unwrap()
}

/// In-memory store with the sample statistics
pub fn mock_gateway() -> Arc<MockStatsGateway> {
    Arc::new(MockStatsGateway::with_rows(sample_rows()))
}

/// SQLite store at `path` seeded with the sample statistics
pub fn sqlite_gateway(path: &Path) -> Arc<SqliteStatsGateway> {
    let gateway = SqliteStatsGateway::new(path, Duration::from_millis(500)).unwrap();
    gateway.save_records(&sample_rows()).unwrap();
    Arc::new(gateway)
}

/// Seeded assistant over the bundled catalog
pub fn assistant(gateway: SharedStatsGateway) -> Assistant {
    Assistant::builder().gateway(gateway).rng_seed(11).build().unwrap()
}

/// Seeded assistant with a translator
pub fn assistant_with_translator(
    gateway: SharedStatsGateway,
    translator: SharedTranslator,
    timeout: Duration,
) -> Assistant {
    Assistant::builder()
        .gateway(gateway)
        .translator(translator)
        .translation_timeout(timeout)
        .rng_seed(11)
        .build()
        .unwrap()
}

/// Candidate replies of an intent in the bundled catalog
pub fn responses_for(intent: &str) -> Vec<String> {
    KnowledgeBase::builtin()
        .unwrap()
        .get(intent)
        .map(|e| e.responses.clone())
        .unwrap_or_default()
}

/// Whether `reply` is built around one of the intent's candidates
pub fn is_reply_of(reply: &str, intent: &str) -> bool {
    responses_for(intent).iter().any(|r| reply.contains(r.as_str()))
}
