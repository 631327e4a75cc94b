//! Common test utilities

use std::sync::Arc;

use vaxassist::dialogue::Assistant;
use vaxassist::knowledge::KnowledgeBase;
use vaxassist::models::CountryStats;
use vaxassist::storage::MockStatsGateway;

/// Statistics shipped with the repository for demos
pub const SAMPLE_STATS_JSON: &str = include_str!("../../data/sample_stats.json");

/// Parse the sample statistics
pub fn sample_rows() -> Vec<CountryStats> {
    serde_json::from_str(SAMPLE_STATS_JSON).expect("sample_stats.json should parse")
}

/// In-memory store holding the sample statistics
pub fn sample_gateway() -> Arc<MockStatsGateway> {
    Arc::new(MockStatsGateway::with_rows(sample_rows()))
}

/// Assistant over the bundled catalog and the sample statistics
#[allow(dead_code)]
pub fn create_test_assistant() -> Assistant {
    Assistant::builder()
        .gateway(sample_gateway())
        .rng_seed(7)
        .build()
        .expect("assistant should build")
}

/// Candidate replies of an intent in the bundled catalog
#[allow(dead_code)]
pub fn responses_for(intent: &str) -> Vec<String> {
    KnowledgeBase::builtin()
        .expect("bundled catalog should load")
        .get(intent)
        .map(|e| e.responses.clone())
        .unwrap_or_default()
}
