//! Error scenario integration tests
//!
//! Tests failure modes and how they reach the user:
//! 1. Statistics store unavailable
//! 2. Translation service errors and timeouts
//! 3. Startup with an unreachable store
//! 4. Invalid knowledge catalogs

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, ResponseTemplate};

use vaxassist::config::TranslationConfig;
use vaxassist::dialogue::{Assistant, ConversationContext};
use vaxassist::error::{AssistantErrorTrait, Error, ErrorCategory};
use vaxassist::knowledge::KnowledgeBase;
use vaxassist::storage::MockStatsGateway;
use vaxassist::translate::{HttpTranslator, SharedTranslator};
use vaxassist::utils::error::KnowledgeError;

use super::fixtures::{
    assistant, assistant_with_translator, is_reply_of, mock_gateway, sqlite_gateway,
    DATA_ERROR_REPLY, FALLBACK_REPLY, INDIA_REPLY,
};

const APOLOGY: &str = " (Sorry, I couldn't translate this part.)";

fn http_translator(endpoint: &str, timeout_secs: u64) -> SharedTranslator {
    let config = TranslationConfig {
        enabled: true,
        endpoint: endpoint.to_string(),
        api_key: None,
        timeout_secs,
    };
    Arc::new(HttpTranslator::new(&config).unwrap())
}

// ============================================================================
// Statistics Store Errors
// ============================================================================

#[tokio::test]
async fn test_store_failure_becomes_apology() {
    let gateway = mock_gateway();
    let a = assistant(gateway.clone());
    gateway.set_unavailable("connection refused by db-01");

    let mut ctx = ConversationContext::default();
    let reply = a.respond(&mut ctx, "How many doses in India?", "en").await;

    assert_eq!(reply, DATA_ERROR_REPLY);
    for leaked in ["GatewayError", "Unavailable", "unavailable", "db-01", "refused"] {
        assert!(!reply.contains(leaked), "reply leaks {leaked:?}: {reply:?}");
    }
    assert_eq!(ctx.last_location, None);
}

#[tokio::test]
async fn test_ranking_failure_becomes_apology() {
    let gateway = mock_gateway();
    let a = assistant(gateway.clone());
    gateway.set_unavailable("timeout");

    let mut ctx = ConversationContext::default();
    assert_eq!(a.respond(&mut ctx, "top 5 countries", "en").await, DATA_ERROR_REPLY);
}

#[tokio::test]
async fn test_store_recovers_between_turns() {
    let gateway = mock_gateway();
    let a = assistant(gateway.clone());
    let mut ctx = ConversationContext::default();

    gateway.set_unavailable("restarting");
    assert_eq!(a.respond(&mut ctx, "How many doses in India?", "en").await, DATA_ERROR_REPLY);

    gateway.clear_failure();
    assert_eq!(a.respond(&mut ctx, "How many doses in India?", "en").await, INDIA_REPLY);
}

#[tokio::test]
async fn test_faq_answers_survive_store_outage() {
    let gateway = mock_gateway();
    let a = assistant(gateway.clone());
    gateway.set_unavailable("down");

    let mut ctx = ConversationContext::default();
    let reply = a.respond(&mut ctx, "Is the vaccine safe?", "en").await;
    assert!(is_reply_of(&reply, "vaccine_safety"), "got {reply:?}");
}

#[tokio::test]
async fn test_startup_with_unreachable_store() {
    let gateway = Arc::new(MockStatsGateway::new());
    gateway.set_unavailable("no route to host");

    let a = assistant(gateway);
    assert!(a.locations().is_empty());

    let mut ctx = ConversationContext::default();
    assert_eq!(a.respond(&mut ctx, "zzqx-42 ###", "en").await, FALLBACK_REPLY);
}

#[tokio::test]
async fn test_sqlite_store_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("nested").join("vax.db");

    drop(sqlite_gateway(&db));
    let reopened = vaxassist::storage::SqliteStatsGateway::new(&db, Duration::from_millis(200)).unwrap();
    let a = assistant(Arc::new(reopened));

    let mut ctx = ConversationContext::default();
    assert_eq!(a.respond(&mut ctx, "How many doses in India?", "en").await, INDIA_REPLY);
}

// ============================================================================
// Translation Errors
// ============================================================================

#[tokio::test]
async fn test_translation_server_error_appends_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let a = assistant_with_translator(
        mock_gateway(),
        http_translator(&server.uri(), 2),
        Duration::from_secs(2),
    );
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "What are the side effects?", "de").await;
    assert!(reply.contains(APOLOGY), "got {reply:?}");
    assert!(is_reply_of(&reply, "side_effects"));
    assert!(!reply.contains("500"));
}

#[tokio::test]
async fn test_translation_timeout_appends_apology() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"translatedText": "zu spät"}))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let a = assistant_with_translator(
        mock_gateway(),
        http_translator(&server.uri(), 10),
        Duration::from_millis(300),
    );
    let mut ctx = ConversationContext::default();

    let started = std::time::Instant::now();
    let reply = a.respond(&mut ctx, "What are the side effects?", "de").await;

    assert!(started.elapsed() < Duration::from_secs(4));
    assert!(reply.contains(APOLOGY), "got {reply:?}");
    assert!(!reply.contains("zu spät"));
}

#[tokio::test]
async fn test_unreachable_translation_service() {
    // Nothing listens on this port
    let a = assistant_with_translator(
        mock_gateway(),
        http_translator("http://127.0.0.1:9", 1),
        Duration::from_secs(2),
    );
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "What are the side effects?", "ta").await;
    assert!(is_reply_of(&reply, "side_effects"), "got {reply:?}");
}

#[tokio::test]
async fn test_disabled_translation_keeps_base_text() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "What are the side effects?", "de").await;
    assert!(reply.ends_with(APOLOGY), "got {reply:?}");
}

// ============================================================================
// Startup Errors
// ============================================================================

#[test]
fn test_missing_gateway_is_config_error() {
    let err = Assistant::builder().build().unwrap_err();
    assert!(matches!(err, Error::Config(_)));
    assert_eq!(err.category(), ErrorCategory::Config);
    assert!(!err.is_recoverable());
}

#[test]
fn test_invalid_catalog_is_rejected() {
    let duplicate = r#"[
        {"intent": "a", "patterns": ["x"], "responses": ["1"]},
        {"intent": "a", "patterns": ["y"], "responses": ["2"]}
    ]"#;
    assert!(matches!(
        KnowledgeBase::from_json(duplicate),
        Err(KnowledgeError::DuplicateIntent(_))
    ));

    let no_responses = r#"[{"intent": "a", "patterns": ["x"], "responses": []}]"#;
    assert!(KnowledgeBase::from_json(no_responses).is_err());

    assert!(matches!(
        KnowledgeBase::from_json("not json"),
        Err(KnowledgeError::Parse(_))
    ));
}

#[test]
fn test_catalog_without_patterns_cannot_build() {
    let kb = KnowledgeBase::from_json(r#"[{"intent": "a", "patterns": [], "responses": ["1"]}]"#)
        .unwrap();

    let result = Assistant::builder()
        .gateway(mock_gateway())
        .knowledge_base(kb)
        .build();
    assert!(matches!(result, Err(Error::Knowledge(KnowledgeError::EmptyCorpus))));
}
