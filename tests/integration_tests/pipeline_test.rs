//! Conversation pipeline integration tests
//!
//! Tests complete turns through normalization, routing, the statistics
//! store, the catalog and the composer:
//! 1. Knowledge-base answers
//! 2. Country statistics and follow-ups
//! 3. Rankings
//! 4. Emotional replies
//! 5. Localization and machine translation

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vaxassist::config::TranslationConfig;
use vaxassist::dialogue::{Conversation, ConversationContext, Route, SessionStore};
use vaxassist::models::CountryStats;
use vaxassist::storage::SqliteStatsGateway;
use vaxassist::translate::HttpTranslator;

use super::fixtures::{
    assistant, assistant_with_translator, is_reply_of, mock_gateway, sample_rows, sqlite_gateway,
    FALLBACK_REPLY, INDIA_REPLY,
};

fn translator_for(server: &MockServer) -> Arc<HttpTranslator> {
    let config = TranslationConfig {
        enabled: true,
        endpoint: server.uri(),
        api_key: None,
        timeout_secs: 2,
    };
    Arc::new(HttpTranslator::new(&config).unwrap())
}

// ============================================================================
// Knowledge Answers
// ============================================================================

#[tokio::test]
async fn test_faq_answer() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "What are the side effects?", "en").await;
    assert!(is_reply_of(&reply, "side_effects"), "got {reply:?}");
    assert_eq!(ctx.last_location, None);
}

#[tokio::test]
async fn test_misspelled_question_still_matches() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "Do I need a boostr", "en").await;
    assert!(is_reply_of(&reply, "booster"), "got {reply:?}");
}

#[tokio::test]
async fn test_gibberish_gets_fixed_fallback() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let first = a.respond(&mut ctx, "zzqx-42 ###", "en").await;
    let second = a.respond(&mut ctx, "zzqx-42 ###", "en").await;
    assert_eq!(first, FALLBACK_REPLY);
    assert_eq!(first, second);
}

// ============================================================================
// Statistics
// ============================================================================

#[tokio::test]
async fn test_country_stats_uses_latest_row() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "How many doses in India?", "en").await;
    assert_eq!(reply, INDIA_REPLY);
    assert_eq!(ctx.last_location.as_deref(), Some("india"));
}

#[tokio::test]
async fn test_follow_up_uses_context() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    a.respond(&mut ctx, "How many doses in India?", "en").await;
    let reply = a.respond(&mut ctx, "what about doses", "en").await;
    assert_eq!(reply, INDIA_REPLY);

    let reply = a.respond(&mut ctx, "What about France?", "en").await;
    assert!(reply.starts_with("In France, 157,620,513 doses"), "got {reply:?}");
    assert_eq!(ctx.last_location.as_deref(), Some("france"));
}

#[tokio::test]
async fn test_plural_statistics_words() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "vaccinations in France", "en").await;
    assert!(reply.starts_with("In France, 157,620,513 doses"), "got {reply:?}");
    assert_eq!(ctx.last_location.as_deref(), Some("france"));

    let reply = a.respond(&mut ctx, "India vaccinations", "en").await;
    assert_eq!(reply, INDIA_REPLY);
    assert_eq!(a.explain(&ctx, "India vaccinations").route, Route::CountryStats);
}

#[tokio::test]
async fn test_longest_location_wins() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "vaccination stats for United States", "en").await;
    assert!(reply.starts_with("In United States,"), "got {reply:?}");
}

#[tokio::test]
async fn test_ranking_short_circuits_entities() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "top 5 vaccinated, India please", "en").await;
    let lines: Vec<&str> = reply.lines().collect();

    assert_eq!(lines[0], "Top 5 countries by vaccination rate:");
    assert_eq!(lines.len(), 6);
    assert_eq!(lines[1], "1. Qatar: 105.8%");
    assert_eq!(lines[2], "2. Brazil: 88.1%");
    // the ranking never touches the context
    assert_eq!(ctx.last_location, None);
}

#[tokio::test]
async fn test_ranking_size_follows_request() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "top 3 countries", "en").await;
    assert_eq!(reply.lines().count(), 4);

    let reply = a.respond(&mut ctx, "best countries", "en").await;
    assert_eq!(reply.lines().count(), 6);
}

#[tokio::test]
async fn test_sqlite_store_end_to_end() {
    let dir = TempDir::new().unwrap();
    let a = assistant(sqlite_gateway(&dir.path().join("vax.db")));
    let mut ctx = ConversationContext::default();

    assert_eq!(a.locations().len(), 7);

    let reply = a.respond(&mut ctx, "How many doses in India?", "en").await;
    assert_eq!(reply, INDIA_REPLY);

    let reply = a.respond(&mut ctx, "top 2", "en").await;
    assert!(reply.contains("1. Qatar: 105.8%"));
    assert!(reply.contains("2. Brazil: 88.1%"));
}

#[tokio::test]
async fn test_sqlite_store_non_ascii_location() {
    let dir = TempDir::new().unwrap();
    let gateway = SqliteStatsGateway::new(dir.path().join("vax.db"), Duration::from_millis(500)).unwrap();
    let mut rows = sample_rows();
    rows.push(CountryStats::new("Åland Islands", 40_000, 55.0));
    gateway.save_records(&rows).unwrap();

    let a = assistant(Arc::new(gateway));
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "How many doses in Åland Islands?", "en").await;
    assert!(reply.starts_with("In Åland Islands, 40,000 doses"), "got {reply:?}");
    assert_eq!(ctx.last_location.as_deref(), Some("åland islands"));
}

// ============================================================================
// Emotions
// ============================================================================

#[tokio::test]
async fn test_anger_beats_fear() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "I am angry and scared", "en").await;
    assert!(reply.starts_with("I understand your frustration. "), "got {reply:?}");
    assert!(is_reply_of(&reply, "feeling_angry"));

    let explanation = a.explain(&ctx, "I am angry and scared");
    assert_eq!(explanation.route, Route::Emotional);
}

#[tokio::test]
async fn test_statistics_outrank_emotion() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "I am worried, how many doses in India?", "en").await;
    assert_eq!(reply, INDIA_REPLY);
}

// ============================================================================
// Localization
// ============================================================================

#[tokio::test]
async fn test_pre_translated_reply_skips_service() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translatedText": "x"})))
        .expect(0)
        .mount(&server)
        .await;

    let a = assistant_with_translator(mock_gateway(), translator_for(&server), Duration::from_secs(2));
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "Hello", "hi-IN").await;
    let kb = a.knowledge();
    let candidates = kb.translations().lookup("hi", "greeting").unwrap();
    assert!(candidates.iter().any(|c| reply.contains(c.as_str())), "got {reply:?}");
}

#[tokio::test]
async fn test_machine_translation_for_other_languages() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/translate"))
        .and(body_partial_json(json!({"target": "de"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"translatedText": "Übersetzt."})))
        .expect(1)
        .mount(&server)
        .await;

    let a = assistant_with_translator(mock_gateway(), translator_for(&server), Duration::from_secs(2));
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "What are the side effects?", "de").await;
    assert!(reply.starts_with("Übersetzt."), "got {reply:?}");
}

#[tokio::test]
async fn test_data_answers_are_localized_from_tables() {
    let a = assistant(mock_gateway());
    let mut ctx = ConversationContext::default();

    let reply = a.respond(&mut ctx, "How many doses in India?", "fr").await;
    assert_eq!(
        reply,
        "En India, 2,206,954,213 doses ont été administrées (72.5 % vaccinés)."
    );

    let reply = a.respond(&mut ctx, "zzqx-42 ###", "French").await;
    assert!(reply.starts_with("Je ne suis pas sûr de comprendre."));
}

// ============================================================================
// Conversations and Sessions
// ============================================================================

#[tokio::test]
async fn test_conversation_keeps_context() {
    let mut conversation = Conversation::new(Arc::new(assistant(mock_gateway())));

    conversation.respond("India vaccination rate", "en").await;
    assert_eq!(conversation.context().last_location.as_deref(), Some("india"));

    let reply = conversation.respond("and the doses?", "en").await;
    assert_eq!(reply, INDIA_REPLY);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let a = Arc::new(assistant(mock_gateway()));
    let sessions = SessionStore::new();

    a.respond_in_session(&sessions, "alice", "How many doses in India?", "en").await;
    a.respond_in_session(&sessions, "bob", "France vaccination status", "en").await;

    let alice = a.respond_in_session(&sessions, "alice", "what about doses", "en").await;
    let bob = a.respond_in_session(&sessions, "bob", "what about doses", "en").await;

    assert_eq!(alice, INDIA_REPLY);
    assert!(bob.starts_with("In France"));
    assert_eq!(sessions.len().await, 2);
}

#[tokio::test]
async fn test_assistant_is_shareable_across_tasks() {
    let a = Arc::new(assistant(mock_gateway()));

    let handles: Vec<_> = ["India", "France", "Brazil", "Qatar"]
        .into_iter()
        .map(|country| {
            let a = Arc::clone(&a);
            tokio::spawn(async move {
                let mut ctx = ConversationContext::default();
                let reply = a.respond(&mut ctx, &format!("How many doses in {country}?"), "en").await;
                (country, reply)
            })
        })
        .collect();

    for handle in handles {
        let (country, reply) = handle.await.unwrap();
        assert!(reply.starts_with(&format!("In {country},")), "got {reply:?}");
    }
}
