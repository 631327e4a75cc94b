//! Dialogue controller
//!
//! [`Assistant`] turns one user message into one reply:
//!
//! ```text
//! raw text -> normalizer -> {entities, sentiment, emotion} -> RULES
//!          -> statistics store / knowledge base -> composer -> reply
//! ```
//!
//! Nothing here returns an error to the caller once the assistant is built.
//! Store and translation failures become apologies in the reply.

pub mod context;
pub mod rules;

pub use context::{Conversation, ConversationContext, SessionStore};
pub use rules::{select_route, Route, Turn, RULES};

use std::sync::Arc;
use std::time::Duration;

use crate::compose::{phrases, ResponseComposer};
use crate::config::{AssistantConfig, Config};
use crate::entity::{EntityCatalog, EntityRecognizer};
use crate::error::{Error, Result};
use crate::i18n::normalize_locale;
use crate::knowledge::KnowledgeBase;
use crate::matcher::SimilarityMatcher;
use crate::metrics;
use crate::models::{Emotion, MatchResult, SentimentResult};
use crate::nlp::LexicalNormalizer;
use crate::storage::SharedStatsGateway;
use crate::translate::{DisabledTranslator, SharedTranslator};
use crate::utils::{title_case, truncate_text};

/// How many matches `explain` reports
const EXPLAIN_TOP_K: usize = 3;

/// Analysis of one input without answering it
#[derive(Debug, Clone)]
pub struct Explanation {
    pub normalized: String,
    pub corrections: Vec<(String, String)>,
    pub sentiment: SentimentResult,
    pub emotion: Option<Emotion>,
    pub entities: Vec<String>,
    pub route: Route,
    pub top_matches: Vec<MatchResult>,
}

/// The FAQ and statistics assistant
///
/// Holds only startup-derived state and is shared behind `Arc`; the
/// per-conversation state lives in [`ConversationContext`].
pub struct Assistant {
    config: AssistantConfig,
    knowledge: KnowledgeBase,
    matcher: SimilarityMatcher,
    recognizer: EntityRecognizer,
    normalizer: LexicalNormalizer,
    gateway: SharedStatsGateway,
    composer: ResponseComposer,
}

impl std::fmt::Debug for Assistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assistant")
            .field("intents", &self.knowledge.len())
            .field("patterns", &self.matcher.len())
            .field("locations", &self.recognizer.catalog().len())
            .field("composer", &self.composer)
            .finish_non_exhaustive()
    }
}

impl Assistant {
    /// Start building an assistant
    pub fn builder() -> AssistantBuilder {
        AssistantBuilder::new()
    }

    /// The knowledge base answers come from
    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    /// Dialogue settings
    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Known locations in matching order
    pub fn locations(&self) -> &[String] {
        self.recognizer.catalog().names()
    }

    fn analyse(&self, text: &str) -> (Turn, Vec<(String, String)>) {
        let normalized = self.normalizer.normalize_detailed(text);
        let sentiment = self.normalizer.sentiment(&normalized.text);
        let emotion = self.normalizer.emotion(&normalized.text);
        let entities = self.recognizer.extract(&normalized.text);

        let turn = Turn::new(text, normalized.text, sentiment, emotion, entities);
        (turn, normalized.corrections)
    }

    /// Answer one user message
    ///
    /// `ctx` is read for follow-up questions and updated after a successful
    /// location answer. `lang` accepts tags like `hi-IN` or names like
    /// `Hindi`; empty means the base language.
    pub async fn respond(&self, ctx: &mut ConversationContext, text: &str, lang: &str) -> String {
        let _timer = metrics::start_respond_timer();
        let lang = normalize_locale(lang, &self.config.base_language);

        let (turn, corrections) = self.analyse(text);
        let route = select_route(&turn, ctx, &self.knowledge);
        metrics::record_turn(route.as_str());

        tracing::debug!(
            input = %truncate_text(text, 80),
            normalized = %turn.normalized,
            corrections = corrections.len(),
            route = %route,
            lang = %lang,
            "Routing turn"
        );

        match route {
            Route::Ranking => self.ranking_reply(&turn, &lang),
            Route::CountryStats => self.country_stats_reply(ctx, &turn, &lang),
            Route::Emotional => self.emotional_reply(&turn, &lang).await,
            Route::KnowledgeMatch => self.knowledge_reply(ctx, &turn, &lang).await,
        }
    }

    /// Answer within a stored session
    pub async fn respond_in_session(
        &self,
        sessions: &SessionStore,
        session_id: &str,
        text: &str,
        lang: &str,
    ) -> String {
        let mut ctx = sessions.load(session_id).await;
        let reply = self.respond(&mut ctx, text, lang).await;
        sessions.save(session_id, ctx).await;
        reply
    }

    /// Show how a message would be understood, without answering it
    pub fn explain(&self, ctx: &ConversationContext, text: &str) -> Explanation {
        let (turn, corrections) = self.analyse(text);
        let route = select_route(&turn, ctx, &self.knowledge);
        let top_matches = self.matcher.top_matches(&turn.normalized, EXPLAIN_TOP_K);

        Explanation {
            normalized: turn.normalized,
            corrections,
            sentiment: turn.sentiment,
            emotion: turn.emotion,
            entities: turn.entities,
            route,
            top_matches,
        }
    }

    fn ranking_reply(&self, turn: &Turn, lang: &str) -> String {
        let limit = rules::ranking_limit(
            &turn.lower,
            self.config.ranking_limit,
            self.config.max_ranking_limit,
        );

        match self.gateway.latest_stats(limit) {
            Ok(rows) => phrases::ranking(&rows, lang),
            Err(e) => {
                tracing::warn!(error = %e, limit, "Ranking lookup failed");
                metrics::record_gateway_error("latest_stats");
                phrases::data_error(lang)
            }
        }
    }

    fn country_stats_reply(&self, ctx: &mut ConversationContext, turn: &Turn, lang: &str) -> String {
        let Some(location) = turn
            .entities
            .first()
            .cloned()
            .or_else(|| ctx.last_location.clone())
        else {
            return phrases::clarify_location(lang);
        };

        match self.gateway.latest_for_location(&location) {
            Ok(Some(stats)) => {
                tracing::debug!(location = %location, "Answered location statistics");
                ctx.last_location = Some(location);
                phrases::country_stats(&stats, lang)
            }
            Ok(None) => phrases::no_data(&title_case(&location), lang),
            Err(e) => {
                tracing::warn!(error = %e, location = %location, "Location lookup failed");
                metrics::record_gateway_error("latest_for_location");
                phrases::data_error(lang)
            }
        }
    }

    async fn emotional_reply(&self, turn: &Turn, lang: &str) -> String {
        let reply = match turn.emotion {
            Some(emotion) => {
                self.composer
                    .localized_reply(&self.knowledge, emotion.intent(), lang)
                    .await
                    .0
            }
            None => phrases::fallback(lang),
        };

        self.composer.compose(&reply, turn.sentiment, turn.emotion, lang)
    }

    async fn knowledge_reply(&self, ctx: &mut ConversationContext, turn: &Turn, lang: &str) -> String {
        let best = self.matcher.best_match(&turn.normalized);

        tracing::debug!(intent = %best.intent, confidence = best.confidence, "Best knowledge match");

        let reply = if best.confidence < self.config.min_confidence {
            if turn.entities.is_empty() {
                phrases::fallback(lang)
            } else {
                self.country_stats_reply(ctx, turn, lang)
            }
        } else {
            self.composer
                .localized_reply(&self.knowledge, &best.intent, lang)
                .await
                .0
        };

        self.composer.compose(&reply, turn.sentiment, turn.emotion, lang)
    }
}

/// Builder for [`Assistant`]
#[derive(Default)]
pub struct AssistantBuilder {
    config: AssistantConfig,
    translation_timeout: Option<Duration>,
    gateway: Option<SharedStatsGateway>,
    translator: Option<SharedTranslator>,
    knowledge: Option<KnowledgeBase>,
    normalizer: Option<LexicalNormalizer>,
    rng_seed: Option<u64>,
}

impl AssistantBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Take dialogue settings and the translation timeout from `config`
    pub fn from_config(config: &Config) -> Self {
        Self {
            config: config.assistant.clone(),
            translation_timeout: Some(config.translation_timeout()),
            ..Self::default()
        }
    }

    /// Set dialogue settings
    pub fn config(mut self, config: AssistantConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the statistics store (required)
    pub fn gateway(mut self, gateway: SharedStatsGateway) -> Self {
        self.gateway = Some(gateway);
        self
    }

    /// Set the translator; translation is disabled otherwise
    pub fn translator(mut self, translator: SharedTranslator) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Bound on one translation call
    pub fn translation_timeout(mut self, timeout: Duration) -> Self {
        self.translation_timeout = Some(timeout);
        self
    }

    /// Use a custom knowledge base instead of the bundled one
    pub fn knowledge_base(mut self, knowledge: KnowledgeBase) -> Self {
        self.knowledge = Some(knowledge);
        self
    }

    /// Use a custom normalizer instead of the bundled one
    pub fn normalizer(mut self, normalizer: LexicalNormalizer) -> Self {
        self.normalizer = Some(normalizer);
        self
    }

    /// Seed reply selection, overriding `reply_seed` from the config
    pub fn rng_seed(mut self, seed: u64) -> Self {
        self.rng_seed = Some(seed);
        self
    }

    /// Build the assistant
    ///
    /// Loads the location catalog from the store. An unreachable store
    /// gives an empty catalog rather than an error.
    pub fn build(self) -> Result<Assistant> {
        let gateway = self
            .gateway
            .ok_or_else(|| Error::config("a statistics gateway is required"))?;

        let knowledge = match self.knowledge {
            Some(kb) => kb,
            None => KnowledgeBase::builtin()?,
        };

        let matcher = SimilarityMatcher::new(&knowledge.corpus())?;
        let catalog = EntityCatalog::from_gateway(gateway.as_ref());

        let normalizer = match self.normalizer {
            Some(normalizer) => normalizer,
            None => LexicalNormalizer::builtin(&knowledge, catalog.names())?,
        };

        let seed = self.rng_seed.or(self.config.reply_seed);
        let composer = ResponseComposer::new(
            self.config.base_language.clone(),
            self.translator.unwrap_or_else(|| Arc::new(DisabledTranslator)),
            self.translation_timeout
                .unwrap_or_else(|| Config::default().translation_timeout()),
            seed,
        );

        tracing::info!(
            intents = knowledge.len(),
            patterns = matcher.len(),
            locations = catalog.len(),
            seeded = seed.is_some(),
            "Assistant ready"
        );

        Ok(Assistant {
            config: self.config,
            knowledge,
            matcher,
            recognizer: EntityRecognizer::new(catalog),
            normalizer,
            gateway,
            composer,
        })
    }
}
