//! Reply selection, localization and empathy overlay
//!
//! Localizing a knowledge-base answer tries, in order:
//! 1. a pre-translated reply for the requested language
//! 2. a base-language reply, machine-translated when the languages differ
//!
//! A failed translation keeps the base text and appends an apology instead
//! of failing the turn.

pub mod phrases;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::Mutex;
use std::time::Duration;

use crate::knowledge::KnowledgeBase;
use crate::metrics;
use crate::models::{Emotion, SentimentResult};
use crate::translate::SharedTranslator;
use crate::utils::error::TranslationError;

/// Polarity below which the negative prefix is added
pub const NEGATIVE_POLARITY: f32 = -0.3;

/// Polarity above which the positive suffix is added
pub const POSITIVE_POLARITY: f32 = 0.5;

/// Where a localized reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    /// Pre-translated table
    Dictionary,
    /// Base-language catalog, no translation needed
    Base,
    /// Base-language catalog, machine-translated
    Translated,
    /// Translation failed, base text plus apology
    Untranslated,
}

impl ReplySource {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dictionary => "dictionary",
            Self::Base => "base",
            Self::Translated => "translated",
            Self::Untranslated => "failed",
        }
    }
}

/// Picks and localizes replies
pub struct ResponseComposer {
    base_language: String,
    translator: SharedTranslator,
    translation_timeout: Duration,
    rng: Mutex<ChaCha8Rng>,
}

impl std::fmt::Debug for ResponseComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResponseComposer")
            .field("base_language", &self.base_language)
            .field("translation_timeout", &self.translation_timeout)
            .finish_non_exhaustive()
    }
}

impl ResponseComposer {
    /// Create a composer
    ///
    /// `seed` makes reply selection reproducible; `None` seeds from entropy.
    pub fn new(
        base_language: impl Into<String>,
        translator: SharedTranslator,
        translation_timeout: Duration,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        Self {
            base_language: base_language.into(),
            translator,
            translation_timeout,
            rng: Mutex::new(rng),
        }
    }

    /// Language of the knowledge base
    pub fn base_language(&self) -> &str {
        &self.base_language
    }

    /// Choose one candidate at random
    pub fn pick(&self, candidates: &[String]) -> Option<String> {
        // The guard is dropped before any await point
        let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        candidates.choose(&mut *rng).cloned()
    }

    /// A reply for `intent` in `lang`, with its source
    pub async fn localized_reply(
        &self,
        kb: &KnowledgeBase,
        intent: &str,
        lang: &str,
    ) -> (String, ReplySource) {
        if lang != self.base_language {
            if let Some(reply) = kb.translations().lookup(lang, intent).and_then(|c| self.pick(c)) {
                metrics::record_translation(ReplySource::Dictionary.as_str());
                return (reply, ReplySource::Dictionary);
            }
        }

        let base = kb
            .get(intent)
            .and_then(|entry| self.pick(&entry.responses))
            .unwrap_or_else(|| phrases::retrieval_trouble(&self.base_language));

        if lang == self.base_language {
            return (base, ReplySource::Base);
        }

        let (text, source) = self.translate_or_apologize(base, lang).await;
        metrics::record_translation(source.as_str());
        (text, source)
    }

    /// Translate base-language text, appending an apology on failure
    pub async fn translate_or_apologize(&self, text: String, lang: &str) -> (String, ReplySource) {
        match self.translate(&text, lang).await {
            Ok(translated) => (translated, ReplySource::Translated),
            Err(e) => {
                tracing::warn!(error = %e, lang, "Translation failed, replying untranslated");
                let apology = phrases::translation_apology(lang);
                (format!("{text}{apology}"), ReplySource::Untranslated)
            }
        }
    }

    async fn translate(&self, text: &str, lang: &str) -> Result<String, TranslationError> {
        match tokio::time::timeout(self.translation_timeout, self.translator.translate(text, lang)).await {
            Ok(result) => result,
            Err(_) => Err(TranslationError::Timeout(self.translation_timeout.as_secs())),
        }
    }

    /// Add the empathy overlay for the detected tone
    ///
    /// Emotion takes precedence over polarity.
    pub fn compose(
        &self,
        response: &str,
        sentiment: SentimentResult,
        emotion: Option<Emotion>,
        lang: &str,
    ) -> String {
        compose(response, sentiment, emotion, lang)
    }
}

/// Empathy overlay, see [`ResponseComposer::compose`]
pub fn compose(
    response: &str,
    sentiment: SentimentResult,
    emotion: Option<Emotion>,
    lang: &str,
) -> String {
    if let Some(emotion) = emotion {
        return format!("{}{response}", phrases::empathy_prefix(emotion, lang));
    }

    if sentiment.polarity < NEGATIVE_POLARITY {
        format!("{}{response}", phrases::negative_prefix(lang))
    } else if sentiment.polarity > POSITIVE_POLARITY {
        format!("{response}{}", phrases::positive_suffix(lang))
    } else {
        response.to_string()
    }
}
