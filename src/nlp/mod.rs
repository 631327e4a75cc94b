//! Lexical normalization of user input
//!
//! This module prepares raw user text for matching:
//! - Conservative spelling correction of alphabetic tokens
//! - Sentiment scoring (polarity, subjectivity)
//! - Keyword-based emotion detection
//!
//! Spelling and sentiment are pluggable capabilities ([`SpellCorrector`],
//! [`SentimentScorer`]). Their failures never reach the user: normalization
//! passes the text through and sentiment degrades to neutral.

pub mod emotion;
pub mod sentiment;
pub mod spelling;

pub use emotion::detect_emotion;
pub use sentiment::{LexiconSentiment, SentimentScorer};
pub use spelling::{FrequencyCorrector, SpellCorrector};

use std::sync::Arc;

use crate::knowledge::KnowledgeBase;
use crate::models::{Emotion, SentimentResult};
use crate::utils::capitalize;
use crate::utils::error::NormalizeError;

/// Tokens this short are never corrected
const MIN_CORRECTABLE_LEN: usize = 3;

/// Result of normalizing one input
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Normalized {
    /// Normalized text
    pub text: String,
    /// Accepted corrections as (original, replacement)
    pub corrections: Vec<(String, String)>,
}

/// Spelling, sentiment and emotion front end
#[derive(Clone)]
pub struct LexicalNormalizer {
    corrector: Arc<dyn SpellCorrector>,
    scorer: Arc<dyn SentimentScorer>,
}

impl std::fmt::Debug for LexicalNormalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LexicalNormalizer").finish_non_exhaustive()
    }
}

impl LexicalNormalizer {
    /// Create a normalizer from explicit capabilities
    pub fn new(corrector: Arc<dyn SpellCorrector>, scorer: Arc<dyn SentimentScorer>) -> Self {
        Self { corrector, scorer }
    }

    /// Normalizer with the bundled corrector and lexicon
    ///
    /// The spelling vocabulary covers the catalog text and `locations`, so
    /// topic words and country names are never "corrected" away.
    pub fn builtin(kb: &KnowledgeBase, locations: &[String]) -> Result<Self, NormalizeError> {
        let mut corrector = FrequencyCorrector::builtin();
        for text in kb.texts() {
            corrector.add_text(text);
        }
        for location in locations {
            corrector.add_text(location);
        }

        tracing::debug!(words = corrector.len(), "Spelling vocabulary built");

        Ok(Self::new(
            Arc::new(corrector),
            Arc::new(LexiconSentiment::builtin()?),
        ))
    }

    /// Normalize input text, see [`LexicalNormalizer::normalize_detailed`]
    pub fn normalize(&self, raw: &str) -> String {
        self.normalize_detailed(raw).text
    }

    /// Normalize input text and report accepted corrections
    ///
    /// On corrector failure the raw text is returned unchanged.
    pub fn normalize_detailed(&self, raw: &str) -> Normalized {
        match self.try_normalize(raw) {
            Ok(normalized) => normalized,
            Err(e) => {
                tracing::warn!(error = %e, "Spelling correction failed, using raw input");
                Normalized {
                    text: raw.to_string(),
                    corrections: Vec::new(),
                }
            }
        }
    }

    fn try_normalize(&self, raw: &str) -> Result<Normalized, NormalizeError> {
        let mut words = Vec::new();
        let mut corrections = Vec::new();

        for token in raw.split_whitespace() {
            let len = token.chars().count();
            if len < MIN_CORRECTABLE_LEN || !token.chars().all(char::is_alphabetic) {
                words.push(token.to_string());
                continue;
            }

            let lower = token.to_lowercase();
            let corrected = self.corrector.correct(&lower)?;

            if corrected != lower && corrected.chars().count() + 1 >= len {
                let corrected = if token.chars().next().is_some_and(char::is_uppercase) {
                    capitalize(&corrected)
                } else {
                    corrected
                };

                tracing::debug!(from = token, to = %corrected, "Spell check");
                corrections.push((token.to_string(), corrected.clone()));
                words.push(corrected);
            } else {
                words.push(token.to_string());
            }
        }

        Ok(Normalized {
            text: words.join(" "),
            corrections,
        })
    }

    /// Score sentiment; failures degrade to neutral
    pub fn sentiment(&self, text: &str) -> SentimentResult {
        self.scorer.score(text).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Sentiment scoring failed, assuming neutral");
            SentimentResult::NEUTRAL
        })
    }

    /// Detect the dominant emotion keyword category
    pub fn emotion(&self, text: &str) -> Option<Emotion> {
        detect_emotion(text)
    }
}
