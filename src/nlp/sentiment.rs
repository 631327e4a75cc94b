//! Lexicon sentiment scoring
//!
//! Each word found in the lexicon contributes its polarity and subjectivity.
//! A preceding intensifier ("very", "so") scales the word, a negation within
//! the two previous tokens flips and halves its polarity. The result is the
//! mean over all scored words.

use regex::Regex;
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use crate::models::SentimentResult;
use crate::utils::error::NormalizeError;

const BUILTIN_LEXICON: &str = include_str!("../../data/sentiment_lexicon.json");

/// How many tokens back a negation still applies
const NEGATION_WINDOW: usize = 2;
const NEGATION_FACTOR: f32 = -0.5;

/// Sentiment scoring capability
pub trait SentimentScorer: Send + Sync {
    /// Score the tone of `text`
    fn score(&self, text: &str) -> Result<SentimentResult, NormalizeError>;
}

#[derive(Debug, Deserialize)]
struct LexiconFile {
    words: HashMap<String, (f32, f32)>,
    #[serde(default)]
    intensifiers: HashMap<String, f32>,
    #[serde(default)]
    negations: Vec<String>,
}

/// Word-list sentiment scorer
#[derive(Debug, Clone)]
pub struct LexiconSentiment {
    words: HashMap<String, (f32, f32)>,
    intensifiers: HashMap<String, f32>,
    negations: HashSet<String>,
}

impl LexiconSentiment {
    /// Scorer using the bundled lexicon
    pub fn builtin() -> Result<Self, NormalizeError> {
        Self::from_json(BUILTIN_LEXICON)
    }

    /// Parse a lexicon document
    pub fn from_json(json: &str) -> Result<Self, NormalizeError> {
        let file: LexiconFile = serde_json::from_str(json)
            .map_err(|e| NormalizeError::Sentiment(format!("invalid lexicon: {e}")))?;

        Ok(Self {
            words: file.words,
            intensifiers: file.intensifiers,
            negations: file.negations.into_iter().collect(),
        })
    }

    /// Number of scored words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn tokens(text: &str) -> Vec<String> {
        static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

        let re = TOKEN_RE.get_or_init(|| Regex::new(r"[\p{L}']+").expect("Invalid regex pattern"));

        re.find_iter(&text.to_lowercase())
            .map(|m| m.as_str().trim_matches('\'').to_string())
            .filter(|t| !t.is_empty())
            .collect()
    }
}

impl SentimentScorer for LexiconSentiment {
    fn score(&self, text: &str) -> Result<SentimentResult, NormalizeError> {
        let tokens = Self::tokens(text);
        let mut scored = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = self.words.get(token) else {
                continue;
            };

            if let Some(&factor) = i.checked_sub(1).and_then(|p| self.intensifiers.get(&tokens[p])) {
                polarity *= factor;
                subjectivity *= factor;
            }

            let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
            if window.iter().any(|t| self.negations.contains(t)) {
                polarity *= NEGATION_FACTOR;
            }

            scored.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
        }

        if scored.is_empty() {
            return Ok(SentimentResult::NEUTRAL);
        }

        let n = scored.len() as f32;
        let polarity = scored.iter().map(|(p, _)| p).sum::<f32>() / n;
        let subjectivity = scored.iter().map(|(_, s)| s).sum::<f32>() / n;

        Ok(SentimentResult::new(polarity, subjectivity))
    }
}
