//! Intent matching by TF-IDF cosine similarity
//!
//! The matcher is fitted once on every knowledge-base pattern and is
//! read-only afterwards, so a single instance is shared by all conversations.
//!
//! # Example
//!
//! ```rust
//! use vaxassist::knowledge::KnowledgeBase;
//! use vaxassist::matcher::SimilarityMatcher;
//!
//! let kb = KnowledgeBase::builtin().unwrap();
//! let matcher = SimilarityMatcher::new(&kb.corpus()).unwrap();
//! let result = matcher.best_match("what are the symptoms of covid");
//! assert!(result.confidence > 0.3);
//! ```

pub mod tokenizer;
pub mod vectorize;

pub use tokenizer::tokenize;
pub use vectorize::{cosine, SparseVector, TfIdfVectorizer};

use crate::knowledge::TrainingCorpus;
use crate::models::MatchResult;
use crate::utils::error::KnowledgeError;

/// Fitted vector space over all training patterns
#[derive(Debug, Clone)]
pub struct SimilarityMatcher {
    vectorizer: TfIdfVectorizer,
    vectors: Vec<SparseVector>,
    intents: Vec<String>,
}

impl SimilarityMatcher {
    /// Fit the matcher on a training corpus
    pub fn new(corpus: &TrainingCorpus) -> Result<Self, KnowledgeError> {
        if corpus.is_empty() {
            return Err(KnowledgeError::EmptyCorpus);
        }

        let vectorizer = TfIdfVectorizer::fit(corpus.patterns());
        let vectors = corpus
            .patterns()
            .iter()
            .map(|p| vectorizer.transform(p))
            .collect();
        let intents = corpus.iter().map(|(_, intent)| intent.to_string()).collect();

        tracing::info!(
            patterns = corpus.len(),
            terms = vectorizer.vocabulary_len(),
            "Similarity matcher fitted"
        );

        Ok(Self {
            vectorizer,
            vectors,
            intents,
        })
    }

    /// Number of fitted patterns
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    fn scores(&self, text: &str) -> Vec<f32> {
        let query = self.vectorizer.transform(text);
        self.vectors.iter().map(|v| cosine(&query, v)).collect()
    }

    /// Intent of the most similar pattern
    ///
    /// Ties go to the earliest pattern. A query sharing no terms with the
    /// corpus scores 0.0 against the first pattern.
    pub fn best_match(&self, text: &str) -> MatchResult {
        let mut best = (0, f32::NEG_INFINITY);
        for (i, score) in self.scores(text).into_iter().enumerate() {
            if score > best.1 {
                best = (i, score);
            }
        }

        MatchResult {
            intent: self.intents[best.0].clone(),
            confidence: best.1.max(0.0),
        }
    }

    /// The `k` best intents, each scored by its best pattern
    pub fn top_matches(&self, text: &str, k: usize) -> Vec<MatchResult> {
        let mut per_intent: Vec<MatchResult> = Vec::new();

        for (i, score) in self.scores(text).into_iter().enumerate() {
            let intent = &self.intents[i];
            match per_intent.iter_mut().find(|m| &m.intent == intent) {
                Some(existing) if score > existing.confidence => existing.confidence = score,
                Some(_) => {}
                None => per_intent.push(MatchResult {
                    intent: intent.clone(),
                    confidence: score,
                }),
            }
        }

        // Stable sort keeps corpus order among equal scores
        per_intent.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));
        per_intent.truncate(k);
        per_intent
    }
}
