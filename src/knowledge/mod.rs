//! Static FAQ knowledge catalog
//!
//! The catalog is a list of intents, each with example phrasings used to
//! train the similarity matcher and a set of candidate replies. It is
//! loaded once at startup and never mutated afterwards.
//!
//! Two data files are embedded into the binary:
//!
//! - `data/knowledge_base.json` - base-language (English) intents
//! - `data/translations.json` - pre-translated replies keyed by language and intent
//!
//! # Example
//!
//! ```rust
//! use vaxassist::knowledge::KnowledgeBase;
//!
//! let kb = KnowledgeBase::builtin().unwrap();
//! let corpus = kb.corpus();
//! assert!(corpus.len() >= kb.len());
//! ```

use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

use crate::utils::error::KnowledgeError;

const BUILTIN_CATALOG: &str = include_str!("../../data/knowledge_base.json");
const BUILTIN_TRANSLATIONS: &str = include_str!("../../data/translations.json");

/// Result type alias for catalog loading
pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// One FAQ topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    /// Unique intent name
    pub intent: String,

    /// Example phrasings, only used to train the matcher
    pub patterns: Vec<String>,

    /// Candidate replies, one is chosen per answer
    pub responses: Vec<String>,
}

/// Flattened (pattern, intent) pairs in catalog order
#[derive(Debug, Clone, Default)]
pub struct TrainingCorpus {
    patterns: Vec<String>,
    intents: Vec<String>,
}

impl TrainingCorpus {
    /// Number of patterns
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern phrases in build order
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Intent owning the pattern at `index`
    pub fn intent_at(&self, index: usize) -> Option<&str> {
        self.intents.get(index).map(String::as_str)
    }

    /// Iterate `(pattern, intent)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.patterns
            .iter()
            .zip(self.intents.iter())
            .map(|(p, i)| (p.as_str(), i.as_str()))
    }
}

/// Pre-translated replies: language -> intent -> candidates
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationCatalog {
    tables: HashMap<String, HashMap<String, Vec<String>>>,
}

impl TranslationCatalog {
    /// Load the translation tables bundled with the crate
    pub fn builtin() -> KnowledgeResult<Self> {
        Self::from_json(BUILTIN_TRANSLATIONS)
    }

    /// Parse translation tables from JSON
    pub fn from_json(json: &str) -> KnowledgeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Add candidates for one language and intent
    pub fn insert(&mut self, lang: &str, intent: &str, replies: Vec<String>) {
        self.tables
            .entry(lang.to_string())
            .or_default()
            .insert(intent.to_string(), replies);
    }

    /// Candidates for `intent` in `lang`, if any exist
    pub fn lookup(&self, lang: &str, intent: &str) -> Option<&[String]> {
        self.tables
            .get(lang)
            .and_then(|table| table.get(intent))
            .map(Vec::as_slice)
            .filter(|replies| !replies.is_empty())
    }

    /// Whether `text` is one of the pre-translated replies for `lang`
    pub fn contains_reply(&self, lang: &str, text: &str) -> bool {
        self.tables
            .get(lang)
            .is_some_and(|table| table.values().any(|replies| replies.iter().any(|r| r == text)))
    }

    /// Languages with at least one table
    pub fn languages(&self) -> Vec<&str> {
        let mut langs: Vec<&str> = self.tables.keys().map(String::as_str).collect();
        langs.sort_unstable();
        langs
    }
}

/// The loaded catalog
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<KnowledgeEntry>,
    index: HashMap<String, usize>,
    translations: TranslationCatalog,
}

impl KnowledgeBase {
    /// Load the catalog and translations bundled with the crate
    pub fn builtin() -> KnowledgeResult<Self> {
        let kb = Self::from_json(BUILTIN_CATALOG)?.with_translations(TranslationCatalog::builtin()?);

        tracing::info!(
            intents = kb.len(),
            patterns = kb.corpus().len(),
            languages = ?kb.translations.languages(),
            "Knowledge base loaded"
        );

        Ok(kb)
    }

    /// Parse a catalog from JSON (array of entries)
    pub fn from_json(json: &str) -> KnowledgeResult<Self> {
        let entries: Vec<KnowledgeEntry> = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    /// Build a catalog from entries, validating intent names and replies
    pub fn from_entries(entries: Vec<KnowledgeEntry>) -> KnowledgeResult<Self> {
        let mut index = HashMap::with_capacity(entries.len());
        let mut cleaned = Vec::with_capacity(entries.len());

        for (position, mut entry) in entries.into_iter().enumerate() {
            let intent = entry.intent.trim().to_string();
            if intent.is_empty() {
                return Err(KnowledgeError::EmptyIntent);
            }
            if index.insert(intent.clone(), position).is_some() {
                return Err(KnowledgeError::DuplicateIntent(intent));
            }

            // Replies form a set; keep first occurrence order
            let mut seen = HashSet::new();
            entry.responses.retain(|r| !r.trim().is_empty() && seen.insert(r.clone()));
            if entry.responses.is_empty() {
                return Err(KnowledgeError::NoResponses(intent));
            }

            entry.patterns.retain(|p| !p.trim().is_empty());
            entry.intent = intent;
            cleaned.push(entry);
        }

        Ok(Self {
            entries: cleaned,
            index,
            translations: TranslationCatalog::default(),
        })
    }

    /// Attach pre-translated reply tables
    pub fn with_translations(mut self, translations: TranslationCatalog) -> Self {
        self.translations = translations;
        self
    }

    /// Look up an entry by intent
    pub fn get(&self, intent: &str) -> Option<&KnowledgeEntry> {
        self.index.get(intent).and_then(|&i| self.entries.get(i))
    }

    /// Whether `intent` exists
    pub fn contains(&self, intent: &str) -> bool {
        self.index.contains_key(intent)
    }

    /// All entries in catalog order
    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Number of intents
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pre-translated reply tables
    pub fn translations(&self) -> &TranslationCatalog {
        &self.translations
    }

    /// Flatten patterns into the matcher's training corpus
    pub fn corpus(&self) -> TrainingCorpus {
        let mut corpus = TrainingCorpus::default();
        for entry in &self.entries {
            for pattern in &entry.patterns {
                corpus.patterns.push(pattern.clone());
                corpus.intents.push(entry.intent.clone());
            }
        }
        corpus
    }

    /// All patterns and replies, used to seed the spelling vocabulary
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().flat_map(|e| {
            e.patterns
                .iter()
                .chain(e.responses.iter())
                .map(String::as_str)
        })
    }
}
