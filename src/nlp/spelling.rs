//! Frequency-based spelling correction
//!
//! A small Norvig-style corrector: known words are kept, otherwise the most
//! frequent known word at edit distance 1 (then 2) replaces the input. The
//! vocabulary is assembled at startup from the knowledge catalog, a bundled
//! word list and the location names known to the statistics store.

use std::collections::{HashMap, HashSet};

use crate::utils::error::NormalizeError;

const BUILTIN_WORDS: &str = include_str!("../../data/words.txt");
const ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Words longer than this skip the distance-2 search
const MAX_EDIT2_LEN: usize = 14;

/// Spelling correction capability
pub trait SpellCorrector: Send + Sync {
    /// Return the corrected, lower-cased form of `word`
    fn correct(&self, word: &str) -> Result<String, NormalizeError>;
}

/// Corrector backed by a word-frequency table
#[derive(Debug, Clone, Default)]
pub struct FrequencyCorrector {
    counts: HashMap<String, u64>,
}

impl FrequencyCorrector {
    /// Create an empty corrector
    pub fn new() -> Self {
        Self::default()
    }

    /// Corrector seeded with the bundled word list
    pub fn builtin() -> Self {
        Self::from_word_list(BUILTIN_WORDS)
    }

    /// Parse a word list: one `word [count]` per line, `#` starts a comment
    pub fn from_word_list(list: &str) -> Self {
        let mut corrector = Self::new();
        for line in list.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let mut parts = line.split_whitespace();
            if let Some(word) = parts.next() {
                let count = parts.next().and_then(|c| c.parse().ok()).unwrap_or(1);
                corrector.add_word(word, count);
            }
        }
        corrector
    }

    /// Add `count` occurrences of `word`
    pub fn add_word(&mut self, word: &str, count: u64) {
        let word = word.to_lowercase();
        if word.chars().all(char::is_alphabetic) && !word.is_empty() {
            *self.counts.entry(word).or_insert(0) += count;
        }
    }

    /// Count every alphabetic word in `text`
    pub fn add_text(&mut self, text: &str) {
        for word in text.split(|c: char| !c.is_alphabetic()) {
            if !word.is_empty() {
                self.add_word(word, 1);
            }
        }
    }

    /// Number of distinct known words
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Whether `word` is in the vocabulary
    pub fn is_known(&self, word: &str) -> bool {
        self.counts.contains_key(&word.to_lowercase())
    }

    /// Most frequent known candidate; ties break lexicographically
    fn best_known<'a>(&self, candidates: impl IntoIterator<Item = &'a String>) -> Option<String> {
        candidates
            .into_iter()
            .filter_map(|c| self.counts.get(c).map(|&n| (n, c)))
            .max_by(|(na, a), (nb, b)| na.cmp(nb).then_with(|| b.cmp(a)))
            .map(|(_, c)| c.clone())
    }
}

/// All strings one delete, transpose, replace or insert away from `word`
fn edits1(word: &str) -> HashSet<String> {
    let chars: Vec<char> = word.chars().collect();
    let n = chars.len();
    let mut out = HashSet::with_capacity(54 * n + 25);

    for i in 0..=n {
        let (left, right) = chars.split_at(i);
        let left: String = left.iter().collect();

        if !right.is_empty() {
            let rest: String = right[1..].iter().collect();
            out.insert(format!("{left}{rest}"));

            if right.len() > 1 {
                let tail: String = right[2..].iter().collect();
                out.insert(format!("{left}{}{}{tail}", right[1], right[0]));
            }

            for c in ALPHABET.chars() {
                out.insert(format!("{left}{c}{rest}"));
            }
        }

        let right: String = right.iter().collect();
        for c in ALPHABET.chars() {
            out.insert(format!("{left}{c}{right}"));
        }
    }

    out
}

impl SpellCorrector for FrequencyCorrector {
    fn correct(&self, word: &str) -> Result<String, NormalizeError> {
        let lower = word.to_lowercase();

        if lower.is_empty() || !lower.chars().all(|c| c.is_ascii_lowercase()) {
            return Ok(lower);
        }
        if self.counts.contains_key(&lower) {
            return Ok(lower);
        }

        let first = edits1(&lower);
        if let Some(best) = self.best_known(&first) {
            return Ok(best);
        }

        if lower.len() <= MAX_EDIT2_LEN {
            let second: HashSet<String> = first.iter().flat_map(|e| edits1(e)).collect();
            if let Some(best) = self.best_known(&second) {
                return Ok(best);
            }
        }

        Ok(lower)
    }
}
