//! Common utilities and helper functions
//!
//! This module provides shared text helpers used across the assistant.

pub mod error;

use regex::Regex;

/// Truncate text to a maximum number of characters
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{truncated}...")
    }
}

/// Format an integer with comma thousands separators (1234567 -> "1,234,567")
pub fn format_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Capitalize the first letter of every whitespace-separated word
pub fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Uppercase the first character, lowercase the rest
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// A fixed list of keywords or short phrases matched on word boundaries
///
/// Matching is case-insensitive and always anchored at the start of a word,
/// so "top" never fires inside "stop". A set built with [`KeywordSet::new`]
/// also requires the keyword to end a word; one built with
/// [`KeywordSet::with_suffixes`] accepts inflections such as
/// "vaccinations" for "vaccination".
#[derive(Debug, Clone)]
pub struct KeywordSet {
    pattern: Option<Regex>,
}

impl KeywordSet {
    /// Keywords must match whole words
    pub fn new(keywords: &[&str]) -> Self {
        Self::build(keywords, r"\b")
    }

    /// Keywords may be followed by further word characters
    pub fn with_suffixes(keywords: &[&str]) -> Self {
        Self::build(keywords, r"\w*")
    }

    fn build(keywords: &[&str], tail: &str) -> Self {
        if keywords.is_empty() {
            return Self { pattern: None };
        }

        let alternation = keywords
            .iter()
            .map(|k| regex::escape(k))
            .collect::<Vec<_>>()
            .join("|");

        let pattern = Regex::new(&format!(r"(?i)\b(?:{alternation}){tail}"))
            .expect("Escaped keyword list is a valid regex");

        Self { pattern: Some(pattern) }
    }

    /// Whether any keyword occurs in `text`
    pub fn matches(&self, text: &str) -> bool {
        self.pattern.as_ref().is_some_and(|p| p.is_match(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("very long text here", 10), "very lo...");
    }

    #[test]
    fn test_format_thousands() {
        assert_eq!(format_thousands(0), "0");
        assert_eq!(format_thousands(999), "999");
        assert_eq!(format_thousands(1000), "1,000");
        assert_eq!(format_thousands(1_000_000), "1,000,000");
        assert_eq!(format_thousands(2_206_954_213), "2,206,954,213");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("united states"), "United States");
        assert_eq!(title_case("INDIA"), "India");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_keyword_set_word_boundaries() {
        static KEYWORDS: &[&str] = &["top", "how many", "don't understand"];
        let set = KeywordSet::new(KEYWORDS);

        assert!(set.matches("Top 5 countries"));
        assert!(set.matches("how many doses"));
        assert!(set.matches("I don't understand this"));
        assert!(!set.matches("please stop"));
        assert!(!set.matches("how much"));
    }

    #[test]
    fn test_keyword_set_with_suffixes() {
        static KEYWORDS: &[&str] = &["vaccination", "rate", "how many"];
        let set = KeywordSet::with_suffixes(KEYWORDS);

        assert!(set.matches("India vaccinations"));
        assert!(set.matches("Vaccination rates in France"));
        assert!(set.matches("how many doses"));
        assert!(!set.matches("prorate it"));
        assert!(!set.matches("antivaccination"));
        assert!(!KeywordSet::new(KEYWORDS).matches("India vaccinations"));
    }

    #[test]
    fn test_empty_keyword_set_never_matches() {
        static NONE: &[&str] = &[];
        assert!(!KeywordSet::new(NONE).matches("anything"));
        assert!(!KeywordSet::with_suffixes(NONE).matches("anything"));
    }
}
