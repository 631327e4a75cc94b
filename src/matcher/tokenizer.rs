//! Word tokenizer shared by training and query projection

use regex::Regex;
use std::sync::OnceLock;

/// Split text into lower-cased tokens of two or more word characters
pub fn tokenize(text: &str) -> Vec<String> {
    static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

    let re = TOKEN_RE.get_or_init(|| Regex::new(r"(?u)\b\w\w+\b").expect("Invalid regex pattern"));

    let lower = text.to_lowercase();
    re.find_iter(&lower).map(|m| m.as_str().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_basic() {
        assert_eq!(tokenize("Is the Vaccine safe?"), vec!["is", "the", "vaccine", "safe"]);
    }

    #[test]
    fn test_single_characters_dropped() {
        assert_eq!(tokenize("a b cd"), vec!["cd"]);
    }

    #[test]
    fn test_punctuation_splits() {
        assert_eq!(tokenize("covid-19 side-effects"), vec!["covid", "19", "side", "effects"]);
    }

    #[test]
    fn test_apostrophe_splits() {
        // "don't" yields "don"; the lone "t" is too short
        assert_eq!(tokenize("don't"), vec!["don"]);
    }

    #[test]
    fn test_unicode_words() {
        assert_eq!(tokenize("Über café"), vec!["über", "café"]);
    }
}
