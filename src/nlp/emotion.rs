//! Keyword-based emotion detection
//!
//! A plain keyword scan, not a classifier. Input that straddles several
//! categories resolves to the first one in [`Emotion::all`] order.

use std::sync::OnceLock;

use crate::models::Emotion;
use crate::utils::KeywordSet;

pub const ANGER_KEYWORDS: &[&str] = &[
    "angry", "mad", "furious", "annoyed", "irritated", "frustrated", "hate", "sucks", "infuriating",
];

pub const FEAR_KEYWORDS: &[&str] = &[
    "scared", "afraid", "terrified", "frightened", "worried", "nervous", "anxious", "fear",
];

pub const BOREDOM_KEYWORDS: &[&str] = &[
    "bored", "boring", "too long", "tldr", "too much", "short answer", "quick", "brief", "fed up", "tired",
];

pub const CONFUSION_KEYWORDS: &[&str] = &[
    "confused", "don't understand", "confusing", "not clear", "unclear", "lost", "don't get", "clarify",
];

pub const SADNESS_KEYWORDS: &[&str] = &[
    "sad", "depressed", "down", "upset", "crying", "devastated", "heartbroken", "miserable", "unhappy",
];

/// Keyword list for one emotion
pub fn keywords(emotion: Emotion) -> &'static [&'static str] {
    match emotion {
        Emotion::Anger => ANGER_KEYWORDS,
        Emotion::Fear => FEAR_KEYWORDS,
        Emotion::Boredom => BOREDOM_KEYWORDS,
        Emotion::Confusion => CONFUSION_KEYWORDS,
        Emotion::Sadness => SADNESS_KEYWORDS,
    }
}

fn keyword_sets() -> &'static [(Emotion, KeywordSet); 5] {
    static SETS: OnceLock<[(Emotion, KeywordSet); 5]> = OnceLock::new();

    SETS.get_or_init(|| Emotion::all().map(|e| (e, KeywordSet::new(keywords(e)))))
}

/// Detect the highest-priority emotion mentioned in `text`
pub fn detect_emotion(text: &str) -> Option<Emotion> {
    let lower = text.to_lowercase();

    keyword_sets()
        .iter()
        .find(|(_, set)| set.matches(&lower))
        .map(|(emotion, _)| *emotion)
}
