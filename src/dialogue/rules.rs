//! Ordered routing rules
//!
//! Rules are evaluated top to bottom and the first guard that holds picks
//! the route. Keyword lists overlap on purpose ("what about" is both
//! referential and a statistics cue); list order is the only tie-breaker.

use regex::Regex;
use std::sync::LazyLock;

use super::context::ConversationContext;
use crate::knowledge::KnowledgeBase;
use crate::models::{Emotion, SentimentResult};
use crate::utils::KeywordSet;

/// Words that ask for a ranking of countries
pub const RANKING_KEYWORDS: &[&str] = &["top", "best", "highest", "most vaccinated", "most vaccinations"];

/// Words that ask for a statistic
pub const STATS_KEYWORDS: &[&str] = &[
    "how many",
    "stats",
    "statistics",
    "vaccination",
    "vaccinated",
    "doses",
    "status",
    "rate",
    "what about",
    "how about",
];

/// Words that point back at the previous location
pub const REFERENTIAL_KEYWORDS: &[&str] = &["what about", "how about", "and"];

static RANKING: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet::new(RANKING_KEYWORDS));
static STATS: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet::with_suffixes(STATS_KEYWORDS));
static REFERENTIAL: LazyLock<KeywordSet> = LazyLock::new(|| KeywordSet::new(REFERENTIAL_KEYWORDS));

static TOP_N_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\btop\s+(\d+)\b").expect("Invalid regex pattern"));

/// Dialogue route chosen for a turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    /// Countries ordered by vaccination rate
    Ranking,
    /// Statistics for a single location
    CountryStats,
    /// Empathetic reply for a detected emotion
    Emotional,
    /// Closest knowledge-base answer
    KnowledgeMatch,
}

impl Route {
    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ranking => "ranking",
            Self::CountryStats => "country_stats",
            Self::Emotional => "emotional",
            Self::KnowledgeMatch => "knowledge_match",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the rules may look at for one user turn
#[derive(Debug, Clone)]
pub struct Turn {
    /// Text as typed
    pub raw: String,
    /// Spell-corrected text
    pub normalized: String,
    /// Lower-cased normalized text
    pub lower: String,
    pub sentiment: SentimentResult,
    pub emotion: Option<Emotion>,
    /// Locations found in the normalized text, longest first
    pub entities: Vec<String>,
}

impl Turn {
    /// Create a turn from analysed input
    pub fn new(
        raw: impl Into<String>,
        normalized: impl Into<String>,
        sentiment: SentimentResult,
        emotion: Option<Emotion>,
        entities: Vec<String>,
    ) -> Self {
        let normalized = normalized.into();
        Self {
            raw: raw.into(),
            lower: normalized.to_lowercase(),
            normalized,
            sentiment,
            emotion,
            entities,
        }
    }
}

/// Guard deciding whether a rule applies
pub type Guard = fn(&Turn, &ConversationContext, &KnowledgeBase) -> bool;

/// One entry of the routing table
#[derive(Clone, Copy)]
pub struct Rule {
    pub route: Route,
    pub guard: Guard,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("route", &self.route).finish_non_exhaustive()
    }
}

/// Routing table in priority order
pub const RULES: &[Rule] = &[
    Rule {
        route: Route::Ranking,
        guard: wants_ranking,
    },
    Rule {
        route: Route::CountryStats,
        guard: wants_country_stats,
    },
    Rule {
        route: Route::Emotional,
        guard: is_emotional,
    },
    Rule {
        route: Route::KnowledgeMatch,
        guard: always,
    },
];

/// Ranking keyword present
pub fn wants_ranking(turn: &Turn, _ctx: &ConversationContext, _kb: &KnowledgeBase) -> bool {
    RANKING.matches(&turn.lower)
}

/// A location is known and a statistic is asked for
pub fn wants_country_stats(turn: &Turn, ctx: &ConversationContext, _kb: &KnowledgeBase) -> bool {
    let has_location = !turn.entities.is_empty()
        || (ctx.last_location.is_some() && REFERENTIAL.matches(&turn.lower));

    has_location && STATS.matches(&turn.lower)
}

/// An emotion was detected and the catalog can answer it
pub fn is_emotional(turn: &Turn, _ctx: &ConversationContext, kb: &KnowledgeBase) -> bool {
    turn.emotion.is_some_and(|e| kb.contains(e.intent()))
}

fn always(_turn: &Turn, _ctx: &ConversationContext, _kb: &KnowledgeBase) -> bool {
    true
}

/// First route whose guard holds
pub fn select_route(turn: &Turn, ctx: &ConversationContext, kb: &KnowledgeBase) -> Route {
    RULES
        .iter()
        .find(|rule| (rule.guard)(turn, ctx, kb))
        .map(|rule| rule.route)
        .unwrap_or(Route::KnowledgeMatch)
}

/// Rows requested by "top N", clamped to `[1, max]`; `default` otherwise
pub fn ranking_limit(text: &str, default: usize, max: usize) -> usize {
    TOP_N_REGEX
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .map(|n| n.clamp(1, max.max(1)))
        .unwrap_or(default)
}
