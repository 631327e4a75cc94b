//! Localized fixed texts and data answers
//!
//! All strings come from the `locales/` phrase tables; languages without a
//! key fall back to English.

use crate::i18n::t;
use crate::models::{CountryStats, Emotion};
use crate::utils::format_thousands;

/// Empathy prefix for a detected emotion
pub fn empathy_prefix(emotion: Emotion, lang: &str) -> String {
    match emotion {
        Emotion::Anger => t!("empathy.anger", locale = lang),
        Emotion::Fear => t!("empathy.fear", locale = lang),
        Emotion::Boredom => t!("empathy.boredom", locale = lang),
        Emotion::Confusion => t!("empathy.confusion", locale = lang),
        Emotion::Sadness => t!("empathy.sadness", locale = lang),
    }
    .into_owned()
}

/// Prefix for clearly negative input
pub fn negative_prefix(lang: &str) -> String {
    t!("empathy.negative", locale = lang).into_owned()
}

/// Suffix for clearly positive input
pub fn positive_suffix(lang: &str) -> String {
    t!("empathy.positive", locale = lang).into_owned()
}

/// Reply when nothing matched
pub fn fallback(lang: &str) -> String {
    t!("assistant.fallback", locale = lang).into_owned()
}

/// Question asked when no location can be resolved
pub fn clarify_location(lang: &str) -> String {
    t!("assistant.clarify_location", locale = lang).into_owned()
}

/// Reply for an intent without any candidate text
pub fn retrieval_trouble(lang: &str) -> String {
    t!("assistant.retrieval_trouble", locale = lang).into_owned()
}

/// Suffix appended to text that could not be translated
pub fn translation_apology(lang: &str) -> String {
    t!("assistant.translation_apology", locale = lang).into_owned()
}

/// Apology for a failed statistics lookup
pub fn data_error(lang: &str) -> String {
    t!("assistant.data_error", locale = lang).into_owned()
}

/// Reply for a location the store has no row for
pub fn no_data(location: &str, lang: &str) -> String {
    t!("assistant.no_data", locale = lang, location = location).into_owned()
}

fn percent(value: Option<f64>) -> String {
    format!("{:.1}", value.unwrap_or(0.0))
}

/// One-line statistics answer for a location
pub fn country_stats(stats: &CountryStats, lang: &str) -> String {
    let doses = format_thousands(stats.total_doses.unwrap_or(0));
    let pct = percent(stats.pct_vaccinated);

    t!(
        "stats.country",
        locale = lang,
        location = stats.location.as_str(),
        doses = doses.as_str(),
        pct = pct.as_str()
    )
    .into_owned()
}

/// Multi-line ranking answer
pub fn ranking(rows: &[CountryStats], lang: &str) -> String {
    if rows.is_empty() {
        return t!("stats.ranking_empty", locale = lang).into_owned();
    }

    let count = rows.len().to_string();
    let mut lines = vec![t!("stats.ranking_header", locale = lang, count = count.as_str()).into_owned()];

    for (i, row) in rows.iter().enumerate() {
        let rank = (i + 1).to_string();
        let pct = percent(row.pct_vaccinated);
        lines.push(
            t!(
                "stats.ranking_row",
                locale = lang,
                rank = rank.as_str(),
                location = row.location.as_str(),
                pct = pct.as_str()
            )
            .into_owned(),
        );
    }

    lines.join("\n")
}
