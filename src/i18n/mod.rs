//! Internationalization (i18n) support for vaxassist
//!
//! Phrase tables live in `locales/*.yml` and cover the empathy overlay, the
//! data answers (country line, ranking) and the fixed fallback texts.
//! Supported languages: English (en), Hindi (hi), Bengali (bn), Tamil (ta),
//! Telugu (te), French (fr). Missing keys fall back to English.
//!
//! # Environment Variables
//!
//! - `VAXASSIST_LANG`: Set the default reply language. Defaults to English.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vaxassist::i18n::{normalize_locale, t};
//!
//! let lang = normalize_locale("hi-IN", "en");
//! let msg = t!("assistant.clarify_location", locale = &lang);
//! ```

use std::sync::OnceLock;

// Note: rust_i18n::i18n! macro is declared in lib.rs (crate root)

/// Languages with bundled phrase tables
pub const SUPPORTED_LANGUAGES: &[&str] = &["en", "hi", "bn", "ta", "te", "fr"];

static CURRENT_LOCALE: OnceLock<String> = OnceLock::new();

/// Set the process-wide locale used for CLI and error messages
pub fn set_locale(locale: &str) {
    let normalized = normalize_locale(locale, "en");
    rust_i18n::set_locale(&normalized);
    CURRENT_LOCALE.get_or_init(|| normalized.clone());
}

/// Get the current locale
pub fn current_locale() -> &'static str {
    CURRENT_LOCALE.get().map(|s| s.as_str()).unwrap_or("en")
}

/// Initialize i18n from `VAXASSIST_LANG`
pub fn init_from_env() {
    let locale = std::env::var("VAXASSIST_LANG").unwrap_or_else(|_| "en".to_string());
    set_locale(&locale);
}

/// Normalize a language tag or name to its primary subtag
///
/// - hi-IN, hi_IN, hindi -> hi
/// - fr-FR, French -> fr
/// - empty -> `base`
///
/// Unknown tags keep their primary subtag so the translation service can
/// still be asked for them.
pub fn normalize_locale(locale: &str, base: &str) -> String {
    let lower = locale.trim().to_lowercase();
    if lower.is_empty() {
        return base.to_string();
    }

    match lower.as_str() {
        "english" => return "en".to_string(),
        "hindi" => return "hi".to_string(),
        "bengali" | "bangla" => return "bn".to_string(),
        "tamil" => return "ta".to_string(),
        "telugu" => return "te".to_string(),
        "french" | "français" | "francais" => return "fr".to_string(),
        _ => {}
    }

    lower
        .split(['-', '_'])
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or(base)
        .to_string()
}

/// Whether `lang` has a bundled phrase table
pub fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.contains(&lang)
}

/// Translate a key with optional parameters
///
/// This is a re-export of rust_i18n::t! for convenience.
///
/// ```rust,ignore
/// use vaxassist::i18n::t;
///
/// let msg = t!("stats.ranking_header", locale = "fr", count = 5);
/// ```
#[doc(inline)]
pub use rust_i18n::t;
