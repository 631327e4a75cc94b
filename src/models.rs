// Core data structures shared by the assistant's components

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Sentiment of one user input
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SentimentResult {
    pub polarity: f32,     // -1.0 (negative) ..= 1.0 (positive)
    pub subjectivity: f32, // 0.0 (objective) ..= 1.0 (subjective)
}

impl SentimentResult {
    /// Neutral score used when scoring fails
    pub const NEUTRAL: Self = Self {
        polarity: 0.0,
        subjectivity: 0.0,
    };

    /// Create a sentiment result, clamping both values into range
    pub fn new(polarity: f32, subjectivity: f32) -> Self {
        Self {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}

/// Emotion detected from keywords
///
/// Variants are declared in detection priority order. An input with no
/// emotion keywords is represented as `Option::<Emotion>::None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    Anger,
    Fear,
    Boredom,
    Confusion,
    Sadness,
}

impl Emotion {
    /// All emotions in detection priority order
    pub fn all() -> [Emotion; 5] {
        [
            Self::Anger,
            Self::Fear,
            Self::Boredom,
            Self::Confusion,
            Self::Sadness,
        ]
    }

    /// Get string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Anger => "anger",
            Self::Fear => "fear",
            Self::Boredom => "boredom",
            Self::Confusion => "confusion",
            Self::Sadness => "sadness",
        }
    }

    /// Knowledge-base intent answering this emotion
    pub fn intent(&self) -> &'static str {
        match self {
            Self::Anger => "feeling_angry",
            Self::Fear => "feeling_scared",
            Self::Boredom => "feeling_bored",
            Self::Confusion => "feeling_confused",
            Self::Sadness => "feeling_sad",
        }
    }

    /// Parse from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "anger" => Some(Self::Anger),
            "fear" => Some(Self::Fear),
            "boredom" => Some(Self::Boredom),
            "confusion" => Some(Self::Confusion),
            "sadness" => Some(Self::Sadness),
            _ => None,
        }
    }
}

impl std::fmt::Display for Emotion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Best knowledge-base intent for one input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub intent: String,
    pub confidence: f32, // cosine similarity, 0.0 ..= 1.0
}

/// Latest vaccination snapshot for one location
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CountryStats {
    pub location: String,
    pub date: Option<NaiveDate>,
    pub total_doses: Option<u64>,
    pub people_vaccinated: Option<u64>,
    pub people_fully_vaccinated: Option<u64>,
    pub pct_vaccinated: Option<f64>,
    pub pct_fully_vaccinated: Option<f64>,
}

impl CountryStats {
    /// Create a snapshot with the fields the assistant reports
    pub fn new(location: impl Into<String>, total_doses: u64, pct_vaccinated: f64) -> Self {
        Self {
            location: location.into(),
            total_doses: Some(total_doses),
            pct_vaccinated: Some(pct_vaccinated),
            ..Default::default()
        }
    }

    /// Set the snapshot date
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Whether this row belongs to `location` (case-insensitive)
    pub fn is_location(&self, location: &str) -> bool {
        self.location.to_lowercase() == location.trim().to_lowercase()
    }
}
