use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// A person the user can @-mention in a journal entry.
///
/// Supplied by the preferences page; the editor treats the roster as
/// immutable for the lifetime of an editing session.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Entity {
    pub name: String,
    pub relation: String,
}

impl Entity {
    pub fn new(name: &str, relation: &str) -> Self {
        Self {
            name: name.to_string(),
            relation: relation.to_string(),
        }
    }
}

#[derive(
    Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Default, Display, EnumString,
)]
pub(crate) enum DiaryMode {
    #[default]
    Diary,
    Questionnaire,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct UserPreferences {
    pub username: String,

    /// Free-form interest tags, capped at 6 by the preferences form.
    #[serde(default)]
    pub interests: Vec<String>,

    #[serde(default)]
    pub diary_mode: DiaryMode,

    /// The mention roster for the journal editor.
    #[serde(default)]
    pub companions: Vec<Entity>,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            username: "User".to_string(),
            interests: vec![],
            diary_mode: DiaryMode::default(),
            companions: vec![],
        }
    }
}

/// A locally persisted, unsent journal entry. Newest first in storage.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct JournalDraft {
    pub id: String,
    pub content: String,
    pub created_at_ms: i64,
}

/// Backend sentiment payload.
///
/// The backend returns more fields than we render (polarity, subjectivity,
/// intensity, ...). We keep those flexible to avoid breaking when they evolve.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct SentimentAnalysis {
    #[serde(default)]
    pub mood: String,

    #[serde(flatten)]
    pub extra: serde_json::Value,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Suggestion {
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct WellnessMetrics {
    pub wellness_score: i32,
    pub mood_trend: i32,
    pub total_entries: i32,
}

impl Default for WellnessMetrics {
    fn default() -> Self {
        Self {
            wellness_score: 3,
            mood_trend: 50,
            total_entries: 0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub(crate) struct MoodSummary {
    pub mood: String,
    pub message: String,
    pub encouragement: String,
}

impl Default for MoodSummary {
    fn default() -> Self {
        Self {
            mood: "calm".to_string(),
            message: "You seem calm today".to_string(),
            encouragement: "Keep it going!".to_string(),
        }
    }
}

/// Envelope returned by the journal/questionnaire save endpoints.
/// Every field is optional; the questionnaire endpoint has been observed
/// returning only a subset.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub(crate) struct JournalAnalysis {
    #[serde(default)]
    pub sentiment_analysis: Option<SentimentAnalysis>,
    #[serde(default)]
    pub ai_suggestions: Option<Vec<Suggestion>>,
    #[serde(default)]
    pub wellness_metrics: Option<WellnessMetrics>,
}

/// An analysis plus the moment we stored it, as kept in localStorage.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub(crate) struct StoredAnalysis {
    pub saved_ms: i64,
    pub analysis: JournalAnalysis,
}
