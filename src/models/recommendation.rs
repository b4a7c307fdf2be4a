use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationKind {
    Song,
    Exercise,
    Meditation,
    Activity,
    Article,
    Breathing,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Song => "song",
            RecommendationKind::Exercise => "exercise",
            RecommendationKind::Meditation => "meditation",
            RecommendationKind::Activity => "activity",
            RecommendationKind::Article => "article",
            RecommendationKind::Breathing => "breathing",
        }
    }
}

/// A suggested coping action derived from journal text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationKind,
    pub title: String,
    pub description: String,
    pub link: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}
