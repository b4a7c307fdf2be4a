pub mod journal;
pub mod mood;
pub mod recommendation;
pub mod sentiment;

pub use journal::{JournalDraft, JournalEntry, JournalUpdate};
pub use mood::{Activity, MoodEntry, MoodInput, MoodLabel, MoodUpdate, Trigger};
pub use recommendation::{Recommendation, RecommendationKind};
pub use sentiment::{KeywordSet, SentimentClass, TextSentiment};
