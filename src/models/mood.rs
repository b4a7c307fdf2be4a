//! Mood log models.
//!
//! Labels, triggers and activities are closed sets; their wire names are the
//! kebab/lowercase strings accepted by the logging form.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "kebab-case")]
pub enum MoodLabel {
    VeryHappy,
    Happy,
    Neutral,
    Sad,
    VerySad,
    Anxious,
    Stressed,
    Angry,
    Excited,
    Calm,
}

impl MoodLabel {
    pub const ALL: [MoodLabel; 10] = [
        MoodLabel::VeryHappy,
        MoodLabel::Happy,
        MoodLabel::Neutral,
        MoodLabel::Sad,
        MoodLabel::VerySad,
        MoodLabel::Anxious,
        MoodLabel::Stressed,
        MoodLabel::Angry,
        MoodLabel::Excited,
        MoodLabel::Calm,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MoodLabel::VeryHappy => "very-happy",
            MoodLabel::Happy => "happy",
            MoodLabel::Neutral => "neutral",
            MoodLabel::Sad => "sad",
            MoodLabel::VerySad => "very-sad",
            MoodLabel::Anxious => "anxious",
            MoodLabel::Stressed => "stressed",
            MoodLabel::Angry => "angry",
            MoodLabel::Excited => "excited",
            MoodLabel::Calm => "calm",
        }
    }
}

impl fmt::Display for MoodLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodLabel {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        MoodLabel::ALL
            .into_iter()
            .find(|label| label.as_str() == value)
            .ok_or_else(|| anyhow!("unknown mood label '{value}'"))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Trigger {
    Work,
    Relationships,
    Health,
    Finances,
    Family,
    Social,
    Weather,
    Sleep,
    Exercise,
    Other,
}

impl Trigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            Trigger::Work => "work",
            Trigger::Relationships => "relationships",
            Trigger::Health => "health",
            Trigger::Finances => "finances",
            Trigger::Family => "family",
            Trigger::Social => "social",
            Trigger::Weather => "weather",
            Trigger::Sleep => "sleep",
            Trigger::Exercise => "exercise",
            Trigger::Other => "other",
        }
    }
}

impl FromStr for Trigger {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "work" => Ok(Trigger::Work),
            "relationships" => Ok(Trigger::Relationships),
            "health" => Ok(Trigger::Health),
            "finances" => Ok(Trigger::Finances),
            "family" => Ok(Trigger::Family),
            "social" => Ok(Trigger::Social),
            "weather" => Ok(Trigger::Weather),
            "sleep" => Ok(Trigger::Sleep),
            "exercise" => Ok(Trigger::Exercise),
            "other" => Ok(Trigger::Other),
            other => Err(anyhow!("unknown mood trigger '{other}'")),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Activity {
    Exercise,
    Meditation,
    Socializing,
    Work,
    Hobby,
    Rest,
    Eating,
    Reading,
    Music,
    Other,
}

impl Activity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Activity::Exercise => "exercise",
            Activity::Meditation => "meditation",
            Activity::Socializing => "socializing",
            Activity::Work => "work",
            Activity::Hobby => "hobby",
            Activity::Rest => "rest",
            Activity::Eating => "eating",
            Activity::Reading => "reading",
            Activity::Music => "music",
            Activity::Other => "other",
        }
    }
}

impl FromStr for Activity {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "exercise" => Ok(Activity::Exercise),
            "meditation" => Ok(Activity::Meditation),
            "socializing" => Ok(Activity::Socializing),
            "work" => Ok(Activity::Work),
            "hobby" => Ok(Activity::Hobby),
            "rest" => Ok(Activity::Rest),
            "eating" => Ok(Activity::Eating),
            "reading" => Ok(Activity::Reading),
            "music" => Ok(Activity::Music),
            "other" => Ok(Activity::Other),
            other => Err(anyhow!("unknown mood activity '{other}'")),
        }
    }
}

/// A single logged mood. Intensity and the optional scales are 1..=10.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MoodEntry {
    pub id: String,
    pub user_id: String,
    pub timestamp: DateTime<Utc>,
    pub mood: MoodLabel,
    pub intensity: u8,
    pub notes: Option<String>,
    #[serde(default)]
    pub triggers: BTreeSet<Trigger>,
    #[serde(default)]
    pub activities: BTreeSet<Activity>,
    pub sleep_quality: Option<u8>,
    pub energy_level: Option<u8>,
    pub stress_level: Option<u8>,
    pub anxiety_level: Option<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for logging a mood
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodInput {
    pub mood: MoodLabel,
    pub intensity: u8,
    pub notes: Option<String>,
    #[serde(default)]
    pub triggers: BTreeSet<Trigger>,
    #[serde(default)]
    pub activities: BTreeSet<Activity>,
    pub sleep_quality: Option<u8>,
    pub energy_level: Option<u8>,
    pub stress_level: Option<u8>,
    pub anxiety_level: Option<u8>,
    /// Defaults to the creation time when absent.
    pub timestamp: Option<DateTime<Utc>>,
}

impl MoodInput {
    pub fn new(mood: MoodLabel, intensity: u8) -> Self {
        Self {
            mood,
            intensity,
            notes: None,
            triggers: BTreeSet::new(),
            activities: BTreeSet::new(),
            sleep_quality: None,
            energy_level: None,
            stress_level: None,
            anxiety_level: None,
            timestamp: None,
        }
    }
}

/// Partial edit of a mood entry; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodUpdate {
    pub mood: Option<MoodLabel>,
    pub intensity: Option<u8>,
    pub notes: Option<String>,
    pub triggers: Option<BTreeSet<Trigger>>,
    pub activities: Option<BTreeSet<Activity>>,
    pub sleep_quality: Option<u8>,
    pub energy_level: Option<u8>,
    pub stress_level: Option<u8>,
    pub anxiety_level: Option<u8>,
}

impl MoodUpdate {
    pub fn is_empty(&self) -> bool {
        self.mood.is_none()
            && self.intensity.is_none()
            && self.notes.is_none()
            && self.triggers.is_none()
            && self.activities.is_none()
            && self.sleep_quality.is_none()
            && self.energy_level.is_none()
            && self.stress_level.is_none()
            && self.anxiety_level.is_none()
    }
}

impl MoodEntry {
    pub fn new(user_id: &str, input: MoodInput, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            timestamp: input.timestamp.unwrap_or(now),
            mood: input.mood,
            intensity: input.intensity,
            notes: input.notes,
            triggers: input.triggers,
            activities: input.activities,
            sleep_quality: input.sleep_quality,
            energy_level: input.energy_level,
            stress_level: input.stress_level,
            anxiety_level: input.anxiety_level,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, update: MoodUpdate, now: DateTime<Utc>) {
        if let Some(mood) = update.mood {
            self.mood = mood;
        }
        if let Some(intensity) = update.intensity {
            self.intensity = intensity;
        }
        if update.notes.is_some() {
            self.notes = update.notes;
        }
        if let Some(triggers) = update.triggers {
            self.triggers = triggers;
        }
        if let Some(activities) = update.activities {
            self.activities = activities;
        }
        if update.sleep_quality.is_some() {
            self.sleep_quality = update.sleep_quality;
        }
        if update.energy_level.is_some() {
            self.energy_level = update.energy_level;
        }
        if update.stress_level.is_some() {
            self.stress_level = update.stress_level;
        }
        if update.anxiety_level.is_some() {
            self.anxiety_level = update.anxiety_level;
        }
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mood_label_wire_names_round_trip() {
        for label in MoodLabel::ALL {
            assert_eq!(label.as_str().parse::<MoodLabel>().unwrap(), label);
            let json = serde_json::to_string(&label).unwrap();
            assert_eq!(json, format!("\"{}\"", label.as_str()));
        }
        assert!("ecstatic".parse::<MoodLabel>().is_err());
    }

    #[test]
    fn apply_only_touches_provided_fields() {
        let now = Utc::now();
        let mut input = MoodInput::new(MoodLabel::Sad, 3);
        input.notes = Some("rough morning".into());
        let mut entry = MoodEntry::new("u1", input, now);

        entry.apply(
            MoodUpdate {
                intensity: Some(6),
                ..MoodUpdate::default()
            },
            now,
        );

        assert_eq!(entry.mood, MoodLabel::Sad);
        assert_eq!(entry.intensity, 6);
        assert_eq!(entry.notes.as_deref(), Some("rough morning"));
    }
}
