use std::{collections::BTreeSet, path::PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use serde::Serialize;

use crate::db::{Database, JournalQuery};
use crate::log_info;
use crate::models::{
    Activity, JournalDraft, JournalUpdate, MoodEntry, MoodInput, MoodLabel, MoodUpdate, Trigger,
};
use crate::settings::SettingsStore;
use crate::{stats, validation};

const ENABLE_LOGS: bool = true;

/// moodlens - mood tracking and journal analytics
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// SQLite database file
    #[arg(long, default_value = "moodlens.db")]
    db: PathBuf,

    /// JSON settings file (lexicon overrides and limits)
    #[arg(long, default_value = "moodlens-settings.json")]
    settings: PathBuf,

    /// Owner of the entries being read or written
    #[arg(long, default_value = "local")]
    user: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score a piece of text without storing it
    Analyze {
        text: String,
        #[arg(long)]
        mood: Option<MoodLabel>,
    },
    /// Log a mood entry
    LogMood {
        #[arg(long)]
        mood: MoodLabel,
        #[arg(long)]
        intensity: u8,
        #[arg(long)]
        notes: Option<String>,
        #[arg(long = "trigger")]
        triggers: Vec<Trigger>,
        #[arg(long = "activity")]
        activities: Vec<Activity>,
        #[arg(long)]
        sleep: Option<u8>,
        #[arg(long)]
        energy: Option<u8>,
        #[arg(long)]
        stress: Option<u8>,
        #[arg(long)]
        anxiety: Option<u8>,
        /// RFC 3339 timestamp, defaults to now
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Edit a logged mood entry
    EditMood {
        id: String,
        #[arg(long)]
        mood: Option<MoodLabel>,
        #[arg(long)]
        intensity: Option<u8>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List mood entries, newest first
    Moods {
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        #[arg(long)]
        end: Option<DateTime<Utc>>,
        #[arg(long, default_value_t = 30)]
        limit: u32,
    },
    /// Show one mood entry
    MoodShow { id: String },
    /// Delete a mood entry
    DeleteMood { id: String },
    /// Write a journal entry
    Journal {
        #[arg(long)]
        content: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        mood: Option<MoodLabel>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Mark the entry as shareable
        #[arg(long)]
        public: bool,
        #[arg(long)]
        at: Option<DateTime<Utc>>,
    },
    /// Edit a journal entry; new content is re-analyzed
    EditJournal {
        id: String,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        mood: Option<MoodLabel>,
        #[arg(long = "tag")]
        tags: Option<Vec<String>>,
        #[arg(long)]
        private: Option<bool>,
    },
    /// Show one journal entry
    JournalShow { id: String },
    /// Delete a journal entry
    DeleteJournal { id: String },
    /// List journal entries, newest first
    Journals {
        #[arg(long)]
        mood: Option<MoodLabel>,
        #[arg(long)]
        start: Option<DateTime<Utc>>,
        #[arg(long)]
        end: Option<DateTime<Utc>>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },
    /// Mood statistics over the last N days
    MoodStats {
        #[arg(long)]
        days: Option<u32>,
    },
    /// Journal insights over the last N days
    JournalInsights {
        #[arg(long)]
        days: Option<u32>,
    },
}

#[derive(Serialize)]
struct Deleted<'a> {
    deleted: &'a str,
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("Failed to render output")?;
    println!("{rendered}");
    Ok(())
}

pub async fn dispatch(cli: Cli) -> Result<()> {
    let settings = SettingsStore::new(cli.settings.clone())?;
    let analyzer = settings.analyzer();

    if let Command::Analyze { text, mood } = &cli.command {
        return print_json(&analyzer.analyze(text, *mood));
    }

    let db = Database::new(cli.db.clone())
        .with_context(|| format!("Failed to open database at {}", cli.db.display()))?;
    let user = cli.user.as_str();
    let now = Utc::now();

    match cli.command {
        Command::Analyze { .. } => Ok(()),
        Command::LogMood {
            mood,
            intensity,
            notes,
            triggers,
            activities,
            sleep,
            energy,
            stress,
            anxiety,
            at,
        } => {
            let input = MoodInput {
                notes,
                triggers: triggers.into_iter().collect(),
                activities: activities.into_iter().collect(),
                sleep_quality: sleep,
                energy_level: energy,
                stress_level: stress,
                anxiety_level: anxiety,
                timestamp: at,
                ..MoodInput::new(mood, intensity)
            };
            validation::validate_mood_input(&input)?;
            let entry = MoodEntry::new(user, input, now);
            db.insert_mood(&entry).await?;
            log_info!("Logged mood entry {}", entry.id);
            print_json(&entry)
        }
        Command::EditMood {
            id,
            mood,
            intensity,
            notes,
        } => {
            let update = MoodUpdate {
                mood,
                intensity,
                notes,
                ..MoodUpdate::default()
            };
            validation::validate_mood_update(&update)?;
            print_json(&db.update_mood(user, &id, update, now).await?)
        }
        Command::Moods { start, end, limit } => {
            print_json(&db.list_moods(user, start, end, limit).await?)
        }
        Command::MoodShow { id } => match db.get_mood(user, &id).await? {
            Some(entry) => print_json(&entry),
            None => bail!("Mood entry not found"),
        },
        Command::DeleteMood { id } => {
            db.delete_mood(user, &id).await?;
            print_json(&Deleted { deleted: &id })
        }
        Command::Journal {
            content,
            title,
            mood,
            tags,
            public,
            at,
        } => {
            let draft = JournalDraft {
                title,
                mood,
                tags: tags.into_iter().collect(),
                is_private: !public,
                timestamp: at,
                ..JournalDraft::new(content)
            };
            validation::validate_journal_draft(&draft)?;
            let entry = analyzer.compose_journal(user, draft, now);
            db.insert_journal(&entry).await?;
            print_json(&entry)
        }
        Command::EditJournal {
            id,
            content,
            title,
            mood,
            tags,
            private,
        } => {
            let update = JournalUpdate {
                title,
                content,
                mood,
                tags: tags.map(|t| t.into_iter().collect::<BTreeSet<_>>()),
                is_private: private,
            };
            validation::validate_journal_update(&update)?;
            print_json(&db.update_journal(user, &id, update, &analyzer, now).await?)
        }
        Command::JournalShow { id } => match db.get_journal(user, &id).await? {
            Some(entry) => print_json(&entry),
            None => bail!("Journal entry not found"),
        },
        Command::DeleteJournal { id } => {
            db.delete_journal(user, &id).await?;
            print_json(&Deleted { deleted: &id })
        }
        Command::Journals {
            mood,
            start,
            end,
            search,
            page,
            limit,
        } => {
            let query = JournalQuery {
                mood,
                start,
                end,
                search,
                page,
                limit,
            };
            print_json(&db.list_journals(user, query).await?)
        }
        Command::MoodStats { days } => {
            let days = days.unwrap_or_else(|| settings.default_window_days());
            let entries = db.moods_in_window(user, days, now).await?;
            print_json(&stats::mood::aggregate_at(&entries, days, now))
        }
        Command::JournalInsights { days } => {
            let days = days.unwrap_or_else(|| settings.default_window_days());
            let entries = db.journals_in_window(user, days, now).await?;
            print_json(&stats::journal::aggregate(&entries, days))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_log_mood_with_repeated_flags() {
        let cli = Cli::try_parse_from([
            "moodlens",
            "--user",
            "alice",
            "log-mood",
            "--mood",
            "very-happy",
            "--intensity",
            "8",
            "--trigger",
            "work",
            "--trigger",
            "sleep",
            "--activity",
            "exercise",
        ])
        .unwrap();

        assert_eq!(cli.user, "alice");
        match cli.command {
            Command::LogMood {
                mood,
                intensity,
                triggers,
                activities,
                ..
            } => {
                assert_eq!(mood, MoodLabel::VeryHappy);
                assert_eq!(intensity, 8);
                assert_eq!(triggers, vec![Trigger::Work, Trigger::Sleep]);
                assert_eq!(activities, vec![Activity::Exercise]);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn mood_listing_defaults_to_thirty() {
        let cli = Cli::try_parse_from(["moodlens", "moods"]).unwrap();
        match cli.command {
            Command::Moods { limit, start, end } => {
                assert_eq!(limit, 30);
                assert!(start.is_none() && end.is_none());
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn show_commands_take_an_id() {
        let cli = Cli::try_parse_from(["moodlens", "journal-show", "abc"]).unwrap();
        assert!(matches!(cli.command, Command::JournalShow { ref id } if id == "abc"));
        let cli = Cli::try_parse_from(["moodlens", "mood-show", "def"]).unwrap();
        assert!(matches!(cli.command, Command::MoodShow { ref id } if id == "def"));
    }

    #[tokio::test]
    async fn show_of_missing_journal_fails() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("moodlens.db");
        let settings = dir.path().join("settings.json");
        let cli = Cli::try_parse_from([
            "moodlens",
            "--db",
            db.to_str().unwrap(),
            "--settings",
            settings.to_str().unwrap(),
            "journal-show",
            "missing",
        ])
        .unwrap();
        let err = dispatch(cli).await.unwrap_err();
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn rejects_unknown_mood_label() {
        let parsed = Cli::try_parse_from(["moodlens", "analyze", "some text", "--mood", "meh"]);
        assert!(parsed.is_err());
    }
}
