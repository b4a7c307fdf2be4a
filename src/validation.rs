//! Input checks applied before anything reaches the analyzer or the store.
//! The analytics core assumes every entry it sees has passed these.

use anyhow::{bail, Result};

use crate::models::{JournalDraft, JournalUpdate, MoodInput, MoodUpdate};

pub const MIN_CONTENT_CHARS: usize = 10;
pub const MAX_CONTENT_CHARS: usize = 10_000;
pub const MAX_TITLE_CHARS: usize = 200;
pub const MAX_NOTES_CHARS: usize = 500;
pub const MAX_TAG_CHARS: usize = 50;

fn check_scale(field: &str, value: Option<u8>) -> Result<()> {
    if let Some(v) = value {
        if !(1..=10).contains(&v) {
            bail!("{field} must be between 1 and 10");
        }
    }
    Ok(())
}

fn check_content(content: &str) -> Result<()> {
    let chars = content.chars().count();
    if chars < MIN_CONTENT_CHARS {
        bail!("Content must be at least {MIN_CONTENT_CHARS} characters");
    }
    if chars > MAX_CONTENT_CHARS {
        bail!("Content must be at most {MAX_CONTENT_CHARS} characters");
    }
    Ok(())
}

fn check_title(title: Option<&str>) -> Result<()> {
    if title.is_some_and(|t| t.chars().count() > MAX_TITLE_CHARS) {
        bail!("Title must be less than {MAX_TITLE_CHARS} characters");
    }
    Ok(())
}

fn check_notes(notes: Option<&str>) -> Result<()> {
    if notes.is_some_and(|n| n.chars().count() > MAX_NOTES_CHARS) {
        bail!("Notes must be less than {MAX_NOTES_CHARS} characters");
    }
    Ok(())
}

fn check_tags<'a>(mut tags: impl Iterator<Item = &'a String>) -> Result<()> {
    if let Some(tag) = tags.find(|t| t.chars().count() > MAX_TAG_CHARS) {
        bail!("Tag '{tag}' must be at most {MAX_TAG_CHARS} characters");
    }
    Ok(())
}

pub fn validate_mood_input(input: &MoodInput) -> Result<()> {
    check_scale("Intensity", Some(input.intensity))?;
    check_notes(input.notes.as_deref())?;
    check_scale("Sleep quality", input.sleep_quality)?;
    check_scale("Energy level", input.energy_level)?;
    check_scale("Stress level", input.stress_level)?;
    check_scale("Anxiety level", input.anxiety_level)?;
    Ok(())
}

pub fn validate_mood_update(update: &MoodUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("No fields to update");
    }
    check_scale("Intensity", update.intensity)?;
    check_notes(update.notes.as_deref())?;
    check_scale("Sleep quality", update.sleep_quality)?;
    check_scale("Energy level", update.energy_level)?;
    check_scale("Stress level", update.stress_level)?;
    check_scale("Anxiety level", update.anxiety_level)?;
    Ok(())
}

pub fn validate_journal_draft(draft: &JournalDraft) -> Result<()> {
    check_title(draft.title.as_deref())?;
    check_content(&draft.content)?;
    check_tags(draft.tags.iter())?;
    Ok(())
}

pub fn validate_journal_update(update: &JournalUpdate) -> Result<()> {
    if update.is_empty() {
        bail!("No fields to update");
    }
    check_title(update.title.as_deref())?;
    if let Some(content) = &update.content {
        check_content(content)?;
    }
    if let Some(tags) = &update.tags {
        check_tags(tags.iter())?;
    }
    Ok(())
}
