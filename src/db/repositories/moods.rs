use anyhow::{anyhow, Result};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::db::{
    connection::Database,
    helpers::{format_datetime, from_json, parse_datetime, parse_mood, to_json, to_optional_u8, to_u8},
};
use crate::models::{MoodEntry, MoodUpdate};
use crate::{log_debug, log_info};

const ENABLE_LOGS: bool = true;

const MOOD_COLUMNS: &str = "id, user_id, timestamp, mood, intensity, notes, triggers, activities,
     sleep_quality, energy_level, stress_level, anxiety_level, created_at, updated_at";

fn row_to_mood(row: &Row) -> Result<MoodEntry> {
    let timestamp: String = row.get("timestamp")?;
    let mood: String = row.get("mood")?;
    let triggers: String = row.get("triggers")?;
    let activities: String = row.get("activities")?;
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(MoodEntry {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        timestamp: parse_datetime(&timestamp, "timestamp")?,
        mood: parse_mood(&mood)?,
        intensity: to_u8(row.get("intensity")?, "intensity")?,
        notes: row.get("notes")?,
        triggers: from_json(&triggers, "triggers")?,
        activities: from_json(&activities, "activities")?,
        sleep_quality: to_optional_u8(row.get("sleep_quality")?, "sleep_quality")?,
        energy_level: to_optional_u8(row.get("energy_level")?, "energy_level")?,
        stress_level: to_optional_u8(row.get("stress_level")?, "stress_level")?,
        anxiety_level: to_optional_u8(row.get("anxiety_level")?, "anxiety_level")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

fn collect_moods(conn: &Connection, sql: &str, params: &[&dyn rusqlite::ToSql]) -> Result<Vec<MoodEntry>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params)?;
    let mut moods = Vec::new();
    while let Some(row) = rows.next()? {
        moods.push(row_to_mood(row)?);
    }
    Ok(moods)
}

fn find_mood(conn: &Connection, user_id: &str, mood_id: &str) -> Result<Option<MoodEntry>> {
    let sql = format!("SELECT {MOOD_COLUMNS} FROM moods WHERE id = ?1 AND user_id = ?2");
    let mut stmt = conn.prepare(&sql)?;
    let found = stmt
        .query_row(params![mood_id, user_id], |row| Ok(row_to_mood(row)))
        .optional()?;
    found.transpose()
}

fn write_mood(conn: &Connection, entry: &MoodEntry) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO moods (id, user_id, timestamp, mood, intensity, notes, triggers, activities,
             sleep_quality, energy_level, stress_level, anxiety_level, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            entry.id,
            entry.user_id,
            format_datetime(&entry.timestamp),
            entry.mood.as_str(),
            entry.intensity,
            entry.notes,
            to_json(&entry.triggers, "triggers")?,
            to_json(&entry.activities, "activities")?,
            entry.sleep_quality,
            entry.energy_level,
            entry.stress_level,
            entry.anxiety_level,
            format_datetime(&entry.created_at),
            format_datetime(&entry.updated_at),
        ],
    )?;
    Ok(())
}

impl Database {
    pub async fn insert_mood(&self, entry: &MoodEntry) -> Result<()> {
        let record = entry.clone();
        self.execute(move |conn| {
            write_mood(conn, &record)?;
            log_info!("Logged mood {} ({})", record.id, record.mood);
            Ok(())
        })
        .await
    }

    /// Apply a partial edit and return the stored result.
    pub async fn update_mood(
        &self,
        user_id: &str,
        mood_id: &str,
        update: MoodUpdate,
        now: DateTime<Utc>,
    ) -> Result<MoodEntry> {
        let user_id = user_id.to_string();
        let mood_id = mood_id.to_string();
        self.execute(move |conn| {
            let mut entry = find_mood(conn, &user_id, &mood_id)?
                .ok_or_else(|| anyhow!("Mood entry not found"))?;
            entry.apply(update, now);
            write_mood(conn, &entry)?;
            Ok(entry)
        })
        .await
    }

    pub async fn delete_mood(&self, user_id: &str, mood_id: &str) -> Result<()> {
        let user_id = user_id.to_string();
        let mood_id = mood_id.to_string();
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "DELETE FROM moods WHERE id = ?1 AND user_id = ?2",
                params![mood_id, user_id],
            )?;
            if rows_affected == 0 {
                return Err(anyhow!("Mood entry not found"));
            }
            Ok(())
        })
        .await
    }

    pub async fn get_mood(&self, user_id: &str, mood_id: &str) -> Result<Option<MoodEntry>> {
        let user_id = user_id.to_string();
        let mood_id = mood_id.to_string();
        self.execute(move |conn| find_mood(conn, &user_id, &mood_id))
            .await
    }

    /// Newest first, optionally bounded by `[start, end]`.
    pub async fn list_moods(
        &self,
        user_id: &str,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
        limit: u32,
    ) -> Result<Vec<MoodEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let start = start.as_ref().map(format_datetime);
            let end = end.as_ref().map(format_datetime);
            let sql = format!(
                "SELECT {MOOD_COLUMNS} FROM moods
                 WHERE user_id = ?1
                   AND (?2 IS NULL OR timestamp >= ?2)
                   AND (?3 IS NULL OR timestamp <= ?3)
                 ORDER BY timestamp DESC
                 LIMIT ?4"
            );
            collect_moods(conn, &sql, &[&user_id, &start, &end, &limit])
        })
        .await
    }

    /// Entries in `[now - window_days, now]`, oldest first.
    pub async fn moods_in_window(
        &self,
        user_id: &str,
        window_days: u32,
        now: DateTime<Utc>,
    ) -> Result<Vec<MoodEntry>> {
        let user_id = user_id.to_string();
        self.execute(move |conn| {
            let start = format_datetime(&(now - Duration::days(i64::from(window_days))));
            let end = format_datetime(&now);
            let sql = format!(
                "SELECT {MOOD_COLUMNS} FROM moods
                 WHERE user_id = ?1 AND timestamp >= ?2 AND timestamp <= ?3
                 ORDER BY timestamp ASC"
            );
            let moods = collect_moods(conn, &sql, &[&user_id, &start, &end])?;
            log_debug!("Loaded {} mood entries for a {} day window", moods.len(), window_days);
            Ok(moods)
        })
        .await
    }
}
