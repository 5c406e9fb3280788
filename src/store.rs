//! Durable attempt storage, ranking, and classroom aggregation.
//!
//! One row per completed attempt, stamped with the learner's identity and
//! mode tag. The store is a collaborator, not part of the typing core: a
//! failed write never unwinds a session, which is why callers on the happy
//! path use [`ResultsDb::record_attempt_best_effort`].

use crate::identity::Identity;
use crate::mode::PracticeMode;
use crate::session::AttemptResult;
use crate::util::{mean, std_dev};
use chrono::{DateTime, Local};
use itertools::Itertools;
use rusqlite::{params, Connection, Result};
use std::error::Error;
use std::path::Path;
use tracing::warn;

/// One persisted attempt.
#[derive(Debug, Clone)]
pub struct AttemptRecord {
    pub user_id: String,
    pub username: String,
    pub avatar: String,
    pub mode: PracticeMode,
    pub speed: u32,
    pub accuracy: u32,
    pub elapsed_secs: f64,
    pub timestamp: DateTime<Local>,
}

/// A ranking row: the best speed a user has reached in one mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankEntry {
    pub username: String,
    pub avatar: String,
    pub best_speed: u32,
}

/// Aggregates for the teacher dashboard.
#[derive(Debug, Clone)]
pub struct UserSummary {
    pub user_id: String,
    pub username: String,
    pub attempts: usize,
    pub avg_speed: f64,
    pub avg_accuracy: f64,
    pub speed_std_dev: f64,
}

/// Database manager for attempt results.
#[derive(Debug)]
pub struct ResultsDb {
    conn: Connection,
}

impl ResultsDb {
    /// Open the results database at its standard location, creating the
    /// schema if needed.
    pub fn new() -> Result<Self> {
        let db_path = crate::app_dirs::AppDirs::db_path()
            .unwrap_or_else(|| std::path::PathBuf::from("tadak_results.db"));

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                rusqlite::Error::SqliteFailure(
                    rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_CANTOPEN),
                    Some(format!("Failed to create directory: {}", e)),
                )
            })?;
        }

        let conn = Connection::open(&db_path)?;
        Self::init_schema(&conn)?;
        Ok(ResultsDb { conn })
    }

    /// In-memory store for tests and throwaway sessions.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(ResultsDb { conn })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS attempts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id TEXT NOT NULL,
                username TEXT NOT NULL,
                avatar TEXT,
                mode TEXT NOT NULL,
                speed INTEGER NOT NULL,
                accuracy INTEGER NOT NULL,
                elapsed_secs REAL NOT NULL,
                timestamp TEXT NOT NULL,
                created_at DATETIME DEFAULT CURRENT_TIMESTAMP
            )
            "#,
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_attempts_user ON attempts(user_id)",
            [],
        )?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_attempts_mode ON attempts(mode)",
            [],
        )?;

        Ok(())
    }

    /// Persist one completed attempt.
    pub fn record_attempt(
        &self,
        who: &Identity,
        mode: PracticeMode,
        result: &AttemptResult,
    ) -> Result<()> {
        self.conn.execute(
            r#"
            INSERT INTO attempts
            (user_id, username, avatar, mode, speed, accuracy, elapsed_secs, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
            params![
                who.id,
                who.username,
                who.avatar,
                mode.to_string(),
                result.speed,
                result.accuracy,
                result.elapsed_secs,
                Local::now().to_rfc3339(),
            ],
        )?;

        Ok(())
    }

    /// Persist an attempt, swallowing failure. The learner keeps their
    /// finished session either way; we only log the loss.
    pub fn record_attempt_best_effort(
        &self,
        who: &Identity,
        mode: PracticeMode,
        result: &AttemptResult,
    ) {
        if let Err(err) = self.record_attempt(who, mode, result) {
            warn!(%err, user = %who.username, "failed to persist attempt result");
        }
    }

    /// All attempts for one user, newest first.
    pub fn attempts_for_user(&self, user_id: &str) -> Result<Vec<AttemptRecord>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT user_id, username, avatar, mode, speed, accuracy, elapsed_secs, timestamp
            FROM attempts
            WHERE user_id = ?1
            ORDER BY timestamp DESC
            "#,
        )?;

        let rows = stmt.query_map([user_id], Self::row_to_record)?;

        let mut records = Vec::new();
        for record in rows {
            records.push(record?);
        }

        Ok(records)
    }

    /// Best speed per user for one mode, fastest first.
    pub fn ranking(&self, mode: PracticeMode, limit: usize) -> Result<Vec<RankEntry>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT username, avatar, MAX(speed) as best_speed
            FROM attempts
            WHERE mode = ?1
            GROUP BY user_id
            ORDER BY best_speed DESC
            LIMIT ?2
            "#,
        )?;

        let rows = stmt.query_map(params![mode.to_string(), limit as i64], |row| {
            Ok(RankEntry {
                username: row.get(0)?,
                avatar: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                best_speed: row.get(2)?,
            })
        })?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }

        Ok(entries)
    }

    /// Aggregate one user's history, or `None` with no attempts yet.
    pub fn user_summary(&self, user_id: &str) -> Result<Option<UserSummary>> {
        let records = self.attempts_for_user(user_id)?;
        Ok(Self::summarize(user_id, &records))
    }

    /// Per-user aggregates across the whole store, fastest average first.
    pub fn class_overview(&self) -> Result<Vec<UserSummary>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT user_id, username, avatar, mode, speed, accuracy, elapsed_secs, timestamp
            FROM attempts
            ORDER BY user_id
            "#,
        )?;

        let rows = stmt.query_map([], Self::row_to_record)?;

        let mut records = Vec::new();
        for record in rows {
            records.push(record?);
        }

        let by_user = records.into_iter().into_group_map_by(|r| r.user_id.clone());

        let overview = by_user
            .into_iter()
            .filter_map(|(user_id, records)| Self::summarize(&user_id, &records))
            .sorted_by(|a, b| {
                b.avg_speed
                    .partial_cmp(&a.avg_speed)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .collect();

        Ok(overview)
    }

    /// Export every attempt as CSV, for teachers who want a spreadsheet.
    pub fn export_csv<P: AsRef<Path>>(&self, path: P) -> std::result::Result<(), Box<dyn Error>> {
        let mut stmt = self.conn.prepare(
            r#"
            SELECT user_id, username, avatar, mode, speed, accuracy, elapsed_secs, timestamp
            FROM attempts
            ORDER BY timestamp
            "#,
        )?;

        let rows = stmt.query_map([], Self::row_to_record)?;

        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "user_id",
            "username",
            "mode",
            "speed",
            "accuracy",
            "elapsed_secs",
            "timestamp",
        ])?;

        for record in rows {
            let r = record?;
            writer.write_record([
                r.user_id,
                r.username,
                r.mode.to_string(),
                r.speed.to_string(),
                r.accuracy.to_string(),
                format!("{:.2}", r.elapsed_secs),
                r.timestamp.to_rfc3339(),
            ])?;
        }

        writer.flush()?;
        Ok(())
    }

    /// Clear all attempts (for testing or reset purposes).
    pub fn clear_all(&self) -> Result<()> {
        self.conn.execute("DELETE FROM attempts", [])?;
        Ok(())
    }

    fn summarize(user_id: &str, records: &[AttemptRecord]) -> Option<UserSummary> {
        if records.is_empty() {
            return None;
        }

        let speeds: Vec<f64> = records.iter().map(|r| r.speed as f64).collect();
        let accuracies: Vec<f64> = records.iter().map(|r| r.accuracy as f64).collect();

        Some(UserSummary {
            user_id: user_id.to_string(),
            username: records[0].username.clone(),
            attempts: records.len(),
            avg_speed: mean(&speeds).unwrap_or(0.0),
            avg_accuracy: mean(&accuracies).unwrap_or(0.0),
            speed_std_dev: std_dev(&speeds).unwrap_or(0.0),
        })
    }

    fn row_to_record(row: &rusqlite::Row<'_>) -> Result<AttemptRecord> {
        let mode_tag: String = row.get(3)?;
        let mode = PracticeMode::from_tag(&mode_tag).ok_or_else(|| {
            rusqlite::Error::InvalidColumnType(3, "mode".to_string(), rusqlite::types::Type::Text)
        })?;

        let timestamp_str: String = row.get(7)?;
        let timestamp = DateTime::parse_from_rfc3339(&timestamp_str)
            .map_err(|_| {
                rusqlite::Error::InvalidColumnType(
                    7,
                    "timestamp".to_string(),
                    rusqlite::types::Type::Text,
                )
            })?
            .with_timezone(&Local);

        Ok(AttemptRecord {
            user_id: row.get(0)?,
            username: row.get(1)?,
            avatar: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            mode,
            speed: row.get(4)?,
            accuracy: row.get(5)?,
            elapsed_secs: row.get(6)?,
            timestamp,
        })
    }
}
