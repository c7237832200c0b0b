//! SQLite-based session storage.
//!
//! Provides persistent storage for:
//! - Completed session records (meditation, pomodoro, workout)
//! - Session counters and application state via a key-value store

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

use crate::error::StorageError;
use crate::session::CounterStore;

use super::data_dir;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionRecord {
    pub id: i64,
    pub kind: String,
    pub label: String,
    pub duration_secs: u64,
    pub completed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Stats {
    pub sessions_completed: u64,
    pub workouts_completed: u64,
    pub recorded_sessions: u64,
    pub total_secs: u64,
}

/// SQLite database for session storage.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open the database at `~/.config/wellspring/wellspring.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, StorageError> {
        let path = data_dir()
            .map_err(|e| StorageError::DataDir(e.to_string()))?
            .join("wellspring.db");
        let conn =
            Connection::open(&path).map_err(|source| StorageError::OpenFailed { path, source })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database: used by tests and as the fallback when
    /// on-disk storage is unavailable.
    pub fn open_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(StorageError::from)?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), StorageError> {
        self.conn
            .execute_batch(
                "CREATE TABLE IF NOT EXISTS sessions (
                    id            INTEGER PRIMARY KEY AUTOINCREMENT,
                    kind          TEXT NOT NULL,
                    label         TEXT NOT NULL DEFAULT '',
                    duration_secs INTEGER NOT NULL,
                    completed_at  TEXT NOT NULL
                );

                CREATE TABLE IF NOT EXISTS kv (
                    key   TEXT PRIMARY KEY,
                    value TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_sessions_kind ON sessions(kind);
                CREATE INDEX IF NOT EXISTS idx_sessions_completed_at ON sessions(completed_at);",
            )
            .map_err(StorageError::from)
    }

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(Some(row.get(0)?)),
            None => Ok(None),
        }
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    /// Record a completed session.
    ///
    /// # Errors
    /// Returns an error if the insert fails.
    pub fn record_session(
        &self,
        kind: &str,
        label: &str,
        duration_secs: u64,
        completed_at: DateTime<Utc>,
    ) -> Result<i64, rusqlite::Error> {
        self.conn.execute(
            "INSERT INTO sessions (kind, label, duration_secs, completed_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![kind, label, duration_secs, completed_at.to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    pub fn recent_sessions(&self, limit: u32) -> Result<Vec<SessionRecord>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(
            "SELECT id, kind, label, duration_secs, completed_at
             FROM sessions ORDER BY completed_at DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![limit], |row| {
            let completed_at: String = row.get(4)?;
            Ok(SessionRecord {
                id: row.get(0)?,
                kind: row.get(1)?,
                label: row.get(2)?,
                duration_secs: row.get(3)?,
                completed_at: completed_at
                    .parse::<DateTime<Utc>>()
                    .unwrap_or_else(|_| Utc::now()),
            })
        })?;
        rows.collect()
    }

    pub fn stats(&self) -> Result<Stats, rusqlite::Error> {
        let (recorded_sessions, total_secs) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(duration_secs), 0) FROM sessions",
            [],
            |row| Ok((row.get::<_, u64>(0)?, row.get::<_, u64>(1)?)),
        )?;
        Ok(Stats {
            sessions_completed: self.read_counter("sessions_completed"),
            workouts_completed: self.read_counter("workouts_completed"),
            recorded_sessions,
            total_secs,
        })
    }

    /// Counter read with failures swallowed: a missing or unreadable value
    /// acts as 0.
    fn read_counter(&self, key: &str) -> u64 {
        self.kv_get(key)
            .ok()
            .flatten()
            .and_then(|v| v.parse().ok())
            .unwrap_or(0)
    }

    /// Counter write with failures swallowed.
    fn write_counter(&self, key: &str, value: u64) {
        let _ = self.kv_set(key, &value.to_string());
    }
}

impl CounterStore for Database {
    fn counter(&self, key: &str) -> u64 {
        self.read_counter(key)
    }

    fn set_counter(&mut self, key: &str, value: u64) {
        self.write_counter(key, value);
    }
}

/// Shared-reference form used by the CLI, where one open database backs both
/// the counter store and the key-value persistence of timer state.
impl CounterStore for &Database {
    fn counter(&self, key: &str) -> u64 {
        self.read_counter(key)
    }

    fn set_counter(&mut self, key: &str, value: u64) {
        self.write_counter(key, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kv_roundtrip() {
        let db = Database::open_memory().unwrap();
        assert_eq!(db.kv_get("missing").unwrap(), None);
        db.kv_set("mindful_state", "{}").unwrap();
        db.kv_set("mindful_state", "{\"mode\":\"pomodoro\"}").unwrap();
        assert_eq!(
            db.kv_get("mindful_state").unwrap().as_deref(),
            Some("{\"mode\":\"pomodoro\"}")
        );
    }

    #[test]
    fn counters_default_to_zero_and_persist() {
        let mut db = Database::open_memory().unwrap();
        assert_eq!(db.counter("sessions_completed"), 0);
        db.set_counter("sessions_completed", 4);
        assert_eq!(db.counter("sessions_completed"), 4);
    }

    #[test]
    fn garbage_counter_value_acts_as_zero() {
        let db = Database::open_memory().unwrap();
        db.kv_set("sessions_completed", "not-a-number").unwrap();
        assert_eq!(db.counter("sessions_completed"), 0);
    }

    #[test]
    fn record_session_feeds_stats() {
        let mut db = Database::open_memory().unwrap();
        db.record_session("meditation", "meditation", 120, Utc::now())
            .unwrap();
        db.record_session("workout", "legs", 300, Utc::now()).unwrap();
        db.set_counter("workouts_completed", 1);

        let stats = db.stats().unwrap();
        assert_eq!(stats.recorded_sessions, 2);
        assert_eq!(stats.total_secs, 420);
        assert_eq!(stats.workouts_completed, 1);
        assert_eq!(stats.sessions_completed, 0);

        let recent = db.recent_sessions(10).unwrap();
        assert_eq!(recent.len(), 2);
    }
}
