//! SQLite-backed key-value store for progress data
//!
//! Manages the `~/.quizquest/progress.db` database with automatic schema setup.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::store::ProgressStore;

/// Current schema version
const SCHEMA_VERSION: i32 = 1;

/// Database wrapper around a single shared connection
#[derive(Clone)]
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open or create the progress database at a specific path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create data dir: {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open progress db: {}", path.display()))?;

        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::with_connection(conn)
    }

    /// In-memory database (nothing survives the process)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory db")?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init_schema()?;
        Ok(db)
    }

    fn conn(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Initialize the database schema
    fn init_schema(&self) -> Result<()> {
        let conn = self.conn();
        conn.execute_batch(SCHEMA_SQL)
            .context("Failed to initialize progress schema")?;
        conn.execute(
            "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
            [SCHEMA_VERSION],
        )?;
        Ok(())
    }
}

impl ProgressStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn();
        let value = conn
            .query_row("SELECT value FROM kv_store WHERE key = ?1", [key], |r| {
                r.get::<_, String>(0)
            })
            .optional()
            .with_context(|| format!("Failed to read key {}", key))?;
        Ok(value)
    }

    fn put_all(&self, entries: &[(&str, String)]) -> Result<()> {
        let now = Utc::now().timestamp_millis();
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        for (key, value) in entries {
            tx.execute(
                r#"
                INSERT INTO kv_store (key, value, updated_at) VALUES (?1, ?2, ?3)
                ON CONFLICT(key) DO UPDATE SET value = ?2, updated_at = ?3
                "#,
                (key, value, now),
            )
            .with_context(|| format!("Failed to write key {}", key))?;
        }
        tx.commit().context("Failed to commit progress")?;
        Ok(())
    }
}

/// SQL schema for the progress database
const SCHEMA_SQL: &str = r#"
-- Key-value records (JSON values)
CREATE TABLE IF NOT EXISTS kv_store (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at INTEGER NOT NULL
);

-- Schema version
CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY);
"#;
