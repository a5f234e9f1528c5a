//! Persistence adapter for progress data
//!
//! Progress lives under two fixed keys in a key-value medium: the serialized
//! `GameStats` and the list of achievement records. Loading never fails; an
//! unavailable medium or malformed content yields `None` so callers fall back
//! to defaults.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

use super::achievements::AchievementRecord;
use super::models::GameStats;

/// Key for the serialized `GameStats`
pub const STATS_KEY: &str = "quizquest.game_stats";
/// Key for the serialized achievement record list
pub const ACHIEVEMENTS_KEY: &str = "quizquest.achievements";

/// Whatever `ProgressStore::load` could recover
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedProgress {
    pub stats: Option<GameStats>,
    pub achievements: Option<Vec<AchievementRecord>>,
}

/// Durable key-value medium for progress data
pub trait ProgressStore: Send + Sync {
    /// Raw value under `key`, `Ok(None)` if absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write both progress records. Implementations should write them together.
    fn put_all(&self, entries: &[(&str, String)]) -> Result<()>;

    /// Load progress, recovering from any failure
    fn load(&self) -> LoadedProgress {
        LoadedProgress {
            stats: read_json(self, STATS_KEY),
            achievements: read_json(self, ACHIEVEMENTS_KEY),
        }
    }

    /// Serialize and write stats and achievement records
    fn save(&self, stats: &GameStats, achievements: &[AchievementRecord]) -> Result<()> {
        let stats_json = serde_json::to_string(stats).context("Failed to serialize stats")?;
        let achievements_json =
            serde_json::to_string(achievements).context("Failed to serialize achievements")?;
        self.put_all(&[(STATS_KEY, stats_json), (ACHIEVEMENTS_KEY, achievements_json)])
    }
}

fn read_json<S, T>(store: &S, key: &str) -> Option<T>
where
    S: ProgressStore + ?Sized,
    T: DeserializeOwned,
{
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!("Progress store unavailable reading {}: {:#}", key, e);
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!("Discarding malformed progress under {}: {}", key, e);
            None
        }
    }
}

/// In-memory store, for tests and throwaway sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw value, bypassing serialization
    pub fn insert_raw(&self, key: &str, value: impl Into<String>) {
        self.lock().insert(key.to_string(), value.into());
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl ProgressStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.lock().get(key).cloned())
    }

    fn put_all(&self, entries: &[(&str, String)]) -> Result<()> {
        let mut map = self.lock();
        for (key, value) in entries {
            map.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}
