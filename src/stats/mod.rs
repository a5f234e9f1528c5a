//! Progress tracking module for QuizQuest
//!
//! Tracks quiz results, XP, levels, streaks and achievements, persisted in a
//! SQLite key-value store (`~/.quizquest/progress.db`).
//!
//! # Architecture
//!
//! ```text
//! Quiz handler (QuizOutcome)
//!         |
//!         v
//! StatsDelta (typed merge)
//!         |
//!         v
//! AchievementManager: merge -> evaluate -> grant -> persist
//!         |
//!         v
//! ~/.quizquest/progress.db
//! ```
//!
//! # Usage
//!
//! ```ignore
//! let manager = AchievementManager::init(Box::new(store), levels, "local");
//!
//! // Record a finished quiz
//! let delta = delta_for(&manager.stats(), &outcome);
//! let result = manager.apply_delta(&delta);
//!
//! // Query for the dashboard
//! let bar = manager.level_progress();
//! ```

pub mod achievements;
mod db;
mod models;
mod recorder;
mod store;
mod time_bucket;

pub use achievements::AchievementManager;
pub use db::SqliteStore;
pub use models::{GameStats, PeriodStats, StatsDelta, DEFAULT_USER_ID};
pub use recorder::{delta_for, QuizOutcome};
pub use store::{LoadedProgress, MemoryStore, ProgressStore, ACHIEVEMENTS_KEY, STATS_KEY};
pub use time_bucket::{month_bucket, week_bucket, year_bucket};

use anyhow::Result;

use crate::config::Config;

/// Open the configured database and load the player's progress
pub fn open_manager(config: &Config) -> Result<AchievementManager> {
    let levels = config.level_calculator()?;
    let store = SqliteStore::open(&config.database_path())?;
    Ok(AchievementManager::init(
        Box::new(store),
        levels,
        config.settings.user_id.clone(),
    ))
}
