//! Shared test utilities for progress engine tests

use std::path::PathBuf;

use chrono::NaiveDate;
use tempfile::TempDir;

use quizquest::stats::achievements::LevelCalculator;
use quizquest::stats::{AchievementManager, SqliteStore};
use quizquest::QuizOutcome;

/// Temporary directory holding a progress database
pub struct TestDb {
    _dir: TempDir,
    pub path: PathBuf,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("progress.db");
        Self { _dir: dir, path }
    }

    /// Open a manager on this database with the default level size
    pub fn manager(&self) -> AchievementManager {
        self.manager_with(LevelCalculator::default())
    }

    pub fn manager_with(&self, levels: LevelCalculator) -> AchievementManager {
        let store = SqliteStore::open(&self.path).expect("Failed to open progress db");
        AchievementManager::init(Box::new(store), levels, "student-1")
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

/// A non-demo quiz outcome
pub fn quiz(subject: &str, correct: u32, wrong: u32, secs: u32, on: NaiveDate) -> QuizOutcome {
    QuizOutcome {
        subject: subject.to_string(),
        correct,
        wrong,
        duration_secs: secs,
        demo: false,
        finished_on: on,
    }
}
