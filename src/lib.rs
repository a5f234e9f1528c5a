//! QuizQuest - progress engine for the school quiz game
//!
//! Players answer multiple-choice quizzes across school subjects. This crate
//! keeps their cumulative stats, turns them into XP, levels and achievements,
//! and persists everything locally.
//!
//! ## Pieces
//!
//! 1. **Stats**: [`stats::GameStats`] updated through typed
//!    [`stats::StatsDelta`]s, usually built from a [`stats::QuizOutcome`].
//!
//! 2. **Achievements**: a fixed catalog evaluated by the
//!    [`stats::AchievementManager`] after every change.

pub mod config;
pub mod stats;

pub use config::{Config, ConfigError};
pub use stats::{AchievementManager, GameStats, QuizOutcome, StatsDelta};
