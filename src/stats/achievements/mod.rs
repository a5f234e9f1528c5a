//! Gamification system: Achievements, XP, Levels and Streaks
//!
//! This module provides the achievement engine on top of `GameStats`.

mod checker;
mod definitions;
mod levels;
mod manager;
mod state;
pub mod streaks;

pub use checker::{detect_new_unlocks, reevaluate};
pub use definitions::{
    Achievement, AchievementCategory, AchievementId, Metric, Rarity, ACHIEVEMENTS,
};
pub use levels::{LevelCalculator, LevelProgress, LevellingCurve, XpRewards};
pub use manager::{
    AchievementManager, DeltaOutcome, GamificationEvent, LevelUp, UnlockedAchievement,
};
pub use state::{to_records, AchievementRecord, AchievementState};
