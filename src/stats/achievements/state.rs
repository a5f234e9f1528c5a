//! Per-player achievement state and its persisted form

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::definitions::{Achievement, AchievementId, ACHIEVEMENTS};

/// Runtime state of one catalog achievement for one player
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AchievementState {
    pub achievement: &'static Achievement,
    /// 0..=max_progress
    pub progress: u32,
    /// Set once, at the unlock transition
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl AchievementState {
    /// Locked state with zero progress
    pub fn fresh(achievement: &'static Achievement) -> Self {
        Self {
            achievement,
            progress: 0,
            unlocked_at: None,
        }
    }

    pub fn id(&self) -> AchievementId {
        self.achievement.id
    }

    pub fn is_unlocked(&self) -> bool {
        self.unlocked_at.is_some()
    }

    pub fn max_progress(&self) -> u32 {
        self.achievement.max_progress
    }

    /// Locked state for every catalog entry, in catalog order
    pub fn catalog_defaults() -> Vec<Self> {
        ACHIEVEMENTS.iter().map(Self::fresh).collect()
    }

    /// Rebuild states from persisted records.
    ///
    /// Records are matched to the live catalog by id: unknown ids are dropped,
    /// catalog entries without a record start fresh. Progress is re-clamped to
    /// the current threshold.
    pub fn restore(records: &[AchievementRecord]) -> Vec<Self> {
        ACHIEVEMENTS
            .iter()
            .map(|achievement| {
                match records.iter().find(|r| r.id == achievement.id.as_str()) {
                    Some(record) => Self {
                        achievement,
                        progress: record.progress.min(achievement.max_progress),
                        unlocked_at: record.unlocked_at,
                    },
                    None => Self::fresh(achievement),
                }
            })
            .collect()
    }
}

/// Serialized form of [`AchievementState`]. Holds only derived numbers, never logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AchievementRecord {
    pub id: String,
    #[serde(default)]
    pub progress: u32,
    #[serde(default)]
    pub unlocked_at: Option<DateTime<Utc>>,
}

impl From<&AchievementState> for AchievementRecord {
    fn from(state: &AchievementState) -> Self {
        Self {
            id: state.id().as_str().to_string(),
            progress: state.progress,
            unlocked_at: state.unlocked_at,
        }
    }
}

/// Convert a state list to its persisted form
pub fn to_records(states: &[AchievementState]) -> Vec<AchievementRecord> {
    states.iter().map(AchievementRecord::from).collect()
}
