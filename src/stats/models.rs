//! Data models for progress tracking
//!
//! `GameStats` is the canonical per-user progress record. It is only ever
//! mutated by the achievement manager, either through a typed [`StatsDelta`]
//! or by a reset.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default owner for stats created without an explicit user
pub const DEFAULT_USER_ID: &str = "local";

/// Aggregated numbers for one calendar period (week, month or year)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PeriodStats {
    /// Bucket key, e.g. "2026-W42", "2026-10" or "2026". Empty until first use.
    pub period: String,
    pub quizzes: u32,
    pub correct_answers: u32,
    pub wrong_answers: u32,
    pub score: u64,
    pub xp: u64,
}

impl PeriodStats {
    /// Start an empty rollup for the given bucket
    pub fn starting(period: impl Into<String>) -> Self {
        Self {
            period: period.into(),
            ..Self::default()
        }
    }
}

/// Cumulative progress record for one player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameStats {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,

    // Quiz counters
    pub total_quizzes: u32,
    pub total_correct_answers: u32,
    pub total_wrong_answers: u32,
    pub total_score: u64,

    // Levelling (current_level is derived from total_xp)
    pub current_level: u32,
    pub total_xp: u64,

    pub streak_days: u32,
    pub perfect_scores: u32,

    // Lower-stakes demo mode
    pub demo_quizzes: u32,
    pub demo_perfect_scores: u32,

    /// Fastest completed quiz in seconds, 0 = unset
    pub fastest_quiz_time: u32,
    pub subjects_mastered: BTreeSet<String>,
    pub last_quiz_date: Option<NaiveDate>,

    /// Unlocked achievement ids in unlock order
    pub achievements: Vec<String>,
    pub has_seen_tutorial: bool,

    pub weekly: PeriodStats,
    pub monthly: PeriodStats,
    pub yearly: PeriodStats,
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new(DEFAULT_USER_ID)
    }
}

impl GameStats {
    /// Fresh all-zero stats for a user
    pub fn new(user_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            user_id: user_id.into(),
            total_quizzes: 0,
            total_correct_answers: 0,
            total_wrong_answers: 0,
            total_score: 0,
            current_level: 1,
            total_xp: 0,
            streak_days: 0,
            perfect_scores: 0,
            demo_quizzes: 0,
            demo_perfect_scores: 0,
            fastest_quiz_time: 0,
            subjects_mastered: BTreeSet::new(),
            last_quiz_date: None,
            achievements: Vec::new(),
            has_seen_tutorial: false,
            weekly: PeriodStats::default(),
            monthly: PeriodStats::default(),
            yearly: PeriodStats::default(),
        }
    }

    /// Answer accuracy over all non-demo quizzes, as a percentage
    pub fn accuracy(&self) -> f64 {
        let total = u64::from(self.total_correct_answers) + u64::from(self.total_wrong_answers);
        if total == 0 {
            0.0
        } else {
            (self.total_correct_answers as f64 / total as f64) * 100.0
        }
    }

    /// Whether the achievement id is recorded as unlocked
    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }

    /// Record an unlocked achievement id, ignoring duplicates.
    /// Returns true if the id was newly added.
    pub(crate) fn record_achievement(&mut self, id: &str) -> bool {
        if self.has_achievement(id) {
            return false;
        }
        self.achievements.push(id.to_string());
        true
    }
}

/// Partial update for [`GameStats`].
///
/// Every present field overwrites the stored value; absent fields are left
/// unchanged. Callers compute the new absolute values (e.g. `total_quizzes + 1`)
/// before submitting. Engine-owned fields (id, timestamps, level, achievements)
/// cannot be written through a delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsDelta {
    pub total_quizzes: Option<u32>,
    pub total_correct_answers: Option<u32>,
    pub total_wrong_answers: Option<u32>,
    pub total_score: Option<u64>,
    pub total_xp: Option<u64>,
    pub streak_days: Option<u32>,
    pub perfect_scores: Option<u32>,
    pub demo_quizzes: Option<u32>,
    pub demo_perfect_scores: Option<u32>,
    pub fastest_quiz_time: Option<u32>,
    pub subjects_mastered: Option<BTreeSet<String>>,
    pub last_quiz_date: Option<NaiveDate>,
    pub has_seen_tutorial: Option<bool>,
    pub weekly: Option<PeriodStats>,
    pub monthly: Option<PeriodStats>,
    pub yearly: Option<PeriodStats>,
}

impl StatsDelta {
    /// Shallow-merge the present fields into `stats`
    pub fn apply_to(&self, stats: &mut GameStats) {
        fn set<T: Clone>(target: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *target = v.clone();
            }
        }

        set(&mut stats.total_quizzes, &self.total_quizzes);
        set(&mut stats.total_correct_answers, &self.total_correct_answers);
        set(&mut stats.total_wrong_answers, &self.total_wrong_answers);
        set(&mut stats.total_score, &self.total_score);
        set(&mut stats.total_xp, &self.total_xp);
        set(&mut stats.streak_days, &self.streak_days);
        set(&mut stats.perfect_scores, &self.perfect_scores);
        set(&mut stats.demo_quizzes, &self.demo_quizzes);
        set(&mut stats.demo_perfect_scores, &self.demo_perfect_scores);
        set(&mut stats.fastest_quiz_time, &self.fastest_quiz_time);
        set(&mut stats.subjects_mastered, &self.subjects_mastered);
        set(&mut stats.has_seen_tutorial, &self.has_seen_tutorial);
        set(&mut stats.weekly, &self.weekly);
        set(&mut stats.monthly, &self.monthly);
        set(&mut stats.yearly, &self.yearly);
        if self.last_quiz_date.is_some() {
            stats.last_quiz_date = self.last_quiz_date;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_zeroed() {
        let stats = GameStats::default();
        assert_eq!(stats.user_id, DEFAULT_USER_ID);
        assert_eq!(stats.current_level, 1);
        assert_eq!(stats.total_xp, 0);
        assert_eq!(stats.fastest_quiz_time, 0);
        assert!(stats.achievements.is_empty());
        assert!(stats.last_quiz_date.is_none());
        assert_eq!(stats.accuracy(), 0.0);
    }

    #[test]
    fn test_delta_only_touches_present_fields() {
        let mut stats = GameStats::default();
        stats.total_wrong_answers = 4;

        let delta = StatsDelta {
            total_quizzes: Some(3),
            has_seen_tutorial: Some(true),
            ..Default::default()
        };
        delta.apply_to(&mut stats);

        assert_eq!(stats.total_quizzes, 3);
        assert!(stats.has_seen_tutorial);
        assert_eq!(stats.total_wrong_answers, 4);
    }

    #[test]
    fn test_accuracy_at_counter_limits() {
        let stats = GameStats {
            total_correct_answers: u32::MAX,
            total_wrong_answers: u32::MAX,
            ..GameStats::default()
        };
        assert_eq!(stats.accuracy(), 50.0);

        let stats = GameStats {
            total_correct_answers: u32::MAX,
            total_wrong_answers: 1,
            ..GameStats::default()
        };
        assert!(stats.accuracy() > 99.9 && stats.accuracy() < 100.0);
    }

    #[test]
    fn test_record_achievement_ignores_duplicates() {
        let mut stats = GameStats::default();
        assert!(stats.record_achievement("first-quiz"));
        assert!(!stats.record_achievement("first-quiz"));
        assert_eq!(stats.achievements, vec!["first-quiz".to_string()]);
    }

    #[test]
    fn test_missing_fields_deserialize_to_defaults() {
        let stats: GameStats = serde_json::from_str(r#"{"total_quizzes": 7}"#).unwrap();
        assert_eq!(stats.total_quizzes, 7);
        assert_eq!(stats.current_level, 1);
        assert!(stats.subjects_mastered.is_empty());
    }
}
