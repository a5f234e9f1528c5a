//! Achievement Manager - Core gamification logic
//!
//! Owns the player's `GameStats` and achievement states, applies deltas,
//! grants rewards for new unlocks and persists after every mutation.
//!
//! Every mutating operation runs merge → evaluate → grant → persist inside a
//! single lock scope, so no reader ever sees stats that were updated without
//! their achievements.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::Serialize;

use super::checker::{detect_new_unlocks, reevaluate};
use super::definitions::{Achievement, AchievementCategory, AchievementId, Rarity};
use super::levels::{LevelCalculator, LevelProgress};
use super::state::{to_records, AchievementState};
use crate::stats::models::{GameStats, StatsDelta};
use crate::stats::store::ProgressStore;

/// An achievement that was just unlocked
#[derive(Debug, Clone, PartialEq)]
pub struct UnlockedAchievement {
    pub achievement: &'static Achievement,
    pub unlocked_at: DateTime<Utc>,
    /// Unlocked through `force_unlock` rather than its condition
    pub forced: bool,
}

/// A level up event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelUp {
    pub old_level: u32,
    pub new_level: u32,
}

/// Events that can happen while applying a change
#[derive(Debug, Clone, PartialEq)]
pub enum GamificationEvent {
    AchievementUnlocked(UnlockedAchievement),
    XpAwarded { amount: u64, reason: String },
    LevelUp(LevelUp),
}

/// Result of a mutating operation
#[derive(Debug, Clone)]
pub struct DeltaOutcome {
    pub stats: GameStats,
    pub events: Vec<GamificationEvent>,
}

impl DeltaOutcome {
    /// Achievements unlocked by this change, in unlock order
    pub fn unlocked(&self) -> impl Iterator<Item = &UnlockedAchievement> {
        self.events.iter().filter_map(|e| match e {
            GamificationEvent::AchievementUnlocked(u) => Some(u),
            _ => None,
        })
    }

    pub fn level_up(&self) -> Option<LevelUp> {
        self.events.iter().find_map(|e| match e {
            GamificationEvent::LevelUp(l) => Some(*l),
            _ => None,
        })
    }
}

/// The guarded pair: stats and achievement states always change together
struct ProgressState {
    stats: GameStats,
    achievements: Vec<AchievementState>,
}

/// Main manager for all gamification features
pub struct AchievementManager {
    state: Mutex<ProgressState>,
    store: Box<dyn ProgressStore>,
    levels: LevelCalculator,
    user_id: String,
}

impl AchievementManager {
    /// Load progress from `store`, falling back to defaults for anything
    /// missing or malformed.
    ///
    /// Loaded state is reconciled (stats ids vs unlocked records) and
    /// reevaluated once, so achievements added to the catalog since the last
    /// save are granted immediately.
    pub fn init(
        store: Box<dyn ProgressStore>,
        levels: LevelCalculator,
        user_id: impl Into<String>,
    ) -> Self {
        let user_id = user_id.into();
        let loaded = store.load();

        let mut stats = loaded.stats.unwrap_or_else(|| {
            tracing::debug!("No stored stats, starting from defaults");
            GameStats::new(user_id.clone())
        });
        if stats.user_id != user_id {
            tracing::warn!(
                "Stored progress belongs to {}, continuing it as {}",
                stats.user_id,
                user_id
            );
            stats.user_id = user_id.clone();
        }
        let achievements = match loaded.achievements {
            Some(records) => AchievementState::restore(&records),
            None => AchievementState::catalog_defaults(),
        };

        let manager = Self {
            state: Mutex::new(ProgressState {
                stats,
                achievements,
            }),
            store,
            levels,
            user_id,
        };

        {
            let mut state = manager.lock();
            reconcile(&mut state);
            let now = Utc::now();
            let old_level = state.stats.current_level;
            let mut events = Vec::new();
            manager.settle(&mut state, now, old_level, &mut events);
            if !events.is_empty() {
                tracing::info!("Granted {} catch-up event(s) on load", events.len());
                state.stats.updated_at = now;
                manager.persist(&state);
            }
        }

        manager
    }

    fn lock(&self) -> MutexGuard<'_, ProgressState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ========================================
    // STATS OPERATIONS
    // ========================================

    /// Snapshot of the current stats
    pub fn stats(&self) -> GameStats {
        self.lock().stats.clone()
    }

    /// Merge `delta` into the stats, reevaluate achievements, grant rewards for
    /// new unlocks and persist.
    pub fn apply_delta(&self, delta: &StatsDelta) -> DeltaOutcome {
        let mut state = self.lock();
        let now = Utc::now();
        let old_level = state.stats.current_level;

        delta.apply_to(&mut state.stats);
        state.stats.updated_at = now;

        let mut events = Vec::new();
        self.settle(&mut state, now, old_level, &mut events);
        self.persist(&state);

        DeltaOutcome {
            stats: state.stats.clone(),
            events,
        }
    }

    /// Reset stats to defaults and lock every achievement
    pub fn reset_stats(&self) -> GameStats {
        let mut state = self.lock();
        let now = Utc::now();
        state.stats = GameStats::new(self.user_id.clone());
        state.achievements = AchievementState::catalog_defaults();

        let mut events = Vec::new();
        let old_level = state.stats.current_level;
        self.settle(&mut state, now, old_level, &mut events);
        self.persist(&state);
        tracing::info!("Progress reset for {}", self.user_id);
        state.stats.clone()
    }

    /// Unlock an achievement without checking its condition.
    ///
    /// Administrative/test escape hatch: the recorded id may disagree with
    /// the catalog condition afterwards. Rewards are granted once; unlocking an
    /// already unlocked achievement is a no-op. Returns `None` for unknown ids.
    pub fn force_unlock(&self, id: &str) -> Option<DeltaOutcome> {
        let id = AchievementId::from_str(id)?;
        let mut state = self.lock();
        let now = Utc::now();
        let old_level = state.stats.current_level;
        let mut events = Vec::new();

        let slot = state.achievements.iter_mut().find(|s| s.id() == id)?;
        if slot.unlocked_at.is_none() {
            slot.unlocked_at = Some(now);
            tracing::warn!("Force-unlocked achievement {}", id);
            grant(&mut state.stats, id, now, true, &mut events);
            state.stats.updated_at = now;

            self.settle(&mut state, now, old_level, &mut events);
            self.persist(&state);
        }

        Some(DeltaOutcome {
            stats: state.stats.clone(),
            events,
        })
    }

    /// Write the current state to the store, reporting failures
    pub fn flush(&self) -> Result<()> {
        let state = self.lock();
        self.store
            .save(&state.stats, &to_records(&state.achievements))
    }

    /// Final flush before the manager goes away
    pub fn teardown(self) -> Result<()> {
        self.flush()
    }

    // ========================================
    // ACHIEVEMENT QUERIES
    // ========================================

    /// All achievement states in catalog order
    pub fn achievements(&self) -> Vec<AchievementState> {
        self.lock().achievements.clone()
    }

    pub fn unlocked_achievements(&self) -> Vec<AchievementState> {
        self.filtered(AchievementState::is_unlocked)
    }

    pub fn locked_achievements(&self) -> Vec<AchievementState> {
        self.filtered(|s| !s.is_unlocked())
    }

    pub fn achievements_by_category(&self, category: AchievementCategory) -> Vec<AchievementState> {
        self.filtered(|s| s.achievement.category == category)
    }

    pub fn achievements_by_rarity(&self, rarity: Rarity) -> Vec<AchievementState> {
        self.filtered(|s| s.achievement.rarity == rarity)
    }

    /// Current progress for an achievement id, `None` if unknown
    pub fn achievement_progress(&self, id: &str) -> Option<u32> {
        let id = AchievementId::from_str(id)?;
        self.lock()
            .achievements
            .iter()
            .find(|s| s.id() == id)
            .map(|s| s.progress)
    }

    /// Sum of `xp_reward` over unlocked achievements
    pub fn total_achievement_xp(&self) -> u64 {
        self.lock()
            .achievements
            .iter()
            .filter(|s| s.is_unlocked())
            .map(|s| u64::from(s.achievement.xp_reward))
            .sum()
    }

    pub fn level_progress(&self) -> LevelProgress {
        self.levels.level_progress(&self.lock().stats)
    }

    fn filtered(&self, keep: impl Fn(&AchievementState) -> bool) -> Vec<AchievementState> {
        self.lock()
            .achievements
            .iter()
            .filter(|s| keep(*s))
            .cloned()
            .collect()
    }

    // ========================================
    // INTERNALS
    // ========================================

    /// Evaluate until nothing new unlocks.
    ///
    /// Granted XP can raise the level, which can unlock level-based
    /// achievements; the loop ends because unlocks are sticky and the catalog
    /// is finite.
    fn settle(
        &self,
        state: &mut ProgressState,
        now: DateTime<Utc>,
        old_level: u32,
        events: &mut Vec<GamificationEvent>,
    ) {
        state.stats.current_level = self.levels.level_for_xp(state.stats.total_xp);

        loop {
            let after = reevaluate(&state.stats, &state.achievements, now);
            let new_ids = detect_new_unlocks(&state.achievements, &after);
            state.achievements = after;

            if new_ids.is_empty() {
                break;
            }
            tracing::debug!("Evaluation pass unlocked {} achievement(s)", new_ids.len());

            for id in new_ids {
                grant(&mut state.stats, id, now, false, events);
            }
            state.stats.current_level = self.levels.level_for_xp(state.stats.total_xp);
        }

        let new_level = state.stats.current_level;
        if new_level > old_level {
            tracing::info!("Level up: {} -> {}", old_level, new_level);
            events.push(GamificationEvent::LevelUp(LevelUp {
                old_level,
                new_level,
            }));
        }
    }

    /// Save, logging instead of failing. Progress is best-effort.
    fn persist(&self, state: &ProgressState) {
        if let Err(e) = self
            .store
            .save(&state.stats, &to_records(&state.achievements))
        {
            tracing::warn!("Failed to persist progress: {:#}", e);
        }
    }
}

/// Record an unlock in the stats and attribute its rewards
fn grant(
    stats: &mut GameStats,
    id: AchievementId,
    now: DateTime<Utc>,
    forced: bool,
    events: &mut Vec<GamificationEvent>,
) {
    let achievement = id.definition();
    stats.record_achievement(id.as_str());
    stats.total_xp = stats.total_xp.saturating_add(u64::from(achievement.xp_reward));
    stats.total_score = stats
        .total_score
        .saturating_add(u64::from(achievement.points_reward));

    tracing::info!(
        "Achievement unlocked: {} (+{} XP, +{} points)",
        achievement.name,
        achievement.xp_reward,
        achievement.points_reward
    );

    events.push(GamificationEvent::AchievementUnlocked(UnlockedAchievement {
        achievement,
        unlocked_at: now,
        forced,
    }));
    if achievement.xp_reward > 0 {
        events.push(GamificationEvent::XpAwarded {
            amount: u64::from(achievement.xp_reward),
            reason: format!("Achievement: {}", achievement.name),
        });
    }
}

/// Make `GameStats::achievements` and the unlocked states agree.
///
/// Ids recorded in the stats but locked in the states are treated as unlocked
/// (they may come from a force unlock); unlocked states missing from the stats
/// are appended. Unknown and repeated ids are dropped.
fn reconcile(state: &mut ProgressState) {
    let fallback_at = state.stats.updated_at;
    let mut seen = HashSet::new();
    state
        .stats
        .achievements
        .retain(|id| AchievementId::from_str(id).is_some() && seen.insert(id.clone()));

    for recorded in &state.stats.achievements {
        if let Some(slot) = state
            .achievements
            .iter_mut()
            .find(|s| s.id().as_str() == recorded && s.unlocked_at.is_none())
        {
            slot.unlocked_at = Some(fallback_at);
        }
    }

    for slot in &state.achievements {
        if slot.is_unlocked() {
            state.stats.record_achievement(slot.id().as_str());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::store::MemoryStore;

    fn manager() -> AchievementManager {
        AchievementManager::init(
            Box::new(MemoryStore::new()),
            LevelCalculator::default(),
            "tester",
        )
    }

    #[test]
    fn test_init_from_empty_store() {
        let m = manager();
        let stats = m.stats();
        assert_eq!(stats.user_id, "tester");
        assert_eq!(stats.total_quizzes, 0);
        assert!(m.unlocked_achievements().is_empty());
        assert_eq!(m.locked_achievements().len(), Achievement::total_count());
    }

    #[test]
    fn test_first_quiz_scenario() {
        let m = manager();
        let outcome = m.apply_delta(&StatsDelta {
            total_quizzes: Some(1),
            ..Default::default()
        });

        let unlocked: Vec<_> = outcome.unlocked().map(|u| u.achievement.id).collect();
        assert_eq!(unlocked, vec![AchievementId::FirstQuiz]);
        assert_eq!(outcome.stats.achievements, vec!["first-quiz".to_string()]);
        assert_eq!(outcome.stats.total_xp, 50);
        assert_eq!(m.achievement_progress("first-quiz"), Some(1));

        let unlocked_now = m.unlocked_achievements();
        assert_eq!(unlocked_now.len(), 1);
        assert_eq!(unlocked_now[0].id(), AchievementId::FirstQuiz);
    }

    #[test]
    fn test_perfect_score_rewards_granted_once() {
        let m = manager();
        let first = m.apply_delta(&StatsDelta {
            perfect_scores: Some(1),
            ..Default::default()
        });
        assert_eq!(first.stats.total_xp, 250);
        assert_eq!(first.unlocked().count(), 1);

        let second = m.apply_delta(&StatsDelta {
            perfect_scores: Some(2),
            ..Default::default()
        });
        assert_eq!(second.stats.total_xp, 250);
        assert_eq!(second.unlocked().count(), 0);
        assert!(second.events.is_empty());
    }

    #[test]
    fn test_reward_xp_can_trigger_level_achievement() {
        let m = AchievementManager::init(
            Box::new(MemoryStore::new()),
            LevelCalculator::new(100).unwrap(),
            "tester",
        );
        // 150 XP + 250 perfect-score reward = 400 -> level 5 -> rising-star
        let outcome = m.apply_delta(&StatsDelta {
            total_xp: Some(150),
            perfect_scores: Some(1),
            ..Default::default()
        });

        let ids: Vec<_> = outcome.unlocked().map(|u| u.achievement.id).collect();
        assert_eq!(ids, vec![AchievementId::PerfectScore, AchievementId::RisingStar]);
        assert_eq!(outcome.stats.total_xp, 150 + 250 + 500);
        assert_eq!(outcome.stats.current_level, 10);
        assert_eq!(
            outcome.level_up(),
            Some(LevelUp {
                old_level: 1,
                new_level: 10
            })
        );
    }

    #[test]
    fn test_force_unlock_bypasses_condition() {
        let m = manager();
        let outcome = m.force_unlock("polymath").unwrap();

        let unlocked: Vec<_> = outcome.unlocked().collect();
        assert_eq!(unlocked.len(), 1);
        assert!(unlocked[0].forced);
        assert!(outcome.stats.has_achievement("polymath"));
        assert_eq!(m.achievement_progress("polymath"), Some(0));

        // Second call is a no-op
        let again = m.force_unlock("polymath").unwrap();
        assert!(again.events.is_empty());
        assert_eq!(again.stats.total_xp, outcome.stats.total_xp);

        // Stays unlocked across later evaluations
        m.apply_delta(&StatsDelta {
            total_quizzes: Some(1),
            ..Default::default()
        });
        assert!(m.stats().has_achievement("polymath"));
    }

    #[test]
    fn test_unknown_ids_yield_none() {
        let m = manager();
        assert_eq!(m.achievement_progress("nope"), None);
        assert!(m.force_unlock("nope").is_none());
    }

    #[test]
    fn test_total_achievement_xp_sums_unlocked_only() {
        let m = manager();
        m.apply_delta(&StatsDelta {
            total_quizzes: Some(1),
            demo_quizzes: Some(1),
            ..Default::default()
        });
        assert_eq!(m.total_achievement_xp(), 50 + 25);
    }

    #[test]
    fn test_reset_clears_everything() {
        let m = manager();
        m.apply_delta(&StatsDelta {
            total_quizzes: Some(12),
            streak_days: Some(4),
            ..Default::default()
        });
        assert!(!m.unlocked_achievements().is_empty());

        let stats = m.reset_stats();
        assert_eq!(stats.total_quizzes, 0);
        assert_eq!(stats.total_xp, 0);
        assert_eq!(stats.current_level, 1);
        assert!(stats.achievements.is_empty());
        for state in m.achievements() {
            assert!(!state.is_unlocked());
            assert_eq!(state.progress, 0);
        }
    }

    #[test]
    fn test_reset_survives_reload() {
        let m = manager();
        m.apply_delta(&StatsDelta {
            total_quizzes: Some(55),
            perfect_scores: Some(2),
            demo_quizzes: Some(1),
            total_xp: Some(9_000),
            ..Default::default()
        });
        assert!(m.stats().has_achievement("rising-star"));
        m.reset_stats();

        let snapshot = m.stats();
        let records = to_records(&m.achievements());
        let reloaded = MemoryStore::new();
        reloaded.save(&snapshot, &records).unwrap();
        let m = AchievementManager::init(Box::new(reloaded), LevelCalculator::default(), "tester");

        for state in m.achievements() {
            assert!(!state.is_unlocked(), "{} unlocked after reset", state.id());
            assert_eq!(state.progress, 0, "{} has progress after reset", state.id());
        }
        assert_eq!(m.stats().total_xp, 0);
    }

    #[test]
    fn test_init_drops_repeated_ids() {
        let store = MemoryStore::new();
        let mut stats = GameStats::new("tester");
        stats.total_quizzes = 1;
        stats.achievements = vec!["first-quiz".to_string(), "first-quiz".to_string()];
        store.save(&stats, &[]).unwrap();

        let m = AchievementManager::init(Box::new(store), LevelCalculator::default(), "tester");
        assert_eq!(m.stats().achievements, vec!["first-quiz".to_string()]);
        assert_eq!(m.unlocked_achievements().len(), 1);
    }

    #[test]
    fn test_init_adopts_configured_user() {
        let store = MemoryStore::new();
        let mut stats = GameStats::new("alice");
        stats.total_quizzes = 3;
        store.save(&stats, &[]).unwrap();

        let m = AchievementManager::init(Box::new(store), LevelCalculator::default(), "bob");
        let stats = m.stats();
        assert_eq!(stats.user_id, "bob");
        assert_eq!(stats.total_quizzes, 3);
    }

    #[test]
    fn test_filters() {
        let m = manager();
        assert_eq!(
            m.achievements_by_category(AchievementCategory::Speed).len(),
            Achievement::by_category(AchievementCategory::Speed).count()
        );
        assert!(m
            .achievements_by_rarity(Rarity::Legendary)
            .iter()
            .all(|s| s.achievement.rarity == Rarity::Legendary));
    }

    #[test]
    fn test_reconcile_recovers_recorded_ids() {
        let store = MemoryStore::new();
        let mut stats = GameStats::new("tester");
        stats.achievements = vec!["speed-demon".to_string(), "gone".to_string()];
        store.save(&stats, &[]).unwrap();

        let m = AchievementManager::init(Box::new(store), LevelCalculator::default(), "tester");
        let stats = m.stats();
        assert_eq!(stats.achievements, vec!["speed-demon".to_string()]);
        assert!(m
            .unlocked_achievements()
            .iter()
            .any(|s| s.id() == AchievementId::SpeedDemon));
    }
}
