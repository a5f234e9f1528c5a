//! Achievement checking logic
//!
//! Recomputes progress and unlock state from `GameStats` and diffs snapshots
//! to find achievements that were unlocked by the latest change. Rewards are
//! only ever derived from that diff.

use chrono::{DateTime, Utc};

use super::definitions::{AchievementId, ACHIEVEMENTS};
use super::state::AchievementState;
use crate::stats::models::GameStats;

/// Recompute every catalog achievement against `stats`.
///
/// Output is in catalog order. An achievement whose condition holds gets
/// `unlocked_at = now` unless it was already unlocked. Unlocks are sticky:
/// a previously unlocked achievement stays unlocked even if its condition no
/// longer holds (e.g. after a force unlock).
pub fn reevaluate(
    stats: &GameStats,
    achievements: &[AchievementState],
    now: DateTime<Utc>,
) -> Vec<AchievementState> {
    ACHIEVEMENTS
        .iter()
        .map(|achievement| {
            let prior_unlock = achievements
                .iter()
                .find(|s| s.id() == achievement.id)
                .and_then(|s| s.unlocked_at);

            let unlocked_at = match prior_unlock {
                Some(at) => Some(at),
                None if achievement.condition(stats) => Some(now),
                None => None,
            };

            AchievementState {
                achievement,
                progress: achievement.progress(stats),
                unlocked_at,
            }
        })
        .collect()
}

/// Ids that are unlocked in `after` but were not unlocked in `before`,
/// in the order they appear in `after`.
pub fn detect_new_unlocks(
    before: &[AchievementState],
    after: &[AchievementState],
) -> Vec<AchievementId> {
    after
        .iter()
        .filter(|state| state.is_unlocked())
        .filter(|state| {
            !before
                .iter()
                .any(|prev| prev.id() == state.id() && prev.is_unlocked())
        })
        .map(AchievementState::id)
        .collect()
}
