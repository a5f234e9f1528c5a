//! XP and Level system
//!
//! Two independent curves live here:
//! - [`LevelCalculator`]: flat XP-per-level, drives `GameStats::current_level`
//!   and the progress bar.
//! - [`LevellingCurve`]: exponential "required XP for level N" used by the
//!   gamification settings.

use std::num::NonZeroU32;

use serde::Serialize;

use crate::config::ConfigError;
use crate::stats::models::GameStats;

/// Progress within the current level
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LevelProgress {
    pub current_level: u32,
    /// XP earned inside the current level
    pub current_xp: u32,
    pub xp_to_next_level: u32,
    /// 0.0 - 100.0
    pub progress_percentage: f64,
}

/// Flat XP-per-level calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelCalculator {
    xp_per_level: NonZeroU32,
}

impl LevelCalculator {
    pub const DEFAULT_XP_PER_LEVEL: u32 = 1000;

    /// Zero XP per level is a configuration error
    pub fn new(xp_per_level: u32) -> Result<Self, ConfigError> {
        NonZeroU32::new(xp_per_level)
            .map(|xp_per_level| Self { xp_per_level })
            .ok_or(ConfigError::ZeroXpPerLevel)
    }

    pub fn xp_per_level(&self) -> u32 {
        self.xp_per_level.get()
    }

    /// Level for a cumulative XP total (level 1 at 0 XP)
    pub fn level_for_xp(&self, total_xp: u64) -> u32 {
        let level = total_xp / u64::from(self.xp_per_level.get()) + 1;
        u32::try_from(level).unwrap_or(u32::MAX)
    }

    /// Progress bar numbers for the given stats
    pub fn level_progress(&self, stats: &GameStats) -> LevelProgress {
        let per_level = self.xp_per_level.get();
        // Remainder is always < per_level, so it fits in u32
        let current_xp = (stats.total_xp % u64::from(per_level)) as u32;

        LevelProgress {
            current_level: self.level_for_xp(stats.total_xp),
            current_xp,
            xp_to_next_level: per_level - current_xp,
            progress_percentage: 100.0 * f64::from(current_xp) / f64::from(per_level),
        }
    }
}

impl Default for LevelCalculator {
    fn default() -> Self {
        Self {
            xp_per_level: NonZeroU32::new(Self::DEFAULT_XP_PER_LEVEL)
                .unwrap_or(NonZeroU32::MIN),
        }
    }
}

/// Exponential levelling curve: `base * multiplier^(level - 2)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevellingCurve {
    pub base_xp: u32,
    pub multiplier: f64,
}

impl LevellingCurve {
    pub fn new(base_xp: u32, multiplier: f64) -> Result<Self, ConfigError> {
        if !multiplier.is_finite() || multiplier <= 0.0 {
            return Err(ConfigError::InvalidMultiplier(multiplier));
        }
        Ok(Self { base_xp, multiplier })
    }

    /// XP required to reach `level`. Levels 0 and 1 need nothing.
    pub fn required_xp(&self, level: u32) -> u64 {
        if level <= 1 {
            return 0;
        }
        let exponent = i32::try_from(level - 2).unwrap_or(i32::MAX);
        let required = f64::from(self.base_xp) * self.multiplier.powi(exponent);
        // `as` saturates on overflow and maps NaN to 0
        required.round() as u64
    }

    /// (level, required xp) pairs for levels 1..=max_level
    pub fn table(&self, max_level: u32) -> Vec<(u32, u64)> {
        (1..=max_level).map(|l| (l, self.required_xp(l))).collect()
    }
}

impl Default for LevellingCurve {
    fn default() -> Self {
        Self {
            base_xp: 100,
            multiplier: 1.5,
        }
    }
}

/// XP rewards for quiz results
pub struct XpRewards;

impl XpRewards {
    /// XP for each correct answer
    pub const CORRECT_ANSWER: u64 = 10;

    /// Points added to the score for each correct answer
    pub const POINTS_PER_CORRECT: u64 = 10;

    /// Bonus XP for a quiz without mistakes
    pub const PERFECT_BONUS: u64 = 50;

    /// Streak day 1 = 2 XP, day 2 = 4 XP, etc. (capped at 20)
    pub fn streak_bonus(streak_days: u32) -> u64 {
        u64::from(streak_days.saturating_mul(2).min(20))
    }
}
