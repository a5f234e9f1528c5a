//! Settings configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::stats::achievements::LevelCalculator;
use crate::stats::DEFAULT_USER_ID;

/// General settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Owner recorded in new stats
    #[serde(default = "default_user_id")]
    pub user_id: String,

    /// XP needed per level for the progress bar (must be > 0)
    #[serde(default = "default_xp_per_level")]
    pub xp_per_level: u32,

    /// Progress database location (defaults to ~/.quizquest/progress.db)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            user_id: default_user_id(),
            xp_per_level: default_xp_per_level(),
            database: None,
        }
    }
}

fn default_user_id() -> String {
    DEFAULT_USER_ID.to_string()
}

fn default_xp_per_level() -> u32 {
    LevelCalculator::DEFAULT_XP_PER_LEVEL
}

/// Exponential levelling curve: level N needs `base_xp * multiplier^(N-2)`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevellingSettings {
    #[serde(default = "default_base_xp")]
    pub base_xp: u32,

    #[serde(default = "default_multiplier")]
    pub multiplier: f64,
}

impl Default for LevellingSettings {
    fn default() -> Self {
        Self {
            base_xp: default_base_xp(),
            multiplier: default_multiplier(),
        }
    }
}

fn default_base_xp() -> u32 {
    100
}

fn default_multiplier() -> f64 {
    1.5
}
