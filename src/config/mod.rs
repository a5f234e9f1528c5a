//! Configuration loading and management

mod io;
mod settings;

pub use settings::{LevellingSettings, Settings};

use serde::{Deserialize, Serialize};

use crate::stats::achievements::{LevelCalculator, LevellingCurve};

/// Error type for invalid configuration values
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("xp_per_level must be greater than zero")]
    ZeroXpPerLevel,

    #[error("levelling multiplier must be a positive number, got {0}")]
    InvalidMultiplier(f64),

    #[error("user_id must not be empty")]
    EmptyUserId,
}

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub settings: Settings,

    /// Exponential levelling curve
    #[serde(default)]
    pub levelling: LevellingSettings,
}

impl Config {
    /// Check every value that would otherwise blow up at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.settings.user_id.trim().is_empty() {
            return Err(ConfigError::EmptyUserId);
        }
        self.level_calculator()?;
        self.levelling_curve()?;
        Ok(())
    }

    /// Level calculator for the configured XP per level
    pub fn level_calculator(&self) -> Result<LevelCalculator, ConfigError> {
        LevelCalculator::new(self.settings.xp_per_level)
    }

    /// Levelling curve for the configured base and multiplier
    pub fn levelling_curve(&self) -> Result<LevellingCurve, ConfigError> {
        LevellingCurve::new(self.levelling.base_xp, self.levelling.multiplier)
    }
}
