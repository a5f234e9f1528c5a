//! Achievements command implementation

use anyhow::{bail, Result};

use quizquest::stats::achievements::{AchievementCategory, Rarity};
use quizquest::stats::open_manager;
use quizquest::Config;

/// Filters from the command line
#[derive(Debug, Default)]
pub struct AchievementFilter {
    pub category: Option<String>,
    pub rarity: Option<String>,
    pub unlocked: bool,
    pub locked: bool,
}

/// List achievements with their progress
pub fn achievements_command(config: &Config, filter: &AchievementFilter) -> Result<()> {
    let category = match &filter.category {
        Some(c) => match AchievementCategory::from_str(c) {
            Some(category) => Some(category),
            None => bail!("Unknown category: {}", c),
        },
        None => None,
    };
    let rarity = match &filter.rarity {
        Some(r) => match Rarity::from_str(r) {
            Some(rarity) => Some(rarity),
            None => bail!("Unknown rarity: {}", r),
        },
        None => None,
    };

    let manager = open_manager(config)?;
    let states = if filter.unlocked {
        manager.unlocked_achievements()
    } else if filter.locked {
        manager.locked_achievements()
    } else {
        manager.achievements()
    };

    let shown: Vec<_> = states
        .into_iter()
        .filter(|s| category.is_none_or(|c| s.achievement.category == c))
        .filter(|s| rarity.is_none_or(|r| s.achievement.rarity == r))
        .collect();

    if shown.is_empty() {
        println!("No achievements found.");
        return Ok(());
    }

    let mut current_category = None;
    for state in &shown {
        let c = state.achievement.category;
        if current_category != Some(c) {
            println!("\n{}:", c.label());
            current_category = Some(c);
        }
        println!("  {}", super::achievement_line(state));
    }

    Ok(())
}
