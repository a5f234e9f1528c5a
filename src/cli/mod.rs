//! CLI command implementations

pub mod achievements;
pub mod curve;
pub mod init;
pub mod record;
pub mod reset;
pub mod status;
pub mod unlock;

use quizquest::stats::achievements::{AchievementState, GamificationEvent};

/// One-line rendering of an achievement state
pub(crate) fn achievement_line(state: &AchievementState) -> String {
    let a = state.achievement;
    let mark = if state.is_unlocked() { "✔" } else { " " };
    format!(
        "[{}] {} {:<24} {:<9} {:>3}/{:<3} +{} XP  {}",
        mark,
        a.icon,
        a.name,
        a.rarity.label(),
        state.progress,
        a.max_progress,
        a.xp_reward,
        a.id
    )
}

/// Print gamification events the way a toast would show them
pub(crate) fn print_events(events: &[GamificationEvent]) {
    for event in events {
        match event {
            GamificationEvent::AchievementUnlocked(u) => {
                let suffix = if u.forced { " (forced)" } else { "" };
                println!(
                    "  {} Achievement unlocked: {} [{}]{}",
                    u.achievement.icon,
                    u.achievement.name,
                    u.achievement.rarity.label(),
                    suffix
                );
            }
            GamificationEvent::XpAwarded { amount, reason } => {
                println!("  +{} XP ({})", amount, reason);
            }
            GamificationEvent::LevelUp(l) => {
                println!("  Level up! {} -> {}", l.old_level, l.new_level);
            }
        }
    }
}
