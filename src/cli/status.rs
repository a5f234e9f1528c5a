//! Status command implementation

use anyhow::Result;

use quizquest::stats::achievements::Achievement;
use quizquest::stats::open_manager;
use quizquest::Config;

/// Show level, XP and quiz totals
pub fn status_command(config: &Config) -> Result<()> {
    let manager = open_manager(config)?;
    let stats = manager.stats();
    let level = manager.level_progress();

    println!("Player: {}\n", stats.user_id);
    println!(
        "  Level {}  [{}/{} XP, {:.0}%]  {} XP to next level",
        level.current_level,
        level.current_xp,
        level.current_xp + level.xp_to_next_level,
        level.progress_percentage,
        level.xp_to_next_level
    );
    println!("  Total XP:      {}", stats.total_xp);
    println!("  Score:         {}", stats.total_score);
    println!(
        "  Quizzes:       {} ({} perfect, {:.1}% accuracy)",
        stats.total_quizzes,
        stats.perfect_scores,
        stats.accuracy()
    );
    println!(
        "  Demo quizzes:  {} ({} perfect)",
        stats.demo_quizzes, stats.demo_perfect_scores
    );
    println!("  Streak:        {} day(s)", stats.streak_days);
    if stats.fastest_quiz_time > 0 {
        println!("  Fastest quiz:  {}s", stats.fastest_quiz_time);
    }
    if !stats.subjects_mastered.is_empty() {
        let subjects: Vec<_> = stats.subjects_mastered.iter().map(String::as_str).collect();
        println!("  Mastered:      {}", subjects.join(", "));
    }
    if let Some(last) = stats.last_quiz_date {
        println!("  Last quiz:     {}", last);
    }

    if !stats.weekly.period.is_empty() {
        println!(
            "\n  This week ({}): {} quizzes, {} XP",
            stats.weekly.period, stats.weekly.quizzes, stats.weekly.xp
        );
    }

    println!(
        "\n  Achievements:  {}/{} ({} XP from achievements)",
        manager.unlocked_achievements().len(),
        Achievement::total_count(),
        manager.total_achievement_xp()
    );

    manager.teardown()
}
