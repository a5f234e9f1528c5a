//! Record command implementation

use anyhow::{bail, Result};

use quizquest::stats::{delta_for, open_manager};
use quizquest::{Config, QuizOutcome};

/// Apply a finished quiz to the stored progress
pub fn record_command(config: &Config, outcome: QuizOutcome) -> Result<()> {
    if outcome.question_count() == 0 {
        bail!("A quiz needs at least one answered question");
    }

    let manager = open_manager(config)?;
    let delta = delta_for(&manager.stats(), &outcome);
    let result = manager.apply_delta(&delta);

    let mode = if outcome.demo { "Demo quiz" } else { "Quiz" };
    println!(
        "{} recorded: {} - {}/{} correct",
        mode,
        outcome.subject,
        outcome.correct,
        outcome.question_count()
    );
    super::print_events(&result.events);
    println!(
        "\n  Total XP: {}  Level: {}  Streak: {} day(s)",
        result.stats.total_xp, result.stats.current_level, result.stats.streak_days
    );

    manager.teardown()
}
