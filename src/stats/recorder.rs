//! Quiz recorder - turns a finished quiz into a stats delta
//!
//! The achievement manager only merges deltas; this is where a
//! quiz-completion handler gets the new absolute values from.

use chrono::NaiveDate;

use super::achievements::streaks::next_streak;
use super::achievements::XpRewards;
use super::models::{GameStats, PeriodStats, StatsDelta};
use super::time_bucket::{month_bucket, week_bucket, year_bucket};

/// Result of one finished quiz
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizOutcome {
    pub subject: String,
    pub correct: u32,
    pub wrong: u32,
    pub duration_secs: u32,
    /// Lower-stakes demo mode: only demo counters and streak move
    pub demo: bool,
    pub finished_on: NaiveDate,
}

impl QuizOutcome {
    pub fn question_count(&self) -> u64 {
        u64::from(self.correct) + u64::from(self.wrong)
    }

    /// All questions answered correctly (empty quizzes don't count)
    pub fn is_perfect(&self) -> bool {
        self.correct > 0 && self.wrong == 0
    }

    /// Points added to the score
    pub fn points(&self) -> u64 {
        u64::from(self.correct) * XpRewards::POINTS_PER_CORRECT
    }

    /// XP earned, before any achievement rewards
    pub fn xp(&self, streak_days: u32) -> u64 {
        let mut xp = u64::from(self.correct) * XpRewards::CORRECT_ANSWER;
        if self.is_perfect() {
            xp += XpRewards::PERFECT_BONUS;
        }
        xp + XpRewards::streak_bonus(streak_days)
    }
}

/// Build the delta for `outcome` on top of `current`
pub fn delta_for(current: &GameStats, outcome: &QuizOutcome) -> StatsDelta {
    let streak = next_streak(current.last_quiz_date, current.streak_days, outcome.finished_on);

    let mut delta = StatsDelta {
        streak_days: Some(streak),
        last_quiz_date: Some(outcome.finished_on),
        ..Default::default()
    };

    if outcome.demo {
        delta.demo_quizzes = Some(current.demo_quizzes.saturating_add(1));
        if outcome.is_perfect() {
            delta.demo_perfect_scores = Some(current.demo_perfect_scores.saturating_add(1));
        }
        return delta;
    }

    let xp = outcome.xp(streak);
    let points = outcome.points();

    delta.total_quizzes = Some(current.total_quizzes.saturating_add(1));
    delta.total_correct_answers =
        Some(current.total_correct_answers.saturating_add(outcome.correct));
    delta.total_wrong_answers = Some(current.total_wrong_answers.saturating_add(outcome.wrong));
    delta.total_score = Some(current.total_score.saturating_add(points));
    delta.total_xp = Some(current.total_xp.saturating_add(xp));

    if outcome.is_perfect() {
        delta.perfect_scores = Some(current.perfect_scores.saturating_add(1));
        if !current.subjects_mastered.contains(&outcome.subject) {
            let mut mastered = current.subjects_mastered.clone();
            mastered.insert(outcome.subject.clone());
            delta.subjects_mastered = Some(mastered);
        }
    }

    if outcome.duration_secs > 0
        && (current.fastest_quiz_time == 0 || outcome.duration_secs < current.fastest_quiz_time)
    {
        delta.fastest_quiz_time = Some(outcome.duration_secs);
    }

    let day = outcome.finished_on;
    delta.weekly = Some(roll(&current.weekly, week_bucket(day), outcome, points, xp));
    delta.monthly = Some(roll(&current.monthly, month_bucket(day), outcome, points, xp));
    delta.yearly = Some(roll(&current.yearly, year_bucket(day), outcome, points, xp));

    delta
}

/// Add the outcome to a rollup, restarting it when the period changed
fn roll(
    current: &PeriodStats,
    bucket: String,
    outcome: &QuizOutcome,
    points: u64,
    xp: u64,
) -> PeriodStats {
    let mut period = if current.period == bucket {
        current.clone()
    } else {
        PeriodStats::starting(bucket)
    };
    period.quizzes = period.quizzes.saturating_add(1);
    period.correct_answers = period.correct_answers.saturating_add(outcome.correct);
    period.wrong_answers = period.wrong_answers.saturating_add(outcome.wrong);
    period.score = period.score.saturating_add(points);
    period.xp = period.xp.saturating_add(xp);
    period
}
