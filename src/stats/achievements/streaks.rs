//! Streak tracking system
//!
//! Tracks consecutive calendar days with at least one finished quiz.

use chrono::{Local, NaiveDate};

/// Streak value after playing on `today`.
///
/// Playing again on the same day keeps the streak (at least 1), playing the
/// day after the last quiz extends it, and any gap restarts it at 1.
pub fn next_streak(last_quiz_date: Option<NaiveDate>, current: u32, today: NaiveDate) -> u32 {
    let Some(last) = last_quiz_date else {
        return 1;
    };

    match (today - last).num_days() {
        0 => current.max(1),
        1 => current.saturating_add(1),
        // Clock went backwards; don't punish the player for it
        d if d < 0 => current.max(1),
        _ => 1,
    }
}

/// Check if the streak is still alive (activity today or yesterday)
pub fn is_active(last_quiz_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    let Some(last) = last_quiz_date else {
        return false;
    };
    let days_since = (today - last).num_days();
    (0..=1).contains(&days_since)
}

/// Today's local calendar date
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}
