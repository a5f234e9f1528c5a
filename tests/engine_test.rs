//! End-to-end tests for the achievement engine on a real SQLite store

mod common;

use chrono::Duration;

use common::{date, quiz, TestDb};
use quizquest::stats::achievements::{
    detect_new_unlocks, reevaluate, Achievement, AchievementId, AchievementState,
    GamificationEvent, LevelCalculator,
};
use quizquest::stats::{
    delta_for, AchievementManager, GameStats, MemoryStore, ProgressStore, SqliteStore,
    StatsDelta, ACHIEVEMENTS_KEY, STATS_KEY,
};

#[test]
fn first_quiz_unlocks_first_quiz_achievement() {
    let db = TestDb::new();
    let manager = db.manager();

    let outcome = manager.apply_delta(&StatsDelta {
        total_quizzes: Some(1),
        ..Default::default()
    });

    assert!(outcome.stats.has_achievement("first-quiz"));
    assert_eq!(manager.achievement_progress("first-quiz"), Some(1));
    let unlocked = manager.unlocked_achievements();
    assert_eq!(unlocked.len(), 1);
    assert_eq!(unlocked[0].id(), AchievementId::FirstQuiz);
    assert!(unlocked[0].is_unlocked());
}

#[test]
fn perfect_score_reward_is_not_granted_twice() {
    let db = TestDb::new();
    let manager = db.manager();

    let first = manager.apply_delta(&StatsDelta {
        perfect_scores: Some(1),
        ..Default::default()
    });
    let rewards: u64 = first
        .events
        .iter()
        .filter_map(|e| match e {
            GamificationEvent::XpAwarded { amount, .. } => Some(*amount),
            _ => None,
        })
        .sum();
    assert_eq!(rewards, 250);

    let second = manager.apply_delta(&StatsDelta {
        perfect_scores: Some(2),
        ..Default::default()
    });
    assert_eq!(second.stats.total_xp, 250);
    assert_eq!(second.unlocked().count(), 0);
}

#[test]
fn progress_survives_restart() {
    let db = TestDb::new();
    let before = {
        let manager = db.manager();
        manager.apply_delta(&StatsDelta {
            total_quizzes: Some(4),
            streak_days: Some(3),
            fastest_quiz_time: Some(55),
            ..Default::default()
        });
        let snapshot = (manager.stats(), manager.achievements());
        manager.teardown().unwrap();
        snapshot
    };

    let manager = db.manager();
    assert_eq!(manager.stats(), before.0);
    for (restored, saved) in manager.achievements().iter().zip(&before.1) {
        assert_eq!(restored.id(), saved.id());
        assert_eq!(restored.progress, saved.progress);
        assert_eq!(restored.is_unlocked(), saved.is_unlocked());
        assert_eq!(restored.unlocked_at, saved.unlocked_at);
    }
}

#[test]
fn restored_achievements_behave_like_the_catalog() {
    let store = MemoryStore::new();
    let mut states = AchievementState::catalog_defaults();
    let stats = GameStats {
        total_quizzes: 3,
        ..GameStats::default()
    };
    states = reevaluate(&stats, &states, chrono::Utc::now());
    store
        .save(&stats, &quizquest::stats::achievements::to_records(&states))
        .unwrap();

    let loaded = store.load();
    let restored = AchievementState::restore(&loaded.achievements.unwrap());
    let more = GameStats {
        total_quizzes: 10,
        ..stats
    };
    for state in &restored {
        let def = state.achievement;
        assert_eq!(def.progress(&more), def.id.definition().progress(&more));
        assert_eq!(def.condition(&more), def.id.definition().condition(&more));
    }
}

#[test]
fn malformed_storage_falls_back_to_defaults() {
    let store = MemoryStore::new();
    store.insert_raw(STATS_KEY, "definitely not json");
    store.insert_raw(ACHIEVEMENTS_KEY, "[1, 2, 3]");

    let manager = AchievementManager::init(Box::new(store), LevelCalculator::default(), "kid");
    let stats = manager.stats();
    assert_eq!(stats.total_quizzes, 0);
    assert_eq!(stats.user_id, "kid");
    assert_eq!(manager.locked_achievements().len(), Achievement::total_count());
}

#[test]
fn reevaluating_without_changes_grants_nothing() {
    let stats = GameStats {
        total_quizzes: 60,
        perfect_scores: 3,
        streak_days: 8,
        ..GameStats::default()
    };
    let once = reevaluate(&stats, &AchievementState::catalog_defaults(), chrono::Utc::now());
    let twice = reevaluate(&stats, &once, chrono::Utc::now());
    assert!(detect_new_unlocks(&once, &twice).is_empty());
    assert!(detect_new_unlocks(&twice, &twice).is_empty());
}

#[test]
fn level_boundaries_follow_xp_per_level() {
    let db = TestDb::new();
    let manager = db.manager_with(LevelCalculator::new(500).unwrap());

    let zero = manager.level_progress();
    assert_eq!(zero.current_level, 1);
    assert_eq!(zero.current_xp, 0);
    assert_eq!(zero.progress_percentage, 0.0);

    manager.apply_delta(&StatsDelta {
        total_xp: Some(500),
        ..Default::default()
    });
    let rolled = manager.level_progress();
    assert_eq!(rolled.current_xp, 0);
    assert_eq!(rolled.current_level, 2);
    assert_eq!(manager.stats().current_level, 2);
}

#[test]
fn reset_returns_to_defaults() {
    let db = TestDb::new();
    let manager = db.manager();
    manager.apply_delta(&StatsDelta {
        total_quizzes: Some(55),
        perfect_scores: Some(2),
        demo_quizzes: Some(1),
        ..Default::default()
    });
    manager.force_unlock("polymath");

    manager.reset_stats();
    assert!(manager.achievements().iter().all(|s| !s.is_unlocked() && s.progress == 0));
    manager.teardown().unwrap();

    let manager = db.manager();
    let stats = manager.stats();
    assert_eq!(stats.total_quizzes, 0);
    assert_eq!(stats.total_xp, 0);
    assert_eq!(stats.total_score, 0);
    assert!(stats.achievements.is_empty());
    assert!(manager.achievements().iter().all(|s| !s.is_unlocked() && s.progress == 0));
}

#[test]
fn a_week_of_quizzes() {
    let db = TestDb::new();
    let manager = db.manager();
    let start = date(2026, 10, 12);

    for day in 0..7 {
        let on = start + Duration::days(day);
        let outcome = quiz("math", 8, 2, 120, on);
        manager.apply_delta(&delta_for(&manager.stats(), &outcome));
    }

    let stats = manager.stats();
    assert_eq!(stats.total_quizzes, 7);
    assert_eq!(stats.streak_days, 7);
    assert_eq!(stats.total_correct_answers, 56);
    assert!(stats.has_achievement("first-quiz"));
    assert!(stats.has_achievement("streak-3"));
    assert!(stats.has_achievement("streak-7"));
    assert!(!stats.has_achievement("perfect-score"));
    assert_eq!(manager.achievement_progress("quiz-enthusiast"), Some(7));

    // Achievement ids and unlocked states agree
    let unlocked: Vec<_> = manager
        .unlocked_achievements()
        .iter()
        .map(|s| s.id().as_str().to_string())
        .collect();
    let mut recorded = stats.achievements.clone();
    recorded.sort();
    let mut expected = unlocked;
    expected.sort();
    assert_eq!(recorded, expected);
}

#[test]
fn perfect_fast_quiz_unlocks_across_categories() {
    let db = TestDb::new();
    let manager = db.manager();
    let outcome = quiz("history", 10, 0, 25, date(2026, 10, 19));

    let result = manager.apply_delta(&delta_for(&manager.stats(), &outcome));
    let ids: Vec<_> = result.unlocked().map(|u| u.achievement.id).collect();
    assert_eq!(
        ids,
        vec![
            AchievementId::FirstQuiz,
            AchievementId::PerfectScore,
            AchievementId::SubjectMaster,
            AchievementId::SpeedDemon,
            AchievementId::LightningFast,
        ]
    );
    assert!(result.stats.subjects_mastered.contains("history"));
}

#[test]
fn rising_star_tracks_levels_gained() {
    let store = SqliteStore::open_in_memory().unwrap();
    let manager = AchievementManager::init(
        Box::new(store.clone()),
        LevelCalculator::new(100).unwrap(),
        "student-1",
    );
    assert_eq!(manager.achievement_progress("rising-star"), Some(0));

    let outcome = manager.apply_delta(&StatsDelta {
        total_xp: Some(350),
        ..Default::default()
    });
    assert_eq!(outcome.stats.current_level, 4);
    assert_eq!(manager.achievement_progress("rising-star"), Some(3));
    assert_eq!(outcome.unlocked().count(), 0);

    let outcome = manager.apply_delta(&StatsDelta {
        total_xp: Some(400),
        ..Default::default()
    });
    let ids: Vec<_> = outcome.unlocked().map(|u| u.achievement.id).collect();
    assert_eq!(ids, vec![AchievementId::RisingStar]);

    manager.reset_stats();
    assert_eq!(manager.achievement_progress("rising-star"), Some(0));
    manager.teardown().unwrap();

    let reopened =
        AchievementManager::init(Box::new(store), LevelCalculator::new(100).unwrap(), "student-1");
    assert_eq!(reopened.achievement_progress("rising-star"), Some(0));
    assert!(reopened.unlocked_achievements().is_empty());
}
