//! Achievement definitions and metadata
//!
//! All achievements are defined here with their unlock rules and rewards.
//! Definitions are plain data; the unlock condition and progress function are
//! derived from each entry's [`Metric`], so nothing but ids and numbers ever
//! needs to be persisted.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use serde::Serialize;

use crate::stats::models::GameStats;

/// Unique identifier for each achievement.
///
/// Variant order matches catalog order in [`ACHIEVEMENTS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AchievementId {
    // Quiz achievements
    FirstQuiz,
    QuizEnthusiast,
    QuizMaster,
    QuizLegend,
    PerfectScore,
    Perfectionist,

    // Demo achievements
    DemoExplorer,
    DemoVeteran,
    DemoPerfect,

    // Streak achievements
    Streak3,
    Streak7,
    Streak30,

    // Mastery achievements
    SubjectMaster,
    Polymath,
    KnowledgeSeeker,
    RisingStar,

    // Speed achievements
    SpeedDemon,
    LightningFast,
}

static BY_KEY: Lazy<HashMap<&'static str, AchievementId>> = Lazy::new(|| {
    AchievementId::all()
        .iter()
        .map(|id| (id.as_str(), *id))
        .collect()
});

impl AchievementId {
    /// Stable string id used in storage and in `GameStats::achievements`
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FirstQuiz => "first-quiz",
            Self::QuizEnthusiast => "quiz-enthusiast",
            Self::QuizMaster => "quiz-master",
            Self::QuizLegend => "quiz-legend",
            Self::PerfectScore => "perfect-score",
            Self::Perfectionist => "perfectionist",
            Self::DemoExplorer => "demo-explorer",
            Self::DemoVeteran => "demo-veteran",
            Self::DemoPerfect => "demo-perfect",
            Self::Streak3 => "streak-3",
            Self::Streak7 => "streak-7",
            Self::Streak30 => "streak-30",
            Self::SubjectMaster => "subject-master",
            Self::Polymath => "polymath",
            Self::KnowledgeSeeker => "knowledge-seeker",
            Self::RisingStar => "rising-star",
            Self::SpeedDemon => "speed-demon",
            Self::LightningFast => "lightning-fast",
        }
    }

    /// Parse from storage string
    pub fn from_str(s: &str) -> Option<Self> {
        BY_KEY.get(s).copied()
    }

    /// Get all achievement IDs in catalog order
    pub fn all() -> &'static [AchievementId] {
        &[
            Self::FirstQuiz,
            Self::QuizEnthusiast,
            Self::QuizMaster,
            Self::QuizLegend,
            Self::PerfectScore,
            Self::Perfectionist,
            Self::DemoExplorer,
            Self::DemoVeteran,
            Self::DemoPerfect,
            Self::Streak3,
            Self::Streak7,
            Self::Streak30,
            Self::SubjectMaster,
            Self::Polymath,
            Self::KnowledgeSeeker,
            Self::RisingStar,
            Self::SpeedDemon,
            Self::LightningFast,
        ]
    }

    /// Catalog definition for this id
    pub fn definition(&self) -> &'static Achievement {
        &ACHIEVEMENTS[*self as usize]
    }
}

impl std::fmt::Display for AchievementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Achievement category for grouping in UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Quiz,
    Demo,
    Streak,
    Mastery,
    Speed,
}

impl AchievementCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Quiz => "Quizzes",
            Self::Demo => "Demo",
            Self::Streak => "Streaks",
            Self::Mastery => "Mastery",
            Self::Speed => "Speed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "quiz" => Some(Self::Quiz),
            "demo" => Some(Self::Demo),
            "streak" => Some(Self::Streak),
            "mastery" => Some(Self::Mastery),
            "speed" => Some(Self::Speed),
            _ => None,
        }
    }
}

/// Reward tier, ordered from most to least common
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Rare => "Rare",
            Self::Epic => "Epic",
            Self::Legendary => "Legendary",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "common" => Some(Self::Common),
            "rare" => Some(Self::Rare),
            "epic" => Some(Self::Epic),
            "legendary" => Some(Self::Legendary),
            _ => None,
        }
    }
}

/// The stat an achievement measures.
///
/// Every metric is monotonic: mutations that only move stats "further along"
/// never lower it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    TotalQuizzes,
    CorrectAnswers,
    PerfectScores,
    DemoQuizzes,
    DemoPerfectScores,
    StreakDays,
    SubjectsMastered,
    /// Levels gained above the starting level 1
    LevelsGained,
    /// 1 once a quiz was finished within the given number of seconds, else 0
    QuizWithin(u32),
}

impl Metric {
    pub fn measure(&self, stats: &GameStats) -> u32 {
        match self {
            Self::TotalQuizzes => stats.total_quizzes,
            Self::CorrectAnswers => stats.total_correct_answers,
            Self::PerfectScores => stats.perfect_scores,
            Self::DemoQuizzes => stats.demo_quizzes,
            Self::DemoPerfectScores => stats.demo_perfect_scores,
            Self::StreakDays => stats.streak_days,
            Self::SubjectsMastered => {
                u32::try_from(stats.subjects_mastered.len()).unwrap_or(u32::MAX)
            }
            Self::LevelsGained => stats.current_level.saturating_sub(1),
            Self::QuizWithin(limit) => {
                u32::from(stats.fastest_quiz_time > 0 && stats.fastest_quiz_time <= *limit)
            }
        }
    }
}

/// Achievement definition with all metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub category: AchievementCategory,
    pub rarity: Rarity,
    pub xp_reward: u32,
    pub points_reward: u32,
    /// Threshold the metric has to reach
    pub max_progress: u32,
    pub metric: Metric,
}

impl Achievement {
    /// Unlock condition
    pub fn condition(&self, stats: &GameStats) -> bool {
        self.metric.measure(stats) >= self.max_progress
    }

    /// Current progress, clamped to `max_progress`
    pub fn progress(&self, stats: &GameStats) -> u32 {
        self.metric.measure(stats).min(self.max_progress)
    }

    /// Get achievement definition by string ID
    pub fn find(id: &str) -> Option<&'static Achievement> {
        AchievementId::from_str(id).map(|id| id.definition())
    }

    /// Get total number of achievements
    pub fn total_count() -> usize {
        ACHIEVEMENTS.len()
    }

    /// Get total possible XP from all achievements
    pub fn total_xp() -> u64 {
        ACHIEVEMENTS.iter().map(|a| u64::from(a.xp_reward)).sum()
    }

    pub fn by_category(
        category: AchievementCategory,
    ) -> impl Iterator<Item = &'static Achievement> {
        ACHIEVEMENTS.iter().filter(move |a| a.category == category)
    }

    pub fn by_rarity(rarity: Rarity) -> impl Iterator<Item = &'static Achievement> {
        ACHIEVEMENTS.iter().filter(move |a| a.rarity == rarity)
    }
}

/// All achievement definitions
pub static ACHIEVEMENTS: &[Achievement] = &[
    // === QUIZ ===
    Achievement {
        id: AchievementId::FirstQuiz,
        name: "First Steps",
        description: "Complete your first quiz",
        icon: "🎯",
        category: AchievementCategory::Quiz,
        rarity: Rarity::Common,
        xp_reward: 50,
        points_reward: 10,
        max_progress: 1,
        metric: Metric::TotalQuizzes,
    },
    Achievement {
        id: AchievementId::QuizEnthusiast,
        name: "Quiz Enthusiast",
        description: "Complete 10 quizzes",
        icon: "📚",
        category: AchievementCategory::Quiz,
        rarity: Rarity::Common,
        xp_reward: 100,
        points_reward: 25,
        max_progress: 10,
        metric: Metric::TotalQuizzes,
    },
    Achievement {
        id: AchievementId::QuizMaster,
        name: "Quiz Master",
        description: "Complete 50 quizzes",
        icon: "🎓",
        category: AchievementCategory::Quiz,
        rarity: Rarity::Rare,
        xp_reward: 300,
        points_reward: 75,
        max_progress: 50,
        metric: Metric::TotalQuizzes,
    },
    Achievement {
        id: AchievementId::QuizLegend,
        name: "Quiz Legend",
        description: "Complete 100 quizzes",
        icon: "🏆",
        category: AchievementCategory::Quiz,
        rarity: Rarity::Epic,
        xp_reward: 750,
        points_reward: 200,
        max_progress: 100,
        metric: Metric::TotalQuizzes,
    },
    Achievement {
        id: AchievementId::PerfectScore,
        name: "Perfect Score",
        description: "Answer every question of a quiz correctly",
        icon: "💯",
        category: AchievementCategory::Quiz,
        rarity: Rarity::Rare,
        xp_reward: 250,
        points_reward: 50,
        max_progress: 1,
        metric: Metric::PerfectScores,
    },
    Achievement {
        id: AchievementId::Perfectionist,
        name: "Perfectionist",
        description: "Get 10 perfect scores",
        icon: "💎",
        category: AchievementCategory::Quiz,
        rarity: Rarity::Epic,
        xp_reward: 1000,
        points_reward: 250,
        max_progress: 10,
        metric: Metric::PerfectScores,
    },
    // === DEMO ===
    Achievement {
        id: AchievementId::DemoExplorer,
        name: "Test Drive",
        description: "Complete a demo quiz",
        icon: "🧪",
        category: AchievementCategory::Demo,
        rarity: Rarity::Common,
        xp_reward: 25,
        points_reward: 5,
        max_progress: 1,
        metric: Metric::DemoQuizzes,
    },
    Achievement {
        id: AchievementId::DemoVeteran,
        name: "Practice Makes Perfect",
        description: "Complete 10 demo quizzes",
        icon: "🕹️",
        category: AchievementCategory::Demo,
        rarity: Rarity::Common,
        xp_reward: 75,
        points_reward: 15,
        max_progress: 10,
        metric: Metric::DemoQuizzes,
    },
    Achievement {
        id: AchievementId::DemoPerfect,
        name: "Flawless Rehearsal",
        description: "Get a perfect score in a demo quiz",
        icon: "✨",
        category: AchievementCategory::Demo,
        rarity: Rarity::Rare,
        xp_reward: 100,
        points_reward: 20,
        max_progress: 1,
        metric: Metric::DemoPerfectScores,
    },
    // === STREAK ===
    Achievement {
        id: AchievementId::Streak3,
        name: "On Fire",
        description: "Play on 3 consecutive days",
        icon: "🔥",
        category: AchievementCategory::Streak,
        rarity: Rarity::Common,
        xp_reward: 75,
        points_reward: 15,
        max_progress: 3,
        metric: Metric::StreakDays,
    },
    Achievement {
        id: AchievementId::Streak7,
        name: "Week Warrior",
        description: "Play on 7 consecutive days",
        icon: "📅",
        category: AchievementCategory::Streak,
        rarity: Rarity::Rare,
        xp_reward: 200,
        points_reward: 50,
        max_progress: 7,
        metric: Metric::StreakDays,
    },
    Achievement {
        id: AchievementId::Streak30,
        name: "Monthly Master",
        description: "Play on 30 consecutive days",
        icon: "👑",
        category: AchievementCategory::Streak,
        rarity: Rarity::Legendary,
        xp_reward: 1500,
        points_reward: 500,
        max_progress: 30,
        metric: Metric::StreakDays,
    },
    // === MASTERY ===
    Achievement {
        id: AchievementId::SubjectMaster,
        name: "Subject Master",
        description: "Master your first subject",
        icon: "🧠",
        category: AchievementCategory::Mastery,
        rarity: Rarity::Rare,
        xp_reward: 300,
        points_reward: 75,
        max_progress: 1,
        metric: Metric::SubjectsMastered,
    },
    Achievement {
        id: AchievementId::Polymath,
        name: "Polymath",
        description: "Master 5 different subjects",
        icon: "🌍",
        category: AchievementCategory::Mastery,
        rarity: Rarity::Legendary,
        xp_reward: 2000,
        points_reward: 500,
        max_progress: 5,
        metric: Metric::SubjectsMastered,
    },
    Achievement {
        id: AchievementId::KnowledgeSeeker,
        name: "Knowledge Seeker",
        description: "Answer 100 questions correctly",
        icon: "📖",
        category: AchievementCategory::Mastery,
        rarity: Rarity::Rare,
        xp_reward: 200,
        points_reward: 50,
        max_progress: 100,
        metric: Metric::CorrectAnswers,
    },
    Achievement {
        id: AchievementId::RisingStar,
        name: "Rising Star",
        description: "Reach level 5",
        icon: "⭐",
        category: AchievementCategory::Mastery,
        rarity: Rarity::Epic,
        xp_reward: 500,
        points_reward: 100,
        max_progress: 4,
        metric: Metric::LevelsGained,
    },
    // === SPEED ===
    Achievement {
        id: AchievementId::SpeedDemon,
        name: "Speed Demon",
        description: "Finish a quiz in under a minute",
        icon: "⚡",
        category: AchievementCategory::Speed,
        rarity: Rarity::Rare,
        xp_reward: 150,
        points_reward: 30,
        max_progress: 1,
        metric: Metric::QuizWithin(60),
    },
    Achievement {
        id: AchievementId::LightningFast,
        name: "Lightning Fast",
        description: "Finish a quiz in under 30 seconds",
        icon: "🌩️",
        category: AchievementCategory::Speed,
        rarity: Rarity::Epic,
        xp_reward: 400,
        points_reward: 100,
        max_progress: 1,
        metric: Metric::QuizWithin(30),
    },
];
