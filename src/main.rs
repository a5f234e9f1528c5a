use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use quizquest::Config;

mod cli;

#[derive(Parser)]
#[command(name = "quizquest")]
#[command(about = "QuizQuest - achievements, XP and levels for the school quiz game")]
#[command(version)]
struct Cli {
    /// Path to the config file (defaults to ~/.quizquest/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the progress database (overrides the config file)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show level, XP and quiz totals
    Status,

    /// Record a finished quiz
    Record {
        /// Subject the quiz belonged to (e.g. "math")
        #[arg(long)]
        subject: String,

        /// Number of correct answers
        #[arg(long)]
        correct: u32,

        /// Number of wrong answers
        #[arg(long, default_value_t = 0)]
        wrong: u32,

        /// Time taken in seconds
        #[arg(long, default_value_t = 0)]
        seconds: u32,

        /// Quiz was played in demo mode
        #[arg(long)]
        demo: bool,
    },

    /// List achievements
    Achievements {
        /// Only this category (quiz, demo, streak, mastery, speed)
        #[arg(long)]
        category: Option<String>,

        /// Only this rarity (common, rare, epic, legendary)
        #[arg(long)]
        rarity: Option<String>,

        /// Only unlocked achievements
        #[arg(long, conflicts_with = "locked")]
        unlocked: bool,

        /// Only locked achievements
        #[arg(long)]
        locked: bool,
    },

    /// Unlock an achievement without checking its condition (admin/testing)
    Unlock {
        /// Achievement id (e.g. "perfect-score")
        id: String,
    },

    /// Reset all progress
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },

    /// Print the XP required per level on the levelling curve
    Curve {
        /// Highest level to print
        #[arg(long, default_value_t = 10)]
        levels: u32,
    },

    /// Write a default config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.unwrap_or_else(Config::global_config_path);
    let database = cli.database;
    let load_config = || -> Result<Config> {
        let mut config = Config::load_or_init(&config_path)?;
        if let Some(database) = &database {
            config.settings.database = Some(database.clone());
        }
        Ok(config)
    };

    match cli.command.unwrap_or(Commands::Status) {
        Commands::Init { force } => cli::init::init_command(&config_path, force)?,
        Commands::Status => cli::status::status_command(&load_config()?)?,
        Commands::Record {
            subject,
            correct,
            wrong,
            seconds,
            demo,
        } => {
            let outcome = quizquest::QuizOutcome {
                subject,
                correct,
                wrong,
                duration_secs: seconds,
                demo,
                finished_on: quizquest::stats::achievements::streaks::today(),
            };
            cli::record::record_command(&load_config()?, outcome)?;
        }
        Commands::Achievements {
            category,
            rarity,
            unlocked,
            locked,
        } => {
            let filter = cli::achievements::AchievementFilter {
                category,
                rarity,
                unlocked,
                locked,
            };
            cli::achievements::achievements_command(&load_config()?, &filter)?;
        }
        Commands::Unlock { id } => cli::unlock::unlock_command(&load_config()?, &id)?,
        Commands::Reset { yes } => cli::reset::reset_command(&load_config()?, yes)?,
        Commands::Curve { levels } => cli::curve::curve_command(&load_config()?, levels)?,
    }

    Ok(())
}
