//! Reset command implementation

use anyhow::{bail, Result};

use quizquest::stats::open_manager;
use quizquest::Config;

/// Wipe all progress and achievements
pub fn reset_command(config: &Config, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("This deletes all progress. Re-run with --yes to confirm.");
    }

    let manager = open_manager(config)?;
    manager.reset_stats();
    println!("Progress reset.");

    manager.teardown()
}
