//! Unlock command implementation

use anyhow::{bail, Result};

use quizquest::stats::open_manager;
use quizquest::Config;

/// Force-unlock an achievement, skipping its condition
pub fn unlock_command(config: &Config, id: &str) -> Result<()> {
    let manager = open_manager(config)?;
    let Some(result) = manager.force_unlock(id) else {
        bail!("Unknown achievement: {}", id);
    };

    if result.events.is_empty() {
        println!("Achievement {} is already unlocked.", id);
    } else {
        super::print_events(&result.events);
    }

    manager.teardown()
}
