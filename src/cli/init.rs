//! Init command implementation

use anyhow::{bail, Result};
use std::path::Path;
use tracing::info;

use quizquest::Config;

/// Write a default config file
pub fn init_command(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    Config::default().save_to_file(config_path)?;
    info!("Wrote default config to {}", config_path.display());
    println!("Created {}", config_path.display());

    Ok(())
}
