//! Curve command implementation

use anyhow::Result;

use quizquest::Config;

/// Print the exponential levelling curve
pub fn curve_command(config: &Config, max_level: u32) -> Result<()> {
    let curve = config.levelling_curve()?;

    println!(
        "Levelling curve (base {} XP, x{}):\n",
        curve.base_xp, curve.multiplier
    );
    for (level, xp) in curve.table(max_level) {
        println!("  Level {:>3}: {:>10} XP", level, xp);
    }

    Ok(())
}
