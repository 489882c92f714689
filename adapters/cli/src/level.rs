//! Level file loading and command-line overrides.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use generator_defence_session::LevelConfig;

/// Reads a TOML level file, falling back to the built-in level when no path
/// is provided.
pub(crate) fn load_level(path: Option<&Path>) -> Result<LevelConfig> {
    let Some(path) = path else {
        log::info!("no level file provided; using the built-in level");
        return Ok(LevelConfig::default());
    };

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read level file {}", path.display()))?;
    parse_level(&contents).with_context(|| format!("invalid level file {}", path.display()))
}

fn parse_level(contents: &str) -> Result<LevelConfig> {
    let level = toml::from_str(contents).context("failed to parse level TOML")?;
    Ok(level)
}

/// Replaces the configured cycle count when requested on the command line.
pub(crate) fn apply_cycle_override(level: &mut LevelConfig, cycles: Option<u32>) {
    if let Some(cycles) = cycles {
        level.cycles = level.cycles.with_total_cycles(cycles);
    }
}
