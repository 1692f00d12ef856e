//! Configuration display and initialization

use crate::config::CliConfig;
use crate::utils::print_success;
use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};

pub fn config_command(config: &CliConfig, config_path: Option<&Path>, init: bool) -> Result<()> {
    if init {
        let target = init_config(config, config_path)?;
        print_success(&format!("Wrote {}", target.display()));
    } else {
        let content = toml::to_string_pretty(config).context("Failed to serialize config")?;
        print!("{}", content);
    }
    Ok(())
}

/// Write `config` to the config file, refusing to replace an existing one
pub fn init_config(config: &CliConfig, config_path: Option<&Path>) -> Result<PathBuf> {
    let target = CliConfig::resolve_path(config_path)?;
    if target.exists() {
        bail!("Config file already exists: {}", target.display());
    }
    config.save(Some(&target))?;
    Ok(target)
}
