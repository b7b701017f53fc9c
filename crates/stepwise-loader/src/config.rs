use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stepwise_config::{CONFIG_FILE_NAME, StepwiseConfig};

/// Load stepwise.json from the current directory.
pub fn load_config() -> Result<StepwiseConfig> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if !path.exists() {
        anyhow::bail!("{CONFIG_FILE_NAME} not found. Run 'stepwise init' first.");
    }
    read_config(&path)
}

/// Load config from a specific path.
pub fn load_config_from_path(path: PathBuf) -> Result<StepwiseConfig> {
    if !path.exists() {
        anyhow::bail!("{CONFIG_FILE_NAME} not found at: {}", path.display());
    }
    read_config(&path)
}

/// Load config from the project root, falling back to defaults when absent.
pub fn load_config_or_default(project_root: Option<PathBuf>) -> Result<StepwiseConfig> {
    let config_path = match project_root {
        Some(root) => root.join(CONFIG_FILE_NAME),
        None => PathBuf::from(CONFIG_FILE_NAME),
    };

    if config_path.exists() {
        load_config_from_path(config_path)
    } else {
        tracing::debug!(path = %config_path.display(), "no config file, using defaults");
        Ok(StepwiseConfig::default())
    }
}

fn read_config(path: &Path) -> Result<StepwiseConfig> {
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parse {}", path.display()))
}
