use std::{fs, path::PathBuf};

use anyhow::{Context, Result, bail};
use stepwise_config::{CONFIG_FILE_NAME, StepwiseConfig};

pub fn cmd_init() -> Result<()> {
    let path = PathBuf::from(CONFIG_FILE_NAME);
    if path.exists() {
        bail!("{CONFIG_FILE_NAME} already exists");
    }

    let config = StepwiseConfig::default();
    let mut json = serde_json::to_string_pretty(&config).context("serialize default config")?;
    json.push('\n');
    fs::write(&path, json).with_context(|| format!("write {CONFIG_FILE_NAME}"))?;
    println!("created {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::testing::CwdGuard;
    use stepwise_loader::load_config;
    use tempfile::tempdir;

    #[test]
    #[serial_test::serial]
    fn cmd_init_creates_loadable_config() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());

        cmd_init().unwrap();
        assert!(PathBuf::from(CONFIG_FILE_NAME).exists());
        assert_eq!(load_config().unwrap(), StepwiseConfig::default());
    }

    #[test]
    #[serial_test::serial]
    fn cmd_init_fails_when_exists() {
        let tmp = tempdir().unwrap();
        let _guard = CwdGuard::new(tmp.path());

        cmd_init().unwrap();
        let err = cmd_init().unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }
}
