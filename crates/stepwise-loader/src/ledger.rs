use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result, bail};
#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One applied migration as written to the state file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct AppliedEntry {
    pub name: String,
    pub version: u32,
    /// RFC 3339 timestamp of when the `up` commands finished.
    pub applied_at: String,
}

/// Applied-migrations record kept in `stepwise.state.json`, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default)]
    pub applied: Vec<AppliedEntry>,
}

impl Ledger {
    /// Read the ledger at `path`. A missing file is an empty ledger.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("read state file: {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("parse state file: {}", path.display()))
    }

    /// Write the ledger to `path` through a temporary sibling file.
    ///
    /// The sibling is flushed to disk before it replaces `path`, so a crash
    /// leaves either the old ledger or the new one. On failure the previous
    /// file is left as it was and the sibling is removed.
    pub fn store(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("create directory: {}", parent.display()))?;
        }
        let mut text = serde_json::to_string_pretty(self).context("serialize state file")?;
        text.push('\n');

        let tmp = path.with_extension("json.tmp");
        if let Err(err) = write_synced(&tmp, text.as_bytes()) {
            let _ = fs::remove_file(&tmp);
            return Err(err);
        }
        if let Err(err) = fs::rename(&tmp, path) {
            let _ = fs::remove_file(&tmp);
            return Err(err).with_context(|| format!("replace {}", path.display()));
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.applied.iter().any(|e| e.name == name)
    }

    pub fn record(&mut self, entry: AppliedEntry) -> Result<()> {
        if self.contains(&entry.name) {
            bail!("migration '{}' is already recorded as applied", entry.name);
        }
        self.applied.push(entry);
        Ok(())
    }

    /// Remove the entry for `name` and return it.
    pub fn forget(&mut self, name: &str) -> Result<AppliedEntry> {
        let Some(index) = self.applied.iter().position(|e| e.name == name) else {
            bail!("migration '{name}' is not recorded as applied");
        };
        Ok(self.applied.remove(index))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.applied.iter().map(|e| e.name.as_str())
    }
}

fn write_synced(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    file.write_all(bytes).with_context(|| format!("write {}", path.display()))?;
    file.sync_all().with_context(|| format!("sync {}", path.display()))
}
