use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use stepwise_config::FileFormat;
use stepwise_loader::FsMigrator;

pub use stepwise_loader::load_config;

/// Directory commands operate on.
pub fn project_root() -> Result<PathBuf> {
    env::current_dir().context("resolve current directory")
}

/// Migrator for the project in the current directory. Requires stepwise.json.
pub fn open_migrator() -> Result<FsMigrator> {
    let config = load_config()?;
    Ok(FsMigrator::new(project_root()?, config))
}

/// File name for a new migration, e.g. `0004_add_cache_dir.json`.
pub fn migration_filename(
    version: u32,
    comment: Option<&str>,
    format: FileFormat,
    pattern: &str,
) -> String {
    let slug = slugify(comment.unwrap_or_default());
    format!(
        "{}.{}",
        render_migration_name(pattern, version, &slug),
        format.extension()
    )
}

fn slugify(comment: &str) -> String {
    comment
        .to_lowercase()
        .split(|ch: char| !ch.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

/// Expand `%v`, `%0Nv` and `%m` in `pattern`. Other text is copied as is.
fn render_migration_name(pattern: &str, version: u32, slug: &str) -> String {
    let mut out = String::with_capacity(pattern.len() + slug.len());
    let mut chars = pattern.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch != '%' {
            out.push(ch);
            continue;
        }
        match chars.peek().copied() {
            Some('v') => {
                chars.next();
                out.push_str(&version.to_string());
            }
            Some('m') => {
                chars.next();
                out.push_str(slug);
            }
            Some(d) if d.is_ascii_digit() => {
                let mut width = String::new();
                while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                    width.push(d);
                    chars.next();
                }
                if chars.peek() == Some(&'v') {
                    chars.next();
                    let w: usize = width.parse().unwrap_or(0);
                    out.push_str(&format!("{version:0w$}"));
                } else {
                    out.push('%');
                    out.push_str(&width);
                }
            }
            _ => out.push('%'),
        }
    }

    // An empty comment leaves a dangling separator.
    let name = out.trim_end_matches(['_', '-', '.']);
    if name.is_empty() {
        format!("{version:04}")
    } else {
        name.to_string()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::env;
    use std::fs;
    use std::path::{Path, PathBuf};

    use stepwise_config::{CONFIG_FILE_NAME, StepwiseConfig};

    pub struct CwdGuard {
        original: PathBuf,
    }

    impl CwdGuard {
        pub fn new(dir: &Path) -> Self {
            let original = env::current_dir().unwrap();
            env::set_current_dir(dir).unwrap();
            Self { original }
        }
    }

    impl Drop for CwdGuard {
        fn drop(&mut self) {
            let _ = env::set_current_dir(&self.original);
        }
    }

    pub fn write_config(config: &StepwiseConfig) {
        let text = serde_json::to_string_pretty(config).unwrap();
        fs::write(CONFIG_FILE_NAME, text).unwrap();
    }

    /// Write `migrations/<name>.json` relative to the current directory.
    pub fn write_migration(name: &str, version: u32, up: &[&str], down: &[&str]) {
        fs::create_dir_all("migrations").unwrap();
        let body = serde_json::json!({ "version": version, "up": up, "down": down });
        fs::write(format!("migrations/{name}.json"), body.to_string()).unwrap();
    }
}
