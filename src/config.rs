use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::mode::tables::ModeTables;

/// Root configuration structure, deserialized from `.ember-modes/config.toml`.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// What to do with records whose mode is not a string.
    #[serde(default)]
    pub invalid_mode: InvalidModePolicy,
    /// Reference tables. Any table left out keeps the built-in data.
    #[serde(default)]
    pub modes: ModeTables,
}

/// Handling of records whose `mode` is null, missing, or not a string.
#[derive(Debug, Default, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum InvalidModePolicy {
    /// Report the record as an error; the CLI exits with code 1.
    #[default]
    Reject,
    /// Classify the record as `"unknown"`.
    Unknown,
}

impl std::fmt::Display for InvalidModePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidModePolicy::Reject => write!(f, "reject"),
            InvalidModePolicy::Unknown => write!(f, "unknown"),
        }
    }
}

/// Load the configuration, searching in order:
///
/// 1. `config_override`: path passed via `--config`
/// 2. `<base_dir>/.ember-modes/config.toml`
/// 3. `~/.config/ember-modes/config.toml`
/// 4. Built-in [`Config::default`]
///
/// Whatever is loaded is validated before it is returned.
pub fn load_config(base_dir: &Path, config_override: Option<&Path>) -> Result<Config> {
    let config = match find_config(base_dir, config_override) {
        Some(path) => read_config(&path)?,
        None => Config::default(),
    };

    config.modes.validate()?;
    Ok(config)
}

fn find_config(base_dir: &Path, config_override: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = config_override {
        return Some(path.to_path_buf());
    }

    let local = base_dir.join(".ember-modes").join("config.toml");
    if local.exists() {
        return Some(local);
    }

    let home = dirs::home_dir()?
        .join(".config")
        .join("ember-modes")
        .join("config.toml");
    home.exists().then_some(home)
}

fn read_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: Config =
        toml::from_str(&content).with_context(|| format!("parsing config {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(dir: &Path, content: &str) -> PathBuf {
        let path = dir.join("config.toml");
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_default_config() {
        let cfg = Config::default();
        assert_eq!(cfg.invalid_mode, InvalidModePolicy::Reject);
        assert_eq!(cfg.modes, ModeTables::default());
    }

    #[test]
    fn test_override_path_wins() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "invalid_mode = \"unknown\"\n");
        let cfg = load_config(dir.path(), Some(path.as_path())).unwrap();
        assert_eq!(cfg.invalid_mode, InvalidModePolicy::Unknown);
        assert_eq!(cfg.modes, ModeTables::default());
    }

    #[test]
    fn test_local_config_discovered() {
        let dir = tempfile::tempdir().unwrap();
        let local = dir.path().join(".ember-modes");
        std::fs::create_dir(&local).unwrap();
        write_config(
            &local,
            r#"
[modes.specific.IS]
"other renewables" = "geothermal"
"#,
        );

        let cfg = load_config(dir.path(), None).unwrap();
        assert_eq!(
            cfg.modes.specific_for("IS", "other renewables"),
            Some("geothermal")
        );
        // Replacing the specific table drops the built-in overrides.
        assert_eq!(cfg.modes.specific_for("TR", "other renewables"), None);
        assert_eq!(cfg.modes.canonical, ModeTables::default().canonical);
    }

    #[test]
    fn test_partial_tables() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[modes]
canonical = ["solar", "wind"]

[modes.generic]
"solar pv" = "solar"
"#,
        );

        let cfg = load_config(dir.path(), Some(path.as_path())).unwrap();
        assert_eq!(cfg.modes.canonical.len(), 2);
        assert_eq!(cfg.modes.generic.get("solar pv").map(String::as_str), Some("solar"));
        assert_eq!(cfg.modes.specific, ModeTables::default().specific);
    }

    #[test]
    fn test_invalid_tables_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(
            dir.path(),
            r#"
[modes]
canonical = ["Solar"]
"#,
        );
        assert!(load_config(dir.path(), Some(path.as_path())).is_err());
    }

    #[test]
    fn test_unknown_policy_value_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_config(dir.path(), "invalid_mode = \"skip\"\n");
        assert!(load_config(dir.path(), Some(path.as_path())).is_err());
    }

    #[test]
    fn test_missing_override_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(load_config(dir.path(), Some(missing.as_path())).is_err());
    }
}
