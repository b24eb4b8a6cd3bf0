use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Overrides the config directory (default: `$HOME/.extracto`)
const HOME_ENV: &str = "EXTRACTO_HOME";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub extract: ExtractSection,
    #[serde(default)]
    pub output: OutputSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractSection {
    /// Bank id attached to extraction output (BBVA = 1)
    pub bank_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSection {
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSection {
    /// tracing EnvFilter directive, used when RUST_LOG is unset
    pub filter: String,
}

impl Default for ExtractSection {
    fn default() -> Self {
        Self { bank_id: 1 }
    }
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { pretty: true }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

fn config_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var_os("HOME").context("neither EXTRACTO_HOME nor HOME is set")?;
    Ok(PathBuf::from(home).join(".extracto"))
}

/// The `--config` flag if given, else `config.toml` in the config directory
pub fn resolve_config_path(flag: Option<&Path>) -> Result<PathBuf> {
    match flag {
        Some(p) => Ok(p.to_path_buf()),
        None => Ok(config_home()?.join("config.toml")),
    }
}

/// A missing file means defaults.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_config(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default config. An existing file is only replaced with `force`,
/// and is never read, so a broken file can always be regenerated.
/// Returns whether a file was written.
pub fn init_config(path: &Path, force: bool) -> Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    save_config(&Config::default(), path)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg = parse_config("[extract]\nbank_id = 4\n").unwrap();
        assert_eq!(cfg.extract.bank_id, 4);
        assert!(cfg.output.pretty);
        assert_eq!(cfg.logging.filter, "info");
    }

    #[test]
    fn test_default_config_round_trips_through_toml() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        assert_eq!(parse_config(&s).unwrap(), Config::default());
    }

    #[test]
    fn test_missing_file_means_defaults() {
        let cfg = load_config(Path::new("/nonexistent/extracto/config.toml")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_rejects_bad_types() {
        assert!(parse_config("[extract]\nbank_id = \"bbva\"\n").is_err());
    }

    #[test]
    fn test_flag_wins_over_config_home() {
        let p = resolve_config_path(Some(Path::new("/tmp/custom.toml"))).unwrap();
        assert_eq!(p, PathBuf::from("/tmp/custom.toml"));
    }

    #[test]
    fn test_init_regenerates_broken_config_only_with_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(init_config(&path, false).unwrap());
        assert_eq!(load_config(&path).unwrap(), Config::default());

        fs::write(&path, "[extract\nbank_id = ").unwrap();
        assert!(load_config(&path).is_err());

        assert!(!init_config(&path, false).unwrap());
        assert!(load_config(&path).is_err());

        assert!(init_config(&path, true).unwrap());
        assert_eq!(load_config(&path).unwrap(), Config::default());
    }
}
