use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf, time::Duration};

/// Top-level configuration stored on disk.
///
/// Every field carries a default so a missing file, an empty file, or a file
/// written by an older version all load cleanly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the weather search backend.
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Quiet period before an autocomplete fetch fires, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_backend_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

const fn default_debounce_ms() -> u64 {
    300
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            debounce_ms: default_debounce_ms(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Load config from disk, or return defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "meteo", "meteo-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let cfg = Config::default();

        assert_eq!(cfg.backend_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.debounce(), Duration::from_millis(300));
        assert_eq!(cfg.request_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn empty_toml_yields_defaults() {
        let cfg: Config = toml::from_str("").expect("empty config must parse");
        assert_eq!(cfg.backend_url, Config::default().backend_url);
        assert_eq!(cfg.debounce_ms, 300);
    }

    #[test]
    fn partial_toml_keeps_defaults_for_missing_fields() {
        let cfg: Config =
            toml::from_str(r#"backend_url = "https://weather.example.com""#).expect("must parse");

        assert_eq!(cfg.backend_url, "https://weather.example.com");
        assert_eq!(cfg.debounce_ms, 300);
        assert_eq!(cfg.timeout_secs, 30);
    }

    #[test]
    fn toml_roundtrip() {
        let cfg = Config {
            backend_url: "http://10.0.0.5:9000".into(),
            debounce_ms: 150,
            timeout_secs: 5,
        };

        let serialized = toml::to_string_pretty(&cfg).expect("must serialize");
        let parsed: Config = toml::from_str(&serialized).expect("must parse back");

        assert_eq!(parsed.backend_url, cfg.backend_url);
        assert_eq!(parsed.debounce_ms, 150);
        assert_eq!(parsed.timeout_secs, 5);
    }
}
