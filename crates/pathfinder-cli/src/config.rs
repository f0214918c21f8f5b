//! CLI configuration
//!
//! Stored as TOML at `<config_dir>/pathfinder/config.toml`, or wherever
//! `PATHFINDER_CONFIG` points.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "PATHFINDER_CONFIG";

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    #[default]
    Redb,
    Sqlite,
    Memory,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redb => write!(f, "redb"),
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

impl FromStr for Backend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "redb" => Ok(Self::Redb),
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => anyhow::bail!("Unknown backend '{}' (expected redb, sqlite or memory)", other),
        }
    }
}

/// Get default data directory
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pathfinder")
}

/// Location of the config file
pub fn config_file_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return PathBuf::from(path);
    }
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("pathfinder")
        .join("config.toml")
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    pub backend: Backend,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            backend: Backend::default(),
            host: "127.0.0.1".to_string(),
            port: 8000,
        }
    }
}

impl Config {
    /// Load from the default location, falling back to defaults
    pub fn load() -> Self {
        let path = config_file_path();
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Ignoring config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, toml::to_string_pretty(self)?)?;
        tracing::debug!("Wrote config to {}", path.display());
        Ok(())
    }

    /// Effective data directory
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    pub fn keys() -> &'static [&'static str] {
        &["data_dir", "backend", "host", "port"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "data_dir" => self.data_dir.as_ref().map(|p| p.display().to_string()),
            "backend" => Some(self.backend.to_string()),
            "host" => Some(self.host.clone()),
            "port" => Some(self.port.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "data_dir" => self.data_dir = Some(PathBuf::from(value)),
            "backend" => self.backend = value.parse()?,
            "host" => self.host = value.to_string(),
            "port" => {
                self.port = value
                    .parse()
                    .map_err(|_| anyhow::anyhow!("Invalid port: {}", value))?
            }
            _ => anyhow::bail!(
                "Unknown config key: {} (available: {})",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_and_set() {
        let mut config = Config::default();
        assert_eq!(config.get("data_dir"), None);
        assert_eq!(config.get("port").as_deref(), Some("8000"));

        config.set("backend", "SQLite").unwrap();
        config.set("port", "9001").unwrap();
        assert_eq!(config.backend, Backend::Sqlite);
        assert_eq!(config.port, 9001);

        assert!(config.set("port", "many").is_err());
        assert!(config.set("backend", "postgres").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config.get("colour"), None);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert_eq!(Config::load_from(&path).unwrap(), Config::default());

        let mut config = Config::default();
        config.set("data_dir", "/tmp/graphs").unwrap();
        config.set("backend", "memory").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(loaded.data_dir(), PathBuf::from("/tmp/graphs"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "port = 7000\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.backend, Backend::Redb);
    }
}
