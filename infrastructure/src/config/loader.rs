//! Configuration file loader with multi-source merging and credential
//! storage.

use super::RelayConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Configuration loader that handles file discovery and merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority.
    ///
    /// Priority (highest to lowest):
    /// 1. `RELAY_API_KEY` environment variable (credential only)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./relay.toml`
    /// 4. Global: `~/.config/agent-relay/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<RelayConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(RelayConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        let project_path = PathBuf::from("relay.toml");
        if project_path.exists() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        let mut config: RelayConfig = figment.extract().map_err(Box::new)?;

        if let Ok(key) = std::env::var("RELAY_API_KEY")
            && !key.trim().is_empty()
        {
            config.api.key = key;
        }

        Ok(config)
    }

    /// Load only default configuration.
    pub fn load_defaults() -> RelayConfig {
        RelayConfig::default()
    }

    /// Get the global config file path.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("agent-relay").join("config.toml"))
    }

    /// Persist the API credential into the global config file.
    ///
    /// Read-modify-write of `[api] key`, preserving any other settings
    /// already in the file. Returns the path written.
    pub fn store_api_key(key: &str) -> std::io::Result<PathBuf> {
        let path = Self::global_config_path().ok_or_else(|| {
            std::io::Error::other("could not determine a config directory")
        })?;
        Self::write_api_key(&path, key)?;
        Ok(path)
    }

    fn write_api_key(path: &Path, key: &str) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let existing = std::fs::read_to_string(path).unwrap_or_default();
        let mut table: toml::Table = existing.parse().unwrap_or_default();

        let api = table
            .entry("api")
            .or_insert_with(|| toml::Value::Table(toml::Table::new()));
        if let Some(api_table) = api.as_table_mut() {
            api_table.insert("key".to_string(), toml::Value::String(key.to_string()));
        }

        let serialized = toml::to_string_pretty(&table)
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        std::fs::write(path, serialized)
    }
}
