//! Configuration file support for the BMI tracker.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/bmi-tracker/config.toml`.

use crate::store::{EmailPolicy, JsonlStore, RECORDS_FILE};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "bmi-tracker";

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub store: StoreConfig,
}

/// Data storage configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DataConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Record store configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,

    #[serde(default)]
    pub email_policy: EmailPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            email_policy: EmailPolicy::default(),
        }
    }
}

// Default value functions
fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

fn default_file_name() -> String {
    RECORDS_FILE.into()
}

impl Config {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR)
            .join("config.toml")
    }

    /// Reject settings the store cannot work with
    pub fn validate(&self) -> Result<()> {
        let name = self.store.file_name.trim();
        if name.is_empty() || name.contains(['/', '\\']) {
            return Err(Error::Config(format!(
                "store.file_name must be a plain file name, got {:?}",
                self.store.file_name
            )));
        }
        Ok(())
    }

    /// Path of the record file inside `data_dir`
    pub fn records_path(&self, data_dir: &Path) -> PathBuf {
        data_dir.join(&self.store.file_name)
    }

    /// Open (and initialize) the record store inside `data_dir`
    pub fn open_store(&self, data_dir: &Path) -> Result<JsonlStore> {
        JsonlStore::open(self.records_path(data_dir), self.store.email_policy)
    }

    /// Save the current configuration to the default path
    pub fn save(&self) -> Result<()> {
        let config_path = Self::default_config_path();
        self.save_to(&config_path)
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, contents)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.store.file_name, "bmi_records.jsonl");
        assert_eq!(config.store.email_policy, EmailPolicy::AllowHistory);
        assert!(config.data.data_dir.ends_with("bmi-tracker"));
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[store]
email_policy = "unique_registration"
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.store.email_policy, EmailPolicy::UniqueRegistration);
        assert_eq!(config.store.file_name, "bmi_records.jsonl"); // default
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("cfg").join("config.toml");

        let mut config = Config::default();
        config.data.data_dir = temp_dir.path().join("data");
        config.store.email_policy = EmailPolicy::UniqueRegistration;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.data.data_dir, temp_dir.path().join("data"));
        assert_eq!(loaded.store.email_policy, EmailPolicy::UniqueRegistration);
    }

    #[test]
    fn test_rejects_path_as_file_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[store]\nfile_name = \"../escape.jsonl\"\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_open_store_uses_configured_name() {
        let temp_dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.store.file_name = "custom.jsonl".into();

        let store = config.open_store(temp_dir.path()).unwrap();
        assert_eq!(store.path(), temp_dir.path().join("custom.jsonl"));
        assert!(store.path().exists());
    }
}
