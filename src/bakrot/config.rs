use crate::error::{BakrotError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const CONFIG_FILENAME: &str = "config.json";

/// Retention window used when the caller does not pass one.
pub const DEFAULT_RETENTION_DAYS: u32 = 7;

pub const RETENTION_DAYS_KEY: &str = "retention-days";

/// Tool settings, stored in `config.json` under the platform config dir.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BakrotConfig {
    /// Days a backup is kept before `clean` may remove it
    #[serde(default = "default_retention_days")]
    pub retention_days: u32,
}

fn default_retention_days() -> u32 {
    DEFAULT_RETENTION_DAYS
}

impl Default for BakrotConfig {
    fn default() -> Self {
        Self {
            retention_days: DEFAULT_RETENTION_DAYS,
        }
    }
}

impl BakrotConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            fs::read_to_string(&config_path).map_err(|e| BakrotError::at_path(&config_path, e))?;
        let config: BakrotConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(|e| BakrotError::at_path(config_dir, e))?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&config_path, content).map_err(|e| BakrotError::at_path(&config_path, e))?;
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            RETENTION_DAYS_KEY => Some(self.retention_days.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            RETENTION_DAYS_KEY => {
                let days: u32 = value.parse().map_err(|_| {
                    BakrotError::Config(format!("{key} expects a whole number, got {value:?}"))
                })?;
                if days == 0 {
                    return Err(BakrotError::InvalidRetention(days));
                }
                self.retention_days = days;
                Ok(())
            }
            other => Err(BakrotError::Config(format!("Unknown config key: {other}"))),
        }
    }

    pub fn keys() -> &'static [&'static str] {
        &[RETENTION_DAYS_KEY]
    }
}
