//! Application configuration management.
//!
//! This module handles loading and saving the CLI configuration, which holds
//! defaults for the database to work against and how to pick its data source.
//!
//! Configuration is stored at `~/.config/notion-cli/config.json`. Values from
//! the environment (`NOTION_API_TOKEN`, `NOTION_DATABASE_ID`) take precedence.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use notion_core::DataSourceSelection;
use serde::{Deserialize, Serialize};

/// Application name used for the config directory path
const APP_NAME: &str = "notion-cli";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const TOKEN_ENV: &str = "NOTION_API_TOKEN";
pub const DATABASE_ENV: &str = "NOTION_DATABASE_ID";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_source: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Overlay values found in the environment.
    pub fn with_env(mut self) -> Self {
        self.apply_overrides(
            std::env::var(TOKEN_ENV).ok(),
            std::env::var(DATABASE_ENV).ok(),
        );
        self
    }

    fn apply_overrides(&mut self, token: Option<String>, database_id: Option<String>) {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        if let Some(id) = database_id.filter(|id| !id.trim().is_empty()) {
            self.database_id = Some(id);
        }
    }

    /// Effective settings for display: the token is reduced to whether one is set.
    pub fn redacted(&self) -> serde_json::Value {
        serde_json::json!({
            "database_id": self.database_id,
            "data_source": self.data_source,
            "token_set": self.token.is_some(),
        })
    }

    /// The database ID given on the command line, or the configured default.
    pub fn resolve_database(&self, explicit: Option<String>) -> Result<String> {
        explicit
            .or_else(|| self.database_id.clone())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No database ID given; pass one, set {} or run `notion config set-database`",
                    DATABASE_ENV
                )
            })
    }

    /// The data source selection given on the command line, or the configured default.
    pub fn resolve_selection(&self, explicit: Option<DataSourceSelection>) -> Result<DataSourceSelection> {
        if let Some(selection) = explicit {
            return Ok(selection);
        }
        match &self.data_source {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("Invalid data_source in config: {}", raw)),
            None => Ok(DataSourceSelection::First),
        }
    }
}
