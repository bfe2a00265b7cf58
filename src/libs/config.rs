//! Configuration management for taskbase.
//!
//! Settings live in `config.json` inside the platform data directory
//! (see [`DataStorage`]). Two modules are configurable:
//!
//! - **Backend**: project URL and public anon key of the hosted backend
//! - **View**: filter applied when none is given on the command line
//!
//! The backend values can also come from the environment (`TASKBASE_URL`,
//! `TASKBASE_ANON_KEY`), including a `.env` file loaded at startup; the
//! environment wins over the file.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskbase::libs::config::Config;
//!
//! let config = Config::init()?;
//! config.save()?;
//!
//! let backend = Config::read()?.backend()?;
//! println!("Using {}", backend.url);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::libs::task::TaskFilter;
use crate::{msg_bail_anyhow, msg_print};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input, MultiSelect, Select};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::Path;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const ENV_URL: &str = "TASKBASE_URL";
pub const ENV_ANON_KEY: &str = "TASKBASE_ANON_KEY";

/// Represents a configurable module in the setup wizard.
#[derive(Debug, Clone)]
pub struct ConfigModule {
    pub key: String,
    pub name: String,
}

/// Connection parameters for the hosted backend.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct BackendConfig {
    /// Project URL, e.g. `https://xyzcompany.supabase.co`.
    pub url: String,
    /// Public anon key. Row-level security, not this key, protects the data.
    pub anon_key: String,
}

impl BackendConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "backend".to_string(),
            name: "Backend".to_string(),
        }
    }

    pub fn is_complete(&self) -> bool {
        !self.url.trim().is_empty() && !self.anon_key.trim().is_empty()
    }

    /// Applies `TASKBASE_URL` / `TASKBASE_ANON_KEY` on top of `self`.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = env::var(ENV_URL) {
            if !url.trim().is_empty() {
                self.url = url;
            }
        }
        if let Ok(anon_key) = env::var(ENV_ANON_KEY) {
            if !anon_key.trim().is_empty() {
                self.anon_key = anon_key;
            }
        }
        self
    }

    pub fn init(config: &Option<BackendConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleBackend);
        Ok(Self {
            url: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBackendUrl.to_string())
                .default(config.url)
                .interact_text()?,
            anon_key: Input::with_theme(&ColorfulTheme::default())
                .with_prompt(Message::PromptBackendAnonKey.to_string())
                .default(config.anon_key)
                .interact_text()?,
        })
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct ViewConfig {
    #[serde(default)]
    pub default_filter: TaskFilter,
}

impl ViewConfig {
    pub fn module() -> ConfigModule {
        ConfigModule {
            key: "view".to_string(),
            name: "View".to_string(),
        }
    }

    pub fn init(config: &Option<ViewConfig>) -> Result<Self> {
        let config = config.clone().unwrap_or_default();
        msg_print!(Message::ConfigModuleView);
        let filters = TaskFilter::ALL;
        let default_index = filters.iter().position(|f| *f == config.default_filter).unwrap_or(0);
        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptDefaultFilter.to_string())
            .items(&filters.iter().map(|f| f.to_string()).collect::<Vec<_>>())
            .default(default_index)
            .interact()?;
        Ok(Self {
            default_filter: filters[selection],
        })
    }
}

/// Root configuration. Unconfigured modules are omitted from the file.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backend: Option<BackendConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub view: Option<ViewConfig>,
}

impl Config {
    /// Reads the configuration file, falling back to defaults when it does not exist.
    pub fn read() -> Result<Config> {
        Self::read_from(&DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn read_from(config_file_path: &Path) -> Result<Config> {
        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&DataStorage::new().get_path(CONFIG_FILE_NAME)?)
    }

    pub fn save_to(&self, config_file_path: &Path) -> Result<()> {
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes the configuration file. A missing file is not an error.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Effective backend settings: file values with environment overrides applied.
    pub fn backend(&self) -> Result<BackendConfig> {
        let backend = self.backend.clone().unwrap_or_default().with_env_overrides();
        if !backend.is_complete() {
            msg_bail_anyhow!(Message::BackendNotConfigured);
        }
        Ok(backend)
    }

    pub fn default_filter(&self) -> TaskFilter {
        self.view.as_ref().map(|v| v.default_filter).unwrap_or_default()
    }

    /// Interactive setup wizard, pre-filled with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();

        let node_descriptions = vec![BackendConfig::module(), ViewConfig::module()];

        let selected_nodes = MultiSelect::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptSelectModules.to_string())
            .items(&node_descriptions.iter().map(|module| &module.name).collect::<Vec<_>>())
            .interact()?;

        for &selection in &selected_nodes {
            match node_descriptions[selection].key.as_str() {
                "backend" => config.backend = Some(BackendConfig::init(&config.backend)?),
                "view" => config.view = Some(ViewConfig::init(&config.view)?),
                _ => {}
            }
        }

        Ok(config)
    }
}
