use crate::error::RepoSummaryError;
use log::debug;
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Persisted settings are a flat table of string keys to string values,
/// holding at least the `llm` key once a provider has been chosen.
pub type Settings = BTreeMap<String, String>;

pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        ConfigStore { path: path.into() }
    }

    /// Opens the store at its default location, `~/.repo-summary.toml`.
    pub fn open() -> Result<Self, RepoSummaryError> {
        Ok(ConfigStore::new(default_config_path()?))
    }

    pub fn load(&self) -> Result<Settings, RepoSummaryError> {
        if !self.path.exists() {
            debug!("no configuration at {}, starting empty", self.path.display());
            return Ok(Settings::new());
        }

        let contents = fs::read_to_string(&self.path)?;
        let settings = toml::from_str(&contents)?;
        debug!("loaded configuration from {}", self.path.display());
        Ok(settings)
    }

    pub fn save(&self, settings: &Settings) -> Result<(), RepoSummaryError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(settings)?;
        fs::write(&self.path, contents)?;
        debug!("saved configuration to {}", self.path.display());
        Ok(())
    }
}

pub fn default_config_path() -> Result<PathBuf, RepoSummaryError> {
    let home = env::var("HOME")
        .or_else(|_| env::var("USERPROFILE"))
        .map_err(|_| {
            RepoSummaryError::ConfigError("could not determine home directory".to_string())
        })?;
    Ok(PathBuf::from(home).join(".repo-summary.toml"))
}
