//! User configuration settings
//!
//! Layered configuration: defaults → config file → environment variables

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version control executable to invoke
    pub git_program: String,

    /// Maximum number of characters accepted by the commit message prompt
    pub commit_message_limit: usize,

    /// Push after a successful commit
    pub push_after_commit: bool,

    /// Copy the staged file list to the clipboard before committing
    pub copy_to_clipboard: bool,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path for interactive commands (defaults to the data directory)
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            git_program: "git".to_string(),
            commit_message_limit: 156,
            push_after_commit: true,
            copy_to_clipboard: true,
            debug: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration using an explicit config file
    pub fn load_from(config_path: &Path) -> Result<Self> {
        Self::figment(config_path)
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()).into())
    }

    fn figment(config_path: &Path) -> Figment {
        Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Layer config file if it exists
            .merge(Toml::file(config_path))
            // Layer environment variables (WRK_GIT_PROGRAM, WRK_PUSH_AFTER_COMMIT, ...)
            .merge(Env::prefixed("WRK_"))
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Resolve where interactive commands write their log
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match self.log_file {
            Some(ref path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("wrk.log")),
        }
    }

    /// Ensure the directory holding the log file exists
    pub fn ensure_directories(&self) -> Result<()> {
        let log_path = self.log_file_path()?;
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }
        Ok(())
    }

    /// Save current configuration to the default file
    pub fn save(&self) -> Result<PathBuf> {
        let config_path = Self::config_file_path()?;
        self.save_to(&config_path)?;
        Ok(config_path)
    }

    /// Save current configuration to an explicit file
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml =
            toml::to_string_pretty(self).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(config_path, toml).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("com", "wrk", "wrk").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.git_program, "git");
        assert_eq!(config.commit_message_limit, 156);
        assert!(config.push_after_commit);
        assert!(config.copy_to_clipboard);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("git_program"));
        assert!(toml.contains("commit_message_limit = 156"));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.git_program, Config::default().git_program);
        assert_eq!(config.commit_message_limit, 156);
    }

    #[test]
    fn test_file_overrides_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "commit_message_limit = 72\npush_after_commit = false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.commit_message_limit, 72);
        assert!(!config.push_after_commit);
        assert!(config.copy_to_clipboard);
    }

    #[test]
    fn test_save_then_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let config = Config {
            git_program: "/usr/local/bin/git".to_string(),
            copy_to_clipboard: false,
            ..Config::default()
        };
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.git_program, "/usr/local/bin/git");
        assert!(!loaded.copy_to_clipboard);
    }
}
