use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use which::which;

use crate::{Result, ShelfError};

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "KBSHELF_DATA_DIR";

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the notes and bookmarks slots
    pub data_dir: PathBuf,

    /// Editor used for `--edit`; falls back to $EDITOR
    #[serde(default)]
    pub editor_command: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = project_dirs()
            .map(|dirs| dirs.data_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from(".kbshelf"));

        Self {
            data_dir,
            editor_command: None,
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "kbshelf")
}

impl Config {
    /// Default location of the config file.
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from(".kbshelf/config.json"))
    }

    /// Reads the config file at `path`, or the defaults if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = fs::read_to_string(path)?;
        serde_json::from_str(&text).map_err(|e| ShelfError::ConfigError {
            message: format!("{}: {}", path.display(), e),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|_| ShelfError::DirectoryError {
                    path: parent.to_path_buf(),
                })?;
            }
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }

    /// Applies a `key=value` setting.
    pub fn set(&mut self, assignment: &str) -> Result<()> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| ShelfError::ConfigError {
                message: format!("Expected KEY=VALUE, got '{}'", assignment),
            })?;
        let value = value.trim();

        match key.trim() {
            "data_dir" => {
                if value.is_empty() {
                    return Err(ShelfError::ConfigError {
                        message: "data_dir cannot be empty".to_string(),
                    });
                }
                self.data_dir = PathBuf::from(value);
            }
            "editor_command" => {
                self.editor_command = (!value.is_empty()).then(|| value.to_string());
            }
            other => {
                return Err(ShelfError::ConfigError {
                    message: format!("Unknown setting: {}", other),
                })
            }
        }
        Ok(())
    }

    /// Data directory after applying the command-line flag and environment override.
    pub fn resolve_data_dir(&self, flag: Option<&Path>) -> PathBuf {
        if let Some(dir) = flag {
            return dir.to_path_buf();
        }
        match std::env::var_os(DATA_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => self.data_dir.clone(),
        }
    }

    // This method provides smart fallbacks when no editor is configured
    pub fn get_editor_command(&self) -> String {
        // First try the configured editor
        if let Some(editor) = &self.editor_command {
            return editor.clone();
        }

        // Then try environment variable
        if let Ok(editor) = std::env::var("EDITOR") {
            return editor;
        }

        // Fall back to platform defaults
        if cfg!(windows) {
            "notepad".to_string()
        } else if cfg!(target_os = "macos") {
            "open -W -t".to_string()
        } else {
            for editor in &["nano", "vim", "vi"] {
                if which(editor).is_ok() {
                    return editor.to_string();
                }
            }
            "nano".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load(&temp.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("conf/config.json");

        let mut config = Config::default();
        config.set("data_dir=/tmp/shelf").unwrap();
        config.set("editor_command = vim -n").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.data_dir, PathBuf::from("/tmp/shelf"));
        assert_eq!(loaded.editor_command.as_deref(), Some("vim -n"));
        assert_eq!(loaded.get_editor_command(), "vim -n");
    }

    #[test]
    fn bad_settings_are_rejected() {
        let mut config = Config::default();
        assert!(config.set("no_equals").is_err());
        assert!(config.set("colour=red").is_err());
        assert!(config.set("data_dir=").is_err());

        config.set("editor_command=").unwrap();
        assert!(config.editor_command.is_none());
    }

    #[test]
    fn malformed_file_is_config_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            Config::load(&path),
            Err(ShelfError::ConfigError { .. })
        ));
    }

    #[test]
    fn flag_wins_over_config() {
        let config = Config::default();
        let flag = PathBuf::from("/somewhere/else");
        assert_eq!(config.resolve_data_dir(Some(&flag)), flag);
    }
}
