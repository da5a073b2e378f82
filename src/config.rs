use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::quiz::QuizSettings;

/// Environment variable that overrides where element edits are stored.
pub const DATA_DIR_ENV: &str = "ELEMQUIZ_DATA_DIR";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to write settings at {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory holding the persisted edit overlay.
    pub data_dir: Option<PathBuf>,
    pub question_seconds: u32,
    pub reveal_delay_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            question_seconds: 10,
            reveal_delay_ms: 1500,
        }
    }
}

impl AppConfig {
    /// Loads settings from the platform config directory.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Reads `path`, falling back to defaults when it is missing or unreadable.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        let file = match File::open(path) {
            Ok(file) => file,
            Err(error) => {
                log::warn!("cannot open settings {}: {}", path.display(), error);
                return Self::default();
            }
        };

        match serde_json::from_reader(BufReader::new(file)) {
            Ok(config) => {
                log::debug!("settings loaded from {}", path.display());
                config
            }
            Err(error) => {
                log::warn!("ignoring malformed settings {}: {}", path.display(), error);
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let file = File::create(path).map_err(|source| ConfigError::Write {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;

        Ok(())
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "elemquiz", "elemquiz")
            .map(|dirs| dirs.config_dir().join("settings.json"))
    }

    /// Where the overlay lives: the env override, then `data_dir`, then the
    /// platform data directory, then the working directory.
    pub fn resolve_data_dir(&self) -> PathBuf {
        if let Some(dir) = std::env::var_os(DATA_DIR_ENV) {
            return PathBuf::from(dir);
        }

        self.data_dir
            .clone()
            .or_else(|| {
                ProjectDirs::from("org", "elemquiz", "elemquiz")
                    .map(|dirs| dirs.data_dir().to_path_buf())
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }

    pub fn quiz_settings(&self) -> QuizSettings {
        QuizSettings {
            question_seconds: self.question_seconds,
            reveal_delay: Duration::from_millis(self.reveal_delay_ms),
            ..QuizSettings::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_quiz_defaults() {
        assert_eq!(AppConfig::default().quiz_settings(), QuizSettings::default());
    }

    #[test]
    fn missing_file_gives_defaults() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let config = AppConfig::load_from(&root.path().join("settings.json"));

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn malformed_file_gives_defaults() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let path = root.path().join("settings.json");
        fs::write(&path, "question_seconds = 5").expect("settings should be written");

        assert_eq!(AppConfig::load_from(&path), AppConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let path = root.path().join("settings.json");
        fs::write(&path, r#"{ "question_seconds": 20 }"#).expect("settings should be written");

        let config = AppConfig::load_from(&path);

        assert_eq!(config.question_seconds, 20);
        assert_eq!(config.reveal_delay_ms, 1500);
        assert_eq!(
            config.quiz_settings().reveal_delay,
            Duration::from_millis(1500)
        );
    }

    #[test]
    fn saved_settings_load_back() {
        let root = tempfile::tempdir().expect("temporary directory should be created");
        let path = root.path().join("nested").join("settings.json");
        let config = AppConfig {
            data_dir: Some(root.path().join("data")),
            question_seconds: 7,
            reveal_delay_ms: 500,
        };

        config.save_to(&path).expect("settings should save");

        assert_eq!(AppConfig::load_from(&path), config);
    }
}
