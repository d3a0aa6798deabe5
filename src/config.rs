use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::format::{Item, StrftimeItems};
use directories::ProjectDirs;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{NotesError, Result, SortOrder};

/// Application configuration settings.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Sort order the store starts with
    pub sort_order: SortOrder,

    /// strftime format for timestamps shown in the shell
    pub date_format: String,

    /// How many characters of content to show in listings
    pub preview_length: usize,

    /// Whether to style output with terminal colors
    pub color_output: bool,

    /// Prompt printed before each interactive command
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sort_order: SortOrder::default(),
            date_format: "%Y-%m-%d %H:%M".to_string(),
            preview_length: 80,
            color_output: true,
            prompt: "notes> ".to_string(),
        }
    }
}

impl Config {
    /// Location of the config file when none is given on the command line
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "quicknotes", "quicknotes")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Loads the configuration.
    ///
    /// An explicit `path` must exist. Without one the default location is
    /// read if present, otherwise built-in defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path() {
                Some(default) if default.is_file() => Self::from_file(&default)?,
                _ => {
                    debug!("No config file found, using defaults");
                    Config::default()
                }
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file, missing fields take their defaults
    pub fn from_file(path: &Path) -> Result<Config> {
        info!("Loading config from {}", path.display());
        let raw = fs::read_to_string(path).map_err(|e| NotesError::ConfigError {
            message: format!("Cannot read {}: {}", path.display(), e),
        })?;

        let config: Config = serde_json::from_str(&raw)?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.preview_length == 0 {
            return Err(NotesError::ConfigError {
                message: "preview_length must be greater than zero".to_string(),
            });
        }

        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(NotesError::ConfigError {
                message: format!("Invalid date_format: {}", self.date_format),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn write_config(json: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.sort_order, SortOrder::DateNewest);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let file = write_config(r#"{ "sort_order": "title-asc", "color_output": false }"#);
        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.sort_order, SortOrder::TitleAsc);
        assert!(!config.color_output);
        assert_eq!(config.preview_length, 80);
        assert_eq!(config.prompt, "notes> ");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = Config::load(Some(dir.path().join("absent.json").as_path()));
        assert!(matches!(result, Err(NotesError::ConfigError { .. })));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let file = write_config("{ not json");
        let result = Config::load(Some(file.path()));
        assert!(matches!(result, Err(NotesError::Serialization(_))));
    }

    #[test]
    fn zero_preview_length_is_rejected() {
        let file = write_config(r#"{ "preview_length": 0 }"#);
        assert!(matches!(
            Config::load(Some(file.path())),
            Err(NotesError::ConfigError { .. })
        ));
    }

    #[test]
    fn bad_date_format_is_rejected() {
        let config = Config {
            date_format: "%Y-%m %".to_string(),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
