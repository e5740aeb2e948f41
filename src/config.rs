use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{LinearError, Result};

pub const API_KEY_ENV: &str = "LINEAR_API_KEY";

#[derive(Deserialize, Serialize, Default, Debug, PartialEq)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_team: Option<String>,
    /// Editor command for `issues edit`, overriding $VISUAL and $EDITOR.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editor: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            tracing::debug!(path = %config_path.display(), "no config file");
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(config_path).map_err(|e| LinearError::ConfigRead {
                path: config_path.to_path_buf(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| LinearError::ConfigParse {
            path: config_path.to_path_buf(),
            source: e,
        })
    }

    /// Write the config file, creating its directory.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        let write_error = |source| LinearError::ConfigWrite {
            path: config_path.to_path_buf(),
            source,
        };

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(write_error)?;
        }
        let contents = toml::to_string(self)?;
        std::fs::write(config_path, contents).map_err(write_error)?;

        tracing::debug!(path = %config_path.display(), "wrote config file");
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        ProjectDirs::from("", "", "linear")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .ok_or(LinearError::NoConfigDir)
    }

    /// API key: explicit flag, then LINEAR_API_KEY, then the config file.
    pub fn api_key(&self, explicit: Option<&str>) -> Result<String> {
        let env = std::env::var(API_KEY_ENV).ok();
        resolve_api_key(explicit, env.as_deref(), self.api_key.as_deref())
    }

    /// Get team, preferring explicit argument over default
    pub fn resolve_team(&self, explicit: Option<&str>) -> Option<String> {
        explicit
            .map(String::from)
            .or_else(|| self.default_team.clone())
    }
}

fn resolve_api_key(
    explicit: Option<&str>,
    env: Option<&str>,
    file: Option<&str>,
) -> Result<String> {
    [explicit, env, file]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|key| !key.is_empty())
        .map(String::from)
        .ok_or(LinearError::MissingApiKey)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn api_key_precedence() {
        assert_eq!(
            resolve_api_key(Some("flag"), Some("env"), Some("file")).unwrap(),
            "flag"
        );
        assert_eq!(resolve_api_key(None, Some("env"), Some("file")).unwrap(), "env");
        assert_eq!(resolve_api_key(None, Some(""), Some("file")).unwrap(), "file");
    }

    #[test]
    fn missing_api_key_is_an_error() {
        assert!(matches!(
            resolve_api_key(None, None, None),
            Err(LinearError::MissingApiKey)
        ));
        assert!(matches!(
            resolve_api_key(Some("  "), None, None),
            Err(LinearError::MissingApiKey)
        ));
    }

    #[test]
    fn parse_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "api_key = \"lin_api_123\"\ndefault_team = \"ENG\"\neditor = \"nano\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("lin_api_123"));
        assert_eq!(config.resolve_team(None).as_deref(), Some("ENG"));
        assert_eq!(config.resolve_team(Some("OPS")).as_deref(), Some("OPS"));
        assert_eq!(config.editor.as_deref(), Some("nano"));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let config = Config {
            api_key: Some("lin_api_\"quoted\"".to_string()),
            default_team: None,
            editor: Some("code --wait".to_string()),
        };

        config.save_to(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(!written.contains("default_team"));
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn invalid_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "api_key = ").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(LinearError::ConfigParse { .. })
        ));
    }
}
