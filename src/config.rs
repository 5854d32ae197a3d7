//! Configuration for British Days.
//!
//! [`Config::load`] reads a JSON document (by default `config.json` in the
//! working directory). Every key is optional; a missing file, an unreadable
//! file or malformed JSON all fall back to [`Config::default`] so startup
//! never fails on configuration.

use crate::error::{Result, SlangError};
use directories_next::ProjectDirs;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "config.json";
/// Subdirectory name within the user's data directory
pub const APP_SUBDIR: &str = "british-days";

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data_directory: String,
    pub database_name: String,
    pub search_api: SearchConfig,
    pub harvest: HarvestConfig,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            data_directory: "Data".to_string(),
            database_name: "british_slang.db".to_string(),
            search_api: SearchConfig::default(),
            harvest: HarvestConfig::default(),
        }
    }
}

/// Which kind of searching to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Random pick from the built-in list; no network.
    #[serde(alias = "synthetic")]
    Mock,
    /// Rotate through the configured web sources.
    #[serde(alias = "external")]
    Api,
}

/// `search_api` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    #[serde(rename = "type")]
    pub mode: SearchMode,
    pub sources: Vec<String>,
    pub wikipedia_endpoint: String,
    pub wiktionary_endpoint: String,
    pub wikipedia_category: String,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            mode: SearchMode::Mock,
            sources: vec![
                "wikipedia".to_string(),
                "wiktionary".to_string(),
                "mock".to_string(),
            ],
            wikipedia_endpoint: "https://en.wikipedia.org/w/api.php".to_string(),
            wiktionary_endpoint: "https://en.wiktionary.org/w/api.php".to_string(),
            wikipedia_category: "Category:British slang".to_string(),
            timeout: 10,
        }
    }
}

impl SearchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout.max(1))
    }
}

/// `harvest` section: policy for the background search loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarvestConfig {
    pub max_consecutive_failures: u32,
    pub interval_ms: u64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        HarvestConfig {
            max_consecutive_failures: 5,
            interval_ms: 500,
        }
    }
}

impl HarvestConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

impl Config {
    /// Loads configuration from `path`, degrading to defaults on any defect.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config file at {:?}; using defaults.", path);
                return Config::default();
            }
            Err(e) => {
                warn!("Could not read config file {:?}: {}. Using defaults.", path, e);
                return Config::default();
            }
        };
        Self::from_json(&content).unwrap_or_else(|e| {
            warn!("Malformed config file {:?}: {}. Using defaults.", path, e);
            Config::default()
        })
    }

    /// Parses a JSON document; missing keys take their defaults. An empty
    /// document counts as `{}`.
    pub fn from_json(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_json::from_str(content).map_err(SlangError::from)
    }

    /// Directory holding the database file.
    ///
    /// Absolute `data_directory` values are used as-is. Relative ones are
    /// resolved next to the running executable, or under the platform data
    /// directory when the executable location is unknown.
    pub fn data_dir(&self) -> Result<PathBuf> {
        let configured = PathBuf::from(&self.data_directory);
        let data_dir = if configured.is_absolute() {
            configured
        } else {
            match std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
            {
                Some(base) => base.join(configured),
                None => {
                    let proj_dirs = ProjectDirs::from("org", "BritishDays", APP_SUBDIR)
                        .ok_or(SlangError::DataDirNotFound)?;
                    proj_dirs.data_dir().join(configured)
                }
            }
        };
        fs::create_dir_all(&data_dir)?;
        Ok(data_dir)
    }

    /// Full path of the database file.
    pub fn db_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join(&self.database_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.data_directory, "Data");
        assert_eq!(cfg.database_name, "british_slang.db");
        assert_eq!(cfg.search_api.mode, SearchMode::Mock);
        assert_eq!(cfg.search_api.sources, vec!["wikipedia", "wiktionary", "mock"]);
        assert_eq!(cfg.search_api.timeout, 10);
        assert_eq!(cfg.harvest.max_consecutive_failures, 5);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempdir().unwrap();
        let cfg = Config::load(&dir.path().join("nonexistent_config.json"));
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn test_incomplete_config_keeps_given_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"database_name": "test.db"}"#).unwrap();

        let cfg = Config::load(&path);
        assert_eq!(cfg.database_name, "test.db");
        assert_eq!(cfg.data_directory, "Data");
        assert_eq!(cfg.search_api, SearchConfig::default());
    }

    #[test]
    fn test_malformed_and_empty_configs_use_defaults() {
        let dir = tempdir().unwrap();
        let malformed = dir.path().join("bad.json");
        fs::write(&malformed, "{ this is not valid json }").unwrap();
        assert_eq!(Config::load(&malformed), Config::default());

        let empty = dir.path().join("empty.json");
        fs::write(&empty, "").unwrap();
        assert_eq!(Config::load(&empty), Config::default());
    }

    #[test]
    fn test_search_section_parsing() {
        let cfg = Config::from_json(
            r#"{
                "search_api": {
                    "type": "external",
                    "sources": ["wiktionary"],
                    "timeout": 3
                },
                "harvest": {"max_consecutive_failures": 3}
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.search_api.mode, SearchMode::Api);
        assert_eq!(cfg.search_api.sources, vec!["wiktionary"]);
        assert_eq!(cfg.search_api.request_timeout(), Duration::from_secs(3));
        assert_eq!(
            cfg.search_api.wikipedia_endpoint,
            SearchConfig::default().wikipedia_endpoint
        );
        assert_eq!(cfg.harvest.max_consecutive_failures, 3);
        assert_eq!(cfg.harvest.interval_ms, 500);
    }

    #[test]
    fn test_absolute_data_directory_is_created() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("CustomTestData");
        let cfg = Config {
            data_directory: target.to_string_lossy().into_owned(),
            database_name: "custom_test.db".to_string(),
            ..Config::default()
        };
        let db_path = cfg.db_path().unwrap();
        assert!(target.is_dir());
        assert_eq!(db_path, target.join("custom_test.db"));
    }
}
