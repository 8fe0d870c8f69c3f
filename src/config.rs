use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::{ReporterError, Result};
use crate::i18n::Language;

const APP_NAME: &str = "reporter";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Where storage.json and issues.json live
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,
    /// Language used until one is chosen with `reporter language`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    /// Position reported by "use my current location", as `lat,lng`, or a
    /// failure code (1 denied, 2 unavailable, 3 timeout)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_location: Option<String>,
    pub allow_location: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: None,
            language: None,
            current_location: None,
            allow_location: true,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Config::default());
        }

        let contents =
            std::fs::read_to_string(&config_path).map_err(|e| ReporterError::ConfigRead {
                path: config_path.clone(),
                source: e,
            })?;

        toml::from_str(&contents).map_err(|e| ReporterError::ConfigParse {
            path: config_path,
            source: e,
        })
    }

    pub fn config_path() -> Result<PathBuf> {
        project_dirs().map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Data directory with the env var taking precedence over the config file
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os("REPORTER_DATA_DIR") {
            return Ok(PathBuf::from(dir));
        }

        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => project_dirs().map(|dirs| dirs.data_dir().to_path_buf()),
        }
    }

    pub fn storage_path(&self) -> Result<PathBuf> {
        self.data_dir().map(|dir| dir.join("storage.json"))
    }

    pub fn store_path(&self) -> Result<PathBuf> {
        self.data_dir().map(|dir| dir.join("issues.json"))
    }

    /// Language to use when none has been persisted yet
    pub fn default_language(&self) -> Language {
        std::env::var("REPORTER_LANG")
            .ok()
            .and_then(|code| Language::from_code(&code))
            .or(self.language)
            .unwrap_or_default()
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("", "", APP_NAME).ok_or(ReporterError::NoConfigDir)
}
