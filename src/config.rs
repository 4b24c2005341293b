use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_API_BASE_URL: &str = "https://dev.azure.com";

const CONFIG_DIR_NAME: &str = "mcp-for-azure-devops-work-items";
const CONFIG_FILE_NAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Server-wide settings, threaded explicitly into the MCP server.
///
/// Values come from an optional TOML file and are overridden by CLI/env values.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Azure DevOps organization name used for every upstream call
    pub organization: Option<String>,
    /// Token used when the inbound request carries none
    pub fallback_token: Option<String>,
    /// Base URL of the Azure DevOps REST API
    pub api_base_url: Option<String>,
}

impl Config {
    /// Load the config file at `path`, or the default per-user config file if it exists.
    ///
    /// A missing default file is not an error and yields an empty config.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded config file {}", path.display());
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Overlay values set on `other` on top of this config.
    pub fn merge(self, other: Config) -> Self {
        Self {
            organization: non_empty(other.organization).or(non_empty(self.organization)),
            fallback_token: non_empty(other.fallback_token).or(non_empty(self.fallback_token)),
            api_base_url: non_empty(other.api_base_url).or(non_empty(self.api_base_url)),
        }
    }

    pub fn organization(&self) -> Option<&str> {
        self.organization.as_deref()
    }

    pub fn fallback_token(&self) -> Option<&str> {
        self.fallback_token.as_deref()
    }

    pub fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_API_BASE_URL)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}
