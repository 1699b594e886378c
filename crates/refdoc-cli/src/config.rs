//! Project configuration (`refdoc.toml`) parsing

use refdoc_core::RenderConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// File name looked up in the working directory when no config is given
pub const CONFIG_FILE: &str = "refdoc.toml";

/// Errors that can occur when loading the project configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("output directory cannot be empty")]
    EmptyOutputDir,
}

/// The complete refdoc.toml file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Rendering policy; every field falls back to the libdill defaults.
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub catalogue: CatalogueConfig,
}

/// Where generated pages go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: default_output_dir(),
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("doc")
}

/// Where catalogue documents are read from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogueConfig {
    /// Files or directories; directories are searched recursively.
    #[serde(default = "default_catalogue_paths")]
    pub paths: Vec<PathBuf>,
}

impl Default for CatalogueConfig {
    fn default() -> Self {
        Self {
            paths: default_catalogue_paths(),
        }
    }
}

fn default_catalogue_paths() -> Vec<PathBuf> {
    vec![PathBuf::from("catalogue")]
}

impl ProjectConfig {
    /// Load a config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parse a config from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid or has unknown fields.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        if config.output.dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputDir);
        }
        Ok(config)
    }

    /// Load the config to use for a run: the explicit path if given, else
    /// `refdoc.toml` in the working directory if present, else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a config file exists but cannot be loaded.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::from_path(path);
        }
        let local = Path::new(CONFIG_FILE);
        if local.is_file() {
            Self::from_path(local)
        } else {
            Ok(Self::default())
        }
    }
}
