//! Configuration management for the CLI

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable prefix for configuration overrides
const ENV_PREFIX: &str = "RATIOCTL";

/// CLI configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Target utilization percentage used when `--target` is omitted
    #[serde(default = "default_target_utilization")]
    pub default_target_utilization: i32,

    /// Default output format (table or json)
    #[serde(default)]
    pub default_format: Option<String>,
}

fn default_target_utilization() -> i32 {
    80
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            default_target_utilization: default_target_utilization(),
            default_format: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from the config file (if present) and environment
    ///
    /// An explicit `path` overrides the default location. A missing file is
    /// not an error; unparseable content is.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file_path = match path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::default_path(),
        };

        let mut builder = config::Config::builder();
        if let Some(file_path) = file_path {
            builder = builder.add_source(config::File::from(file_path).required(false));
        }

        let config = builder
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Failed to parse configuration")
    }

    /// Default config file location
    fn default_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".config").join("ratioctl").join("config.toml"))
    }
}
