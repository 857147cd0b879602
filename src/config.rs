//! Runtime configuration resolved from the command line and environment

use std::path::PathBuf;
use std::time::Duration;

use directories::BaseDirs;
use thiserror::Error;

use crate::cli::Cli;

/// Name of the cache file in the user's home directory
pub const CACHE_FILE_NAME: &str = ".bdcv";

/// Errors that can occur while resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No home directory and no explicit cache file
    #[error("Cannot determine home directory; pass --cache-file or set BDCV_CACHE_FILE")]
    NoHomeDir,
}

/// Where the cache lives and how to reach the dictionary service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Path of the cache file
    pub cache_file: PathBuf,
    /// Dictionary service base URL
    pub endpoint: String,
    /// Per-request timeout; `None` keeps the transport default
    pub timeout: Option<Duration>,
}

impl Config {
    /// Resolves configuration from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Result<Self, ConfigError> {
        let cache_file = match &cli.cache_file {
            Some(path) => path.clone(),
            None => default_cache_file().ok_or(ConfigError::NoHomeDir)?,
        };

        Ok(Self {
            cache_file,
            endpoint: cli.endpoint.clone(),
            timeout: cli.timeout.map(Duration::from_secs),
        })
    }
}

/// `~/.bdcv`, if a home directory can be determined
pub fn default_cache_file() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CACHE_FILE_NAME))
}
