// Resolved runtime configuration.
// Combines command-line flags, environment fallbacks, and platform default paths.

use std::path::PathBuf;

use crate::cache::paths;
use crate::cli::Cli;
use crate::error::{GitPeekError, Result};

const DEFAULT_TUI_LOG_LEVEL: &str = "info";
const DEFAULT_CLI_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_base: String,
    pub token: Option<String>,
    pub snapshot_path: PathBuf,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let snapshot_path = match &cli.cache_file {
            Some(path) => path.clone(),
            None => paths::snapshot_path().ok_or_else(|| {
                GitPeekError::Other(
                    "could not determine a cache directory, pass --cache-file".to_string(),
                )
            })?,
        };

        Ok(Self {
            api_base: cli.api_base.clone(),
            // An exported but empty GITHUB_TOKEN means no token.
            token: cli.token.clone().filter(|token| !token.trim().is_empty()),
            snapshot_path,
            log_level: cli.log_level.clone(),
            log_file: cli.log_file.clone().or_else(paths::log_path),
        })
    }

    /// Log filter to use; the TUI logs to a file so it can afford to be chattier.
    pub fn log_level(&self, interactive: bool) -> &str {
        match &self.log_level {
            Some(level) => level.as_str(),
            None if interactive => DEFAULT_TUI_LOG_LEVEL,
            None => DEFAULT_CLI_LOG_LEVEL,
        }
    }
}
