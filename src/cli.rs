// Command-line interface.
// Global connection and cache flags plus the interactive and one-shot subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::github::GITHUB_API_BASE;

#[derive(Debug, Parser)]
#[command(
    name = "gitpeek",
    version,
    about = "Look up GitHub users, browse their repositories and branches"
)]
pub struct Cli {
    /// GitHub API base URL.
    #[arg(long, env = "GITPEEK_API_BASE", default_value = GITHUB_API_BASE, global = true)]
    pub api_base: String,

    /// Token used to authenticate API requests (optional for public data).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true, global = true)]
    pub token: Option<String>,

    /// Snapshot file holding cached responses.
    #[arg(long, env = "GITPEEK_CACHE_FILE", global = true)]
    pub cache_file: Option<PathBuf>,

    /// Log filter directive, e.g. `debug` or `gitpeek=trace`.
    #[arg(long, env = "GITPEEK_LOG", global = true)]
    pub log_level: Option<String>,

    /// Log file used while the terminal UI is running.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Browse interactively (the default).
    Tui {
        /// User to look up on start.
        username: Option<String>,
    },
    /// List a user's repositories.
    Repos {
        username: String,
        /// Fetch even if the user is already cached.
        #[arg(long)]
        refresh: bool,
        /// Print the cached records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List a repository's branches.
    Branches {
        username: String,
        repository: String,
        /// Fetch even if the repository is already cached.
        #[arg(long)]
        refresh: bool,
        /// Print the cached records as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Inspect or clear the local cache.
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Subcommand)]
pub enum CacheAction {
    /// Print the snapshot file location.
    Path,
    /// Summarize cached users and repositories.
    Show,
    /// Delete the snapshot file.
    Clear,
}

impl Cli {
    /// The subcommand to run, defaulting to the terminal UI.
    pub fn command_or_default(&self) -> Command {
        self.command
            .clone()
            .unwrap_or(Command::Tui { username: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_default_command_is_tui() {
        let cli = Cli::try_parse_from(["gitpeek"]).unwrap();
        assert_eq!(cli.command_or_default(), Command::Tui { username: None });
    }

    #[test]
    fn test_repos_with_global_flags() {
        let cli = Cli::try_parse_from([
            "gitpeek",
            "repos",
            "octocat",
            "--refresh",
            "--cache-file",
            "/tmp/snapshot.json",
        ])
        .unwrap();

        assert_eq!(cli.cache_file, Some(PathBuf::from("/tmp/snapshot.json")));
        assert_eq!(
            cli.command_or_default(),
            Command::Repos {
                username: "octocat".to_string(),
                refresh: true,
                json: false,
            }
        );
    }

    #[test]
    fn test_branches_requires_repository() {
        assert!(Cli::try_parse_from(["gitpeek", "branches", "octocat"]).is_err());

        let cli = Cli::try_parse_from(["gitpeek", "branches", "octocat", "Hello-World"]).unwrap();
        assert!(matches!(
            cli.command_or_default(),
            Command::Branches { ref repository, .. } if repository == "Hello-World"
        ));
    }

    #[test]
    fn test_cache_actions() {
        let cli = Cli::try_parse_from(["gitpeek", "cache", "clear"]).unwrap();
        assert_eq!(
            cli.command_or_default(),
            Command::Cache {
                action: CacheAction::Clear
            }
        );
    }
}
