// gitpeek entry point.
// Parses the command line, wires the GitHub client to the file-backed store, and runs the TUI or a one-shot command.

mod app;
mod state;
mod ui;

use std::process::ExitCode;

use clap::Parser;
use tracing::error;

use gitpeek::cache::{FileSnapshotStore, SnapshotStore};
use gitpeek::cli::{CacheAction, Cli, Command};
use gitpeek::config::Config;
use gitpeek::github::{Branch, GitHubClient, Repository};
use gitpeek::store::Store;
use gitpeek::{Result, logging};

use crate::app::App;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "command failed");
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(&cli)?;
    let command = cli.command_or_default();
    let interactive = matches!(command, Command::Tui { .. });

    let log_file = if interactive {
        config.log_file.as_deref()
    } else {
        None
    };
    logging::init(config.log_level(interactive), log_file)?;

    let persistence = FileSnapshotStore::new(&config.snapshot_path);

    match command {
        Command::Tui { username } => {
            let store = Store::new(client(&config)?, persistence);
            run_tui(store, username).await
        }
        Command::Repos {
            username,
            refresh,
            json,
        } => {
            let mut store = Store::new(client(&config)?, persistence);
            let repositories = if refresh {
                store.fetch_user_repositories(&username).await?
            } else {
                store.ensure_repositories(&username).await?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(repositories)?);
            } else {
                print_repositories(repositories);
            }
            Ok(())
        }
        Command::Branches {
            username,
            repository,
            refresh,
            json,
        } => {
            let mut store = Store::new(client(&config)?, persistence);
            let branches = if refresh {
                store
                    .fetch_repository_branches(&username, &repository)
                    .await?
            } else {
                store.ensure_branches(&username, &repository).await?
            };
            if json {
                println!("{}", serde_json::to_string_pretty(branches)?);
            } else {
                print_branches(branches);
            }
            Ok(())
        }
        Command::Cache { action } => run_cache(action, &persistence),
    }
}

fn client(config: &Config) -> Result<GitHubClient> {
    GitHubClient::new(&config.api_base, config.token.as_deref())
}

async fn run_tui(
    store: Store<GitHubClient, FileSnapshotStore>,
    username: Option<String>,
) -> Result<()> {
    let mut app = App::new(store);
    if let Some(username) = username {
        app.look_up(&username);
    }

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal).await;
    ratatui::restore();

    result.map_err(Into::into)
}

fn run_cache(action: CacheAction, persistence: &FileSnapshotStore) -> Result<()> {
    match action {
        CacheAction::Path => println!("{}", persistence.path().display()),
        CacheAction::Show => {
            let snapshot = persistence.load();
            if snapshot.is_empty() {
                println!("Cache is empty ({})", persistence.path().display());
                return Ok(());
            }
            println!("Users:");
            for (username, repositories) in &snapshot.users {
                println!("  {:<30} {} repositories", username, repositories.len());
            }
            println!("Repositories:");
            for (key, branches) in &snapshot.repositories {
                println!("  {:<30} {} branches", key, branches.len());
            }
        }
        CacheAction::Clear => {
            if persistence.clear()? {
                println!("Removed {}", persistence.path().display());
            } else {
                println!("Nothing to clear");
            }
        }
    }
    Ok(())
}

fn print_repositories(repositories: &[Repository]) {
    if repositories.is_empty() {
        println!("No public repositories");
        return;
    }
    for repo in repositories {
        let mut line = repo.name().to_string();
        if repo.is_fork() {
            line.push_str(" (fork)");
        }
        if let Some(language) = repo.language() {
            line.push_str(&format!("  [{}]", language));
        }
        if let Some(description) = repo.description() {
            line.push_str(&format!("  {}", description));
        }
        println!("{}", line);
    }
}

fn print_branches(branches: &[Branch]) {
    if branches.is_empty() {
        println!("No branches");
        return;
    }
    for branch in branches {
        let protected = if branch.is_protected() { " (protected)" } else { "" };
        println!(
            "{:<40} {}{}",
            branch.name(),
            branch.short_sha().unwrap_or("-"),
            protected
        );
    }
}
