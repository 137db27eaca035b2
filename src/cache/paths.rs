// Cache path utilities.
// Resolves where the snapshot and log file live on this platform.

use std::path::PathBuf;

use directories::ProjectDirs;

const SNAPSHOT_FILE: &str = "snapshot.json";
const LOG_FILE: &str = "gitpeek.log";

/// Get the base cache directory (~/.cache/gitpeek on Linux).
pub fn cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "gitpeek").map(|dirs| dirs.cache_dir().to_path_buf())
}

/// Path to the persisted cache snapshot.
pub fn snapshot_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(SNAPSHOT_FILE))
}

/// Path to the log file used while the TUI owns the terminal.
pub fn log_path() -> Option<PathBuf> {
    cache_dir().map(|dir| dir.join(LOG_FILE))
}
