// GitHub API module.
// Provides the client, endpoint functions, and record types for the GitHub REST API.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use endpoints::GitHubApi;
pub use types::*;
