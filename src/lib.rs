// gitpeek library.
// GitHub repository and branch lookups behind a persistent cache-aside store.

pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod helpers;
pub mod logging;
pub mod store;

pub use error::{GitPeekError, Result};
pub use store::Store;
