// State management module.
// Holds the list and loading state rendered by the UI panels.

pub mod list;

pub use list::{LoadingState, SelectableList};
