// Selectable list state.
// Tracks loading status and keyboard selection for the repository and branch panels.

use ratatui::widgets::ListState;

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadingState::Error(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// State for a selectable list with keyboard navigation.
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    pub data: LoadingState<Vec<T>>,
    pub list_state: ListState,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self {
            data: LoadingState::Idle,
            list_state: ListState::default(),
        }
    }
}

impl<T> SelectableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently selected index.
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        let Some(items) = self.data.data() else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i >= items.len() - 1 => i, // Stay at end
            Some(i) => i + 1,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        let Some(items) = self.data.data() else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Get the selected item.
    pub fn selected_item(&self) -> Option<&T> {
        let index = self.list_state.selected()?;
        self.data.data()?.get(index)
    }

    /// Reset selection to first item.
    pub fn reset_selection(&mut self) {
        let first = self
            .data
            .data()
            .and_then(|items| if items.is_empty() { None } else { Some(0) });
        self.list_state.select(first);
    }

    /// Set loaded data.
    pub fn set_loaded(&mut self, items: Vec<T>) {
        self.data = LoadingState::Loaded(items);
        self.reset_selection();
    }

    /// Replace data but keep the selection where it was, clamped to the new length.
    pub fn refresh_loaded(&mut self, items: Vec<T>) {
        let previous = self.list_state.selected();
        let len = items.len();
        self.data = LoadingState::Loaded(items);
        self.list_state
            .select(previous.filter(|_| len > 0).map(|i| i.min(len - 1)));
        if self.list_state.selected().is_none() {
            self.reset_selection();
        }
    }

    /// Set loading state.
    pub fn set_loading(&mut self) {
        self.data = LoadingState::Loading;
        self.list_state.select(None);
    }

    /// Set error state.
    pub fn set_error(&mut self, error: String) {
        self.data = LoadingState::Error(error);
        self.list_state.select(None);
    }

    /// Number of loaded items (zero unless loaded).
    pub fn len(&self) -> usize {
        self.data.data().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
