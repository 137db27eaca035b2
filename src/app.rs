// App state and main event loop.
// Manages panel focus, the username input, and turns key presses into store lookups.

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use tracing::debug;

use gitpeek::cache::SnapshotStore;
use gitpeek::github::{Branch, GitHubApi, Repository};
use gitpeek::helpers::{are_all_true, is_one_of_true};
use gitpeek::store::Store;

use crate::state::SelectableList;
use crate::ui;

/// Panel that receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Username,
    Repositories,
    Branches,
}

impl Focus {
    pub fn title(&self) -> &'static str {
        match self {
            Focus::Username => "Username",
            Focus::Repositories => "Repositories",
            Focus::Branches => "Branches",
        }
    }
}

/// Message shown in the status bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

/// Lookup requested by a key press, run after the next frame is drawn so the
/// loading indicator is visible while the request is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    LoadRepositories { username: String, refresh: bool },
    LoadBranches {
        username: String,
        repository: String,
        refresh: bool,
    },
}

/// Main application state.
pub struct App<A, P> {
    pub store: Store<A, P>,
    /// Panel receiving key presses.
    pub focus: Focus,
    /// Username being typed.
    pub input: String,
    /// User whose repositories are displayed.
    pub username: Option<String>,
    pub repositories: SelectableList<Repository>,
    pub branches: SelectableList<Branch>,
    /// Repository whose branches are displayed.
    pub repository: Option<String>,
    pub status: Option<StatusMessage>,
    pub show_help: bool,
    /// Whether the app should exit.
    pub should_quit: bool,
    pending: Option<Action>,
}

impl<A: GitHubApi, P: SnapshotStore> App<A, P> {
    pub fn new(store: Store<A, P>) -> Self {
        Self {
            store,
            focus: Focus::default(),
            input: String::new(),
            username: None,
            repositories: SelectableList::new(),
            branches: SelectableList::new(),
            repository: None,
            status: None,
            show_help: false,
            should_quit: false,
            pending: None,
        }
    }

    /// Queue a repository lookup for `username`, as if it had been typed.
    pub fn look_up(&mut self, username: &str) {
        self.input = username.trim().to_string();
        self.submit_username();
    }

    /// Main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            if self.pending.is_some() {
                self.process_pending().await;
                continue;
            }
            self.handle_events()?;
        }
        Ok(())
    }

    /// Poll for one terminal event.
    #[allow(clippy::collapsible_if)]
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Handle keyboard input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        match self.focus {
            Focus::Username => self.handle_username_key(key),
            Focus::Repositories => self.handle_repositories_key(key),
            Focus::Branches => self.handle_branches_key(key),
        }
    }

    fn handle_username_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_username(),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Esc => self.input.clear(),
            KeyCode::Tab | KeyCode::Down => {
                if self.repositories.data.is_loaded() {
                    self.focus = Focus::Repositories;
                }
            }
            KeyCode::Char(c) if !c.is_whitespace() => self.input.push(c),
            _ => {}
        }
    }

    fn handle_repositories_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Up | KeyCode::Char('k') => self.repositories.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.repositories.select_next(),
            KeyCode::Enter => self.open_selected_repository(),
            KeyCode::Char('r') => {
                if let Some(username) = self.username.clone() {
                    self.pending = Some(Action::LoadRepositories {
                        username,
                        refresh: true,
                    });
                }
            }
            KeyCode::Tab => {
                if is_one_of_true(&[self.branches.data.is_loaded(), self.branches.data.is_error()])
                {
                    self.focus = Focus::Branches;
                }
            }
            KeyCode::Esc | KeyCode::Char('/') | KeyCode::BackTab => {
                self.focus = Focus::Username;
            }
            _ => {}
        }
    }

    fn handle_branches_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Up | KeyCode::Char('k') => self.branches.select_prev(),
            KeyCode::Down | KeyCode::Char('j') => self.branches.select_next(),
            KeyCode::Char('r') => {
                if let (Some(username), Some(repository)) =
                    (self.username.clone(), self.repository.clone())
                {
                    self.pending = Some(Action::LoadBranches {
                        username,
                        repository,
                        refresh: true,
                    });
                }
            }
            KeyCode::Esc | KeyCode::BackTab | KeyCode::Tab => self.focus = Focus::Repositories,
            KeyCode::Char('/') => self.focus = Focus::Username,
            _ => {}
        }
    }

    fn submit_username(&mut self) {
        let username = self.input.trim().to_string();
        if username.is_empty() {
            self.status = Some(StatusMessage::Error("Enter a GitHub username".to_string()));
            return;
        }
        self.repositories.set_loading();
        self.branches = SelectableList::new();
        self.repository = None;
        self.pending = Some(Action::LoadRepositories {
            username,
            refresh: false,
        });
    }

    fn open_selected_repository(&mut self) {
        let can_open = are_all_true(&[
            self.focus == Focus::Repositories,
            self.repositories.data.is_loaded(),
            !self.repositories.is_empty(),
            self.repositories.selected().is_some(),
            !self.branches.data.is_loading(),
        ]);
        if !can_open {
            return;
        }
        let (Some(username), Some(repository)) = (
            self.username.clone(),
            self.repositories.selected_item().map(|repo| repo.name().to_string()),
        ) else {
            return;
        };

        self.branches.set_loading();
        self.repository = Some(repository.clone());
        self.pending = Some(Action::LoadBranches {
            username,
            repository,
            refresh: false,
        });
    }

    /// Run the queued lookup, if any, and fold the outcome into the panels.
    pub async fn process_pending(&mut self) {
        let Some(action) = self.pending.take() else {
            return;
        };
        debug!(?action, "processing action");

        match action {
            Action::LoadRepositories { username, refresh } => {
                let fetched = if refresh {
                    self.store.fetch_user_repositories(&username).await
                } else {
                    self.store.ensure_repositories(&username).await
                };
                let result = fetched.map(<[Repository]>::to_vec);

                match result {
                    Ok(repositories) => {
                        let count = repositories.len();
                        if refresh {
                            self.repositories.refresh_loaded(repositories);
                        } else {
                            self.repositories.set_loaded(repositories);
                            self.focus = Focus::Repositories;
                        }
                        self.status = Some(StatusMessage::Info(format!(
                            "{} repositories for {}",
                            count, username
                        )));
                        self.username = Some(username);
                    }
                    // A failed refresh keeps the cached list on screen.
                    Err(e) if refresh => {
                        self.status = Some(StatusMessage::Error(format!(
                            "Refreshing {} failed: {}",
                            username, e
                        )));
                    }
                    Err(e) => {
                        let message = format!("Could not load repositories for {}: {}", username, e);
                        self.repositories.set_error(message.clone());
                        self.status = Some(StatusMessage::Error(message));
                        self.username = None;
                        self.focus = Focus::Username;
                    }
                }
            }
            Action::LoadBranches {
                username,
                repository,
                refresh,
            } => {
                let fetched = if refresh {
                    self.store
                        .fetch_repository_branches(&username, &repository)
                        .await
                } else {
                    self.store.ensure_branches(&username, &repository).await
                };
                let result = fetched.map(<[Branch]>::to_vec);

                match result {
                    Ok(branches) => {
                        let count = branches.len();
                        if refresh {
                            self.branches.refresh_loaded(branches);
                        } else {
                            self.branches.set_loaded(branches);
                            self.focus = Focus::Branches;
                        }
                        self.status = Some(StatusMessage::Info(format!(
                            "{} branches in {}/{}",
                            count, username, repository
                        )));
                    }
                    Err(e) if refresh => {
                        self.status = Some(StatusMessage::Error(format!(
                            "Refreshing {}/{} failed: {}",
                            username, repository, e
                        )));
                    }
                    Err(e) => {
                        let message = format!(
                            "Could not load branches for {}/{}: {}",
                            username, repository, e
                        );
                        self.branches.set_error(message.clone());
                        self.status = Some(StatusMessage::Error(message));
                    }
                }
            }
        }
    }
}
