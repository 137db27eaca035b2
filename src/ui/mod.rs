// UI module for rendering the TUI.
// Lays out the username input, the repository and branch panels, and the status bar.

mod input;
mod list;

use ratatui::{prelude::*, widgets::*};

use gitpeek::cache::SnapshotStore;
use gitpeek::github::{GitHubApi, Repository};

use crate::app::{App, Focus, StatusMessage};

/// Main draw function that renders the entire UI.
pub fn draw<A: GitHubApi, P: SnapshotStore>(frame: &mut Frame, app: &mut App<A, P>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Username input
            Constraint::Min(1),    // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let cached = app.store.is_user_cached(app.input.trim());
    input::draw_username_input(
        frame,
        &app.input,
        app.focus == Focus::Username,
        cached,
        chunks[0],
    );

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    draw_repositories(frame, app, panels[0]);
    list::render_branches_list(
        frame,
        &mut app.branches,
        app.repository.as_deref(),
        app.focus == Focus::Branches,
        panels[1],
    );

    draw_status_bar(frame, app, chunks[2]);

    // Help overlay (rendered last, on top of everything)
    if app.show_help {
        draw_help_overlay(frame);
    }
}

fn draw_repositories<A: GitHubApi, P: SnapshotStore>(
    frame: &mut Frame,
    app: &mut App<A, P>,
    area: Rect,
) {
    let focused = app.focus == Focus::Repositories;
    let username = app.username.as_deref();
    let store = &app.store;
    let branches_cached = |repo: &Repository| {
        username.is_some_and(|user| store.is_repository_cached(user, repo.name()))
    };
    list::render_repositories_list(frame, &mut app.repositories, branches_cached, focused, area);
}

/// Draw the status bar with the last message, keybinding hints, and rate limit.
fn draw_status_bar<A: GitHubApi, P: SnapshotStore>(frame: &mut Frame, app: &App<A, P>, area: Rect) {
    let mut spans = match &app.status {
        Some(StatusMessage::Error(message)) => {
            vec![Span::styled(
                format!(" {} ", message),
                Style::default().fg(Color::Red),
            )]
        }
        Some(StatusMessage::Info(message)) => {
            vec![Span::styled(
                format!(" {} ", message),
                Style::default().fg(Color::Green),
            )]
        }
        None => Vec::new(),
    };

    let hints: &[(&str, &str)] = match app.focus {
        Focus::Username => &[("↵", "Search"), ("Tab", "Results"), ("^C", "Quit")],
        Focus::Repositories => &[
            ("↑↓", "Navigate"),
            ("↵", "Branches"),
            ("r", "Refresh"),
            ("/", "Search"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
        Focus::Branches => &[
            ("↑↓", "Navigate"),
            ("Esc", "Back"),
            ("r", "Refresh"),
            ("?", "Help"),
            ("q", "Quit"),
        ],
    };
    spans.push(Span::styled(
        format!("[{}]", app.focus.title()),
        Style::default().fg(Color::Cyan),
    ));
    for (key, label) in hints {
        spans.push(Span::raw(format!("  {} ", key)));
        spans.push(Span::styled(*label, Style::default().fg(Color::DarkGray)));
    }

    // Add rate limit info on the right if known
    if let Some(rate) = app.store.api().rate_limit().filter(|rate| rate.limit > 0) {
        let rate_color = if rate.remaining < 10 {
            Color::Red
        } else if rate.remaining < 30 {
            Color::Yellow
        } else {
            Color::DarkGray
        };
        spans.push(Span::styled(
            format!("  API: {}/{}", rate.remaining, rate.limit),
            Style::default().fg(rate_color),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draw the help overlay.
fn draw_help_overlay(frame: &mut Frame) {
    let area = frame.area();

    // Create a centered popup
    let popup_width = 50.min(area.width);
    let popup_height = 17.min(area.height);
    let popup_x = (area.width.saturating_sub(popup_width)) / 2;
    let popup_y = (area.height.saturating_sub(popup_height)) / 2;

    let popup_area = Rect::new(popup_x, popup_y, popup_width, popup_height);

    // Clear the area behind the popup
    frame.render_widget(Clear, popup_area);

    let shortcuts = [
        ("  ↑/↓ or j/k    ", "Navigate list"),
        ("  Enter         ", "Search / show branches"),
        ("  Tab           ", "Next panel"),
        ("  Esc           ", "Previous panel / close help"),
        ("  /             ", "Edit username"),
        ("  r             ", "Refetch current list"),
        ("  ?             ", "Show/hide this help"),
        ("  q             ", "Quit from a list panel"),
        ("  Ctrl-C        ", "Quit from anywhere"),
    ];

    let mut help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from(""),
    ];
    help_text.extend(shortcuts.iter().map(|(key, action)| {
        Line::from(vec![
            Span::styled(*key, Style::default().fg(Color::Cyan)),
            Span::raw(*action),
        ])
    }));
    help_text.push(Line::from(""));
    help_text.push(Line::from(vec![Span::styled(
        "  ● branches cached locally",
        Style::default().fg(Color::Green),
    )]));
    help_text.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Yellow)),
        Span::styled(" or ", Style::default().fg(Color::DarkGray)),
        Span::styled("?", Style::default().fg(Color::Yellow)),
        Span::styled(" to close", Style::default().fg(Color::DarkGray)),
    ]));

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .title(" Help ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .alignment(Alignment::Left);

    frame.render_widget(help_paragraph, popup_area);
}
