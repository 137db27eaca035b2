// List rendering for the repository and branch panels.
// Provides styled list views with loading, error, and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use gitpeek::github::{Branch, Repository};

use crate::state::{LoadingState, SelectableList};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

fn panel(title: &str, focused: bool) -> Block<'_> {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(title)
}

fn render_message(frame: &mut Frame, area: Rect, block: Block, text: String, color: Color) {
    let paragraph = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color))
        .wrap(Wrap { trim: true })
        .block(block);
    frame.render_widget(paragraph, area);
}

fn render_items(
    frame: &mut Frame,
    area: Rect,
    block: Block,
    items: Vec<ListItem>,
    state: &mut ListState,
) {
    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, state);
}

/// Render repositories list. `branches_cached` marks repositories whose branches
/// are already in the cache.
pub fn render_repositories_list(
    frame: &mut Frame,
    list: &mut SelectableList<Repository>,
    branches_cached: impl Fn(&Repository) -> bool,
    focused: bool,
    area: Rect,
) {
    let title = if list.data.is_loaded() {
        format!(" Repositories ({}) ", list.len())
    } else {
        " Repositories ".to_string()
    };
    let block = panel(&title, focused);

    match &list.data {
        LoadingState::Idle => render_message(
            frame,
            area,
            block,
            "Type a username and press Enter".to_string(),
            Color::DarkGray,
        ),
        LoadingState::Loading => render_message(
            frame,
            area,
            block,
            "⏳ Loading repositories...".to_string(),
            Color::Yellow,
        ),
        LoadingState::Error(e) => render_message(frame, area, block, format!("❌ {}", e), Color::Red),
        LoadingState::Loaded(repos) if repos.is_empty() => render_message(
            frame,
            area,
            block,
            "No public repositories".to_string(),
            Color::DarkGray,
        ),
        LoadingState::Loaded(repos) => {
            let items: Vec<ListItem> = repos
                .iter()
                .map(|repo| {
                    let visibility = if repo.is_private() { "🔒" } else { "🌐" };
                    let mut spans = vec![
                        Span::raw(format!("{} ", visibility)),
                        Span::styled(repo.name().to_string(), Style::default().fg(Color::Cyan)),
                    ];
                    if repo.is_fork() {
                        spans.push(Span::styled(" (fork)", Style::default().fg(Color::DarkGray)));
                    }
                    if let Some(language) = repo.language() {
                        spans.push(Span::styled(
                            format!("  {}", language),
                            Style::default().fg(Color::Magenta),
                        ));
                    }
                    if let Some(stars) = repo.stargazers_count() {
                        spans.push(Span::styled(
                            format!("  ★{}", stars),
                            Style::default().fg(Color::Yellow),
                        ));
                    }
                    if let Some(updated_at) = repo.updated_at() {
                        spans.push(Span::styled(
                            format!("  {}", format_relative_time(&updated_at)),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    if branches_cached(repo) {
                        spans.push(Span::styled(" ●", Style::default().fg(Color::Green)));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();

            render_items(frame, area, block, items, &mut list.list_state);
        }
    }
}

/// Render branches list for `repository`.
pub fn render_branches_list(
    frame: &mut Frame,
    list: &mut SelectableList<Branch>,
    repository: Option<&str>,
    focused: bool,
    area: Rect,
) {
    let title = match repository {
        Some(repo) => format!(" Branches · {} ", repo),
        None => " Branches ".to_string(),
    };
    let block = panel(&title, focused);

    match &list.data {
        LoadingState::Idle => render_message(
            frame,
            area,
            block,
            "Select a repository and press Enter".to_string(),
            Color::DarkGray,
        ),
        LoadingState::Loading => render_message(
            frame,
            area,
            block,
            "⏳ Loading branches...".to_string(),
            Color::Yellow,
        ),
        LoadingState::Error(e) => render_message(frame, area, block, format!("❌ {}", e), Color::Red),
        LoadingState::Loaded(branches) if branches.is_empty() => render_message(
            frame,
            area,
            block,
            "No branches".to_string(),
            Color::DarkGray,
        ),
        LoadingState::Loaded(branches) => {
            let items: Vec<ListItem> = branches
                .iter()
                .map(|branch| {
                    let mut spans = vec![Span::styled(
                        branch.name().to_string(),
                        Style::default().fg(Color::Cyan),
                    )];
                    if let Some(sha) = branch.short_sha() {
                        spans.push(Span::styled(
                            format!("  {}", sha),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    if branch.is_protected() {
                        spans.push(Span::styled(" 🛡", Style::default().fg(Color::Yellow)));
                    }
                    ListItem::new(Line::from(spans))
                })
                .collect();

            render_items(frame, area, block, items, &mut list.list_state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_relative_time() {
        let now = Utc::now();
        assert_eq!(format_relative_time(&now), "just now");
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::minutes(5))),
            "5m ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::hours(3))),
            "3h ago"
        );
        assert_eq!(
            format_relative_time(&(now - chrono::Duration::days(2))),
            "2d ago"
        );
    }
}
