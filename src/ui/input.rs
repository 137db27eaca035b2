// Username input bar.
// Shows the typed username, a cursor when focused, and whether the name is already cached.

use ratatui::{prelude::*, widgets::*};

/// Draw the username input.
pub fn draw_username_input(frame: &mut Frame, input: &str, focused: bool, cached: bool, area: Rect) {
    let border_color = if focused { Color::Cyan } else { Color::DarkGray };

    let mut title = vec![Span::styled(
        " gitpeek ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if cached {
        title.push(Span::styled("(cached) ", Style::default().fg(Color::Green)));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .title(Line::from(title));

    let mut line = vec![
        Span::styled("Username: ", Style::default().fg(Color::DarkGray)),
        Span::raw(input),
    ];
    if focused {
        line.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    } else if input.is_empty() {
        line.push(Span::styled(
            "press / to search",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(line)).block(block), area);
}
