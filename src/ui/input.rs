//! Shared input-field rendering for the form views

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Draw a single input field with its border and cursor
pub fn draw_field(frame: &mut Frame, area: Rect, label: &str, value: &str, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };
    let cursor = if is_active { "▌" } else { "" };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_value.to_string(), style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Draw a read-only picker field (cycled with a key, not typed)
pub fn draw_picker(frame: &mut Frame, area: Rect, label: &str, value: &str, hint: &str) {
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    let content = Paragraph::new(Line::from(vec![
        Span::styled(value.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(format!("  {hint}"), Style::default().fg(Color::DarkGray)),
    ]));

    frame.render_widget(content.block(block), area);
}
