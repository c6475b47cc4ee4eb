//! Login view

use super::input::draw_field;
use crate::app::App;
use crate::state::FormState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Draw the login screen (no sidebar around it)
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::Login(form) = &app.state.form_state else {
        return;
    };

    // Center a fixed-size card
    let card_width = 48u16.min(area.width);
    let card_height = 14u16.min(area.height);
    let card = Rect {
        x: area.x + (area.width.saturating_sub(card_width)) / 2,
        y: area.y + (area.height.saturating_sub(card_height)) / 2,
        width: card_width,
        height: card_height,
    };

    let block = Block::default()
        .title(" FormDeck ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(block, card);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading
            Constraint::Length(3), // Email
            Constraint::Length(3), // Password
            Constraint::Length(2), // Help
            Constraint::Min(0),
        ])
        .margin(1)
        .split(card);

    let heading = Paragraph::new(Line::from(Span::styled(
        "Sign in to continue",
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(heading, chunks[0]);

    draw_field(
        frame,
        chunks[1],
        &form.email.label,
        &form.email.display_value(),
        form.active_field_index == 0,
    );
    draw_field(
        frame,
        chunks[2],
        &form.password.label,
        &form.password.display_value(),
        form.active_field_index == 1,
    );

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Tab", Style::default().fg(Color::Cyan)),
        Span::raw(": next field  "),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(": sign in"),
    ]))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}
