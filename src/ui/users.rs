//! Users view: account list and the create form (admin-only)

use super::input::{draw_field, draw_picker};
use crate::app::App;
use crate::state::{FormState, InputForm, Role, User};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn role_color(role: Role) -> Color {
    match role {
        Role::Admin => Color::Magenta,
        Role::Editor => Color::Cyan,
        Role::Viewer => Color::White,
    }
}

fn user_line(user: &User, is_selected: bool) -> Line<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(prefix.to_string(), style),
        Span::styled(
            format!("[{:<6}]", user.role.label()),
            Style::default().fg(role_color(user.role)),
        ),
        Span::raw(" "),
        Span::styled(user.name.clone(), style),
        Span::styled(
            format!("  {}", user.email),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if !user.active {
        spans.push(Span::styled(
            "  (disabled)",
            Style::default().fg(Color::Red),
        ));
    }
    Line::from(spans)
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let items: Vec<ListItem> = app
        .state
        .users
        .iter()
        .enumerate()
        .map(|(idx, user)| ListItem::new(user_line(user, idx == app.state.selected_index)))
        .collect();

    let list = List::new(items).block(Block::default().title(" Users ").borders(Borders::ALL));
    frame.render_widget(list, chunks[0]);

    let help = Line::from(vec![
        Span::styled("n", Style::default().fg(Color::Cyan)),
        Span::raw(": new  "),
        Span::styled("r", Style::default().fg(Color::Cyan)),
        Span::raw(": cycle role  "),
        Span::styled("d", Style::default().fg(Color::Cyan)),
        Span::raw(": delete"),
    ]);
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

/// Draw the user creation form
pub fn draw_create(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::UserCreate(form) = &app.state.form_state else {
        return;
    };

    let block = Block::default().title(" New User ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_field(
        frame,
        chunks[0],
        &form.name.label,
        &form.name.display_value(),
        form.active_field() == 0,
    );
    draw_field(
        frame,
        chunks[1],
        &form.email.label,
        &form.email.display_value(),
        form.active_field() == 1,
    );
    draw_picker(frame, chunks[2], "Role", form.role.label(), "(Ctrl+r cycles)");

    frame.render_widget(
        Paragraph::new("Tab next field  Enter create  Esc cancel")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}
