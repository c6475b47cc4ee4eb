//! Layout components (sidebar, status bar)

use crate::app::App;
use crate::state::{permitted, Role, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Sidebar width in columns
pub const SIDEBAR_WIDTH: u16 = 18;

/// Sidebar items with the view each activates
const SIDEBAR_ITEMS: &[(&str, View)] = &[
    ("Dashboard", View::Dashboard),
    ("Forms", View::Forms),
    ("Analytics", View::Analytics),
    ("Schedules", View::Schedules),
    ("Users", View::Users),
];

/// Create the main layout with sidebar; returns (sidebar, main content)
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Which sidebar entry a view belongs to
fn sidebar_view(view: View) -> View {
    match view {
        View::Builder => View::Forms,
        View::ScheduleCreate => View::Schedules,
        View::UserCreate => View::Users,
        other => other,
    }
}

/// Draw the sidebar navigation
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.state.session.as_ref();
    let active = sidebar_view(app.state.current_view);

    let items: Vec<ListItem> = SIDEBAR_ITEMS
        .iter()
        .map(|(label, view)| {
            // Users management is admin-only
            let enabled = *view != View::Users || permitted(session, Role::Admin);
            let is_active = *view == active;

            let style = if is_active {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else if enabled {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            let prefix = if is_active { "▸ " } else { "  " };
            ListItem::new(Line::from(Span::styled(format!("{prefix}{label}"), style)))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" FormDeck ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(list, area);
}

/// Draw the status bar at the bottom of the screen
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: area.x,
        y: area.y + area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = Vec::new();
    if let Some(session) = &app.state.session {
        spans.push(Span::styled(
            format!(" {} ({}) ", session.user.name, session.user.role.label()),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled("| ", Style::default().fg(Color::DarkGray)));
    }

    if let Some(message) = &app.status_message {
        spans.push(Span::styled(
            message.clone(),
            Style::default().fg(Color::Green),
        ));
    } else {
        spans.push(Span::styled(
            "1-5 switch view  L logout  q quit",
            Style::default().fg(Color::DarkGray),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), status_area);
}
