//! Schedules view: distribution list and the create form

use super::input::{draw_field, draw_picker};
use crate::app::App;
use crate::state::{permitted, FormState, InputForm, Role, Schedule};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn schedule_line(schedule: &Schedule, is_selected: bool) -> Line<'static> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let style = if is_selected {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let (state_label, state_color) = if schedule.active {
        ("on ", Color::Green)
    } else {
        ("off", Color::DarkGray)
    };

    Line::from(vec![
        Span::styled(prefix.to_string(), style),
        Span::styled(format!("[{state_label}]"), Style::default().fg(state_color)),
        Span::raw(" "),
        Span::styled(schedule.form_title.clone(), style),
        Span::styled(
            format!(
                "  {} at {:02}:00, {} recipients",
                schedule.frequency.label(),
                schedule.send_hour,
                schedule.recipients.len()
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("  next {}", schedule.next_run.format("%Y-%m-%d %H:%M")),
            Style::default().fg(Color::DarkGray),
        ),
    ])
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let can_edit = permitted(app.state.session.as_ref(), Role::Editor);

    if app.state.schedules.is_empty() {
        let message = if can_edit {
            "No schedules yet.\nPress 'n' to schedule a form distribution."
        } else {
            "No schedules yet."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Schedules ").borders(Borders::ALL));
        frame.render_widget(content, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let items: Vec<ListItem> = app
        .state
        .schedules
        .iter()
        .enumerate()
        .map(|(idx, schedule)| {
            ListItem::new(schedule_line(schedule, idx == app.state.selected_index))
        })
        .collect();

    let list =
        List::new(items).block(Block::default().title(" Schedules ").borders(Borders::ALL));
    frame.render_widget(list, chunks[0]);

    let mut help = Vec::new();
    if can_edit {
        help.extend([
            Span::styled("n", Style::default().fg(Color::Cyan)),
            Span::raw(": new  "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(": pause/resume  "),
            Span::styled("d", Style::default().fg(Color::Cyan)),
            Span::raw(": delete"),
        ]);
    }
    frame.render_widget(
        Paragraph::new(Line::from(help)).style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );
}

/// Draw the schedule creation form
pub fn draw_create(frame: &mut Frame, area: Rect, app: &App) {
    let FormState::ScheduleCreate(form) = &app.state.form_state else {
        return;
    };

    let block = Block::default()
        .title(format!(" Schedule: {} ", form.form_title))
        .borders(Borders::ALL);
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
        &form.recipients.label,
        &form.recipients.display_value(),
        form.active_field() == 0,
    );
    draw_field(
        frame,
        chunks[1],
        &form.send_hour.label,
        &form.send_hour.display_value(),
        form.active_field() == 1,
    );
    draw_picker(
        frame,
        chunks[2],
        "Frequency",
        form.frequency.label(),
        "(Ctrl+f cycles)",
    );

    frame.render_widget(
        Paragraph::new("Tab next field  Enter create  Esc cancel")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[4],
    );
}
