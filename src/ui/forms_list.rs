//! Forms list view

use crate::app::App;
use crate::state::{permitted, FormStatus, Role};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn status_color(status: FormStatus) -> Color {
    match status {
        FormStatus::Draft => Color::Yellow,
        FormStatus::Active => Color::Green,
        FormStatus::Archived => Color::DarkGray,
    }
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let sorted_forms = app.state.sorted_forms();
    let can_edit = permitted(app.state.session.as_ref(), Role::Editor);

    let archived_count = app
        .state
        .forms
        .iter()
        .filter(|f| f.status == FormStatus::Archived)
        .count();
    let filter_label = if archived_count > 0 {
        if app.state.show_archived_forms {
            format!("({archived_count} archived)")
        } else {
            format!("(hiding {archived_count} archived)")
        }
    } else {
        String::new()
    };

    if sorted_forms.is_empty() {
        let message = if can_edit {
            "No forms yet.\nPress 'n' to build a new form."
        } else {
            "No forms yet."
        };
        let content = Paragraph::new(message)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Forms ").borders(Borders::ALL));
        frame.render_widget(content, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    // Header with sort info
    let sort_label = format!(
        "Sort: {} {}",
        app.state.form_sort_field.label(),
        app.state.form_sort_direction.symbol()
    );
    let header = Paragraph::new(Line::from(vec![
        Span::styled(sort_label, Style::default().fg(Color::Cyan)),
        Span::styled(" [s]cycle [S]dir", Style::default().fg(Color::DarkGray)),
        Span::raw(" | "),
        Span::styled(filter_label, Style::default().fg(Color::DarkGray)),
        Span::styled(" [a]toggle", Style::default().fg(Color::DarkGray)),
    ]));
    frame.render_widget(header, chunks[0]);

    let items: Vec<ListItem> = sorted_forms
        .iter()
        .enumerate()
        .map(|(idx, form)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸" } else { " " };
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let line = Line::from(vec![
                Span::styled(prefix, style),
                Span::styled(
                    format!("[{}]", form.status.label()),
                    Style::default().fg(status_color(form.status)),
                ),
                Span::raw(" "),
                Span::styled(form.title.clone(), style),
                Span::styled(
                    format!("  {} elements, {} responses", form.elements.len(), form.responses),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);
            ListItem::new(line)
        })
        .collect();

    let list = List::new(items).block(Block::default().title(" Forms ").borders(Borders::ALL));
    frame.render_widget(list, chunks[1]);

    let mut help = vec![
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::raw(": open  "),
    ];
    if can_edit {
        help.extend([
            Span::styled("n", Style::default().fg(Color::Cyan)),
            Span::raw(": new  "),
            Span::styled("t", Style::default().fg(Color::Cyan)),
            Span::raw(": cycle status  "),
            Span::styled("d", Style::default().fg(Color::Cyan)),
            Span::raw(": delete  "),
        ]);
    }
    help.extend([
        Span::styled("p", Style::default().fg(Color::Cyan)),
        Span::raw(": report"),
    ]);
    frame.render_widget(
        Paragraph::new(Line::from(help)).style(Style::default().fg(Color::DarkGray)),
        chunks[2],
    );
}
