//! Analytics view: per-form report picker and chart

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Sparkline},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(32), Constraint::Min(0)])
        .split(area);

    draw_form_picker(frame, chunks[0], app);
    draw_report(frame, chunks[1], app);
}

fn draw_form_picker(frame: &mut Frame, area: Rect, app: &App) {
    let forms = app.state.sorted_forms();

    if forms.is_empty() {
        let content = Paragraph::new("No forms to report on.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Forms ").borders(Borders::ALL));
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = forms
        .iter()
        .enumerate()
        .map(|(idx, form)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{prefix}{}", form.title), style),
                Span::styled(
                    format!(" ({})", form.responses),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Forms (Enter: report) ")
            .borders(Borders::ALL),
    );
    frame.render_widget(list, area);
}

fn draw_report(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default().title(" Report ").borders(Borders::ALL);

    let Some(report) = &app.state.report else {
        let content = Paragraph::new("Select a form and press Enter to\ngenerate its report.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Min(5),
        ])
        .split(inner);

    let summary = vec![
        Line::from(Span::styled(
            report.form_title.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Views ", Style::default().fg(Color::DarkGray)),
            Span::raw(report.views.to_string()),
            Span::styled("   Submissions ", Style::default().fg(Color::DarkGray)),
            Span::raw(report.submissions.to_string()),
            Span::styled("   Completion ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{:.0}%", report.completion_rate * 100.0),
                Style::default().fg(Color::Green),
            ),
        ]),
    ];
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    frame.render_widget(
        Paragraph::new("Submissions, last 14 days:")
            .style(Style::default().fg(Color::DarkGray)),
        chunks[1],
    );

    let data: Vec<u64> = report.daily_submissions.iter().map(|&v| v as u64).collect();
    let chart = Sparkline::default()
        .data(&data)
        .style(Style::default().fg(Color::Cyan));
    frame.render_widget(chart, chunks[2]);
}
