//! Dashboard view with aggregate cards

use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Sparkline},
    Frame,
};

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(stats) = &app.state.dashboard else {
        let placeholder = Paragraph::new("Loading dashboard…")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Dashboard ").borders(Borders::ALL));
        frame.render_widget(placeholder, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Cards
            Constraint::Min(6),    // Responses chart
            Constraint::Length(1), // Help
        ])
        .split(area);

    draw_cards(frame, chunks[0], stats);

    let spark = Sparkline::default()
        .data(
            &stats
                .responses_last_week
                .iter()
                .map(|&v| u64::from(v))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .title(" Responses, last 7 days ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
    frame.render_widget(spark, chunks[1]);

    let help = Paragraph::new(Line::from(Span::styled(
        "r refresh  2 forms  3 analytics  4 schedules",
        Style::default().fg(Color::DarkGray),
    )));
    frame.render_widget(help, chunks[2]);
}

fn draw_cards(frame: &mut Frame, area: Rect, stats: &crate::state::DashboardStats) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
            Constraint::Ratio(1, 5),
        ])
        .split(area);

    let values = [
        ("Forms", stats.total_forms.to_string(), Color::Cyan),
        ("Active", stats.active_forms.to_string(), Color::Green),
        ("Responses", stats.total_responses.to_string(), Color::Yellow),
        ("Users", stats.total_users.to_string(), Color::Magenta),
        (
            "Completion",
            format!("{:.0}%", stats.completion_rate * 100.0),
            Color::Blue,
        ),
    ];

    for (i, (title, value, color)) in values.iter().enumerate() {
        let card = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                value.clone(),
                Style::default().fg(*color).add_modifier(Modifier::BOLD),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .title(format!(" {title} "))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(card, cards[i]);
    }
}
