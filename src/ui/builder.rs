//! Form builder view: palette, canvas, inspector

use crate::app::App;
use crate::state::{BuilderFocus, ElementType, FormElement};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn pane_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(frame, chunks[0], app);

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20),
            Constraint::Min(30),
            Constraint::Length(34),
        ])
        .split(chunks[1]);

    draw_palette(frame, panes[0], app);
    draw_canvas(frame, panes[1], app);
    draw_inspector(frame, panes[2], app);
    draw_help(frame, chunks[2], app);
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let builder = &app.state.builder;
    let title = if builder.title.is_empty() {
        "Untitled form"
    } else {
        &builder.title
    };

    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            title.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  [{}]", builder.status.label()),
            Style::default().fg(Color::Yellow),
        ),
        Span::styled(
            if builder.form_id.is_some() {
                "  editing"
            } else {
                "  new form"
            },
            Style::default().fg(Color::DarkGray),
        ),
    ]));
    frame.render_widget(header, area);
}

fn draw_palette(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.builder_focus == BuilderFocus::Palette;

    let items: Vec<ListItem> = ElementType::ALL
        .iter()
        .enumerate()
        .map(|(idx, element_type)| {
            let is_selected = idx == app.state.palette_index;
            let prefix = if is_selected && focused { "▸ " } else { "  " };
            let style = if is_selected && focused {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!("{prefix}{}", element_type.label()),
                style,
            )))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .title(" Palette ")
            .borders(Borders::ALL)
            .border_style(pane_border(focused)),
    );
    frame.render_widget(list, area);
}

fn element_line(element: &FormElement, marker: &str, style: Style) -> Line<'static> {
    let mut spans = vec![
        Span::styled(marker.to_string(), style),
        Span::styled(element.label.clone(), style),
        Span::styled(
            format!(" ({})", element.element_type.label()),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if element.required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    Line::from(spans)
}

fn draw_canvas(frame: &mut Frame, area: Rect, app: &App) {
    let builder = &app.state.builder;
    let focused = app.state.builder_focus == BuilderFocus::Canvas;

    if builder.elements.is_empty() {
        let content = Paragraph::new("Empty form.\nAdd elements from the palette (Enter).")
            .style(Style::default().fg(Color::DarkGray))
            .block(
                Block::default()
                    .title(" Canvas ")
                    .borders(Borders::ALL)
                    .border_style(pane_border(focused)),
            );
        frame.render_widget(content, area);
        return;
    }

    let selected = builder.selected_index();
    let items: Vec<ListItem> = builder
        .elements
        .iter()
        .enumerate()
        .map(|(idx, element)| {
            let is_selected = selected == Some(idx);
            let is_dragged = app.state.dragging && builder.drag_index == Some(idx);

            let (marker, style) = if is_dragged {
                ("≡ ", Style::default().fg(Color::Yellow))
            } else if is_selected && focused {
                ("▸ ", Style::default().fg(Color::Cyan))
            } else if is_selected {
                ("▸ ", Style::default())
            } else {
                ("  ", Style::default())
            };
            ListItem::new(element_line(element, marker, style))
        })
        .collect();

    let title = if app.state.dragging {
        " Canvas (dragging) "
    } else {
        " Canvas "
    };
    let list = List::new(items).block(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(pane_border(focused)),
    );
    frame.render_widget(list, area);
}

fn draw_inspector(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.state.builder_focus == BuilderFocus::Inspector;
    let block = Block::default()
        .title(" Inspector ")
        .borders(Borders::ALL)
        .border_style(pane_border(focused));

    let Some(inspector) = &app.state.inspector else {
        let content = Paragraph::new("Select an element on the canvas,\nor press Tab to edit form details.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    };

    let mut lines = Vec::new();
    for (idx, field) in inspector.fields.iter().enumerate() {
        let active = focused && idx == inspector.field_index;
        let label_style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        lines.push(Line::from(Span::styled(
            format!("{}:", field.label),
            label_style,
        )));

        let value = field.display_value();
        let display = if value.is_empty() && !active {
            "(empty)".to_string()
        } else {
            value
        };
        let cursor = if active { "▌" } else { "" };
        lines.push(Line::from(vec![
            Span::raw(format!("  {display}")),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]));
        lines.push(Line::raw(""));
    }

    if inspector.row_count() > inspector.fields.len() {
        let active = focused && inspector.on_required_row();
        let style = if active {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mark = if inspector.required { "x" } else { " " };
        lines.push(Line::from(Span::styled(
            format!("[{mark}] Required (Space)"),
            style,
        )));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_help(frame: &mut Frame, area: Rect, app: &App) {
    let help = match app.state.builder_focus {
        _ if app.state.dragging => "j/k move element  Enter/g drop  Esc cancel drag",
        BuilderFocus::Palette => "j/k choose  Enter add  Tab pane  Ctrl+s save  Esc back",
        BuilderFocus::Canvas => {
            "j/k select  J/K move  g drag  d delete  Tab pane  Ctrl+s save  Esc back"
        }
        BuilderFocus::Inspector => {
            "↑/↓ field  type to edit  Space required  Tab pane  Ctrl+s save  Esc back"
        }
    };
    frame.render_widget(
        Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
        area,
    );
}
