//! UI rendering

mod analytics;
mod builder;
mod components;
mod dashboard;
mod forms_list;
mod input;
mod layout;
mod login;
mod schedules;
mod users;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog};
use ratatui::Frame;

/// Render the whole UI for one frame
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Login fills the screen, no chrome around it
    if app.state.current_view == View::Login {
        login::draw(frame, area, app);
        draw_dialogs(frame, app);
        return;
    }

    let (sidebar, main) = layout::create_layout(area);
    layout::draw_sidebar(frame, sidebar, app);

    match app.state.current_view {
        View::Login => {}
        View::Dashboard => dashboard::draw(frame, main, app),
        View::Forms => forms_list::draw(frame, main, app),
        View::Builder => builder::draw(frame, main, app),
        View::Analytics => analytics::draw(frame, main, app),
        View::Schedules => schedules::draw(frame, main, app),
        View::ScheduleCreate => schedules::draw_create(frame, main, app),
        View::Users => users::draw(frame, main, app),
        View::UserCreate => users::draw_create(frame, main, app),
    }

    layout::draw_status_bar(frame, app);
    draw_dialogs(frame, app);
}

/// Modal dialogs render last, on top of everything
fn draw_dialogs(frame: &mut Frame, app: &App) {
    if let Some(pending) = &app.state.pending_delete {
        render_confirm_dialog(frame, pending);
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    }
}
