//! Application state definitions

use crate::state::builder::{BuilderState, Form, FormStatus};
use crate::state::forms::FormState;
use crate::state::inspector::InspectorState;
use crate::state::session::Session;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Login,
    Dashboard,
    Forms,
    Builder,
    Analytics,
    Schedules,
    ScheduleCreate,
    Users,
    UserCreate,
}

impl View {
    /// Views that capture free text input into a form
    pub fn is_form_view(self) -> bool {
        matches!(
            self,
            View::Login | View::UserCreate | View::ScheduleCreate | View::Builder
        )
    }
}

/// Sort field for the forms list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormSortField {
    #[default]
    UpdatedAt,
    Title,
    Status,
    Responses,
    CreatedAt,
}

impl FormSortField {
    pub fn next(&self) -> Self {
        match self {
            Self::UpdatedAt => Self::Title,
            Self::Title => Self::Status,
            Self::Status => Self::Responses,
            Self::Responses => Self::CreatedAt,
            Self::CreatedAt => Self::UpdatedAt,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::UpdatedAt => "Updated",
            Self::Title => "Title",
            Self::Status => "Status",
            Self::Responses => "Responses",
            Self::CreatedAt => "Created",
        }
    }
}

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Asc => "↑",
            Self::Desc => "↓",
        }
    }
}

/// Distribution cadence for a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Once,
    Daily,
    #[default]
    Weekly,
    Monthly,
}

impl Frequency {
    pub fn next(self) -> Self {
        match self {
            Self::Once => Self::Daily,
            Self::Daily => Self::Weekly,
            Self::Weekly => Self::Monthly,
            Self::Monthly => Self::Once,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Once => "once",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }
}

/// A scheduled form distribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schedule {
    pub id: String,
    pub form_id: String,
    pub form_title: String,
    pub recipients: Vec<String>,
    pub frequency: Frequency,
    pub send_hour: u32,
    pub next_run: DateTime<Utc>,
    pub active: bool,
}

/// Aggregate numbers for the dashboard cards
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total_forms: u32,
    pub active_forms: u32,
    pub total_responses: u32,
    pub total_users: u32,
    pub completion_rate: f64,
    /// Responses per day, oldest first (7 entries)
    pub responses_last_week: Vec<u32>,
}

/// Per-form analytics report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormReport {
    pub form_id: String,
    pub form_title: String,
    pub views: u32,
    pub submissions: u32,
    pub completion_rate: f64,
    /// Submissions per day, oldest first (14 entries)
    pub daily_submissions: Vec<u32>,
}

/// Which builder pane has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuilderFocus {
    #[default]
    Palette,
    Canvas,
    Inspector,
}

impl BuilderFocus {
    pub fn next(self) -> Self {
        match self {
            Self::Palette => Self::Canvas,
            Self::Canvas => Self::Inspector,
            Self::Inspector => Self::Palette,
        }
    }
}

/// What a pending confirmation dialog would delete
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteTarget {
    Form(String),
    User(String),
    Schedule(String),
}

/// State for the delete confirmation dialog
#[derive(Debug, Clone)]
pub struct PendingDelete {
    pub target: DeleteTarget,
    /// Display name shown in the dialog
    pub label: String,
    /// false = Cancel, true = Delete
    pub selected_option: bool,
}

impl PendingDelete {
    pub fn new(target: DeleteTarget, label: impl Into<String>) -> Self {
        Self {
            target,
            label: label.into(),
            selected_option: false,
        }
    }
}

/// Main application state
#[derive(Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Session
    pub session: Option<Session>,

    // Data
    pub forms: Vec<Form>,
    pub users: Vec<crate::state::session::User>,
    pub schedules: Vec<Schedule>,
    pub dashboard: Option<DashboardStats>,
    pub report: Option<FormReport>,

    // Selection
    pub selected_index: usize,
    pub scroll_offset: usize,

    // Sorting and filters
    pub form_sort_field: FormSortField,
    pub form_sort_direction: SortDirection,
    pub show_archived_forms: bool,

    // Builder
    pub builder: BuilderState,
    pub builder_focus: BuilderFocus,
    pub palette_index: usize,
    pub inspector: Option<InspectorState>,
    /// Keyboard drag mode active on the canvas
    pub dragging: bool,

    // Input forms
    pub form_state: FormState,

    // Dialogs
    pub errors: Vec<String>,
    pub pending_delete: Option<PendingDelete>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Reset selection
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.scroll_offset = 0;
    }

    /// Cycle the forms sort field
    pub fn cycle_form_sort_field(&mut self) {
        self.form_sort_field = self.form_sort_field.next();
        self.reset_selection();
    }

    /// Toggle the forms sort direction
    pub fn toggle_form_sort_direction(&mut self) {
        self.form_sort_direction = self.form_sort_direction.toggle();
        self.reset_selection();
    }

    /// Get sorted forms, honoring the archived filter
    pub fn sorted_forms(&self) -> Vec<&Form> {
        let mut forms: Vec<_> = self
            .forms
            .iter()
            .filter(|f| self.show_archived_forms || f.status != FormStatus::Archived)
            .collect();

        forms.sort_by(|a, b| {
            let cmp = match self.form_sort_field {
                FormSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                FormSortField::Title => a.title.cmp(&b.title),
                FormSortField::Status => a.status.label().cmp(b.status.label()),
                FormSortField::Responses => a.responses.cmp(&b.responses),
                FormSortField::CreatedAt => a.created_at.cmp(&b.created_at),
            };

            match self.form_sort_direction {
                SortDirection::Asc => cmp,
                SortDirection::Desc => cmp.reverse(),
            }
        });

        forms
    }

    /// Push an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }

    /// Dismiss the oldest error
    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::builder::ElementType;

    fn form(title: &str, status: FormStatus, responses: u32) -> Form {
        let mut builder = BuilderState::new();
        builder.title = title.to_string();
        builder.add_element(ElementType::Text);
        let mut form = builder.to_form();
        form.status = status;
        form.responses = responses;
        form
    }

    mod selection {
        use super::*;

        #[test]
        fn test_move_selection_down_respects_max() {
            let mut state = AppState::default();
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1);
            state.move_selection_down(2);
            assert_eq!(state.selected_index, 1); // Clamped
        }

        #[test]
        fn test_move_selection_down_with_zero_max() {
            let mut state = AppState::default();
            state.move_selection_down(0);
            assert_eq!(state.selected_index, 0);
        }

        #[test]
        fn test_move_selection_up_stops_at_zero() {
            let mut state = AppState::default();
            state.move_selection_up();
            assert_eq!(state.selected_index, 0);
        }

        #[test]
        fn test_reset_selection() {
            let mut state = AppState {
                selected_index: 4,
                scroll_offset: 7,
                ..Default::default()
            };
            state.reset_selection();
            assert_eq!(state.selected_index, 0);
            assert_eq!(state.scroll_offset, 0);
        }
    }

    mod sorting {
        use super::*;

        #[test]
        fn test_sorted_forms_hides_archived_by_default() {
            let mut state = AppState::default();
            state.forms = vec![
                form("a", FormStatus::Active, 1),
                form("b", FormStatus::Archived, 2),
            ];
            assert_eq!(state.sorted_forms().len(), 1);

            state.show_archived_forms = true;
            assert_eq!(state.sorted_forms().len(), 2);
        }

        #[test]
        fn test_sorted_forms_by_title_asc() {
            let mut state = AppState {
                form_sort_field: FormSortField::Title,
                form_sort_direction: SortDirection::Asc,
                ..Default::default()
            };
            state.forms = vec![
                form("zeta", FormStatus::Draft, 0),
                form("alpha", FormStatus::Draft, 0),
            ];
            let sorted = state.sorted_forms();
            assert_eq!(sorted[0].title, "alpha");
            assert_eq!(sorted[1].title, "zeta");
        }

        #[test]
        fn test_sorted_forms_by_responses_desc() {
            let mut state = AppState {
                form_sort_field: FormSortField::Responses,
                form_sort_direction: SortDirection::Desc,
                ..Default::default()
            };
            state.forms = vec![
                form("low", FormStatus::Draft, 3),
                form("high", FormStatus::Draft, 30),
            ];
            assert_eq!(state.sorted_forms()[0].title, "high");
        }

        #[test]
        fn test_cycle_sort_field_resets_selection() {
            let mut state = AppState {
                selected_index: 3,
                ..Default::default()
            };
            state.cycle_form_sort_field();
            assert_eq!(state.selected_index, 0);
            assert_eq!(state.form_sort_field, FormSortField::Title);
        }

        #[test]
        fn test_sort_field_cycle_returns_to_start() {
            let mut field = FormSortField::default();
            for _ in 0..5 {
                field = field.next();
            }
            assert_eq!(field, FormSortField::default());
        }

        #[test]
        fn test_sort_direction_toggle() {
            assert_eq!(SortDirection::Asc.toggle(), SortDirection::Desc);
            assert_eq!(SortDirection::Desc.toggle(), SortDirection::Asc);
        }
    }

    mod errors {
        use super::*;

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            state.push_error("first".to_string());
            state.push_error("second".to_string());
            assert!(state.has_errors());
            assert_eq!(state.current_error(), Some("first"));

            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));

            state.dismiss_error();
            assert!(!state.has_errors());
        }

        #[test]
        fn test_dismiss_on_empty_queue_is_noop() {
            let mut state = AppState::default();
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }

    mod frequency {
        use super::*;

        #[test]
        fn test_cycle_returns_to_start() {
            let mut f = Frequency::Once;
            for _ in 0..4 {
                f = f.next();
            }
            assert_eq!(f, Frequency::Once);
        }

        #[test]
        fn test_serializes_lowercase() {
            assert_eq!(
                serde_json::to_string(&Frequency::Monthly).unwrap(),
                "\"monthly\""
            );
        }
    }

    mod builder_focus {
        use super::*;

        #[test]
        fn test_focus_cycles_through_panes() {
            let mut focus = BuilderFocus::Palette;
            focus = focus.next();
            assert_eq!(focus, BuilderFocus::Canvas);
            focus = focus.next();
            assert_eq!(focus, BuilderFocus::Inspector);
            focus = focus.next();
            assert_eq!(focus, BuilderFocus::Palette);
        }
    }

    mod view {
        use super::*;

        #[test]
        fn test_form_views_flagged() {
            assert!(View::Login.is_form_view());
            assert!(View::Builder.is_form_view());
            assert!(View::UserCreate.is_form_view());
            assert!(View::ScheduleCreate.is_form_view());
            assert!(!View::Dashboard.is_form_view());
            assert!(!View::Forms.is_form_view());
        }
    }
}
