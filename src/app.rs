//! Application state and core logic

use crate::backend::{BackendClient, MockBackend};
use crate::config::{SessionStore, TuiConfig};
use crate::state::{
    looks_like_email, AppState, BuilderFocus, BuilderState, DeleteTarget, ElementType, FormState,
    FormStatus, InputForm, InspectorState, InspectorTarget, LoginForm, MoveDirection,
    PendingDelete, ScheduleCreateForm, UserCreateForm, permitted, Role, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::Duration;
use tracing::warn;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Simulated backend the whole demo runs against
    pub backend: MockBackend,
    /// Whether the app should quit
    quit: bool,
    /// One-shot feedback message for the status bar
    pub status_message: Option<String>,
    /// Config as loaded at startup, re-saved with current prefs on exit
    config: TuiConfig,
}

impl App {
    /// Create a new App instance, restoring config and any persisted session
    pub async fn new() -> Result<Self> {
        let config = TuiConfig::load().unwrap_or_else(|e| {
            warn!("failed to load config: {e}");
            TuiConfig::default()
        });

        let backend = match config.backend_latency_ms {
            Some(ms) => MockBackend::with_latency(Duration::from_millis(ms)),
            None => MockBackend::new(),
        };

        let mut app = Self::with_backend(backend);
        app.apply_config(&config);
        app.config = config;

        // A persisted session skips the login screen, like the demo's
        // remembered browser session
        if let Some(session) = SessionStore::load() {
            app.state.session = Some(session);
            app.state.current_view = View::Dashboard;
            app.refresh_all().await;
        }

        Ok(app)
    }

    /// Create an App over an existing backend, starting at the login screen
    pub fn with_backend(backend: MockBackend) -> Self {
        let mut state = AppState::default();
        state.current_view = View::Login;
        state.form_state = FormState::Login(LoginForm::new());

        Self {
            state,
            backend,
            quit: false,
            status_message: None,
            config: TuiConfig::default(),
        }
    }

    /// Re-save the config with the current list preferences
    pub fn save_preferences(&self) {
        use crate::state::{FormSortField, SortDirection};

        let mut config = self.config.clone();
        config.form_sort_field = Some(
            match self.state.form_sort_field {
                FormSortField::UpdatedAt => "updated",
                FormSortField::Title => "title",
                FormSortField::Status => "status",
                FormSortField::Responses => "responses",
                FormSortField::CreatedAt => "created",
            }
            .to_string(),
        );
        config.form_sort_direction = Some(
            match self.state.form_sort_direction {
                SortDirection::Asc => "asc",
                SortDirection::Desc => "desc",
            }
            .to_string(),
        );
        config.show_archived_forms = Some(self.state.show_archived_forms);

        if let Err(e) = config.save() {
            warn!("failed to save config: {e}");
        }
    }

    fn apply_config(&mut self, config: &TuiConfig) {
        use crate::state::{FormSortField, SortDirection};

        if let Some(field) = config.form_sort_field.as_deref() {
            self.state.form_sort_field = match field {
                "title" => FormSortField::Title,
                "status" => FormSortField::Status,
                "responses" => FormSortField::Responses,
                "created" => FormSortField::CreatedAt,
                _ => FormSortField::UpdatedAt,
            };
        }
        if let Some(direction) = config.form_sort_direction.as_deref() {
            self.state.form_sort_direction = match direction {
                "asc" => SortDirection::Asc,
                _ => SortDirection::Desc,
            };
        }
        if let Some(show) = config.show_archived_forms {
            self.state.show_archived_forms = show;
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    // ===== Data loading =====

    async fn refresh_forms(&mut self) {
        match self.backend.list_forms().await {
            Ok(forms) => self.state.forms = forms,
            Err(e) => self.push_error(format!("Failed to load forms: {e}")),
        }
    }

    async fn refresh_users(&mut self) {
        match self.backend.list_users().await {
            Ok(users) => self.state.users = users,
            Err(e) => self.push_error(format!("Failed to load users: {e}")),
        }
    }

    async fn refresh_schedules(&mut self) {
        match self.backend.list_schedules().await {
            Ok(schedules) => self.state.schedules = schedules,
            Err(e) => self.push_error(format!("Failed to load schedules: {e}")),
        }
    }

    async fn refresh_dashboard(&mut self) {
        match self.backend.dashboard_stats().await {
            Ok(stats) => self.state.dashboard = Some(stats),
            Err(e) => self.push_error(format!("Failed to load dashboard: {e}")),
        }
    }

    async fn refresh_all(&mut self) {
        self.refresh_forms().await;
        self.refresh_schedules().await;
        self.refresh_dashboard().await;
        if permitted(self.state.session.as_ref(), Role::Admin) {
            self.refresh_users().await;
        }
    }

    // ===== Navigation =====

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
        self.state.reset_selection();
    }

    /// Go back to previous view, skipping form views in the history
    pub fn go_back(&mut self) {
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            self.state.reset_selection();
            return;
        }
    }

    /// Navigate to a top-level view, loading its data first
    async fn open_view(&mut self, view: View) {
        match view {
            View::Dashboard => self.refresh_dashboard().await,
            View::Forms | View::Analytics => self.refresh_forms().await,
            View::Schedules => self.refresh_schedules().await,
            View::Users => {
                if !permitted(self.state.session.as_ref(), Role::Admin) {
                    return;
                }
                self.refresh_users().await;
            }
            _ => {}
        }
        self.navigate(view);
    }

    // ===== Key handling =====

    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Delete confirmation dialog (modal)
        if self.state.pending_delete.is_some() {
            self.handle_confirm_dialog_key(key).await;
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.quit = true;
            return Ok(());
        }

        // Global shortcuts outside text-entry views
        if !self.state.current_view.is_form_view() {
            match key.code {
                KeyCode::Char('q') => {
                    self.quit = true;
                    return Ok(());
                }
                KeyCode::Char('1') => {
                    self.open_view(View::Dashboard).await;
                    return Ok(());
                }
                KeyCode::Char('2') => {
                    self.open_view(View::Forms).await;
                    return Ok(());
                }
                KeyCode::Char('3') => {
                    self.open_view(View::Analytics).await;
                    return Ok(());
                }
                KeyCode::Char('4') => {
                    self.open_view(View::Schedules).await;
                    return Ok(());
                }
                KeyCode::Char('5') => {
                    if permitted(self.state.session.as_ref(), Role::Admin) {
                        self.open_view(View::Users).await;
                    }
                    return Ok(());
                }
                KeyCode::Char('L') => {
                    self.logout();
                    return Ok(());
                }
                KeyCode::Esc => {
                    self.go_back();
                    return Ok(());
                }
                _ => {}
            }
        }

        match self.state.current_view {
            View::Login => self.handle_login_key(key).await,
            View::Dashboard => self.handle_dashboard_key(key).await,
            View::Forms => self.handle_forms_key(key).await,
            View::Builder => self.handle_builder_key(key).await,
            View::Analytics => self.handle_analytics_key(key).await,
            View::Schedules => self.handle_schedules_key(key).await,
            View::ScheduleCreate => self.handle_schedule_create_key(key).await,
            View::Users => self.handle_users_key(key).await,
            View::UserCreate => self.handle_user_create_key(key).await,
        }
        Ok(())
    }

    async fn handle_confirm_dialog_key(&mut self, key: KeyEvent) {
        let Some(pending) = &mut self.state.pending_delete else {
            return;
        };
        match key.code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::Char('h')
            | KeyCode::Char('l') => {
                pending.selected_option = !pending.selected_option;
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                self.state.pending_delete = None;
            }
            KeyCode::Char('y') => {
                let target = pending.target.clone();
                self.state.pending_delete = None;
                self.execute_delete(target).await;
            }
            KeyCode::Enter => {
                let confirmed = pending.selected_option;
                let target = pending.target.clone();
                self.state.pending_delete = None;
                if confirmed {
                    self.execute_delete(target).await;
                }
            }
            _ => {}
        }
    }

    async fn execute_delete(&mut self, target: DeleteTarget) {
        let result = match &target {
            DeleteTarget::Form(id) => self.backend.delete_form(id).await,
            DeleteTarget::User(id) => self.backend.delete_user(id).await,
            DeleteTarget::Schedule(id) => self.backend.delete_schedule(id).await,
        };
        if let Err(e) = result {
            self.push_error(format!("Delete failed: {e}"));
            return;
        }
        match target {
            DeleteTarget::Form(_) => {
                self.refresh_forms().await;
                // Deleting a form removes its schedules too
                self.refresh_schedules().await;
                self.status_message = Some("Form deleted".to_string());
            }
            DeleteTarget::User(_) => {
                self.refresh_users().await;
                self.status_message = Some("User deleted".to_string());
            }
            DeleteTarget::Schedule(_) => {
                self.refresh_schedules().await;
                self.status_message = Some("Schedule deleted".to_string());
            }
        }
        self.state.reset_selection();
    }

    // ===== Login / logout =====

    async fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Tab | KeyCode::Down => self.state.form_state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form_state.prev_field(),
            KeyCode::Enter => self.attempt_login().await,
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    async fn attempt_login(&mut self) {
        let FormState::Login(form) = &self.state.form_state else {
            return;
        };
        let email = form.email.as_text().to_string();
        let password = form.password.as_text().to_string();

        if !looks_like_email(&email) {
            self.push_error("Enter a valid email address");
            return;
        }

        match self.backend.login(&email, &password).await {
            Ok(session) => {
                if let Err(e) = SessionStore::save(&session) {
                    warn!("failed to persist session: {e}");
                }
                self.state.session = Some(session);
                self.state.form_state = FormState::None;
                self.state.view_history.clear();
                self.state.current_view = View::Dashboard;
                self.refresh_all().await;
            }
            Err(e) => self.push_error(e.to_string()),
        }
    }

    /// Drop the session and return to the login screen
    fn logout(&mut self) {
        if let Err(e) = SessionStore::clear() {
            warn!("failed to clear persisted session: {e}");
        }
        self.state = AppState::default();
        self.state.current_view = View::Login;
        self.state.form_state = FormState::Login(LoginForm::new());
    }

    // ===== Dashboard =====

    async fn handle_dashboard_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('r') {
            self.refresh_all().await;
            self.status_message = Some("Refreshed".to_string());
        }
    }

    // ===== Forms list =====

    fn can_edit(&self) -> bool {
        permitted(self.state.session.as_ref(), Role::Editor)
    }

    fn selected_form_id(&self) -> Option<String> {
        self.state
            .sorted_forms()
            .get(self.state.selected_index)
            .map(|f| f.id.clone())
    }

    async fn handle_forms_key(&mut self, key: KeyEvent) {
        let total = self.state.sorted_forms().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('s') => self.state.cycle_form_sort_field(),
            KeyCode::Char('S') => self.state.toggle_form_sort_direction(),
            KeyCode::Char('a') => {
                self.state.show_archived_forms = !self.state.show_archived_forms;
                self.state.reset_selection();
            }
            KeyCode::Char('n') if self.can_edit() => self.open_builder_new(),
            KeyCode::Enter => {
                if self.can_edit() {
                    self.open_builder_selected();
                } else {
                    self.open_report_selected().await;
                }
            }
            KeyCode::Char('t') if self.can_edit() => self.cycle_selected_form_status().await,
            KeyCode::Char('d') if self.can_edit() => {
                let target = self
                    .state
                    .sorted_forms()
                    .get(self.state.selected_index)
                    .map(|f| (f.id.clone(), f.title.clone()));
                if let Some((id, title)) = target {
                    self.state.pending_delete =
                        Some(PendingDelete::new(DeleteTarget::Form(id), title));
                }
            }
            KeyCode::Char('p') => self.open_report_selected().await,
            _ => {}
        }
    }

    fn open_builder_new(&mut self) {
        self.state.builder = BuilderState::new();
        self.state.builder_focus = BuilderFocus::Inspector;
        self.state.palette_index = 0;
        self.state.inspector = Some(InspectorState::for_meta(&self.state.builder));
        self.state.dragging = false;
        self.navigate(View::Builder);
    }

    fn open_builder_selected(&mut self) {
        let Some(id) = self.selected_form_id() else {
            return;
        };
        let Some(form) = self.state.forms.iter().find(|f| f.id == id) else {
            return;
        };
        self.state.builder = BuilderState::from_form(form);
        self.state.builder_focus = BuilderFocus::Palette;
        self.state.palette_index = 0;
        self.state.inspector = None;
        self.state.dragging = false;
        self.navigate(View::Builder);
    }

    async fn open_report_selected(&mut self) {
        let Some(id) = self.selected_form_id() else {
            return;
        };
        match self.backend.form_report(&id).await {
            Ok(report) => {
                self.state.report = Some(report);
                if self.state.current_view != View::Analytics {
                    self.navigate(View::Analytics);
                }
            }
            Err(e) => self.push_error(format!("Failed to load report: {e}")),
        }
    }

    async fn cycle_selected_form_status(&mut self) {
        let Some(id) = self.selected_form_id() else {
            return;
        };
        let Some(form) = self.state.forms.iter().find(|f| f.id == id) else {
            return;
        };
        let next = match form.status {
            FormStatus::Draft => FormStatus::Active,
            FormStatus::Active => FormStatus::Archived,
            FormStatus::Archived => FormStatus::Draft,
        };
        if let Err(e) = self.backend.set_form_status(&id, next).await {
            self.push_error(format!("Failed to update status: {e}"));
            return;
        }
        self.refresh_forms().await;
    }

    // ===== Builder =====

    /// Point the inspector at the canvas selection, or the form meta
    fn sync_inspector(&mut self) {
        self.state.inspector = match self.state.builder.selected_element() {
            Some(element) => Some(InspectorState::for_element(element)),
            None => Some(InspectorState::for_meta(&self.state.builder)),
        };
    }

    /// Push the inspector buffers into the builder
    fn apply_inspector(&mut self) {
        let Some(inspector) = &self.state.inspector else {
            return;
        };
        match inspector.target.clone() {
            InspectorTarget::Element(id) => {
                let patch = inspector.to_patch();
                self.state.builder.update_element(&id, patch);
            }
            InspectorTarget::FormMeta => {
                let inspector = inspector.clone();
                inspector.apply_meta(&mut self.state.builder);
            }
        }
    }

    async fn handle_builder_key(&mut self, key: KeyEvent) {
        // Drag mode swallows everything until the element is dropped
        if self.state.dragging {
            self.handle_drag_key(key);
            return;
        }

        // Save works from any pane
        if key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.save_builder_form().await;
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.state.builder_focus = self.state.builder_focus.next();
                if self.state.builder_focus == BuilderFocus::Inspector {
                    self.sync_inspector();
                }
            }
            KeyCode::Esc => {
                self.state.inspector = None;
                self.go_back();
            }
            _ => match self.state.builder_focus {
                BuilderFocus::Palette => self.handle_palette_key(key),
                BuilderFocus::Canvas => self.handle_canvas_key(key),
                BuilderFocus::Inspector => self.handle_inspector_key(key),
            },
        }
    }

    fn handle_drag_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if let Some(from) = self.state.builder.drag_index {
                    self.state.builder.drag_over(from + 1);
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                if let Some(from) = self.state.builder.drag_index {
                    if from > 0 {
                        self.state.builder.drag_over(from - 1);
                    }
                }
            }
            KeyCode::Enter | KeyCode::Char('g') | KeyCode::Esc => {
                self.state.builder.drag_end();
                self.state.dragging = false;
            }
            _ => {}
        }
    }

    fn handle_palette_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                if self.state.palette_index + 1 < ElementType::ALL.len() {
                    self.state.palette_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.palette_index = self.state.palette_index.saturating_sub(1);
            }
            KeyCode::Enter => {
                let element_type = ElementType::ALL[self.state.palette_index];
                self.state.builder.add_element(element_type);
                self.sync_inspector();
            }
            _ => {}
        }
    }

    fn handle_canvas_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.builder.select_next();
                self.sync_inspector();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.builder.select_prev();
                self.sync_inspector();
            }
            KeyCode::Char('J') => {
                if let Some(id) = self.state.builder.selected_element_id.clone() {
                    self.state.builder.move_element(&id, MoveDirection::Down);
                }
            }
            KeyCode::Char('K') => {
                if let Some(id) = self.state.builder.selected_element_id.clone() {
                    self.state.builder.move_element(&id, MoveDirection::Up);
                }
            }
            KeyCode::Char('g') => {
                if let Some(index) = self.state.builder.selected_index() {
                    self.state.builder.drag_start(index);
                    self.state.dragging = true;
                }
            }
            KeyCode::Char('d') => {
                if let Some(id) = self.state.builder.selected_element_id.clone() {
                    self.state.builder.delete_element(&id);
                    self.state.inspector = None;
                }
            }
            _ => {}
        }
    }

    fn handle_inspector_key(&mut self, key: KeyEvent) {
        if self.state.inspector.is_none() {
            self.sync_inspector();
        }
        let Some(inspector) = &mut self.state.inspector else {
            return;
        };
        match key.code {
            KeyCode::Down => inspector.next_row(),
            KeyCode::Up => inspector.prev_row(),
            KeyCode::Char(' ') if inspector.on_required_row() => {
                inspector.toggle_required();
                self.apply_inspector();
            }
            KeyCode::Char(c) => {
                if let Some(field) = inspector.active_field_mut() {
                    field.push_char(c);
                    self.apply_inspector();
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = inspector.active_field_mut() {
                    field.pop_char();
                    self.apply_inspector();
                }
            }
            KeyCode::Enter => inspector.next_row(),
            _ => {}
        }
    }

    async fn save_builder_form(&mut self) {
        if let Err(message) = self.state.builder.validate() {
            self.push_error(message);
            return;
        }
        let form = self.state.builder.to_form();
        match self.backend.save_form(form).await {
            Ok(id) => {
                self.state.builder.form_id = Some(id);
                self.refresh_forms().await;
                self.status_message = Some("Form saved".to_string());
                self.state.inspector = None;
                self.go_back();
            }
            Err(e) => self.push_error(format!("Failed to save form: {e}")),
        }
    }

    // ===== Analytics =====

    async fn handle_analytics_key(&mut self, key: KeyEvent) {
        let total = self.state.sorted_forms().len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Enter => self.open_report_selected().await,
            _ => {}
        }
    }

    // ===== Schedules =====

    async fn handle_schedules_key(&mut self, key: KeyEvent) {
        let total = self.state.schedules.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char(' ') if self.can_edit() => {
                if let Some(schedule) = self.state.schedules.get(self.state.selected_index) {
                    let id = schedule.id.clone();
                    if let Err(e) = self.backend.toggle_schedule(&id).await {
                        self.push_error(format!("Failed to toggle schedule: {e}"));
                    } else {
                        self.refresh_schedules().await;
                    }
                }
            }
            KeyCode::Char('n') if self.can_edit() => self.open_schedule_create().await,
            KeyCode::Char('d') if self.can_edit() => {
                if let Some(schedule) = self.state.schedules.get(self.state.selected_index) {
                    self.state.pending_delete = Some(PendingDelete::new(
                        DeleteTarget::Schedule(schedule.id.clone()),
                        schedule.form_title.clone(),
                    ));
                }
            }
            _ => {}
        }
    }

    /// Open the create form for the selected schedule's form, falling back
    /// to the first listed form
    async fn open_schedule_create(&mut self) {
        self.refresh_forms().await;
        let target = self
            .state
            .schedules
            .get(self.state.selected_index)
            .map(|s| s.form_id.clone())
            .and_then(|id| self.state.forms.iter().find(|f| f.id == id))
            .or_else(|| self.state.sorted_forms().first().copied());

        let Some((id, title)) = target.map(|f| (f.id.clone(), f.title.clone())) else {
            self.push_error("No forms to schedule");
            return;
        };
        self.state.form_state = FormState::ScheduleCreate(ScheduleCreateForm::new(id, title));
        self.navigate(View::ScheduleCreate);
    }

    async fn handle_schedule_create_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('f') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let FormState::ScheduleCreate(form) = &mut self.state.form_state {
                    form.cycle_frequency();
                }
            }
            KeyCode::Tab | KeyCode::Down => self.state.form_state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form_state.prev_field(),
            KeyCode::Enter => self.create_schedule().await,
            KeyCode::Esc => {
                self.state.form_state = FormState::None;
                self.go_back();
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    async fn create_schedule(&mut self) {
        let FormState::ScheduleCreate(form) = &self.state.form_state else {
            return;
        };
        let recipients = form.recipient_list();
        if recipients.is_empty() {
            self.push_error("At least one recipient is required");
            return;
        }
        if let Some(bad) = recipients.iter().find(|r| !looks_like_email(r)) {
            self.push_error(format!("Invalid recipient address: {bad}"));
            return;
        }
        let send_hour = form.send_hour.as_hour();
        if send_hour > 23 {
            self.push_error("Send hour must be between 0 and 23");
            return;
        }
        let form_id = form.form_id.clone();
        let frequency = form.frequency;

        match self
            .backend
            .create_schedule(&form_id, recipients, frequency, send_hour)
            .await
        {
            Ok(_) => {
                self.state.form_state = FormState::None;
                self.refresh_schedules().await;
                self.status_message = Some("Schedule created".to_string());
                self.go_back();
            }
            Err(e) => self.push_error(format!("Failed to create schedule: {e}")),
        }
    }

    // ===== Users =====

    async fn handle_users_key(&mut self, key: KeyEvent) {
        if !permitted(self.state.session.as_ref(), Role::Admin) {
            return;
        }
        let total = self.state.users.len();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.move_selection_down(total),
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('n') => {
                self.state.form_state = FormState::UserCreate(UserCreateForm::new());
                self.navigate(View::UserCreate);
            }
            KeyCode::Char('r') => self.cycle_selected_user_role().await,
            KeyCode::Char('d') => {
                let own_id = self.state.session.as_ref().map(|s| s.user.id.clone());
                if let Some(user) = self.state.users.get(self.state.selected_index) {
                    if own_id.as_deref() == Some(user.id.as_str()) {
                        self.push_error("You cannot delete your own account");
                        return;
                    }
                    self.state.pending_delete = Some(PendingDelete::new(
                        DeleteTarget::User(user.id.clone()),
                        user.name.clone(),
                    ));
                }
            }
            _ => {}
        }
    }

    async fn cycle_selected_user_role(&mut self) {
        let Some(user) = self.state.users.get(self.state.selected_index) else {
            return;
        };
        let id = user.id.clone();
        let next = user.role.next();
        if let Err(e) = self.backend.set_user_role(&id, next).await {
            self.push_error(format!("Failed to change role: {e}"));
            return;
        }
        self.refresh_users().await;
    }

    async fn handle_user_create_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                if let FormState::UserCreate(form) = &mut self.state.form_state {
                    form.cycle_role();
                }
            }
            KeyCode::Tab | KeyCode::Down => self.state.form_state.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.state.form_state.prev_field(),
            KeyCode::Enter => self.create_user().await,
            KeyCode::Esc => {
                self.state.form_state = FormState::None;
                self.go_back();
            }
            KeyCode::Char(c) => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.push_char(c);
                }
            }
            KeyCode::Backspace => {
                if let Some(field) = self.state.form_state.get_active_field_mut() {
                    field.pop_char();
                }
            }
            _ => {}
        }
    }

    async fn create_user(&mut self) {
        let FormState::UserCreate(form) = &self.state.form_state else {
            return;
        };
        let name = form.name.as_text().trim().to_string();
        let email = form.email.as_text().trim().to_string();
        let role = form.role;

        if name.is_empty() {
            self.push_error("Name is required");
            return;
        }
        if !looks_like_email(&email) {
            self.push_error("Enter a valid email address");
            return;
        }

        match self.backend.create_user(&name, &email, role).await {
            Ok(_) => {
                self.state.form_state = FormState::None;
                self.refresh_users().await;
                self.status_message = Some("User created".to_string());
                self.go_back();
            }
            Err(e) => self.push_error(format!("Failed to create user: {e}")),
        }
    }
}
