//! Input-form state management and form structs

use super::field::FormField;
use crate::state::session::Role;
use crate::state::Frequency;

/// Trait for common form operations
pub trait InputForm {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> &mut FormField;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Minimal email shape check (`local@domain.tld`), mirrors the demo's
/// client-side pattern validation
pub fn looks_like_email(value: &str) -> bool {
    let mut parts = value.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let mut labels = domain.split('.');
    labels.next().is_some_and(|l| !l.is_empty())
        && labels.clone().count() >= 1
        && labels.all(|l| !l.is_empty())
}

/// Enum representing all possible input-form states
#[derive(Debug, Clone, Default)]
pub enum FormState {
    #[default]
    None,
    Login(LoginForm),
    UserCreate(UserCreateForm),
    ScheduleCreate(ScheduleCreateForm),
}

impl FormState {
    pub fn next_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.next_field(),
            FormState::UserCreate(f) => f.next_field(),
            FormState::ScheduleCreate(f) => f.next_field(),
        }
    }

    pub fn prev_field(&mut self) {
        match self {
            FormState::None => {}
            FormState::Login(f) => f.prev_field(),
            FormState::UserCreate(f) => f.prev_field(),
            FormState::ScheduleCreate(f) => f.prev_field(),
        }
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        match self {
            FormState::None => None,
            FormState::Login(f) => Some(f.get_active_field_mut()),
            FormState::UserCreate(f) => Some(f.get_active_field_mut()),
            FormState::ScheduleCreate(f) => Some(f.get_active_field_mut()),
        }
    }
}

// Login form
#[derive(Debug, Clone)]
pub struct LoginForm {
    pub email: FormField,
    pub password: FormField,
    pub active_field_index: usize,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            email: FormField::text("email", "Email"),
            password: FormField::secret("password", "Password"),
            active_field_index: 0,
        }
    }
}

impl Default for LoginForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InputForm for LoginForm {
    fn field_count(&self) -> usize {
        2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.email,
            _ => &mut self.password,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.email),
            1 => Some(&self.password),
            _ => None,
        }
    }
}

// User create form
#[derive(Debug, Clone)]
pub struct UserCreateForm {
    pub name: FormField,
    pub email: FormField,
    /// Cycled with a key rather than typed
    pub role: Role,
    pub active_field_index: usize,
}

impl UserCreateForm {
    pub fn new() -> Self {
        Self {
            name: FormField::text("name", "Name"),
            email: FormField::text("email", "Email"),
            role: Role::Viewer,
            active_field_index: 0,
        }
    }

    pub fn cycle_role(&mut self) {
        self.role = self.role.next();
    }
}

impl Default for UserCreateForm {
    fn default() -> Self {
        Self::new()
    }
}

impl InputForm for UserCreateForm {
    fn field_count(&self) -> usize {
        2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.name,
            _ => &mut self.email,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.name),
            1 => Some(&self.email),
            _ => None,
        }
    }
}

// Schedule create form
#[derive(Debug, Clone)]
pub struct ScheduleCreateForm {
    /// Form the schedule distributes
    pub form_id: String,
    pub form_title: String,
    /// Comma-separated recipient addresses
    pub recipients: FormField,
    pub send_hour: FormField,
    /// Cycled with a key rather than typed
    pub frequency: Frequency,
    pub active_field_index: usize,
}

impl ScheduleCreateForm {
    pub fn new(form_id: String, form_title: String) -> Self {
        Self {
            form_id,
            form_title,
            recipients: FormField::text("recipients", "Recipients (comma-separated)"),
            send_hour: FormField::hour("send_hour", "Send hour (0-23)", 9),
            frequency: Frequency::Weekly,
            active_field_index: 0,
        }
    }

    pub fn cycle_frequency(&mut self) {
        self.frequency = self.frequency.next();
    }

    /// Split and trim the recipient list, dropping empty entries
    pub fn recipient_list(&self) -> Vec<String> {
        self.recipients
            .as_text()
            .split(',')
            .map(|r| r.trim().to_string())
            .filter(|r| !r.is_empty())
            .collect()
    }
}

impl InputForm for ScheduleCreateForm {
    fn field_count(&self) -> usize {
        2
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(1);
    }
    fn get_active_field_mut(&mut self) -> &mut FormField {
        match self.active_field_index {
            0 => &mut self.recipients,
            _ => &mut self.send_hour,
        }
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        match index {
            0 => Some(&self.recipients),
            1 => Some(&self.send_hour),
            _ => None,
        }
    }
}
