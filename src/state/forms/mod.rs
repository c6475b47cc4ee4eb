//! Input-form domain layer
//!
//! Type-safe field handling for the login, user and schedule forms.

mod field;
mod form_state;

pub use field::FormField;
pub use form_state::{
    looks_like_email, FormState, InputForm, LoginForm, ScheduleCreateForm, UserCreateForm,
};
