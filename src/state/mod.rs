//! Application state module

mod app_state;
mod builder;
mod forms;
mod inspector;
mod session;

pub use app_state::*;
pub use builder::*;
pub use forms::*;
pub use inspector::*;
pub use session::*;
