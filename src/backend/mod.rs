//! Backend client module (mock, simulated latency)

mod client;
mod traits;

pub use client::{AuthError, MockBackend};
pub use traits::BackendClient;

#[cfg(test)]
pub use traits::MockBackendClient;
