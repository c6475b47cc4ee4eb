//! Trait abstraction for the backend client to enable mocking in tests

use crate::state::{
    DashboardStats, Form, FormReport, FormStatus, Frequency, Role, Schedule, Session, User,
};
use anyhow::Result;
use async_trait::async_trait;

/// Trait for backend operations, enabling mocking in tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BackendClient: Send + Sync {
    /// Authenticate and open a session
    async fn login(&mut self, email: &str, password: &str) -> Result<Session>;

    /// List all forms
    async fn list_forms(&mut self) -> Result<Vec<Form>>;

    /// Insert or update a form; returns its id
    async fn save_form(&mut self, form: Form) -> Result<String>;

    /// Delete a form
    async fn delete_form(&mut self, form_id: &str) -> Result<()>;

    /// Change the lifecycle status of a form
    async fn set_form_status(&mut self, form_id: &str, status: FormStatus) -> Result<()>;

    /// List all user accounts
    async fn list_users(&mut self) -> Result<Vec<User>>;

    /// Create a new user account; returns its id
    async fn create_user(&mut self, name: &str, email: &str, role: Role) -> Result<String>;

    /// Change a user's role
    async fn set_user_role(&mut self, user_id: &str, role: Role) -> Result<()>;

    /// Delete a user account
    async fn delete_user(&mut self, user_id: &str) -> Result<()>;

    /// List all distribution schedules
    async fn list_schedules(&mut self) -> Result<Vec<Schedule>>;

    /// Create a distribution schedule for a form; returns its id
    async fn create_schedule(
        &mut self,
        form_id: &str,
        recipients: Vec<String>,
        frequency: Frequency,
        send_hour: u32,
    ) -> Result<String>;

    /// Flip a schedule between active and paused
    async fn toggle_schedule(&mut self, schedule_id: &str) -> Result<()>;

    /// Delete a schedule
    async fn delete_schedule(&mut self, schedule_id: &str) -> Result<()>;

    /// Aggregate numbers for the dashboard
    async fn dashboard_stats(&mut self) -> Result<DashboardStats>;

    /// Analytics report for a single form
    async fn form_report(&mut self, form_id: &str) -> Result<FormReport>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{BuilderState, ElementType};

    async fn load_forms(backend: &mut dyn BackendClient) -> Result<Vec<Form>> {
        backend.list_forms().await
    }

    #[tokio::test]
    async fn test_mock_backend_client_serves_trait_callers() {
        let mut mock = MockBackendClient::new();
        mock.expect_list_forms().times(1).returning(|| {
            let mut builder = BuilderState::new();
            builder.title = "Mocked".to_string();
            builder.add_element(ElementType::Text);
            Ok(vec![builder.to_form()])
        });

        let forms = load_forms(&mut mock).await.unwrap();
        assert_eq!(forms.len(), 1);
        assert_eq!(forms[0].title, "Mocked");
    }

    #[tokio::test]
    async fn test_mock_propagates_errors() {
        let mut mock = MockBackendClient::new();
        mock.expect_delete_form()
            .returning(|_| Err(anyhow::anyhow!("form not found")));

        let result = mock.delete_form("missing").await;
        assert!(result.is_err());
    }
}
