//! Mock backend with seeded data and simulated latency
//!
//! The demo has no real persistence layer; every call here works on
//! in-memory seeded data behind a fixed-delay timer that stands in for
//! network latency. No retries, no cancellation, no I/O.

use crate::backend::BackendClient;
use crate::state::{
    BuilderState, DashboardStats, ElementType, Form, FormReport, FormStatus, Frequency, Role,
    Schedule, Session, User,
};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use rand::Rng;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Simulated network latency applied to every call
const DEFAULT_LATENCY_MS: u64 = 250;

/// Shared password for all seeded demo accounts
const DEMO_PASSWORD: &str = "formdeck";

/// Login failure modes
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("account is deactivated")]
    AccountDisabled,
}

/// In-memory backend standing in for the (unspecified) real service
pub struct MockBackend {
    users: Vec<User>,
    forms: Vec<Form>,
    schedules: Vec<Schedule>,
    latency: Duration,
}

impl MockBackend {
    /// Create a backend seeded with the demo dataset
    pub fn new() -> Self {
        Self::with_latency(Duration::from_millis(DEFAULT_LATENCY_MS))
    }

    /// Create a backend with explicit latency (zero in tests)
    pub fn with_latency(latency: Duration) -> Self {
        let users = seed_users();
        let forms = seed_forms();
        let schedules = seed_schedules(&forms);
        Self {
            users,
            forms,
            schedules,
            latency,
        }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BackendClient for MockBackend {
    async fn login(&mut self, email: &str, password: &str) -> Result<Session> {
        self.simulate_latency().await;

        let user = self
            .users
            .iter()
            .find(|u| u.email.eq_ignore_ascii_case(email))
            .ok_or(AuthError::InvalidCredentials)?;

        if password != DEMO_PASSWORD {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !user.active {
            return Err(AuthError::AccountDisabled.into());
        }

        tracing::info!(email = %user.email, role = user.role.label(), "login");
        Ok(Session {
            user: user.clone(),
            token: Uuid::new_v4().to_string(),
            logged_in_at: Utc::now(),
        })
    }

    async fn list_forms(&mut self) -> Result<Vec<Form>> {
        self.simulate_latency().await;
        Ok(self.forms.clone())
    }

    async fn save_form(&mut self, mut form: Form) -> Result<String> {
        self.simulate_latency().await;

        form.updated_at = Utc::now();
        let id = form.id.clone();
        if let Some(existing) = self.forms.iter_mut().find(|f| f.id == form.id) {
            // Updates keep the original creation time and response count
            form.created_at = existing.created_at;
            form.responses = existing.responses;
            *existing = form;
        } else {
            self.forms.push(form);
        }
        Ok(id)
    }

    async fn delete_form(&mut self, form_id: &str) -> Result<()> {
        self.simulate_latency().await;
        let before = self.forms.len();
        self.forms.retain(|f| f.id != form_id);
        if self.forms.len() == before {
            return Err(anyhow!("form not found: {form_id}"));
        }
        // Schedules of a deleted form go with it
        self.schedules.retain(|s| s.form_id != form_id);
        Ok(())
    }

    async fn set_form_status(&mut self, form_id: &str, status: FormStatus) -> Result<()> {
        self.simulate_latency().await;
        let form = self
            .forms
            .iter_mut()
            .find(|f| f.id == form_id)
            .ok_or_else(|| anyhow!("form not found: {form_id}"))?;
        form.status = status;
        form.updated_at = Utc::now();
        Ok(())
    }

    async fn list_users(&mut self) -> Result<Vec<User>> {
        self.simulate_latency().await;
        Ok(self.users.clone())
    }

    async fn create_user(&mut self, name: &str, email: &str, role: Role) -> Result<String> {
        self.simulate_latency().await;

        if self
            .users
            .iter()
            .any(|u| u.email.eq_ignore_ascii_case(email))
        {
            return Err(anyhow!("a user with email {email} already exists"));
        }

        let user = User {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            email: email.to_string(),
            role,
            active: true,
            created_at: Utc::now(),
        };
        let id = user.id.clone();
        self.users.push(user);
        Ok(id)
    }

    async fn set_user_role(&mut self, user_id: &str, role: Role) -> Result<()> {
        self.simulate_latency().await;
        let user = self
            .users
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or_else(|| anyhow!("user not found: {user_id}"))?;
        user.role = role;
        Ok(())
    }

    async fn delete_user(&mut self, user_id: &str) -> Result<()> {
        self.simulate_latency().await;
        let before = self.users.len();
        self.users.retain(|u| u.id != user_id);
        if self.users.len() == before {
            return Err(anyhow!("user not found: {user_id}"));
        }
        Ok(())
    }

    async fn list_schedules(&mut self) -> Result<Vec<Schedule>> {
        self.simulate_latency().await;
        Ok(self.schedules.clone())
    }

    async fn create_schedule(
        &mut self,
        form_id: &str,
        recipients: Vec<String>,
        frequency: Frequency,
        send_hour: u32,
    ) -> Result<String> {
        self.simulate_latency().await;

        let form = self
            .forms
            .iter()
            .find(|f| f.id == form_id)
            .ok_or_else(|| anyhow!("form not found: {form_id}"))?;

        let schedule = Schedule {
            id: Uuid::new_v4().to_string(),
            form_id: form.id.clone(),
            form_title: form.title.clone(),
            recipients,
            frequency,
            send_hour,
            next_run: next_run_after(Utc::now(), frequency, send_hour),
            active: true,
        };
        let id = schedule.id.clone();
        self.schedules.push(schedule);
        Ok(id)
    }

    async fn toggle_schedule(&mut self, schedule_id: &str) -> Result<()> {
        self.simulate_latency().await;
        let schedule = self
            .schedules
            .iter_mut()
            .find(|s| s.id == schedule_id)
            .ok_or_else(|| anyhow!("schedule not found: {schedule_id}"))?;
        schedule.active = !schedule.active;
        Ok(())
    }

    async fn delete_schedule(&mut self, schedule_id: &str) -> Result<()> {
        self.simulate_latency().await;
        let before = self.schedules.len();
        self.schedules.retain(|s| s.id != schedule_id);
        if self.schedules.len() == before {
            return Err(anyhow!("schedule not found: {schedule_id}"));
        }
        Ok(())
    }

    async fn dashboard_stats(&mut self) -> Result<DashboardStats> {
        self.simulate_latency().await;

        let mut rng = rand::thread_rng();
        let total_responses = self.forms.iter().map(|f| f.responses).sum();
        Ok(DashboardStats {
            total_forms: self.forms.len() as u32,
            active_forms: self
                .forms
                .iter()
                .filter(|f| f.status == FormStatus::Active)
                .count() as u32,
            total_responses,
            total_users: self.users.len() as u32,
            completion_rate: rng.gen_range(0.55..0.95),
            responses_last_week: (0..7).map(|_| rng.gen_range(0..60)).collect(),
        })
    }

    async fn form_report(&mut self, form_id: &str) -> Result<FormReport> {
        self.simulate_latency().await;

        let form = self
            .forms
            .iter()
            .find(|f| f.id == form_id)
            .ok_or_else(|| anyhow!("form not found: {form_id}"))?;

        let mut rng = rand::thread_rng();
        let submissions = form.responses;
        let views = submissions * rng.gen_range(2..5) + rng.gen_range(0..20);
        Ok(FormReport {
            form_id: form.id.clone(),
            form_title: form.title.clone(),
            views,
            submissions,
            completion_rate: if views == 0 {
                0.0
            } else {
                f64::from(submissions) / f64::from(views)
            },
            daily_submissions: (0..14).map(|_| rng.gen_range(0..30)).collect(),
        })
    }
}

/// First run strictly after `now` for the given cadence
fn next_run_after(now: DateTime<Utc>, frequency: Frequency, send_hour: u32) -> DateTime<Utc> {
    let interval = match frequency {
        Frequency::Once | Frequency::Daily => ChronoDuration::days(1),
        Frequency::Weekly => ChronoDuration::weeks(1),
        Frequency::Monthly => ChronoDuration::days(30),
    };
    (now + interval)
        .date_naive()
        .and_hms_opt(send_hour.min(23), 0, 0)
        .unwrap_or_default()
        .and_utc()
}

fn seed_users() -> Vec<User> {
    let days_ago = |n: i64| Utc::now() - ChronoDuration::days(n);
    vec![
        User {
            id: Uuid::new_v4().to_string(),
            name: "Ada Park".to_string(),
            email: "admin@formdeck.io".to_string(),
            role: Role::Admin,
            active: true,
            created_at: days_ago(120),
        },
        User {
            id: Uuid::new_v4().to_string(),
            name: "Eli Mensah".to_string(),
            email: "editor@formdeck.io".to_string(),
            role: Role::Editor,
            active: true,
            created_at: days_ago(60),
        },
        User {
            id: Uuid::new_v4().to_string(),
            name: "Vera Lindqvist".to_string(),
            email: "viewer@formdeck.io".to_string(),
            role: Role::Viewer,
            active: true,
            created_at: days_ago(30),
        },
        User {
            id: Uuid::new_v4().to_string(),
            name: "Omar Haddad".to_string(),
            email: "disabled@formdeck.io".to_string(),
            role: Role::Editor,
            active: false,
            created_at: days_ago(90),
        },
    ]
}

fn seed_forms() -> Vec<Form> {
    let feedback = {
        let mut b = BuilderState::new();
        b.title = "Customer Feedback".to_string();
        b.description = "Quarterly customer satisfaction survey".to_string();
        b.status = FormStatus::Active;
        b.add_element(ElementType::Heading);
        b.add_element(ElementType::Text);
        b.add_element(ElementType::Email);
        let rating = b.add_element(ElementType::Radio);
        b.update_element(
            &rating,
            crate::state::ElementPatch {
                label: Some("How satisfied are you?".to_string()),
                options: Some(vec![
                    "Very satisfied".to_string(),
                    "Neutral".to_string(),
                    "Unsatisfied".to_string(),
                ]),
                required: Some(true),
                ..Default::default()
            },
        );
        b.add_element(ElementType::Textarea);
        b
    };

    let signup = {
        let mut b = BuilderState::new();
        b.title = "Event Signup".to_string();
        b.description = "Registration for the autumn meetup".to_string();
        b.status = FormStatus::Active;
        b.add_element(ElementType::Text);
        b.add_element(ElementType::Email);
        b.add_element(ElementType::Select);
        b.add_element(ElementType::Date);
        b.add_element(ElementType::Checkbox);
        b
    };

    let intake = {
        let mut b = BuilderState::new();
        b.title = "Support Intake".to_string();
        b.description = "Internal ticket intake form".to_string();
        b.add_element(ElementType::Text);
        b.add_element(ElementType::File);
        b.add_element(ElementType::Paragraph);
        b
    };

    let mut forms = Vec::new();
    for (builder, responses, age_days) in [(feedback, 128, 45), (signup, 54, 20), (intake, 0, 5)] {
        let mut form = builder.to_form();
        form.responses = responses;
        form.created_at = Utc::now() - ChronoDuration::days(age_days);
        form.updated_at = Utc::now() - ChronoDuration::days(age_days / 2);
        forms.push(form);
    }
    forms
}

fn seed_schedules(forms: &[Form]) -> Vec<Schedule> {
    let Some(form) = forms.first() else {
        return Vec::new();
    };
    vec![Schedule {
        id: Uuid::new_v4().to_string(),
        form_id: form.id.clone(),
        form_title: form.title.clone(),
        recipients: vec![
            "team@formdeck.io".to_string(),
            "customers@formdeck.io".to_string(),
        ],
        frequency: Frequency::Weekly,
        send_hour: 9,
        next_run: next_run_after(Utc::now(), Frequency::Weekly, 9),
        active: true,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn backend() -> MockBackend {
        MockBackend::with_latency(Duration::ZERO)
    }

    mod login {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_valid_credentials_open_session() {
            let mut backend = backend();
            let session = backend.login("admin@formdeck.io", DEMO_PASSWORD).await.unwrap();
            assert_eq!(session.user.role, Role::Admin);
            assert!(!session.token.is_empty());
        }

        #[tokio::test]
        async fn test_email_is_case_insensitive() {
            let mut backend = backend();
            let session = backend.login("ADMIN@formdeck.io", DEMO_PASSWORD).await.unwrap();
            assert_eq!(session.user.email, "admin@formdeck.io");
        }

        #[tokio::test]
        async fn test_wrong_password_rejected() {
            let mut backend = backend();
            let err = backend
                .login("admin@formdeck.io", "nope")
                .await
                .unwrap_err();
            assert_eq!(
                err.downcast_ref::<AuthError>(),
                Some(&AuthError::InvalidCredentials)
            );
        }

        #[tokio::test]
        async fn test_unknown_email_rejected() {
            let mut backend = backend();
            let err = backend
                .login("nobody@formdeck.io", DEMO_PASSWORD)
                .await
                .unwrap_err();
            assert_eq!(
                err.downcast_ref::<AuthError>(),
                Some(&AuthError::InvalidCredentials)
            );
        }

        #[tokio::test]
        async fn test_deactivated_account_rejected() {
            let mut backend = backend();
            let err = backend
                .login("disabled@formdeck.io", DEMO_PASSWORD)
                .await
                .unwrap_err();
            assert_eq!(
                err.downcast_ref::<AuthError>(),
                Some(&AuthError::AccountDisabled)
            );
        }
    }

    mod forms {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_seeded_forms_present() {
            let mut backend = backend();
            let forms = backend.list_forms().await.unwrap();
            assert_eq!(forms.len(), 3);
            assert!(forms.iter().any(|f| f.title == "Customer Feedback"));
        }

        #[tokio::test]
        async fn test_save_form_inserts_new() {
            let mut backend = backend();
            let mut builder = BuilderState::new();
            builder.title = "New Form".to_string();
            builder.add_element(ElementType::Text);

            let id = backend.save_form(builder.to_form()).await.unwrap();
            let forms = backend.list_forms().await.unwrap();
            assert_eq!(forms.len(), 4);
            assert!(forms.iter().any(|f| f.id == id));
        }

        #[tokio::test]
        async fn test_save_form_update_preserves_created_at_and_responses() {
            let mut backend = backend();
            let original = backend.list_forms().await.unwrap()[0].clone();

            let mut edited = original.clone();
            edited.title = "Renamed".to_string();
            edited.responses = 0;
            backend.save_form(edited).await.unwrap();

            let reloaded = backend
                .list_forms()
                .await
                .unwrap()
                .into_iter()
                .find(|f| f.id == original.id)
                .unwrap();
            assert_eq!(reloaded.title, "Renamed");
            assert_eq!(reloaded.created_at, original.created_at);
            assert_eq!(reloaded.responses, original.responses);
        }

        #[tokio::test]
        async fn test_delete_form_removes_its_schedules() {
            let mut backend = backend();
            let form_id = backend.list_schedules().await.unwrap()[0].form_id.clone();

            backend.delete_form(&form_id).await.unwrap();
            assert!(backend.list_schedules().await.unwrap().is_empty());
        }

        #[tokio::test]
        async fn test_delete_unknown_form_errors() {
            let mut backend = backend();
            assert!(backend.delete_form("missing").await.is_err());
        }

        #[tokio::test]
        async fn test_set_form_status() {
            let mut backend = backend();
            let id = backend.list_forms().await.unwrap()[0].id.clone();
            backend
                .set_form_status(&id, FormStatus::Archived)
                .await
                .unwrap();
            let form = backend
                .list_forms()
                .await
                .unwrap()
                .into_iter()
                .find(|f| f.id == id)
                .unwrap();
            assert_eq!(form.status, FormStatus::Archived);
        }
    }

    mod users {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_create_user() {
            let mut backend = backend();
            let id = backend
                .create_user("New Person", "new@formdeck.io", Role::Viewer)
                .await
                .unwrap();
            let users = backend.list_users().await.unwrap();
            let user = users.iter().find(|u| u.id == id).unwrap();
            assert_eq!(user.email, "new@formdeck.io");
            assert!(user.active);
        }

        #[tokio::test]
        async fn test_create_user_duplicate_email_rejected() {
            let mut backend = backend();
            let result = backend
                .create_user("Dup", "ADMIN@formdeck.io", Role::Viewer)
                .await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_set_user_role() {
            let mut backend = backend();
            let id = backend.list_users().await.unwrap()[2].id.clone();
            backend.set_user_role(&id, Role::Editor).await.unwrap();
            let users = backend.list_users().await.unwrap();
            assert_eq!(users[2].role, Role::Editor);
        }

        #[tokio::test]
        async fn test_delete_user() {
            let mut backend = backend();
            let id = backend.list_users().await.unwrap()[0].id.clone();
            backend.delete_user(&id).await.unwrap();
            assert_eq!(backend.list_users().await.unwrap().len(), 3);
        }

        #[tokio::test]
        async fn test_delete_unknown_user_errors() {
            let mut backend = backend();
            assert!(backend.delete_user("missing").await.is_err());
        }
    }

    mod schedules {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_create_schedule_for_known_form() {
            let mut backend = backend();
            let form_id = backend.list_forms().await.unwrap()[1].id.clone();
            let id = backend
                .create_schedule(
                    &form_id,
                    vec!["a@x.io".to_string()],
                    Frequency::Daily,
                    8,
                )
                .await
                .unwrap();

            let schedules = backend.list_schedules().await.unwrap();
            let schedule = schedules.iter().find(|s| s.id == id).unwrap();
            assert_eq!(schedule.send_hour, 8);
            assert!(schedule.active);
            assert!(schedule.next_run > Utc::now() - ChronoDuration::hours(24));
        }

        #[tokio::test]
        async fn test_create_schedule_unknown_form_errors() {
            let mut backend = backend();
            let result = backend
                .create_schedule("missing", vec![], Frequency::Once, 9)
                .await;
            assert!(result.is_err());
        }

        #[tokio::test]
        async fn test_toggle_schedule_flips_active() {
            let mut backend = backend();
            let id = backend.list_schedules().await.unwrap()[0].id.clone();

            backend.toggle_schedule(&id).await.unwrap();
            assert!(!backend.list_schedules().await.unwrap()[0].active);

            backend.toggle_schedule(&id).await.unwrap();
            assert!(backend.list_schedules().await.unwrap()[0].active);
        }

        #[tokio::test]
        async fn test_delete_schedule() {
            let mut backend = backend();
            let id = backend.list_schedules().await.unwrap()[0].id.clone();
            backend.delete_schedule(&id).await.unwrap();
            assert!(backend.list_schedules().await.unwrap().is_empty());
        }
    }

    mod analytics {
        use super::*;
        use pretty_assertions::assert_eq;

        #[tokio::test]
        async fn test_dashboard_stats_match_seeded_data() {
            let mut backend = backend();
            let stats = backend.dashboard_stats().await.unwrap();
            assert_eq!(stats.total_forms, 3);
            assert_eq!(stats.active_forms, 2);
            assert_eq!(stats.total_users, 4);
            assert_eq!(stats.total_responses, 182);
            assert_eq!(stats.responses_last_week.len(), 7);
            assert!(stats.completion_rate > 0.0 && stats.completion_rate < 1.0);
        }

        #[tokio::test]
        async fn test_form_report_for_known_form() {
            let mut backend = backend();
            let form = backend.list_forms().await.unwrap()[0].clone();
            let report = backend.form_report(&form.id).await.unwrap();
            assert_eq!(report.submissions, form.responses);
            assert!(report.views >= report.submissions);
            assert_eq!(report.daily_submissions.len(), 14);
        }

        #[tokio::test]
        async fn test_form_report_unknown_form_errors() {
            let mut backend = backend();
            assert!(backend.form_report("missing").await.is_err());
        }
    }

    mod next_run {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_interval_by_frequency() {
            let now = Utc::now();
            let daily = next_run_after(now, Frequency::Daily, 9);
            let weekly = next_run_after(now, Frequency::Weekly, 9);
            assert!(daily > now);
            assert!(weekly > daily);
        }

        #[test]
        fn test_send_hour_clamped() {
            let run = next_run_after(Utc::now(), Frequency::Daily, 99);
            assert_eq!(chrono::Timelike::hour(&run), 23);
        }
    }
}
