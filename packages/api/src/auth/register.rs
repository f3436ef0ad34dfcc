//! # Registration sequencer
//!
//! Registration is two calls against two services, not a transaction:
//!
//! 1. Create the auth identity from email + password only. No profile metadata
//!    is attached, so server-side triggers on the identity table see nothing to act on.
//! 2. Insert the profile row into the table for the chosen role.
//!
//! If step 2 fails the new session is signed out before the error is reported.
//! Sign-out does not delete the identity: an identity created in step 1 stays
//! behind without a profile, and is logged at error level with its id so it can
//! be cleaned up by hand.

use store::{Backend, NewProfileRow, Role};

use crate::error::{AppError, RegistrationError};
use crate::nav::{NavAction, Screen};

pub const MIN_PASSWORD_LEN: usize = 6;

/// State of the registration form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegistrationForm {
    pub email: String,
    pub password: String,
    pub full_name: String,
    pub role: Role,
}

/// Inputs after validation and normalisation.
#[derive(Clone, Debug, PartialEq)]
struct CleanRegistration {
    email: String,
    password: String,
    full_name: String,
    role: Role,
}

/// Result of a completed registration.
#[derive(Clone, Debug, PartialEq)]
pub struct RegisteredUser {
    pub user_id: String,
    pub email: String,
    pub role: Role,
}

impl RegisteredUser {
    /// A new account is sent back to Login to sign in.
    pub fn navigation(&self) -> NavAction {
        NavAction::Navigate(Screen::Login)
    }
}

impl RegistrationForm {
    /// The submit button stays disabled until every field has something in it.
    pub fn can_submit(&self) -> bool {
        !self.email.is_empty() && !self.password.is_empty() && !self.full_name.is_empty()
    }

    /// Reset every field, including the role picker.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn validate(&self) -> Result<CleanRegistration, AppError> {
        if !self.can_submit() {
            return Err(AppError::validation("Please fill in all fields"));
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AppError::validation(format!(
                "Password must be at least {MIN_PASSWORD_LEN} characters long"
            )));
        }
        Ok(CleanRegistration {
            email: self.email.trim().to_lowercase(),
            password: self.password.clone(),
            full_name: self.full_name.trim().to_string(),
            role: self.role,
        })
    }

    /// Check the form locally, without touching the network.
    pub fn check(&self) -> Result<(), AppError> {
        self.validate().map(|_| ())
    }
}

fn is_already_registered(err: &store::BackendError) -> bool {
    err.mentions("already registered") || err.mentions("already been registered")
}

/// Create the identity and its profile row.
pub async fn register<B: Backend + ?Sized>(
    backend: &B,
    form: &RegistrationForm,
) -> Result<RegisteredUser, RegistrationError> {
    let clean = form.validate()?;
    tracing::info!(email = %clean.email, role = clean.role.as_str(), "starting registration");

    let user = match backend.sign_up(&clean.email, &clean.password).await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AppError::AccountCreation.into()),
        Err(e) if is_already_registered(&e) => return Err(AppError::AlreadyRegistered.into()),
        Err(e) => {
            tracing::error!(error = %e, "auth sign-up failed");
            return Err(AppError::Auth(e.message).into());
        }
    };
    tracing::info!(user_id = %user.id, "auth user created");

    let row = NewProfileRow {
        id: user.id.clone(),
        email: clean.email.clone(),
        full_name: clean.full_name,
        role: clean.role,
        created_at: chrono::Utc::now().to_rfc3339(),
    };

    if let Err(e) = backend.insert(clean.role.table(), vec![row.to_row()]).await {
        tracing::error!(error = %e, table = clean.role.table(), "profile creation failed");

        if let Err(cleanup) = backend.sign_out().await {
            tracing::error!(error = %cleanup, "failed to sign out after profile creation error");
        }
        tracing::error!(user_id = %user.id, "auth identity left without a profile row");

        if e.mentions("duplicate key") {
            return Err(AppError::AlreadyRegistered.into());
        }
        return Err(AppError::ProfileCreation(e.message).into());
    }

    tracing::info!(user_id = %user.id, "user profile created");
    Ok(RegisteredUser {
        user_id: user.id,
        email: clean.email,
        role: clean.role,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::{BackendError, Call, MemoryBackend, Op, LECTURERS_TABLE, STUDENTS_TABLE};

    fn form(email: &str, password: &str, full_name: &str, role: Role) -> RegistrationForm {
        RegistrationForm {
            email: email.into(),
            password: password.into(),
            full_name: full_name.into(),
            role,
        }
    }

    #[tokio::test]
    async fn test_student_registration_scenario() {
        let backend = MemoryBackend::new();
        let mut ada = form("a@b.com", "secret1", "Ada", Role::Student);

        let user = register(&backend, &ada).await.unwrap();

        let rows = backend.rows(STUDENTS_TABLE);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert_eq!(row.get("id"), Some(&json!(user.user_id)));
        assert_eq!(row.get("email"), Some(&json!("a@b.com")));
        assert_eq!(row.get("full_name"), Some(&json!("Ada")));
        assert_eq!(row.get("role"), Some(&json!("student")));
        assert!(row.get("created_at").is_some());
        assert!(row.get("faculty").is_none());
        assert!(row.get("program").is_none());
        assert!(row.get("courses").is_none());
        assert!(backend.rows(LECTURERS_TABLE).is_empty());

        assert_eq!(user.navigation(), NavAction::Navigate(Screen::Login));
        ada.clear();
        assert_eq!(ada, RegistrationForm::default());
        assert_eq!(ada.role, Role::Student);
    }

    #[tokio::test]
    async fn test_inputs_are_normalised() {
        let backend = MemoryBackend::new();

        let user = register(
            &backend,
            &form("  Grace@Uni.EDU ", "secret1", "  Grace Hopper ", Role::Lecturer),
        )
        .await
        .unwrap();

        assert_eq!(user.email, "grace@uni.edu");
        let row = &backend.rows(LECTURERS_TABLE)[0];
        assert_eq!(row.get("full_name"), Some(&json!("Grace Hopper")));
        assert_eq!(row.get("role"), Some(&json!("lecturer")));
    }

    #[tokio::test]
    async fn test_short_password_makes_no_calls() {
        let backend = MemoryBackend::new();

        let err = register(&backend, &form("a@b.com", "12345", "Ada", Role::Student))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Password must be at least 6 characters long");
        assert!(err.inner().is_local());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_field_makes_no_calls() {
        let backend = MemoryBackend::new();

        let err = register(&backend, &form("a@b.com", "secret1", "", Role::Student))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Please fill in all fields");
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_reregistering_stops_before_insert() {
        let backend = MemoryBackend::new();
        let ada = form("a@b.com", "secret1", "Ada", Role::Student);
        register(&backend, &ada).await.unwrap();
        backend.clear_calls();

        let err = register(&backend, &ada).await.unwrap_err();

        assert_eq!(err.inner(), &AppError::AlreadyRegistered);
        assert_eq!(backend.calls(), vec![Call::SignUp { email: "a@b.com".into() }]);
        assert_eq!(backend.rows(STUDENTS_TABLE).len(), 1);
    }

    #[tokio::test]
    async fn test_insert_failure_signs_out_and_reports_profile_error() {
        let backend = MemoryBackend::new();
        backend.fail_on(
            Op::Insert(STUDENTS_TABLE.into()),
            BackendError::new("new row violates row-level security policy"),
        );

        let err = register(&backend, &form("a@b.com", "secret1", "Ada", Role::Student))
            .await
            .unwrap_err();

        assert_eq!(
            err.inner(),
            &AppError::ProfileCreation("new row violates row-level security policy".into())
        );
        assert_eq!(backend.calls().last(), Some(&Call::SignOut));
        assert!(backend.session_user().is_none());
        // The identity itself is not removed.
        assert_eq!(backend.identity_count(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_key_on_insert_is_already_registered() {
        let backend = MemoryBackend::new();
        backend.fail_on(
            Op::Insert(LECTURERS_TABLE.into()),
            BackendError::new("duplicate key value violates unique constraint \"lecturers_email_key\""),
        );

        let err = register(&backend, &form("l@b.com", "secret1", "Lin", Role::Lecturer))
            .await
            .unwrap_err();

        assert_eq!(err.inner(), &AppError::AlreadyRegistered);
        assert!(backend.calls().contains(&Call::SignOut));
    }

    #[tokio::test]
    async fn test_failed_cleanup_still_reports_profile_error() {
        let backend = MemoryBackend::new();
        backend.fail_on(Op::Insert(STUDENTS_TABLE.into()), BackendError::new("insert failed"));
        backend.fail_on(Op::SignOut, BackendError::new("network down"));

        let err = register(&backend, &form("a@b.com", "secret1", "Ada", Role::Student))
            .await
            .unwrap_err();

        assert_eq!(err.inner(), &AppError::ProfileCreation("insert failed".into()));
    }

    #[tokio::test]
    async fn test_other_sign_up_errors_pass_through() {
        let backend = MemoryBackend::new();
        backend.fail_on(Op::SignUp, BackendError::new("Signups not allowed for this instance"));

        let err = register(&backend, &form("a@b.com", "secret1", "Ada", Role::Student))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Signups not allowed for this instance");
        assert!(backend.rows(STUDENTS_TABLE).is_empty());
    }

    #[test]
    fn test_form_submit_and_clear() {
        let mut f = form("a@b.com", "secret1", "Ada", Role::Lecturer);
        assert!(f.can_submit());
        assert!(f.check().is_ok());

        f.clear();
        assert_eq!(f, RegistrationForm::default());
        assert_eq!(f.role, Role::Student);
        assert!(!f.can_submit());
    }
}
