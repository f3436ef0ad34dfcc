//! # Application errors
//!
//! Every flow in this crate returns [`AppError`]. Its `Display` text is exactly
//! what the user sees in the alert, so screens never format errors themselves.
//!
//! | Kind | Variants |
//! |------|----------|
//! | Local validation | [`AppError::Validation`] |
//! | Authentication | [`AppError::Auth`], [`AppError::AlreadyRegistered`], [`AppError::AccountCreation`] |
//! | Role lookup | [`AppError::Lookup`], [`AppError::RoleNotFound`], [`AppError::NoUser`] |
//! | Profile read/write | [`AppError::ProfileCreation`], [`AppError::ProfileFetch`], [`AppError::ProfileUpdate`] |
//! | Session | [`AppError::SignOut`] |
//! | Anything else from the backend | [`AppError::Backend`] |

use store::BackendError;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Auth(String),

    #[error("This email is already registered. Please try logging in instead.")]
    AlreadyRegistered,

    #[error("Failed to create user account. Please try again.")]
    AccountCreation,

    #[error("{0}")]
    Lookup(String),

    #[error("User account exists but role not found. Please contact support.")]
    RoleNotFound,

    #[error("No user found")]
    NoUser,

    #[error("Failed to create user profile: {0}")]
    ProfileCreation(String),

    #[error("Failed to fetch profile details")]
    ProfileFetch(#[source] BackendError),

    #[error("Failed to update profile")]
    ProfileUpdate(#[source] BackendError),

    #[error("Failed to sign out")]
    SignOut(#[source] BackendError),

    #[error("{0}")]
    Backend(#[from] BackendError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Heading for the alert that reports this error.
    pub fn alert_title(&self) -> &'static str {
        "Error"
    }

    /// Whether the failure happened before any network call.
    pub fn is_local(&self) -> bool {
        matches!(self, AppError::Validation(_) | AppError::Config(_))
    }
}

/// Errors raised by the registration flow, reported under their own heading.
#[derive(Debug, Clone, PartialEq, Error)]
#[error(transparent)]
pub struct RegistrationError(#[from] pub AppError);

impl RegistrationError {
    pub fn alert_title(&self) -> &'static str {
        "Registration Failed"
    }

    pub fn inner(&self) -> &AppError {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_are_user_facing() {
        assert_eq!(
            AppError::RoleNotFound.to_string(),
            "User account exists but role not found. Please contact support."
        );
        assert_eq!(
            AppError::ProfileCreation("permission denied".into()).to_string(),
            "Failed to create user profile: permission denied"
        );
        assert_eq!(
            AppError::ProfileFetch(BackendError::new("timeout")).to_string(),
            "Failed to fetch profile details"
        );
    }

    #[test]
    fn test_backend_message_passes_through() {
        let err: AppError = BackendError::new("Invalid login credentials").into();
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert!(!err.is_local());
        assert!(AppError::validation("Please fill in all fields").is_local());
    }

    #[test]
    fn test_registration_error_title() {
        let err = RegistrationError::from(AppError::AlreadyRegistered);
        assert_eq!(err.alert_title(), "Registration Failed");
        assert_eq!(err.to_string(), AppError::AlreadyRegistered.to_string());
    }
}
