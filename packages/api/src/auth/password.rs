//! # Password reset
//!
//! Asks the auth service to email a reset link. The link points at the app's
//! deep-link scheme (`auth.reset_redirect_url`, `edusync://reset-password` by
//! default); handling the link when it comes back is outside this app.

use store::Backend;

use crate::error::AppError;
use crate::nav::{NavAction, Screen};

/// Request a reset email for `email`. On success the caller returns to Login.
pub async fn request_password_reset<B: Backend + ?Sized>(
    backend: &B,
    email: &str,
    redirect_to: &str,
) -> Result<NavAction, AppError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(AppError::validation("Please enter your email"));
    }

    backend
        .reset_password_for_email(email, redirect_to)
        .await
        .map_err(|e| AppError::Auth(e.message))?;

    tracing::info!("password reset email requested");
    Ok(NavAction::Navigate(Screen::Login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{BackendError, Call, MemoryBackend, Op};

    #[tokio::test]
    async fn test_reset_request_uses_redirect() {
        let backend = MemoryBackend::new();

        let nav = request_password_reset(&backend, " ada@uni.edu ", "edusync://reset-password")
            .await
            .unwrap();

        assert_eq!(nav, NavAction::Navigate(Screen::Login));
        assert_eq!(
            backend.calls(),
            vec![Call::ResetPassword {
                email: "ada@uni.edu".into(),
                redirect_to: "edusync://reset-password".into(),
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_email_is_rejected_locally() {
        let backend = MemoryBackend::new();

        let err = request_password_reset(&backend, "  ", "edusync://reset-password")
            .await
            .unwrap_err();

        assert!(err.is_local());
        assert!(backend.calls().is_empty());
    }

    #[tokio::test]
    async fn test_service_error_is_shown() {
        let backend = MemoryBackend::new();
        backend.fail_on(
            Op::ResetPassword,
            BackendError::new("For security purposes, you can only request this once every 60 seconds"),
        );

        let err = request_password_reset(&backend, "ada@uni.edu", "edusync://reset-password")
            .await
            .unwrap_err();

        assert!(err.to_string().starts_with("For security purposes"));
    }
}
