//! Sign-out.

use store::Backend;

use crate::error::AppError;
use crate::nav::{NavAction, Screen};

/// End the session and reset navigation to Login. Unsaved screen state is dropped
/// with the screens themselves.
pub async fn sign_out<B: Backend + ?Sized>(backend: &B) -> Result<NavAction, AppError> {
    backend.sign_out().await.map_err(|e| {
        tracing::error!(error = %e, "sign-out failed");
        AppError::SignOut(e)
    })?;
    Ok(NavAction::Reset(Screen::Login))
}

#[cfg(test)]
mod tests {
    use super::*;
    use store::{BackendError, MemoryBackend, Op};

    #[tokio::test]
    async fn test_sign_out_resets_to_login() {
        let backend = MemoryBackend::new();
        backend.create_identity("ada@uni.edu", "secret1");
        backend.sign_in("ada@uni.edu", "secret1").await.unwrap();

        let nav = sign_out(&backend).await.unwrap();

        assert_eq!(nav, NavAction::Reset(Screen::Login));
        assert!(backend.session_user().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_failure() {
        let backend = MemoryBackend::new();
        backend.fail_on(Op::SignOut, BackendError::new("offline"));

        let err = sign_out(&backend).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to sign out");
    }
}
