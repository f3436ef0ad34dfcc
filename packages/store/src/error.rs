//! Error object returned by every [`crate::Backend`] call.

use thiserror::Error;

/// A failure reported by the hosted service (or the in-memory stand-in).
///
/// Only `message` is meant for people; `code` and `status` are kept so callers
/// can log them, but flows branch on the message text the same way the service's
/// own SDK consumers do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct BackendError {
    pub message: String,
    pub code: Option<String>,
    pub status: Option<u16>,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            status: None,
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// Case-insensitive substring test on the message.
    pub fn mentions(&self, needle: &str) -> bool {
        self.message
            .to_lowercase()
            .contains(&needle.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_is_message() {
        let err = BackendError::new("Invalid login credentials")
            .with_code("invalid_credentials")
            .with_status(400);
        assert_eq!(err.to_string(), "Invalid login credentials");
        assert_eq!(err.status, Some(400));
    }

    #[test]
    fn test_mentions_ignores_case() {
        let err = BackendError::new("User Already Registered");
        assert!(err.mentions("already registered"));
        assert!(!err.mentions("duplicate key"));
    }
}
