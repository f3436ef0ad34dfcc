//! # Backend: the hosted auth + row-storage service as a trait
//!
//! Everything EduSync persists lives in an external service. [`Backend`] is the
//! whole surface the app consumes from it: four auth calls, a current-user read,
//! and select/insert/update against a named table with a single equality filter.
//!
//! Implementations:
//! - [`crate::MemoryBackend`] keeps everything in process memory (tests, demo mode).
//! - `api::HostedClient` speaks HTTP to the hosted service.
//!
//! The trait is object-safe so the app can build one client at startup and hand
//! out `Arc<dyn Backend>` to every screen.

use async_trait::async_trait;

use crate::error::BackendError;
use crate::models::AuthUser;

/// A row as exchanged with the row store: a JSON object keyed by column name.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Equality filter (`column = value`). The only filter shape the app issues.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filter {
    pub column: String,
    pub value: String,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            value: value.into(),
        }
    }

    /// Whether `row` satisfies this filter. Non-string cells compare by their JSON text.
    pub fn matches(&self, row: &Row) -> bool {
        match row.get(&self.column) {
            Some(serde_json::Value::String(s)) => *s == self.value,
            Some(serde_json::Value::Null) | None => false,
            Some(other) => other.to_string() == self.value,
        }
    }
}

/// Async interface to the hosted authentication and relational storage service.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Create an auth identity. `Ok(None)` means the service accepted the call
    /// but returned no user.
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthUser>, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<AuthUser>, BackendError>;

    async fn sign_out(&self) -> Result<(), BackendError>;

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), BackendError>;

    /// The identity of the current session, if any.
    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError>;

    /// Read `columns` (comma-separated, or `*`) from matching rows.
    async fn select(
        &self,
        table: &str,
        columns: &str,
        filter: &Filter,
    ) -> Result<Vec<Row>, BackendError>;

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<(), BackendError>;

    async fn update(&self, table: &str, fields: Row, filter: &Filter) -> Result<(), BackendError>;
}

/// Single-row read: exactly one row, or the service's "not a single object" error.
pub fn expect_single(mut rows: Vec<Row>) -> Result<Row, BackendError> {
    if rows.len() == 1 {
        if let Some(row) = rows.pop() {
            return Ok(row);
        }
    }
    Err(
        BackendError::new("JSON object requested, multiple (or no) rows returned")
            .with_code("PGRST116")
            .with_status(406),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_filter_matches_strings_and_numbers() {
        let r = row(json!({ "id": "abc", "year": 2 }));
        assert!(Filter::eq("id", "abc").matches(&r));
        assert!(!Filter::eq("id", "abd").matches(&r));
        assert!(Filter::eq("year", "2").matches(&r));
        assert!(!Filter::eq("missing", "abc").matches(&r));
    }

    #[test]
    fn test_expect_single() {
        let one = vec![row(json!({ "full_name": "Ada" }))];
        assert_eq!(
            expect_single(one).unwrap().get("full_name"),
            Some(&json!("Ada"))
        );

        let err = expect_single(Vec::new()).unwrap_err();
        assert_eq!(err.code.as_deref(), Some("PGRST116"));

        let two = vec![row(json!({})), row(json!({}))];
        assert!(expect_single(two).is_err());
    }
}
