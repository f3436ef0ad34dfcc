use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::backend::{Backend, Filter, Row};
use crate::error::BackendError;
use crate::models::AuthUser;

/// One recorded backend call, in issue order.
#[derive(Clone, Debug, PartialEq)]
pub enum Call {
    SignUp { email: String },
    SignIn { email: String },
    SignOut,
    ResetPassword { email: String, redirect_to: String },
    CurrentUser,
    Select { table: String, columns: String, filter: Filter },
    Insert { table: String, rows: Vec<Row> },
    Update { table: String, fields: Row, filter: Filter },
}

/// Operation selector for failure injection.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Op {
    SignUp,
    SignIn,
    SignOut,
    ResetPassword,
    CurrentUser,
    Select(String),
    Insert(String),
    Update(String),
}

impl Call {
    pub fn op(&self) -> Op {
        match self {
            Call::SignUp { .. } => Op::SignUp,
            Call::SignIn { .. } => Op::SignIn,
            Call::SignOut => Op::SignOut,
            Call::ResetPassword { .. } => Op::ResetPassword,
            Call::CurrentUser => Op::CurrentUser,
            Call::Select { table, .. } => Op::Select(table.clone()),
            Call::Insert { table, .. } => Op::Insert(table.clone()),
            Call::Update { table, .. } => Op::Update(table.clone()),
        }
    }
}

#[derive(Debug)]
struct Identity {
    id: String,
    email: String,
    password: String,
}

#[derive(Debug, Default)]
struct State {
    /// Keyed by lowercase email.
    identities: HashMap<String, Identity>,
    session: Option<AuthUser>,
    tables: HashMap<String, Vec<Row>>,
    calls: Vec<Call>,
    failures: HashMap<Op, BackendError>,
}

impl State {
    /// Record the call, then surface an injected failure for it if one is armed.
    fn enter(&mut self, call: Call) -> Result<(), BackendError> {
        let op = call.op();
        self.calls.push(call);
        match self.failures.get(&op) {
            Some(err) => {
                tracing::debug!(?op, error = %err, "injected failure");
                Err(err.clone())
            }
            None => Ok(()),
        }
    }
}

/// In-memory Backend for testing and the offline demo mode.
///
/// Clones share state, so a test can keep one handle for assertions while the
/// code under test owns another.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<State>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an auth identity directly, without recording a call. Returns its id.
    pub fn create_identity(&self, email: &str, password: &str) -> String {
        let id = uuid::Uuid::new_v4().to_string();
        let key = email.trim().to_lowercase();
        self.state.lock().unwrap().identities.insert(
            key.clone(),
            Identity {
                id: id.clone(),
                email: key,
                password: password.to_string(),
            },
        );
        id
    }

    /// Append a row to `table` without recording a call.
    pub fn seed_row(&self, table: &str, row: Row) {
        self.state
            .lock()
            .unwrap()
            .tables
            .entry(table.to_string())
            .or_default()
            .push(row);
    }

    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.state
            .lock()
            .unwrap()
            .tables
            .get(table)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().unwrap().calls.clear();
    }

    /// Make every subsequent call of `op` fail with `err`.
    pub fn fail_on(&self, op: Op, err: BackendError) {
        self.state.lock().unwrap().failures.insert(op, err);
    }

    pub fn clear_failure(&self, op: &Op) {
        self.state.lock().unwrap().failures.remove(op);
    }

    pub fn session_user(&self) -> Option<AuthUser> {
        self.state.lock().unwrap().session.clone()
    }

    pub fn identity_count(&self) -> usize {
        self.state.lock().unwrap().identities.len()
    }

    /// Tables read by `select`, in call order.
    pub fn selected_tables(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Select { table, .. } => Some(table),
                _ => None,
            })
            .collect()
    }
}

fn project(row: &Row, columns: &str) -> Row {
    if columns.trim() == "*" {
        return row.clone();
    }
    columns
        .split(',')
        .map(str::trim)
        .filter_map(|col| row.get(col).map(|v| (col.to_string(), v.clone())))
        .collect()
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn sign_up(&self, email: &str, password: &str) -> Result<Option<AuthUser>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Call::SignUp {
            email: email.to_string(),
        })?;

        let key = email.trim().to_lowercase();
        if state.identities.contains_key(&key) {
            return Err(BackendError::new("User already registered")
                .with_code("user_already_exists")
                .with_status(422));
        }
        if password.chars().count() < 6 {
            return Err(BackendError::new("Password should be at least 6 characters.")
                .with_code("weak_password")
                .with_status(422));
        }

        let id = uuid::Uuid::new_v4().to_string();
        state.identities.insert(
            key.clone(),
            Identity {
                id: id.clone(),
                email: key.clone(),
                password: password.to_string(),
            },
        );
        let user = AuthUser {
            id,
            email: Some(key),
        };
        state.session = Some(user.clone());
        Ok(Some(user))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Option<AuthUser>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Call::SignIn {
            email: email.to_string(),
        })?;

        let key = email.trim().to_lowercase();
        let user = match state.identities.get(&key) {
            Some(identity) if identity.password == password => AuthUser {
                id: identity.id.clone(),
                email: Some(identity.email.clone()),
            },
            _ => {
                return Err(BackendError::new("Invalid login credentials")
                    .with_code("invalid_credentials")
                    .with_status(400))
            }
        };
        state.session = Some(user.clone());
        Ok(Some(user))
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Call::SignOut)?;
        state.session = None;
        Ok(())
    }

    async fn reset_password_for_email(
        &self,
        email: &str,
        redirect_to: &str,
    ) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Call::ResetPassword {
            email: email.to_string(),
            redirect_to: redirect_to.to_string(),
        })
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Call::CurrentUser)?;
        Ok(state.session.clone())
    }

    async fn select(
        &self,
        table: &str,
        columns: &str,
        filter: &Filter,
    ) -> Result<Vec<Row>, BackendError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Call::Select {
            table: table.to_string(),
            columns: columns.to_string(),
            filter: filter.clone(),
        })?;

        Ok(state
            .tables
            .get(table)
            .map(|rows| {
                rows.iter()
                    .filter(|r| filter.matches(r))
                    .map(|r| project(r, columns))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn insert(&self, table: &str, rows: Vec<Row>) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Call::Insert {
            table: table.to_string(),
            rows: rows.clone(),
        })?;

        let existing = state.tables.entry(table.to_string()).or_default();
        for row in &rows {
            if let Some(id) = row.get("id") {
                if existing.iter().any(|r| r.get("id") == Some(id)) {
                    return Err(BackendError::new(format!(
                        "duplicate key value violates unique constraint \"{table}_pkey\""
                    ))
                    .with_code("23505")
                    .with_status(409));
                }
            }
        }
        existing.extend(rows);
        Ok(())
    }

    async fn update(&self, table: &str, fields: Row, filter: &Filter) -> Result<(), BackendError> {
        let mut state = self.state.lock().unwrap();
        state.enter(Call::Update {
            table: table.to_string(),
            fields: fields.clone(),
            filter: filter.clone(),
        })?;

        if let Some(rows) = state.tables.get_mut(table) {
            for row in rows.iter_mut().filter(|r| filter.matches(r)) {
                for (k, v) in &fields {
                    row.insert(k.clone(), v.clone());
                }
            }
        }
        Ok(())
    }
}
