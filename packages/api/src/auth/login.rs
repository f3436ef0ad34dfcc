//! # Login and role resolution
//!
//! Identities live in the auth service; whether an identity is a student or a
//! lecturer is only known from which role table holds its profile row. Login
//! therefore signs in first and then asks the role tables in a fixed order:
//!
//! 1. `students`: exactly one row means a student. The lecturer table is not read.
//! 2. `lecturers`: exactly one row means a lecturer.
//! 3. Neither → [`AppError::RoleNotFound`].
//!
//! Any query failure stops the lookup and surfaces the service's own message.
//! A row present in both tables resolves as student, since students are asked
//! first. More than one row in a table is logged and treated as "not this role".

use store::{Backend, Filter, Role, UserProfile};

use crate::error::AppError;
use crate::nav::{NavAction, Screen};

/// A signed-in user whose role has been resolved.
#[derive(Clone, Debug, PartialEq)]
pub struct LoginOutcome {
    pub user_id: String,
    pub role: Role,
    /// The decoded role row, when it carries every profile field.
    pub profile: Option<UserProfile>,
}

impl LoginOutcome {
    pub fn role(&self) -> Role {
        self.role
    }

    /// History-clearing jump to the dashboard for this role.
    pub fn navigation(&self) -> NavAction {
        match self.role {
            Role::Student => NavAction::Reset(Screen::StudentDashboard),
            Role::Lecturer => NavAction::Reset(Screen::LecturerDashboard),
        }
    }
}

/// Sign in with `email`/`password` and resolve the account's role.
pub async fn login<B: Backend + ?Sized>(
    backend: &B,
    email: &str,
    password: &str,
) -> Result<LoginOutcome, AppError> {
    let user = backend
        .sign_in(email, password)
        .await
        .map_err(|e| AppError::Auth(e.message))?
        .ok_or(AppError::NoUser)?;

    let (role, profile) = resolve_role(backend, &user.id).await?;
    tracing::info!(user_id = %user.id, role = role.as_str(), "login resolved");

    Ok(LoginOutcome {
        user_id: user.id,
        role,
        profile,
    })
}

/// Find the role for `user_id`, asking the student table before the lecturer table.
///
/// A table answers for its role when it returns exactly one row. The row is
/// decoded into a [`UserProfile`] as a convenience; a sparse row still counts.
pub async fn resolve_role<B: Backend + ?Sized>(
    backend: &B,
    user_id: &str,
) -> Result<(Role, Option<UserProfile>), AppError> {
    let filter = Filter::eq("id", user_id);

    for role in Role::ALL {
        let rows = backend
            .select(role.table(), "*", &filter)
            .await
            .map_err(|e| AppError::Lookup(e.message))?;

        match rows.as_slice() {
            [row] => {
                let profile = match UserProfile::from_row(role, row) {
                    Ok(profile) => Some(profile),
                    Err(e) => {
                        tracing::warn!(user_id, table = role.table(), error = %e, "incomplete profile row");
                        None
                    }
                };
                return Ok((role, profile));
            }
            [] => {}
            rows => {
                tracing::warn!(
                    user_id,
                    table = role.table(),
                    rows = rows.len(),
                    "identity has several profile rows; ignoring this role"
                );
            }
        }
    }

    Err(AppError::RoleNotFound)
}
