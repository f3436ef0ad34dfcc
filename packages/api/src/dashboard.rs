//! # Dashboard data and tabs
//!
//! Both dashboards load the same thing on mount: who is signed in and the full
//! name stored in their role table. The tab sets are fixed per role.

use store::{expect_single, Backend, Filter, Role};

use crate::error::AppError;

/// Identity and display name shown by a dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardIdentity {
    pub user_id: String,
    pub full_name: String,
}

/// Fetch the signed-in user and their full name from `role`'s table.
pub async fn load_dashboard<B: Backend + ?Sized>(
    backend: &B,
    role: Role,
) -> Result<DashboardIdentity, AppError> {
    let user = match backend.current_user().await {
        Ok(Some(user)) => user,
        Ok(None) => return Err(AppError::NoUser),
        Err(e) => {
            tracing::warn!(error = %e, "could not read current user");
            return Err(AppError::NoUser);
        }
    };

    let rows = backend
        .select(role.table(), "full_name", &Filter::eq("id", &user.id))
        .await?;
    let row = expect_single(rows)?;

    let full_name = row
        .get("full_name")
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| role.default_display_name().to_string());

    Ok(DashboardIdentity {
        user_id: user.id,
        full_name,
    })
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StudentTab {
    Home,
    Courseworks,
    Profile,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LecturerTab {
    Home,
    Courseworks,
    Profile,
}

impl StudentTab {
    pub const ALL: [StudentTab; 3] = [StudentTab::Home, StudentTab::Courseworks, StudentTab::Profile];

    pub fn label(self) -> &'static str {
        match self {
            StudentTab::Home => "Home",
            StudentTab::Courseworks => "Courseworks",
            StudentTab::Profile => "Profile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            StudentTab::Home => "Student Home",
            StudentTab::Courseworks => "Student Courseworks",
            StudentTab::Profile => "Student Profile",
        }
    }
}

impl LecturerTab {
    pub const ALL: [LecturerTab; 3] = [LecturerTab::Home, LecturerTab::Courseworks, LecturerTab::Profile];

    pub fn label(self) -> &'static str {
        match self {
            LecturerTab::Home => "Home",
            LecturerTab::Courseworks => "Courseworks",
            LecturerTab::Profile => "Profile",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            LecturerTab::Home => "Lecturer Home",
            LecturerTab::Courseworks => "Lecturer Courseworks",
            LecturerTab::Profile => "Lecturer Profile",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use store::{BackendError, MemoryBackend, Op, LECTURERS_TABLE, STUDENTS_TABLE};

    async fn signed_in(table: &str, name: &str) -> (MemoryBackend, String) {
        let backend = MemoryBackend::new();
        let id = backend.create_identity("user@uni.edu", "secret1");
        backend.seed_row(
            table,
            json!({ "id": id, "full_name": name }).as_object().cloned().unwrap(),
        );
        backend.sign_in("user@uni.edu", "secret1").await.unwrap();
        (backend, id)
    }

    #[tokio::test]
    async fn test_student_dashboard_loads_name_and_id() {
        let (backend, id) = signed_in(STUDENTS_TABLE, "Ada").await;

        let identity = load_dashboard(&backend, Role::Student).await.unwrap();
        assert_eq!(identity, DashboardIdentity { user_id: id, full_name: "Ada".into() });
    }

    #[tokio::test]
    async fn test_lecturer_dashboard_reads_lecturer_table() {
        let (backend, _) = signed_in(LECTURERS_TABLE, "Grace").await;

        let identity = load_dashboard(&backend, Role::Lecturer).await.unwrap();
        assert_eq!(identity.full_name, "Grace");
        assert_eq!(backend.selected_tables(), vec![LECTURERS_TABLE]);
    }

    #[tokio::test]
    async fn test_no_session_is_no_user() {
        let backend = MemoryBackend::new();
        let err = load_dashboard(&backend, Role::Student).await.unwrap_err();
        assert_eq!(err, AppError::NoUser);
        assert!(backend.selected_tables().is_empty());
    }

    #[tokio::test]
    async fn test_missing_row_is_an_error() {
        let (backend, _) = signed_in(LECTURERS_TABLE, "Grace").await;

        let err = load_dashboard(&backend, Role::Student).await.unwrap_err();
        assert_eq!(err.to_string(), "JSON object requested, multiple (or no) rows returned");
    }

    #[tokio::test]
    async fn test_query_failure_is_surfaced() {
        let (backend, _) = signed_in(STUDENTS_TABLE, "Ada").await;
        backend.fail_on(Op::Select(STUDENTS_TABLE.into()), BackendError::new("JWT expired"));

        let err = load_dashboard(&backend, Role::Student).await.unwrap_err();
        assert_eq!(err.to_string(), "JWT expired");
    }

    #[test]
    fn test_tab_titles() {
        assert_eq!(StudentTab::ALL.map(StudentTab::label), ["Home", "Courseworks", "Profile"]);
        assert_eq!(LecturerTab::Courseworks.title(), "Lecturer Courseworks");
        assert_eq!(StudentTab::Profile.title(), "Student Profile");
    }
}
