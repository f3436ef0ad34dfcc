//! # Domain models for EduSync accounts
//!
//! The hosted service keeps auth identities separately from profile rows, and
//! profile rows live in one table per role. These types describe both sides.
//!
//! ## Types
//!
//! | Type | Represents |
//! |------|-----------|
//! | [`Role`] | Which role table a profile lives in (`students` or `lecturers`). |
//! | [`AuthUser`] | An identity as returned by the auth service. |
//! | [`Session`] | Tokens plus the signed-in identity, held by the hosted client. |
//! | [`NewProfileRow`] | The row written once at registration. |
//! | [`UserProfile`] | A profile row read back, with role-specific fields folded into [`RoleDetails`]. |
//! | [`AcademicDetails`] | Student-only fields: faculty, program, enrolled courses. |
//!
//! Rows cross the backend boundary as untyped JSON objects ([`crate::Row`]);
//! the `from_row`/`to_row` helpers here are the only places that know column names.

use serde::{Deserialize, Serialize};

use crate::backend::Row;

pub const STUDENTS_TABLE: &str = "students";
pub const LECTURERS_TABLE: &str = "lecturers";

/// Account role, stored as a lowercase tag in the `role` column.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Student,
    Lecturer,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Student, Role::Lecturer];

    /// Table holding profiles of this role.
    pub fn table(self) -> &'static str {
        match self {
            Role::Student => STUDENTS_TABLE,
            Role::Lecturer => LECTURERS_TABLE,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Lecturer => "lecturer",
        }
    }

    /// Human label for pickers.
    pub fn label(self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Lecturer => "Lecturer",
        }
    }

    /// Name shown on a dashboard until the real one has been fetched.
    pub fn default_display_name(self) -> &'static str {
        self.label()
    }

    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "student" => Some(Role::Student),
            "lecturer" => Some(Role::Lecturer),
            _ => None,
        }
    }
}

/// Identity returned by the auth service.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Signed-in state held by a backend client.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: AuthUser,
}

/// Profile row inserted at registration.
///
/// Student-only columns are deliberately absent so they start out null.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewProfileRow {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: Role,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

impl NewProfileRow {
    pub fn to_row(&self) -> Row {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(map)) => map,
            // A struct of strings always serialises to an object.
            _ => Row::new(),
        }
    }
}

/// Student-only profile fields. Every field may be null in storage.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AcademicDetails {
    #[serde(default)]
    pub faculty: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub courses: Option<Vec<String>>,
}

impl AcademicDetails {
    pub fn from_row(row: &Row) -> Result<Self, serde_json::Error> {
        serde_json::from_value(serde_json::Value::Object(row.clone()))
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum RoleDetails {
    Student(AcademicDetails),
    Lecturer,
}

/// A profile row from either role table.
#[derive(Clone, Debug, PartialEq)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub created_at: String,
    pub details: RoleDetails,
}

#[derive(Deserialize)]
struct ProfileColumns {
    id: String,
    email: String,
    full_name: String,
    created_at: String,
}

impl UserProfile {
    /// Decode a row read from `role`'s table.
    pub fn from_row(role: Role, row: &Row) -> Result<Self, serde_json::Error> {
        let value = serde_json::Value::Object(row.clone());
        let base: ProfileColumns = serde_json::from_value(value)?;
        let details = match role {
            Role::Student => RoleDetails::Student(AcademicDetails::from_row(row)?),
            Role::Lecturer => RoleDetails::Lecturer,
        };
        Ok(Self {
            id: base.id,
            email: base.email,
            full_name: base.full_name,
            created_at: base.created_at,
            details,
        })
    }

    pub fn role(&self) -> Role {
        match self.details {
            RoleDetails::Student(_) => Role::Student,
            RoleDetails::Lecturer => Role::Lecturer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_role_serialises_lowercase() {
        assert_eq!(serde_json::to_value(Role::Lecturer).unwrap(), json!("lecturer"));
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("admin"), None);
        assert_eq!(Role::Student.table(), "students");
        assert_eq!(Role::Lecturer.table(), "lecturers");
    }

    #[test]
    fn test_new_profile_row_has_no_student_columns() {
        let new_row = NewProfileRow {
            id: "u1".into(),
            email: "a@b.com".into(),
            full_name: "Ada".into(),
            role: Role::Student,
            created_at: "2024-01-01T00:00:00Z".into(),
        }
        .to_row();

        assert_eq!(new_row.get("role"), Some(&json!("student")));
        assert!(!new_row.contains_key("faculty"));
        assert!(!new_row.contains_key("program"));
        assert!(!new_row.contains_key("courses"));
    }

    #[test]
    fn test_student_profile_from_sparse_row() {
        let r = row(json!({
            "id": "u1",
            "email": "a@b.com",
            "full_name": "Ada",
            "role": "student",
            "created_at": "2024-01-01T00:00:00Z",
            "faculty": null
        }));
        let profile = UserProfile::from_row(Role::Student, &r).unwrap();
        assert_eq!(profile.role(), Role::Student);
        assert_eq!(
            profile.details,
            RoleDetails::Student(AcademicDetails::default())
        );
    }

    #[test]
    fn test_lecturer_profile_ignores_academic_columns() {
        let r = row(json!({
            "id": "u2",
            "email": "l@b.com",
            "full_name": "Grace",
            "created_at": "2024-01-01T00:00:00Z",
            "courses": ["CS 301"]
        }));
        let profile = UserProfile::from_row(Role::Lecturer, &r).unwrap();
        assert_eq!(profile.details, RoleDetails::Lecturer);
        assert_eq!(profile.full_name, "Grace");
    }
}
