//! # Student profile editor
//!
//! [`ProfileEditor`] is the editable copy of a student's faculty, program and
//! course list. It is loaded once when the Profile tab mounts, edited locally,
//! and written back in a single update. Nothing is saved implicitly; leaving
//! the screen discards unsaved edits.

use serde_json::json;
use store::{expect_single, AcademicDetails, Backend, Filter, Row, STUDENTS_TABLE};

use crate::error::AppError;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProfileEditor {
    pub faculty: String,
    pub program: String,
    pub courses: Vec<String>,
}

impl ProfileEditor {
    /// Missing values become an empty string or an empty list.
    pub fn from_details(details: AcademicDetails) -> Self {
        Self {
            faculty: details.faculty.unwrap_or_default(),
            program: details.program.unwrap_or_default(),
            courses: details.courses.unwrap_or_default(),
        }
    }

    pub fn set_faculty(&mut self, faculty: impl Into<String>) {
        self.faculty = faculty.into();
    }

    pub fn set_program(&mut self, program: impl Into<String>) {
        self.program = program.into();
    }

    /// Append `course` unless it is empty or already selected. Returns whether the list changed.
    pub fn add_course(&mut self, course: &str) -> bool {
        if course.is_empty() || self.courses.iter().any(|c| c == course) {
            return false;
        }
        self.courses.push(course.to_string());
        true
    }

    pub fn clear_courses(&mut self) {
        self.courses.clear();
    }

    /// "Clear Courses" is only offered when there is something to clear.
    pub fn can_clear(&self) -> bool {
        !self.courses.is_empty()
    }

    pub fn selected_summary(&self) -> String {
        if self.courses.is_empty() {
            "None".to_string()
        } else {
            self.courses.join(", ")
        }
    }

    fn to_update(&self) -> Row {
        let mut fields = Row::new();
        fields.insert("faculty".into(), json!(self.faculty));
        fields.insert("program".into(), json!(self.program));
        fields.insert("courses".into(), json!(self.courses));
        fields
    }
}

/// Load the editable profile fields for `student_id`.
pub async fn load_profile<B: Backend + ?Sized>(
    backend: &B,
    student_id: &str,
) -> Result<ProfileEditor, AppError> {
    let rows = backend
        .select(STUDENTS_TABLE, "faculty, program, courses", &Filter::eq("id", student_id))
        .await
        .map_err(AppError::ProfileFetch)?;
    let row = expect_single(rows).map_err(AppError::ProfileFetch)?;
    let details = AcademicDetails::from_row(&row)
        .map_err(|e| AppError::ProfileFetch(store::BackendError::new(e.to_string())))?;
    Ok(ProfileEditor::from_details(details))
}

/// Write faculty, program and courses back in one update.
pub async fn save_profile<B: Backend + ?Sized>(
    backend: &B,
    student_id: &str,
    editor: &ProfileEditor,
) -> Result<(), AppError> {
    backend
        .update(STUDENTS_TABLE, editor.to_update(), &Filter::eq("id", student_id))
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "profile update failed");
            AppError::ProfileUpdate(e)
        })?;
    tracing::info!(student_id, courses = editor.courses.len(), "profile saved");
    Ok(())
}
