//! Exams

use serde::{Deserialize, Serialize};

use crate::university_id::{RangeMatch, match_range};

/// An exam with the inclusive range of university IDs registered for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExamWindow {
    /// Exam identifier.
    #[serde(alias = "_id")]
    pub exam_id: String,

    /// Display name.
    pub exam_name: String,

    /// Date as sent by the backend.
    #[serde(default)]
    pub exam_date: String,

    /// Start time as sent by the backend.
    #[serde(default)]
    pub exam_time: String,

    /// Department sitting the exam.
    #[serde(default)]
    pub department: String,

    /// Semester sitting the exam.
    #[serde(default)]
    pub semester: String,

    /// First registered university ID.
    #[serde(default)]
    pub start_university_id: String,

    /// Last registered university ID.
    #[serde(default)]
    pub end_university_id: String,
}

impl ExamWindow {
    /// Match a user's university ID against this exam's registered range.
    pub fn match_university_id(&self, university_id: &str) -> RangeMatch {
        match_range(
            university_id,
            &self.start_university_id,
            &self.end_university_id,
        )
    }

    /// One line label for pickers and listings.
    pub fn label(&self) -> String {
        format!(
            "{} ({} {}, {} sem {})",
            self.exam_name, self.exam_date, self.exam_time, self.department, self.semester
        )
    }
}

/// Find an exam by id.
pub fn find_exam<'a>(exams: &'a [ExamWindow], exam_id: &str) -> Option<&'a ExamWindow> {
    exams.iter().find(|exam| exam.exam_id == exam_id)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::ExamWindow;

    pub(crate) fn exam(id: &str, start: &str, end: &str) -> ExamWindow {
        ExamWindow {
            exam_id: id.to_string(),
            exam_name: "Data Structures".to_string(),
            exam_date: "2026-10-19".to_string(),
            exam_time: "10:00".to_string(),
            department: "CS".to_string(),
            semester: "3".to_string(),
            start_university_id: start.to_string(),
            end_university_id: end.to_string(),
        }
    }
}
