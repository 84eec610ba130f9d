//! Priority Orders
//!
//! A priority order is prepared ahead of the queue. Students may ask for priority
//! because of an exam they are registered for, faculty because of their role, and
//! anyone for medical or other reasons with an explanation.
//!
//! [`resolve`] runs the same checks the backend runs so that obviously ineligible
//! requests fail before any network round trip. The backend's verdict is still the
//! one that counts.

use std::{collections::BTreeMap, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::exams::{ExamWindow, find_exam};

/// Message shown when an exam priority is requested but nothing is scheduled.
pub const NO_EXAMS_MESSAGE: &str =
    "No exams are scheduled in the next 24 hours. Please resubmit without priority.";

/// Message shown when no exam was picked.
pub const SELECT_EXAM_MESSAGE: &str = "Please select an exam.";

/// A command line or config value that names no known option.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} {value:?}")]
pub struct UnknownOption {
    kind: &'static str,
    value: String,
}

impl UnknownOption {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// User role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Enrolled student.
    #[default]
    Student,

    /// Faculty or staff member.
    Faculty,
}

impl Role {
    /// Priority reasons this role may choose from.
    pub fn priority_reasons(self) -> &'static [PriorityReason] {
        match self {
            Self::Student => &[
                PriorityReason::Exam,
                PriorityReason::Medical,
                PriorityReason::Other,
            ],
            Self::Faculty => &[
                PriorityReason::Faculty,
                PriorityReason::Medical,
                PriorityReason::Other,
            ],
        }
    }

    /// Whether this role may choose the given reason.
    pub fn allows(self, reason: PriorityReason) -> bool {
        self.priority_reasons().contains(&reason)
    }
}

impl FromStr for Role {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Self::Student),
            "faculty" => Ok(Self::Faculty),
            _ => Err(UnknownOption::new("role", value)),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Student => "student",
            Self::Faculty => "faculty",
        })
    }
}

/// Why priority is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityReason {
    /// Upcoming exam. Students only.
    Exam,

    /// Faculty duties. Faculty only.
    Faculty,

    /// Medical reasons.
    Medical,

    /// Anything else, explained in the details.
    Other,
}

impl FromStr for PriorityReason {
    type Err = UnknownOption;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "exam" => Ok(Self::Exam),
            "faculty" => Ok(Self::Faculty),
            "medical" => Ok(Self::Medical),
            "other" => Ok(Self::Other),
            _ => Err(UnknownOption::new("priority reason", value)),
        }
    }
}

impl fmt::Display for PriorityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Exam => "exam",
            Self::Faculty => "faculty",
            Self::Medical => "medical",
            Self::Other => "other",
        })
    }
}

/// The priority section of the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PriorityRequest {
    /// Whether priority was requested at all.
    #[serde(rename = "isPriority")]
    pub enabled: bool,

    /// Selected reason.
    #[serde(rename = "priorityReason", skip_serializing_if = "Option::is_none")]
    pub reason: Option<PriorityReason>,

    /// Free text explanation.
    #[serde(rename = "priorityDetails")]
    pub details: String,

    /// Selected exam, for exam priority.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_id: Option<String>,
}

impl PriorityRequest {
    /// A request without priority.
    pub fn none() -> Self {
        Self::default()
    }
}

/// Form fields that eligibility errors attach to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum PriorityField {
    /// The reason selector.
    #[serde(rename = "priorityReason")]
    Reason,

    /// The exam selector.
    #[serde(rename = "examId")]
    ExamId,

    /// The details text box.
    #[serde(rename = "priorityDetails")]
    Details,
}

impl PriorityField {
    /// Field name as used by the form and the backend.
    pub fn name(self) -> &'static str {
        match self {
            Self::Reason => "priorityReason",
            Self::ExamId => "examId",
            Self::Details => "priorityDetails",
        }
    }
}

impl fmt::Display for PriorityField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of the local eligibility check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Eligibility {
    errors: BTreeMap<PriorityField, String>,
}

impl Eligibility {
    /// Whether the request may be submitted.
    pub fn allowed(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field errors, keyed by field.
    pub fn errors(&self) -> &BTreeMap<PriorityField, String> {
        &self.errors
    }

    /// The error attached to a field, if any.
    pub fn error(&self, field: PriorityField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    fn reject(&mut self, field: PriorityField, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }
}

/// Check whether a priority request may be submitted.
///
/// `available_exams` are the exams scheduled within the next 24 hours and
/// `university_id` is the signed-in user's ID, when known.
pub fn resolve(
    role: Role,
    university_id: Option<&str>,
    request: &PriorityRequest,
    available_exams: &[ExamWindow],
) -> Eligibility {
    let mut eligibility = Eligibility::default();

    if !request.enabled {
        return eligibility;
    }

    match request.reason {
        None => eligibility.reject(PriorityField::Reason, "Please select a priority reason."),
        Some(reason) if !role.allows(reason) => eligibility.reject(
            PriorityField::Reason,
            format!("The {reason} priority reason is not available to {role} accounts."),
        ),
        Some(_) => {}
    }

    if request.reason == Some(PriorityReason::Exam) {
        check_exam(
            &mut eligibility,
            role,
            university_id,
            request,
            available_exams,
        );
    }

    if request.details.trim().is_empty() {
        eligibility.reject(
            PriorityField::Details,
            "Please explain why this order needs priority.",
        );
    }

    eligibility
}

fn check_exam(
    eligibility: &mut Eligibility,
    role: Role,
    university_id: Option<&str>,
    request: &PriorityRequest,
    available_exams: &[ExamWindow],
) {
    if available_exams.is_empty() {
        eligibility.reject(PriorityField::ExamId, NO_EXAMS_MESSAGE);

        return;
    }

    if role != Role::Student {
        return;
    }

    let Some(exam) = request
        .exam_id
        .as_deref()
        .and_then(|exam_id| find_exam(available_exams, exam_id))
    else {
        eligibility.reject(PriorityField::ExamId, SELECT_EXAM_MESSAGE);

        return;
    };

    let verdict = exam.match_university_id(university_id.unwrap_or_default());

    if let Some(rejection) = verdict.rejection() {
        eligibility.reject(PriorityField::ExamId, rejection.to_string());
    }
}

#[cfg(test)]
mod tests {
    use crate::exams::fixtures::exam;

    use super::*;

    fn exam_request(exam_id: Option<&str>) -> PriorityRequest {
        PriorityRequest {
            enabled: true,
            reason: Some(PriorityReason::Exam),
            details: "Exam at 10".to_string(),
            exam_id: exam_id.map(str::to_string),
        }
    }

    fn cs_exams() -> Vec<ExamWindow> {
        vec![exam("ds", "22FE05CS050", "22FE05CS150")]
    }

    #[test]
    fn disabled_priority_is_always_allowed() {
        let request = PriorityRequest {
            enabled: false,
            reason: Some(PriorityReason::Faculty),
            details: String::new(),
            exam_id: Some("missing".to_string()),
        };

        let eligibility = resolve(Role::Student, None, &request, &[]);

        assert!(eligibility.allowed());
        assert!(eligibility.errors().is_empty());
    }

    #[test]
    fn exam_priority_within_range_is_allowed() {
        let eligibility = resolve(
            Role::Student,
            Some("22FE05CS101"),
            &exam_request(Some("ds")),
            &cs_exams(),
        );

        assert!(eligibility.allowed(), "errors: {:?}", eligibility.errors());
    }

    #[test]
    fn exam_priority_without_exams_is_rejected() {
        let eligibility = resolve(
            Role::Student,
            Some("22FE05CS101"),
            &exam_request(Some("ds")),
            &[],
        );

        assert!(!eligibility.allowed());
        assert_eq!(eligibility.error(PriorityField::ExamId), Some(NO_EXAMS_MESSAGE));
    }

    #[test]
    fn exam_priority_without_selection_is_rejected() {
        let eligibility = resolve(
            Role::Student,
            Some("22FE05CS101"),
            &exam_request(None),
            &cs_exams(),
        );

        assert_eq!(
            eligibility.error(PriorityField::ExamId),
            Some(SELECT_EXAM_MESSAGE)
        );
    }

    #[test]
    fn exam_priority_with_unknown_exam_is_rejected() {
        let eligibility = resolve(
            Role::Student,
            Some("22FE05CS101"),
            &exam_request(Some("elsewhere")),
            &cs_exams(),
        );

        assert_eq!(
            eligibility.error(PriorityField::ExamId),
            Some(SELECT_EXAM_MESSAGE)
        );
    }

    #[test]
    fn exam_priority_out_of_range_carries_matcher_reason() {
        let eligibility = resolve(
            Role::Student,
            Some("22FE05CS201"),
            &exam_request(Some("ds")),
            &cs_exams(),
        );

        let message = eligibility.error(PriorityField::ExamId).unwrap_or_default();

        assert!(message.contains("not within"), "unexpected message: {message}");
    }

    #[test]
    fn exam_priority_without_university_id_reports_missing_information() {
        let eligibility = resolve(Role::Student, None, &exam_request(Some("ds")), &cs_exams());

        let message = eligibility.error(PriorityField::ExamId).unwrap_or_default();

        assert!(message.starts_with("Missing ID information"), "unexpected message: {message}");
    }

    #[test]
    fn faculty_cannot_choose_exam_reason() {
        let eligibility = resolve(Role::Faculty, None, &exam_request(Some("ds")), &cs_exams());

        assert!(eligibility.error(PriorityField::Reason).is_some());
        assert!(eligibility.error(PriorityField::ExamId).is_none());
    }

    #[test]
    fn students_cannot_choose_faculty_reason() {
        let request = PriorityRequest {
            enabled: true,
            reason: Some(PriorityReason::Faculty),
            details: "Lecture".to_string(),
            exam_id: None,
        };

        let eligibility = resolve(Role::Student, Some("22FE05CS101"), &request, &[]);

        assert!(eligibility.error(PriorityField::Reason).is_some());
    }

    #[test]
    fn reason_must_be_selected() {
        let request = PriorityRequest {
            enabled: true,
            reason: None,
            details: "Something".to_string(),
            exam_id: None,
        };

        let eligibility = resolve(Role::Faculty, None, &request, &[]);

        assert!(eligibility.error(PriorityField::Reason).is_some());
    }

    #[test]
    fn details_are_required_for_every_reason() {
        for (role, reason) in [
            (Role::Student, PriorityReason::Medical),
            (Role::Faculty, PriorityReason::Faculty),
            (Role::Faculty, PriorityReason::Other),
        ] {
            let request = PriorityRequest {
                enabled: true,
                reason: Some(reason),
                details: "  ".to_string(),
                exam_id: None,
            };

            let eligibility = resolve(role, None, &request, &[]);

            assert!(
                eligibility.error(PriorityField::Details).is_some(),
                "{role} / {reason} should require details"
            );
            assert!(eligibility.error(PriorityField::Reason).is_none());
        }
    }

    #[test]
    fn options_parse_case_insensitively() {
        assert_eq!("Faculty".parse(), Ok(Role::Faculty));
        assert_eq!(" exam ".parse(), Ok(PriorityReason::Exam));
        assert!("dean".parse::<Role>().is_err());
    }

    #[test]
    fn request_serializes_with_backend_field_names() -> testresult::TestResult {
        let value = serde_json::to_value(exam_request(Some("ds")))?;

        assert_eq!(value["isPriority"], true);
        assert_eq!(value["priorityReason"], "exam");
        assert_eq!(value["priorityDetails"], "Exam at 10");
        assert_eq!(value["examId"], "ds");

        Ok(())
    }
}
