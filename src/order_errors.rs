//! Order Errors
//!
//! Failed order submissions come back as a loosely structured JSON payload. This
//! module folds the payload and HTTP status into a closed set of error kinds, each
//! with a message fit to show the user.

use std::{fmt, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::priority::PriorityField;

/// How long to show an authentication error before logging the user out.
pub const FORCED_LOGOUT_DELAY: Duration = Duration::from_secs(2);

/// The closed set of order submission failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderErrorKind {
    /// The user's ID is outside the exam's registered range.
    UniversityIdRangeError,

    /// The user's ID is not comparable with the exam's range.
    UniversityIdFormatError,

    /// The user's ID or the exam's range is missing.
    MissingIdInformation,

    /// Exam priority without an exam.
    NoExamSelectedError,

    /// Some items went out of stock after they were added to the cart.
    UnavailableItemsError,

    /// Any other rejected field.
    ValidationError,

    /// The session is no longer valid.
    AuthenticationError,

    /// Everything else.
    UnclassifiedError,
}

impl OrderErrorKind {
    /// Parse the backend's `errorType` code.
    pub fn from_code(code: &str) -> Option<Self> {
        Some(match code.trim() {
            "UNIVERSITY_ID_RANGE_ERROR" => Self::UniversityIdRangeError,
            "UNIVERSITY_ID_FORMAT_ERROR" => Self::UniversityIdFormatError,
            "MISSING_ID_INFORMATION" => Self::MissingIdInformation,
            "NO_EXAM_SELECTED_ERROR" => Self::NoExamSelectedError,
            "UNAVAILABLE_ITEMS_ERROR" => Self::UnavailableItemsError,
            "VALIDATION_ERROR" => Self::ValidationError,
            "AUTHENTICATION_ERROR" => Self::AuthenticationError,
            "UNCLASSIFIED_ERROR" => Self::UnclassifiedError,
            _ => return None,
        })
    }

    /// The backend's code for this kind.
    pub fn code(self) -> &'static str {
        match self {
            Self::UniversityIdRangeError => "UNIVERSITY_ID_RANGE_ERROR",
            Self::UniversityIdFormatError => "UNIVERSITY_ID_FORMAT_ERROR",
            Self::MissingIdInformation => "MISSING_ID_INFORMATION",
            Self::NoExamSelectedError => "NO_EXAM_SELECTED_ERROR",
            Self::UnavailableItemsError => "UNAVAILABLE_ITEMS_ERROR",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::AuthenticationError => "AUTHENTICATION_ERROR",
            Self::UnclassifiedError => "UNCLASSIFIED_ERROR",
        }
    }
}

impl fmt::Display for OrderErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An item the backend reported as unavailable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UnavailableItem {
    /// Item name.
    pub name: String,
}

/// Error body returned by the order API.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorPayload {
    /// Machine readable error code.
    pub error_type: Option<String>,

    /// Human readable summary.
    #[serde(alias = "error")]
    pub message: Option<String>,

    /// Extra detail.
    pub details: Option<String>,

    /// University ID the backend checked.
    pub student_id: Option<String>,

    /// Exam the backend checked against.
    pub exam_name: Option<String>,

    /// Items that went out of stock.
    pub unavailable_items: Vec<UnavailableItem>,
}

impl ErrorPayload {
    /// Parse a response body, treating anything unparseable as an empty payload
    /// with the raw body as its message.
    pub fn from_body(body: &str) -> Self {
        serde_json::from_str(body).unwrap_or_else(|_parse_error| {
            let body = body.trim();

            Self {
                message: (!body.is_empty()).then(|| body.to_string()),
                ..Self::default()
            }
        })
    }

    fn text(&self) -> String {
        [self.message.as_deref(), self.details.as_deref()]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase()
    }

    fn message_or(&self, fallback: &str) -> String {
        self.message
            .as_deref()
            .map(str::trim)
            .filter(|message| !message.is_empty())
            .unwrap_or(fallback)
            .to_string()
    }
}

/// A classified order failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ClassifiedOrderError {
    kind: OrderErrorKind,
    message: String,
    unavailable_items: Vec<String>,
}

impl ClassifiedOrderError {
    /// Build an error of the given kind with its default message.
    pub fn new(kind: OrderErrorKind) -> Self {
        classify_as(kind, &ErrorPayload::default())
    }

    /// Error kind.
    pub fn kind(&self) -> OrderErrorKind {
        self.kind
    }

    /// Message to show the user.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Names of items that went out of stock.
    pub fn unavailable_items(&self) -> &[String] {
        &self.unavailable_items
    }

    /// The form field this error belongs to, for inline display.
    pub fn field(&self) -> Option<PriorityField> {
        matches!(
            self.kind,
            OrderErrorKind::UniversityIdRangeError
                | OrderErrorKind::UniversityIdFormatError
                | OrderErrorKind::MissingIdInformation
                | OrderErrorKind::NoExamSelectedError
        )
        .then_some(PriorityField::ExamId)
    }

    /// Whether the user must be logged out.
    pub fn forces_logout(&self) -> bool {
        self.kind == OrderErrorKind::AuthenticationError
    }
}

/// Classify a failed order submission.
///
/// `status` is the HTTP status, when there was a response at all.
pub fn classify(status: Option<u16>, payload: &ErrorPayload) -> ClassifiedOrderError {
    classify_as(detect_kind(status, payload), payload)
}

fn detect_kind(status: Option<u16>, payload: &ErrorPayload) -> OrderErrorKind {
    if let Some(kind) = payload
        .error_type
        .as_deref()
        .and_then(OrderErrorKind::from_code)
    {
        return kind;
    }

    if !payload.unavailable_items.is_empty() {
        return OrderErrorKind::UnavailableItemsError;
    }

    if matches!(status, Some(401 | 403)) {
        return OrderErrorKind::AuthenticationError;
    }

    let text = payload.text();
    let words = Words::new(&text);
    let names_id = words.has_any(&["id", "ids", "universityid", "studentid"]);

    if words.has_phrase("not within") || (names_id && words.has("range")) {
        OrderErrorKind::UniversityIdRangeError
    } else if names_id && words.has("format") {
        OrderErrorKind::UniversityIdFormatError
    } else if names_id && words.has("missing") {
        OrderErrorKind::MissingIdInformation
    } else if words.has_prefix("select") && words.has_any(&["exam", "exams"]) {
        OrderErrorKind::NoExamSelectedError
    } else if words.has("unavailable") || words.has_phrase("no longer available") {
        OrderErrorKind::UnavailableItemsError
    } else if words.has_any(&["token", "unauthorized"]) || words.has_phrase("log in") {
        OrderErrorKind::AuthenticationError
    } else if matches!(status, Some(400 | 422)) && payload.message.is_some() {
        OrderErrorKind::ValidationError
    } else {
        OrderErrorKind::UnclassifiedError
    }
}

/// Lowercased message split into alphanumeric words.
struct Words<'a>(Vec<&'a str>);

impl<'a> Words<'a> {
    fn new(text: &'a str) -> Self {
        Self(
            text.split(|c: char| !c.is_alphanumeric())
                .filter(|word| !word.is_empty())
                .collect(),
        )
    }

    fn has(&self, word: &str) -> bool {
        self.0.contains(&word)
    }

    fn has_any(&self, words: &[&str]) -> bool {
        words.iter().any(|word| self.has(word))
    }

    fn has_prefix(&self, prefix: &str) -> bool {
        self.0.iter().any(|word| word.starts_with(prefix))
    }

    fn has_phrase(&self, phrase: &str) -> bool {
        let phrase: Vec<&str> = phrase.split(' ').collect();

        self.0.windows(phrase.len()).any(|window| window == phrase.as_slice())
    }
}

fn classify_as(kind: OrderErrorKind, payload: &ErrorPayload) -> ClassifiedOrderError {
    let unavailable_items: Vec<String> = payload
        .unavailable_items
        .iter()
        .map(|item| item.name.clone())
        .collect();

    let message = match kind {
        OrderErrorKind::UniversityIdRangeError => {
            match (payload.student_id.as_deref(), payload.exam_name.as_deref()) {
                (Some(student), Some(exam)) => format!(
                    "Your university ID {student} is not within the registered range for {exam}."
                ),
                _ => payload.message_or(
                    "Your university ID is not within the registered range for the selected exam.",
                ),
            }
        }
        OrderErrorKind::UniversityIdFormatError => payload.message_or(
            "Your university ID cannot be compared with the exam's registered ID range.",
        ),
        OrderErrorKind::MissingIdInformation => payload.message_or(
            "Missing ID information. Please make sure your profile has a university ID.",
        ),
        OrderErrorKind::NoExamSelectedError => {
            payload.message_or("Please select an exam for exam priority.")
        }
        OrderErrorKind::UnavailableItemsError if !unavailable_items.is_empty() => format!(
            "Some items in your cart are no longer available: {}. Please remove them and try again.",
            unavailable_items.join(", ")
        ),
        OrderErrorKind::UnavailableItemsError => {
            payload.message_or("Some items in your cart are no longer available.")
        }
        OrderErrorKind::ValidationError => payload.message_or("Please check your order details."),
        OrderErrorKind::AuthenticationError => {
            "Your session has expired. Please log in again.".to_string()
        }
        OrderErrorKind::UnclassifiedError => {
            payload.message_or("Failed to place your order. Please try again.")
        }
    };

    ClassifiedOrderError {
        kind,
        message,
        unavailable_items,
    }
}
