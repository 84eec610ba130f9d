//! Feedback Models

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::domain::feedback::errors::FeedbackServiceError;

/// A star rating from 1 to 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(into = "u8")]
pub struct Rating(u8);

impl Rating {
    /// Number of stars.
    pub fn stars(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for Rating {
    type Error = FeedbackServiceError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(FeedbackServiceError::InvalidRating(value))
        }
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

/// Feedback to submit for a delivered order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub order_id: String,
    pub rating: Rating,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub comment: String,
}

/// Feedback as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    #[serde(default, alias = "order")]
    pub order_id: String,

    pub rating: u8,

    #[serde(default)]
    pub comment: String,

    #[serde(default)]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FeedbackEligibility {
    pub(crate) can_submit: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum FeedbackResponse {
    Bare(Feedback),
    Wrapped { feedback: Option<Feedback> },
}

impl From<FeedbackResponse> for Option<Feedback> {
    fn from(response: FeedbackResponse) -> Self {
        match response {
            FeedbackResponse::Wrapped { feedback } => feedback,
            FeedbackResponse::Bare(feedback) => Some(feedback),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn rating_must_be_one_to_five() {
        assert!(matches!(
            Rating::try_from(0),
            Err(FeedbackServiceError::InvalidRating(0))
        ));
        assert!(matches!(
            Rating::try_from(6),
            Err(FeedbackServiceError::InvalidRating(6))
        ));
        assert_eq!(Rating::try_from(5).map(Rating::stars).ok(), Some(5));
    }

    #[test]
    fn new_feedback_serializes_rating_as_number() -> TestResult {
        let feedback = NewFeedback {
            order_id: "o1".to_string(),
            rating: Rating::try_from(4)?,
            comment: String::new(),
        };

        assert_eq!(
            serde_json::to_value(feedback)?,
            json!({ "orderId": "o1", "rating": 4 })
        );

        Ok(())
    }

    #[test]
    fn feedback_response_accepts_wrapped_and_bare() -> TestResult {
        let wrapped: FeedbackResponse =
            serde_json::from_value(json!({ "feedback": { "order": "o1", "rating": 5 } }))?;
        let empty: FeedbackResponse = serde_json::from_value(json!({ "feedback": null }))?;
        let bare: FeedbackResponse =
            serde_json::from_value(json!({ "orderId": "o2", "rating": 3, "comment": "ok" }))?;

        assert_eq!(
            Option::<Feedback>::from(wrapped).map(|feedback| feedback.order_id),
            Some("o1".to_string())
        );
        assert!(Option::<Feedback>::from(empty).is_none());
        assert_eq!(
            Option::<Feedback>::from(bare).map(|feedback| feedback.rating),
            Some(3)
        );

        Ok(())
    }
}
