//! Feedback service errors.

use thiserror::Error;

use crate::client::ApiError;

#[derive(Debug, Error)]
pub enum FeedbackServiceError {
    #[error("rating must be between 1 and 5, got {0}")]
    InvalidRating(u8),

    #[error("feedback was already submitted for this order")]
    AlreadySubmitted,

    #[error("feedback is not available for this order yet")]
    NotEligible,

    #[error("order not found")]
    NotFound,

    #[error("session expired, please log in again")]
    Unauthorized,

    #[error("feedback api error")]
    Api(#[source] ApiError),
}

impl From<ApiError> for FeedbackServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_unauthorized() {
            return Self::Unauthorized;
        }

        if error.is_not_found() {
            return Self::NotFound;
        }

        if error.is_conflict() {
            return Self::AlreadySubmitted;
        }

        Self::Api(error)
    }
}
