//! Exams service errors.

use thiserror::Error;

use crate::client::ApiError;

#[derive(Debug, Error)]
pub enum ExamsServiceError {
    #[error("session expired, please log in again")]
    Unauthorized,

    #[error("exams api error")]
    Api(#[source] ApiError),
}

impl From<ApiError> for ExamsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_unauthorized() {
            return Self::Unauthorized;
        }

        Self::Api(error)
    }
}
