//! Menus service errors.

use thiserror::Error;

use crate::client::ApiError;

#[derive(Debug, Error)]
pub enum MenusServiceError {
    #[error("canteen not found")]
    NotFound,

    #[error("menus api error")]
    Api(#[source] ApiError),
}

impl From<ApiError> for MenusServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
