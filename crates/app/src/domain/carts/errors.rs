//! Carts service errors.

use thiserror::Error;

use crate::client::ApiError;

#[derive(Debug, Error)]
pub enum CartsServiceError {
    #[error("cart item not found")]
    NotFound,

    #[error("session expired, please log in again")]
    Unauthorized,

    #[error("carts api error")]
    Api(#[source] ApiError),
}

impl From<ApiError> for CartsServiceError {
    fn from(error: ApiError) -> Self {
        if error.is_unauthorized() {
            return Self::Unauthorized;
        }

        if error.is_not_found() {
            return Self::NotFound;
        }

        Self::Api(error)
    }
}
