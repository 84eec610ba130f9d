//! Orders service errors.

use canteen::order_errors::{ClassifiedOrderError, ErrorPayload, classify};
use thiserror::Error;

use crate::client::ApiError;

#[derive(Debug, Error)]
pub enum OrdersServiceError {
    /// The API refused the order.
    #[error(transparent)]
    Rejected(ClassifiedOrderError),

    #[error("order not found")]
    NotFound,

    #[error("order can no longer be cancelled")]
    NotCancellable,

    #[error("session expired, please log in again")]
    Unauthorized,

    #[error("orders api error")]
    Api(#[source] ApiError),
}

impl OrdersServiceError {
    /// Classify a failed order creation.
    pub(crate) fn rejected(error: ApiError) -> Self {
        match error {
            ApiError::Status { status, body } => {
                Self::Rejected(classify(Some(status), &ErrorPayload::from_body(&body)))
            }
            other => Self::Api(other),
        }
    }
}

impl From<ApiError> for OrdersServiceError {
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

#[cfg(test)]
mod tests {
    use canteen::order_errors::OrderErrorKind;

    use super::*;

    #[test]
    fn failed_creation_is_classified_from_the_body() {
        let error = OrdersServiceError::rejected(ApiError::Status {
            status: 400,
            body: r#"{"errorType":"UNAVAILABLE_ITEMS_ERROR","unavailableItems":[{"name":"Samosa"}]}"#
                .to_string(),
        });

        let OrdersServiceError::Rejected(classified) = error else {
            panic!("expected a classified rejection, got {error:?}");
        };

        assert_eq!(classified.kind(), OrderErrorKind::UnavailableItemsError);
        assert!(classified.message().contains("Samosa"));
    }

    #[test]
    fn unauthorized_creation_is_an_authentication_rejection() {
        let error = OrdersServiceError::rejected(ApiError::Status {
            status: 401,
            body: String::new(),
        });

        assert!(
            matches!(&error, OrdersServiceError::Rejected(classified) if classified.forces_logout()),
            "expected forced logout, got {error:?}"
        );
    }

    #[test]
    fn other_statuses_map_to_service_errors() {
        let not_found = OrdersServiceError::from(ApiError::Status {
            status: 404,
            body: String::new(),
        });
        let forbidden = OrdersServiceError::from(ApiError::Status {
            status: 403,
            body: String::new(),
        });

        assert!(matches!(not_found, OrdersServiceError::NotFound));
        assert!(matches!(forbidden, OrdersServiceError::Unauthorized));
    }
}
