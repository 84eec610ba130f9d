//! Feedback service.

use async_trait::async_trait;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    client::{ApiClient, path_segment},
    domain::feedback::{
        errors::FeedbackServiceError,
        models::{Feedback, FeedbackEligibility, FeedbackResponse, NewFeedback},
    },
};

#[derive(Debug, Clone)]
pub struct HttpFeedbackService {
    client: ApiClient,
}

impl HttpFeedbackService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl FeedbackService for HttpFeedbackService {
    async fn can_submit_feedback(&self, order_id: String) -> Result<bool, FeedbackServiceError> {
        let eligibility: FeedbackEligibility = self
            .client
            .get(&format!("/feedback/can-submit/{}", path_segment(&order_id)))
            .await?;

        Ok(eligibility.can_submit)
    }

    async fn submit_feedback(&self, feedback: NewFeedback) -> Result<(), FeedbackServiceError> {
        let _created: serde_json::Value = self.client.post("/feedback", &feedback).await?;

        info!(order_id = %feedback.order_id, rating = feedback.rating.stars(), "feedback submitted");

        Ok(())
    }

    async fn order_feedback(
        &self,
        order_id: String,
    ) -> Result<Option<Feedback>, FeedbackServiceError> {
        match self
            .client
            .get::<FeedbackResponse>(&format!("/feedback/order/{}", path_segment(&order_id)))
            .await
        {
            Ok(response) => Ok(response.into()),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error.into()),
        }
    }
}

#[automock]
#[async_trait]
pub trait FeedbackService: Send + Sync {
    /// Whether the user may leave feedback for an order.
    async fn can_submit_feedback(&self, order_id: String) -> Result<bool, FeedbackServiceError>;

    /// Submit feedback for an order.
    async fn submit_feedback(&self, feedback: NewFeedback) -> Result<(), FeedbackServiceError>;

    /// Feedback already left for an order, if any.
    async fn order_feedback(
        &self,
        order_id: String,
    ) -> Result<Option<Feedback>, FeedbackServiceError>;
}

/// Whether to offer feedback for an order.
///
/// The probe is advisory: any failure allows feedback and the backend decides on
/// submission.
pub async fn feedback_allowed(service: &dyn FeedbackService, order_id: &str) -> bool {
    match service.can_submit_feedback(order_id.to_string()).await {
        Ok(allowed) => allowed,
        Err(error) => {
            warn!(%order_id, %error, "feedback eligibility check failed, allowing feedback");

            true
        }
    }
}

/// Submit feedback after checking the order is eligible for it.
///
/// # Errors
///
/// Returns [`FeedbackServiceError::NotEligible`] when the backend says feedback
/// cannot be left yet, or the submission error.
pub async fn submit_when_allowed(
    service: &dyn FeedbackService,
    feedback: NewFeedback,
) -> Result<(), FeedbackServiceError> {
    if !feedback_allowed(service, &feedback.order_id).await {
        return Err(FeedbackServiceError::NotEligible);
    }

    service.submit_feedback(feedback).await
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{client::ApiError, domain::feedback::models::Rating};

    use super::*;

    #[tokio::test]
    async fn probe_failure_allows_feedback() {
        let mut service = MockFeedbackService::new();

        service
            .expect_can_submit_feedback()
            .once()
            .withf(|order_id| order_id == "o1")
            .return_once(|_| {
                Err(FeedbackServiceError::Api(ApiError::Status {
                    status: 500,
                    body: String::new(),
                }))
            });

        service.expect_submit_feedback().never();

        assert!(feedback_allowed(&service, "o1").await);
    }

    #[tokio::test]
    async fn probe_answer_is_respected() {
        let mut service = MockFeedbackService::new();

        service
            .expect_can_submit_feedback()
            .once()
            .return_once(|_| Ok(false));

        assert!(!feedback_allowed(&service, "o1").await);
    }

    #[tokio::test]
    async fn ineligible_order_is_not_submitted() -> TestResult {
        let mut service = MockFeedbackService::new();

        service
            .expect_can_submit_feedback()
            .once()
            .return_once(|_| Ok(false));

        service.expect_submit_feedback().never();

        let result = submit_when_allowed(
            &service,
            NewFeedback {
                order_id: "o1".to_string(),
                rating: Rating::try_from(4)?,
                comment: String::new(),
            },
        )
        .await;

        assert!(
            matches!(result, Err(FeedbackServiceError::NotEligible)),
            "expected NotEligible, got {result:?}"
        );

        Ok(())
    }
}
