//! Exams service.

use async_trait::async_trait;
use canteen::{exams::ExamWindow, menu::Listing};
use mockall::automock;

use crate::{client::ApiClient, domain::exams::errors::ExamsServiceError};

#[derive(Debug, Clone)]
pub struct HttpExamsService {
    client: ApiClient,
}

impl HttpExamsService {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ExamsService for HttpExamsService {
    async fn exams_next_24_hours(&self) -> Result<Vec<ExamWindow>, ExamsServiceError> {
        let exams: Listing<ExamWindow> = self.client.get("/exams/next-24-hours").await?;

        Ok(exams.into_vec())
    }
}

#[automock]
#[async_trait]
pub trait ExamsService: Send + Sync {
    /// Exams scheduled within the next 24 hours.
    async fn exams_next_24_hours(&self) -> Result<Vec<ExamWindow>, ExamsServiceError>;
}
