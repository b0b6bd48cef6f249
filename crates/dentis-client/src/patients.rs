//! Patient service client: records and reviews.

use dentis_paging::{Page, PageFetcher, PageQuery, PagingResult};
use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::transport::{HttpTransport, Service};

/// Tracing target for patient operations.
pub const TRACING_TARGET: &str = "dentis_client::patients";

/// A patient record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    /// Unique patient identifier.
    pub id: Uuid,
    /// Full display name.
    pub full_name: String,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    /// Contact phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Date of birth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_of_birth: Option<Date>,
    /// When the record was created.
    pub created_at: Timestamp,
}

/// A published patient review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Unique review identifier.
    pub id: Uuid,
    /// Display name of the reviewer.
    pub patient_name: String,
    /// Star rating, 1 through 5.
    pub rating: u8,
    /// Review text.
    pub comment: String,
    /// When the review was submitted.
    pub created_at: Timestamp,
}

/// Payload for submitting a review.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReview {
    /// Display name of the reviewer.
    #[validate(length(min = 1, max = 120))]
    pub patient_name: String,
    /// Star rating, 1 through 5.
    #[validate(range(min = 1, max = 5))]
    pub rating: u8,
    /// Review text.
    #[validate(length(max = 2000))]
    pub comment: String,
}

/// Client for the patient service.
#[derive(Clone, Debug)]
pub struct PatientClient {
    transport: HttpTransport,
}

impl PatientClient {
    /// Creates a new patient client over the shared transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Fetches a single patient record.
    pub async fn get(&self, id: Uuid) -> ApiResult<Patient> {
        self.transport
            .get(Service::Patients, &format!("patients/{id}"), None::<&()>)
            .await
    }

    /// Lists one page of reviews matching the query.
    pub async fn list_reviews(&self, query: &PageQuery) -> ApiResult<Page<Review>> {
        self.transport
            .get(Service::Patients, "reviews", Some(query))
            .await
    }

    /// Submits a new review.
    pub async fn submit_review(&self, review: &SubmitReview) -> ApiResult<Review> {
        review.validate()?;

        let created: Review = self
            .transport
            .post(Service::Patients, "reviews", review)
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            review_id = %created.id,
            rating = created.rating,
            "Review submitted"
        );

        Ok(created)
    }
}

#[async_trait::async_trait]
impl PageFetcher for PatientClient {
    type Item = Review;

    async fn fetch_page(&self, query: &PageQuery) -> PagingResult<Page<Review>> {
        Ok(self.list_reviews(query).await?)
    }
}
