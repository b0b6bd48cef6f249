//! Lab-order service client.

use dentis_paging::{Page, PageFetcher, PageQuery, PagingResult};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::transport::{HttpTransport, Service};

/// Tracing target for lab-order operations.
pub const TRACING_TARGET: &str = "dentis_client::lab_orders";

/// Processing status of a lab order.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum LabOrderStatus {
    /// Submitted, not yet picked up by the lab.
    #[default]
    Pending,
    /// The lab is working on the order.
    InProgress,
    /// Work finished and ready for pickup.
    Completed,
    /// Cancelled before completion.
    Cancelled,
}

/// A dental-lab work order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabOrder {
    /// Unique order identifier.
    pub id: Uuid,
    /// Clinic that placed the order.
    pub clinic_id: Uuid,
    /// Patient the work is for.
    pub patient_name: String,
    /// Kind of work ordered (crown, bridge, aligner, ...).
    pub work_type: String,
    /// Current processing status.
    pub status: LabOrderStatus,
    /// Free-form notes for the lab.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the clinic needs the work back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
    /// When the order was placed.
    pub created_at: Timestamp,
}

/// Payload for placing a new lab order.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabOrder {
    /// Patient the work is for.
    #[validate(length(min = 1, max = 120))]
    pub patient_name: String,
    /// Kind of work ordered.
    #[validate(length(min = 1, max = 120))]
    pub work_type: String,
    /// Free-form notes for the lab.
    #[validate(length(max = 2000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// When the clinic needs the work back.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Timestamp>,
}

/// Body for a status update.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StatusUpdate {
    status: LabOrderStatus,
}

/// Client for the lab-order service.
#[derive(Clone, Debug)]
pub struct LabOrderClient {
    transport: HttpTransport,
}

impl LabOrderClient {
    /// Creates a new lab-order client over the shared transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Lists one page of lab orders matching the query.
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<LabOrder>> {
        self.transport
            .get(Service::LabOrders, "orders", Some(query))
            .await
    }

    /// Fetches a single lab order.
    pub async fn get(&self, id: Uuid) -> ApiResult<LabOrder> {
        self.transport
            .get(Service::LabOrders, &format!("orders/{id}"), None::<&()>)
            .await
    }

    /// Places a new lab order.
    pub async fn create(&self, order: &CreateLabOrder) -> ApiResult<LabOrder> {
        order.validate()?;

        let created: LabOrder = self
            .transport
            .post(Service::LabOrders, "orders", order)
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            order_id = %created.id,
            work_type = %created.work_type,
            "Lab order placed"
        );

        Ok(created)
    }

    /// Moves a lab order to a new status.
    pub async fn update_status(&self, id: Uuid, status: LabOrderStatus) -> ApiResult<LabOrder> {
        let updated: LabOrder = self
            .transport
            .put(
                Service::LabOrders,
                &format!("orders/{id}/status"),
                &StatusUpdate { status },
            )
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            order_id = %updated.id,
            status = %updated.status,
            "Lab order status updated"
        );

        Ok(updated)
    }
}

#[async_trait::async_trait]
impl PageFetcher for LabOrderClient {
    type Item = LabOrder;

    async fn fetch_page(&self, query: &PageQuery) -> PagingResult<Page<LabOrder>> {
        Ok(self.list(query).await?)
    }
}
