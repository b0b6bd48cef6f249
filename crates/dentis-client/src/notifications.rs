//! Account notification client.

use dentis_paging::{Page, PageFetcher, PageQuery, PagingResult};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use crate::error::ApiResult;
use crate::transport::{HttpTransport, Service};

/// Tracing target for notification operations.
pub const TRACING_TARGET: &str = "dentis_client::notifications";

/// Category of an account notification.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum NotificationType {
    /// Appointment booked, confirmed, or cancelled.
    Appointment,
    /// Lab order changed status.
    LabOrder,
    /// Inventory item dropped below its threshold.
    LowStock,
    /// Invoice issued or paid.
    Billing,
    /// New internal chat message.
    Chat,
    /// Platform announcement.
    #[default]
    System,
}

/// An account notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// Notification category.
    pub notify_type: NotificationType,
    /// Notification title.
    pub title: String,
    /// Notification message.
    pub message: String,
    /// Whether the notification has been read.
    pub is_read: bool,
    /// Related entity ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_id: Option<Uuid>,
    /// When the notification was created.
    pub created_at: Timestamp,
}

/// Unread notification count for the account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadStatus {
    /// Number of unread notifications.
    pub unread_count: u64,
}

/// Client for account notifications.
#[derive(Clone, Debug)]
pub struct NotificationClient {
    transport: HttpTransport,
}

impl NotificationClient {
    /// Creates a new notification client over the shared transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Lists one page of notifications for the authenticated account.
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Notification>> {
        self.transport
            .get(Service::Auth, "notifications", Some(query))
            .await
    }

    /// Returns the count of unread notifications.
    pub async fn unread_status(&self) -> ApiResult<UnreadStatus> {
        self.transport
            .get(Service::Auth, "notifications/unread", None::<&()>)
            .await
    }

    /// Marks every unread notification as read.
    ///
    /// Returns the updated unread status (always zero on success).
    pub async fn mark_all_read(&self) -> ApiResult<UnreadStatus> {
        let status: UnreadStatus = self
            .transport
            .post(Service::Auth, "notifications/read", &serde_json::json!({}))
            .await?;

        tracing::debug!(
            target: TRACING_TARGET,
            unread_count = status.unread_count,
            "Notifications marked as read"
        );

        Ok(status)
    }
}

#[async_trait::async_trait]
impl PageFetcher for NotificationClient {
    type Item = Notification;

    async fn fetch_page(&self, query: &PageQuery) -> PagingResult<Page<Notification>> {
        Ok(self.list(query).await?)
    }
}
