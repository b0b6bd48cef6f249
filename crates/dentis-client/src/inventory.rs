//! Clinic-inventory service client.

use dentis_paging::{Page, PageFetcher, PageQuery, PagingResult};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::transport::{HttpTransport, Service};

/// Tracing target for inventory operations.
pub const TRACING_TARGET: &str = "dentis_client::inventory";

/// A stocked inventory item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Unique item identifier.
    pub id: Uuid,
    /// Clinic that stocks the item.
    pub clinic_id: Uuid,
    /// Item name.
    pub name: String,
    /// Stock-keeping unit, if the clinic uses one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Units currently on hand.
    pub quantity: i64,
    /// Threshold below which the item counts as low stock.
    pub low_stock_threshold: i64,
    /// When the stock level last changed.
    pub updated_at: Timestamp,
}

impl InventoryItem {
    /// Returns whether the item is at or below its low-stock threshold.
    #[inline]
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.low_stock_threshold
    }
}

/// Payload for adding a new inventory item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInventoryItem {
    /// Item name.
    #[validate(length(min = 1, max = 120))]
    pub name: String,
    /// Stock-keeping unit.
    #[validate(length(max = 64))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sku: Option<String>,
    /// Initial units on hand.
    #[validate(range(min = 0))]
    pub quantity: i64,
    /// Low-stock threshold.
    #[validate(range(min = 0))]
    pub low_stock_threshold: i64,
}

/// A signed stock adjustment.
///
/// Negative deltas consume stock; the backend clamps the resulting quantity
/// at zero and is the source of truth for the final level.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StockAdjustment {
    /// Signed change in units.
    pub delta: i64,
    /// Why the stock level changed.
    #[validate(length(max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Client for the clinic-inventory service.
#[derive(Clone, Debug)]
pub struct InventoryClient {
    transport: HttpTransport,
}

impl InventoryClient {
    /// Creates a new inventory client over the shared transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Lists one page of inventory items matching the query.
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<InventoryItem>> {
        self.transport
            .get(Service::Inventory, "items", Some(query))
            .await
    }

    /// Adds a new item to the clinic's inventory.
    pub async fn create_item(&self, item: &CreateInventoryItem) -> ApiResult<InventoryItem> {
        item.validate()?;

        let created: InventoryItem = self
            .transport
            .post(Service::Inventory, "items", item)
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            item_id = %created.id,
            name = %created.name,
            "Inventory item created"
        );

        Ok(created)
    }

    /// Applies a signed stock adjustment to an item.
    pub async fn adjust_stock(
        &self,
        id: Uuid,
        adjustment: &StockAdjustment,
    ) -> ApiResult<InventoryItem> {
        adjustment.validate()?;

        let updated: InventoryItem = self
            .transport
            .post(
                Service::Inventory,
                &format!("items/{id}/adjustments"),
                adjustment,
            )
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            item_id = %updated.id,
            delta = adjustment.delta,
            quantity = updated.quantity,
            "Stock adjusted"
        );

        Ok(updated)
    }
}

#[async_trait::async_trait]
impl PageFetcher for InventoryClient {
    type Item = InventoryItem;

    async fn fetch_page(&self, query: &PageQuery) -> PagingResult<Page<InventoryItem>> {
        Ok(self.list(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param, query_param_is_missing};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::testing;

    use super::*;

    fn item_json(id: Uuid, quantity: i64) -> serde_json::Value {
        json!({
            "id": id,
            "clinicId": Uuid::new_v4(),
            "name": "Composite resin",
            "sku": "CR-200",
            "quantity": quantity,
            "lowStockThreshold": 5,
            "updatedAt": "2026-08-02T14:30:00Z",
        })
    }

    #[tokio::test]
    async fn list_passes_search_and_omits_wildcard_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/inventory/items"))
            .and(query_param("limit", "10"))
            .and(query_param("search", "resin"))
            .and(query_param_is_missing("status"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "items": [item_json(Uuid::new_v4(), 12)],
                "hasNextPage": false,
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = InventoryClient::new(testing::transport(&server.uri()));
        let query = PageQuery {
            limit: 10,
            cursor: None,
            status: None,
            search: Some("resin".into()),
        };

        let page = client.list(&query).await.expect("list");
        assert_eq!(page.items.len(), 1);
        assert!(!page.items[0].is_low_stock());
    }

    #[tokio::test]
    async fn adjust_stock_posts_signed_delta() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path(format!("/api/inventory/items/{id}/adjustments")))
            .and(body_json(json!({ "delta": -3, "reason": "used in surgery" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(item_json(id, 2)))
            .expect(1)
            .mount(&server)
            .await;

        let client = InventoryClient::new(testing::transport(&server.uri()));
        let adjustment = StockAdjustment {
            delta: -3,
            reason: Some("used in surgery".into()),
        };

        let updated = client.adjust_stock(id, &adjustment).await.expect("adjust");
        assert_eq!(updated.quantity, 2);
        assert!(updated.is_low_stock());
    }

    #[tokio::test]
    async fn create_item_rejects_negative_quantity_locally() {
        let server = MockServer::start().await;
        let client = InventoryClient::new(testing::transport(&server.uri()));

        let invalid = CreateInventoryItem {
            name: "Gloves".into(),
            sku: None,
            quantity: -1,
            low_stock_threshold: 0,
        };

        let result = client.create_item(&invalid).await;
        assert!(matches!(result, Err(crate::error::ApiError::Validation(_))));
        assert!(server.received_requests().await.expect("recorded").is_empty());
    }
}
