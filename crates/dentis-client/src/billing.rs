//! Billing service client: invoices and payments.

use dentis_paging::{Page, PageFetcher, PageQuery, PagingResult};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::transport::{HttpTransport, Service};

/// Tracing target for billing operations.
pub const TRACING_TARGET: &str = "dentis_client::billing";

/// Lifecycle status of an invoice.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum InvoiceStatus {
    /// Drafted, not yet sent to the patient.
    #[default]
    Draft,
    /// Issued and awaiting payment.
    Issued,
    /// Paid in full.
    Paid,
    /// Voided before payment.
    Void,
}

/// A patient invoice.
///
/// All monetary amounts are minor currency units (cents).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Unique invoice identifier.
    pub id: Uuid,
    /// Clinic that issued the invoice.
    pub clinic_id: Uuid,
    /// Patient display name.
    pub patient_name: String,
    /// Invoice total in cents.
    pub total_cents: i64,
    /// Amount paid so far in cents.
    pub amount_paid_cents: i64,
    /// Current lifecycle status.
    pub status: InvoiceStatus,
    /// When the invoice was issued.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<Timestamp>,
    /// When the invoice was fully paid.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_at: Option<Timestamp>,
}

impl Invoice {
    /// Returns the outstanding balance in cents.
    #[inline]
    pub fn balance_cents(&self) -> i64 {
        self.total_cents - self.amount_paid_cents
    }
}

/// Payload for recording a payment against an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordPayment {
    /// Amount received in cents.
    #[validate(range(min = 1))]
    pub amount_cents: i64,
    /// Payment method label (cash, card, transfer, ...).
    #[validate(length(max = 64))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

/// Client for the billing surface of the patient service.
#[derive(Clone, Debug)]
pub struct BillingClient {
    transport: HttpTransport,
}

impl BillingClient {
    /// Creates a new billing client over the shared transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Lists one page of invoices matching the query.
    pub async fn list_invoices(&self, query: &PageQuery) -> ApiResult<Page<Invoice>> {
        self.transport
            .get(Service::Patients, "invoices", Some(query))
            .await
    }

    /// Fetches a single invoice.
    pub async fn get_invoice(&self, id: Uuid) -> ApiResult<Invoice> {
        self.transport
            .get(Service::Patients, &format!("invoices/{id}"), None::<&()>)
            .await
    }

    /// Records a payment against an invoice.
    pub async fn record_payment(&self, id: Uuid, payment: &RecordPayment) -> ApiResult<Invoice> {
        payment.validate()?;

        let updated: Invoice = self
            .transport
            .post(
                Service::Patients,
                &format!("invoices/{id}/payments"),
                payment,
            )
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            invoice_id = %updated.id,
            amount_cents = payment.amount_cents,
            balance_cents = updated.balance_cents(),
            "Payment recorded"
        );

        Ok(updated)
    }
}

#[async_trait::async_trait]
impl PageFetcher for BillingClient {
    type Item = Invoice;

    async fn fetch_page(&self, query: &PageQuery) -> PagingResult<Page<Invoice>> {
        Ok(self.list_invoices(query).await?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::testing;

    use super::*;

    fn invoice_json(id: Uuid, paid_cents: i64, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "clinicId": Uuid::new_v4(),
            "patientName": "Alex Moreno",
            "totalCents": 45_000,
            "amountPaidCents": paid_cents,
            "status": status,
            "issuedAt": "2026-07-01T10:00:00Z",
        })
    }

    #[tokio::test]
    async fn list_invoices_decodes_page() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/patients/invoices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "count": 1,
                "items": [invoice_json(Uuid::new_v4(), 0, "issued")],
                "hasNextPage": false,
            })))
            .mount(&server)
            .await;

        let client = BillingClient::new(testing::transport(&server.uri()));
        let page = client.list_invoices(&PageQuery::new(10)).await.expect("list");

        assert_eq!(page.items[0].status, InvoiceStatus::Issued);
        assert_eq!(page.items[0].balance_cents(), 45_000);
    }

    #[tokio::test]
    async fn record_payment_posts_amount() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("POST"))
            .and(path(format!("/api/patients/invoices/{id}/payments")))
            .and(body_json(json!({ "amountCents": 45_000, "method": "card" })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(invoice_json(id, 45_000, "paid")),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = BillingClient::new(testing::transport(&server.uri()));
        let payment = RecordPayment {
            amount_cents: 45_000,
            method: Some("card".into()),
        };

        let updated = client.record_payment(id, &payment).await.expect("payment");
        assert_eq!(updated.status, InvoiceStatus::Paid);
        assert_eq!(updated.balance_cents(), 0);
    }

    #[tokio::test]
    async fn record_payment_rejects_non_positive_amount() {
        let server = MockServer::start().await;
        let client = BillingClient::new(testing::transport(&server.uri()));

        let invalid = RecordPayment {
            amount_cents: 0,
            method: None,
        };

        let result = client.record_payment(Uuid::new_v4(), &invalid).await;
        assert!(matches!(result, Err(crate::error::ApiError::Validation(_))));
    }
}
