#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]

mod appointments;
mod auth;
mod billing;
mod chat;
mod config;
mod error;
mod inventory;
mod lab_orders;
mod notifications;
mod patients;
#[cfg(test)]
mod testing;
mod transport;

pub use crate::appointments::{
    Appointment, AppointmentClient, AppointmentStatus, ScheduleAppointment,
};
pub use crate::auth::{AuthClient, Credentials, LoginResponse, StaffAccount, StaffRegistration};
pub use crate::billing::{BillingClient, Invoice, InvoiceStatus, RecordPayment};
pub use crate::chat::{ChatClient, ChatMessage, ConversationMessages, SendMessage};
pub use crate::config::{ClientConfig, ClientConfigBuilder};
pub use crate::error::{ApiError, ApiResult};
pub use crate::inventory::{
    CreateInventoryItem, InventoryClient, InventoryItem, StockAdjustment,
};
pub use crate::lab_orders::{CreateLabOrder, LabOrder, LabOrderClient, LabOrderStatus};
pub use crate::notifications::{
    Notification, NotificationClient, NotificationType, UnreadStatus,
};
pub use crate::patients::{Patient, PatientClient, Review, SubmitReview};
pub use crate::transport::{HttpTransport, Service};
