//! Appointment scheduling client.

use dentis_paging::{Page, PageFetcher, PageQuery, PagingResult};
use jiff::Timestamp;
use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiResult;
use crate::transport::{HttpTransport, Service};

/// Tracing target for appointment operations.
pub const TRACING_TARGET: &str = "dentis_client::appointments";

/// Lifecycle status of an appointment.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Hash)]
#[derive(Serialize, Deserialize, Display, EnumIter, EnumString)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AppointmentStatus {
    /// Booked, not yet confirmed by the patient.
    #[default]
    Scheduled,
    /// Confirmed by the patient.
    Confirmed,
    /// Visit took place.
    Completed,
    /// Cancelled by either side.
    Cancelled,
}

/// A scheduled appointment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    /// Unique appointment identifier.
    pub id: Uuid,
    /// Clinic the appointment belongs to.
    pub clinic_id: Uuid,
    /// Treating doctor.
    pub doctor_id: Uuid,
    /// Patient display name.
    pub patient_name: String,
    /// When the visit starts.
    pub scheduled_at: Timestamp,
    /// Current lifecycle status.
    pub status: AppointmentStatus,
    /// Reception notes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Payload for booking an appointment.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleAppointment {
    /// Treating doctor.
    pub doctor_id: Uuid,
    /// Patient display name.
    #[validate(length(min = 1, max = 120))]
    pub patient_name: String,
    /// When the visit starts.
    pub scheduled_at: Timestamp,
    /// Reception notes.
    #[validate(length(max = 2000))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Query parameters for a single-day listing.
#[derive(Debug, Clone, Serialize)]
struct DayQuery {
    date: Date,
}

/// Client for appointment scheduling.
#[derive(Clone, Debug)]
pub struct AppointmentClient {
    transport: HttpTransport,
}

impl AppointmentClient {
    /// Creates a new appointment client over the shared transport.
    pub fn new(transport: HttpTransport) -> Self {
        Self { transport }
    }

    /// Lists every appointment on the given day.
    ///
    /// Day views are bounded by the clinic's schedule, so this endpoint is
    /// not paginated.
    pub async fn list_for_day(&self, date: Date) -> ApiResult<Vec<Appointment>> {
        self.transport
            .get(
                Service::Patients,
                "appointments",
                Some(&DayQuery { date }),
            )
            .await
    }

    /// Lists one page of upcoming appointments matching the query.
    pub async fn list(&self, query: &PageQuery) -> ApiResult<Page<Appointment>> {
        self.transport
            .get(Service::Patients, "appointments/upcoming", Some(query))
            .await
    }

    /// Books a new appointment.
    pub async fn schedule(&self, request: &ScheduleAppointment) -> ApiResult<Appointment> {
        request.validate()?;

        let booked: Appointment = self
            .transport
            .post(Service::Patients, "appointments", request)
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            appointment_id = %booked.id,
            doctor_id = %booked.doctor_id,
            scheduled_at = %booked.scheduled_at,
            "Appointment booked"
        );

        Ok(booked)
    }

    /// Cancels an appointment.
    pub async fn cancel(&self, id: Uuid) -> ApiResult<Appointment> {
        let cancelled: Appointment = self
            .transport
            .post(
                Service::Patients,
                &format!("appointments/{id}/cancel"),
                &serde_json::json!({}),
            )
            .await?;

        tracing::info!(
            target: TRACING_TARGET,
            appointment_id = %cancelled.id,
            "Appointment cancelled"
        );

        Ok(cancelled)
    }
}

#[async_trait::async_trait]
impl PageFetcher for AppointmentClient {
    type Item = Appointment;

    async fn fetch_page(&self, query: &PageQuery) -> PagingResult<Page<Appointment>> {
        Ok(self.list(query).await?)
    }
}
