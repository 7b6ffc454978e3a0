use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;
use uuid::Uuid;

use shared_config::AppConfig;
use shared_database::supabase::SupabaseClient;

use crate::models::{Appointment, BookAppointmentRequest, BookingError};

/// Read/write seam for appointments and the professional's persisted
/// schedule. The scheduling services are pure over what this trait
/// returns; implementations own all transport concerns.
#[async_trait]
pub trait AppointmentRepository: Send + Sync {
    async fn list_professional_appointments(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<Appointment>, BookingError>;

    async fn list_patient_appointments(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, BookingError>;

    /// Raw persisted schedule in whatever encoding the record holds.
    async fn professional_schedule(&self, professional_id: Uuid) -> Result<Value, BookingError>;

    /// Hours on a date already held by an *active* appointment.
    async fn booked_hours(
        &self,
        professional_id: Uuid,
        date_epoch_day: i64,
    ) -> Result<BTreeSet<u8>, BookingError>;

    /// Insert a new appointment. The backing store enforces slot
    /// uniqueness; a constraint trip surfaces as `SlotTaken`.
    async fn create(&self, request: &BookAppointmentRequest) -> Result<Appointment, BookingError>;

    async fn confirm(&self, appointment_id: Uuid) -> Result<Appointment, BookingError>;

    /// Professional turns the booking down; the slot is freed.
    async fn decline(&self, appointment_id: Uuid) -> Result<Appointment, BookingError>;

    /// Soft delete: `active = false`, row kept.
    async fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, BookingError>;
}

/// PostgREST-backed implementation. Slot atomicity comes from a
/// unique partial index on (professional_id, date_epoch_day, hour)
/// over active rows; the 409 it produces maps to `SlotTaken`.
pub struct SupabaseAppointmentRepository {
    supabase: Arc<SupabaseClient>,
}

impl SupabaseAppointmentRepository {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            supabase: Arc::new(SupabaseClient::new(config)),
        }
    }

    async fn list_appointments(&self, filter: &str) -> Result<Vec<Appointment>, BookingError> {
        let path = format!(
            "/rest/v1/appointments?{}&order=date_epoch_day.asc,hour.asc",
            filter
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| BookingError::Unavailable(e.to_string()))?;

        result
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<Vec<Appointment>, _>>()
            .map_err(|e| BookingError::Unavailable(format!("Failed to parse appointments: {}", e)))
    }

    async fn patch_appointment(
        &self,
        appointment_id: Uuid,
        body: Value,
    ) -> Result<Appointment, BookingError> {
        let path = format!("/rest/v1/appointments?id=eq.{}", appointment_id);
        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::PATCH, &path, Some(body), Some(headers))
            .await
            .map_err(|e| BookingError::PersistFailed(e.to_string()))?;

        let row = result.into_iter().next().ok_or(BookingError::NotFound)?;
        serde_json::from_value(row)
            .map_err(|e| BookingError::PersistFailed(format!("Failed to parse appointment: {}", e)))
    }
}

#[async_trait]
impl AppointmentRepository for SupabaseAppointmentRepository {
    async fn list_professional_appointments(
        &self,
        professional_id: Uuid,
    ) -> Result<Vec<Appointment>, BookingError> {
        debug!("Fetching appointments for professional: {}", professional_id);
        self.list_appointments(&format!("professional_id=eq.{}", professional_id))
            .await
    }

    async fn list_patient_appointments(
        &self,
        patient_id: Uuid,
    ) -> Result<Vec<Appointment>, BookingError> {
        debug!("Fetching appointments for patient: {}", patient_id);
        self.list_appointments(&format!("patient_id=eq.{}", patient_id))
            .await
    }

    async fn professional_schedule(&self, professional_id: Uuid) -> Result<Value, BookingError> {
        let path = format!(
            "/rest/v1/professionals?id=eq.{}&select=weekly_hours,available_hours",
            professional_id
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| BookingError::Unavailable(e.to_string()))?;

        result
            .into_iter()
            .next()
            .ok_or_else(|| BookingError::Unavailable("Professional not found".to_string()))
    }

    async fn booked_hours(
        &self,
        professional_id: Uuid,
        date_epoch_day: i64,
    ) -> Result<BTreeSet<u8>, BookingError> {
        let path = format!(
            "/rest/v1/appointments?professional_id=eq.{}&date_epoch_day=eq.{}&active=is.true&select=hour",
            professional_id, date_epoch_day
        );

        let result: Vec<Value> = self
            .supabase
            .request(Method::GET, &path, None)
            .await
            .map_err(|e| BookingError::Unavailable(e.to_string()))?;

        let hours = result
            .iter()
            .filter_map(|row| row.get("hour").and_then(Value::as_u64))
            .filter(|h| *h <= 23)
            .map(|h| h as u8)
            .collect();

        Ok(hours)
    }

    async fn create(&self, request: &BookAppointmentRequest) -> Result<Appointment, BookingError> {
        debug!(
            "Creating appointment for patient {} with professional {} on day {} hour {}",
            request.patient_id, request.professional_id, request.date_epoch_day, request.hour
        );

        let now = Utc::now().to_rfc3339();
        let body = json!({
            "patient_id": request.patient_id,
            "professional_id": request.professional_id,
            "date_epoch_day": request.date_epoch_day,
            "hour": request.hour,
            "discipline": request.discipline,
            "notes": request.notes,
            "confirmed": false,
            "active": true,
            "created_at": now,
            "updated_at": now,
        });

        let mut headers = reqwest::header::HeaderMap::new();
        headers.insert(
            "Prefer",
            reqwest::header::HeaderValue::from_static("return=representation"),
        );

        let result: Vec<Value> = self
            .supabase
            .request_with_headers(Method::POST, "/rest/v1/appointments", Some(body), Some(headers))
            .await
            .map_err(|e| {
                if SupabaseClient::is_conflict(&e) {
                    BookingError::SlotTaken
                } else {
                    BookingError::PersistFailed(e.to_string())
                }
            })?;

        let row = result
            .into_iter()
            .next()
            .ok_or_else(|| BookingError::PersistFailed("Create returned no row".to_string()))?;

        serde_json::from_value(row)
            .map_err(|e| BookingError::PersistFailed(format!("Failed to parse appointment: {}", e)))
    }

    async fn confirm(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        self.patch_appointment(
            appointment_id,
            json!({ "confirmed": true, "updated_at": Utc::now().to_rfc3339() }),
        )
        .await
    }

    async fn decline(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        self.patch_appointment(
            appointment_id,
            json!({
                "confirmed": false,
                "active": false,
                "updated_at": Utc::now().to_rfc3339(),
            }),
        )
        .await
    }

    async fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        self.patch_appointment(
            appointment_id,
            json!({ "active": false, "updated_at": Utc::now().to_rfc3339() }),
        )
        .await
    }
}
