// libs/booking-cell/src/models.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use shared_models::AppError;

// ==============================================================================
// CORE APPOINTMENT MODELS
// ==============================================================================

/// One booked slot. The slot key is (professional_id, date_epoch_day,
/// hour); at most one *active* appointment may exist per key.
/// Appointments are never hard-deleted — cancellation flips `active`
/// to false so conflict checks and history stay intact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    /// Days since 1970-01-01, evaluated in the clinic timezone.
    pub date_epoch_day: i64,
    /// Hour of day, 0..=23.
    pub hour: u8,
    pub discipline: String,
    pub notes: Option<String>,
    pub confirmed: bool,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookAppointmentRequest {
    pub patient_id: Uuid,
    pub professional_id: Uuid,
    pub date_epoch_day: i64,
    pub hour: u8,
    pub discipline: String,
    pub notes: Option<String>,
}

// ==============================================================================
// AVAILABILITY MODELS
// ==============================================================================

/// One offerable hour on a concrete date. `disabled` means the hour
/// is part of the weekly offering but already booked — callers can
/// render "taken" distinctly from "not offered".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourSlot {
    pub hour: u8,
    pub disabled: bool,
}

/// Active appointments split around "now". Upcoming is ascending,
/// past is descending by (date, hour).
#[derive(Debug, Clone, Default, Serialize)]
pub struct AppointmentPartition {
    pub upcoming: Vec<Appointment>,
    pub past: Vec<Appointment>,
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Appointment data unavailable: {0}")]
    Unavailable(String),

    #[error("Slot already taken")]
    SlotTaken,

    #[error("Appointment not found")]
    NotFound,

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Failed to persist appointment: {0}")]
    PersistFailed(String),
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        let message = err.to_string();
        match err {
            BookingError::Unavailable(_) => AppError::Upstream(message),
            BookingError::SlotTaken => AppError::Conflict(message),
            BookingError::NotFound => AppError::NotFound(message),
            BookingError::ValidationError(_) => AppError::BadRequest(message),
            BookingError::PersistFailed(_) => AppError::Internal(message),
        }
    }
}
