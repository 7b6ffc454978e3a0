use std::sync::Arc;

use tracing::{info, warn};
use uuid::Uuid;

use crate::models::{Appointment, BookAppointmentRequest, BookingError};
use crate::services::repository::AppointmentRepository;

/// Creation-side guard for the one-active-appointment-per-slot
/// invariant, plus the professional's lifecycle actions.
///
/// The guard re-fetches booked hours immediately before creating and
/// fails locally with `SlotTaken` instead of issuing the create. It
/// deliberately provides no cross-process mutual exclusion — two
/// clients can pass the check concurrently — so the store must back
/// it with a uniqueness guarantee on the slot key; the repository
/// maps that constraint trip to `SlotTaken` as well.
pub struct BookingService {
    repository: Arc<dyn AppointmentRepository>,
}

impl BookingService {
    pub fn new(repository: Arc<dyn AppointmentRepository>) -> Self {
        Self { repository }
    }

    pub async fn book(
        &self,
        request: BookAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        if request.hour > 23 {
            return Err(BookingError::ValidationError(format!(
                "Hour must be between 0 and 23, got {}",
                request.hour
            )));
        }
        if request.discipline.trim().is_empty() {
            return Err(BookingError::ValidationError(
                "Discipline must not be empty".to_string(),
            ));
        }

        let booked = self
            .repository
            .booked_hours(request.professional_id, request.date_epoch_day)
            .await?;

        if booked.contains(&request.hour) {
            warn!(
                "Slot taken: professional {} day {} hour {}",
                request.professional_id, request.date_epoch_day, request.hour
            );
            return Err(BookingError::SlotTaken);
        }

        // Once issued, the create is never retracted client-side.
        let appointment = self.repository.create(&request).await?;

        info!(
            "Booked appointment {} for patient {} with professional {}",
            appointment.id, appointment.patient_id, appointment.professional_id
        );
        Ok(appointment)
    }

    pub async fn confirm(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        let appointment = self.repository.confirm(appointment_id).await?;
        info!("Confirmed appointment {}", appointment_id);
        Ok(appointment)
    }

    /// Decline frees the slot: the appointment goes inactive and no
    /// longer participates in conflict checks.
    pub async fn decline(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        let appointment = self.repository.decline(appointment_id).await?;
        info!("Declined appointment {}", appointment_id);
        Ok(appointment)
    }

    /// Soft delete. The row is kept for history; only `active` flips.
    pub async fn cancel(&self, appointment_id: Uuid) -> Result<Appointment, BookingError> {
        let appointment = self.repository.cancel(appointment_id).await?;
        info!("Cancelled appointment {}", appointment_id);
        Ok(appointment)
    }
}
