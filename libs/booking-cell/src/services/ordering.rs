use std::sync::Arc;

use uuid::Uuid;

use shared_utils::time::{Clock, NowParts};

use crate::models::{Appointment, AppointmentPartition, BookingError};
use crate::services::repository::AppointmentRepository;

/// Split a subject's appointments into upcoming and past relative to
/// "now". Inactive appointments are dropped from both sides. An
/// appointment is upcoming iff (date, hour) >= (today, current hour)
/// lexicographically — one scheduled for the current hour still
/// counts as upcoming. Upcoming sorts ascending, past descending.
pub fn partition_appointments(
    appointments: Vec<Appointment>,
    now: NowParts,
) -> AppointmentPartition {
    let mut partition = AppointmentPartition::default();

    for appointment in appointments {
        if !appointment.active {
            continue;
        }
        if (appointment.date_epoch_day, appointment.hour) >= (now.epoch_day, now.hour) {
            partition.upcoming.push(appointment);
        } else {
            partition.past.push(appointment);
        }
    }

    partition
        .upcoming
        .sort_by_key(|a| (a.date_epoch_day, a.hour));
    partition
        .past
        .sort_by(|a, b| (b.date_epoch_day, b.hour).cmp(&(a.date_epoch_day, a.hour)));

    partition
}

pub struct AppointmentListService {
    repository: Arc<dyn AppointmentRepository>,
    clock: Arc<dyn Clock>,
}

impl AppointmentListService {
    pub fn new(repository: Arc<dyn AppointmentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    pub async fn patient_appointments(
        &self,
        patient_id: Uuid,
    ) -> Result<AppointmentPartition, BookingError> {
        let appointments = self.repository.list_patient_appointments(patient_id).await?;
        Ok(partition_appointments(appointments, self.clock.now_parts()))
    }

    pub async fn professional_appointments(
        &self,
        professional_id: Uuid,
    ) -> Result<AppointmentPartition, BookingError> {
        let appointments = self
            .repository
            .list_professional_appointments(professional_id)
            .await?;
        Ok(partition_appointments(appointments, self.clock.now_parts()))
    }
}
