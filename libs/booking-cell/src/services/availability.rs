use std::collections::BTreeSet;
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use schedule_cell::models::WeeklyAvailability;
use shared_utils::time::{epoch_day, iso_weekday, Clock, NowParts};

use crate::models::{BookingError, HourSlot};
use crate::services::repository::AppointmentRepository;

/// Offerable hours for one calendar date, given the weekly offering,
/// the hours already booked on that date, and "now" in the clinic
/// timezone. Pure over its inputs.
///
/// - a weekday with no entry yields an empty list (not an error);
/// - on today, hours at or before the current hour are excluded
///   entirely, not merely disabled: a slot whose start has passed is
///   never offerable, booked or not. A date wholly in the past
///   therefore yields nothing;
/// - booked hours stay in the list with `disabled = true` so callers
///   can tell "taken" apart from "not offered".
pub fn resolve_day_hours(
    availability: &WeeklyAvailability,
    target_epoch_day: i64,
    target_weekday: u8,
    booked: &BTreeSet<u8>,
    now: NowParts,
) -> Vec<HourSlot> {
    if target_epoch_day < now.epoch_day {
        return Vec::new();
    }

    let Some(hours) = availability.hours_for(target_weekday) else {
        return Vec::new();
    };

    let is_today = target_epoch_day == now.epoch_day;

    hours
        .iter()
        .copied()
        .filter(|hour| !is_today || *hour > now.hour)
        .map(|hour| HourSlot {
            hour,
            disabled: booked.contains(&hour),
        })
        .collect()
}

pub struct AvailabilityService {
    repository: Arc<dyn AppointmentRepository>,
    clock: Arc<dyn Clock>,
}

impl AvailabilityService {
    pub fn new(repository: Arc<dyn AppointmentRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Bookable hours a patient can pick from for `date`.
    pub async fn bookable_hours(
        &self,
        professional_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<HourSlot>, BookingError> {
        debug!(
            "Resolving bookable hours for professional {} on {}",
            professional_id, date
        );

        let raw = self.repository.professional_schedule(professional_id).await?;
        let availability = WeeklyAvailability::from_raw(&raw);

        let target_epoch_day = epoch_day(date);
        let booked = self
            .repository
            .booked_hours(professional_id, target_epoch_day)
            .await?;

        let slots = resolve_day_hours(
            &availability,
            target_epoch_day,
            iso_weekday(date),
            &booked,
            self.clock.now_parts(),
        );

        debug!("Found {} offerable hours", slots.len());
        Ok(slots)
    }
}
