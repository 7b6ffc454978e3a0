// libs/booking-cell/tests/availability_test.rs
//
// Bookable-hour resolution for a concrete date: weekly offering,
// booked hours, and the today cutoff.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{json, Value};
use uuid::Uuid;

use booking_cell::models::{Appointment, BookAppointmentRequest, BookingError, HourSlot};
use booking_cell::services::availability::{resolve_day_hours, AvailabilityService};
use booking_cell::services::AppointmentRepository;
use schedule_cell::models::WeeklyAvailability;
use shared_utils::time::{epoch_day, Clock, NowParts};

fn tuesday() -> NaiveDate {
    // 2025-06-17 is a Tuesday
    NaiveDate::from_ymd_opt(2025, 6, 17).unwrap()
}

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 16).unwrap()
}

fn now_on(date: NaiveDate, hour: u8) -> NowParts {
    NowParts {
        epoch_day: epoch_day(date),
        hour,
        weekday: shared_utils::time::iso_weekday(date),
    }
}

fn tuesday_offering() -> WeeklyAvailability {
    WeeklyAvailability::from_raw(&json!({ "2": [9, 10, 11] }))
}

#[test]
fn booked_hours_stay_listed_but_disabled() {
    // Viewing a future Tuesday on Monday: all offered hours present,
    // the booked one flagged.
    let booked: BTreeSet<u8> = [10].into();

    let slots = resolve_day_hours(
        &tuesday_offering(),
        epoch_day(tuesday()),
        2,
        &booked,
        now_on(monday(), 12),
    );

    assert_eq!(
        slots,
        vec![
            HourSlot { hour: 9, disabled: false },
            HourSlot { hour: 10, disabled: true },
            HourSlot { hour: 11, disabled: false },
        ]
    );
}

#[test]
fn todays_elapsed_hours_are_excluded_entirely() {
    // Same Tuesday viewed on that Tuesday during hour 10: hour 9 is
    // gone, hour 10 has already started (and is booked anyway), only
    // 11 remains offerable.
    let booked: BTreeSet<u8> = [10].into();

    let slots = resolve_day_hours(
        &tuesday_offering(),
        epoch_day(tuesday()),
        2,
        &booked,
        now_on(tuesday(), 10),
    );

    assert_eq!(slots, vec![HourSlot { hour: 11, disabled: false }]);
}

#[test]
fn unbooked_past_hours_are_not_offerable_either() {
    let booked = BTreeSet::new();

    let slots = resolve_day_hours(
        &tuesday_offering(),
        epoch_day(tuesday()),
        2,
        &booked,
        now_on(tuesday(), 23),
    );

    assert!(slots.is_empty());
}

#[test]
fn weekday_without_offering_yields_empty_list() {
    let slots = resolve_day_hours(
        &tuesday_offering(),
        epoch_day(monday()),
        1,
        &BTreeSet::new(),
        now_on(monday(), 8),
    );

    assert!(slots.is_empty());
}

#[test]
fn dates_in_the_past_yield_nothing() {
    let last_tuesday = tuesday() - chrono::Duration::days(7);

    let slots = resolve_day_hours(
        &tuesday_offering(),
        epoch_day(last_tuesday),
        2,
        &BTreeSet::new(),
        now_on(monday(), 8),
    );

    assert!(slots.is_empty());
}

// ==============================================================================
// SERVICE WIRING
// ==============================================================================

struct FixedClock(NowParts);

impl Clock for FixedClock {
    fn now_parts(&self) -> NowParts {
        self.0
    }
}

/// Repository canned for availability reads; booking paths are unused
/// here and answer `Unavailable`.
struct CannedRepository {
    schedule: Value,
    booked: BTreeSet<u8>,
}

#[async_trait]
impl AppointmentRepository for CannedRepository {
    async fn list_professional_appointments(
        &self,
        _professional_id: Uuid,
    ) -> Result<Vec<Appointment>, BookingError> {
        Err(BookingError::Unavailable("not wired".to_string()))
    }

    async fn list_patient_appointments(
        &self,
        _patient_id: Uuid,
    ) -> Result<Vec<Appointment>, BookingError> {
        Err(BookingError::Unavailable("not wired".to_string()))
    }

    async fn professional_schedule(
        &self,
        _professional_id: Uuid,
    ) -> Result<Value, BookingError> {
        Ok(self.schedule.clone())
    }

    async fn booked_hours(
        &self,
        _professional_id: Uuid,
        _date_epoch_day: i64,
    ) -> Result<BTreeSet<u8>, BookingError> {
        Ok(self.booked.clone())
    }

    async fn create(
        &self,
        _request: &BookAppointmentRequest,
    ) -> Result<Appointment, BookingError> {
        Err(BookingError::Unavailable("not wired".to_string()))
    }

    async fn confirm(&self, _appointment_id: Uuid) -> Result<Appointment, BookingError> {
        Err(BookingError::Unavailable("not wired".to_string()))
    }

    async fn decline(&self, _appointment_id: Uuid) -> Result<Appointment, BookingError> {
        Err(BookingError::Unavailable("not wired".to_string()))
    }

    async fn cancel(&self, _appointment_id: Uuid) -> Result<Appointment, BookingError> {
        Err(BookingError::Unavailable("not wired".to_string()))
    }
}

#[tokio::test]
async fn service_normalizes_legacy_schedule_before_resolving() {
    // Legacy record: alternate field name and Sunday stored as "0".
    let repo = Arc::new(CannedRepository {
        schedule: json!({ "available_hours": { "0": [14, 15] } }),
        booked: [14].into(),
    });
    let clock = Arc::new(FixedClock(now_on(monday(), 9)));

    let service = AvailabilityService::new(repo, clock);
    // 2025-06-22 is a Sunday
    let sunday = NaiveDate::from_ymd_opt(2025, 6, 22).unwrap();
    let slots = service.bookable_hours(Uuid::new_v4(), sunday).await.unwrap();

    assert_eq!(
        slots,
        vec![
            HourSlot { hour: 14, disabled: true },
            HourSlot { hour: 15, disabled: false },
        ]
    );
}

#[tokio::test]
async fn empty_schedule_is_a_valid_result() {
    let repo = Arc::new(CannedRepository {
        schedule: json!({ "weekly_hours": null }),
        booked: BTreeSet::new(),
    });
    let clock = Arc::new(FixedClock(now_on(monday(), 9)));

    let service = AvailabilityService::new(repo, clock);
    let slots = service.bookable_hours(Uuid::new_v4(), tuesday()).await.unwrap();

    assert!(slots.is_empty());
}
