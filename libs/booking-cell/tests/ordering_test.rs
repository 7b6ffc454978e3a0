// libs/booking-cell/tests/ordering_test.rs
//
// Upcoming/past partition of a subject's appointments.

use chrono::Utc;
use uuid::Uuid;

use booking_cell::models::Appointment;
use booking_cell::services::ordering::partition_appointments;
use shared_utils::time::NowParts;

fn appointment(date_epoch_day: i64, hour: u8, active: bool) -> Appointment {
    Appointment {
        id: Uuid::new_v4(),
        patient_id: Uuid::new_v4(),
        professional_id: Uuid::new_v4(),
        date_epoch_day,
        hour,
        discipline: "psychology".to_string(),
        notes: None,
        confirmed: true,
        active,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

fn now() -> NowParts {
    NowParts {
        epoch_day: 200,
        hour: 12,
        weekday: 3,
    }
}

fn keys(appointments: &[Appointment]) -> Vec<(i64, u8)> {
    appointments
        .iter()
        .map(|a| (a.date_epoch_day, a.hour))
        .collect()
}

#[test]
fn splits_on_date_then_hour() {
    let partition = partition_appointments(
        vec![
            appointment(199, 23, true), // yesterday
            appointment(200, 11, true), // earlier today
            appointment(200, 12, true), // this hour: still upcoming
            appointment(200, 13, true),
            appointment(201, 8, true), // tomorrow
        ],
        now(),
    );

    assert_eq!(keys(&partition.upcoming), vec![(200, 12), (200, 13), (201, 8)]);
    assert_eq!(keys(&partition.past), vec![(200, 11), (199, 23)]);
}

#[test]
fn inactive_appointments_appear_nowhere() {
    let partition = partition_appointments(
        vec![
            appointment(199, 9, false),
            appointment(201, 9, false),
            appointment(201, 10, true),
        ],
        now(),
    );

    assert_eq!(partition.upcoming.len(), 1);
    assert!(partition.past.is_empty());
}

#[test]
fn upcoming_ascends_and_past_descends() {
    let partition = partition_appointments(
        vec![
            appointment(250, 9, true),
            appointment(210, 15, true),
            appointment(210, 8, true),
            appointment(150, 10, true),
            appointment(150, 16, true),
            appointment(199, 7, true),
        ],
        now(),
    );

    assert_eq!(
        keys(&partition.upcoming),
        vec![(210, 8), (210, 15), (250, 9)]
    );
    assert_eq!(
        keys(&partition.past),
        vec![(199, 7), (150, 16), (150, 10)]
    );
}

#[test]
fn empty_input_is_a_valid_result() {
    let partition = partition_appointments(vec![], now());

    assert!(partition.upcoming.is_empty());
    assert!(partition.past.is_empty());
}
