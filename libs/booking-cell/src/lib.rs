pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{Appointment, AppointmentPartition, BookAppointmentRequest, BookingError, HourSlot};
pub use services::{
    AppointmentListService, AppointmentRepository, AvailabilityService, BookingService,
    SupabaseAppointmentRepository,
};
