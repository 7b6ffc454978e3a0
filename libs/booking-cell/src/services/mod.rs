pub mod availability;
pub mod booking;
pub mod ordering;
pub mod repository;

pub use availability::AvailabilityService;
pub use booking::BookingService;
pub use ordering::AppointmentListService;
pub use repository::{AppointmentRepository, SupabaseAppointmentRepository};
