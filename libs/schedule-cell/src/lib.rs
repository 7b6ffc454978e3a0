pub mod handlers;
pub mod models;
pub mod router;
pub mod services;

pub use models::{ScheduleError, WeeklyAvailability};
pub use services::{ScheduleEditSession, ScheduleStore, SessionState, SupabaseScheduleStore};
