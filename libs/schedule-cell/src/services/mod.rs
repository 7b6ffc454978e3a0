pub mod edit_session;
pub mod store;

pub use edit_session::{ScheduleEditSession, SessionState};
pub use store::{ScheduleStore, SupabaseScheduleStore};
