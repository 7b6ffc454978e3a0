pub mod time;

pub use time::{date_from_epoch_day, epoch_day, iso_weekday, Clock, NowParts, ZoneClock};
