use chrono::{Datelike, Local, NaiveDate, Timelike, Utc};
use chrono_tz::Tz;
use tracing::warn;

use shared_config::AppConfig;

const UNIX_EPOCH_CE_DAYS: i64 = 719_163; // days from 0001-01-01 to 1970-01-01

/// Days since 1970-01-01. Timezone-stable date key for appointments.
pub fn epoch_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce()) - UNIX_EPOCH_CE_DAYS
}

pub fn date_from_epoch_day(day: i64) -> Option<NaiveDate> {
    let ce_days = day.checked_add(UNIX_EPOCH_CE_DAYS)?;
    NaiveDate::from_num_days_from_ce_opt(i32::try_from(ce_days).ok()?)
}

/// ISO weekday: Monday = 1 .. Sunday = 7.
pub fn iso_weekday(date: NaiveDate) -> u8 {
    date.weekday().number_from_monday() as u8
}

/// "Now" reduced to the parts the scheduling core compares against:
/// the current epoch day, hour of day and ISO weekday, all evaluated
/// in the clinic's configured timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NowParts {
    pub epoch_day: i64,
    pub hour: u8,
    pub weekday: u8,
}

pub trait Clock: Send + Sync {
    fn now_parts(&self) -> NowParts;
}

/// Production clock. Resolves the configured IANA zone once; an
/// unknown name falls back to the host-local zone.
pub struct ZoneClock {
    zone: Option<Tz>,
}

impl ZoneClock {
    pub fn new(zone_name: &str) -> Self {
        let zone = match zone_name.parse::<Tz>() {
            Ok(tz) => Some(tz),
            Err(_) => {
                warn!("Unknown timezone {:?}, falling back to host-local zone", zone_name);
                None
            }
        };
        Self { zone }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.clinic_timezone)
    }

    fn local_parts(date: NaiveDate, hour: u32) -> NowParts {
        NowParts {
            epoch_day: epoch_day(date),
            hour: hour as u8,
            weekday: iso_weekday(date),
        }
    }
}

impl Clock for ZoneClock {
    fn now_parts(&self) -> NowParts {
        match self.zone {
            Some(tz) => {
                let now = Utc::now().with_timezone(&tz);
                Self::local_parts(now.date_naive(), now.hour())
            }
            None => {
                let now = Local::now();
                Self::local_parts(now.date_naive(), now.hour())
            }
        }
    }
}
