// libs/schedule-cell/src/models.rs
use std::collections::{BTreeMap, BTreeSet};

use serde_json::{json, Map, Value};

use shared_models::AppError;

/// Canonical persisted field on the professional record.
pub const WEEKLY_HOURS_FIELD: &str = "weekly_hours";
/// Legacy field older records may still carry. Read-only: writers
/// clear it, never populate it.
pub const LEGACY_HOURS_FIELD: &str = "available_hours";

// ==============================================================================
// WEEKLY AVAILABILITY
// ==============================================================================

/// Recurring weekly offering: ISO weekday (Monday = 1 .. Sunday = 7)
/// mapped to the set of bookable hours of day (0..=23).
///
/// The canonical form never keeps a day with an empty hour set. The
/// edit session may introduce one transiently through `add_day`;
/// `invalid_days` reports those and `sanitized` drops them before
/// anything is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyAvailability {
    days: BTreeMap<u8, BTreeSet<u8>>,
}

impl WeeklyAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize any persisted encoding into the canonical form.
    ///
    /// Accepted inputs, all seen in production data:
    /// - the whole professional record (`weekly_hours`, or the legacy
    ///   `available_hours` field when the canonical one is absent);
    /// - a bare day map;
    /// - day keys as `"1"`..`"7"`, with the legacy `"0"` meaning
    ///   Sunday (mapped to 7);
    /// - hours as JSON numbers or numeric strings.
    ///
    /// Out-of-range hours and unparsable day keys are dropped, hours
    /// are deduplicated. Idempotent: normalizing a canonical encoding
    /// yields the same value.
    pub fn from_raw(raw: &Value) -> Self {
        let mut days: BTreeMap<u8, BTreeSet<u8>> = BTreeMap::new();

        let Some(day_map) = Self::day_map(raw) else {
            return Self { days };
        };

        for (key, value) in day_map {
            let Some(day) = Self::parse_day_key(key) else {
                continue;
            };
            let Some(entries) = value.as_array() else {
                continue;
            };

            let hours: BTreeSet<u8> = entries.iter().filter_map(Self::parse_hour).collect();
            if !hours.is_empty() {
                days.entry(day).or_default().extend(hours);
            }
        }

        Self { days }
    }

    fn day_map(raw: &Value) -> Option<&Map<String, Value>> {
        let obj = raw.as_object()?;

        if let Some(canonical) = obj.get(WEEKLY_HOURS_FIELD).and_then(Value::as_object) {
            return Some(canonical);
        }
        if let Some(legacy) = obj.get(LEGACY_HOURS_FIELD).and_then(Value::as_object) {
            return Some(legacy);
        }
        // Neither wrapper field present: treat the object itself as the map.
        if obj.contains_key(WEEKLY_HOURS_FIELD) || obj.contains_key(LEGACY_HOURS_FIELD) {
            return None; // wrapper fields exist but hold no map (e.g. null)
        }
        Some(obj)
    }

    fn parse_day_key(key: &str) -> Option<u8> {
        match key.trim().parse::<i64>().ok()? {
            0 => Some(7), // legacy convention: 0 = Sunday
            d @ 1..=7 => Some(d as u8),
            _ => None,
        }
    }

    fn parse_hour(value: &Value) -> Option<u8> {
        let hour = match value {
            Value::Number(n) => n.as_i64()?,
            Value::String(s) => s.trim().parse::<i64>().ok()?,
            _ => return None,
        };
        (0..=23).contains(&hour).then_some(hour as u8)
    }

    /// Emit the canonical string-keyed `"1".."7"` encoding. Empty
    /// days are skipped and the legacy field is never produced.
    pub fn to_persisted(&self) -> Value {
        let mut map = Map::new();
        for (day, hours) in &self.days {
            if hours.is_empty() {
                continue;
            }
            map.insert(day.to_string(), json!(hours.iter().collect::<Vec<_>>()));
        }
        Value::Object(map)
    }

    pub fn hours_for(&self, day: u8) -> Option<&BTreeSet<u8>> {
        self.days.get(&day)
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &BTreeSet<u8>)> {
        self.days.iter().map(|(day, hours)| (*day, hours))
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Days currently holding an empty hour set. Only `add_day` can
    /// introduce one; every other mutator removes emptied days.
    pub fn invalid_days(&self) -> Vec<u8> {
        self.days
            .iter()
            .filter(|(_, hours)| hours.is_empty())
            .map(|(day, _)| *day)
            .collect()
    }

    /// Copy with empty days dropped. Identity on canonical values.
    pub fn sanitized(&self) -> Self {
        Self {
            days: self
                .days
                .iter()
                .filter(|(_, hours)| !hours.is_empty())
                .map(|(day, hours)| (*day, hours.clone()))
                .collect(),
        }
    }

    // --- mutators used by the edit session ---

    /// Insert a day with no hours yet. Returns false if the day is
    /// already present or out of range. The empty set is transient:
    /// the day counts as invalid until an hour is added.
    pub fn add_day(&mut self, day: u8) -> bool {
        if !(1..=7).contains(&day) || self.days.contains_key(&day) {
            return false;
        }
        self.days.insert(day, BTreeSet::new());
        true
    }

    pub fn remove_day(&mut self, day: u8) -> bool {
        self.days.remove(&day).is_some()
    }

    /// Replace a day's hours. An empty result removes the day entry
    /// entirely; empty days are never retained.
    pub fn set_day_hours(&mut self, day: u8, hours: impl IntoIterator<Item = u8>) {
        if !(1..=7).contains(&day) {
            return;
        }
        let hours: BTreeSet<u8> = hours.into_iter().filter(|h| *h <= 23).collect();
        if hours.is_empty() {
            self.days.remove(&day);
        } else {
            self.days.insert(day, hours);
        }
    }

    pub fn add_hour(&mut self, day: u8, hour: u8) -> bool {
        if !(1..=7).contains(&day) || hour > 23 {
            return false;
        }
        self.days.entry(day).or_default().insert(hour)
    }

    /// Remove one hour; removing the last hour removes the day.
    pub fn remove_hour(&mut self, day: u8, hour: u8) -> bool {
        let Some(hours) = self.days.get_mut(&day) else {
            return false;
        };
        let removed = hours.remove(&hour);
        if hours.is_empty() {
            self.days.remove(&day);
        }
        removed
    }
}

// ==============================================================================
// ERRORS
// ==============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("Schedule unavailable: {0}")]
    Unavailable(String),

    #[error("Schedule has days with no hours: {days:?}")]
    InvalidSchedule { days: Vec<u8> },

    #[error("Failed to persist schedule: {0}")]
    PersistFailed(String),
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        let message = err.to_string();
        match err {
            ScheduleError::Unavailable(_) => AppError::Upstream(message),
            ScheduleError::InvalidSchedule { .. } => AppError::BadRequest(message),
            ScheduleError::PersistFailed(_) => AppError::Internal(message),
        }
    }
}
