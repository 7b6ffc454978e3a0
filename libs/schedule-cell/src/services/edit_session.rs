use std::sync::Arc;

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{ScheduleError, WeeklyAvailability};
use crate::services::store::ScheduleStore;

/// Lifecycle of an editing session.
///
/// `Loading → Clean → Dirty → Saving → {Clean | Error}`
///
/// `Dirty`/`Clean` are always derived from a structural comparison of
/// `buffer` against `original`; the enum never drifts from the actual
/// buffer contents because every mutation recomputes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Loading,
    Clean,
    Dirty,
    Saving,
    Error,
}

/// Buffered editor for one professional's weekly availability.
///
/// The session owns its buffer exclusively; nothing else mutates it.
/// `load` unconditionally overwrites the buffer, so concurrent edits
/// from another session are not merged — last write wins at save
/// time. That is a documented product decision, not an oversight.
pub struct ScheduleEditSession<S: ScheduleStore> {
    store: Arc<S>,
    professional_id: Uuid,
    buffer: WeeklyAvailability,
    original: WeeklyAvailability,
    state: SessionState,
}

impl<S: ScheduleStore> ScheduleEditSession<S> {
    pub fn new(store: Arc<S>, professional_id: Uuid) -> Self {
        Self {
            store,
            professional_id,
            buffer: WeeklyAvailability::new(),
            original: WeeklyAvailability::new(),
            state: SessionState::Loading,
        }
    }

    /// Fetch and normalize the persisted schedule; both snapshots are
    /// reset to it and the session becomes clean.
    pub async fn load(&mut self) -> Result<(), ScheduleError> {
        self.state = SessionState::Loading;
        let raw = self.store.load(self.professional_id).await?;

        let normalized = WeeklyAvailability::from_raw(&raw);
        self.buffer = normalized.clone();
        self.original = normalized;
        self.state = SessionState::Clean;

        debug!(
            "Loaded schedule for professional {} ({} days)",
            self.professional_id,
            self.buffer.iter().count()
        );
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn buffer(&self) -> &WeeklyAvailability {
        &self.buffer
    }

    pub fn original(&self) -> &WeeklyAvailability {
        &self.original
    }

    pub fn dirty(&self) -> bool {
        self.buffer != self.original
    }

    pub fn invalid_days(&self) -> Vec<u8> {
        self.buffer.invalid_days()
    }

    pub fn can_save(&self) -> bool {
        self.dirty() && self.invalid_days().is_empty()
    }

    pub fn can_discard(&self) -> bool {
        self.dirty()
    }

    // --- buffer mutations; each one recomputes the derived state ---

    pub fn add_day(&mut self, day: u8) -> bool {
        let changed = self.buffer.add_day(day);
        self.refresh_state();
        changed
    }

    pub fn remove_day(&mut self, day: u8) -> bool {
        let changed = self.buffer.remove_day(day);
        self.refresh_state();
        changed
    }

    pub fn set_day_hours(&mut self, day: u8, hours: impl IntoIterator<Item = u8>) {
        self.buffer.set_day_hours(day, hours);
        self.refresh_state();
    }

    pub fn add_hour(&mut self, day: u8, hour: u8) -> bool {
        let changed = self.buffer.add_hour(day, hour);
        self.refresh_state();
        changed
    }

    pub fn remove_hour(&mut self, day: u8, hour: u8) -> bool {
        let changed = self.buffer.remove_hour(day, hour);
        self.refresh_state();
        changed
    }

    /// Wholesale replacement of the working copy, used by the PUT
    /// schedule handler. Goes through the same save gate as
    /// fine-grained edits.
    pub fn replace_buffer(&mut self, schedule: WeeklyAvailability) {
        self.buffer = schedule;
        self.refresh_state();
    }

    /// Persist the buffer. No-op when nothing changed; refuses to
    /// persist days without hours (unreachable through the mutators
    /// above, kept as a save-time check). On store failure the buffer
    /// is left untouched so no edit is lost.
    pub async fn save(&mut self) -> Result<(), ScheduleError> {
        if !self.dirty() {
            debug!(
                "Save requested with no changes for professional {}",
                self.professional_id
            );
            return Ok(());
        }

        let invalid = self.invalid_days();
        if !invalid.is_empty() {
            warn!(
                "Refusing to save schedule for professional {}: empty days {:?}",
                self.professional_id, invalid
            );
            return Err(ScheduleError::InvalidSchedule { days: invalid });
        }

        self.state = SessionState::Saving;
        let sanitized = self.buffer.sanitized();

        match self
            .store
            .save(self.professional_id, sanitized.to_persisted())
            .await
        {
            Ok(()) => {
                self.original = self.buffer.clone();
                self.state = SessionState::Clean;
                debug!(
                    "Saved schedule for professional {}",
                    self.professional_id
                );
                Ok(())
            }
            Err(e) => {
                self.state = SessionState::Error;
                Err(e)
            }
        }
    }

    /// Throw away pending edits and return to the last persisted
    /// snapshot.
    pub fn discard(&mut self) {
        self.buffer = self.original.clone();
        self.state = SessionState::Clean;
    }

    fn refresh_state(&mut self) {
        self.state = if self.dirty() {
            SessionState::Dirty
        } else {
            SessionState::Clean
        };
    }
}
