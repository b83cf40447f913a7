use chrono::{NaiveDate, NaiveDateTime};

use super::domain::{
    AvailabilityRule, Booking, CalendarId, EventType, EventTypeId, InvestorId, LinkedCalendar,
    SlotOverride,
};

/// Storage abstraction so the resolver can be exercised in isolation.
/// Each method is one read; no snapshot isolation is promised across them,
/// a benign staleness window for a read-only computation.
pub trait SchedulingRepository: Send + Sync {
    fn event_type(&self, id: &EventTypeId) -> Result<Option<EventType>, RepositoryError>;

    fn availability_rules(
        &self,
        investor_id: &InvestorId,
    ) -> Result<Vec<AvailabilityRule>, RepositoryError>;

    /// Overrides whose date falls within `[from, to]` inclusive.
    fn slot_overrides(
        &self,
        investor_id: &InvestorId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SlotOverride>, RepositoryError>;

    /// Bookings intersecting `[from, to)`, regardless of status; the
    /// resolver filters out cancelled ones.
    fn bookings(
        &self,
        investor_id: &InvestorId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Booking>, RepositoryError>;

    fn linked_calendars(
        &self,
        investor_id: &InvestorId,
    ) -> Result<Vec<LinkedCalendar>, RepositoryError>;

    /// Persist a refreshed access token for a linked calendar.
    fn update_calendar_token(
        &self,
        calendar_id: &CalendarId,
        access_token: &str,
        expires_at: NaiveDateTime,
    ) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
