use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier wrapper for investors offering bookable time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InvestorId(pub Uuid);

/// Identifier wrapper for bookable event definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventTypeId(pub Uuid);

/// Identifier wrapper for linked external calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarId(pub Uuid);

/// Recurring weekly open hours for an investor. More than one rule may
/// exist for the same weekday; no uniqueness is enforced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub investor_id: InvestorId,
    /// 0 = Sunday through 6 = Saturday, matching the stored rows.
    pub day_of_week: u8,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_active: bool,
}

/// Date-specific exception that either blocks a day outright or replaces
/// that day's open hours. Overrides dominate recurring rules for their date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOverride {
    pub investor_id: InvestorId,
    pub date: NaiveDate,
    pub is_available: bool,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
}

/// Lifecycle state for a confirmed commitment. Bookings only ever move
/// from an active status to `Cancelled`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

/// An existing commitment on the investor's diary. Cancelled bookings do
/// not participate in conflict checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub investor_id: InvestorId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub status: BookingStatus,
}

/// Defines the granularity of bookable slots and mandatory padding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventType {
    pub id: EventTypeId,
    pub name: String,
    pub duration_minutes: u32,
    pub buffer_before_minutes: u32,
    pub buffer_after_minutes: u32,
    pub is_active: bool,
}

/// Opaque busy interval reported by an external calendar for one request.
/// Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusyBlock {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Credentials and settings for one linked external calendar. The token
/// fields are owned by the linked-calendars store; the resolver only reads
/// them and writes back refreshed values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkedCalendar {
    pub id: CalendarId,
    pub investor_id: InvestorId,
    pub provider_calendar_id: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_expires_at: NaiveDateTime,
    pub include_in_availability: bool,
}

/// A bookable interval offered back to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

/// Day-level availability flag for calendar pickers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub has_slots: bool,
}

/// Half-open interval overlap: `[a_start, a_end)` against `[b_start, b_end)`.
pub(crate) fn intervals_overlap(
    a_start: NaiveDateTime,
    a_end: NaiveDateTime,
    b_start: NaiveDateTime,
    b_end: NaiveDateTime,
) -> bool {
    a_start < b_end && b_start < a_end
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 2)
            .expect("valid date")
            .and_hms_opt(h, m, 0)
            .expect("valid time")
    }

    #[test]
    fn overlap_is_half_open() {
        assert!(intervals_overlap(at(9, 0), at(10, 0), at(9, 30), at(10, 30)));
        assert!(!intervals_overlap(at(9, 0), at(10, 0), at(10, 0), at(11, 0)));
        assert!(!intervals_overlap(at(10, 0), at(11, 0), at(9, 0), at(10, 0)));
    }

    #[test]
    fn containment_counts_as_overlap() {
        assert!(intervals_overlap(at(9, 0), at(12, 0), at(10, 0), at(10, 30)));
        assert!(intervals_overlap(at(10, 0), at(10, 30), at(9, 0), at(12, 0)));
    }
}
