use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

use crate::workflows::scheduling::calendar::{CalendarError, CalendarGateway, RefreshedToken};
use crate::workflows::scheduling::domain::{
    AvailabilityRule, Booking, BusyBlock, CalendarId, EventType, EventTypeId, InvestorId,
    LinkedCalendar, SlotOverride,
};
use crate::workflows::scheduling::repository::{RepositoryError, SchedulingRepository};
use crate::workflows::scheduling::resolver::Clock;

pub(super) fn investor() -> InvestorId {
    InvestorId(Uuid::from_u128(0x11))
}

pub(super) fn event_type_id() -> EventTypeId {
    EventTypeId(Uuid::from_u128(0x22))
}

pub(super) fn calendar_id(n: u128) -> CalendarId {
    CalendarId(Uuid::from_u128(0x3300 + n))
}

pub(super) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub(super) fn time(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).expect("valid time")
}

pub(super) fn at(day: NaiveDate, h: u32, m: u32) -> NaiveDateTime {
    day.and_hms_opt(h, m, 0).expect("valid datetime")
}

pub(super) fn thirty_minute_call() -> EventType {
    EventType {
        id: event_type_id(),
        name: "Intro call".to_string(),
        duration_minutes: 30,
        buffer_before_minutes: 0,
        buffer_after_minutes: 0,
        is_active: true,
    }
}

pub(super) fn weekday_rule(day_of_week: u8, start: NaiveTime, end: NaiveTime) -> AvailabilityRule {
    AvailabilityRule {
        investor_id: investor(),
        day_of_week,
        start_time: start,
        end_time: end,
        is_active: true,
    }
}

pub(super) fn linked_calendar(
    n: u128,
    provider_calendar_id: &str,
    token_expires_at: NaiveDateTime,
) -> LinkedCalendar {
    LinkedCalendar {
        id: calendar_id(n),
        investor_id: investor(),
        provider_calendar_id: provider_calendar_id.to_string(),
        access_token: format!("stored-token-{n}"),
        refresh_token: format!("refresh-token-{n}"),
        token_expires_at,
        include_in_availability: true,
    }
}

/// In-memory rows backing the resolver under test.
#[derive(Default)]
pub(super) struct StubRepository {
    pub(super) event_types: Vec<EventType>,
    pub(super) rules: Vec<AvailabilityRule>,
    pub(super) overrides: Vec<SlotOverride>,
    pub(super) bookings: Vec<Booking>,
    pub(super) calendars: Vec<LinkedCalendar>,
    pub(super) token_updates: Mutex<Vec<(CalendarId, String, NaiveDateTime)>>,
}

impl SchedulingRepository for StubRepository {
    fn event_type(&self, id: &EventTypeId) -> Result<Option<EventType>, RepositoryError> {
        Ok(self.event_types.iter().find(|et| et.id == *id).cloned())
    }

    fn availability_rules(
        &self,
        investor_id: &InvestorId,
    ) -> Result<Vec<AvailabilityRule>, RepositoryError> {
        Ok(self
            .rules
            .iter()
            .filter(|rule| rule.investor_id == *investor_id)
            .cloned()
            .collect())
    }

    fn slot_overrides(
        &self,
        investor_id: &InvestorId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SlotOverride>, RepositoryError> {
        Ok(self
            .overrides
            .iter()
            .filter(|entry| {
                entry.investor_id == *investor_id && entry.date >= from && entry.date <= to
            })
            .cloned()
            .collect())
    }

    fn bookings(
        &self,
        investor_id: &InvestorId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<Booking>, RepositoryError> {
        Ok(self
            .bookings
            .iter()
            .filter(|booking| {
                booking.investor_id == *investor_id
                    && booking.start_time < to
                    && booking.end_time > from
            })
            .cloned()
            .collect())
    }

    fn linked_calendars(
        &self,
        investor_id: &InvestorId,
    ) -> Result<Vec<LinkedCalendar>, RepositoryError> {
        Ok(self
            .calendars
            .iter()
            .filter(|calendar| calendar.investor_id == *investor_id)
            .cloned()
            .collect())
    }

    fn update_calendar_token(
        &self,
        calendar_id: &CalendarId,
        access_token: &str,
        expires_at: NaiveDateTime,
    ) -> Result<(), RepositoryError> {
        self.token_updates
            .lock()
            .expect("token update mutex poisoned")
            .push((*calendar_id, access_token.to_string(), expires_at));
        Ok(())
    }
}

/// Scripted calendar collaborator recording every call it receives.
#[derive(Default)]
pub(super) struct StubCalendar {
    pub(super) busy: HashMap<String, Vec<BusyBlock>>,
    pub(super) failing_free_busy: HashSet<String>,
    pub(super) failing_refresh_tokens: HashSet<String>,
    pub(super) refresh_calls: Mutex<Vec<String>>,
    pub(super) free_busy_calls: Mutex<Vec<(String, String)>>,
}

impl CalendarGateway for StubCalendar {
    fn refresh_access_token(&self, refresh_token: &str) -> Result<RefreshedToken, CalendarError> {
        self.refresh_calls
            .lock()
            .expect("refresh mutex poisoned")
            .push(refresh_token.to_string());
        if self.failing_refresh_tokens.contains(refresh_token) {
            return Err(CalendarError::RefreshRejected(
                "invalid_grant".to_string(),
            ));
        }
        Ok(RefreshedToken {
            access_token: format!("minted-for-{refresh_token}"),
            expires_in_seconds: 3600,
        })
    }

    fn free_busy(
        &self,
        access_token: &str,
        provider_calendar_id: &str,
        _time_min: NaiveDateTime,
        _time_max: NaiveDateTime,
    ) -> Result<Vec<BusyBlock>, CalendarError> {
        self.free_busy_calls
            .lock()
            .expect("free/busy mutex poisoned")
            .push((access_token.to_string(), provider_calendar_id.to_string()));
        if self.failing_free_busy.contains(provider_calendar_id) {
            return Err(CalendarError::FreeBusy("backend returned 500".to_string()));
        }
        Ok(self
            .busy
            .get(provider_calendar_id)
            .cloned()
            .unwrap_or_default())
    }
}

/// Deterministic time source for slot filtering.
pub(super) struct FixedClock(pub(super) NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
