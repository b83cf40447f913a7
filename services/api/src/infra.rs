use chrono::{NaiveDate, NaiveDateTime};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use vc_brain::workflows::scheduling::{
    AvailabilityRule, Booking, BookingStatus, BusyBlock, CalendarError, CalendarGateway,
    CalendarId, EventType, EventTypeId, InvestorId, LinkedCalendar, RefreshedToken,
    RepositoryError, SchedulingRepository, SlotOverride,
};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct SchedulingRows {
    event_types: Vec<EventType>,
    rules: Vec<AvailabilityRule>,
    overrides: Vec<SlotOverride>,
    bookings: Vec<Booking>,
    calendars: Vec<LinkedCalendar>,
}

/// Mutex-guarded row store standing in for the relational backend.
#[derive(Default, Clone)]
pub(crate) struct InMemorySchedulingRepository {
    rows: Arc<Mutex<SchedulingRows>>,
}

impl InMemorySchedulingRepository {
    pub(crate) fn insert_event_type(&self, event_type: EventType) {
        self.rows
            .lock()
            .expect("scheduling mutex poisoned")
            .event_types
            .push(event_type);
    }

    pub(crate) fn insert_rule(&self, rule: AvailabilityRule) {
        self.rows
            .lock()
            .expect("scheduling mutex poisoned")
            .rules
            .push(rule);
    }

    pub(crate) fn insert_override(&self, entry: SlotOverride) {
        self.rows
            .lock()
            .expect("scheduling mutex poisoned")
            .overrides
            .push(entry);
    }

    /// Reject a booking that overlaps an existing non-cancelled one; the
    /// write path, not the resolver, owns the double-booking guard.
    pub(crate) fn insert_booking(&self, booking: Booking) -> Result<(), RepositoryError> {
        let mut rows = self.rows.lock().expect("scheduling mutex poisoned");
        let clash = rows.bookings.iter().any(|existing| {
            existing.investor_id == booking.investor_id
                && existing.status != BookingStatus::Cancelled
                && existing.start_time < booking.end_time
                && booking.start_time < existing.end_time
        });
        if clash {
            return Err(RepositoryError::Conflict);
        }
        rows.bookings.push(booking);
        Ok(())
    }

    pub(crate) fn insert_calendar(&self, calendar: LinkedCalendar) {
        self.rows
            .lock()
            .expect("scheduling mutex poisoned")
            .calendars
            .push(calendar);
    }
}

impl SchedulingRepository for InMemorySchedulingRepository {
    fn event_type(&self, id: &EventTypeId) -> Result<Option<EventType>, RepositoryError> {
        let rows = self.rows.lock().expect("scheduling mutex poisoned");
        Ok(rows.event_types.iter().find(|et| et.id == *id).cloned())
    }

    fn availability_rules(
        &self,
        investor_id: &InvestorId,
    ) -> Result<Vec<AvailabilityRule>, RepositoryError> {
        let rows = self.rows.lock().expect("scheduling mutex poisoned");
        Ok(rows
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
        let rows = self.rows.lock().expect("scheduling mutex poisoned");
        Ok(rows
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
        let rows = self.rows.lock().expect("scheduling mutex poisoned");
        Ok(rows
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
        let rows = self.rows.lock().expect("scheduling mutex poisoned");
        Ok(rows
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
        let mut rows = self.rows.lock().expect("scheduling mutex poisoned");
        let calendar = rows
            .calendars
            .iter_mut()
            .find(|calendar| calendar.id == *calendar_id)
            .ok_or(RepositoryError::NotFound)?;
        calendar.access_token = access_token.to_string();
        calendar.token_expires_at = expires_at;
        Ok(())
    }
}

/// Offline calendar gateway for CLI demos: every linked calendar reports
/// the same scripted busy blocks and token refreshes always succeed.
#[derive(Default, Clone)]
pub(crate) struct StaticCalendarGateway {
    pub(crate) busy: Vec<BusyBlock>,
}

impl CalendarGateway for StaticCalendarGateway {
    fn refresh_access_token(&self, _refresh_token: &str) -> Result<RefreshedToken, CalendarError> {
        Ok(RefreshedToken {
            access_token: "demo-access-token".to_string(),
            expires_in_seconds: 3600,
        })
    }

    fn free_busy(
        &self,
        _access_token: &str,
        _provider_calendar_id: &str,
        time_min: NaiveDateTime,
        time_max: NaiveDateTime,
    ) -> Result<Vec<BusyBlock>, CalendarError> {
        Ok(self
            .busy
            .iter()
            .copied()
            .filter(|block| block.start < time_max && block.end > time_min)
            .collect())
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
