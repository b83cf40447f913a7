use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::warn;

use super::calendar::CalendarGateway;
use super::domain::{
    intervals_overlap, AvailabilityRule, Booking, BookingStatus, BusyBlock, DayAvailability,
    EventType, EventTypeId, InvestorId, Slot, SlotOverride,
};
use super::repository::{RepositoryError, SchedulingRepository};

/// Candidate slot starts step at a fixed half-hour granularity regardless
/// of the event duration; sub-30-minute precision is impossible by design
/// and existing bookings rely on this grid.
const SLOT_STEP_MINUTES: i64 = 30;

/// Injected time source so slot filtering stays deterministic under test.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Wall-clock implementation used in production wiring.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Utc::now().naive_utc()
    }
}

/// Error raised when an availability computation cannot be answered at all.
/// Per-calendar failures are not represented here; they degrade the busy
/// data instead of failing the request.
#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    #[error("event type {0:?} not found")]
    EventTypeNotFound(EventTypeId),
    #[error("event type {0:?} is inactive")]
    EventTypeInactive(EventTypeId),
    #[error("invalid date range: {from} is after {to}")]
    InvalidRange { from: NaiveDate, to: NaiveDate },
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Computes bookable slots for an investor from recurring rules, date
/// overrides, existing bookings, and external calendar busy blocks.
pub struct AvailabilityResolver<R, C, K = SystemClock> {
    repository: Arc<R>,
    calendar: Arc<C>,
    clock: K,
}

impl<R, C> AvailabilityResolver<R, C, SystemClock>
where
    R: SchedulingRepository,
    C: CalendarGateway,
{
    pub fn new(repository: Arc<R>, calendar: Arc<C>) -> Self {
        Self::with_clock(repository, calendar, SystemClock)
    }
}

impl<R, C, K> AvailabilityResolver<R, C, K>
where
    R: SchedulingRepository,
    C: CalendarGateway,
    K: Clock,
{
    pub fn with_clock(repository: Arc<R>, calendar: Arc<C>, clock: K) -> Self {
        Self {
            repository,
            calendar,
            clock,
        }
    }

    /// All bookable slots for the investor within `[from, to]` inclusive.
    pub fn available_slots(
        &self,
        investor_id: &InvestorId,
        event_type_id: &EventTypeId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Slot>, AvailabilityError> {
        let context = self.load_context(investor_id, event_type_id, from, to)?;
        let now = self.clock.now();

        let mut slots = Vec::new();
        let mut date = from;
        while date <= to {
            if date >= now.date() {
                if let Some(window) = day_window(date, &context.overrides, &context.rules) {
                    collect_day_slots(
                        date,
                        window,
                        &context.event_type,
                        &context.bookings,
                        &context.busy,
                        now,
                        false,
                        &mut slots,
                    );
                }
            }
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(slots)
    }

    /// Day-level flags for calendar pickers: a day is marked as soon as one
    /// bookable slot exists, without enumerating the rest.
    pub fn available_days(
        &self,
        investor_id: &InvestorId,
        event_type_id: &EventTypeId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DayAvailability>, AvailabilityError> {
        let context = self.load_context(investor_id, event_type_id, from, to)?;
        let now = self.clock.now();

        let mut days = Vec::new();
        let mut date = from;
        while date <= to {
            let has_slots = if date < now.date() {
                false
            } else {
                match day_window(date, &context.overrides, &context.rules) {
                    Some(window) => {
                        let mut first = Vec::with_capacity(1);
                        collect_day_slots(
                            date,
                            window,
                            &context.event_type,
                            &context.bookings,
                            &context.busy,
                            now,
                            true,
                            &mut first,
                        );
                        !first.is_empty()
                    }
                    None => false,
                }
            };
            days.push(DayAvailability { date, has_slots });
            date = match date.succ_opt() {
                Some(next) => next,
                None => break,
            };
        }

        Ok(days)
    }

    fn load_context(
        &self,
        investor_id: &InvestorId,
        event_type_id: &EventTypeId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<ResolutionContext, AvailabilityError> {
        if from > to {
            return Err(AvailabilityError::InvalidRange { from, to });
        }

        let event_type = self
            .repository
            .event_type(event_type_id)?
            .ok_or(AvailabilityError::EventTypeNotFound(*event_type_id))?;
        if !event_type.is_active {
            return Err(AvailabilityError::EventTypeInactive(*event_type_id));
        }

        let rules = self.repository.availability_rules(investor_id)?;

        let overrides = self
            .repository
            .slot_overrides(investor_id, from, to)?
            .into_iter()
            .map(|entry| (entry.date, entry))
            .collect();

        let range_start = from.and_time(NaiveTime::MIN);
        let range_end = to
            .succ_opt()
            .map(|day| day.and_time(NaiveTime::MIN))
            .unwrap_or_else(|| to.and_hms_opt(23, 59, 59).unwrap_or(range_start));

        let bookings = self
            .repository
            .bookings(investor_id, range_start, range_end)?
            .into_iter()
            .filter(|booking| booking.status != BookingStatus::Cancelled)
            .collect();

        let busy = self.collect_busy_blocks(investor_id, range_start, range_end)?;

        Ok(ResolutionContext {
            event_type,
            rules,
            overrides,
            bookings,
            busy,
        })
    }

    /// Gather busy intervals from every linked calendar opted into
    /// availability. A calendar whose refresh or free/busy call fails is
    /// skipped; the computation then overestimates availability rather
    /// than failing the booking flow.
    fn collect_busy_blocks(
        &self,
        investor_id: &InvestorId,
        time_min: NaiveDateTime,
        time_max: NaiveDateTime,
    ) -> Result<Vec<BusyBlock>, AvailabilityError> {
        let calendars = self.repository.linked_calendars(investor_id)?;
        let now = self.clock.now();

        let mut busy = Vec::new();
        for linked in calendars
            .into_iter()
            .filter(|calendar| calendar.include_in_availability)
        {
            let access_token = if linked.token_expires_at <= now {
                match self.calendar.refresh_access_token(&linked.refresh_token) {
                    Ok(refreshed) => {
                        let expires_at = now + Duration::seconds(refreshed.expires_in_seconds);
                        if let Err(err) = self.repository.update_calendar_token(
                            &linked.id,
                            &refreshed.access_token,
                            expires_at,
                        ) {
                            warn!(
                                calendar = %linked.provider_calendar_id,
                                error = %err,
                                "failed to persist refreshed calendar token"
                            );
                        }
                        refreshed.access_token
                    }
                    Err(err) => {
                        warn!(
                            calendar = %linked.provider_calendar_id,
                            error = %err,
                            "calendar token refresh failed; omitting its busy blocks"
                        );
                        continue;
                    }
                }
            } else {
                linked.access_token.clone()
            };

            match self.calendar.free_busy(
                &access_token,
                &linked.provider_calendar_id,
                time_min,
                time_max,
            ) {
                Ok(blocks) => busy.extend(blocks),
                Err(err) => {
                    warn!(
                        calendar = %linked.provider_calendar_id,
                        error = %err,
                        "free/busy query failed; omitting its busy blocks"
                    );
                }
            }
        }

        Ok(busy)
    }
}

struct ResolutionContext {
    event_type: EventType,
    rules: Vec<AvailabilityRule>,
    overrides: HashMap<NaiveDate, SlotOverride>,
    bookings: Vec<Booking>,
    busy: Vec<BusyBlock>,
}

/// Resolve the open window for one day. A blocked override always wins; an
/// available override with explicit hours replaces the weekday rule; an
/// available override without hours falls back to the rule.
fn day_window(
    date: NaiveDate,
    overrides: &HashMap<NaiveDate, SlotOverride>,
    rules: &[AvailabilityRule],
) -> Option<(NaiveTime, NaiveTime)> {
    if let Some(entry) = overrides.get(&date) {
        if !entry.is_available {
            return None;
        }
        if let (Some(start), Some(end)) = (entry.start_time, entry.end_time) {
            return Some((start, end));
        }
    }

    let weekday = date.weekday().num_days_from_sunday() as u8;
    rules
        .iter()
        .find(|rule| rule.is_active && rule.day_of_week == weekday)
        .map(|rule| (rule.start_time, rule.end_time))
}

#[allow(clippy::too_many_arguments)]
fn collect_day_slots(
    date: NaiveDate,
    window: (NaiveTime, NaiveTime),
    event_type: &EventType,
    bookings: &[Booking],
    busy: &[BusyBlock],
    now: NaiveDateTime,
    stop_at_first: bool,
    out: &mut Vec<Slot>,
) {
    let duration = Duration::minutes(i64::from(event_type.duration_minutes));
    let buffer_before = Duration::minutes(i64::from(event_type.buffer_before_minutes));
    let buffer_after = Duration::minutes(i64::from(event_type.buffer_after_minutes));
    let step = Duration::minutes(SLOT_STEP_MINUTES);

    let window_end = date.and_time(window.1);
    let mut slot_start = date.and_time(window.0);

    while slot_start + duration <= window_end {
        let slot_end = slot_start + duration;

        if slot_start >= now {
            let padded_start = slot_start - buffer_before;
            let padded_end = slot_end + buffer_after;

            let conflicts = bookings.iter().any(|booking| {
                intervals_overlap(padded_start, padded_end, booking.start_time, booking.end_time)
            }) || busy
                .iter()
                .any(|block| intervals_overlap(padded_start, padded_end, block.start, block.end));

            if !conflicts {
                out.push(Slot {
                    start: slot_start,
                    end: slot_end,
                });
                if stop_at_first {
                    return;
                }
            }
        }

        slot_start += step;
    }
}
