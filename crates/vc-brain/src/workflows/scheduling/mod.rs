//! Booking availability resolution: recurring weekly rules, date-specific
//! overrides, existing bookings, and external calendar busy blocks are
//! folded into the set of bookable slots for a date range.

pub mod calendar;
pub mod domain;
pub mod repository;
mod resolver;
pub mod router;

#[cfg(test)]
mod tests;

pub use calendar::{CalendarError, CalendarGateway, HttpCalendarClient, RefreshedToken};
pub use domain::{
    AvailabilityRule, Booking, BookingStatus, BusyBlock, CalendarId, DayAvailability, EventType,
    EventTypeId, InvestorId, LinkedCalendar, Slot, SlotOverride,
};
pub use repository::{RepositoryError, SchedulingRepository};
pub use resolver::{AvailabilityError, AvailabilityResolver, Clock, SystemClock};
pub use router::{scheduling_router, AvailabilityQuery, DaysResponse, SlotsResponse};
