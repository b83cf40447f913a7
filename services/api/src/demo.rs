use crate::infra::{parse_date, InMemorySchedulingRepository, StaticCalendarGateway};
use chrono::{Duration, Local, NaiveDate, NaiveTime, Utc};
use clap::Args;
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;
use vc_brain::error::AppError;
use vc_brain::workflows::matching::{self, InvestorCriteria, StartupProfile};
use vc_brain::workflows::readiness;
use vc_brain::workflows::scheduling::{
    AvailabilityResolver, AvailabilityRule, Booking, BookingStatus, BusyBlock, CalendarId,
    EventType, EventTypeId, InvestorId, LinkedCalendar, SlotOverride,
};

#[derive(Args, Debug, Default)]
pub(crate) struct SlotReportArgs {
    /// First day of the report range (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) from: Option<NaiveDate>,
    /// Number of days to cover
    #[arg(long, default_value_t = 7)]
    pub(crate) days: u16,
    /// Print per-day flags instead of individual slots
    #[arg(long)]
    pub(crate) day_flags: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// First day of the availability portion (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) from: Option<NaiveDate>,
}

struct SeededSchedule {
    repository: Arc<InMemorySchedulingRepository>,
    calendar: Arc<StaticCalendarGateway>,
    investor: InvestorId,
    event_type: EventTypeId,
}

/// Seed a demo investor: open mornings every day, one blocked day, one
/// existing booking, and a linked calendar whose token is already expired
/// so the refresh path runs.
fn seed_schedule(from: NaiveDate) -> SeededSchedule {
    let investor = InvestorId(Uuid::new_v4());
    let event_type = EventTypeId(Uuid::new_v4());
    let repository = Arc::new(InMemorySchedulingRepository::default());

    repository.insert_event_type(EventType {
        id: event_type,
        name: "Pitch review".to_string(),
        duration_minutes: 30,
        buffer_before_minutes: 10,
        buffer_after_minutes: 10,
        is_active: true,
    });

    let open = NaiveTime::from_hms_opt(9, 0, 0).expect("valid time");
    let close = NaiveTime::from_hms_opt(12, 0, 0).expect("valid time");
    for day_of_week in 0..7 {
        repository.insert_rule(AvailabilityRule {
            investor_id: investor,
            day_of_week,
            start_time: open,
            end_time: close,
            is_active: true,
        });
    }

    repository.insert_override(SlotOverride {
        investor_id: investor,
        date: from + Duration::days(2),
        is_available: false,
        start_time: None,
        end_time: None,
    });

    let busy_day = from + Duration::days(1);
    repository
        .insert_booking(Booking {
            investor_id: investor,
            start_time: busy_day.and_hms_opt(9, 0, 0).expect("valid time"),
            end_time: busy_day.and_hms_opt(9, 30, 0).expect("valid time"),
            status: BookingStatus::Confirmed,
        })
        .expect("seed booking inserts");

    repository.insert_calendar(LinkedCalendar {
        id: CalendarId(Uuid::new_v4()),
        investor_id: investor,
        provider_calendar_id: "partner@demo.example".to_string(),
        access_token: "expired-token".to_string(),
        refresh_token: "demo-refresh-token".to_string(),
        token_expires_at: Utc::now().naive_utc() - Duration::hours(1),
        include_in_availability: true,
    });

    let calendar = Arc::new(StaticCalendarGateway {
        busy: vec![BusyBlock {
            start: busy_day.and_hms_opt(10, 30, 0).expect("valid time"),
            end: busy_day.and_hms_opt(11, 30, 0).expect("valid time"),
        }],
    });

    SeededSchedule {
        repository,
        calendar,
        investor,
        event_type,
    }
}

pub(crate) fn run_slot_report(args: SlotReportArgs) -> Result<(), AppError> {
    let from = args.from.unwrap_or_else(|| Local::now().date_naive());
    let to = from + Duration::days(i64::from(args.days.max(1)) - 1);

    let seeded = seed_schedule(from);
    let resolver = AvailabilityResolver::new(seeded.repository, seeded.calendar);

    println!("Bookable availability {from} .. {to} (demo data)");
    println!("=================================================");

    if args.day_flags {
        let days = resolver.available_days(&seeded.investor, &seeded.event_type, from, to)?;
        for day in days {
            let marker = if day.has_slots { "open" } else { "-" };
            println!("  {}  {marker}", day.date);
        }
    } else {
        let slots = resolver.available_slots(&seeded.investor, &seeded.event_type, from, to)?;
        if slots.is_empty() {
            println!("  no bookable slots in range");
        }
        for slot in slots {
            println!("  {} -> {}", slot.start, slot.end);
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let from = args.from.unwrap_or_else(|| Local::now().date_naive());

    println!("VC Brain demo");
    println!("=============");
    println!();

    run_slot_report(SlotReportArgs {
        from: Some(from),
        days: 7,
        day_flags: false,
    })?;

    let startup = StartupProfile {
        name: Some("Ledgerly".to_string()),
        stage: Some("seed".to_string()),
        category: Some("fintech".to_string()),
        sectors: vec!["payments".to_string()],
        funding_ask: Some(500_000),
    };
    let investor = InvestorCriteria {
        name: Some("Meridian Capital".to_string()),
        stages: vec!["seed".to_string(), "pre-seed".to_string()],
        investment_focus: vec!["payments".to_string(), "lending".to_string()],
        thesis_keywords: vec!["payments".to_string()],
        ticket_size_min: Some(250_000),
        ticket_size_max: Some(1_000_000),
    };

    let report = matching::score(&startup, &investor);
    println!();
    println!(
        "Affinity: {} vs {}",
        startup.name.as_deref().unwrap_or("startup"),
        investor.name.as_deref().unwrap_or("investor")
    );
    println!("  {}% ({} tier)", report.percentage, report.tier.label());
    for signal in &report.signals {
        println!("  +{:<3} {:?} ({:?}): {}", signal.points, signal.kind, signal.strength, signal.detail);
    }

    let responses = BTreeMap::from([
        (
            "problem_validation".to_string(),
            "30 founder interviews; 70% hit the problem weekly".to_string(),
        ),
        ("solution_core".to_string(), "reconciliation copilot".to_string()),
        ("revenue".to_string(), "18k MRR, 11 customers".to_string()),
    ]);
    let readiness = readiness::analyze(&responses);
    println!();
    println!("Memo readiness");
    println!(
        "  qualitative {:.0}%, momentum {:.0}%, composite {:.1} ({:?})",
        readiness.qualitative_score,
        readiness.momentum_score,
        readiness.memo_readiness,
        readiness.verdict
    );
    for gap in &readiness.critical_gaps {
        println!("  gap: {} - {}", gap.category, gap.rationale);
    }

    Ok(())
}
