use vc_brain::workflows::matching::{
    score, InvestorCriteria, MatchTier, SignalKind, SignalStrength, StartupProfile,
};

fn seed_fintech_startup() -> StartupProfile {
    StartupProfile {
        name: Some("Ledgerly".to_string()),
        stage: Some("seed".to_string()),
        category: Some("fintech".to_string()),
        sectors: Vec::new(),
        funding_ask: Some(500_000),
    }
}

fn payments_seed_investor() -> InvestorCriteria {
    InvestorCriteria {
        name: Some("Meridian Capital".to_string()),
        stages: vec!["seed".to_string()],
        investment_focus: vec!["payments".to_string()],
        thesis_keywords: Vec::new(),
        ticket_size_min: Some(250_000),
        ticket_size_max: Some(1_000_000),
    }
}

#[test]
fn seed_fintech_pairing_lands_in_the_strong_tier() {
    let report = score(&seed_fintech_startup(), &payments_seed_investor());

    // 35 stage + 15 sector (via fintech -> payments expansion) + 15 ticket.
    assert_eq!(report.score, 65);
    assert_eq!(report.percentage, 65);
    assert_eq!(report.tier, MatchTier::Strong);

    let kinds: Vec<_> = report.signals.iter().map(|signal| signal.kind).collect();
    assert_eq!(
        kinds,
        vec![SignalKind::Stage, SignalKind::Sector, SignalKind::TicketSize]
    );
    assert_eq!(report.signals[0].strength, SignalStrength::High);
    assert_eq!(report.signals[1].strength, SignalStrength::Medium);
    assert_eq!(report.signals[2].strength, SignalStrength::High);
}

#[test]
fn scoring_is_deterministic_including_signal_order() {
    let startup = seed_fintech_startup();
    let investor = payments_seed_investor();

    let first = score(&startup, &investor);
    let second = score(&startup, &investor);

    assert_eq!(first, second);
}

#[test]
fn every_signal_firing_caps_the_percentage_at_one_hundred() {
    let startup = StartupProfile {
        name: None,
        stage: Some("seed".to_string()),
        category: Some("fintech".to_string()),
        sectors: vec!["payments".to_string(), "lending".to_string()],
        funding_ask: Some(500_000),
    };
    let investor = InvestorCriteria {
        name: None,
        stages: vec!["seed".to_string()],
        investment_focus: vec!["payments".to_string(), "lending".to_string()],
        thesis_keywords: vec!["payments".to_string(), "lending".to_string()],
        ticket_size_min: Some(100_000),
        ticket_size_max: Some(1_000_000),
    };

    let report = score(&startup, &investor);

    // 35 + 30 (capped) + 20 (capped) + 15.
    assert_eq!(report.score, 100);
    assert_eq!(report.percentage, 100);
    assert_eq!(report.tier, MatchTier::Strong);
    assert!(report
        .signals
        .iter()
        .filter(|signal| signal.kind == SignalKind::Sector)
        .all(|signal| signal.strength == SignalStrength::High && signal.points == 30));
}

#[test]
fn stage_aliases_bridge_label_differences() {
    let mut startup = seed_fintech_startup();
    startup.stage = Some("Angel".to_string());

    let report = score(&startup, &payments_seed_investor());

    assert!(report
        .signals
        .iter()
        .any(|signal| signal.kind == SignalKind::Stage));
}

#[test]
fn a_stretch_ticket_earns_the_reduced_award() {
    let mut startup = seed_fintech_startup();
    startup.funding_ask = Some(1_400_000); // inside 1.5x the 1M ceiling

    let report = score(&startup, &payments_seed_investor());

    let ticket = report
        .signals
        .iter()
        .find(|signal| signal.kind == SignalKind::TicketSize)
        .expect("ticket signal present");
    assert_eq!(ticket.points, 7);
    assert_eq!(ticket.strength, SignalStrength::Medium);
}

#[test]
fn an_out_of_range_ticket_earns_nothing() {
    let mut startup = seed_fintech_startup();
    startup.funding_ask = Some(5_000_000);

    let report = score(&startup, &payments_seed_investor());

    assert!(report
        .signals
        .iter()
        .all(|signal| signal.kind != SignalKind::TicketSize));
}

#[test]
fn disjoint_profiles_score_low_with_no_signals() {
    let startup = StartupProfile {
        name: None,
        stage: Some("growth".to_string()),
        category: Some("edtech".to_string()),
        sectors: Vec::new(),
        funding_ask: None,
    };
    let investor = payments_seed_investor();

    let report = score(&startup, &investor);

    assert_eq!(report.score, 0);
    assert_eq!(report.tier, MatchTier::Low);
    assert!(report.signals.is_empty());
}

#[test]
fn tier_boundaries_match_the_published_thresholds() {
    assert_eq!(MatchTier::from_percentage(65), MatchTier::Strong);
    assert_eq!(MatchTier::from_percentage(64), MatchTier::Good);
    assert_eq!(MatchTier::from_percentage(45), MatchTier::Good);
    assert_eq!(MatchTier::from_percentage(44), MatchTier::Partial);
    assert_eq!(MatchTier::from_percentage(25), MatchTier::Partial);
    assert_eq!(MatchTier::from_percentage(24), MatchTier::Low);
}
