use super::domain::{
    AffinityReport, InvestorCriteria, MatchSignal, MatchTier, SignalKind, SignalStrength,
    StartupProfile,
};

const STAGE_POINTS: u32 = 35;
const SECTOR_POINTS_PER_MATCH: u32 = 15;
const SECTOR_POINTS_CAP: u32 = 30;
const THESIS_POINTS_PER_MATCH: u32 = 10;
const THESIS_POINTS_CAP: u32 = 20;
const TICKET_EXACT_POINTS: u32 = 15;
const TICKET_STRETCH_POINTS: u32 = 7;

/// Funding stages that should match even when labelled differently across
/// data sources.
const STAGE_ALIASES: &[(&str, &[&str])] = &[
    ("pre-seed", &["preseed", "pre seed", "angel", "idea"]),
    ("seed", &["angel", "early", "pre-series a"]),
    ("series a", &["early", "early growth"]),
    ("series b", &["growth", "expansion"]),
    ("growth", &["late", "expansion", "series c"]),
];

/// Umbrella sectors expanded into the narrower tags investors tend to list.
const SECTOR_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "fintech",
        &["payments", "defi", "banking", "lending", "insurtech", "crypto"],
    ),
    (
        "healthtech",
        &["biotech", "medtech", "digital health", "wellness"],
    ),
    (
        "ai",
        &["machine learning", "ml", "artificial intelligence", "data infrastructure"],
    ),
    ("saas", &["b2b software", "enterprise software", "cloud"]),
    (
        "climate",
        &["cleantech", "energy", "sustainability", "carbon"],
    ),
    (
        "consumer",
        &["marketplace", "d2c", "ecommerce", "social commerce"],
    ),
    ("edtech", &["education", "learning", "upskilling"]),
    (
        "deeptech",
        &["robotics", "hardware", "semiconductors", "quantum"],
    ),
];

/// Score a startup against an investor's criteria. Pure and deterministic:
/// identical inputs produce identical output, including signal order
/// (stage, sector, thesis, ticket).
pub fn score(startup: &StartupProfile, investor: &InvestorCriteria) -> AffinityReport {
    let mut signals = Vec::new();
    let mut total: u32 = 0;

    if let Some(stage) = startup.stage.as_deref() {
        if investor
            .stages
            .iter()
            .any(|accepted| stages_match(stage, accepted))
        {
            signals.push(MatchSignal {
                kind: SignalKind::Stage,
                strength: SignalStrength::High,
                points: STAGE_POINTS,
                detail: format!("stage '{}' is in the investor's range", stage.trim()),
            });
            total += STAGE_POINTS;
        }
    }

    let startup_tags: Vec<&str> = startup
        .category
        .as_deref()
        .into_iter()
        .chain(startup.sectors.iter().map(String::as_str))
        .collect();

    let sector_matches = startup_tags
        .iter()
        .filter(|tag| {
            investor
                .investment_focus
                .iter()
                .any(|focus| sector_tag_matches(tag, focus))
        })
        .count() as u32;
    if sector_matches > 0 {
        let points = (sector_matches * SECTOR_POINTS_PER_MATCH).min(SECTOR_POINTS_CAP);
        signals.push(MatchSignal {
            kind: SignalKind::Sector,
            strength: if sector_matches >= 2 {
                SignalStrength::High
            } else {
                SignalStrength::Medium
            },
            points,
            detail: format!("{sector_matches} sector tag(s) overlap the investment focus"),
        });
        total += points;
    }

    let thesis_matches = investor
        .thesis_keywords
        .iter()
        .filter(|keyword| {
            startup_tags
                .iter()
                .any(|tag| contains_either(keyword, tag))
        })
        .count() as u32;
    if thesis_matches > 0 {
        let points = (thesis_matches * THESIS_POINTS_PER_MATCH).min(THESIS_POINTS_CAP);
        signals.push(MatchSignal {
            kind: SignalKind::Thesis,
            strength: if thesis_matches >= 2 {
                SignalStrength::High
            } else {
                SignalStrength::Medium
            },
            points,
            detail: format!("{thesis_matches} thesis keyword(s) touch the startup's sectors"),
        });
        total += points;
    }

    if let Some(ask) = startup.funding_ask {
        let min = investor.ticket_size_min.unwrap_or(0);
        let max = investor.ticket_size_max.unwrap_or(u64::MAX);
        if ask >= min && ask <= max {
            signals.push(MatchSignal {
                kind: SignalKind::TicketSize,
                strength: SignalStrength::High,
                points: TICKET_EXACT_POINTS,
                detail: "funding ask sits inside the ticket range".to_string(),
            });
            total += TICKET_EXACT_POINTS;
        } else if ask >= min / 2 && ask <= stretch_ceiling(max) {
            signals.push(MatchSignal {
                kind: SignalKind::TicketSize,
                strength: SignalStrength::Medium,
                points: TICKET_STRETCH_POINTS,
                detail: "funding ask is within stretch distance of the ticket range".to_string(),
            });
            total += TICKET_STRETCH_POINTS;
        }
    }

    let percentage = total.min(100) as u8;

    AffinityReport {
        score: total,
        percentage,
        signals,
        tier: MatchTier::from_percentage(percentage),
    }
}

// 1.5x the upper ticket bound, saturating rather than overflowing.
fn stretch_ceiling(max: u64) -> u64 {
    max.saturating_add(max / 2)
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn stages_match(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    if a == b {
        return true;
    }
    STAGE_ALIASES.iter().any(|(canonical, aliases)| {
        (*canonical == a && aliases.contains(&b.as_str()))
            || (*canonical == b && aliases.contains(&a.as_str()))
    })
}

/// Substring containment in either direction after normalization, so
/// "fintech infrastructure" still matches a plain "fintech" focus.
fn contains_either(a: &str, b: &str) -> bool {
    let a = normalize(a);
    let b = normalize(b);
    !a.is_empty() && !b.is_empty() && (a.contains(&b) || b.contains(&a))
}

fn sector_tag_matches(tag: &str, focus: &str) -> bool {
    if contains_either(tag, focus) {
        return true;
    }
    let tag = normalize(tag);
    SECTOR_KEYWORDS
        .iter()
        .filter(|(umbrella, _)| tag.contains(umbrella))
        .flat_map(|(_, keywords)| keywords.iter())
        .any(|keyword| contains_either(keyword, focus))
}
