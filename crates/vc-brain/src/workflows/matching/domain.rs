use serde::{Deserialize, Serialize};

/// Snapshot of a startup's fundraising posture used for matching. Fields
/// mirror the source database rows but are explicit options rather than a
/// loose key-value map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupProfile {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stage: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub sectors: Vec<String>,
    #[serde(default)]
    pub funding_ask: Option<u64>,
}

/// An investor's stated thesis and cheque constraints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorCriteria {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub stages: Vec<String>,
    #[serde(default)]
    pub investment_focus: Vec<String>,
    #[serde(default)]
    pub thesis_keywords: Vec<String>,
    #[serde(default)]
    pub ticket_size_min: Option<u64>,
    #[serde(default)]
    pub ticket_size_max: Option<u64>,
}

/// The rule family that produced a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalKind {
    Stage,
    Sector,
    Thesis,
    TicketSize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalStrength {
    High,
    Medium,
}

/// Discrete contribution to a match score, so the UI can explain why a
/// pairing scored the way it did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchSignal {
    pub kind: SignalKind,
    pub strength: SignalStrength,
    pub points: u32,
    pub detail: String,
}

/// Coarse bucket derived from the numeric percentage for UI simplicity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Strong,
    Good,
    Partial,
    Low,
}

impl MatchTier {
    pub fn from_percentage(percentage: u8) -> Self {
        match percentage {
            65.. => Self::Strong,
            45..=64 => Self::Good,
            25..=44 => Self::Partial,
            _ => Self::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Good => "good",
            Self::Partial => "partial",
            Self::Low => "low",
        }
    }
}

/// Scoring output: the raw point total, the 0-100 percentage, the ordered
/// signal trail, and the display tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffinityReport {
    pub score: u32,
    pub percentage: u8,
    pub signals: Vec<MatchSignal>,
    pub tier: MatchTier,
}
