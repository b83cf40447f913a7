//! Startup-to-investor affinity scoring: an additive, explainable point
//! budget over stage, sector, thesis, and ticket-size signals.

pub mod domain;
mod scorer;

pub use domain::{
    AffinityReport, InvestorCriteria, MatchSignal, MatchTier, SignalKind, SignalStrength,
    StartupProfile,
};
pub use scorer::score;
