//! Core engines backing the VC Brain platform: booking availability
//! resolution, investor affinity scoring, and memo readiness analysis.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
