pub mod matching;
pub mod readiness;
pub mod scheduling;
