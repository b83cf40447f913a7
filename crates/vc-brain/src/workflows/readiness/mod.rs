//! Memo readiness analysis: weighted completeness over two fixed rubrics
//! with OR-merged legacy question keys and critical-gap extraction.

mod analyzer;
pub mod rubric;

pub use analyzer::{analyze, CriticalGap, ReadinessReport, ReadinessVerdict};
pub use rubric::{RubricCategory, MOMENTUM, QUALITATIVE};
