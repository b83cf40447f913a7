use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::rubric::{RubricCategory, MOMENTUM, QUALITATIVE};

/// Coarse verdict used by the question-generation pipeline downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadinessVerdict {
    Ready,
    NeedsInput,
    InsufficientData,
}

impl ReadinessVerdict {
    fn from_readiness(memo_readiness: f64) -> Self {
        if memo_readiness >= 60.0 {
            Self::Ready
        } else if memo_readiness >= 40.0 {
            Self::NeedsInput
        } else {
            Self::InsufficientData
        }
    }
}

/// A momentum category with zero answered aliases, carrying the rationale
/// that downstream prompts quote back to the founder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalGap {
    pub category: String,
    pub rationale: String,
}

/// Output of a gap analysis over questionnaire answers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub qualitative_score: f64,
    pub momentum_score: f64,
    pub memo_readiness: f64,
    pub verdict: ReadinessVerdict,
    pub critical_gaps: Vec<CriticalGap>,
    /// Per-category fill state across both rubrics, keyed by category.
    pub filled: BTreeMap<String, bool>,
}

/// Analyze free-text questionnaire answers against the fixed rubrics.
///
/// A category counts as filled when any of its alias keys carries a
/// non-empty trimmed answer - an OR-merge that keeps legacy and renamed
/// question keys scoring identically. Momentum outweighs narrative 60/40
/// in the composite because revenue and growth data matter more to
/// investors than storytelling.
pub fn analyze(responses: &BTreeMap<String, String>) -> ReadinessReport {
    let mut filled = BTreeMap::new();

    let qualitative_score = rubric_score(QUALITATIVE, responses, &mut filled);
    let momentum_score = rubric_score(MOMENTUM, responses, &mut filled);

    let memo_readiness = (qualitative_score * 40.0 + momentum_score * 60.0) / 100.0;

    let critical_gaps = MOMENTUM
        .iter()
        .filter(|category| !category_filled(category, responses))
        .map(|category| CriticalGap {
            category: category.key.to_string(),
            rationale: category.vc_rationale.unwrap_or_default().to_string(),
        })
        .collect();

    ReadinessReport {
        qualitative_score,
        momentum_score,
        memo_readiness,
        verdict: ReadinessVerdict::from_readiness(memo_readiness),
        critical_gaps,
        filled,
    }
}

fn rubric_score(
    rubric: &[RubricCategory],
    responses: &BTreeMap<String, String>,
    filled: &mut BTreeMap<String, bool>,
) -> f64 {
    let total_weight: u32 = rubric.iter().map(|category| category.weight).sum();
    if total_weight == 0 {
        return 0.0;
    }

    let mut covered_weight: u32 = 0;
    for category in rubric {
        let covered = category_filled(category, responses);
        filled.insert(category.key.to_string(), covered);
        if covered {
            covered_weight += category.weight;
        }
    }

    f64::from(covered_weight) / f64::from(total_weight) * 100.0
}

fn category_filled(category: &RubricCategory, responses: &BTreeMap<String, String>) -> bool {
    category.aliases.iter().any(|alias| {
        responses
            .get(*alias)
            .map(|answer| !answer.trim().is_empty())
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn responses(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn empty_answers_do_not_fill_a_category() {
        let report = analyze(&responses(&[("revenue", "   ")]));
        assert_eq!(report.momentum_score, 0.0);
        assert!(report
            .critical_gaps
            .iter()
            .any(|gap| gap.category == "revenue"));
    }

    #[test]
    fn alias_fallback_fills_the_category() {
        let report = analyze(&responses(&[("problem_validation", "churn interviews")]));
        assert_eq!(report.filled.get("problem"), Some(&true));
        assert!(report.qualitative_score > 0.0);
    }

    #[test]
    fn fully_qualitative_input_scores_exactly_forty() {
        let report = analyze(&responses(&[
            ("problem_core", "a"),
            ("solution_core", "b"),
            ("market_size", "c"),
            ("competitors", "d"),
            ("team_core", "e"),
        ]));
        assert_eq!(report.qualitative_score, 100.0);
        assert_eq!(report.momentum_score, 0.0);
        assert_eq!(report.memo_readiness, 40.0);
        assert_eq!(report.verdict, ReadinessVerdict::NeedsInput);
    }

    #[test]
    fn every_momentum_gap_carries_its_rationale() {
        let report = analyze(&BTreeMap::new());
        assert_eq!(report.critical_gaps.len(), 4);
        assert!(report
            .critical_gaps
            .iter()
            .all(|gap| !gap.rationale.is_empty()));
    }
}
