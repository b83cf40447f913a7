/// One scored category of the memo-readiness rubric. `aliases` lists every
/// question key that has historically fed the category; answering any one
/// of them fills it.
#[derive(Debug, Clone, Copy)]
pub struct RubricCategory {
    pub key: &'static str,
    pub weight: u32,
    pub aliases: &'static [&'static str],
    pub vc_rationale: Option<&'static str>,
}

/// Narrative quality of the memo inputs. Weights are business constants;
/// stored readiness thresholds depend on them staying put.
pub const QUALITATIVE: &[RubricCategory] = &[
    RubricCategory {
        key: "problem",
        weight: 12,
        aliases: &["problem_core", "problem_validation", "problem_statement"],
        vc_rationale: None,
    },
    RubricCategory {
        key: "solution",
        weight: 10,
        aliases: &["solution_core", "solution_differentiation", "product_description"],
        vc_rationale: None,
    },
    RubricCategory {
        key: "market",
        weight: 10,
        aliases: &["market_size", "market_core", "target_market"],
        vc_rationale: None,
    },
    RubricCategory {
        key: "competition",
        weight: 8,
        aliases: &["competition_landscape", "competitors", "competitive_advantage"],
        vc_rationale: None,
    },
    RubricCategory {
        key: "team",
        weight: 10,
        aliases: &["team_core", "team_background", "founders"],
        vc_rationale: None,
    },
];

/// Evidence of commercial momentum. Each category carries the reason VCs
/// care, surfaced verbatim when the category is flagged as a critical gap.
pub const MOMENTUM: &[RubricCategory] = &[
    RubricCategory {
        key: "unit_economics",
        weight: 15,
        aliases: &["unit_economics", "cac_ltv", "margins"],
        vc_rationale: Some("Unit economics show whether growth creates or destroys value."),
    },
    RubricCategory {
        key: "revenue",
        weight: 15,
        aliases: &["revenue", "mrr", "arr", "traction_revenue"],
        vc_rationale: Some("Paying customers are the strongest evidence of real demand."),
    },
    RubricCategory {
        key: "growth",
        weight: 12,
        aliases: &["growth", "growth_rate", "user_growth", "traction_growth"],
        vc_rationale: Some("Growth rate is what separates a venture-scale business from a project."),
    },
    RubricCategory {
        key: "vision",
        weight: 8,
        aliases: &["vision", "long_term_vision", "roadmap"],
        vc_rationale: Some("A fund-returning outcome needs a credible path to scale."),
    },
];
