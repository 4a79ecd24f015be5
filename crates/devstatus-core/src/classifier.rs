//! Tier classifier: an ordered waterfall over evidence, scores and release facts.
//!
//! Rules are evaluated top to bottom and the first one that produces a
//! [`Decision`] wins:
//!
//! 1. published gate → `Planning`
//! 2. inactivity override → `Inactive`
//! 3. production criteria → `ProductionStable`, refined to `Mature`
//! 4. early-phase bucketing (total) → `Planning` ..= `Beta`
//!
//! Every predicate is a free function so each precedence rule can be tested
//! on its own. The classifier never fails and never reads the clock: `as_of`
//! is an input, so identical inputs always yield identical decisions.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::evidence::EvidenceSet;
use crate::facts::{older_than_months, within_months, ReleaseFacts};
use crate::obs;
use crate::rubric::{BucketRule, Rubric};
use crate::score::{Metrics, Score};
use crate::tier::Tier;

/// Everything the classifier reads. Borrowed; nothing is mutated.
#[derive(Debug, Clone, Copy)]
pub struct ClassifyInput<'a> {
    pub evidence: &'a EvidenceSet,
    pub facts: &'a ReleaseFacts,
    pub metrics: &'a Metrics,
    pub rubric: &'a Rubric,
    pub as_of: DateTime<Utc>,
}

/// Which waterfall rule produced the decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    PublishedGate,
    InactiveOverride,
    ProductionStable,
    MatureRefinement,
    EarlyPhaseBucket,
}

impl DecisionRule {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::PublishedGate => "published_gate",
            Self::InactiveOverride => "inactive_override",
            Self::ProductionStable => "production_stable",
            Self::MatureRefinement => "mature_refinement",
            Self::EarlyPhaseBucket => "early_phase_bucket",
        }
    }
}

/// The score that drove a decision, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CitedScore {
    Eps(Score),
    Completeness(Score),
}

impl fmt::Display for CitedScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eps(s) => write!(f, "EPS={s}"),
            Self::Completeness(s) => write!(f, "completeness={s}"),
        }
    }
}

/// The single most decision-relevant boolean.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisiveFlag {
    pub label: String,
    pub holds: bool,
}

impl DecisiveFlag {
    fn new(label: impl Into<String>, holds: bool) -> Self {
        Self {
            label: label.into(),
            holds,
        }
    }
}

impl fmt::Display for DecisiveFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.holds { "holds" } else { "fails" };
        write!(f, "{} {}", self.label, verdict)
    }
}

/// Classifier output: the tier plus exactly the facts the report cites.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub tier: Tier,
    pub rule: DecisionRule,
    pub cited: Option<CitedScore>,
    /// Numeric bucket the project was demoted from, if any.
    pub demoted_from: Option<Tier>,
    pub flag: DecisiveFlag,
}

type OverrideRule = fn(&ClassifyInput<'_>) -> Option<Decision>;

/// Precedence-ordered rules that may short-circuit. Early-phase bucketing
/// runs when none of them match.
const WATERFALL: [(DecisionRule, OverrideRule); 3] = [
    (DecisionRule::PublishedGate, published_gate),
    (DecisionRule::InactiveOverride, inactive_override),
    (DecisionRule::ProductionStable, production_stable),
];

/// Select exactly one tier.
pub fn classify(input: &ClassifyInput<'_>) -> Decision {
    let decision = WATERFALL
        .iter()
        .find_map(|(rule, predicate)| {
            let decision = predicate(input);
            if decision.is_none() {
                tracing::trace!(rule = rule.as_str(), "rule did not match");
            }
            decision
        })
        .unwrap_or_else(|| early_phase_bucket(input));

    obs::emit_rule_matched(decision.rule, decision.tier);
    decision
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// The "published at least once" check passes.
pub fn published_gate_passes(input: &ClassifyInput<'_>) -> bool {
    input.evidence.passed(&input.rubric.published_id)
}

/// Stale releases combined with no recent code motion.
///
/// Disabled entirely by `InactivityPolicy::enabled = false`. A missing
/// most-recent-release timestamp never fires it.
pub fn inactivity_override_fires(input: &ClassifyInput<'_>) -> bool {
    let policy = &input.rubric.inactivity;
    if !policy.enabled {
        return false;
    }
    let Some(last_release) = input.facts.most_recent_release_at else {
        return false;
    };
    let stale = !within_months(Some(last_release), input.as_of, policy.release_window_months);
    stale && !input.evidence.passed(&input.rubric.code_motion_id)
}

/// Version floor, every production family, and the completeness floor.
pub fn production_criteria_hold(input: &ClassifyInput<'_>) -> bool {
    let maturity = &input.rubric.maturity;
    input
        .facts
        .declared_version
        .at_least(&maturity.production_floor)
        && input
            .rubric
            .families
            .production()
            .iter()
            .all(|family| input.evidence.all_pass(&family.ids))
        && input.metrics.completeness_score >= maturity.min_completeness
}

/// Long-lived major release, a release inside the relaxed window, and code
/// motion inside the strict one.
pub fn mature_window_holds(input: &ClassifyInput<'_>) -> bool {
    let maturity = &input.rubric.maturity;
    older_than_months(
        input.facts.first_major_release_at,
        input.as_of,
        maturity.mature_min_age_months,
    ) && within_months(
        input.facts.most_recent_release_at,
        input.as_of,
        maturity.mature_release_window_months,
    ) && input.evidence.passed(&input.rubric.code_motion_id)
}

/// Gates a project must clear to sit in `bucket`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketGates {
    pub version: bool,
    pub recent_release: bool,
    pub completeness: bool,
}

impl BucketGates {
    pub fn admitted(&self) -> bool {
        self.version && self.recent_release && self.completeness
    }
}

pub fn bucket_gates(bucket: &BucketRule, input: &ClassifyInput<'_>) -> BucketGates {
    let version = &input.facts.declared_version;
    BucketGates {
        version: version.below(&bucket.version_ceiling)
            || (bucket.clamp_above_ceiling && version.at_least(&bucket.version_ceiling)),
        recent_release: !bucket.requires_recent_release
            || input.evidence.passed(&input.rubric.recent_release_id),
        completeness: bucket
            .min_completeness
            .map_or(true, |min| input.metrics.completeness_score >= min),
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

fn published_gate(input: &ClassifyInput<'_>) -> Option<Decision> {
    if published_gate_passes(input) {
        return None;
    }
    Some(Decision {
        tier: Tier::Planning,
        rule: DecisionRule::PublishedGate,
        cited: None,
        demoted_from: None,
        flag: DecisiveFlag::new(
            format!("published release ({})", input.rubric.published_id),
            false,
        ),
    })
}

fn inactive_override(input: &ClassifyInput<'_>) -> Option<Decision> {
    if !inactivity_override_fires(input) {
        return None;
    }
    Some(Decision {
        tier: Tier::Inactive,
        rule: DecisionRule::InactiveOverride,
        cited: None,
        demoted_from: None,
        flag: DecisiveFlag::new(
            format!(
                "release within {} months and code motion ({})",
                input.rubric.inactivity.release_window_months, input.rubric.code_motion_id
            ),
            false,
        ),
    })
}

fn production_stable(input: &ClassifyInput<'_>) -> Option<Decision> {
    if !production_criteria_hold(input) {
        return None;
    }
    let mature = mature_window_holds(input);
    Some(Decision {
        tier: if mature {
            Tier::Mature
        } else {
            Tier::ProductionStable
        },
        rule: if mature {
            DecisionRule::MatureRefinement
        } else {
            DecisionRule::ProductionStable
        },
        cited: Some(CitedScore::Completeness(input.metrics.completeness())),
        demoted_from: None,
        flag: DecisiveFlag::new("mature window", mature),
    })
}

fn early_phase_bucket(input: &ClassifyInput<'_>) -> Decision {
    let rubric = input.rubric;
    let cited = Some(CitedScore::Eps(input.metrics.eps()));
    let recent = DecisiveFlag::new(
        format!("recent release ({})", rubric.recent_release_id),
        input.evidence.passed(&rubric.recent_release_id),
    );

    if rubric.buckets.is_empty() {
        return Decision {
            tier: Tier::Planning,
            rule: DecisionRule::EarlyPhaseBucket,
            cited,
            demoted_from: None,
            flag: recent,
        };
    }

    let start = rubric.bucket_index(input.metrics.eps_score);
    let numeric = &rubric.buckets[start];
    let chosen = (0..=start)
        .rev()
        .find(|&i| bucket_gates(&rubric.buckets[i], input).admitted())
        .unwrap_or(0);
    let tier = rubric.buckets[chosen].tier;

    let flag = if chosen == start {
        recent
    } else {
        failing_gate_flag(numeric, bucket_gates(numeric, input), input).unwrap_or(recent)
    };

    Decision {
        tier,
        rule: DecisionRule::EarlyPhaseBucket,
        cited,
        demoted_from: (chosen != start).then_some(numeric.tier),
        flag,
    }
}

/// First gate that kept the project out of its numeric bucket.
fn failing_gate_flag(
    bucket: &BucketRule,
    gates: BucketGates,
    input: &ClassifyInput<'_>,
) -> Option<DecisiveFlag> {
    if !gates.version {
        return Some(DecisiveFlag::new(
            format!("version below {}", bucket.version_ceiling),
            false,
        ));
    }
    if !gates.recent_release {
        return Some(DecisiveFlag::new(
            format!("recent release ({})", input.rubric.recent_release_id),
            false,
        ));
    }
    if !gates.completeness {
        let min = bucket.min_completeness.unwrap_or_default();
        return Some(DecisiveFlag::new(format!("completeness >= {min}"), false));
    }
    None
}
