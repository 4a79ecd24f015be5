//! Score calculator: pure counts over named check families.
//!
//! Scores are plain totals of passing units. No weighting, and no
//! redistribution for inapplicable checks: a unit that could not be
//! evaluated simply does not count.

use serde::{Deserialize, Serialize};

use crate::evidence::EvidenceSet;
use crate::rubric::{CheckFamily, Rubric};

/// A count of passing checks out of a fixed total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub score: u32,
    pub total: u32,
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.score, self.total)
    }
}

fn count_family(evidence: &EvidenceSet, family: &CheckFamily) -> Score {
    Score {
        score: evidence.count_passed(&family.ids),
        total: family.len() as u32,
    }
}

/// Early-phase score: passing units in the early-phase set.
pub fn compute_early_phase_score(evidence: &EvidenceSet, eps_set: &CheckFamily) -> Score {
    count_family(evidence, eps_set)
}

/// Completeness: passing completeness signals (marker density,
/// not-implemented ratio, placeholder ratio, stub-file ratio, test
/// exercise ratio). Each signal arrives pre-computed.
pub fn compute_completeness(evidence: &EvidenceSet, completeness_set: &CheckFamily) -> Score {
    count_family(evidence, completeness_set)
}

/// Derived metrics snapshot, as emitted in the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metrics {
    pub eps_score: u32,
    pub eps_total: u32,
    pub completeness_score: u32,
    pub completeness_total: u32,
}

impl Metrics {
    pub fn eps(&self) -> Score {
        Score {
            score: self.eps_score,
            total: self.eps_total,
        }
    }

    pub fn completeness(&self) -> Score {
        Score {
            score: self.completeness_score,
            total: self.completeness_total,
        }
    }
}

/// Compute both scores for a rubric.
pub fn compute_metrics(evidence: &EvidenceSet, rubric: &Rubric) -> Metrics {
    let eps = compute_early_phase_score(evidence, &rubric.families.early_phase);
    let completeness = compute_completeness(evidence, &rubric.families.completeness);
    Metrics {
        eps_score: eps.score,
        eps_total: eps.total,
        completeness_score: completeness.score,
        completeness_total: completeness.total,
    }
}
