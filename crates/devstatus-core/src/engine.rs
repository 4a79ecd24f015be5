//! One-call pipeline: evidence → scores → tier → report.

use chrono::{DateTime, Utc};

use crate::classifier::{classify, ClassifyInput, Decision};
use crate::evidence::EvidenceSet;
use crate::facts::ReleaseFacts;
use crate::report::{assemble_report, EvidenceReport};
use crate::rubric::Rubric;
use crate::score::compute_metrics;

/// Decision plus the report assembled from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Analysis {
    pub decision: Decision,
    pub report: EvidenceReport,
}

/// Run the decision engine over a finished evidence snapshot.
///
/// Pure and total: no I/O, no clock reads, no shared state. Calling it
/// twice with the same arguments yields identical results.
pub fn analyze(
    evidence: &EvidenceSet,
    facts: &ReleaseFacts,
    rubric: &Rubric,
    as_of: DateTime<Utc>,
) -> Analysis {
    let metrics = compute_metrics(evidence, rubric);
    let decision = classify(&ClassifyInput {
        evidence,
        facts,
        metrics: &metrics,
        rubric,
        as_of,
    });
    let report = assemble_report(&decision, &metrics, facts, evidence, as_of);
    Analysis { decision, report }
}
