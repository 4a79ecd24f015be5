//! Structured observability hooks for the analysis lifecycle.
//!
//! Events are emitted as `tracing` records with a stable `event` field so
//! JSON log pipelines can filter on them. None of these affect the report.

use tracing::{debug, info};

use crate::classifier::DecisionRule;
use crate::tier::Tier;

/// RAII guard that enters a project-scoped span for one analysis.
///
/// ```ignore
/// let _span = AnalysisSpan::enter("requests");
/// // all tracing calls now carry project = "requests"
/// ```
pub struct AnalysisSpan {
    _span: tracing::span::EnteredSpan,
}

impl AnalysisSpan {
    pub fn enter(project: &str) -> Self {
        let span = tracing::info_span!("devstatus.analysis", project = %project);
        Self {
            _span: span.entered(),
        }
    }
}

/// Emit event: analysis started over `checks` evidence units.
pub fn emit_analysis_started(project: &str, rubric_version: &str, checks: usize) {
    info!(
        event = "analysis.started",
        project = %project,
        rubric_version = %rubric_version,
        checks = checks,
    );
}

/// Emit event: a waterfall rule produced the decision.
pub fn emit_rule_matched(rule: DecisionRule, tier: Tier) {
    debug!(event = "classifier.rule_matched", rule = rule.as_str(), tier = tier.label());
}

/// Emit event: classification finished with scores.
pub fn emit_classified(project: &str, tier: Tier, eps_score: u32, completeness_score: u32) {
    info!(
        event = "analysis.classified",
        project = %project,
        tier = tier.label(),
        eps_score = eps_score,
        completeness_score = completeness_score,
    );
}

/// Emit event: declared-vs-inferred validation finished.
pub fn emit_validation_finished(project: &str, outcome: &str, failed: bool) {
    if failed {
        tracing::warn!(event = "validation.finished", project = %project, outcome = %outcome);
    } else {
        info!(event = "validation.finished", project = %project, outcome = %outcome);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analysis_span_create() {
        let _span = AnalysisSpan::enter("demo-project");
        emit_rule_matched(DecisionRule::PublishedGate, Tier::Planning);
    }
}
