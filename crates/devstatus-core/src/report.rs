//! Report assembler and report artifacts.
//!
//! The assembler performs no judgment: the reason string is a template over
//! the [`Decision`] the classifier already produced, so identical inputs give
//! character-identical reports.

use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::classifier::{Decision, DecisionRule};
use crate::error::{DevStatusError, Result};
use crate::evidence::EvidenceSet;
use crate::facts::ReleaseFacts;
use crate::score::Metrics;
use crate::tier::Tier;

const REPORT_FILE: &str = "report.json";
const DIGEST_FILE: &str = "report.digest";

/// One check as it appears in the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckSummary {
    /// Effective pass: an inapplicable check is reported as failed.
    pub passed: bool,
    pub evidence: String,
}

/// The sole externally visible output of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceReport {
    pub inferred_classifier: Tier,
    pub reason: String,
    pub evaluated_at: DateTime<Utc>,
    pub checks: BTreeMap<String, CheckSummary>,
    pub metrics: Metrics,
}

impl EvidenceReport {
    /// Canonical serialised form (pretty JSON, keys in id order).
    pub fn to_canonical_json(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    /// Lowercase hex SHA-256 of the canonical JSON.
    pub fn digest(&self) -> Result<String> {
        Ok(digest_bytes(&self.to_canonical_json()?))
    }
}

fn digest_bytes(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Compose the report from the decision and the inputs it was made over.
pub fn assemble_report(
    decision: &Decision,
    metrics: &Metrics,
    facts: &ReleaseFacts,
    evidence: &EvidenceSet,
    as_of: DateTime<Utc>,
) -> EvidenceReport {
    let checks = evidence
        .iter()
        .map(|unit| {
            (
                unit.id.clone(),
                CheckSummary {
                    passed: unit.counts_as_pass(),
                    evidence: unit.evidence.clone(),
                },
            )
        })
        .collect();

    EvidenceReport {
        inferred_classifier: decision.tier,
        reason: render_reason(decision, facts),
        evaluated_at: as_of,
        checks,
        metrics: *metrics,
    }
}

/// `<Tier>: <rule>; <score>, version <v>; <flag> holds|fails`
pub fn render_reason(decision: &Decision, facts: &ReleaseFacts) -> String {
    let rule = match decision.rule {
        DecisionRule::PublishedGate => "no published release".to_string(),
        DecisionRule::InactiveOverride => "inactivity override".to_string(),
        DecisionRule::ProductionStable | DecisionRule::MatureRefinement => {
            "production criteria hold".to_string()
        }
        DecisionRule::EarlyPhaseBucket => match decision.demoted_from {
            Some(from) => format!("early-phase bucket, demoted from {}", from.label()),
            None => "early-phase bucket".to_string(),
        },
    };
    let score = match &decision.cited {
        Some(cited) => cited.to_string(),
        None => "no score consulted".to_string(),
    };

    format!(
        "{}: {}; {}, version {}; {}",
        decision.tier.label(),
        rule,
        score,
        facts.declared_version,
        decision.flag
    )
}

/// Terminal rendering of a report; see [`render_report_table`].
pub struct ReportTable<'a>(pub &'a EvidenceReport);

impl fmt::Display for ReportTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let m = &report.metrics;
        writeln!(f, "Classifier   : {}", report.inferred_classifier)?;
        writeln!(f, "Reason       : {}", report.reason)?;
        writeln!(
            f,
            "Evaluated at : {}",
            report.evaluated_at.to_rfc3339_opts(SecondsFormat::Secs, true)
        )?;
        writeln!(f, "EPS          : {}/{}", m.eps_score, m.eps_total)?;
        writeln!(
            f,
            "Completeness : {}/{}",
            m.completeness_score, m.completeness_total
        )?;
        writeln!(f)?;

        let width = report
            .checks
            .keys()
            .map(String::len)
            .max()
            .unwrap_or(2)
            .max(2);
        writeln!(f, "{:<width$}  PASS  EVIDENCE", "ID")?;
        for (id, check) in &report.checks {
            let mark = if check.passed { "yes " } else { "no  " };
            writeln!(f, "{id:<width$}  {mark}  {}", check.evidence)?;
        }
        Ok(())
    }
}

/// Plain-text summary for terminals.
pub fn render_report_table(report: &EvidenceReport) -> String {
    ReportTable(report).to_string()
}

/// Persist `<dir>/report.json` and `<dir>/report.digest`.
pub fn write_report_artifact(report: &EvidenceReport, dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(REPORT_FILE);
    let json = report.to_canonical_json()?;
    let digest = digest_bytes(&json);

    std::fs::write(&path, &json)?;
    std::fs::write(dir.join(DIGEST_FILE), digest.as_bytes())?;
    tracing::debug!(path = %path.display(), digest = %digest, "report artifact written");
    Ok(path)
}

/// Read `<dir>/report.json` and verify it against `<dir>/report.digest`.
pub fn read_report_artifact(dir: &Path) -> Result<EvidenceReport> {
    let json = std::fs::read(dir.join(REPORT_FILE))?;
    let expected = std::fs::read_to_string(dir.join(DIGEST_FILE))?;
    let actual = digest_bytes(&json);
    if expected.trim() != actual {
        return Err(DevStatusError::DigestMismatch {
            expected: expected.trim().to_string(),
            actual,
        });
    }
    Ok(serde_json::from_slice(&json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{CitedScore, DecisiveFlag};
    use crate::evidence::EvidenceUnit;
    use chrono::TimeZone;
    use crate::score::Score;

    fn beta_decision() -> Decision {
        Decision {
            tier: Tier::Beta,
            rule: DecisionRule::EarlyPhaseBucket,
            cited: Some(CitedScore::Eps(Score {
                score: 16,
                total: 19,
            })),
            demoted_from: None,
            flag: DecisiveFlag {
                label: "recent release (R4)".to_string(),
                holds: true,
            },
        }
    }

    #[test]
    fn reason_template() {
        let reason = render_reason(&beta_decision(), &ReleaseFacts::new("0.8.0"));
        assert_eq!(
            reason,
            "Beta: early-phase bucket; EPS=16/19, version 0.8.0; recent release (R4) holds"
        );
    }

    #[test]
    fn demoted_reason_names_numeric_bucket() {
        let mut d = beta_decision();
        d.tier = Tier::Alpha;
        d.demoted_from = Some(Tier::Beta);
        d.flag.holds = false;
        let reason = render_reason(&d, &ReleaseFacts::new("0.8.0"));
        assert!(reason.starts_with("Alpha: early-phase bucket, demoted from Beta;"));
        assert!(reason.ends_with("recent release (R4) fails"));
    }

    #[test]
    fn gate_reason_has_no_score() {
        let d = Decision {
            tier: Tier::Planning,
            rule: DecisionRule::PublishedGate,
            cited: None,
            demoted_from: None,
            flag: DecisiveFlag {
                label: "published release (R1)".to_string(),
                holds: false,
            },
        };
        let reason = render_reason(&d, &ReleaseFacts::new("nonsense"));
        assert_eq!(
            reason,
            "Planning: no published release; no score consulted, version \"nonsense\" (unparsable); published release (R1) fails"
        );
    }

    #[test]
    fn table_lists_checks_in_id_order() {
        let evidence = EvidenceSet::new()
            .with(EvidenceUnit::pass("R1", "on the index"))
            .with(EvidenceUnit::not_applicable("C4", "no API"));
        let as_of = Utc.with_ymd_and_hms(2026, 10, 18, 0, 0, 0).unwrap();
        let metrics = Metrics {
            eps_score: 16,
            eps_total: 19,
            completeness_score: 3,
            completeness_total: 5,
        };
        let report = assemble_report(
            &beta_decision(),
            &metrics,
            &ReleaseFacts::new("0.8.0"),
            &evidence,
            as_of,
        );
        let table = render_report_table(&report);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "Classifier   : Development Status :: 4 - Beta");
        assert_eq!(lines[2], "Evaluated at : 2026-10-18T00:00:00Z");
        assert_eq!(lines[3], "EPS          : 16/19");
        assert_eq!(lines[6], "ID  PASS  EVIDENCE");
        assert_eq!(lines[7], "C4  no    no API");
        assert_eq!(lines[8], "R1  yes   on the index");
        assert_eq!(table, ReportTable(&report).to_string());
    }
}
