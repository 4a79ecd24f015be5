//! README rubric scoring.
//!
//! An auxiliary scorer for README ratings produced by an external rater.
//! Unlike the engine's EPS and completeness counts this one is weighted:
//! core items share 80 points and extra items share 20. Core items marked
//! not-applicable leave the denominator, so their weight is redistributed
//! over the remaining core items. The result feeds the engine only as an
//! ordinary pass/fail [`EvidenceUnit`].

use serde::{Deserialize, Serialize};

use crate::evidence::EvidenceUnit;

/// Evidence id the README check is reported under.
pub const README_CHECK_ID: &str = "Q8";

const CORE_POINTS: f64 = 80.0;
const EXTRA_POINTS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricStatus {
    Pass,
    Fail,
    Na,
}

/// One rated rubric item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricItem {
    pub id: String,
    pub status: RubricStatus,
    #[serde(default)]
    pub advice: String,
}

/// Which item ids are core and which are extra credit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeRubric {
    pub core: Vec<String>,
    pub extra: Vec<String>,
}

impl ReadmeRubric {
    pub fn new(core: &[&str], extra: &[&str]) -> Self {
        Self {
            core: core.iter().map(|s| s.to_string()).collect(),
            extra: extra.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn is_core(&self, id: &str) -> bool {
        self.core.iter().any(|c| c == id)
    }

    fn is_extra(&self, id: &str) -> bool {
        self.extra.iter().any(|e| e == id)
    }
}

/// Tallies behind a README score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadmeTally {
    pub core_passed: usize,
    /// Core items that were rated (not `na`).
    pub core_rated: usize,
    pub extra_passed: usize,
    pub extra_total: usize,
    pub score: u8,
}

pub fn tally(items: &[RubricItem], rubric: &ReadmeRubric) -> ReadmeTally {
    let core_rated: Vec<&RubricItem> = items
        .iter()
        .filter(|i| rubric.is_core(&i.id) && i.status != RubricStatus::Na)
        .collect();
    let core_passed = core_rated
        .iter()
        .filter(|i| i.status == RubricStatus::Pass)
        .count();
    // Extra credit is measured against the full extra list, rated or not.
    let extra_passed = items
        .iter()
        .filter(|i| rubric.is_extra(&i.id) && i.status == RubricStatus::Pass)
        .count();

    let core_score = if core_rated.is_empty() {
        0.0
    } else {
        core_passed as f64 / core_rated.len() as f64 * CORE_POINTS
    };
    let extra_score = if rubric.extra.is_empty() {
        0.0
    } else {
        extra_passed as f64 / rubric.extra.len() as f64 * EXTRA_POINTS
    };
    let score = (core_score + extra_score).round_ties_even().min(100.0) as u8;

    ReadmeTally {
        core_passed,
        core_rated: core_rated.len(),
        extra_passed,
        extra_total: rubric.extra.len(),
        score,
    }
}

/// Overall README score, 0..=100.
pub fn compute_readme_score(items: &[RubricItem], rubric: &ReadmeRubric) -> u8 {
    tally(items, rubric).score
}

pub fn quality_label(score: u8) -> &'static str {
    match score {
        0..=39 => "Problematic",
        40..=69 => "Needs Improvement",
        70..=89 => "Good",
        _ => "Excellent",
    }
}

/// Turn a README (and optionally its rating) into the README evidence unit.
///
/// Without a rating the check passes on existence alone.
pub fn readme_check(
    content: Option<&str>,
    rating: Option<&[RubricItem]>,
    rubric: &ReadmeRubric,
    min_score: u8,
) -> EvidenceUnit {
    let Some(content) = content else {
        return EvidenceUnit::fail(README_CHECK_ID, "No README found.");
    };
    if content.trim().is_empty() {
        return EvidenceUnit::fail(README_CHECK_ID, "README is empty.");
    }
    let Some(items) = rating else {
        return EvidenceUnit::pass(
            README_CHECK_ID,
            "README exists. AI-based rating is disabled via configuration.",
        );
    };

    let t = tally(items, rubric);
    let mut evidence = format!(
        "readme score={} ({}); core {}/{} passed; extra {}/{} passed; threshold={}",
        t.score,
        quality_label(t.score),
        t.core_passed,
        t.core_rated,
        t.extra_passed,
        t.extra_total,
        min_score
    );
    let failed: Vec<&str> = items
        .iter()
        .filter(|i| rubric.is_core(&i.id) && i.status == RubricStatus::Fail)
        .map(|i| i.id.as_str())
        .collect();
    if !failed.is_empty() {
        evidence.push_str(&format!("; needs improvement: {}", failed.join(", ")));
    }

    EvidenceUnit {
        id: README_CHECK_ID.to_string(),
        passed: t.score >= min_score,
        evidence,
        applicable: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, status: RubricStatus) -> RubricItem {
        RubricItem {
            id: id.to_string(),
            status,
            advice: String::new(),
        }
    }

    fn rubric() -> ReadmeRubric {
        ReadmeRubric::new(&["title", "install", "usage", "license"], &["badges", "faq"])
    }

    #[test]
    fn all_pass_scores_100() {
        let items = vec![
            item("title", RubricStatus::Pass),
            item("install", RubricStatus::Pass),
            item("usage", RubricStatus::Pass),
            item("license", RubricStatus::Pass),
            item("badges", RubricStatus::Pass),
            item("faq", RubricStatus::Pass),
        ];
        assert_eq!(compute_readme_score(&items, &rubric()), 100);
    }

    #[test]
    fn na_core_items_leave_the_denominator() {
        let items = vec![
            item("title", RubricStatus::Pass),
            item("install", RubricStatus::Na),
            item("usage", RubricStatus::Pass),
            item("license", RubricStatus::Na),
        ];
        // 2/2 core = 80, 0/2 extra = 0
        assert_eq!(compute_readme_score(&items, &rubric()), 80);
    }

    #[test]
    fn extra_items_count_against_full_list() {
        let items = vec![
            item("title", RubricStatus::Fail),
            item("badges", RubricStatus::Pass),
            item("faq", RubricStatus::Na),
        ];
        // 0/1 core = 0, 1/2 extra = 10
        assert_eq!(compute_readme_score(&items, &rubric()), 10);
    }

    #[test]
    fn rounds_half_to_even() {
        // 1/4 core * 80 = 20, 1/8 extra * 20 = 2.5 -> 22
        let rubric = ReadmeRubric::new(
            &["a", "b", "c", "d"],
            &["e1", "e2", "e3", "e4", "e5", "e6", "e7", "e8"],
        );
        let items = vec![
            item("a", RubricStatus::Pass),
            item("b", RubricStatus::Fail),
            item("c", RubricStatus::Fail),
            item("d", RubricStatus::Fail),
            item("e1", RubricStatus::Pass),
        ];
        assert_eq!(compute_readme_score(&items, &rubric), 22);
    }

    #[test]
    fn labels() {
        assert_eq!(quality_label(0), "Problematic");
        assert_eq!(quality_label(39), "Problematic");
        assert_eq!(quality_label(40), "Needs Improvement");
        assert_eq!(quality_label(70), "Good");
        assert_eq!(quality_label(90), "Excellent");
    }

    #[test]
    fn readme_check_paths() {
        let r = rubric();
        assert!(!readme_check(None, None, &r, 70).counts_as_pass());
        assert!(!readme_check(Some("   "), None, &r, 70).counts_as_pass());
        assert!(readme_check(Some("# demo"), None, &r, 70).counts_as_pass());

        let items = vec![
            item("title", RubricStatus::Pass),
            item("install", RubricStatus::Fail),
            item("usage", RubricStatus::Pass),
            item("license", RubricStatus::Pass),
        ];
        let unit = readme_check(Some("# demo"), Some(&items), &r, 70);
        assert_eq!(unit.id, README_CHECK_ID);
        assert!(!unit.passed, "60 < 70");
        assert!(unit.evidence.contains("score=60"));
        assert!(unit.evidence.contains("needs improvement: install"));
    }
}
