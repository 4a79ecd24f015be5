//! Evidence units: the immutable per-check facts the engine consumes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of one objective check, as handed over by an evidence collaborator.
///
/// A unit that is not `applicable` always counts as failed for scoring,
/// whatever its `passed` flag says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvidenceUnit {
    pub id: String,
    pub passed: bool,
    pub evidence: String,
    pub applicable: bool,
}

impl EvidenceUnit {
    pub fn pass(id: impl Into<String>, evidence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            passed: true,
            evidence: evidence.into(),
            applicable: true,
        }
    }

    pub fn fail(id: impl Into<String>, evidence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            passed: false,
            evidence: evidence.into(),
            applicable: true,
        }
    }

    /// A check that could not be evaluated for this project.
    pub fn not_applicable(id: impl Into<String>, evidence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            passed: false,
            evidence: evidence.into(),
            applicable: false,
        }
    }

    /// Whether this unit counts as a pass for scoring and gating.
    pub fn counts_as_pass(&self) -> bool {
        self.passed && self.applicable
    }
}

/// Wire form of a check result, keyed by id in the enclosing map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckInput {
    pub passed: bool,
    #[serde(default = "default_applicable")]
    pub applicable: bool,
    #[serde(default)]
    pub evidence: String,
}

fn default_applicable() -> bool {
    true
}

/// All evidence units for a single analysis run, ordered by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, CheckInput>",
    into = "BTreeMap<String, CheckInput>"
)]
pub struct EvidenceSet {
    units: BTreeMap<String, EvidenceUnit>,
}

impl EvidenceSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a unit (builder pattern). A later unit with the same id replaces
    /// the earlier one, so collaborators must hand over unique ids.
    pub fn with(mut self, unit: EvidenceUnit) -> Self {
        self.insert(unit);
        self
    }

    pub fn insert(&mut self, unit: EvidenceUnit) {
        self.units.insert(unit.id.clone(), unit);
    }

    pub fn get(&self, id: &str) -> Option<&EvidenceUnit> {
        self.units.get(id)
    }

    /// Effective pass flag for `id`. Missing ids are failures.
    pub fn passed(&self, id: &str) -> bool {
        self.get(id).is_some_and(EvidenceUnit::counts_as_pass)
    }

    /// Whether every id yields a pass. Vacuously true for an empty list.
    pub fn all_pass<'a, I>(&self, ids: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter().all(|id| self.passed(id))
    }

    /// Number of ids that yield a pass.
    pub fn count_passed<'a, I>(&self, ids: I) -> u32
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter().filter(|id| self.passed(id)).count() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &EvidenceUnit> {
        self.units.values()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl FromIterator<EvidenceUnit> for EvidenceSet {
    fn from_iter<T: IntoIterator<Item = EvidenceUnit>>(iter: T) -> Self {
        let mut set = Self::new();
        for unit in iter {
            set.insert(unit);
        }
        set
    }
}

impl From<BTreeMap<String, CheckInput>> for EvidenceSet {
    fn from(map: BTreeMap<String, CheckInput>) -> Self {
        map.into_iter()
            .map(|(id, input)| EvidenceUnit {
                id,
                passed: input.passed,
                evidence: input.evidence,
                applicable: input.applicable,
            })
            .collect()
    }
}

impl From<EvidenceSet> for BTreeMap<String, CheckInput> {
    fn from(set: EvidenceSet) -> Self {
        set.units
            .into_values()
            .map(|unit| {
                (
                    unit.id,
                    CheckInput {
                        passed: unit.passed,
                        applicable: unit.applicable,
                        evidence: unit.evidence,
                    },
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_id_counts_as_failed() {
        let set = EvidenceSet::new().with(EvidenceUnit::pass("R1", "published"));
        assert!(set.passed("R1"));
        assert!(!set.passed("R2"));
    }

    #[test]
    fn not_applicable_never_passes() {
        let mut unit = EvidenceUnit::not_applicable("Q1", "no CI config in sdist");
        unit.passed = true;
        let set = EvidenceSet::new().with(unit);
        assert!(!set.passed("Q1"));
    }

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{"R1": {"passed": true}, "Q1": {"passed": true, "applicable": false, "evidence": "n/a"}}"#;
        let set: EvidenceSet = serde_json::from_str(json).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.passed("R1"));
        assert_eq!(set.get("R1").unwrap().evidence, "");
        assert!(!set.passed("Q1"));
    }

    #[test]
    fn count_passed_over_ids() {
        let set: EvidenceSet = vec![
            EvidenceUnit::pass("A", ""),
            EvidenceUnit::fail("B", ""),
            EvidenceUnit::pass("C", ""),
        ]
        .into_iter()
        .collect();
        let ids: Vec<String> = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        assert_eq!(set.count_passed(&ids), 2);
        assert!(!set.all_pass(&ids));
        assert!(set.all_pass(&ids[..1]));
    }
}
