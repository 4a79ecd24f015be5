//! Rubric: the versioned configuration data the engine is parameterised by.
//!
//! Check families, early-phase buckets and override policy are defined once
//! here and injected into the classifier as an immutable [`Rubric`]. The
//! scoring layer and the classifier read the same sets, so they cannot drift.

use semver::Version;
use serde::{Deserialize, Serialize};

use crate::tier::Tier;

/// A named, fixed set of evidence ids grouped by concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFamily {
    pub name: String,
    pub ids: Vec<String>,
}

impl CheckFamily {
    pub fn new(name: &str, ids: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            ids: ids.iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }
}

/// Every family the engine consults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckFamilies {
    pub release_packaging: CheckFamily,
    pub quality_discoverability: CheckFamily,
    pub api_declaration: CheckFamily,
    pub deprecation_hygiene: CheckFamily,
    pub security_supply_chain: CheckFamily,
    pub maintenance: CheckFamily,
    pub completeness: CheckFamily,
    pub early_phase: CheckFamily,
}

impl CheckFamilies {
    /// Families whose every member must pass for Production/Stable, in
    /// evaluation order.
    pub fn production(&self) -> [&CheckFamily; 6] {
        [
            &self.release_packaging,
            &self.quality_discoverability,
            &self.api_declaration,
            &self.deprecation_hygiene,
            &self.security_supply_chain,
            &self.maintenance,
        ]
    }

    /// Every family, for listing.
    pub fn all(&self) -> [&CheckFamily; 8] {
        [
            &self.release_packaging,
            &self.quality_discoverability,
            &self.api_declaration,
            &self.deprecation_hygiene,
            &self.security_supply_chain,
            &self.maintenance,
            &self.completeness,
            &self.early_phase,
        ]
    }
}

/// One early-phase bucket: an EPS floor plus the gates a project must clear
/// to be placed in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketRule {
    pub tier: Tier,
    /// Lowest EPS that maps to this bucket (inclusive).
    pub min_eps: u32,
    /// Declared version must sort strictly below this.
    pub version_ceiling: Version,
    /// Valid versions at or above the ceiling are admitted anyway.
    pub clamp_above_ceiling: bool,
    pub requires_recent_release: bool,
    pub min_completeness: Option<u32>,
}

/// Inactivity override settings, kept separate so the override can be
/// switched off without touching the rest of the waterfall.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InactivityPolicy {
    pub enabled: bool,
    /// No release within this many months counts as stale.
    pub release_window_months: u32,
}

/// Windows used by the Production/Stable and Mature rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaturityPolicy {
    /// The "1.0.0" boundary.
    pub production_floor: Version,
    pub min_completeness: u32,
    /// First release at or above the floor must be at least this old.
    pub mature_min_age_months: u32,
    /// Relaxed recent-release window for Mature.
    pub mature_release_window_months: u32,
}

/// Immutable, versioned rubric injected into the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    pub version: String,
    /// The "published at least once" gate check.
    pub published_id: String,
    /// Release within the last 12 months.
    pub recent_release_id: String,
    /// Commits touching source within the last 12 months.
    pub code_motion_id: String,
    pub families: CheckFamilies,
    /// Ascending by `min_eps`; the first entry is the floor.
    pub buckets: Vec<BucketRule>,
    pub maturity: MaturityPolicy,
    pub inactivity: InactivityPolicy,
}

impl Rubric {
    /// The reference rubric shipped with devstatus.
    pub fn reference() -> Self {
        let pre_release_ceiling = Version::new(0, 1, 0);
        let one = Version::new(1, 0, 0);

        Self {
            version: "2025.1".to_string(),
            published_id: "R1".to_string(),
            recent_release_id: "R4".to_string(),
            code_motion_id: "M1".to_string(),
            families: CheckFamilies {
                release_packaging: CheckFamily::new(
                    "release_packaging",
                    &["R1", "R2", "R3", "R5", "R6"],
                ),
                quality_discoverability: CheckFamily::new(
                    "quality_discoverability",
                    &["Q1", "Q2", "Q3", "Q4", "Q5", "Q6", "Q7", "Q8", "Q9"],
                ),
                api_declaration: CheckFamily::new("api_declaration", &["C1", "C2", "C3", "C4"]),
                deprecation_hygiene: CheckFamily::new("deprecation_hygiene", &["D1"]),
                security_supply_chain: CheckFamily::new("security_supply_chain", &["S1"]),
                maintenance: CheckFamily::new("maintenance", &["R4", "M1", "M2"]),
                completeness: CheckFamily::new(
                    "completeness",
                    &["Cmpl1", "Cmpl2", "Cmpl3", "Cmpl4", "Cmpl5"],
                ),
                early_phase: CheckFamily::new(
                    "early_phase",
                    &[
                        "R2", "R3", "R4", "R5", "R6", "Q1", "Q2", "Q3", "Q4", "Q5", "Q6", "Q7",
                        "Q8", "Q9", "S1", "D1", "C1", "C2", "C3",
                    ],
                ),
            },
            buckets: vec![
                BucketRule {
                    tier: Tier::Planning,
                    min_eps: 0,
                    version_ceiling: pre_release_ceiling.clone(),
                    clamp_above_ceiling: false,
                    requires_recent_release: false,
                    min_completeness: None,
                },
                BucketRule {
                    tier: Tier::PreAlpha,
                    min_eps: 4,
                    version_ceiling: pre_release_ceiling,
                    clamp_above_ceiling: false,
                    requires_recent_release: false,
                    min_completeness: None,
                },
                BucketRule {
                    tier: Tier::Alpha,
                    min_eps: 7,
                    version_ceiling: one.clone(),
                    clamp_above_ceiling: false,
                    requires_recent_release: false,
                    min_completeness: None,
                },
                BucketRule {
                    tier: Tier::Beta,
                    min_eps: 12,
                    version_ceiling: one.clone(),
                    clamp_above_ceiling: true,
                    requires_recent_release: true,
                    min_completeness: Some(3),
                },
            ],
            maturity: MaturityPolicy {
                production_floor: one,
                min_completeness: 4,
                mature_min_age_months: 24,
                mature_release_window_months: 24,
            },
            inactivity: InactivityPolicy {
                enabled: true,
                release_window_months: 24,
            },
        }
    }

    /// Same rubric with the inactivity override switched off.
    pub fn without_inactivity_override(mut self) -> Self {
        self.inactivity.enabled = false;
        self
    }

    /// Index of the numeric bucket for `eps`: the highest floor not above it.
    pub fn bucket_index(&self, eps: u32) -> usize {
        self.buckets
            .iter()
            .rposition(|b| b.min_eps <= eps)
            .unwrap_or(0)
    }
}

impl Default for Rubric {
    fn default() -> Self {
        Self::reference()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_sizes() {
        let r = Rubric::reference();
        assert_eq!(r.families.early_phase.len(), 19);
        assert_eq!(r.families.completeness.len(), 5);
        assert!(r.families.maintenance.contains(&r.recent_release_id));
        assert!(r.families.maintenance.contains(&r.code_motion_id));
        assert!(r.families.release_packaging.contains(&r.published_id));
    }

    #[test]
    fn buckets_are_ascending() {
        let r = Rubric::reference();
        assert!(r.buckets.windows(2).all(|w| w[0].min_eps < w[1].min_eps));
        assert_eq!(r.buckets[0].min_eps, 0);
    }

    #[test]
    fn bucket_boundaries_are_exact() {
        let r = Rubric::reference();
        let tier_at = |eps| r.buckets[r.bucket_index(eps)].tier;
        assert_eq!(tier_at(0), Tier::Planning);
        assert_eq!(tier_at(3), Tier::Planning);
        assert_eq!(tier_at(4), Tier::PreAlpha);
        assert_eq!(tier_at(6), Tier::PreAlpha);
        assert_eq!(tier_at(7), Tier::Alpha);
        assert_eq!(tier_at(11), Tier::Alpha);
        assert_eq!(tier_at(12), Tier::Beta);
        assert_eq!(tier_at(19), Tier::Beta);
    }

    #[test]
    fn rubric_round_trips_through_json() {
        let r = Rubric::reference();
        let json = serde_json::to_string(&r).unwrap();
        let back: Rubric = serde_json::from_str(&json).unwrap();
        assert_eq!(r, back);
    }
}
