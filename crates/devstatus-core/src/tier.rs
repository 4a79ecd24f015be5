//! Development Status tiers and their trove classifier strings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DevStatusError;

/// Prefix shared by every Development Status trove classifier.
pub const CLASSIFIER_PREFIX: &str = "Development Status :: ";

/// A maturity tier. Exactly one is inferred per analysis.
///
/// The derived ordering is the maturity ladder (`Planning` lowest). `Inactive`
/// sits outside the ladder and compares highest only because it is declared
/// last; do not use `Ord` to reason about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Planning,
    PreAlpha,
    Alpha,
    Beta,
    ProductionStable,
    Mature,
    Inactive,
}

impl Tier {
    pub const ALL: [Tier; 7] = [
        Tier::Planning,
        Tier::PreAlpha,
        Tier::Alpha,
        Tier::Beta,
        Tier::ProductionStable,
        Tier::Mature,
        Tier::Inactive,
    ];

    /// Trove number (1..=7).
    pub fn number(self) -> u8 {
        match self {
            Tier::Planning => 1,
            Tier::PreAlpha => 2,
            Tier::Alpha => 3,
            Tier::Beta => 4,
            Tier::ProductionStable => 5,
            Tier::Mature => 6,
            Tier::Inactive => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Tier::Planning => "Planning",
            Tier::PreAlpha => "Pre-Alpha",
            Tier::Alpha => "Alpha",
            Tier::Beta => "Beta",
            Tier::ProductionStable => "Production/Stable",
            Tier::Mature => "Mature",
            Tier::Inactive => "Inactive",
        }
    }

    /// Full classifier, e.g. `Development Status :: 4 - Beta`.
    pub fn classifier(self) -> String {
        format!("{CLASSIFIER_PREFIX}{} - {}", self.number(), self.label())
    }

    /// Parse a full classifier string back into a tier.
    pub fn from_classifier(s: &str) -> Option<Tier> {
        let rest = s.trim().strip_prefix(CLASSIFIER_PREFIX)?;
        Tier::ALL
            .into_iter()
            .find(|t| rest == format!("{} - {}", t.number(), t.label()))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.classifier())
    }
}

impl FromStr for Tier {
    type Err = DevStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::from_classifier(s).ok_or_else(|| DevStatusError::UnknownClassifier(s.to_string()))
    }
}

impl Serialize for Tier {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.classifier())
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
