//! Declared-vs-inferred classifier validation.

use serde::{Deserialize, Serialize};

use crate::error::{DevStatusError, Result};
use crate::tier::{Tier, CLASSIFIER_PREFIX};

/// Development Status classifiers declared in `[project].classifiers`.
///
/// Other classifiers are ignored. An unrecognised Development Status entry
/// is an error rather than silently dropped.
pub fn declared_statuses(pyproject: &str) -> Result<Vec<Tier>> {
    let doc: toml::Table = pyproject.parse()?;
    let Some(classifiers) = doc
        .get("project")
        .and_then(|p| p.get("classifiers"))
        .and_then(|c| c.as_array())
    else {
        return Ok(Vec::new());
    };

    let mut tiers = Vec::new();
    for value in classifiers {
        let Some(s) = value.as_str() else { continue };
        if !s.trim().starts_with(CLASSIFIER_PREFIX) {
            continue;
        }
        let tier = Tier::from_classifier(s)
            .ok_or_else(|| DevStatusError::UnknownClassifier(s.to_string()))?;
        if !tiers.contains(&tier) {
            tiers.push(tier);
        }
    }
    Ok(tiers)
}

/// Result of comparing the inferred tier against declared metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ValidationOutcome {
    Match { tier: Tier },
    Mismatch { declared: Tier, inferred: Tier },
    Undeclared { inferred: Tier },
    Ambiguous { declared: Vec<Tier>, inferred: Tier },
}

impl ValidationOutcome {
    /// Whether a `validate` run should exit non-zero.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Mismatch { .. } | Self::Ambiguous { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Match { .. } => "match",
            Self::Mismatch { .. } => "mismatch",
            Self::Undeclared { .. } => "undeclared",
            Self::Ambiguous { .. } => "ambiguous",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::Match { tier } => format!("declared classifier matches: {tier}"),
            Self::Mismatch { declared, inferred } => {
                format!("declared {declared} but evidence supports {inferred}")
            }
            Self::Undeclared { inferred } => {
                format!("no Development Status declared; evidence supports {inferred}")
            }
            Self::Ambiguous { declared, inferred } => {
                let list: Vec<String> = declared.iter().map(|t| t.classifier()).collect();
                format!(
                    "{} Development Status classifiers declared ({}); evidence supports {inferred}",
                    declared.len(),
                    list.join(", ")
                )
            }
        }
    }
}

pub fn validate_declared(inferred: Tier, declared: &[Tier]) -> ValidationOutcome {
    match declared {
        [] => ValidationOutcome::Undeclared { inferred },
        [one] if *one == inferred => ValidationOutcome::Match { tier: inferred },
        [one] => ValidationOutcome::Mismatch {
            declared: *one,
            inferred,
        },
        many => ValidationOutcome::Ambiguous {
            declared: many.to_vec(),
            inferred,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PYPROJECT: &str = r#"
[project]
name = "demo"
classifiers = [
    "Programming Language :: Python :: 3",
    "Development Status :: 4 - Beta",
    "License :: OSI Approved :: MIT License",
]
"#;

    #[test]
    fn extracts_development_status_only() {
        assert_eq!(declared_statuses(PYPROJECT).unwrap(), vec![Tier::Beta]);
    }

    #[test]
    fn no_classifiers_is_empty() {
        assert!(declared_statuses("[project]\nname = \"demo\"\n")
            .unwrap()
            .is_empty());
    }

    #[test]
    fn unknown_status_is_error() {
        let text = PYPROJECT.replace("4 - Beta", "4 - Gamma");
        assert!(matches!(
            declared_statuses(&text),
            Err(DevStatusError::UnknownClassifier(_))
        ));
    }

    #[test]
    fn outcomes() {
        assert_eq!(
            validate_declared(Tier::Beta, &[Tier::Beta]),
            ValidationOutcome::Match { tier: Tier::Beta }
        );
        let mismatch = validate_declared(Tier::Alpha, &[Tier::ProductionStable]);
        assert!(mismatch.is_failure());
        assert!(mismatch.message().contains("5 - Production/Stable"));
        assert!(!validate_declared(Tier::Alpha, &[]).is_failure());
        assert!(validate_declared(Tier::Alpha, &[Tier::Alpha, Tier::Beta]).is_failure());
    }
}
