//! Evidence bundles: the on-disk hand-over format from evidence collaborators.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{DevStatusError, Result};
use crate::evidence::EvidenceSet;
use crate::facts::ReleaseFacts;
use crate::version::ParsedVersion;

/// Finished evidence for one project, as written by the gathering stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceBundle {
    pub project: String,
    pub declared_version: String,
    #[serde(default)]
    pub first_release_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub most_recent_release_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub first_major_release_at: Option<DateTime<Utc>>,
    pub checks: EvidenceSet,
}

impl EvidenceBundle {
    /// Release facts with the declared version parsed. An unparsable version
    /// is carried as [`ParsedVersion::Invalid`], not rejected.
    pub fn facts(&self) -> ReleaseFacts {
        ReleaseFacts {
            declared_version: ParsedVersion::parse(&self.declared_version),
            first_release_at: self.first_release_at,
            most_recent_release_at: self.most_recent_release_at,
            first_major_release_at: self.first_major_release_at,
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let bundle: Self = serde_json::from_str(json)?;
        if bundle.project.trim().is_empty() {
            return Err(DevStatusError::InvalidBundle(
                "project name must not be empty".to_string(),
            ));
        }
        Ok(bundle)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}
