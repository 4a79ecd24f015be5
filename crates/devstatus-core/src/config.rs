//! Engine configuration from a project's `pyproject.toml`.
//!
//! Settings live in the `[tool.devstatus]` table. A missing file or table
//! means defaults; a table with the wrong shape is an error.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DevStatusError, Result};
use crate::rubric::Rubric;

/// Table name under `[tool]`.
pub const CONFIG_TABLE: &str = "devstatus";

/// What kind of project is being classified.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectMode {
    /// Every check family counts towards Production/Stable.
    #[default]
    Library,
    /// Applications export no public API, so API-declaration checks are
    /// not part of the production conjunction. Opt-in only.
    Application,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub mode: ProjectMode,
    /// Whether the README check used an LLM rating. Recorded only; the
    /// engine treats the resulting check like any other.
    pub use_ai: bool,
    pub inactivity_override: bool,
    pub inactivity_window_months: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            mode: ProjectMode::Library,
            use_ai: false,
            inactivity_override: true,
            inactivity_window_months: 24,
        }
    }
}

impl EngineConfig {
    /// Parse the `[tool.devstatus]` table out of pyproject text.
    pub fn from_pyproject_str(pyproject: &str) -> Result<Self> {
        let doc: toml::Table = pyproject.parse()?;
        let Some(section) = doc.get("tool").and_then(|tool| tool.get(CONFIG_TABLE)) else {
            return Ok(Self::default());
        };
        let config: Self = section
            .clone()
            .try_into()
            .map_err(|e: toml::de::Error| DevStatusError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `pyproject.toml` path; a missing file yields defaults.
    pub fn load(pyproject: &Path) -> Result<Self> {
        if !pyproject.is_file() {
            tracing::debug!(path = %pyproject.display(), "no pyproject.toml, using default config");
            return Ok(Self::default());
        }
        let text = std::fs::read_to_string(pyproject)?;
        Self::from_pyproject_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.inactivity_window_months == 0 {
            return Err(DevStatusError::InvalidConfig(
                "inactivity_window_months must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Fold these settings into a rubric.
    pub fn apply(&self, mut rubric: Rubric) -> Rubric {
        rubric.inactivity.enabled = self.inactivity_override;
        rubric.inactivity.release_window_months = self.inactivity_window_months;
        if self.mode == ProjectMode::Application {
            rubric.families.api_declaration.ids.clear();
        }
        rubric
    }
}
