//! devstatus core library
//!
//! Evidence-to-classification decision engine: derives a Development Status
//! trove classifier from objective check results and release facts.
//!
//! Data flows one way: [`EvidenceSet`] → [`compute_metrics`] →
//! [`classify`] → [`assemble_report`]. [`analyze`] runs the whole pipeline.

pub mod bundle;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod evidence;
pub mod facts;
pub mod obs;
pub mod readme;
pub mod report;
pub mod rubric;
pub mod score;
pub mod telemetry;
pub mod tier;
pub mod validate;
pub mod version;

pub use bundle::EvidenceBundle;
pub use classifier::{
    bucket_gates, classify, inactivity_override_fires, mature_window_holds,
    production_criteria_hold, published_gate_passes, BucketGates, CitedScore, ClassifyInput,
    Decision, DecisionRule, DecisiveFlag,
};
pub use config::{EngineConfig, ProjectMode};
pub use engine::{analyze, Analysis};
pub use error::{DevStatusError, Result};
pub use evidence::{CheckInput, EvidenceSet, EvidenceUnit};
pub use facts::ReleaseFacts;
pub use readme::{
    compute_readme_score, quality_label, readme_check, ReadmeRubric, RubricItem, RubricStatus,
};
pub use report::{
    assemble_report, read_report_artifact, render_reason, render_report_table,
    write_report_artifact, CheckSummary, EvidenceReport, ReportTable,
};
pub use rubric::{BucketRule, CheckFamilies, CheckFamily, InactivityPolicy, MaturityPolicy, Rubric};
pub use score::{compute_completeness, compute_early_phase_score, compute_metrics, Metrics, Score};
pub use telemetry::init_tracing;
pub use tier::Tier;
pub use validate::{declared_statuses, validate_declared, ValidationOutcome};
pub use version::ParsedVersion;

pub use obs::{
    emit_analysis_started, emit_classified, emit_validation_finished, AnalysisSpan,
};

/// devstatus version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
