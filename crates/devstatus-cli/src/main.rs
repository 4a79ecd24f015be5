//! devstatus - Development Status inference CLI
//!
//! Reads an evidence bundle produced by the gathering stage and derives the
//! trove `Development Status` classifier it supports.
//!
//! ## Commands
//!
//! - `analyze`: Classify a bundle and print (or persist) the evidence report
//! - `validate`: Compare the inferred classifier against `pyproject.toml`
//! - `families`: Show the check families and bucket table in use

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use devstatus_core::{
    analyze, declared_statuses, emit_analysis_started, emit_classified,
    emit_validation_finished, render_report_table, validate_declared, write_report_artifact,
    Analysis, AnalysisSpan, EngineConfig, EvidenceBundle, Rubric,
};

#[derive(Parser)]
#[command(name = "devstatus")]
#[command(author = "Stevedores Org")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Infer a Development Status classifier from project evidence", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify an evidence bundle
    Analyze {
        /// Evidence bundle (JSON)
        bundle: PathBuf,

        /// pyproject.toml holding the [tool.devstatus] table
        #[arg(long)]
        pyproject: Option<PathBuf>,

        /// Output format for the report
        #[arg(short, long, value_enum, default_value = "json")]
        format: OutputFormat,

        /// Also write report.json and report.digest into this directory
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Check the declared classifier in pyproject.toml against the evidence
    ///
    /// Exits 1 on a mismatch or when several statuses are declared.
    Validate {
        /// Evidence bundle (JSON)
        bundle: PathBuf,

        /// pyproject.toml with [project].classifiers
        #[arg(long, default_value = "pyproject.toml")]
        pyproject: PathBuf,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// Show the check families and early-phase buckets
    Families {
        /// pyproject.toml holding the [tool.devstatus] table
        #[arg(long)]
        pyproject: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
}

#[derive(Args)]
struct EngineArgs {
    /// Evaluation instant (RFC 3339); defaults to now
    #[arg(long, env = "DEVSTATUS_AS_OF")]
    as_of: Option<String>,

    /// Disable the inactivity override regardless of configuration
    #[arg(long)]
    no_inactive_override: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Table,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    devstatus_core::init_tracing(cli.json, level);

    match cli.command {
        Commands::Analyze {
            bundle,
            pyproject,
            format,
            output,
            engine,
        } => cmd_analyze(
            &bundle,
            pyproject.as_deref(),
            format,
            output.as_deref(),
            &engine,
        ),
        Commands::Validate {
            bundle,
            pyproject,
            engine,
        } => {
            let failed = cmd_validate(&bundle, &pyproject, &engine)?;
            if failed {
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Families { pyproject, format } => cmd_families(pyproject.as_deref(), format),
    }
}

fn parse_as_of(raw: Option<&str>) -> Result<DateTime<Utc>> {
    match raw {
        Some(s) => Ok(DateTime::parse_from_rfc3339(s)
            .with_context(|| format!("--as-of is not an RFC 3339 timestamp: {s}"))?
            .with_timezone(&Utc)),
        None => Ok(Utc::now()),
    }
}

fn configured_rubric(pyproject: Option<&Path>) -> Result<Rubric> {
    let config = match pyproject {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Ok(config.apply(Rubric::reference()))
}

fn load_rubric(pyproject: Option<&Path>, engine: &EngineArgs) -> Result<Rubric> {
    let rubric = configured_rubric(pyproject)?;
    Ok(if engine.no_inactive_override {
        rubric.without_inactivity_override()
    } else {
        rubric
    })
}

fn run_analysis(
    bundle_path: &Path,
    pyproject: Option<&Path>,
    engine: &EngineArgs,
) -> Result<(EvidenceBundle, Analysis)> {
    let bundle = EvidenceBundle::load(bundle_path)
        .with_context(|| format!("Failed to load evidence bundle {}", bundle_path.display()))?;
    let rubric = load_rubric(pyproject, engine)?;
    let as_of = parse_as_of(engine.as_of.as_deref())?;

    let _span = AnalysisSpan::enter(&bundle.project);
    emit_analysis_started(&bundle.project, &rubric.version, bundle.checks.len());
    let analysis = analyze(&bundle.checks, &bundle.facts(), &rubric, as_of);
    let metrics = &analysis.report.metrics;
    emit_classified(
        &bundle.project,
        analysis.decision.tier,
        metrics.eps_score,
        metrics.completeness_score,
    );
    Ok((bundle, analysis))
}

/// Classify a bundle and print the report
fn cmd_analyze(
    bundle_path: &Path,
    pyproject: Option<&Path>,
    format: OutputFormat,
    output: Option<&Path>,
    engine: &EngineArgs,
) -> Result<()> {
    let (_, analysis) = run_analysis(bundle_path, pyproject, engine)?;
    let report = &analysis.report;

    if let Some(dir) = output {
        let path = write_report_artifact(report, dir)
            .with_context(|| format!("Failed to write report to {}", dir.display()))?;
        info!(path = %path.display(), "report written");
    }

    match format {
        OutputFormat::Json => {
            let json = report.to_canonical_json()?;
            println!("{}", String::from_utf8_lossy(&json));
        }
        OutputFormat::Table => print!("{}", render_report_table(report)),
    }
    Ok(())
}

/// Returns whether validation failed.
fn cmd_validate(bundle_path: &Path, pyproject: &Path, engine: &EngineArgs) -> Result<bool> {
    let text = std::fs::read_to_string(pyproject)
        .with_context(|| format!("Failed to read {}", pyproject.display()))?;
    let declared = declared_statuses(&text)
        .with_context(|| format!("Invalid classifiers in {}", pyproject.display()))?;

    let (bundle, analysis) = run_analysis(bundle_path, Some(pyproject), engine)?;
    let outcome = validate_declared(analysis.decision.tier, &declared);
    let failed = outcome.is_failure();
    emit_validation_finished(&bundle.project, outcome.name(), failed);

    let status = if failed { "FAIL" } else { "OK" };
    println!("[{}] {}: {}", status, bundle.project, outcome.message());
    println!("Reason: {}", analysis.report.reason);
    Ok(failed)
}

/// Print the rubric as `analyze` would use it under the same config
fn cmd_families(pyproject: Option<&Path>, format: OutputFormat) -> Result<()> {
    let rubric = configured_rubric(pyproject)?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&rubric)?),
        OutputFormat::Table => {
            println!("Rubric {}", rubric.version);
            println!();
            for family in rubric.families.all() {
                println!("{:<24} {}", family.name, family.ids.join(" "));
            }
            println!();
            println!("{:<16} {:>7}  {:<9} EXTRA GATES", "BUCKET", "MIN EPS", "CEILING");
            for bucket in &rubric.buckets {
                let mut gates = Vec::new();
                if bucket.requires_recent_release {
                    gates.push(format!("recent release ({})", rubric.recent_release_id));
                }
                if let Some(min) = bucket.min_completeness {
                    gates.push(format!("completeness >= {min}"));
                }
                if bucket.clamp_above_ceiling {
                    gates.push("clamps >= ceiling".to_string());
                }
                println!(
                    "{:<16} {:>7}  {:<9} {}",
                    bucket.tier.label(),
                    bucket.min_eps,
                    bucket.version_ceiling.to_string(),
                    if gates.is_empty() {
                        "-".to_string()
                    } else {
                        gates.join(", ")
                    }
                );
            }
        }
    }
    Ok(())
}
