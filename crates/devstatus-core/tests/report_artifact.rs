use chrono::{TimeZone, Utc};
use devstatus_core::{
    analyze, read_report_artifact, write_report_artifact, DevStatusError, EvidenceBundle,
    EvidenceSet, EvidenceUnit, ReleaseFacts, Rubric, Tier,
};
use tempfile::TempDir;

fn sample_report() -> devstatus_core::EvidenceReport {
    let as_of = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    let evidence = EvidenceSet::new()
        .with(EvidenceUnit::pass("R1", "published 2024-01-01"))
        .with(EvidenceUnit::pass("R2", "wheel present"))
        .with(EvidenceUnit::not_applicable("C4", "no public API"))
        .with(EvidenceUnit::fail("Q8", "README is empty."));
    let facts = ReleaseFacts::new("0.0.4")
        .with_most_recent_release(Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap());
    analyze(&evidence, &facts, &Rubric::reference(), as_of).report
}

#[test]
fn write_then_read_verifies_digest() {
    let dir = TempDir::new().unwrap();
    let report = sample_report();

    let path = write_report_artifact(&report, dir.path()).unwrap();
    assert!(path.ends_with("report.json"));

    let digest = std::fs::read_to_string(dir.path().join("report.digest")).unwrap();
    assert_eq!(digest, report.digest().unwrap());
    assert_eq!(digest.len(), 64);

    let loaded = read_report_artifact(dir.path()).unwrap();
    assert_eq!(loaded, report);
}

#[test]
fn creates_missing_output_dir() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("a").join("b");
    write_report_artifact(&sample_report(), &nested).unwrap();
    assert!(nested.join("report.json").is_file());
}

#[test]
fn tampered_report_is_rejected() {
    let dir = TempDir::new().unwrap();
    write_report_artifact(&sample_report(), dir.path()).unwrap();

    let path = dir.path().join("report.json");
    let tampered = std::fs::read_to_string(&path)
        .unwrap()
        .replace("Development Status :: 1 - Planning", "Development Status :: 4 - Beta");
    std::fs::write(&path, tampered).unwrap();

    match read_report_artifact(dir.path()) {
        Err(DevStatusError::DigestMismatch { expected, actual }) => assert_ne!(expected, actual),
        other => panic!("expected digest mismatch, got {other:?}"),
    }
}

#[test]
fn json_shape_is_stable() {
    let report = sample_report();
    let json: serde_json::Value =
        serde_json::from_slice(&report.to_canonical_json().unwrap()).unwrap();

    let keys: Vec<&str> = json.as_object().unwrap().keys().map(String::as_str).collect();
    assert_eq!(
        keys,
        ["checks", "evaluated_at", "inferred_classifier", "metrics", "reason"]
    );
    assert_eq!(json["evaluated_at"], "2026-10-18T12:00:00Z");
    assert_eq!(json["inferred_classifier"], "Development Status :: 1 - Planning");

    // Inapplicable checks are reported as failed.
    assert_eq!(json["checks"]["C4"]["passed"], false);
    assert_eq!(json["checks"]["R2"]["passed"], true);
    assert_eq!(json["checks"]["Q8"]["evidence"], "README is empty.");

    let check_ids: Vec<&str> = json["checks"]
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect();
    assert_eq!(check_ids, ["C4", "Q8", "R1", "R2"]);

    assert_eq!(json["metrics"]["eps_total"], 19);
    assert_eq!(json["metrics"]["completeness_total"], 5);
}

#[test]
fn bundle_round_trip_through_analysis() {
    let bundle = EvidenceBundle::from_json(
        r#"{
            "project": "tiny",
            "declared_version": "v0.3",
            "most_recent_release_at": "2026-09-01T00:00:00Z",
            "checks": {
                "R1": {"passed": true},
                "C4": {"passed": true, "applicable": false, "evidence": "n/a"}
            }
        }"#,
    )
    .unwrap();
    let as_of = Utc.with_ymd_and_hms(2026, 10, 18, 12, 0, 0).unwrap();
    let analysis = analyze(&bundle.checks, &bundle.facts(), &Rubric::reference(), as_of);

    assert_eq!(analysis.decision.tier, Tier::Planning);
    assert!(analysis.report.reason.contains("version 0.3.0"));
    assert!(!analysis.report.checks["C4"].passed);
}
