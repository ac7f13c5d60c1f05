//! Integration tests for file-backed stage assembly

use std::fs;
use std::path::Path;

use tempfile::TempDir;
use vouch_intake::{assemble, FileStage, IntakeError, StageOutcome};

fn write(dir: &Path, name: &str, contents: &str) -> FileStage {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    FileStage::from_path(path)
}

#[test]
fn test_stages_merge_in_order() {
    let dir = TempDir::new().unwrap();
    let t0 = write(
        dir.path(),
        "t0.json",
        r#"{"T0": {"name": "witness", "passed": true}, "T1": {"name": "draft", "passed": false}}"#,
    );
    let bank = write(
        dir.path(),
        "bank.json",
        r#"{"T1": {"name": "final", "passed": true}, "T2": {"name": "next", "passed": true}}"#,
    );

    let assembly = assemble(&[t0, bank]).unwrap();
    let ledger = &assembly.ledger;
    assert_eq!(ledger.len(), 3);
    let ids: Vec<&str> = ledger.ids().map(|id| id.as_str()).collect();
    assert_eq!(ids, vec!["T0", "T1", "T2"]);
    assert_eq!(ledger.get("T1").unwrap().name(), Some("final"));
    assert_eq!(assembly.stages[0].name, "t0");
}

#[test]
fn test_missing_optional_stage_skipped() {
    let dir = TempDir::new().unwrap();
    let base = write(dir.path(), "base.json", r#"{"T1": {"passed": true}}"#);
    let dark = FileStage::new("dark", dir.path().join("dark.json")).optional();

    let assembly = assemble(&[base, dark]).unwrap();
    assert_eq!(assembly.ledger.len(), 1);
    assert_eq!(assembly.skipped(), vec!["dark"]);
    match &assembly.stages[1].outcome {
        StageOutcome::Skipped { reason } => assert!(reason.contains("dark")),
        other => panic!("Expected Skipped, got {:?}", other),
    }
}

#[test]
fn test_malformed_optional_stage_contributes_nothing() {
    let dir = TempDir::new().unwrap();
    let base = write(dir.path(), "base.json", r#"{"T1": {"passed": true}}"#);
    // One good record and one bad one: the good one must not leak through
    let partial = write(
        dir.path(),
        "partial.json",
        r#"{"T2": {"passed": true}, "T3": [1, 2]}"#,
    )
    .optional();

    let assembly = assemble(&[base, partial]).unwrap();
    assert_eq!(assembly.ledger.len(), 1);
    assert!(!assembly.ledger.contains("T2"));
}

#[test]
fn test_malformed_required_stage_aborts() {
    let dir = TempDir::new().unwrap();
    let base = write(dir.path(), "base.json", r#"{"T1": {"passed": true}}"#);
    let broken = write(dir.path(), "broken.json", "{ \"T2\": ");

    let err = assemble(&[base, broken]).unwrap_err();
    assert!(matches!(err, IntakeError::RequiredStage { ref stage, .. } if stage == "broken"));
    assert!(err.to_string().contains("broken"));
}
