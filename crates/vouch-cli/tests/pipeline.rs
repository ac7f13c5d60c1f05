//! End-to-end runs over configuration files and stage files on disk

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;
use vouch_cli::config::{Config, OutputFormat};
use vouch_cli::pipeline::{self, Outcome};
use vouch_cli::{CliError, Formatter};
use vouch_intake::StageOutcome;
use vouch_report::ExportDocument;

fn demo_config() -> Config {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../demos/vouch.toml");
    Config::load_from(&path).unwrap()
}

fn demo_outcome() -> (Config, Outcome) {
    let config = demo_config();
    let outcome = pipeline::run(&config, &[]).unwrap();
    (config, outcome)
}

fn write(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

const CLEAN_STAGE: &str = r#"{
  "T1": {"name": "T1", "tier": 0, "passed": true, "epistemic": "P",
         "summary": "s", "key_result": "k", "dependencies": ["A1"]},
  "T2": {"name": "T2", "tier": 1, "passed": true, "epistemic": "C",
         "summary": "s", "key_result": "k", "dependencies": ["T1", "Missing lemma"]}
}"#;

fn scratch_config(dir: &Path, stages: &str) -> Config {
    let path = write(
        dir,
        "vouch.toml",
        &format!("[vocabulary]\naxioms = [\"A1\"]\n\n{}", stages),
    );
    Config::load_from(&path).unwrap()
}

#[test]
fn test_demo_stages_merge_in_order() {
    let (_, outcome) = demo_outcome();
    let ledger = &outcome.assembly.ledger;

    let ids: Vec<&str> = ledger.ids().map(|id| id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["T1", "T2", "T3", "T_epsilon", "T_channels", "T7", "T_gauge", "T5", "T10"]
    );
    assert_eq!(
        ledger.get("T7").and_then(|r| r.key_result()),
        Some("N_gen = 3 exactly")
    );

    assert_eq!(outcome.assembly.skipped(), vec!["dark"]);
    match &outcome.assembly.stages[2].outcome {
        StageOutcome::Loaded { records, replaced } => {
            assert_eq!(*records, 2);
            assert_eq!(replaced.len(), 1);
            assert_eq!(replaced[0].as_str(), "T7");
        }
        other => panic!("closure stage not loaded: {:?}", other),
    }
}

#[test]
fn test_demo_validation_and_verdict() {
    let (_, outcome) = demo_outcome();

    assert_eq!(outcome.validation.total_checked, 9);
    assert_eq!(outcome.validation.cycles_found(), 0);
    assert_eq!(
        outcome.validation.issue_messages(),
        vec!["T10 depends on 'A10_unrelated' -- not in registry".to_string()]
    );

    assert_eq!(outcome.aggregate.total, 9);
    assert_eq!(outcome.aggregate.passed, 8);
    assert!(!outcome.aggregate.all_pass);
    assert!(!outcome.passes(false));
    assert!(!outcome.passes(true));
}

#[test]
fn test_demo_document() {
    let (config, outcome) = demo_outcome();
    let doc = outcome.document(&config);

    assert_eq!(doc.title.as_deref(), Some("Admissibility ledger"));
    assert_eq!(doc.version.as_deref(), Some("3.5"));
    assert_eq!(doc.failed(), 1);
    assert!(doc.sector_verdicts["gauge"]);
    assert!(doc.sector_verdicts["foundations"]);

    assert_eq!(doc.tier_stats["0"].name, "Axiom Foundations");
    assert_eq!(doc.tier_stats["0"].total, 4);
    assert_eq!(doc.tier_stats["2"].passed, 1);
    assert_eq!(doc.tier_stats["2"].total, 2);

    assert_eq!(doc.theorems["T1"].gap_type.as_deref(), Some("closed"));
    assert_eq!(doc.theorems["T3"].gap_type.as_deref(), Some("import"));
    assert_eq!(doc.theorems["T10"].gap_type.as_deref(), Some("open_physics"));
    assert_eq!(doc.theorems["T5"].gap_type.as_deref(), Some("reduced"));

    let reasons = doc.p_structural_reasons.as_ref().unwrap();
    assert_eq!(
        reasons.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect::<Vec<_>>(),
        vec![("T3", "other"), ("T_gauge", "qft_import")]
    );
    assert_eq!(doc.theorems["T_gauge"].ps_reason.as_deref(), Some("qft_import"));
    assert!(doc.theorems["T1"].ps_reason.is_none());

    assert_eq!(
        doc.math_imports.keys().map(String::as_str).collect::<Vec<_>>(),
        vec!["Gleason theorem", "Anomaly cancellation"]
    );
    let gleason = &doc.math_imports["Gleason theorem"];
    assert_eq!(gleason.used_by, vec!["T3".to_string()]);
    assert_eq!(gleason.details, "Frame functions on dimension >= 3 are quadratic");
    assert_eq!(
        doc.math_imports["Anomaly cancellation"].details,
        "Gauge anomalies must cancel per generation"
    );
}

#[test]
fn test_json_check_output_is_the_document() {
    let (config, outcome) = demo_outcome();
    let formatter = Formatter::new(OutputFormat::Json, false);

    let text = formatter.format_check(&outcome, &config).unwrap();
    let parsed = ExportDocument::from_json(&text).unwrap();
    assert_eq!(parsed, outcome.document(&config));
}

#[test]
fn test_table_outputs_mention_every_tier() {
    let (config, outcome) = demo_outcome();
    let formatter = Formatter::new(OutputFormat::Table, false);

    let check = formatter.format_check(&outcome, &config).unwrap();
    assert!(check.contains("Axiom Foundations"));
    assert!(check.contains("Gauge Group Selection"));
    assert!(check.contains("Particle Content"));
    assert!(check.contains("Skipped optional stage 'dark'"));
    assert!(check.contains("A10_unrelated"));
    assert!(check.contains("Structural reasons"));

    let audit = formatter.format_audit(&outcome, &config).unwrap();
    assert!(audit.contains("open_physics"));
    assert!(audit.contains("Frame function continuity"));
}

#[test]
fn test_strict_fails_on_unresolved_reference() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "stage.json", CLEAN_STAGE);
    let config = scratch_config(
        dir.path(),
        "[[stages]]\nname = \"only\"\npath = \"stage.json\"\n",
    );

    let outcome = pipeline::run(&config, &[]).unwrap();
    assert!(outcome.aggregate.all_pass);
    assert!(outcome.aggregate.structural_reasons.is_none());
    assert!(!outcome.validation.valid);
    assert!(outcome.passes(false));
    assert!(!outcome.passes(true));
}

#[test]
fn test_command_line_stages_replace_configured_ones() {
    let dir = TempDir::new().unwrap();
    let extra = write(dir.path(), "extra.json", CLEAN_STAGE);
    let config = scratch_config(
        dir.path(),
        "[[stages]]\nname = \"gone\"\npath = \"missing.json\"\n",
    );

    // The configured stage would fail; the override never reads it
    assert!(pipeline::run(&config, &[]).is_err());

    let outcome = pipeline::run(&config, &[extra]).unwrap();
    assert_eq!(outcome.assembly.ledger.len(), 2);
    assert_eq!(outcome.assembly.stages[0].name, "extra");
}

#[test]
fn test_missing_required_stage_is_an_error() {
    let dir = TempDir::new().unwrap();
    let config = scratch_config(
        dir.path(),
        "[[stages]]\nname = \"base\"\npath = \"nowhere.json\"\n",
    );

    let err = pipeline::run(&config, &[]).unwrap_err();
    assert!(matches!(err, CliError::Intake(_)));
    assert!(err.to_string().contains("base"));
}

#[test]
fn test_malformed_optional_stage_is_skipped() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "good.json", CLEAN_STAGE);
    write(dir.path(), "bad.json", "[1, 2, 3]");
    let config = scratch_config(
        dir.path(),
        "[[stages]]\nname = \"good\"\npath = \"good.json\"\n\n\
         [[stages]]\nname = \"bad\"\npath = \"bad.json\"\noptional = true\n",
    );

    let outcome = pipeline::run(&config, &[]).unwrap();
    assert_eq!(outcome.assembly.skipped(), vec!["bad"]);
    assert_eq!(outcome.aggregate.total, 2);
}

#[test]
fn test_audit_without_registry_is_an_error() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "stage.json", CLEAN_STAGE);
    let config = scratch_config(
        dir.path(),
        "[[stages]]\nname = \"only\"\npath = \"stage.json\"\n",
    );
    let outcome = pipeline::run(&config, &[]).unwrap();

    let formatter = Formatter::new(OutputFormat::Table, false);
    assert!(matches!(
        formatter.format_audit(&outcome, &config),
        Err(CliError::Config(_))
    ));
}
