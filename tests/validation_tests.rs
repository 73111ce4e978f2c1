mod fixtures;

use std::sync::Arc;

use fixtures::oracle::ScriptedOracle;
use matgate::config::GateConfig;
use matgate::domain::{MaterialCategory, RawProperty};
use matgate::research::ResearchedProperty;
use matgate::validation::{LifecycleOptions, Phase, Severity, ValidationOrchestrator};
use matgate::{GateError, MaterialRecord, OverallStatus};

fn orchestrator(oracle: ScriptedOracle) -> ValidationOrchestrator {
    ValidationOrchestrator::new(&GateConfig::default(), Arc::new(oracle)).unwrap()
}

/// Everything an oak record needs beyond its existing density.
fn wood_answers() -> ScriptedOracle {
    ScriptedOracle::new()
        .with_answer("thermalConductivity", ResearchedProperty::number(0.16, "W/(m*K)", 0.93))
        .with_answer("hardness", ResearchedProperty::number(3.8, "Mohs", 0.91))
        .with_answer("reflectivity", ResearchedProperty::number(0.25, "fraction", 0.90))
        .with_answer("flammability", ResearchedProperty::text("moderate", 0.92))
        .with_answer("moistureResistance", ResearchedProperty::text("fair", 0.90))
        .with_answer("workability", ResearchedProperty::text("excellent", 0.94))
}

fn oak() -> MaterialRecord {
    MaterialRecord::new("oak", MaterialCategory::Wood)
        .with_property("density", RawProperty::number(0.75, "g/cm3", 0.90))
}

#[tokio::test]
async fn test_full_lifecycle_passes_for_complete_material() {
    let orchestrator = orchestrator(wood_answers());
    let mut material = oak();

    let report = orchestrator
        .validate_material_lifecycle(&mut material, &LifecycleOptions::default())
        .await;

    assert_eq!(report.overall_status, OverallStatus::Pass, "{:?}", report.issues);
    assert_eq!(report.phases_completed, 4);
    assert_eq!(report.severity_counts.critical, 0);

    // the audit merged researched properties into the record
    assert!(material.properties.contains_key("flammability"));
    assert!(material.properties.contains_key("thermalConductivity"));
}

#[tokio::test]
async fn test_failing_phase_is_contained_as_critical_issue() {
    let orchestrator = orchestrator(ScriptedOracle::failing("backend down"));
    let mut material = oak();

    let report = orchestrator.audit_material(&mut material).await;

    assert_eq!(report.overall_status, OverallStatus::Fail);
    assert_eq!(report.phases_completed, 1);
    let critical: Vec<_> = report
        .issues
        .iter()
        .filter(|i| i.severity == Severity::Critical)
        .collect();
    assert_eq!(critical.len(), 1);
    assert_eq!(critical[0].phase, Phase::MaterialAudit);
}

#[tokio::test]
async fn test_status_never_recovers_after_fail() {
    // audit fails, later phases run clean; the verdict must stay FAIL
    let orchestrator = orchestrator(ScriptedOracle::failing("backend down"));
    let mut material = oak();

    let report = orchestrator
        .validate_material_lifecycle(&mut material, &LifecycleOptions::default())
        .await;

    assert_eq!(report.overall_status, OverallStatus::Fail);
    assert_eq!(report.phases_completed, 4);
}

#[tokio::test]
async fn test_phases_run_in_fixed_order_regardless_of_request_order() {
    let orchestrator = orchestrator(wood_answers());
    let mut material = oak();

    let options = LifecycleOptions {
        phases: vec![Phase::Schema, Phase::PreGeneration, Phase::MaterialAudit],
        ..LifecycleOptions::default()
    };
    let report = orchestrator
        .validate_material_lifecycle(&mut material, &options)
        .await;

    assert_eq!(report.phases_completed, 3);
    // schema ran after the audit, so it saw researched properties with
    // sources attached and raised nothing
    assert!(report.issues_for(Phase::Schema).is_empty(), "{:?}", report.issues);
}

#[tokio::test]
async fn test_high_issues_warn_without_failing() {
    // a record with no properties draws a HIGH issue in pre-generation, and
    // the oracle can still fill every essential afterwards
    let oracle = wood_answers()
        .with_answer("density", ResearchedProperty::number(0.7, "g/cm3", 0.95));
    let orchestrator = orchestrator(oracle);
    let mut material = MaterialRecord::new("oak", MaterialCategory::Wood);

    let report = orchestrator
        .validate_material_lifecycle(&mut material, &LifecycleOptions::default())
        .await;

    assert_eq!(report.overall_status, OverallStatus::Warning, "{:?}", report.issues);
    assert!(report.severity_counts.high >= 1);
    assert_eq!(report.severity_counts.critical, 0);
}

#[tokio::test]
async fn test_auto_fix_clamps_out_of_range_values() {
    let mut material = oak().with_property(
        "hardness",
        RawProperty::number(40.0, "Mohs", 0.95).with_range(1.0, 10.0),
    );
    let orchestrator = orchestrator(wood_answers());

    let options = LifecycleOptions {
        auto_fix: true,
        ..LifecycleOptions::default()
    };
    let report = orchestrator
        .validate_material_lifecycle(&mut material, &options)
        .await;

    assert_eq!(report.auto_fixes_applied, 1);
    assert_eq!(material.properties["hardness"].value.as_number(), Some(10.0));
}

#[tokio::test]
async fn test_statistics_accumulate_across_runs() {
    let orchestrator = orchestrator(wood_answers());

    let mut passing = oak();
    orchestrator
        .validate_material_lifecycle(&mut passing, &LifecycleOptions::default())
        .await;

    let mut failing = MaterialRecord::new("", MaterialCategory::Wood);
    orchestrator
        .validate_material_lifecycle(&mut failing, &LifecycleOptions::default())
        .await;

    let stats = orchestrator.statistics();
    assert_eq!(stats.total_runs, 2);
    assert_eq!(stats.passed, 1);
    assert_eq!(stats.failed, 1);
}

#[tokio::test]
async fn test_narrow_entry_points_run_one_phase() {
    let orchestrator = orchestrator(wood_answers());
    let mut material = oak();

    let report = orchestrator.validate_pre_generation(&mut material).await;
    assert_eq!(report.phases_completed, 1);
    assert!(report.issues_for(Phase::MaterialAudit).is_empty());
    // pre-generation alone never touches the property set
    assert_eq!(material.properties.len(), 1);
}

#[test]
fn test_invalid_config_is_fatal_at_construction() {
    let mut config = GateConfig::default();
    config.discovery.high_confidence_threshold = 4.2;

    let result = ValidationOrchestrator::new(&config, Arc::new(ScriptedOracle::new()));
    assert!(matches!(result, Err(GateError::Config(_))));
}
