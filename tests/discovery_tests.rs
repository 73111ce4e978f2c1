mod fixtures;

use std::collections::BTreeMap;
use std::sync::Arc;

use fixtures::oracle::ScriptedOracle;
use matgate::domain::{
    CategoryRanges, CategoryRules, MaterialCategory, QualitativeTaxonomy, RawProperty,
};
use matgate::error::GateError;
use matgate::research::{ResearchRequest, ResearchedProperty};
use matgate::{MaterialRecord, PropertySource, ResearchCoordinator};

fn coordinator(oracle: ScriptedOracle) -> ResearchCoordinator {
    ResearchCoordinator::new(
        Arc::new(CategoryRules::builtin()),
        Arc::new(QualitativeTaxonomy::builtin()),
        Arc::new(CategoryRanges::builtin()),
        Arc::new(oracle),
    )
}

/// Answers covering everything a metal needs beyond the scripted scenario.
fn metal_answers() -> ScriptedOracle {
    ScriptedOracle::new()
        .with_answer("thermalConductivity", ResearchedProperty::number(50.2, "W/(m*K)", 0.93))
        .with_answer("hardness", ResearchedProperty::number(4.5, "Mohs", 0.91))
        .with_answer("reflectivity", ResearchedProperty::number(0.6, "fraction", 0.90))
        .with_answer("density", ResearchedProperty::number(7.85, "g/cm3", 0.95))
        .with_answer(
            "thermalDestructionPoint",
            ResearchedProperty::number(1370.0, "C", 0.92),
        )
        .with_answer("tensileStrength", ResearchedProperty::number(400.0, "MPa", 0.90))
        .with_answer("electricalConductivity", ResearchedProperty::number(10.0, "MS/m", 0.90))
        .with_answer("corrosionResistance", ResearchedProperty::text("good", 0.88))
}

#[tokio::test]
async fn test_existing_data_wins_over_research() {
    // the oracle also answers density; the existing record must survive
    let mut existing = BTreeMap::new();
    existing.insert("density".to_string(), RawProperty::number(7.80, "g/cm3", 0.60));

    let result = coordinator(metal_answers())
        .discover_and_research("steel", MaterialCategory::Metal, &existing)
        .await
        .unwrap();

    assert!(!result.quantitative.contains_key("density"));
    assert!(!result.qualitative.contains_key("density"));
}

#[tokio::test]
async fn test_redundant_alias_is_dropped() {
    let mut existing = BTreeMap::new();
    existing.insert(
        "thermalDestruction".to_string(),
        RawProperty::number(1350.0, "C", 0.95),
    );
    existing.insert("density".to_string(), RawProperty::number(7.85, "g/cm3", 0.95));

    let result = coordinator(metal_answers())
        .discover_and_research("steel", MaterialCategory::Metal, &existing)
        .await
        .unwrap();

    assert!(!result.quantitative.contains_key("thermalDestructionPoint"));
    assert_eq!(
        result.metadata.skipped_redundant,
        vec!["thermalDestructionPoint".to_string()]
    );
}

#[tokio::test]
async fn test_classification_splits_kinds_and_attaches_ranges() {
    let result = coordinator(metal_answers())
        .discover_and_research("steel", MaterialCategory::Metal, &BTreeMap::new())
        .await
        .unwrap();

    // corrosionResistance is in the taxonomy, everything else is numeric
    assert!(result.qualitative.contains_key("corrosionResistance"));
    assert!(result.quantitative.contains_key("hardness"));

    // the oracle gave no range for hardness; the category table supplies one
    match &result.quantitative["hardness"].data {
        matgate::PropertyData::Quantitative { min, max, .. } => {
            assert_eq!(*min, Some(1.0));
            assert_eq!(*max, Some(10.0));
        }
        _ => panic!("hardness must be quantitative"),
    }
}

#[tokio::test]
async fn test_unclassifiable_text_is_skipped_not_coerced() {
    let oracle = metal_answers()
        .with_answer("surfaceFinish", ResearchedProperty::text("brushed", 0.9));

    let result = coordinator(oracle)
        .discover_and_research("steel", MaterialCategory::Metal, &BTreeMap::new())
        .await
        .unwrap();

    assert!(!result.quantitative.contains_key("surfaceFinish"));
    assert!(!result.qualitative.contains_key("surfaceFinish"));
    assert_eq!(result.metadata.taxonomy_gaps, vec!["surfaceFinish".to_string()]);
}

#[tokio::test]
async fn test_missing_essentials_fail_discovery() {
    // the oracle only knows density; everything else stays missing
    let oracle = ScriptedOracle::new()
        .with_answer("density", ResearchedProperty::number(7.85, "g/cm3", 0.95));

    let err = coordinator(oracle)
        .discover_and_research("steel", MaterialCategory::Metal, &BTreeMap::new())
        .await
        .unwrap_err();

    match err {
        GateError::PropertyDiscovery { material, message } => {
            assert_eq!(material, "steel");
            assert!(message.contains("missing essential properties:"));
        }
        other => panic!("expected PropertyDiscovery, got {:?}", other),
    }
}

#[tokio::test]
async fn test_oracle_failure_becomes_property_discovery_error() {
    let err = coordinator(ScriptedOracle::failing("research backend unavailable"))
        .discover_and_research("steel", MaterialCategory::Metal, &BTreeMap::new())
        .await
        .unwrap_err();

    assert!(matches!(err, GateError::PropertyDiscovery { .. }));
}

#[tokio::test]
async fn test_complete_existing_data_skips_the_oracle_entirely() {
    let rules = CategoryRules::builtin();
    let mut existing = BTreeMap::new();
    for name in rules.essential_for(MaterialCategory::Stone) {
        existing.insert(name, RawProperty::number(1.0, "x", 0.95));
    }

    // a failing oracle proves no bulk call happens when nothing is missing
    let result = coordinator(ScriptedOracle::failing("must not be called"))
        .discover_and_research("granite", MaterialCategory::Stone, &existing)
        .await
        .unwrap();

    assert!(result.is_empty());
    assert_eq!(result.metadata.skip_reasons.len(), existing.len());
}

#[tokio::test]
async fn test_single_property_research_enforces_acceptance_floor() {
    let oracle = ScriptedOracle::new()
        .with_answer("density", ResearchedProperty::number(7.85, "g/cm3", 0.80));
    let request = ResearchRequest {
        material: "steel".to_string(),
        property: "density".to_string(),
        category: MaterialCategory::Metal,
        current_value: None,
    };

    let err = coordinator(oracle).research_single(&request).await.unwrap_err();
    match err {
        GateError::Research { reason, .. } => assert!(reason.contains("acceptance floor")),
        other => panic!("expected Research, got {:?}", other),
    }

    // at or above the floor the answer is accepted
    let oracle = ScriptedOracle::new()
        .with_answer("density", ResearchedProperty::number(7.85, "g/cm3", 0.90));
    let record = coordinator(oracle).research_single(&request).await.unwrap();
    assert_eq!(record.confidence, 90);
}

#[tokio::test]
async fn test_apply_normalizes_and_merges_into_the_record() {
    let mut material = MaterialRecord::new("steel", MaterialCategory::Metal)
        .with_property("density", RawProperty::number(7.80, "g/cm3", 0.60));

    let coordinator = coordinator(metal_answers());
    let result = coordinator
        .discover_and_research(
            &material.name.clone(),
            material.category,
            &material.properties.clone(),
        )
        .await
        .unwrap();
    coordinator.apply(&mut material, &result);

    // existing entry normalized in place and attributed
    let density = &material.properties["density"];
    assert_eq!(density.confidence, 60.0);
    assert_eq!(density.source, Some(PropertySource::ExistingData));
    assert_eq!(density.value.as_number(), Some(7.80));

    // researched entries landed in the stored shape
    let hardness = &material.properties["hardness"];
    assert_eq!(hardness.source, Some(PropertySource::AiResearch));
    assert_eq!(hardness.confidence, 91.0);
}
