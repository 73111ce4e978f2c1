use std::sync::Arc;

use tracing::debug;

use crate::domain::{MaterialRecord, PropertyData, PropertyRecord, QualitativeTaxonomy};
use crate::error::Result;
use crate::validation::issue::{Phase, Severity, ValidationIssue};
use crate::validation::phases::PhaseOutcome;

/// Quality checks over the merged property set, after research has run. Each
/// property is classified once; the checks switch on the resulting tag.
pub struct PostGenerationCheck {
    taxonomy: Arc<QualitativeTaxonomy>,
    /// Normalized percentage below which a property is flagged as weakly
    /// supported.
    low_confidence_floor: u8,
}

impl PostGenerationCheck {
    pub fn new(taxonomy: Arc<QualitativeTaxonomy>, low_confidence_floor: u8) -> Self {
        Self {
            taxonomy,
            low_confidence_floor,
        }
    }

    pub fn run(&self, material: &mut MaterialRecord, auto_fix: bool) -> Result<PhaseOutcome> {
        let mut outcome = PhaseOutcome::clean();
        let phase = Phase::PostGeneration;

        for (name, raw) in &mut material.properties {
            let path = format!("properties.{}", name);

            let record = match PropertyRecord::classify(name, raw, &self.taxonomy) {
                Ok(record) => record,
                Err(_) => {
                    outcome.push(
                        ValidationIssue::new(
                            phase,
                            Severity::Medium,
                            format!(
                                "property '{}' holds a text value outside the qualitative taxonomy",
                                name
                            ),
                        )
                        .with_field_path(path),
                    );
                    continue;
                }
            };

            if record.confidence < self.low_confidence_floor {
                outcome.push(
                    ValidationIssue::new(
                        phase,
                        Severity::Medium,
                        format!(
                            "property '{}' has weak support: {}% confidence",
                            name, record.confidence
                        ),
                    )
                    .with_field_path(format!("{}.confidence", path)),
                );
            }

            match record.data {
                PropertyData::Quantitative {
                    value,
                    min: Some(min),
                    max: Some(max),
                    ..
                } if value < min || value > max => {
                    if auto_fix {
                        let clamped = value.clamp(min, max);
                        raw.value = crate::domain::PropertyValue::Number(clamped);
                        outcome.auto_fixes += 1;
                        debug!(
                            material = %material.name,
                            property = %name,
                            value,
                            clamped,
                            "clamped out-of-range value"
                        );
                        outcome.push(
                            ValidationIssue::new(
                                phase,
                                Severity::Low,
                                format!(
                                    "value {} for '{}' clamped into [{}, {}]",
                                    value, name, min, max
                                ),
                            )
                            .with_field_path(format!("{}.value", path)),
                        );
                    } else {
                        outcome.push(
                            ValidationIssue::new(
                                phase,
                                Severity::High,
                                format!(
                                    "value {} for '{}' is outside its range [{}, {}]",
                                    value, name, min, max
                                ),
                            )
                            .with_field_path(format!("{}.value", path)),
                        );
                    }
                }
                PropertyData::Qualitative {
                    ref value,
                    ref allowed_values,
                } if !allowed_values.iter().any(|v| v == value) => {
                    outcome.push(
                        ValidationIssue::new(
                            phase,
                            Severity::Medium,
                            format!(
                                "value '{}' for '{}' is not in the allowed set [{}]",
                                value,
                                name,
                                allowed_values.join(", ")
                            ),
                        )
                        .with_field_path(format!("{}.value", path)),
                    );
                }
                _ => {}
            }
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MaterialCategory, RawProperty};

    fn check() -> PostGenerationCheck {
        PostGenerationCheck::new(Arc::new(QualitativeTaxonomy::builtin()), 50)
    }

    #[test]
    fn test_in_range_properties_pass() {
        let mut material = MaterialRecord::new("steel", MaterialCategory::Metal).with_property(
            "density",
            RawProperty::number(7.85, "g/cm3", 92.0).with_range(0.5, 22.6),
        );
        let outcome = check().run(&mut material, false).unwrap();
        assert!(outcome.issues.is_empty());
    }

    #[test]
    fn test_out_of_range_is_high_without_auto_fix() {
        let mut material = MaterialRecord::new("steel", MaterialCategory::Metal).with_property(
            "density",
            RawProperty::number(50.0, "g/cm3", 92.0).with_range(0.5, 22.6),
        );
        let outcome = check().run(&mut material, false).unwrap();
        assert_eq!(outcome.issues.len(), 1);
        assert_eq!(outcome.issues[0].severity, Severity::High);
        assert_eq!(outcome.auto_fixes, 0);
    }

    #[test]
    fn test_auto_fix_clamps_and_counts() {
        let mut material = MaterialRecord::new("steel", MaterialCategory::Metal).with_property(
            "density",
            RawProperty::number(50.0, "g/cm3", 92.0).with_range(0.5, 22.6),
        );
        let outcome = check().run(&mut material, true).unwrap();
        assert_eq!(outcome.auto_fixes, 1);
        assert_eq!(outcome.issues[0].severity, Severity::Low);
        assert_eq!(
            material.properties["density"].value.as_number(),
            Some(22.6)
        );
    }

    #[test]
    fn test_low_confidence_and_bad_grade_are_medium() {
        let mut material = MaterialRecord::new("fir", MaterialCategory::Wood)
            .with_property("flammability", RawProperty::text("extreme", 30.0));
        let outcome = check().run(&mut material, false).unwrap();

        assert_eq!(outcome.issues.len(), 2);
        assert!(outcome
            .issues
            .iter()
            .all(|i| i.severity == Severity::Medium));
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.message.contains("weak support")));
        assert!(outcome
            .issues
            .iter()
            .any(|i| i.message.contains("not in the allowed set")));
    }

    #[test]
    fn test_text_outside_taxonomy_is_flagged() {
        let mut material = MaterialRecord::new("steel", MaterialCategory::Metal)
            .with_property("surfaceFinish", RawProperty::text("brushed", 90.0));
        let outcome = check().run(&mut material, false).unwrap();
        assert_eq!(outcome.issues.len(), 1);
        assert!(outcome.issues[0]
            .message
            .contains("outside the qualitative taxonomy"));
    }
}
