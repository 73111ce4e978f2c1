use crate::domain::MaterialRecord;
use crate::error::Result;
use crate::validation::issue::{Phase, Severity, ValidationIssue};
use crate::validation::phases::PhaseOutcome;

/// Data-quality checks on the record as loaded, before any research has
/// touched it.
pub struct PreGenerationCheck;

impl PreGenerationCheck {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self, material: &MaterialRecord) -> Result<PhaseOutcome> {
        let mut outcome = PhaseOutcome::clean();
        let phase = Phase::PreGeneration;

        if material.name.trim().is_empty() {
            outcome.push(ValidationIssue::new(
                phase,
                Severity::Critical,
                "material name is empty",
            ));
        }

        if material.properties.is_empty() {
            outcome.push(ValidationIssue::new(
                phase,
                Severity::High,
                "record has no properties at all; everything will come from research",
            ));
        }

        for (name, raw) in &material.properties {
            let path = format!("properties.{}", name);

            if !(0.0..=100.0).contains(&raw.confidence) {
                outcome.push(
                    ValidationIssue::new(
                        phase,
                        Severity::High,
                        format!("confidence {} is outside [0, 100]", raw.confidence),
                    )
                    .with_field_path(format!("{}.confidence", path)),
                );
            }

            if raw.value.is_numeric() && raw.unit.as_deref().unwrap_or("").is_empty() {
                outcome.push(
                    ValidationIssue::new(
                        phase,
                        Severity::Medium,
                        format!("numeric property '{}' has no unit", name),
                    )
                    .with_field_path(format!("{}.unit", path)),
                );
            }

            if let (Some(min), Some(max)) = (raw.min, raw.max) {
                if min > max {
                    outcome.push(
                        ValidationIssue::new(
                            phase,
                            Severity::High,
                            format!("property '{}' has min {} above max {}", name, min, max),
                        )
                        .with_field_path(path.clone()),
                    );
                }
            }
        }

        Ok(outcome)
    }
}

impl Default for PreGenerationCheck {
    fn default() -> Self {
        Self::new()
    }
}
