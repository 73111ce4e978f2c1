use std::sync::Arc;

use tracing::info;

use crate::discovery::ResearchCoordinator;
use crate::domain::MaterialRecord;
use crate::error::{GateError, Result};
use crate::validation::issue::{Phase, Severity, ValidationIssue};
use crate::validation::phases::PhaseOutcome;

/// Drives the discover-and-research pipeline and merges the outcome back into
/// the record. A property-discovery failure is the designated fatal error for
/// one material: it becomes a single critical issue here.
pub struct MaterialAudit {
    coordinator: Arc<ResearchCoordinator>,
}

impl MaterialAudit {
    pub fn new(coordinator: Arc<ResearchCoordinator>) -> Self {
        Self { coordinator }
    }

    pub async fn run(&self, material: &mut MaterialRecord) -> Result<PhaseOutcome> {
        let phase = Phase::MaterialAudit;
        let existing = material.properties.clone();

        match self
            .coordinator
            .discover_and_research(&material.name, material.category, &existing)
            .await
        {
            Ok(result) => {
                let mut outcome = PhaseOutcome::clean();
                for name in &result.metadata.skipped_redundant {
                    outcome.push(
                        ValidationIssue::new(
                            phase,
                            Severity::Low,
                            format!("discovered property '{}' dropped as a redundant alias", name),
                        )
                        .with_field_path(format!("properties.{}", name)),
                    );
                }
                for name in &result.metadata.taxonomy_gaps {
                    outcome.push(
                        ValidationIssue::new(
                            phase,
                            Severity::Medium,
                            format!(
                                "discovered value for '{}' looks qualitative but the property is not in the taxonomy",
                                name
                            ),
                        )
                        .with_field_path(format!("properties.{}", name)),
                    );
                }

                self.coordinator.apply(material, &result);
                info!(
                    material = %material.name,
                    researched = result.metadata.researched_count,
                    skipped = result.metadata.skip_reasons.len(),
                    "material audit merged research result"
                );
                Ok(outcome)
            }
            Err(GateError::PropertyDiscovery {
                material: name,
                message,
            }) => {
                let mut outcome = PhaseOutcome::clean();
                outcome.push(ValidationIssue::new(
                    phase,
                    Severity::Critical,
                    format!("property discovery failed for '{}': {}", name, message),
                ));
                Ok(outcome)
            }
            // anything else flows through the phase-failure channel and is
            // converted by the orchestrator
            Err(other) => Err(other),
        }
    }
}
