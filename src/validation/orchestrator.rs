use std::sync::Arc;
use std::time::Instant;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::GateConfig;
use crate::discovery::ResearchCoordinator;
use crate::domain::{CategoryRanges, CategoryRules, MaterialRecord, QualitativeTaxonomy};
use crate::error::Result;
use crate::research::ResearchOracle;
use crate::schema::SchemaResolver;
use crate::validation::issue::{Phase, Severity, ValidationIssue};
use crate::validation::phases::{
    MaterialAudit, PhaseOutcome, PostGenerationCheck, PreGenerationCheck, SchemaComplianceCheck,
};
use crate::validation::render::render_text;
use crate::validation::report::{LifecycleReport, OverallStatus};

#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    /// Which phases to run; they always execute in the fixed lifecycle order
    /// regardless of the order given here.
    pub phases: Vec<Phase>,
    pub auto_fix: bool,
    pub generate_report: bool,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            phases: Phase::ALL.to_vec(),
            auto_fix: false,
            generate_report: false,
        }
    }
}

impl LifecycleOptions {
    pub fn single(phase: Phase) -> Self {
        Self {
            phases: vec![phase],
            auto_fix: false,
            generate_report: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationStatistics {
    pub total_runs: u64,
    pub passed: u64,
    pub warned: u64,
    pub failed: u64,
    pub auto_fixes_applied: u64,
}

/// Runs the validation lifecycle for one material at a time. Phase failures
/// become issue data; the only error this type ever returns is a
/// configuration problem at construction.
pub struct ValidationOrchestrator {
    pre_generation: PreGenerationCheck,
    audit: MaterialAudit,
    post_generation: PostGenerationCheck,
    schema_check: SchemaComplianceCheck,
    stats: RwLock<ValidationStatistics>,
}

impl ValidationOrchestrator {
    pub fn new(config: &GateConfig, oracle: Arc<dyn ResearchOracle>) -> Result<Self> {
        Self::with_tables(
            config,
            Arc::new(CategoryRules::builtin()),
            Arc::new(QualitativeTaxonomy::builtin()),
            Arc::new(CategoryRanges::builtin()),
            oracle,
        )
    }

    /// Full dependency injection, used by tests to swap the rule tables.
    pub fn with_tables(
        config: &GateConfig,
        rules: Arc<CategoryRules>,
        taxonomy: Arc<QualitativeTaxonomy>,
        ranges: Arc<CategoryRanges>,
        oracle: Arc<dyn ResearchOracle>,
    ) -> Result<Self> {
        config.validate()?;

        let coordinator = Arc::new(ResearchCoordinator::with_thresholds(
            rules,
            Arc::clone(&taxonomy),
            ranges,
            oracle,
            crate::discovery::confidence::normalize(config.discovery.high_confidence_threshold),
            config.discovery.research_acceptance_floor,
        ));

        Ok(Self {
            pre_generation: PreGenerationCheck::new(),
            audit: MaterialAudit::new(coordinator),
            post_generation: PostGenerationCheck::new(
                taxonomy,
                config.validation.low_confidence_floor,
            ),
            schema_check: SchemaComplianceCheck::new(SchemaResolver::new(
                &config.schema.schema_dir,
            )),
            stats: RwLock::new(ValidationStatistics::default()),
        })
    }

    pub async fn validate_material_lifecycle(
        &self,
        material: &mut MaterialRecord,
        options: &LifecycleOptions,
    ) -> LifecycleReport {
        let started = Instant::now();
        let mut report = LifecycleReport::begin(&material.name);

        for phase in Phase::ALL {
            if !options.phases.contains(&phase) {
                continue;
            }
            let outcome = match phase {
                Phase::PreGeneration => self.pre_generation.run(material),
                Phase::MaterialAudit => self.audit.run(material).await,
                Phase::PostGeneration => self.post_generation.run(material, options.auto_fix),
                Phase::Schema => self.schema_check.run(material),
            };
            match outcome {
                Ok(PhaseOutcome { issues, auto_fixes }) => {
                    report.record_phase(issues, auto_fixes);
                }
                Err(e) => {
                    warn!(
                        material = %material.name,
                        phase = %phase,
                        error = %e,
                        "phase failed, recording as critical issue"
                    );
                    report.record_phase(
                        vec![ValidationIssue::new(
                            phase,
                            Severity::Critical,
                            format!("phase failed: {}", e),
                        )],
                        0,
                    );
                }
            }
        }

        report.finalize(started.elapsed().as_millis() as u64);
        self.record_statistics(&report);

        if options.generate_report {
            info!("\n{}", render_text(&report));
        }

        report
    }

    pub async fn validate_pre_generation(
        &self,
        material: &mut MaterialRecord,
    ) -> LifecycleReport {
        self.validate_material_lifecycle(material, &LifecycleOptions::single(Phase::PreGeneration))
            .await
    }

    pub async fn audit_material(&self, material: &mut MaterialRecord) -> LifecycleReport {
        self.validate_material_lifecycle(material, &LifecycleOptions::single(Phase::MaterialAudit))
            .await
    }

    pub async fn validate_post_generation(
        &self,
        material: &mut MaterialRecord,
    ) -> LifecycleReport {
        self.validate_material_lifecycle(
            material,
            &LifecycleOptions::single(Phase::PostGeneration),
        )
        .await
    }

    pub async fn validate_schema(&self, material: &mut MaterialRecord) -> LifecycleReport {
        self.validate_material_lifecycle(material, &LifecycleOptions::single(Phase::Schema))
            .await
    }

    fn record_statistics(&self, report: &LifecycleReport) {
        let mut stats = self.stats.write();
        stats.total_runs += 1;
        match report.overall_status {
            OverallStatus::Pass => stats.passed += 1,
            OverallStatus::Warning => stats.warned += 1,
            OverallStatus::Fail => stats.failed += 1,
        }
        stats.auto_fixes_applied += u64::from(report.auto_fixes_applied);
    }

    pub fn statistics(&self) -> ValidationStatistics {
        *self.stats.read()
    }
}
