mod material_audit;
mod post_generation;
mod pre_generation;
mod schema_compliance;

pub use material_audit::MaterialAudit;
pub use post_generation::PostGenerationCheck;
pub use pre_generation::PreGenerationCheck;
pub use schema_compliance::SchemaComplianceCheck;

use crate::validation::issue::ValidationIssue;

/// What a phase hands back to the orchestrator. Phase failures travel as an
/// error value, never as a thrown-through exception; the orchestrator
/// pattern-matches and converts them into issue data.
#[derive(Debug, Default)]
pub struct PhaseOutcome {
    pub issues: Vec<ValidationIssue>,
    pub auto_fixes: u32,
}

impl PhaseOutcome {
    pub fn clean() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        self.issues.push(issue);
    }
}
