mod issue;
mod orchestrator;
mod phases;
mod render;
mod report;

pub use issue::{Phase, Severity, ValidationIssue};
pub use orchestrator::{LifecycleOptions, ValidationOrchestrator, ValidationStatistics};
pub use phases::{
    MaterialAudit, PhaseOutcome, PostGenerationCheck, PreGenerationCheck, SchemaComplianceCheck,
};
pub use render::render_text;
pub use report::{LifecycleReport, OverallStatus, SeverityCounts};
