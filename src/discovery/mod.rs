pub mod confidence;

mod coordinator;
mod coverage;
mod gap;

pub use coordinator::{PropertyResearchResult, ResearchCoordinator, ResearchMetadata};
pub use coverage::EssentialCoverageValidator;
pub use gap::{GapAnalysis, GapAnalyzer};
