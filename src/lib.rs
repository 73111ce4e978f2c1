pub mod cli;
pub mod config;
pub mod discovery;
pub mod domain;
pub mod error;
pub mod research;
pub mod schema;
pub mod store;
pub mod validation;

pub use config::GateConfig;
pub use discovery::{
    EssentialCoverageValidator, GapAnalysis, GapAnalyzer, PropertyResearchResult,
    ResearchCoordinator,
};
pub use domain::{
    CategoryRanges, CategoryRules, MaterialCategory, MaterialRecord, PropertyData, PropertyRecord,
    PropertySource, PropertyValue, QualitativeTaxonomy, RawProperty,
};
pub use error::{GateError, Result};
pub use research::{RangeTableOracle, ResearchOracle, ResearchRequest, ResearchedProperty};
pub use schema::{deep_merge, SchemaResolver};
pub use store::{FileStore, RecordStore};
pub use validation::{
    LifecycleOptions, LifecycleReport, OverallStatus, Phase, Severity, ValidationIssue,
    ValidationOrchestrator,
};
