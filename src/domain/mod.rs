mod material;
mod property;
mod ranges;
mod rules;
mod taxonomy;

pub use material::{MaterialCategory, MaterialRecord};
pub use property::{PropertyData, PropertyRecord, PropertySource, PropertyValue, RawProperty};
pub use ranges::CategoryRanges;
pub use rules::{CategoryRules, UNIVERSAL_REQUIRED};
pub use taxonomy::{QualitativeDefinition, QualitativeTaxonomy};
