mod merge;
mod resolver;

pub use merge::deep_merge;
pub use resolver::{builtin_minimal_schema, ResolvedSchema, SchemaResolver};
