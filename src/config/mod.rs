mod settings;

pub use settings::{DiscoveryConfig, GateConfig, SchemaConfig, StoreConfig, ValidationConfig};
