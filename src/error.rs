use thiserror::Error;

#[derive(Error, Debug)]
pub enum GateError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Property discovery failed for '{material}': {message}")]
    PropertyDiscovery { material: String, message: String },

    #[error("Research failed for '{material}.{property}': {reason}")]
    Research {
        material: String,
        property: String,
        reason: String,
    },

    #[error("Schema error: {0}")]
    Schema(String),

    #[error("Material not found: {0}")]
    MaterialNotFound(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml_bw::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl GateError {
    pub fn discovery(material: impl Into<String>, message: impl Into<String>) -> Self {
        Self::PropertyDiscovery {
            material: material.into(),
            message: message.into(),
        }
    }

    pub fn research(
        material: impl Into<String>,
        property: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Research {
            material: material.into(),
            property: property.into(),
            reason: reason.into(),
        }
    }

    /// Fatal errors abort the whole lifecycle run; everything else is
    /// converted into issue data by the orchestrator.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

pub type Result<T> = std::result::Result<T, GateError>;
